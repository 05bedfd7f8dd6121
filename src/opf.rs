//! Package document (`OEBPS/content.opf`): metadata, manifest, spine and guide.

use crate::content::{Content, FileSequence, Section, walk};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::metadata::Metadata;
use crate::xml::{self, LineEnding, escape};

pub const PATH: &str = "OEBPS/content.opf";

pub fn encode(document: &Document, line_ending: LineEnding) -> Result<String> {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="utf-8"?><package version="2.0" unique-identifier="BookId" xmlns="http://www.idpf.org/2007/opf">"#);

    out.push_str(r#"<metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">"#);
    push_metadata(&mut out, &document.metadata);
    if let Some(cover) = &document.cover {
        out.push_str(&format!(
            r#"<meta name="cover" content="{}"/>"#,
            escape(cover.name())
        ));
    }
    out.push_str("</metadata>");

    out.push_str("<manifest>");
    out.push_str(r#"<item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>"#);
    if document.stylesheet.is_some() {
        out.push_str(r#"<item id="style.css" href="style.css" media-type="text/css"/>"#);
    }
    if let Some(cover) = &document.cover {
        push_item(&mut out, cover.name(), cover.media_type());
    }
    for resource in &document.resources {
        push_item(&mut out, resource.name(), resource.media_type());
    }
    push_sections(&mut out, &document.contents, |section| {
        let filename = escape(&section.filename);
        format!(r#"<item id="{filename}" href="{filename}" media-type="application/xhtml+xml"/>"#)
    })?;
    out.push_str("</manifest>");

    out.push_str(r#"<spine toc="ncx">"#);
    push_sections(&mut out, &document.contents, |section| {
        format!(r#"<itemref idref="{}"/>"#, escape(&section.filename))
    })?;
    out.push_str("</spine>");

    out.push_str("<guide>");
    push_sections(&mut out, &document.contents, |section| {
        let reftype = &section.content.reference_type;
        format!(
            r#"<reference type="{}" title="{}" href="{}"/>"#,
            reftype.tag(),
            escape(reftype.label()),
            escape(&section.filename)
        )
    })?;
    out.push_str("</guide>");

    out.push_str("</package>");
    Ok(xml::format(&out, line_ending))
}

fn push_metadata(out: &mut String, metadata: &Metadata) {
    out.push_str(&format!("<dc:title>{}</dc:title>", escape(&metadata.title)));
    out.push_str(&format!(
        "<dc:language>{}</dc:language>",
        metadata.language.code()
    ));
    out.push_str(&format!(
        r#"<dc:identifier id="BookId" opf:scheme="{}">{}</dc:identifier>"#,
        metadata.identifier.scheme(),
        escape(&metadata.identifier.urn())
    ));

    if let Some(creator) = &metadata.creator {
        out.push_str(&format!(
            r#"<dc:creator opf:role="aut">{}</dc:creator>"#,
            escape(creator)
        ));
    }
    if let Some(contributor) = &metadata.contributor {
        out.push_str(&format!(
            r#"<dc:contributor opf:role="trl">{}</dc:contributor>"#,
            escape(contributor)
        ));
    }
    if let Some(publisher) = &metadata.publisher {
        out.push_str(&format!("<dc:publisher>{}</dc:publisher>", escape(publisher)));
    }
    if let Some(date) = &metadata.date {
        out.push_str(&format!(
            r#"<dc:date opf:event="publication">{}</dc:date>"#,
            date.format("%Y-%m-%d")
        ));
    }
    if let Some(subject) = &metadata.subject {
        out.push_str(&format!("<dc:subject>{}</dc:subject>", escape(subject)));
    }
    if let Some(description) = &metadata.description {
        out.push_str(&format!(
            "<dc:description>{}</dc:description>",
            escape(description)
        ));
    }
}

fn push_item(out: &mut String, name: &str, media_type: &str) {
    let name = escape(name);
    out.push_str(&format!(
        r#"<item id="{name}" href="{name}" media-type="{media_type}"/>"#
    ));
}

/// One pass over the section tree with a fresh file counter.
fn push_sections(
    out: &mut String,
    contents: &[Content],
    render: impl Fn(&Section<'_>) -> String,
) -> Result<()> {
    walk(contents, &mut FileSequence::new(), &mut |section| {
        if !section.filename.ends_with(".xhtml") {
            return Err(Error::ContentFilename(section.filename));
        }
        out.push_str(&render(&section));
        Ok(())
    })
}
