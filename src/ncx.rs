//! Navigation map (`OEBPS/toc.ncx`). Reference ids extend the section id
//! with their 1-based sibling path.

use crate::content::{Content, ContentReference, FileSequence, Section};
use crate::document::Document;
use crate::xml::{self, LineEnding, escape};

pub const PATH: &str = "OEBPS/toc.ncx";

#[derive(Debug, Default)]
struct NavCounters {
    play_order: usize,
    files: FileSequence,
}

pub fn encode(document: &Document, line_ending: LineEnding) -> String {
    let metadata = &document.metadata;
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?><!DOCTYPE ncx PUBLIC "-//NISO//DTD ncx 2005-1//EN" "http://www.daisy.org/z3986/2005/ncx-2005-1.dtd"><ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">"#);

    out.push_str("<head>");
    out.push_str(&format!(
        r#"<meta name="dtb:uid" content="{}"/>"#,
        escape(&metadata.identifier.urn())
    ));
    out.push_str(&format!(
        r#"<meta name="dtb:depth" content="{}"/>"#,
        document.depth()
    ));
    out.push_str(r#"<meta name="dtb:totalPageCount" content="0"/>"#);
    out.push_str(r#"<meta name="dtb:maxPageNumber" content="0"/>"#);
    out.push_str("</head>");

    out.push_str(&format!(
        "<docTitle><text>{}</text></docTitle>",
        escape(&metadata.title)
    ));

    out.push_str("<navMap>");
    push_contents(&mut out, &document.contents, &mut NavCounters::default());
    out.push_str("</navMap></ncx>");

    xml::format(&out, line_ending)
}

fn push_contents(out: &mut String, contents: &[Content], counters: &mut NavCounters) {
    for content in contents {
        counters.play_order += 1;
        let section = counters.files.next(content);

        out.push_str(&format!(
            r#"<navPoint id="navPoint-{}" playOrder="{}">"#,
            section.number, counters.play_order
        ));
        push_label_and_src(out, content.label(), &section.filename);

        let mut link_number = 0;
        let mut path = Vec::new();
        push_references(
            out,
            &section,
            &content.references,
            &mut path,
            &mut link_number,
            counters,
        );

        push_contents(out, &content.children, counters);
        out.push_str("</navPoint>");
    }
}

fn push_references(
    out: &mut String,
    owner: &Section<'_>,
    references: &[ContentReference],
    path: &mut Vec<usize>,
    link_number: &mut usize,
    counters: &mut NavCounters,
) {
    for (index, reference) in references.iter().enumerate() {
        *link_number += 1;
        counters.play_order += 1;
        path.push(index + 1);

        let id = path
            .iter()
            .map(|step| step.to_string())
            .collect::<Vec<_>>()
            .join("-");
        out.push_str(&format!(
            r#"<navPoint id="navPoint-{}-{id}" playOrder="{}">"#,
            owner.number, counters.play_order
        ));
        push_label_and_src(
            out,
            &reference.title,
            &reference.href(&owner.filename, *link_number),
        );

        push_references(out, owner, &reference.children, path, link_number, counters);
        out.push_str("</navPoint>");
        path.pop();
    }
}

fn push_label_and_src(out: &mut String, label: &str, src: &str) {
    out.push_str(&format!(
        r#"<navLabel><text>{}</text></navLabel><content src="{}"/>"#,
        escape(label),
        escape(src)
    ));
}
