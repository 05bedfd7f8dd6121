use crate::content::{Content, FileSequence, Section, walk};
use crate::error::{Error, Result};
use crate::xml::{self, LineEnding};

pub const STYLESHEET_LINK: &str = r#"<link href="style.css" rel="stylesheet" type="text/css"/>"#;

/// One rendered section, ready to be stored at `path` inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFile {
    pub path: String,
    pub xhtml: String,
}

/// Renders every section of the forest, numbering files in pre-order from 1.
///
/// Stops at the first body that cannot be read.
pub fn encode(
    contents: &[Content],
    with_stylesheet: bool,
    line_ending: LineEnding,
) -> Result<Vec<SectionFile>> {
    let mut files = Vec::new();
    walk(contents, &mut FileSequence::new(), &mut |section| {
        let xhtml = render(&section, with_stylesheet)?;
        files.push(SectionFile {
            path: format!("OEBPS/{}", section.filename),
            xhtml: xml::format(&xhtml, line_ending),
        });
        Ok::<(), Error>(())
    })?;
    Ok(files)
}

fn render(section: &Section<'_>, with_stylesheet: bool) -> Result<String> {
    let text = section.content.body.read_text()?;
    let link = if with_stylesheet { STYLESHEET_LINK } else { "" };
    let head = text.trim_start();
    // A caller-supplied body element replaces the template's own wrapper.
    let body = if head.starts_with("<body>") || head.starts_with("<body ") {
        text
    } else {
        format!("<body>{text}</body>")
    };

    Ok(format!(
        r#"<?xml version="1.0" encoding="utf-8"?><!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd"><html xmlns="http://www.w3.org/1999/xhtml"><head><title>{}</title>{link}</head>{body}</html>"#,
        xml::escape(section.content.label()),
    ))
}
