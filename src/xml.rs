//! Escaping and textual re-indentation of generated XML.
//!
//! [`format`] is a tag scanner, not a parser: it does not check
//! well-formedness, and a `>` inside an attribute value ends the tag early.

const INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        if cfg!(windows) { Self::CrLf } else { Self::Lf }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Declaration,
    SelfClosing,
    Markup,
    Closing,
    Opening,
}

impl Tag {
    fn classify(tag: &str) -> Self {
        if tag.starts_with("<?") {
            Self::Declaration
        } else if tag.ends_with("/>") {
            Self::SelfClosing
        } else if tag.starts_with("<!") {
            Self::Markup
        } else if tag.starts_with("</") {
            Self::Closing
        } else {
            Self::Opening
        }
    }
}

/// Re-indents `xml`: one tag per line, two spaces per level, leaf text kept inline.
pub fn format(xml: &str, line_ending: LineEnding) -> String {
    let xml = collapse_between_tags(xml);
    let newline = line_ending.as_str();

    let mut out = String::with_capacity(xml.len() * 2);
    let mut depth = 0usize;
    let mut previous: Option<Tag> = None;
    let mut rest = xml.as_str();

    // Trailing whitespace of preceding text is folded into the break.
    let line_break = |out: &mut String, depth: usize| {
        out.truncate(out.trim_end().len());
        if !out.is_empty() {
            out.push_str(newline);
        }
        for _ in 0..depth {
            out.push_str(INDENT);
        }
    };

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        rest = &rest[lt..];
        let Some(gt) = rest.find('>') else {
            break;
        };
        let tag = &rest[..=gt];
        rest = &rest[gt + 1..];

        let kind = Tag::classify(tag);
        match kind {
            Tag::Declaration => {}
            Tag::SelfClosing | Tag::Markup => line_break(&mut out, depth),
            Tag::Closing => {
                depth = depth.saturating_sub(1);
                if previous == Some(Tag::Closing) {
                    line_break(&mut out, depth);
                }
            }
            Tag::Opening => {
                line_break(&mut out, depth);
                depth += 1;
            }
        }
        out.push_str(tag);
        previous = Some(kind);
    }
    out.push_str(rest);
    out
}

pub fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Drops whitespace-only runs that sit between a `>` and the next `<`.
fn collapse_between_tags(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    let mut rest = xml;
    while let Some(gt) = rest.find('>') {
        out.push_str(&rest[..=gt]);
        rest = &rest[gt + 1..];
        let trimmed = rest.trim_start();
        if trimmed.len() < rest.len() && trimmed.starts_with('<') {
            rest = trimmed;
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lf(xml: &str) -> String {
        format(xml, LineEnding::Lf)
    }

    #[test]
    fn indents_nested_elements() {
        assert_eq!(
            lf("<root><child>hello</child></root>"),
            "<root>\n  <child>hello</child>\n</root>"
        );
        assert_eq!(
            lf("<user><id>1</id><profile><name>John</name></profile></user>"),
            "<user>\n  <id>1</id>\n  <profile>\n    <name>John</name>\n  </profile>\n</user>"
        );
    }

    #[test]
    fn declaration_stays_on_first_line() {
        assert_eq!(
            lf(r#"<?xml version="1.0"?><!DOCTYPE x><x><y/></x>"#),
            "<?xml version=\"1.0\"?>\n<!DOCTYPE x>\n<x>\n  <y/></x>"
        );
    }

    #[test]
    fn interior_whitespace_is_irrelevant() {
        let tight = lf("<a><b/></a>");
        assert_eq!(lf("<a>   <b/>   </a>"), tight);
        assert_eq!(lf("<a>\n\t\t<b/>\n\n</a>"), tight);
        assert_eq!(tight, "<a>\n  <b/></a>");
    }

    #[test]
    fn formatting_is_idempotent() {
        let inputs = [
            "<root><child>hello</child></root>",
            r#"<?xml version="1.0" encoding="utf-8"?><!DOCTYPE html><html><head><title>T</title><link href="s.css"/></head><body><p>one</p>  <p>two <b>bold</b> tail</p></body></html>"#,
            "<a>\n   <b>\n <c/> </b>\n</a>",
        ];
        for input in inputs {
            let once = lf(input);
            assert_eq!(lf(&once), once, "not idempotent for {input}");
        }
    }

    #[test]
    fn text_is_kept_verbatim() {
        assert_eq!(lf("<p> spaced text </p>"), "<p> spaced text </p>");
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape(r#"Tom & "Jerry" <'s>"#),
            "Tom &amp; &quot;Jerry&quot; &lt;&apos;s&gt;"
        );
    }

    #[test]
    fn crlf_line_endings() {
        assert_eq!(
            format("<a><b>x</b></a>", LineEnding::CrLf),
            "<a>\r\n  <b>x</b>\r\n</a>"
        );
    }

    #[test]
    fn unterminated_tag_is_copied() {
        assert_eq!(lf("<a>text<b"), "<a>text<b");
    }
}
