//! Section tree; files are numbered 1.. in pre-order across the root forest.

use crate::body::Body;
use crate::reftype::ReferenceType;

/// An in-page navigation anchor inside a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentReference {
    pub title: String,
    pub id: Option<String>,
    pub children: Vec<ContentReference>,
}

impl ContentReference {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: None,
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn child(mut self, child: ContentReference) -> Self {
        self.children.push(child);
        self
    }

    /// Nesting depth along the first child only.
    pub fn depth(&self) -> usize {
        self.children.first().map_or(0, |first| 1 + first.depth())
    }

    /// Explicit id, or `id{NN}` from the section's link counter.
    pub fn anchor(&self, link_number: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("id{link_number:02}"),
        }
    }

    pub fn href(&self, filename: &str, link_number: usize) -> String {
        format!("{filename}#{}", self.anchor(link_number))
    }
}

/// One section of the book, rendered to its own XHTML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub body: Body,
    pub reference_type: ReferenceType,
    pub references: Vec<ContentReference>,
    pub children: Vec<Content>,
    pub filename: Option<String>,
}

impl Content {
    pub fn new(body: impl Into<Body>, reference_type: ReferenceType) -> Self {
        Self {
            body: body.into(),
            reference_type,
            references: Vec::new(),
            children: Vec::new(),
            filename: None,
        }
    }

    pub fn child(mut self, child: Content) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Content>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn reference(mut self, reference: ContentReference) -> Self {
        self.references.push(reference);
        self
    }

    pub fn references(mut self, references: impl IntoIterator<Item = ContentReference>) -> Self {
        self.references.extend(references);
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Depth of the section tree along the first child only; a leaf is 0.
    ///
    /// Siblings are never compared. The navigation header depends on this
    /// exact leftmost-path rule.
    pub fn structural_depth(&self) -> usize {
        self.children
            .first()
            .map_or(0, |first| 1 + first.structural_depth())
    }

    /// The deeper of the first reference chain and the first child's combined depth.
    pub fn combined_depth(&self) -> usize {
        let references = self
            .references
            .first()
            .map_or(0, |first| 1 + first.depth());
        let children = self
            .children
            .first()
            .map_or(0, |first| 1 + first.combined_depth());
        references.max(children)
    }

    pub fn resolved_filename(&self, number: usize) -> String {
        match &self.filename {
            Some(filename) => filename.clone(),
            None => format!("c{number:02}.xhtml"),
        }
    }

    pub fn label(&self) -> &str {
        self.reference_type.label()
    }
}

/// A section paired with its position in the pre-order walk.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub number: usize,
    pub filename: String,
    pub content: &'a Content,
}

/// Pre-order file counter; starts at 0 and hands out 1 to the first section.
#[derive(Debug, Default)]
pub struct FileSequence {
    last: usize,
}

impl FileSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next<'a>(&mut self, content: &'a Content) -> Section<'a> {
        self.last += 1;
        Section {
            number: self.last,
            filename: content.resolved_filename(self.last),
            content,
        }
    }

    pub fn last(&self) -> usize {
        self.last
    }
}

/// Visits every section of `contents` in pre-order, numbering through `files`.
pub fn walk<'a, E>(
    contents: &'a [Content],
    files: &mut FileSequence,
    visit: &mut impl FnMut(Section<'a>) -> Result<(), E>,
) -> Result<(), E> {
    for content in contents {
        visit(files.next(content))?;
        walk(&content.children, files, visit)?;
    }
    Ok(())
}

/// All sections of a forest in pre-order, numbered from a fresh sequence.
pub fn sections(contents: &[Content]) -> Vec<Section<'_>> {
    let mut out = Vec::new();
    let _ = walk(contents, &mut FileSequence::new(), &mut |section| {
        out.push(section);
        Ok::<(), std::convert::Infallible>(())
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(label: &str) -> Content {
        Content::new("<p>x</p>", ReferenceType::Text(label.to_string()))
    }

    #[test]
    fn leaf_depths_are_zero() {
        let leaf = text("Leaf");
        assert_eq!(leaf.structural_depth(), 0);
        assert_eq!(leaf.combined_depth(), 0);
        assert_eq!(ContentReference::new("r").depth(), 0);
    }

    #[test]
    fn structural_depth_follows_first_child_only() {
        let deep_second = text("root")
            .child(text("first"))
            .child(text("second").child(text("grandchild").child(text("great"))));
        assert_eq!(deep_second.structural_depth(), 1);

        let deep_first = text("root").child(text("a").child(text("b")));
        assert_eq!(deep_first.structural_depth(), 2);
    }

    #[test]
    fn reference_depth_follows_first_child_only() {
        let reference = ContentReference::new("a")
            .child(ContentReference::new("b"))
            .child(ContentReference::new("c").child(ContentReference::new("d")));
        assert_eq!(reference.depth(), 1);
    }

    #[test]
    fn combined_depth_takes_deeper_hierarchy() {
        let only_references =
            text("T").reference(ContentReference::new("r").child(ContentReference::new("s")));
        assert_eq!(only_references.combined_depth(), 2);

        let only_children = text("P").child(text("C").reference(ContentReference::new("r")));
        assert_eq!(only_children.combined_depth(), 2);

        let mixed = text("P")
            .reference(ContentReference::new("p"))
            .child(text("C").reference(
                ContentReference::new("d")
                    .child(ContentReference::new("x"))
                    .child(ContentReference::new("y")),
            ));
        assert_eq!(mixed.combined_depth(), 3);
    }

    #[test]
    fn combined_depth_never_below_structural_depth() {
        let trees = [
            text("a"),
            text("a").child(text("b").child(text("c"))),
            text("a").reference(ContentReference::new("r")).child(text("b")),
            text("a").reference(
                ContentReference::new("r").child(ContentReference::new("s").child(ContentReference::new("t"))),
            ),
        ];
        for tree in &trees {
            assert!(tree.combined_depth() >= tree.structural_depth());
        }
    }

    #[test]
    fn resolved_filename_prefers_explicit_name() {
        let named = text("Intro").filename("intro.xhtml");
        assert_eq!(named.resolved_filename(1), "intro.xhtml");
        assert_eq!(named.resolved_filename(42), "intro.xhtml");

        let unnamed = text("Chapter");
        assert_eq!(unnamed.resolved_filename(5), "c05.xhtml");
        assert_eq!(unnamed.resolved_filename(123), "c123.xhtml");
    }

    #[test]
    fn anchors_fall_back_to_link_number() {
        let explicit = ContentReference::new("a").id("my-anchor");
        assert_eq!(explicit.href("chapter01.xhtml", 1), "chapter01.xhtml#my-anchor");

        let implicit = ContentReference::new("b");
        assert_eq!(implicit.href("chapter01.xhtml", 5), "chapter01.xhtml#id05");
    }

    #[test]
    fn numbering_is_continuous_across_the_forest() {
        let forest = vec![
            text("1").child(text("2")).child(text("3").child(text("4"))),
            text("5").filename("five.xhtml"),
            text("6"),
        ];
        let names: Vec<_> = sections(&forest).into_iter().map(|s| s.filename).collect();
        assert_eq!(
            names,
            ["c01.xhtml", "c02.xhtml", "c03.xhtml", "c04.xhtml", "five.xhtml", "c06.xhtml"]
        );
    }

    #[test]
    fn walk_stops_at_first_error() {
        let forest = vec![text("1"), text("2"), text("3")];
        let mut seen = Vec::new();
        let result = walk(&forest, &mut FileSequence::new(), &mut |section| {
            seen.push(section.number);
            if section.number == 2 { Err("stop") } else { Ok(()) }
        });
        assert_eq!(result, Err("stop"));
        assert_eq!(seen, [1, 2]);
    }
}
