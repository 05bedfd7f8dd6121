use crate::body::Body;
use crate::content::Content;
use crate::metadata::Metadata;
use crate::resource::{Image, Resource};

/// Everything that goes into one EPUB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub metadata: Metadata,
    pub stylesheet: Option<Body>,
    pub cover: Option<Image>,
    pub resources: Vec<Resource>,
    pub contents: Vec<Content>,
}

impl Document {
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            stylesheet: None,
            cover: None,
            resources: Vec::new(),
            contents: Vec::new(),
        }
    }

    pub fn stylesheet(mut self, stylesheet: impl Into<Body>) -> Self {
        self.stylesheet = Some(stylesheet.into());
        self
    }

    pub fn cover(mut self, cover: Image) -> Self {
        self.cover = Some(cover);
        self
    }

    pub fn resource(mut self, resource: impl Into<Resource>) -> Self {
        self.resources.push(resource.into());
        self
    }

    pub fn content(mut self, content: Content) -> Self {
        self.contents.push(content);
        self
    }

    pub fn contents(mut self, contents: impl IntoIterator<Item = Content>) -> Self {
        self.contents.extend(contents);
        self
    }

    /// Value of the NCX `dtb:depth` header.
    ///
    /// 0 for an empty book, otherwise at least 1: the larger of the deepest
    /// section chain and the deepest section-or-reference chain among the roots.
    pub fn depth(&self) -> usize {
        if self.contents.is_empty() {
            return 0;
        }

        let structural = self
            .contents
            .iter()
            .map(|content| 1 + content.structural_depth())
            .max()
            .unwrap_or(1);
        let combined = self
            .contents
            .iter()
            .map(|content| 1 + content.combined_depth())
            .max()
            .unwrap_or(1);
        structural.max(combined)
    }
}
