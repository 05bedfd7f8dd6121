//! On-disk book description read by the CLI (`book.yaml` or `book.json`).

use std::path::Path;

use anyhow::Context as _;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::content::{Content, ContentReference};
use crate::document::Document;
use crate::metadata::{Identifier, Language, Metadata};
use crate::reftype::ReferenceType;
use crate::resource::{Asset, Image, ImageFormat, Resource};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookFile {
    pub title: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<IdentifierSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Path to a CSS file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<String>,
    /// Path to a jpg, png, gif or svg image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceSpec>,
    #[serde(default)]
    pub contents: Vec<ContentSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierScheme {
    Uuid,
    Isbn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifierSpec {
    pub scheme: IdentifierScheme,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Image,
    Font,
    Audio,
    Video,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSpec {
    pub kind: ResourceKind,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSpec {
    /// Guide reference type tag, e.g. `text`, `foreword`, `toc`.
    #[serde(rename = "type", default = "default_reference_type")]
    pub reference_type: String,
    pub title: String,
    /// Path to a file holding the section's XHTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Inline XHTML, used instead of `body`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<ReferenceSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceSpec {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ReferenceSpec>,
}

fn default_language() -> String {
    Language::English.code().to_string()
}

fn default_reference_type() -> String {
    "text".to_string()
}

/// Reads a book file and resolves its paths against the file's directory.
pub fn load(path: &Path) -> anyhow::Result<Document> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read book file: {}", path.display()))?;
    let book = parse(&text, path)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    book.into_document(base)
        .with_context(|| format!("load book: {}", path.display()))
}

/// JSON for `.json` files, YAML otherwise.
pub fn parse(text: &str, path: &Path) -> anyhow::Result<BookFile> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(text).with_context(|| format!("parse book json: {}", path.display()))
    } else {
        serde_yaml::from_str(text).with_context(|| format!("parse book yaml: {}", path.display()))
    }
}

impl BookFile {
    pub fn into_document(self, base: &Path) -> anyhow::Result<Document> {
        let identifier = match self.identifier {
            None => Identifier::random(),
            Some(IdentifierSpec {
                scheme: IdentifierScheme::Uuid,
                value,
            }) => Identifier::Uuid(value),
            Some(IdentifierSpec {
                scheme: IdentifierScheme::Isbn,
                value,
            }) => Identifier::Isbn(value),
        };

        let mut metadata = Metadata::new(self.title, Language::from_code(&self.language), identifier);
        metadata.creator = self.creator;
        metadata.contributor = self.contributor;
        metadata.publisher = self.publisher;
        metadata.date = self.date;
        metadata.subject = self.subject;
        metadata.description = self.description;

        let mut document = Document::new(metadata);
        if let Some(stylesheet) = self.stylesheet {
            document = document.stylesheet(Body::file(base.join(stylesheet)));
        }
        if let Some(cover) = self.cover {
            document = document.cover(image(&base.join(cover))?);
        }
        for resource in self.resources {
            let path = base.join(&resource.path);
            document = document.resource(match resource.kind {
                ResourceKind::Image => Resource::Image(image(&path)?),
                ResourceKind::Font => Resource::Font(Asset::from_path(&path)),
                ResourceKind::Audio => Resource::Audio(Asset::from_path(&path)),
                ResourceKind::Video => Resource::Video(Asset::from_path(&path)),
            });
        }
        for content in self.contents {
            document = document.content(content.into_content(base)?);
        }
        Ok(document)
    }
}

impl ContentSpec {
    fn into_content(self, base: &Path) -> anyhow::Result<Content> {
        let reference_type = ReferenceType::from_tag(&self.reference_type, &self.title)
            .with_context(|| format!("unknown content type: {}", self.reference_type))?;
        let body = match (self.body, self.html) {
            (Some(path), None) => Body::file(base.join(path)),
            (None, Some(html)) => Body::from(html),
            (Some(_), Some(_)) => {
                anyhow::bail!("content {:?} has both body and html", self.title)
            }
            (None, None) => anyhow::bail!("content {:?} has neither body nor html", self.title),
        };

        let mut content = Content::new(body, reference_type)
            .references(self.references.into_iter().map(ReferenceSpec::into_reference));
        if let Some(filename) = self.filename {
            content = content.filename(filename);
        }
        for child in self.children {
            content = content.child(child.into_content(base)?);
        }
        Ok(content)
    }
}

impl ReferenceSpec {
    fn into_reference(self) -> ContentReference {
        let mut reference = ContentReference::new(self.title);
        if let Some(id) = self.id {
            reference = reference.id(id);
        }
        for child in self.children {
            reference = reference.child(child.into_reference());
        }
        reference
    }
}

fn image(path: &Path) -> anyhow::Result<Image> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension)
        .with_context(|| format!("unsupported image type: {}", path.display()))?;
    Ok(Image::from_path(format, path))
}
