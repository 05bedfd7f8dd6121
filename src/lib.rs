//! Builds EPUB 2 containers (OPF 2.0 package plus NCX navigation) from an
//! in-memory description of a book.
//!
//! A [`Document`] holds the metadata, an optional stylesheet and cover, extra
//! resources and a forest of [`Content`] sections. [`write_epub`] renders it
//! into any seekable writer; [`write_epub_async`] reads file-backed bodies
//! concurrently and writes to an async sink.

#![forbid(unsafe_code)]

pub mod body;
pub mod build;
pub mod cli;
pub mod content;
pub mod document;
pub mod epub;
pub mod error;
pub mod formats;
pub mod logging;
pub mod metadata;
pub mod ncx;
pub mod opf;
pub mod preload;
pub mod reftype;
pub mod resource;
pub mod xhtml;
pub mod xml;

pub use body::Body;
pub use content::{Content, ContentReference};
pub use document::Document;
pub use epub::{ArchiveSink, Compression, EpubOptions, write_epub, write_epub_async};
pub use error::{Error, Result};
pub use metadata::{Identifier, Language, Metadata};
pub use reftype::ReferenceType;
pub use resource::{Asset, Image, ImageFormat, Resource};
pub use xml::LineEnding;
