use std::io::{Cursor, Seek, Write};

use tokio::io::{AsyncWrite, AsyncWriteExt as _};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::xml::LineEnding;
use crate::{ncx, opf, preload, xhtml};

pub const MIMETYPE: &str = "application/epub+zip";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    Stored,
    #[default]
    Deflated,
}

impl Compression {
    fn method(self) -> zip::CompressionMethod {
        match self {
            Self::Stored => zip::CompressionMethod::Stored,
            Self::Deflated => zip::CompressionMethod::Deflated,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpubOptions {
    /// Line terminator used when re-indenting generated XML.
    pub line_ending: LineEnding,
    /// Compression for every entry except `mimetype`, which is always stored.
    pub compression: Compression,
}

/// Destination for archive entries, written one at a time in call order.
pub trait ArchiveSink {
    fn add_entry(&mut self, path: &str, bytes: &[u8], compression: Compression) -> Result<()>;
}

impl<W: Write + Seek> ArchiveSink for ZipWriter<W> {
    fn add_entry(&mut self, path: &str, bytes: &[u8], compression: Compression) -> Result<()> {
        let options = SimpleFileOptions::default()
            .compression_method(compression.method())
            .unix_permissions(0o644);
        self.start_file(path, options)
            .map_err(|source| Error::Sink {
                path: path.to_string(),
                source,
            })?;
        self.write_all(bytes).map_err(|source| Error::Sink {
            path: path.to_string(),
            source: source.into(),
        })?;
        Ok(())
    }
}

/// Writes a complete EPUB into `writer` and hands the writer back.
///
/// On error the writer holds a partial archive that must be discarded.
pub fn write_epub<W: Write + Seek>(
    document: &Document,
    writer: W,
    options: &EpubOptions,
) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    assemble(document, &mut zip, options)?;
    zip.finish().map_err(|source| Error::Sink {
        path: "<finish>".to_string(),
        source,
    })
}

/// Like [`write_epub`], but reads file-backed bodies concurrently first and
/// copies the finished archive into an async sink.
pub async fn write_epub_async<W: AsyncWrite + Unpin>(
    document: Document,
    writer: &mut W,
    options: EpubOptions,
) -> Result<()> {
    let document = preload::preload(document).await?;
    let bytes = tokio::task::spawn_blocking(move || {
        write_epub(&document, Cursor::new(Vec::new()), &options).map(Cursor::into_inner)
    })
    .await??;

    writer.write_all(&bytes).await.map_err(Error::Output)?;
    writer.flush().await.map_err(Error::Output)?;
    Ok(())
}

/// Emits every entry of the EPUB in container order:
/// mimetype, META-INF files, stylesheet, cover, resources, sections, OPF, NCX.
pub fn assemble<S: ArchiveSink + ?Sized>(
    document: &Document,
    sink: &mut S,
    options: &EpubOptions,
) -> Result<()> {
    let mut entries = EntryWriter {
        sink,
        compression: options.compression,
        written: 0,
    };

    // The container format requires `mimetype` first and uncompressed.
    entries.add_with("mimetype", MIMETYPE.as_bytes(), Compression::Stored)?;
    entries.add("META-INF/container.xml", CONTAINER_XML.as_bytes())?;
    entries.add(
        "META-INF/com.apple.ibooks.display-options.xml",
        DISPLAY_OPTIONS_XML.as_bytes(),
    )?;

    if let Some(stylesheet) = &document.stylesheet {
        entries.add("OEBPS/style.css", &stylesheet.read_bytes()?)?;
    }
    if let Some(cover) = &document.cover {
        let path = format!("OEBPS/{}", cover.name());
        entries.add(&path, &cover.asset.read_bytes()?)?;
    }
    for resource in &document.resources {
        let path = format!("OEBPS/{}", resource.name());
        entries.add(&path, &resource.asset().read_bytes()?)?;
    }

    let sections = xhtml::encode(
        &document.contents,
        document.stylesheet.is_some(),
        options.line_ending,
    )?;
    for section in &sections {
        entries.add(&section.path, section.xhtml.as_bytes())?;
    }

    let package = opf::encode(document, options.line_ending)?;
    entries.add(opf::PATH, package.as_bytes())?;
    let navigation = ncx::encode(document, options.line_ending);
    entries.add(ncx::PATH, navigation.as_bytes())?;

    tracing::info!(
        title = %document.metadata.title,
        entries = entries.written,
        sections = sections.len(),
        "epub assembled"
    );
    Ok(())
}

struct EntryWriter<'s, S: ?Sized> {
    sink: &'s mut S,
    compression: Compression,
    written: usize,
}

impl<S: ArchiveSink + ?Sized> EntryWriter<'_, S> {
    fn add(&mut self, path: &str, bytes: &[u8]) -> Result<()> {
        self.add_with(path, bytes, self.compression)
    }

    fn add_with(&mut self, path: &str, bytes: &[u8], compression: Compression) -> Result<()> {
        tracing::debug!(path, bytes = bytes.len(), ?compression, "epub entry");
        self.sink.add_entry(path, bytes, compression)?;
        self.written += 1;
        Ok(())
    }
}

const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

const DISPLAY_OPTIONS_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<display_options>
  <platform name="*">
    <option name="specified-fonts">true</option>
  </platform>
</display_options>
"#;

#[cfg(test)]
mod tests {
    use std::io;
    use std::pin::Pin;
    use std::task::{Context as TaskContext, Poll};

    use super::*;
    use crate::body::Body;
    use crate::content::Content;
    use crate::metadata::{Identifier, Language, Metadata};
    use crate::reftype::ReferenceType;
    use crate::resource::{Asset, Image, ImageFormat, Resource};

    #[derive(Default)]
    struct RecordingSink {
        entries: Vec<(String, Compression)>,
        fail_on: Option<&'static str>,
    }

    impl ArchiveSink for RecordingSink {
        fn add_entry(&mut self, path: &str, _bytes: &[u8], compression: Compression) -> Result<()> {
            if self.fail_on == Some(path) {
                return Err(Error::Sink {
                    path: path.to_string(),
                    source: zip::result::ZipError::FileNotFound,
                });
            }
            self.entries.push((path.to_string(), compression));
            Ok(())
        }
    }

    fn document() -> Document {
        Document::new(Metadata::new(
            "Order",
            Language::English,
            Identifier::Isbn("1".to_string()),
        ))
    }

    #[test]
    fn entries_follow_container_order() {
        let doc = document()
            .stylesheet("body {}")
            .cover(Image::new(
                ImageFormat::Png,
                Asset::from_bytes("cover.png", b"png".to_vec()),
            ))
            .resource(Resource::Audio(Asset::from_bytes("theme.mp3", b"mp3".to_vec())))
            .content(
                Content::new("<p>1</p>", ReferenceType::Text("One".to_string()))
                    .child(Content::new("<p>2</p>", ReferenceType::Text("Two".to_string()))),
            );

        let mut sink = RecordingSink::default();
        assemble(&doc, &mut sink, &EpubOptions::default()).unwrap();

        let paths: Vec<_> = sink.entries.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            paths,
            [
                "mimetype",
                "META-INF/container.xml",
                "META-INF/com.apple.ibooks.display-options.xml",
                "OEBPS/style.css",
                "OEBPS/cover.png",
                "OEBPS/theme.mp3",
                "OEBPS/c01.xhtml",
                "OEBPS/c02.xhtml",
                "OEBPS/content.opf",
                "OEBPS/toc.ncx",
            ]
        );
    }

    #[test]
    fn only_mimetype_is_forced_to_stored() {
        let doc = document().content(Content::new("x", ReferenceType::Text("T".to_string())));
        let mut sink = RecordingSink::default();
        assemble(&doc, &mut sink, &EpubOptions::default()).unwrap();

        assert_eq!(sink.entries[0], ("mimetype".to_string(), Compression::Stored));
        assert!(sink.entries[1..].iter().all(|(_, c)| *c == Compression::Deflated));
    }

    #[test]
    fn unreadable_resource_aborts_before_sections() {
        let doc = document()
            .resource(Resource::Font(Asset::from_path("/no/such/font.otf")))
            .content(Content::new("x", ReferenceType::Text("T".to_string())));
        let mut sink = RecordingSink::default();
        let err = assemble(&doc, &mut sink, &EpubOptions::default()).unwrap_err();

        assert!(matches!(err, Error::Read { .. }));
        assert!(sink.entries.iter().all(|(p, _)| !p.ends_with(".xhtml")));
    }

    #[test]
    fn sink_failure_stops_the_build() {
        let doc = document()
            .stylesheet(Body::from("body {}"))
            .content(Content::new("x", ReferenceType::Text("T".to_string())));
        let mut sink = RecordingSink {
            fail_on: Some("OEBPS/style.css"),
            ..RecordingSink::default()
        };
        let err = assemble(&doc, &mut sink, &EpubOptions::default()).unwrap_err();

        assert!(matches!(&err, Error::Sink { path, .. } if path == "OEBPS/style.css"));
        assert_eq!(sink.entries.len(), 3);
    }

    struct ClosedPipe;

    impl AsyncWrite for ClosedPipe {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut TaskContext<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn rejected_async_write_is_an_output_error() {
        let doc = document().content(Content::new("x", ReferenceType::Text("T".to_string())));
        let err = write_epub_async(doc, &mut ClosedPipe, EpubOptions::default())
            .await
            .unwrap_err();

        let Error::Output(source) = &err else {
            panic!("expected output error, got {err:?}");
        };
        assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(err.to_string(), "write epub output");
    }

    #[tokio::test]
    async fn panicked_worker_becomes_a_task_error() {
        let joined = tokio::task::spawn_blocking(|| -> Result<Vec<u8>> { panic!("worker died") }).await;
        let err = joined.map(|_| ()).map_err(Error::from).unwrap_err();
        assert!(matches!(err, Error::Task(_)));
    }

    #[test]
    fn container_points_at_package_document() {
        assert!(CONTAINER_XML.starts_with("<?xml"));
        assert!(CONTAINER_XML.contains(r#"full-path="OEBPS/content.opf""#));
    }
}
