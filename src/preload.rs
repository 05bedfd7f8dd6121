//! Concurrent loading of file-backed bodies ahead of assembly.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use tokio::task::JoinSet;

use crate::body::Body;
use crate::content::Content;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::resource::Image;

type Loaded = HashMap<PathBuf, Vec<u8>>;

/// Reads every distinct file referenced by `document` concurrently and returns
/// the same document with those bodies replaced by their bytes.
///
/// The first failed read cancels the remaining ones.
pub async fn preload(document: Document) -> Result<Document> {
    let mut paths = BTreeSet::new();
    collect_paths(&document, &mut paths);
    if paths.is_empty() {
        return Ok(document);
    }
    tracing::debug!(files = paths.len(), "preloading bodies");

    let mut reads = JoinSet::new();
    for path in paths {
        reads.spawn(async move {
            let bytes = tokio::fs::read(&path).await;
            (path, bytes)
        });
    }

    let mut loaded = Loaded::new();
    while let Some(joined) = reads.join_next().await {
        let (path, bytes) = joined?;
        let bytes = bytes.map_err(|source| Error::Read {
            source_name: path.display().to_string(),
            source,
        })?;
        loaded.insert(path, bytes);
    }

    Ok(replace_bodies(document, &loaded))
}

fn collect_paths(document: &Document, paths: &mut BTreeSet<PathBuf>) {
    let mut add = |body: &Body| {
        if let Some(path) = body.path() {
            paths.insert(path.to_path_buf());
        }
    };

    if let Some(stylesheet) = &document.stylesheet {
        add(stylesheet);
    }
    if let Some(cover) = &document.cover {
        add(cover.asset.body());
    }
    for resource in &document.resources {
        add(resource.asset().body());
    }

    let mut pending: Vec<&Content> = document.contents.iter().collect();
    while let Some(content) = pending.pop() {
        add(&content.body);
        pending.extend(&content.children);
    }
}

fn replace_bodies(document: Document, loaded: &Loaded) -> Document {
    let Document {
        metadata,
        stylesheet,
        cover,
        resources,
        contents,
    } = document;

    Document {
        metadata,
        stylesheet: stylesheet.map(|body| in_memory(body, loaded)),
        cover: cover.map(|image| {
            let body = in_memory(image.asset.body().clone(), loaded);
            Image::new(image.format, image.asset.with_body(body))
        }),
        resources: resources
            .into_iter()
            .map(|resource| resource.with_body(in_memory(resource.asset().body().clone(), loaded)))
            .collect(),
        contents: contents
            .into_iter()
            .map(|content| load_content(content, loaded))
            .collect(),
    }
}

fn load_content(mut content: Content, loaded: &Loaded) -> Content {
    content.body = in_memory(content.body, loaded);
    content.children = content
        .children
        .into_iter()
        .map(|child| load_content(child, loaded))
        .collect();
    content
}

fn in_memory(body: Body, loaded: &Loaded) -> Body {
    match body.path().and_then(|path: &Path| loaded.get(path)) {
        Some(bytes) => Body::Bytes(bytes.clone()),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{Identifier, Language, Metadata};
    use crate::reftype::ReferenceType;
    use crate::resource::{Asset, ImageFormat, Resource};

    fn document() -> Document {
        Document::new(Metadata::new(
            "Preload",
            Language::English,
            Identifier::Isbn("1".to_string()),
        ))
    }

    #[tokio::test]
    async fn file_bodies_become_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let chapter = dir.path().join("chapter.xhtml");
        let css = dir.path().join("style.css");
        let font = dir.path().join("serif.otf");
        std::fs::write(&chapter, "<p>Loaded</p>").unwrap();
        std::fs::write(&css, "p {}").unwrap();
        std::fs::write(&font, b"otf").unwrap();

        let doc = document()
            .stylesheet(Body::file(&css))
            .resource(Resource::Font(Asset::from_path(&font)))
            .content(
                Content::new("inline", ReferenceType::Text("One".to_string()))
                    .child(Content::new(Body::file(&chapter), ReferenceType::Text("Two".to_string()))),
            );

        let loaded = preload(doc).await.unwrap();
        assert_eq!(loaded.stylesheet, Some(Body::from("p {}")));
        assert_eq!(loaded.resources[0].name(), "serif.otf");
        assert_eq!(loaded.resources[0].asset().body(), &Body::from(b"otf".to_vec()));
        assert_eq!(loaded.contents[0].body, Body::from("inline"));
        assert_eq!(loaded.contents[0].children[0].body, Body::from("<p>Loaded</p>"));
    }

    #[tokio::test]
    async fn cover_keeps_its_name_and_format() {
        let dir = tempfile::tempdir().unwrap();
        let cover = dir.path().join("front.png");
        std::fs::write(&cover, b"png").unwrap();

        let loaded = preload(document().cover(Image::from_path(ImageFormat::Png, &cover)))
            .await
            .unwrap();
        let image = loaded.cover.unwrap();
        assert_eq!(image.name(), "front.png");
        assert_eq!(image.format, ImageFormat::Png);
        assert_eq!(image.asset.body(), &Body::from(b"png".to_vec()));
    }

    #[tokio::test]
    async fn missing_file_fails_with_its_path() {
        let doc = document().content(Content::new(
            Body::file("/definitely/missing.xhtml"),
            ReferenceType::Text("Gone".to_string()),
        ));
        let err = preload(doc).await.unwrap_err();
        assert!(matches!(&err, Error::Read { source_name, .. } if source_name == "/definitely/missing.xhtml"));
    }
}
