use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::cli::{BuildArgs, InitArgs};
use crate::epub::write_epub_async;
use crate::formats::{BookFile, ContentSpec};

pub async fn run(args: BuildArgs) -> anyhow::Result<()> {
    let book_path = PathBuf::from(&args.book);
    let out_path = PathBuf::from(&args.out);
    if out_path.exists() && !args.force {
        anyhow::bail!("epub output already exists: {}", out_path.display());
    }

    let document = crate::formats::load(&book_path)?;
    tracing::info!(
        book = %book_path.display(),
        title = %document.metadata.title,
        sections = crate::content::sections(&document.contents).len(),
        "build: loaded book"
    );

    let out_dir = match out_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("create output dir: {}", out_dir.display()))?;

    // Only a complete archive replaces the destination.
    let staged = tempfile::NamedTempFile::new_in(&out_dir)
        .with_context(|| format!("create temp file in: {}", out_dir.display()))?;
    let handle = staged.as_file().try_clone().context("clone temp file handle")?;
    let mut file = tokio::fs::File::from_std(handle);
    write_epub_async(document, &mut file, args.epub_options())
        .await
        .with_context(|| format!("write epub: {}", out_path.display()))?;
    file.sync_all().await.context("sync epub")?;
    drop(file);

    staged
        .persist(&out_path)
        .with_context(|| format!("persist epub: {}", out_path.display()))?;

    tracing::info!(out = %out_path.display(), "build: wrote epub");
    Ok(())
}

pub fn init(args: InitArgs) -> anyhow::Result<()> {
    let out_dir = PathBuf::from(&args.out);
    std::fs::create_dir_all(out_dir.join("chapters"))
        .with_context(|| format!("create book dirs: {}", out_dir.display()))?;

    let book = BookFile {
        title: args.title.clone(),
        language: "en".to_string(),
        identifier: None,
        creator: None,
        contributor: None,
        publisher: None,
        date: None,
        subject: None,
        description: None,
        stylesheet: Some("style.css".to_string()),
        cover: None,
        resources: Vec::new(),
        contents: vec![ContentSpec {
            reference_type: "text".to_string(),
            title: "Chapter 1".to_string(),
            body: Some("chapters/ch01.xhtml".to_string()),
            html: None,
            filename: None,
            references: Vec::new(),
            children: Vec::new(),
        }],
    };
    let yaml = serde_yaml::to_string(&book).context("serialize book yaml")?;
    create_new(&out_dir.join("book.yaml"), &yaml)?;

    create_new(
        &out_dir.join("style.css"),
        "body { font-family: serif; }\nh1 { text-align: center; }\n",
    )?;
    create_new(
        &out_dir.join("chapters").join("ch01.xhtml"),
        "<h1>Chapter 1</h1>\n<p>Write here.</p>\n",
    )?;

    tracing::info!(out = %out_dir.display(), title = %args.title, "init: wrote book skeleton");
    Ok(())
}

fn create_new(path: &Path, text: &str) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(path)
        .with_context(|| format!("create {}", path.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
