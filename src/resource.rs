use std::path::Path;

use crate::body::Body;
use crate::error::Result;

/// A named byte source embedded under `OEBPS/{name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    name: String,
    body: Body,
}

impl Asset {
    /// File-backed asset named after the path's base filename.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            name,
            body: Body::file(path),
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            body: Body::Bytes(bytes.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        self.body.read_bytes()
    }

    pub(crate) fn with_body(&self, body: Body) -> Self {
        Self {
            name: self.name.clone(),
            body,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpg,
    Png,
    Gif,
    Svg,
}

impl ImageFormat {
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Jpg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Svg => "image/svg+xml",
        }
    }

    /// Guesses the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }
}

/// A visual resource; the only kind accepted as a cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub format: ImageFormat,
    pub asset: Asset,
}

impl Image {
    pub fn new(format: ImageFormat, asset: Asset) -> Self {
        Self { format, asset }
    }

    pub fn from_path(format: ImageFormat, path: impl AsRef<Path>) -> Self {
        Self::new(format, Asset::from_path(path))
    }

    pub fn media_type(&self) -> &'static str {
        self.format.media_type()
    }

    pub fn name(&self) -> &str {
        self.asset.name()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Image(Image),
    Font(Asset),
    Audio(Asset),
    Video(Asset),
}

impl Resource {
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Image(image) => image.media_type(),
            Self::Font(asset) if asset.name().ends_with("ttf") => "application/x-font-ttf",
            Self::Font(_) => "application/vnd.ms-opentype",
            Self::Audio(_) => "audio/mpeg",
            Self::Video(_) => "video/mp4",
        }
    }

    pub fn asset(&self) -> &Asset {
        match self {
            Self::Image(image) => &image.asset,
            Self::Font(asset) | Self::Audio(asset) | Self::Video(asset) => asset,
        }
    }

    pub fn name(&self) -> &str {
        self.asset().name()
    }

    pub(crate) fn with_body(&self, body: Body) -> Self {
        match self {
            Self::Image(image) => Self::Image(Image::new(image.format, image.asset.with_body(body))),
            Self::Font(asset) => Self::Font(asset.with_body(body)),
            Self::Audio(asset) => Self::Audio(asset.with_body(body)),
            Self::Video(asset) => Self::Video(asset.with_body(body)),
        }
    }
}

impl From<Image> for Resource {
    fn from(image: Image) -> Self {
        Self::Image(image)
    }
}
