//! Reusable image assets found in a template.

use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Image format of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG
    Png,
    /// JPEG
    Jpeg,
    /// GIF
    Gif,
    /// BMP
    Bmp,
    /// TIFF
    Tiff,
    /// Enhanced metafile
    Emf,
    /// Windows metafile
    Wmf,
    /// SVG
    Svg,
    /// WebP
    Webp,
}

impl ImageFormat {
    /// Determine the format from a file extension. Non-image media yields `None`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let format = match ext.to_lowercase().as_str() {
            "png" => ImageFormat::Png,
            "jpg" | "jpeg" | "jpe" => ImageFormat::Jpeg,
            "gif" => ImageFormat::Gif,
            "bmp" | "dib" => ImageFormat::Bmp,
            "tif" | "tiff" => ImageFormat::Tiff,
            "emf" => ImageFormat::Emf,
            "wmf" => ImageFormat::Wmf,
            "svg" => ImageFormat::Svg,
            "webp" => ImageFormat::Webp,
            _ => return None,
        };
        Some(format)
    }

    /// Determine the format from a part name.
    pub fn from_part_name(part_name: &str) -> Option<Self> {
        let (_, ext) = part_name.rsplit_once('.')?;
        Self::from_extension(ext)
    }

    /// MIME type, used as the content type of media parts.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
            ImageFormat::Emf => "image/x-emf",
            ImageFormat::Wmf => "image/x-wmf",
            ImageFormat::Svg => "image/svg+xml",
            ImageFormat::Webp => "image/webp",
        }
    }
}

/// An embeddable image extracted from the template.
///
/// Assets are deduplicated by content hash; `part_name` is the first part
/// the content was found under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Position in the image pool (insertion order)
    pub id: usize,

    /// Source part holding the bytes (e.g. `ppt/media/image3.png`)
    pub part_name: String,

    /// Image format
    pub format: ImageFormat,

    /// Hex-encoded SHA-256 of the content
    pub sha256: String,

    /// Binary content, never re-encoded
    #[serde(skip)]
    pub data: Vec<u8>,

    /// Size in bytes
    pub size: usize,

    /// Pixel width, when the header could be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Pixel height, when the header could be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Displayed extent `(cx, cy)` in EMUs where the template placed it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<(i64, i64)>,
}

impl ImageAsset {
    /// Short digest for log lines.
    pub fn short_digest(&self) -> &str {
        &self.sha256[..self.sha256.len().min(12)]
    }
}

/// Read pixel dimensions from the image header without decoding pixels.
///
/// Vector formats have no pixel size and always yield `None`.
pub fn sniff_dimensions(format: ImageFormat, data: &[u8]) -> Option<(u32, u32)> {
    if matches!(format, ImageFormat::Emf | ImageFormat::Wmf | ImageFormat::Svg) {
        return None;
    }
    let reader = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?;
    match reader.into_dimensions() {
        Ok(dimensions) => Some(dimensions),
        Err(e) => {
            log::debug!("no {:?} dimensions: {}", format, e);
            None
        }
    }
}
