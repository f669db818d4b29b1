//! Package kind detection for PresentationML packages.

use crate::container::decode_xml_bytes;
use crate::error::{Error, Result};

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Content type of the main part of a regular presentation (.pptx).
pub const PRESENTATION_MAIN_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";

/// Content type of the main part of a template (.potx).
pub const TEMPLATE_MAIN_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.template.main+xml";

/// Content type of the main part of a slideshow (.ppsx).
pub const SLIDESHOW_MAIN_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideshow.main+xml";

/// Content type of the main part of a macro-enabled presentation (.pptm).
pub const MACRO_MAIN_CONTENT_TYPE: &str =
    "application/vnd.ms-powerpoint.presentation.macroEnabled.main+xml";

/// Content type of the main part of a macro-enabled template (.potm).
pub const MACRO_TEMPLATE_MAIN_CONTENT_TYPE: &str =
    "application/vnd.ms-powerpoint.template.macroEnabled.main+xml";

/// Kind of presentation package a template was uploaded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// Regular presentation (.pptx)
    Presentation,
    /// Presentation template (.potx / .potm)
    Template,
    /// Slideshow (.ppsx)
    Slideshow,
    /// Macro-enabled presentation (.pptm)
    MacroEnabled,
}

impl PackageKind {
    /// Classify a main-part content type.
    pub fn from_main_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            PRESENTATION_MAIN_CONTENT_TYPE => Some(PackageKind::Presentation),
            TEMPLATE_MAIN_CONTENT_TYPE | MACRO_TEMPLATE_MAIN_CONTENT_TYPE => {
                Some(PackageKind::Template)
            }
            SLIDESHOW_MAIN_CONTENT_TYPE => Some(PackageKind::Slideshow),
            MACRO_MAIN_CONTENT_TYPE => Some(PackageKind::MacroEnabled),
            _ => None,
        }
    }

    /// Returns the usual file extension for this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            PackageKind::Presentation => "pptx",
            PackageKind::Template => "potx",
            PackageKind::Slideshow => "ppsx",
            PackageKind::MacroEnabled => "pptm",
        }
    }

    /// Returns a human-readable name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            PackageKind::Presentation => "PowerPoint Presentation",
            PackageKind::Template => "PowerPoint Template",
            PackageKind::Slideshow => "PowerPoint Slideshow",
            PackageKind::MacroEnabled => "PowerPoint Macro-Enabled Presentation",
        }
    }
}

impl std::fmt::Display for PackageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Cheap pre-check that the bytes start like a ZIP archive.
pub fn looks_like_zip(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

/// Detect the package kind from the raw `[Content_Types].xml` bytes.
///
/// # Example
///
/// ```
/// use redeck::detect::{detect_kind_from_content_types, PackageKind};
///
/// let xml = br#"<Types><Override PartName="/ppt/presentation.xml"
///     ContentType="application/vnd.openxmlformats-officedocument.presentationml.template.main+xml"/></Types>"#;
/// assert_eq!(detect_kind_from_content_types(xml)?, PackageKind::Template);
/// # Ok::<(), redeck::Error>(())
/// ```
pub fn detect_kind_from_content_types(content_types: &[u8]) -> Result<PackageKind> {
    let content_types = decode_xml_bytes(content_types)?;

    // Macro-enabled templates must be checked before the generic macro type
    [
        MACRO_TEMPLATE_MAIN_CONTENT_TYPE,
        TEMPLATE_MAIN_CONTENT_TYPE,
        MACRO_MAIN_CONTENT_TYPE,
        SLIDESHOW_MAIN_CONTENT_TYPE,
        PRESENTATION_MAIN_CONTENT_TYPE,
    ]
    .into_iter()
    .find(|ct| content_types.contains(ct))
    .and_then(PackageKind::from_main_content_type)
    .ok_or_else(|| Error::TemplateInvalid("not a PowerPoint presentation package".to_string()))
}
