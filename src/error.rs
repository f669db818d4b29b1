//! Error types for the redeck library.

use std::io;
use thiserror::Error;

/// Result type alias for redeck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error category reported to callers of the generation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The template could not be opened or lacks required parts.
    TemplateInvalid,
    /// The template exceeds the configured size cap.
    TemplateTooLarge,
    /// A deck with zero slides was rejected at a boundary.
    DeckEmpty,
    /// The deck description itself was malformed.
    InvalidDeck,
    /// Writing the output package failed.
    PackagingFailure,
}

/// Errors that can occur during template inspection and deck generation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The template is not a usable presentation package.
    #[error("Invalid template: {0}. Please upload a valid .pptx or .potx file")]
    TemplateInvalid(String),

    /// The template exceeds the size cap and was rejected before parsing.
    #[error("Template too large: {size} bytes (limit {limit} bytes)")]
    TemplateTooLarge {
        /// Size of the rejected template in bytes
        size: usize,
        /// Configured limit in bytes
        limit: usize,
    },

    /// The deck has no slides and the caller requires at least one.
    #[error("Deck contains no slides")]
    DeckEmpty,

    /// The deck description could not be read.
    #[error("Invalid deck description: {0}")]
    InvalidDeck(String),

    /// Serializing the output package failed.
    #[error("Failed to build presentation: {0}")]
    PackagingFailure(String),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required package part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),
}

impl Error {
    /// Map any low-level failure raised while reading the template onto
    /// [`Error::TemplateInvalid`], leaving already-classified errors alone.
    pub(crate) fn into_template_invalid(self) -> Self {
        match self {
            Error::TemplateInvalid(_) | Error::TemplateTooLarge { .. } => self,
            other => Error::TemplateInvalid(other.to_string()),
        }
    }

    /// Map any low-level failure raised while writing onto
    /// [`Error::PackagingFailure`].
    pub(crate) fn into_packaging_failure(self) -> Self {
        match self {
            Error::PackagingFailure(_) => self,
            other => Error::PackagingFailure(other.to_string()),
        }
    }

    /// The taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::TemplateInvalid(_)
            | Error::ZipArchive(_)
            | Error::XmlParse(_)
            | Error::MissingComponent(_) => ErrorKind::TemplateInvalid,
            Error::TemplateTooLarge { .. } => ErrorKind::TemplateTooLarge,
            Error::DeckEmpty => ErrorKind::DeckEmpty,
            Error::InvalidDeck(_) => ErrorKind::InvalidDeck,
            Error::PackagingFailure(_) | Error::Io(_) => ErrorKind::PackagingFailure,
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(err: quick_xml::DeError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidDeck(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::TemplateTooLarge {
            size: 30,
            limit: 20,
        };
        assert_eq!(err.to_string(), "Template too large: 30 bytes (limit 20 bytes)");

        let err = Error::DeckEmpty;
        assert_eq!(err.to_string(), "Deck contains no slides");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_reclassification() {
        let err = Error::XmlParse("bad tag".to_string()).into_template_invalid();
        assert!(matches!(err, Error::TemplateInvalid(_)));
        assert_eq!(err.kind(), ErrorKind::TemplateInvalid);

        let err = Error::TemplateTooLarge { size: 2, limit: 1 }.into_template_invalid();
        assert_eq!(err.kind(), ErrorKind::TemplateTooLarge);

        let err = Error::ZipArchive("disk full".to_string()).into_packaging_failure();
        assert_eq!(err.kind(), ErrorKind::PackagingFailure);
    }
}
