//! Error types for sheetpdf.

use std::io;
use thiserror::Error;

/// Result type alias for sheetpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a spreadsheet.
///
/// The variants fall into two families: input-format errors (the bytes are not
/// the expected container) and argument errors (the caller broke a
/// precondition). Use [`Error::is_format_error`] and
/// [`Error::is_argument_error`] to tell them apart.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a spreadsheet package or a part is unusable.
    #[error("Invalid spreadsheet format: {0}")]
    Format(String),

    /// The ZIP container could not be read.
    #[error("ZIP container error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A required XML part is not well-formed.
    #[error("XML error in {part}: {message}")]
    Xml {
        /// Archive path of the offending part
        part: String,
        /// Parser message
        message: String,
    },

    /// A caller-supplied argument violates a precondition.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error while rendering an output representation (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Build an XML error for the given archive part.
    pub(crate) fn xml(part: &str, err: impl std::fmt::Display) -> Self {
        Error::Xml {
            part: part.to_string(),
            message: err.to_string(),
        }
    }

    /// Whether this error means the input bytes were not a usable spreadsheet.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::Format(_) | Error::Zip(_) | Error::Xml { .. })
    }

    /// Whether this error means the caller passed an invalid argument.
    pub fn is_argument_error(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidArgument("page width must be positive".into());
        assert_eq!(
            err.to_string(),
            "Invalid argument: page width must be positive"
        );

        let err = Error::xml("xl/workbook.xml", "unexpected end");
        assert_eq!(err.to_string(), "XML error in xl/workbook.xml: unexpected end");
    }

    #[test]
    fn test_error_families() {
        assert!(Error::Format("bad".into()).is_format_error());
        assert!(Error::xml("a.xml", "x").is_format_error());
        assert!(!Error::Format("bad".into()).is_argument_error());
        assert!(Error::InvalidArgument("x".into()).is_argument_error());
        assert!(!Error::InvalidArgument("x".into()).is_format_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_format_error());
    }
}
