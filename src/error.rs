//! Error types for the mitab library

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for MapInfo file operations
#[derive(Debug, Error)]
pub enum MitabError {
    /// IO error occurred during file operations (includes short reads)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Bad magic cookie, bad block type tag, corrupt structure
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// Unrecognized tool record tag or object type byte
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Cursor or record index outside of the valid bounds
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Caller passed an out-of-domain value to a table lookup
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    /// A geometry decoder was handed an object type it does not handle
    #[error("Unsupported geometry type: {0:#04x}")]
    UnsupportedGeometryType(u8),

    /// A feature failed to decode; carries the id and the source file
    #[error("Feature {id} in {}: {source}", path.display())]
    Feature {
        id: i32,
        path: PathBuf,
        #[source]
        source: Box<MitabError>,
    },
}

impl MitabError {
    /// Wrap this error with the feature id and file it was raised for.
    pub fn for_feature(self, id: i32, path: impl Into<PathBuf>) -> Self {
        MitabError::Feature {
            id,
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Build an `Io` error for a read that returned fewer bytes than asked.
    pub fn short_read(wanted: usize, got: usize, offset: u64) -> Self {
        MitabError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("read {got} of {wanted} bytes at offset {offset}"),
        ))
    }
}

/// Result type alias for mitab operations
pub type Result<T> = std::result::Result<T, MitabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MitabError::UnsupportedGeometryType(0x2d);
        assert_eq!(err.to_string(), "Unsupported geometry type: 0x2d");
    }

    #[test]
    fn test_feature_context() {
        let err = MitabError::OutOfRange("past end of block".into()).for_feature(7, "roads.map");
        let text = err.to_string();
        assert!(text.contains("Feature 7"));
        assert!(text.contains("roads.map"));
        assert!(text.contains("past end of block"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: MitabError = io_err.into();
        assert!(matches!(err, MitabError::Io(_)));
    }

    #[test]
    fn test_short_read_is_eof() {
        match MitabError::short_read(512, 100, 1024) {
            MitabError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected {other:?}"),
        }
    }
}
