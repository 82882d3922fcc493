//! Header format errors.

use thiserror::Error;

/// Errors that can occur while encoding or decoding an envelope header.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("end of stream")]
    EndOfStream,

    #[error("version tag overflow: {len} bytes (max {max} including terminator)")]
    VersionOverflow { len: usize, max: usize },

    #[error("version tag width {width} is out of range (max {max})")]
    VersionWidthOutOfRange { width: usize, max: usize },

    #[error("header version {found:?} is newer than supported version {current:?}")]
    ForwardIncompatible { found: String, current: String },

    #[error("header size {header_size} is below the minimum of {min} bytes")]
    HeaderTooSmall { header_size: u64, min: u64 },
}

impl FormatError {
    /// Returns whether the stream ended cleanly before a header started.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, FormatError::EndOfStream)
    }

    /// Returns whether the stream ended in the middle of a header.
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self, FormatError::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_format_error_display() {
        let err = FormatError::VersionOverflow { len: 20, max: 16 };
        let msg = err.to_string();
        assert!(msg.contains("20"));
        assert!(msg.contains("16"));

        let err = FormatError::ForwardIncompatible {
            found: "2.0.0".to_string(),
            current: "1.0.0".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2.0.0"));
        assert!(msg.contains("1.0.0"));

        let err = FormatError::HeaderTooSmall {
            header_size: 4,
            min: 32,
        };
        assert!(err.to_string().contains("32"));

        let err = FormatError::VersionWidthOutOfRange {
            width: 5000,
            max: 4096,
        };
        let msg = err.to_string();
        assert!(msg.contains("5000"));
        assert!(msg.contains("4096"));

        assert_eq!(FormatError::EndOfStream.to_string(), "end of stream");
    }

    #[test]
    fn test_eof_classification() {
        assert!(FormatError::EndOfStream.is_end_of_stream());
        assert!(!FormatError::EndOfStream.is_unexpected_eof());

        let err = FormatError::from(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert!(err.is_unexpected_eof());
        assert!(!err.is_end_of_stream());

        let err = FormatError::from(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(!err.is_unexpected_eof());
    }
}
