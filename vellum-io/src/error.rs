//! Envelope error types.

use thiserror::Error;
use vellum_format::FormatError;

/// Errors that can occur while reading or writing envelopes.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("header error: {0}")]
    Format(#[from] FormatError),

    #[error("payload codec error: {0}")]
    Codec(#[from] CodecError),

    /// Broken bookkeeping inside this crate, not bad input.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EnvelopeError {
    /// Returns whether the source had no more envelopes.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, EnvelopeError::Format(e) if e.is_end_of_stream())
    }

    /// Returns whether the source ended inside an envelope.
    pub fn is_unexpected_eof(&self) -> bool {
        match self {
            EnvelopeError::Io(e) => e.kind() == std::io::ErrorKind::UnexpectedEof,
            EnvelopeError::Format(e) => e.is_unexpected_eof(),
            _ => false,
        }
    }

    /// Returns whether the envelope was written by newer software.
    pub fn is_forward_incompatible(&self) -> bool {
        matches!(
            self,
            EnvelopeError::Format(FormatError::ForwardIncompatible { .. })
        )
    }
}

/// Errors reported by payload codecs.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "prost")]
    #[error("protobuf decode error: {0}")]
    ProstDecode(#[from] prost::DecodeError),

    #[error("{0}")]
    Custom(String),
}
