//! # vellum-format
//!
//! Header wire format for vellum envelopes.
//!
//! This crate provides:
//! - Fixed-width, zero-terminated version tags
//! - Header encoding and forward-extensible header decoding
//! - Exact-length reads that tell a clean end of stream from a truncation
//! - Format configuration (current version, version tag width)

pub mod config;
pub mod error;
pub mod full_read;
pub mod header;
pub mod version;

pub use config::{ConfigError, FormatConfig};
pub use error::FormatError;
pub use full_read::{read_full, FullRead};
pub use header::{Header, HeaderCodec};

/// Version written by this implementation unless configured otherwise.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Default width of the version tag field in bytes.
pub const DEFAULT_MAX_VERSION_LEN: usize = 16;

/// Largest accepted width of the version tag field in bytes.
pub const MAX_VERSION_LEN_LIMIT: usize = 4096;

/// Width of each size field (`header_size`, `data_size`) in bytes.
pub const SIZE_FIELD_LEN: usize = 8;

/// Upper bound of a positional read window (1 GiB).
pub const MAX_MARSHALLED_SIZE: u64 = 1024 * 1024 * 1024;
