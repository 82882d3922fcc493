//! Fixed-width version tag.
//!
//! A version tag occupies exactly `max_len` bytes on the wire: the ASCII
//! version string followed by zero padding. At least one zero byte is always
//! written, so a tag that fills the whole field is never produced.

use crate::error::FormatError;

/// Terminator byte of a version tag.
pub const VERSION_DELIMITER: u8 = 0;

/// Encodes `version` into a zero-padded buffer of exactly `max_len` bytes.
pub fn encode(version: &str, max_len: usize) -> Result<Vec<u8>, FormatError> {
    if version.len() >= max_len {
        return Err(FormatError::VersionOverflow {
            len: version.len(),
            max: max_len,
        });
    }

    let mut buf = vec![VERSION_DELIMITER; max_len];
    buf[..version.len()].copy_from_slice(version.as_bytes());
    Ok(buf)
}

/// Returns the length of the version in a tag, or `None` if the tag has no
/// delimiter.
pub fn terminated_len(buf: &[u8]) -> Option<usize> {
    buf.iter().position(|&b| b == VERSION_DELIMITER)
}

/// Decodes a version tag: the bytes before the first delimiter, or the whole
/// buffer when it has none.
pub fn decode(buf: &[u8]) -> String {
    let end = terminated_len(buf).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

/// Returns whether data tagged with `found` may be read by software at
/// `current`.
///
/// Versions compare as raw byte strings, so "1.10.0" sorts before "1.9.0"
/// and bytes that are not valid UTF-8 still order by value.
pub fn is_compatible(found: &[u8], current: &[u8]) -> bool {
    found <= current
}
