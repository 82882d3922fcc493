//! Envelope header encoding and decoding.
//!
//! Header layout (all integers little-endian):
//!
//! ```text
//! +---------------------+-------------+-----------+--------------------+
//! | version             | header_size | data_size | [future fields]    |
//! | max_version_len B   | 8 bytes     | 8 bytes   | header_size - known|
//! +---------------------+-------------+-----------+--------------------+
//! | payload                                                            |
//! | data_size bytes                                                    |
//! +--------------------------------------------------------------------+
//! ```
//!
//! The layout is append-only. Fields never change type, size or position;
//! newer writers may only add fields after `data_size`. `header_size` always
//! covers every field the writer emitted, which lets an older reader skip
//! fields it does not know.
//!
//! Decoding applies two independent guards:
//! 1. the size skip above, which tolerates appended fields, and
//! 2. a version gate that rejects any header tagged with a version newer
//!    than the reader's own.
//!
//! The gate runs as soon as `header_size` has been read and before either
//! size field is validated, so a newer header is always reported as
//! forward-incompatible whatever its sizes claim.
//!
//! The gate currently rejects exactly the headers the skip was built for.
//! The skip only pays off once the gate is relaxed for compatible newer
//! versions; until then both stay as they are.

use crate::config::FormatConfig;
use crate::error::FormatError;
use crate::full_read::{read_full, skip_len, FullRead};
use crate::version;
use crate::{DEFAULT_MAX_VERSION_LEN, DEFAULT_VERSION, MAX_VERSION_LEN_LIMIT, SIZE_FIELD_LEN};
use bytes::{BufMut, BytesMut};
use std::io::Read;

/// A decoded or freshly built envelope header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Format version of the writer.
    pub version: String,
    /// Total header length in bytes, including fields unknown to this reader.
    pub header_size: u64,
    /// Length of the payload following the header.
    pub data_size: u64,
}

impl Header {
    /// Returns the total length of the envelope (header plus payload).
    pub fn envelope_len(&self) -> u64 {
        self.header_size.saturating_add(self.data_size)
    }
}

/// Encodes and decodes headers for one format generation.
///
/// The current version and the version tag width are injected, so codecs for
/// different generations can coexist in one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCodec {
    version: String,
    max_version_len: usize,
}

impl HeaderCodec {
    /// Creates a codec writing `version` in a tag of `max_version_len` bytes.
    ///
    /// `max_version_len` may not exceed [`MAX_VERSION_LEN_LIMIT`].
    pub fn new(version: impl Into<String>, max_version_len: usize) -> Result<Self, FormatError> {
        let version = version.into();
        if max_version_len > MAX_VERSION_LEN_LIMIT {
            return Err(FormatError::VersionWidthOutOfRange {
                width: max_version_len,
                max: MAX_VERSION_LEN_LIMIT,
            });
        }
        if version.len() >= max_version_len {
            return Err(FormatError::VersionOverflow {
                len: version.len(),
                max: max_version_len,
            });
        }
        Ok(Self {
            version,
            max_version_len,
        })
    }

    /// Creates a codec from a format configuration.
    pub fn from_config(config: &FormatConfig) -> Result<Self, FormatError> {
        Self::new(config.version.clone(), config.max_version_len)
    }

    /// Returns the version this codec writes and accepts up to.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the width of the version tag in bytes.
    pub fn max_version_len(&self) -> usize {
        self.max_version_len
    }

    /// Returns the width of every header field this codec knows.
    pub fn header_size(&self) -> u64 {
        // max_version_len is bounded by MAX_VERSION_LEN_LIMIT at construction.
        self.max_version_len as u64 + 2 * SIZE_FIELD_LEN as u64
    }

    /// Returns the bytes of `header` this codec does not understand.
    pub fn trailing_len(&self, header: &Header) -> u64 {
        header.header_size.saturating_sub(self.header_size())
    }

    /// Builds the header for a payload of `data_size` bytes.
    pub fn new_header(&self, data_size: u64) -> Header {
        Header {
            version: self.version.clone(),
            header_size: self.header_size(),
            data_size,
        }
    }

    /// Encodes `header` using the fields this codec knows.
    ///
    /// `header_size` is written as given. Only the version length is checked
    /// here; the version gate applies when decoding.
    pub fn encode(&self, header: &Header) -> Result<BytesMut, FormatError> {
        let tag = version::encode(&header.version, self.max_version_len)?;

        let mut buf = BytesMut::with_capacity(self.header_size() as usize);

        // Version tag (max_version_len bytes)
        buf.put_slice(&tag);

        // Header size (8 bytes)
        buf.put_u64_le(header.header_size);

        // Data size (8 bytes)
        buf.put_u64_le(header.data_size);

        Ok(buf)
    }

    /// Decodes a header from `reader`, leaving it positioned at the payload.
    ///
    /// Returns [`FormatError::EndOfStream`] if the reader is exhausted before
    /// the first byte, and an `UnexpectedEof` I/O error if it ends anywhere
    /// inside the header. On any other error the reader is left mid-header.
    pub fn decode<R: Read + ?Sized>(&self, reader: &mut R) -> Result<Header, FormatError> {
        let mut tag = vec![0u8; self.max_version_len];
        if read_full(reader, &mut tag)? == FullRead::Empty {
            return Err(FormatError::EndOfStream);
        }

        let header_size = read_u64_le(reader)?;

        let version_len =
            version::terminated_len(&tag).ok_or(FormatError::VersionOverflow {
                len: self.max_version_len,
                max: self.max_version_len,
            })?;
        if !version::is_compatible(&tag[..version_len], self.version.as_bytes()) {
            return Err(FormatError::ForwardIncompatible {
                found: version::decode(&tag),
                current: self.version.clone(),
            });
        }

        let min = self.header_size();
        if header_size < min {
            return Err(FormatError::HeaderTooSmall { header_size, min });
        }

        let data_size = read_u64_le(reader)?;

        // Fields appended by newer writers are consumed but not interpreted.
        let trailing = header_size - min;
        if trailing > 0 {
            skip_len(reader, trailing)?;
        }

        Ok(Header {
            version: version::decode(&tag),
            header_size,
            data_size,
        })
    }
}

impl Default for HeaderCodec {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            max_version_len: DEFAULT_MAX_VERSION_LEN,
        }
    }
}

fn read_u64_le<R: Read + ?Sized>(reader: &mut R) -> Result<u64, FormatError> {
    let mut buf = [0u8; SIZE_FIELD_LEN];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}
