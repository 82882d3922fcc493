//! # vellum
//!
//! A self-describing, versioned binary envelope for externally serialized
//! payloads.
//!
//! Every envelope is a fixed-layout header followed by the payload bytes:
//!
//! ```text
//! [version tag | header_size u64 LE | data_size u64 LE | future fields...][payload]
//! ```
//!
//! The header carries the writer's format version and its own length, so
//! readers can skip header fields added by newer writers. A reader still
//! refuses any envelope tagged with a version newer than its own.
//!
//! - [`format`] - header wire format, version tags, configuration
//! - [`io`] - envelope writer, reader, size estimator, payload codecs
//!
//! [`Envelopes`] bundles the three envelope operations for one format
//! generation and one payload codec.

pub use vellum_format as format;
pub use vellum_io as io;

pub use vellum_format::{
    ConfigError, FormatConfig, FormatError, Header, HeaderCodec, DEFAULT_MAX_VERSION_LEN,
    DEFAULT_VERSION, MAX_MARSHALLED_SIZE, MAX_VERSION_LEN_LIMIT,
};
pub use vellum_io::{
    CodecError, EnvelopeError, EnvelopeReader, EnvelopeStream, EnvelopeWriter, JsonCodec,
    PayloadCodec, RawCodec, ReadAt, SectionReader, SizeEstimator, WriteAt,
};
#[cfg(feature = "prost")]
pub use vellum_io::ProstCodec;

use std::io::{Read, Write};
use thiserror::Error;

/// Errors from building or using an [`Envelopes`] bundle.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

/// Writer, reader and size estimator sharing one configuration.
#[derive(Debug, Clone)]
pub struct Envelopes<C> {
    writer: EnvelopeWriter<C>,
    reader: EnvelopeReader<C>,
    sizes: SizeEstimator<C>,
}

impl<C: PayloadCodec + Clone> Envelopes<C> {
    /// Builds the bundle from the environment (`VELLUM_CONFIG` and overrides).
    pub fn load(codec: C) -> Result<Self, Error> {
        let config = FormatConfig::load()?;
        Self::from_config(&config, codec)
    }

    pub fn from_config(config: &FormatConfig, codec: C) -> Result<Self, Error> {
        config.validate()?;
        let header = HeaderCodec::from_config(config).map_err(EnvelopeError::from)?;
        Ok(Self {
            writer: EnvelopeWriter::new(header.clone(), codec.clone()),
            reader: EnvelopeReader::new(header.clone(), codec.clone())
                .with_max_marshalled_size(config.max_marshalled_size),
            sizes: SizeEstimator::new(header, codec),
        })
    }

    pub fn writer(&self) -> &EnvelopeWriter<C> {
        &self.writer
    }

    pub fn reader(&self) -> &EnvelopeReader<C> {
        &self.reader
    }

    pub fn sizes(&self) -> &SizeEstimator<C> {
        &self.sizes
    }

    pub fn write<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        message: &C::Message,
    ) -> Result<u64, EnvelopeError> {
        self.writer.write(writer, message)
    }

    pub fn write_at<W: WriteAt + ?Sized>(
        &self,
        writer: &mut W,
        offset: u64,
        message: &C::Message,
    ) -> Result<u64, EnvelopeError> {
        self.writer.write_at(writer, offset, message)
    }

    pub fn read<R: Read + ?Sized>(&self, reader: &mut R) -> Result<C::Message, EnvelopeError> {
        self.reader.read(reader)
    }

    pub fn read_at<R: ReadAt + ?Sized>(
        &self,
        source: &R,
        offset: u64,
    ) -> Result<(C::Message, u64), EnvelopeError> {
        self.reader.read_at(source, offset)
    }

    pub fn header_size(&self) -> u64 {
        self.sizes.header_size()
    }

    pub fn total_size(&self, message: &C::Message) -> Result<u64, EnvelopeError> {
        self.sizes.total_size(message)
    }
}

impl<C: PayloadCodec + Clone + Default> Default for Envelopes<C> {
    fn default() -> Self {
        let header = HeaderCodec::default();
        let codec = C::default();
        Self {
            writer: EnvelopeWriter::new(header.clone(), codec.clone()),
            reader: EnvelopeReader::new(header.clone(), codec.clone()),
            sizes: SizeEstimator::new(header, codec),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use tempfile::tempfile;

    #[test]
    fn test_default_bundle() {
        let envelopes = Envelopes::<RawCodec>::default();
        let payload = Bytes::from_static(&[1, 2, 3]);

        let mut sink = Vec::new();
        let written = envelopes.write(&mut sink, &payload).unwrap();
        assert_eq!(written, 35);
        assert_eq!(envelopes.header_size(), 32);
        assert_eq!(envelopes.total_size(&payload).unwrap(), written);
        assert_eq!(envelopes.read(&mut &sink[..]).unwrap(), payload);
    }

    #[test]
    fn test_from_config() {
        let config = FormatConfig::default()
            .with_version("2.0")
            .with_max_version_len(8)
            .with_max_marshalled_size(1 << 20);
        let envelopes = Envelopes::from_config(&config, JsonCodec::<Vec<u16>>::new()).unwrap();
        assert_eq!(envelopes.header_size(), 24);
        assert_eq!(envelopes.reader().max_marshalled_size(), 1 << 20);

        let mut file = tempfile().unwrap();
        let n = envelopes.write_at(&mut file, 0, &vec![7, 8, 9]).unwrap();
        let (message, consumed) = envelopes.read_at(&file, 0).unwrap();
        assert_eq!(message, vec![7, 8, 9]);
        assert_eq!(consumed, n);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = FormatConfig::default().with_max_version_len(0);
        let result = Envelopes::from_config(&config, RawCodec);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
