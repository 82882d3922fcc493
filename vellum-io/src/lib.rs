//! # vellum-io
//!
//! Envelope reading and writing for vellum.
//!
//! This crate provides:
//! - Payload codecs (raw bytes, JSON, protobuf behind the `prost` feature)
//! - Envelope writer for sequential and positional sinks
//! - Envelope reader for sequential and positional sources, including
//!   iteration over back-to-back envelopes
//! - Envelope size estimation without serializing

pub mod codec;
pub mod error;
pub mod positional;
pub mod reader;
pub mod size;
pub mod writer;

pub use codec::{JsonCodec, PayloadCodec, RawCodec};
#[cfg(feature = "prost")]
pub use codec::ProstCodec;
pub use error::{CodecError, EnvelopeError};
pub use positional::{ReadAt, SectionReader, WriteAt};
pub use reader::{EnvelopeReader, EnvelopeStream};
pub use size::SizeEstimator;
pub use writer::EnvelopeWriter;

pub use vellum_format::{FormatConfig, FormatError, Header, HeaderCodec, MAX_MARSHALLED_SIZE};
