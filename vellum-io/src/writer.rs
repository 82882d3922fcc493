//! Envelope writer.
//!
//! An envelope is written as its header followed by the encoded payload. The
//! payload is encoded and the header is assembled in memory before any byte
//! reaches the sink, so an encoding failure writes nothing.
//!
//! Header and payload are two separate writes. If the payload write fails
//! the sink is left holding a header whose `data_size` is not followed by
//! that many bytes. Readers report such a truncated envelope as an
//! `UnexpectedEof`; this layer does not retry or roll back.

use crate::codec::PayloadCodec;
use crate::error::EnvelopeError;
use crate::positional::WriteAt;
use bytes::{Bytes, BytesMut};
use std::io::{self, Write};
use vellum_format::{FormatConfig, HeaderCodec};

/// Writes envelopes in the current format generation.
#[derive(Debug, Clone)]
pub struct EnvelopeWriter<C> {
    header: HeaderCodec,
    codec: C,
}

impl<C: PayloadCodec> EnvelopeWriter<C> {
    pub fn new(header: HeaderCodec, codec: C) -> Self {
        Self { header, codec }
    }

    pub fn from_config(config: &FormatConfig, codec: C) -> Result<Self, EnvelopeError> {
        Ok(Self::new(HeaderCodec::from_config(config)?, codec))
    }

    /// Returns the header codec used for new envelopes.
    pub fn header_codec(&self) -> &HeaderCodec {
        &self.header
    }

    /// Returns the payload codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Writes one envelope to a sequential sink, returning the bytes written.
    pub fn write<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        message: &C::Message,
    ) -> Result<u64, EnvelopeError> {
        let (header, data) = self.prepare(message)?;

        writer.write_all(&header)?;
        if let Err(e) = writer.write_all(&data) {
            tracing::warn!(
                "Payload write failed after {} header bytes, envelope is truncated: {}",
                header.len(),
                e
            );
            return Err(e.into());
        }

        let total = (header.len() + data.len()) as u64;
        tracing::debug!(
            "Wrote envelope: header={} data={} total={}",
            header.len(),
            data.len(),
            total
        );
        Ok(total)
    }

    /// Writes one envelope at `offset` of a positional sink, returning the
    /// bytes written.
    pub fn write_at<W: WriteAt + ?Sized>(
        &self,
        writer: &mut W,
        offset: u64,
        message: &C::Message,
    ) -> Result<u64, EnvelopeError> {
        let (header, data) = self.prepare(message)?;

        let total = (header.len() + data.len()) as u64;
        if offset.checked_add(total).is_none() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("envelope of {} bytes at offset {} is out of range", total, offset),
            )
            .into());
        }

        writer.write_all_at(&header, offset)?;
        let data_offset = offset + header.len() as u64;
        if let Err(e) = writer.write_all_at(&data, data_offset) {
            tracing::warn!(
                "Payload write at offset {} failed, envelope at {} is truncated: {}",
                data_offset,
                offset,
                e
            );
            return Err(e.into());
        }

        tracing::debug!(
            "Wrote envelope at offset {}: header={} data={} total={}",
            offset,
            header.len(),
            data.len(),
            total
        );
        Ok(total)
    }

    /// Encodes one envelope into a new buffer.
    pub fn encode_to_vec(&self, message: &C::Message) -> Result<Vec<u8>, EnvelopeError> {
        let (header, data) = self.prepare(message)?;
        let mut buf = Vec::with_capacity(header.len() + data.len());
        buf.extend_from_slice(&header);
        buf.extend_from_slice(&data);
        Ok(buf)
    }

    /// Encodes the payload and its header without touching any sink.
    fn prepare(&self, message: &C::Message) -> Result<(BytesMut, Bytes), EnvelopeError> {
        let data = self.codec.encode(message)?;
        let header = self.header.new_header(data.len() as u64);
        let encoded = self.header.encode(&header)?;
        Ok((encoded, data))
    }
}
