//! Envelope reader.
//!
//! Reading is the mirror of writing: decode the header, read exactly
//! `data_size` payload bytes, hand them to the payload codec. A source that
//! is exhausted before the first header byte reports end of stream; a source
//! that ends anywhere inside an envelope reports `UnexpectedEof`.
//!
//! Positional reads wrap the source in a [`SectionReader`] bounded by
//! `max_marshalled_size`, so the same sequential decoder serves both paths.

use crate::codec::PayloadCodec;
use crate::error::EnvelopeError;
use crate::positional::{ReadAt, SectionReader};
use bytes::Bytes;
use std::io::Read;
use vellum_format::full_read::read_len;
use vellum_format::{FormatConfig, Header, HeaderCodec, MAX_MARSHALLED_SIZE};

/// Reads envelopes written by this or older format generations.
#[derive(Debug, Clone)]
pub struct EnvelopeReader<C> {
    header: HeaderCodec,
    codec: C,
    max_marshalled_size: u64,
}

impl<C: PayloadCodec> EnvelopeReader<C> {
    pub fn new(header: HeaderCodec, codec: C) -> Self {
        Self {
            header,
            codec,
            max_marshalled_size: MAX_MARSHALLED_SIZE,
        }
    }

    pub fn from_config(config: &FormatConfig, codec: C) -> Result<Self, EnvelopeError> {
        Ok(Self::new(HeaderCodec::from_config(config)?, codec)
            .with_max_marshalled_size(config.max_marshalled_size))
    }

    /// Sets the upper bound of the window used by positional reads.
    pub fn with_max_marshalled_size(mut self, size: u64) -> Self {
        self.max_marshalled_size = size;
        self
    }

    pub fn header_codec(&self) -> &HeaderCodec {
        &self.header
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn max_marshalled_size(&self) -> u64 {
        self.max_marshalled_size
    }

    /// Reads only the header, leaving `reader` positioned at the payload.
    pub fn read_header<R: Read + ?Sized>(&self, reader: &mut R) -> Result<Header, EnvelopeError> {
        let header = self.header.decode(reader)?;

        let trailing = self.header.trailing_len(&header);
        if trailing > 0 {
            tracing::warn!(
                "Skipped {} unknown header bytes from version {}",
                trailing,
                header.version
            );
        }

        Ok(header)
    }

    /// Reads one envelope from a sequential source.
    pub fn read<R: Read + ?Sized>(&self, reader: &mut R) -> Result<C::Message, EnvelopeError> {
        let header = self.read_header(reader)?;
        let data = read_len(reader, header.data_size)?;
        tracing::debug!(
            "Read envelope: version={} header={} data={}",
            header.version,
            header.header_size,
            header.data_size
        );
        let message = self.codec.decode(Bytes::from(data))?;
        Ok(message)
    }

    /// Reads one envelope, returning `None` if the source is already exhausted.
    pub fn try_read<R: Read + ?Sized>(
        &self,
        reader: &mut R,
    ) -> Result<Option<C::Message>, EnvelopeError> {
        match self.read(reader) {
            Ok(message) => Ok(Some(message)),
            Err(e) if e.is_end_of_stream() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Reads one envelope starting at `offset` of a positional source.
    ///
    /// Returns the message and the number of bytes consumed, so the next
    /// envelope starts at `offset + consumed`.
    pub fn read_at<R: ReadAt + ?Sized>(
        &self,
        source: &R,
        offset: u64,
    ) -> Result<(C::Message, u64), EnvelopeError> {
        let mut section = SectionReader::new(source, offset, self.max_marshalled_size);
        let message = self.read(&mut section)?;
        let consumed = section.position()?;
        Ok((message, consumed))
    }

    /// Reads back-to-back envelopes from `offset` up to `end`.
    ///
    /// Stops early, without error, if the source ends on an envelope
    /// boundary before `end`.
    pub fn read_all_at<R: ReadAt + ?Sized>(
        &self,
        source: &R,
        offset: u64,
        end: u64,
    ) -> Result<Vec<C::Message>, EnvelopeError> {
        let mut messages = Vec::new();
        let mut offset = offset;

        while offset < end {
            match self.read_at(source, offset) {
                Ok((message, consumed)) => {
                    messages.push(message);
                    offset += consumed;
                }
                Err(e) if e.is_end_of_stream() => break,
                Err(e) => {
                    tracing::warn!(
                        "Envelope at offset {} failed after {} good envelopes: {}",
                        offset,
                        messages.len(),
                        e
                    );
                    return Err(e);
                }
            }
        }

        Ok(messages)
    }

    /// Iterates over back-to-back envelopes in `reader`.
    pub fn stream<R: Read>(&self, reader: R) -> EnvelopeStream<'_, C, R> {
        EnvelopeStream {
            reader,
            envelopes: self,
            done: false,
        }
    }
}

/// Iterator over consecutive envelopes in a sequential source.
///
/// Ends after the last complete envelope. The first error is yielded once,
/// after which the iterator is exhausted.
pub struct EnvelopeStream<'a, C, R> {
    reader: R,
    envelopes: &'a EnvelopeReader<C>,
    done: bool,
}

impl<C, R> EnvelopeStream<'_, C, R> {
    /// Returns the underlying source.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<C: PayloadCodec, R: Read> Iterator for EnvelopeStream<'_, C, R> {
    type Item = Result<C::Message, EnvelopeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.envelopes.try_read(&mut self.reader) {
            Ok(Some(message)) => Some(Ok(message)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
