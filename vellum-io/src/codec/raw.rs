//! Raw codec - pass-through for binary payloads.

use super::PayloadCodec;
use crate::error::CodecError;
use bytes::Bytes;

/// Codec for payloads that are already serialized.
///
/// Encoding and decoding share the underlying buffer instead of copying it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCodec;

impl PayloadCodec for RawCodec {
    type Message = Bytes;

    #[inline]
    fn encode(&self, message: &Bytes) -> Result<Bytes, CodecError> {
        Ok(message.clone())
    }

    #[inline]
    fn decode(&self, data: Bytes) -> Result<Bytes, CodecError> {
        Ok(data)
    }

    #[inline]
    fn encoded_len(&self, message: &Bytes) -> Result<u64, CodecError> {
        Ok(message.len() as u64)
    }
}
