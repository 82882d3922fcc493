//! Protobuf codec using `prost`.

use super::PayloadCodec;
use crate::error::CodecError;
use bytes::Bytes;
use std::fmt;
use std::marker::PhantomData;

/// Codec for protobuf messages generated by `prost`.
///
/// `encoded_len` uses prost's own size computation, so estimating an
/// envelope never serializes the message.
pub struct ProstCodec<M> {
    _message: PhantomData<fn() -> M>,
}

impl<M> ProstCodec<M> {
    pub fn new() -> Self {
        Self {
            _message: PhantomData,
        }
    }
}

impl<M> Default for ProstCodec<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for ProstCodec<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for ProstCodec<M> {}

impl<M> fmt::Debug for ProstCodec<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProstCodec").finish()
    }
}

impl<M: prost::Message + Default> PayloadCodec for ProstCodec<M> {
    type Message = M;

    fn encode(&self, message: &M) -> Result<Bytes, CodecError> {
        Ok(Bytes::from(message.encode_to_vec()))
    }

    fn decode(&self, data: Bytes) -> Result<M, CodecError> {
        Ok(M::decode(data)?)
    }

    fn encoded_len(&self, message: &M) -> Result<u64, CodecError> {
        Ok(message.encoded_len() as u64)
    }
}
