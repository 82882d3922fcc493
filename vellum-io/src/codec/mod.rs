//! Payload codecs.
//!
//! The envelope never interprets its payload. A [`PayloadCodec`] turns a
//! message into bytes, turns bytes back into a message, and reports the
//! encoded length of a message without encoding it, which is what
//! [`SizeEstimator`](crate::size::SizeEstimator) relies on.
//!
//! - [`RawCodec`] - pass-through for payloads that are already bytes
//! - [`JsonCodec`] - any serde type as JSON
//! - `ProstCodec` - protobuf messages (requires the `prost` feature)

mod json;
#[cfg(feature = "prost")]
mod protobuf;
mod raw;

pub use json::JsonCodec;
#[cfg(feature = "prost")]
pub use protobuf::ProstCodec;
pub use raw::RawCodec;

use crate::error::CodecError;
use bytes::Bytes;

/// Serializes and deserializes envelope payloads.
pub trait PayloadCodec {
    /// The in-memory payload type.
    type Message;

    /// Serializes `message`.
    fn encode(&self, message: &Self::Message) -> Result<Bytes, CodecError>;

    /// Deserializes a complete payload.
    fn decode(&self, data: Bytes) -> Result<Self::Message, CodecError>;

    /// Returns the length `encode` would produce, without encoding.
    fn encoded_len(&self, message: &Self::Message) -> Result<u64, CodecError>;
}

impl<C: PayloadCodec + ?Sized> PayloadCodec for &C {
    type Message = C::Message;

    fn encode(&self, message: &Self::Message) -> Result<Bytes, CodecError> {
        (**self).encode(message)
    }

    fn decode(&self, data: Bytes) -> Result<Self::Message, CodecError> {
        (**self).decode(data)
    }

    fn encoded_len(&self, message: &Self::Message) -> Result<u64, CodecError> {
        (**self).encoded_len(message)
    }
}
