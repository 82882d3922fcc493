//! Envelope size estimation.

use crate::codec::PayloadCodec;
use crate::error::EnvelopeError;
use vellum_format::HeaderCodec;

/// Predicts envelope sizes without serializing payloads.
///
/// The prediction matches what [`EnvelopeWriter`](crate::writer::EnvelopeWriter)
/// writes for the same header codec and payload codec.
#[derive(Debug, Clone)]
pub struct SizeEstimator<C> {
    header: HeaderCodec,
    codec: C,
}

impl<C: PayloadCodec> SizeEstimator<C> {
    pub fn new(header: HeaderCodec, codec: C) -> Self {
        Self { header, codec }
    }

    /// Returns the size of every header this codec writes.
    pub fn header_size(&self) -> u64 {
        self.header.header_size()
    }

    /// Returns the full envelope size for `message`.
    pub fn total_size(&self, message: &C::Message) -> Result<u64, EnvelopeError> {
        Ok(self.header_size() + self.codec.encoded_len(message)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{JsonCodec, RawCodec};
    use crate::writer::EnvelopeWriter;
    use bytes::Bytes;
    use proptest::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Record {
        id: u64,
        tags: Vec<String>,
        weight: f64,
    }

    #[test]
    fn test_header_size() {
        let sizes = SizeEstimator::new(HeaderCodec::default(), RawCodec);
        assert_eq!(sizes.header_size(), 32);

        let sizes = SizeEstimator::new(HeaderCodec::new("1", 2).unwrap(), RawCodec);
        assert_eq!(sizes.header_size(), 18);
    }

    #[test]
    fn test_total_size_raw() {
        let sizes = SizeEstimator::new(HeaderCodec::default(), RawCodec);
        assert_eq!(sizes.total_size(&Bytes::new()).unwrap(), 32);
        assert_eq!(sizes.total_size(&Bytes::from_static(&[1, 2, 3])).unwrap(), 35);
    }

    #[test]
    fn test_total_size_matches_json_writer() {
        let sizes = SizeEstimator::new(HeaderCodec::default(), JsonCodec::<Record>::new());
        let writer = EnvelopeWriter::new(HeaderCodec::default(), JsonCodec::<Record>::new());

        let record = Record {
            id: 42,
            tags: vec!["hot".to_string(), "quoted \"tag\"".to_string()],
            weight: 0.125,
        };

        let mut sink = Vec::new();
        let written = writer.write(&mut sink, &record).unwrap();
        assert_eq!(sizes.total_size(&record).unwrap(), written);
    }

    proptest! {
        #[test]
        fn prop_total_size_matches_written(
            payload in proptest::collection::vec(any::<u8>(), 0..512),
            max_version_len in 6usize..32,
        ) {
            let header = HeaderCodec::new("1.0.0", max_version_len).unwrap();
            let sizes = SizeEstimator::new(header.clone(), RawCodec);
            let writer = EnvelopeWriter::new(header, RawCodec);

            let payload = Bytes::from(payload);
            let mut sink = Vec::new();
            let written = writer.write(&mut sink, &payload).unwrap();

            prop_assert_eq!(sizes.total_size(&payload).unwrap(), written);
            prop_assert_eq!(sink.len() as u64, written);
        }
    }
}
