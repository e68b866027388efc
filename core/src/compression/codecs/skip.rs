//! codecs/skip.rs
//! Pass-through codec for data stored verbatim.

use crate::compression::types::{Algorithm, Codec, CompressionError};

pub struct SkipCodec;

impl Codec for SkipCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Skip
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        Ok(input.to_vec())
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        Ok(input.to_vec())
    }
}
