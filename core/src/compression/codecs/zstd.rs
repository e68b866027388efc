//! src/compression/codecs/zstd.rs
//!
//! Zstd single-frame compressor/decompressor.
//!
//! Design notes:
//! - `encode_all` writes one frame with the content size in the header.
//! - `decode_all` accepts concatenated frames, so blobs written by other
//!   zstd tooling decode as well.

use crate::compression::types::{Algorithm, Codec, CompressionError};

pub struct ZstdCodec {
    level: i32,
}

impl ZstdCodec {
    pub const fn new(level: i32) -> Self {
        Self { level }
    }
}

impl Codec for ZstdCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Zstd
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        ::zstd::stream::encode_all(input, self.level)
            .map_err(|e| CompressionError::compress_failed("zstd", e))
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        ::zstd::stream::decode_all(input)
            .map_err(|e| CompressionError::decompress_failed("zstd", e))
    }
}
