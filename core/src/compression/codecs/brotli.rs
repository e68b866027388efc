//! codecs/brotli.rs
//! Brotli stream via the pure-Rust `brotli` crate.

use ::brotli::enc::BrotliEncoderParams;

use crate::compression::types::{Algorithm, Codec, CompressionError};

pub struct BrotliCodec {
    quality: i32,
    lgwin: i32,
}

impl BrotliCodec {
    pub const fn new(quality: i32, lgwin: i32) -> Self {
        Self { quality, lgwin }
    }
}

impl Codec for BrotliCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Brotli
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let params = BrotliEncoderParams {
            quality: self.quality,
            lgwin: self.lgwin,
            size_hint: input.len(),
            ..Default::default()
        };
        let mut reader = input;
        let mut out = Vec::with_capacity(input.len() / 2 + 32);
        ::brotli::BrotliCompress(&mut reader, &mut out, &params)
            .map_err(|e| CompressionError::compress_failed("brotli", e))?;
        Ok(out)
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut reader = input;
        let mut out = Vec::new();
        ::brotli::BrotliDecompress(&mut reader, &mut out)
            .map_err(|e| CompressionError::decompress_failed("brotli", e))?;
        Ok(out)
    }
}
