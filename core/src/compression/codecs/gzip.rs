//! codecs/gzip.rs
//! Gzip (single member) via flate2.

use std::io::{Read, Write};
use flate2::{Compression, read::GzDecoder, write::GzEncoder};

use crate::compression::types::{Algorithm, Codec, CompressionError};

pub struct GzipCodec {
    level: u32,
}

impl GzipCodec {
    pub const fn new(level: u32) -> Self {
        Self { level }
    }
}

impl Codec for GzipCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Gzip
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let level = match self.level {
            0..=9 => Compression::new(self.level),
            _ => Compression::default(),
        };
        let mut enc = GzEncoder::new(Vec::with_capacity(input.len() / 2 + 32), level);
        enc.write_all(input)
            .map_err(|e| CompressionError::compress_failed("gzip", e))?;
        enc.finish()
            .map_err(|e| CompressionError::compress_failed("gzip", e))
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut dec = GzDecoder::new(input);
        let mut out = Vec::new();
        dec.read_to_end(&mut out)
            .map_err(|e| CompressionError::decompress_failed("gzip", e))?;
        Ok(out)
    }
}
