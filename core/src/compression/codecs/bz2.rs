//! codecs/bz2.rs
//! Bzip2 via the libbz2 bindings.

use std::io::{Read, Write};
use bzip2::{Compression, read::BzDecoder, write::BzEncoder};

use crate::compression::types::{Algorithm, Codec, CompressionError};

pub struct Bz2Codec {
    level: u32,
}

impl Bz2Codec {
    pub const fn new(level: u32) -> Self {
        Self { level }
    }
}

impl Codec for Bz2Codec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bz2
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        // libbz2 only accepts block sizes 1..=9
        let level = Compression::new(self.level.clamp(1, 9));
        let mut enc = BzEncoder::new(Vec::with_capacity(input.len() / 2 + 64), level);
        enc.write_all(input)
            .map_err(|e| CompressionError::compress_failed("bz2", e))?;
        enc.finish()
            .map_err(|e| CompressionError::compress_failed("bz2", e))
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut dec = BzDecoder::new(input);
        let mut out = Vec::new();
        dec.read_to_end(&mut out)
            .map_err(|e| CompressionError::decompress_failed("bz2", e))?;
        Ok(out)
    }
}
