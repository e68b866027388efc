//! codecs/lzma.rs
//! LZMA2 in the `.xz` container via liblzma.

use std::io::{Read, Write};
use xz2::{read::XzDecoder, write::XzEncoder};

use crate::compression::types::{Algorithm, Codec, CompressionError};

pub struct LzmaCodec {
    preset: u32,
}

impl LzmaCodec {
    pub const fn new(preset: u32) -> Self {
        Self { preset }
    }
}

impl Codec for LzmaCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Lzma
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut enc = XzEncoder::new(Vec::with_capacity(input.len() / 2 + 64), self.preset.min(9));
        enc.write_all(input)
            .map_err(|e| CompressionError::compress_failed("lzma", e))?;
        enc.finish()
            .map_err(|e| CompressionError::compress_failed("lzma", e))
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut dec = XzDecoder::new(input);
        let mut out = Vec::new();
        dec.read_to_end(&mut out)
            .map_err(|e| CompressionError::decompress_failed("lzma", e))?;
        Ok(out)
    }
}
