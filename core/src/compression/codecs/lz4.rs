//! codecs/lz4.rs
//! LZ4 frame format (not the raw block API), so blobs carry their own
//! checksums and end marks.
use std::io::{Read, Write};
use lz4_flex::frame::{FrameDecoder, FrameEncoder};

use crate::compression::types::{Algorithm, Codec, CompressionError};

/// lz4_flex has no compression levels; the frame encoder always runs in fast mode.
pub struct Lz4Codec;

impl Codec for Lz4Codec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Lz4
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut enc = FrameEncoder::new(Vec::with_capacity(input.len() / 2 + 32));
        enc.write_all(input)
            .map_err(|e| CompressionError::compress_failed("lz4", e))?;
        enc.finish()
            .map_err(|e| CompressionError::compress_failed("lz4", e))
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut dec = FrameDecoder::new(input);
        let mut out = Vec::new();
        dec.read_to_end(&mut out)
            .map_err(|e| CompressionError::decompress_failed("lz4", e))?;
        Ok(out)
    }
}
