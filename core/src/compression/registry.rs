//! compression/registry.rs
//! Fixed dispatch table from `Algorithm` to its codec.

use crate::compression::codecs::{
    BrotliCodec, Bz2Codec, GzipCodec, LzmaCodec, Lz4Codec, SkipCodec, ZstdCodec,
};
use crate::compression::constants::*;
use crate::compression::types::{Algorithm, Codec, CompressionError};

pub struct CodecInfo {
    pub algorithm: Algorithm,
    pub name: &'static str,
    /// Container produced by the codec.
    pub container: &'static str,
}

static SKIP: SkipCodec = SkipCodec;
static GZIP: GzipCodec = GzipCodec::new(DEFAULT_LEVEL_GZIP);
static BZ2: Bz2Codec = Bz2Codec::new(DEFAULT_LEVEL_BZ2);
static LZMA: LzmaCodec = LzmaCodec::new(DEFAULT_LEVEL_LZMA);
static LZ4: Lz4Codec = Lz4Codec;
static ZSTD: ZstdCodec = ZstdCodec::new(DEFAULT_LEVEL_ZSTD);
static BROTLI: BrotliCodec = BrotliCodec::new(DEFAULT_QUALITY_BROTLI, DEFAULT_LGWIN_BROTLI);

pub fn codec(algorithm: Algorithm) -> &'static dyn Codec {
    match algorithm {
        Algorithm::Skip   => &SKIP,
        Algorithm::Gzip   => &GZIP,
        Algorithm::Bz2    => &BZ2,
        Algorithm::Lzma   => &LZMA,
        Algorithm::Lz4    => &LZ4,
        Algorithm::Zstd   => &ZSTD,
        Algorithm::Brotli => &BROTLI,
    }
}

pub fn resolve(codec_id: u16) -> Result<CodecInfo, CompressionError> {
    let algorithm = Algorithm::from_id(codec_id)?;
    let container = match algorithm {
        Algorithm::Skip   => "raw",
        Algorithm::Gzip   => "gzip member",
        Algorithm::Bz2    => "bzip2 stream",
        Algorithm::Lzma   => "xz stream",
        Algorithm::Lz4    => "lz4 frame",
        Algorithm::Zstd   => "zstd frame",
        Algorithm::Brotli => "brotli stream",
    };
    Ok(CodecInfo { algorithm, name: algorithm.name(), container })
}

/// Resolve a textual identifier (catalog column, CLI argument, log field).
pub fn codec_by_name(name: &str) -> Result<&'static dyn Codec, CompressionError> {
    Ok(codec(name.parse::<Algorithm>()?))
}

pub fn compress(algorithm: Algorithm, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
    codec(algorithm).compress(input)
}

pub fn decompress(algorithm: Algorithm, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
    codec(algorithm).decompress(input)
}
