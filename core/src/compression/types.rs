//! compression/types.rs
//! Algorithm identifiers, the codec trait and codec-level errors.
use std::fmt;
use std::str::FromStr;

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compression::constants::codec_ids;
use crate::utils::enum_name_or_hex;

/// Every algorithm the registry can dispatch to.
///
/// `Skip` is the identity transform used for data judged incompressible.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, TryFromPrimitive, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    Skip   = codec_ids::SKIP,
    Gzip   = codec_ids::GZIP,
    Bz2    = codec_ids::BZ2,
    Lzma   = codec_ids::LZMA,
    Lz4    = codec_ids::LZ4,
    Zstd   = codec_ids::ZSTD,
    Brotli = codec_ids::BROTLI,
}

impl Algorithm {
    /// All algorithms in registry order.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Skip,
        Algorithm::Gzip,
        Algorithm::Bz2,
        Algorithm::Lzma,
        Algorithm::Lz4,
        Algorithm::Zstd,
        Algorithm::Brotli,
    ];

    /// Canonical name, used in blob paths, the catalog and the decision log.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Skip   => "skip",
            Algorithm::Gzip   => "gzip",
            Algorithm::Bz2    => "bz2",
            Algorithm::Lzma   => "lzma",
            Algorithm::Lz4    => "lz4",
            Algorithm::Zstd   => "zstd",
            Algorithm::Brotli => "brotli",
        }
    }

    pub fn id(self) -> u16 {
        self as u16
    }

    /// Resolve a raw id, failing with `UnsupportedCodec` for unknown values.
    pub fn from_id(raw: u16) -> Result<Self, CompressionError> {
        Algorithm::try_from_primitive(raw).map_err(|_| CompressionError::UnsupportedCodec { codec_id: raw })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CompressionError;

    /// Case-insensitive; accepts the common aliases (`bzip2`, `xz`, `SKIP`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" | "none" | "store" => Ok(Algorithm::Skip),
            "gzip" | "gz"             => Ok(Algorithm::Gzip),
            "bz2" | "bzip2"           => Ok(Algorithm::Bz2),
            "lzma" | "xz"             => Ok(Algorithm::Lzma),
            "lz4"                     => Ok(Algorithm::Lz4),
            "zstd" | "zstandard"      => Ok(Algorithm::Zstd),
            "brotli" | "br"           => Ok(Algorithm::Brotli),
            _ => Err(CompressionError::UnknownAlgorithm { name: s.to_string() }),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = CompressionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Algorithm> for String {
    fn from(alg: Algorithm) -> Self {
        alg.name().to_string()
    }
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("unknown compression algorithm: {name:?}")]
    UnknownAlgorithm { name: String },

    #[error("unsupported compression codec: {}", enum_name_or_hex::<Algorithm>(*codec_id))]
    UnsupportedCodec { codec_id: u16 },

    #[error("codec {codec} compress failed: {msg}")]
    CompressFailed { codec: &'static str, msg: String },

    #[error("codec {codec} decompress failed: {msg}")]
    DecompressFailed { codec: &'static str, msg: String },
}

impl CompressionError {
    pub fn compress_failed(codec: &'static str, err: impl fmt::Display) -> Self {
        CompressionError::CompressFailed { codec, msg: err.to_string() }
    }

    pub fn decompress_failed(codec: &'static str, err: impl fmt::Display) -> Self {
        CompressionError::DecompressFailed { codec, msg: err.to_string() }
    }
}

/// One whole-buffer transform pair. Implementations are stateless, so a single
/// instance is shared by every worker thread.
pub trait Codec: Send + Sync {
    fn algorithm(&self) -> Algorithm;
    /// Compress the whole input into a self-describing container.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError>;
    /// Inverse of `compress`.
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError>;
}
