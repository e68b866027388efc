//! compression/codecs/mod.rs
//! One module per algorithm; each exposes a stateless `Codec` implementation.

pub mod brotli;
pub mod bz2;
pub mod gzip;
pub mod lz4;
pub mod lzma;
pub mod skip;
pub mod zstd;

pub use self::brotli::BrotliCodec;
pub use self::bz2::Bz2Codec;
pub use self::gzip::GzipCodec;
pub use self::lz4::Lz4Codec;
pub use self::lzma::LzmaCodec;
pub use self::skip::SkipCodec;
pub use self::zstd::ZstdCodec;
