//! compression/mod.rs
//! Whole-buffer compression and decompression behind a fixed dispatch table.
//!
//! Notes:
//! - Every codec emits its standard container (gzip member, bzip2 stream, xz
//!   stream, lz4 frame, zstd frame, brotli stream) so blobs can be opened by
//!   stock tools.
//! - Codecs are stateless and shared across worker threads.
//! - `Skip` is the identity codec for data stored verbatim.

pub mod constants;
pub mod types;
pub mod registry;
pub mod codecs;

pub use constants::*;
pub use types::*;
pub use registry::*;
