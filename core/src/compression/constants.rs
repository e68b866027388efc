/// Stable algorithm IDs (u16) for the dispatch table and catalog tooling.
pub mod codec_ids {
    pub const SKIP: u16   = 0x0000;
    pub const GZIP: u16   = 0x0001;
    pub const BZ2: u16    = 0x0002;
    pub const LZMA: u16   = 0x0003;
    pub const LZ4: u16    = 0x0004;
    pub const ZSTD: u16   = 0x0005;
    pub const BROTLI: u16 = 0x0006;
}

/// Default compression levels. They mirror the stock settings of the reference
/// tools so blobs stay comparable with catalogs written by them.
pub const DEFAULT_LEVEL_GZIP: u32 = 9;
pub const DEFAULT_LEVEL_BZ2: u32 = 9;
pub const DEFAULT_LEVEL_LZMA: u32 = 6;
pub const DEFAULT_LEVEL_ZSTD: i32 = 3;

/// Brotli encoder knobs (quality 11, 4 MiB window).
pub const DEFAULT_QUALITY_BROTLI: i32 = 11;
pub const DEFAULT_LGWIN_BROTLI: i32 = 22;
