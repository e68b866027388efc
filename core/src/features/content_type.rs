//! features/content_type.rs
//! Coarse content classification: extension table first, byte sniffing second.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MIME, TEXT_SAMPLE_LEN};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentClass {
    Text,
    Json,
    /// Audio, video or image.
    Media,
    Binary,
}

impl ContentClass {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentClass::Text   => "text",
            ContentClass::Json   => "json",
            ContentClass::Media  => "media",
            ContentClass::Binary => "binary",
        }
    }

    /// Classify a MIME string. Used for rows that predate the class column.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.to_ascii_lowercase();
        if mime.contains("json") {
            ContentClass::Json
        } else if mime.starts_with("audio/") || mime.starts_with("video/") || mime.starts_with("image/") {
            ContentClass::Media
        } else if mime.starts_with("text/")
            || mime.ends_with("/xml")
            || mime.ends_with("+xml")
            || mime == "application/javascript"
            || mime == "application/x-sh"
        {
            ContentClass::Text
        } else {
            ContentClass::Binary
        }
    }
}

impl fmt::Display for ContentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text"   => Ok(ContentClass::Text),
            "json"   => Ok(ContentClass::Json),
            "media" | "audio" | "video" | "image" => Ok(ContentClass::Media),
            "binary" => Ok(ContentClass::Binary),
            other    => Err(format!("unknown content class: {other}")),
        }
    }
}

/// Extension → MIME table. Lookups are case-insensitive on the extension.
const EXTENSION_TABLE: &[(&str, &str)] = &[
    // text
    ("txt", "text/plain"),
    ("log", "text/plain"),
    ("md", "text/markdown"),
    ("csv", "text/csv"),
    ("tsv", "text/tab-separated-values"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("xml", "application/xml"),
    ("yaml", "application/x-yaml"),
    ("yml", "application/x-yaml"),
    ("toml", "application/toml"),
    ("py", "text/x-python"),
    ("rs", "text/x-rust"),
    ("c", "text/x-c"),
    ("h", "text/x-c"),
    ("sh", "application/x-sh"),
    // json
    ("json", "application/json"),
    ("jsonl", "application/x-ndjson"),
    ("ndjson", "application/x-ndjson"),
    ("geojson", "application/geo+json"),
    // media
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("svg", "image/svg+xml"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/x-wav"),
    ("flac", "audio/flac"),
    ("ogg", "audio/ogg"),
    ("mp4", "video/mp4"),
    ("mkv", "video/x-matroska"),
    ("avi", "video/x-msvideo"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    // binary
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
    ("bz2", "application/x-bzip2"),
    ("xz", "application/x-xz"),
    ("zst", "application/zstd"),
    ("tar", "application/x-tar"),
    ("7z", "application/x-7z-compressed"),
    ("exe", "application/x-msdownload"),
    ("wasm", "application/wasm"),
    ("sqlite", "application/vnd.sqlite3"),
    ("db", "application/vnd.sqlite3"),
];

/// MIME type for a file name's extension, if the table knows it.
pub fn mime_from_extension(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    EXTENSION_TABLE
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

#[inline]
fn is_textual(b: u8) -> bool {
    // printable ASCII plus tab, LF, CR, FF, BEL, ESC
    matches!(b, 0x20..=0x7e | b'\t' | b'\n' | b'\r' | 0x0c | 0x07 | 0x1b)
}

/// True when every byte of the leading sample is textual. Empty data is not text.
pub fn looks_like_text(data: &[u8]) -> bool {
    let sample = &data[..data.len().min(TEXT_SAMPLE_LEN)];
    !sample.is_empty() && sample.iter().all(|&b| is_textual(b))
}

/// Detect `(mime, class)`. Never fails; unknown content is
/// `application/octet-stream` / `Binary`.
pub fn detect_content_type(file_name: &str, data: &[u8]) -> (String, ContentClass) {
    if let Some(mime) = mime_from_extension(file_name) {
        return (mime.to_string(), ContentClass::from_mime(mime));
    }
    if looks_like_text(data) {
        ("text/plain".to_string(), ContentClass::Text)
    } else {
        (DEFAULT_MIME.to_string(), ContentClass::Binary)
    }
}
