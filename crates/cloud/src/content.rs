//! Content-type sniffing for uploaded images.

use image::ImageFormat;

/// MIME type and file extension for an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentKind {
    pub mime_type: &'static str,
    pub extension: &'static str,
}

const OCTET_STREAM: ContentKind = ContentKind {
    mime_type: "application/octet-stream",
    extension: "bin",
};

/// Guess the content kind from the leading magic bytes.
///
/// Unknown payloads are still stored, as `application/octet-stream`.
pub fn sniff(bytes: &[u8]) -> ContentKind {
    match image::guess_format(bytes) {
        Ok(format) => ContentKind {
            mime_type: format.to_mime_type(),
            extension: extension_for(format),
        },
        Err(_) => OCTET_STREAM,
    }
}

fn extension_for(format: ImageFormat) -> &'static str {
    format.extensions_str().first().copied().unwrap_or("bin")
}
