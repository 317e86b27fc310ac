//! File extension inference from response content types.

use crate::strategy::Strategy;
use crate::url_model::extension_from_url_path;

/// Extension used when an `application/octet-stream` URL path has none.
const OPAQUE_EXTENSION: &str = ".bin";

/// Picks a file extension (with leading dot) for a fetched image.
///
/// Matching is by substring on the lowercased `Content-Type`. The scrape
/// strategy recognizes png/gif/svg/webp and treats everything else as JPEG;
/// the browser strategies recognize jpeg/gif/webp/svg and treat everything
/// else as PNG. Extract additionally maps `octet-stream` to the URL's own
/// extension, or `.bin`.
pub fn extension_for(content_type: &str, url: &str, strategy: Strategy) -> String {
    let ct = content_type.to_ascii_lowercase();
    let known = match strategy {
        Strategy::Scrape => [
            ("png", ".png"),
            ("gif", ".gif"),
            ("svg", ".svg"),
            ("webp", ".webp"),
        ]
        .iter()
        .find(|(needle, _)| ct.contains(needle))
        .map(|(_, ext)| *ext),
        Strategy::Sniff | Strategy::Extract => {
            if ct.contains("jpeg") || ct.contains("jpg") {
                Some(".jpg")
            } else if ct.contains("gif") {
                Some(".gif")
            } else if ct.contains("webp") {
                Some(".webp")
            } else if ct.contains("svg") {
                Some(".svg")
            } else {
                None
            }
        }
    };
    if let Some(ext) = known {
        return ext.to_string();
    }
    if strategy.sniffs_octet_stream() && ct.contains("octet-stream") {
        return extension_from_url_path(url).unwrap_or_else(|| OPAQUE_EXTENSION.to_string());
    }
    strategy.default_extension().to_string()
}
