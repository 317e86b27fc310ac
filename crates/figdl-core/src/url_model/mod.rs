//! URL modeling and filename derivation.
//!
//! Resolves raw candidates pulled out of markup into absolute URLs, classifies
//! URL schemes for the downloader, and derives safe local filenames from URL
//! paths.

mod path;
mod resolve;
mod sanitize;

pub use path::{extension_from_url_path, filename_from_url_path};
pub use resolve::resolve_candidate;
pub use sanitize::sanitize_filename;

/// Broad URL categories the downloader treats differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlScheme {
    /// Inline `data:` payload.
    Data,
    /// `blob:` object URL, only meaningful inside the page that created it.
    Blob,
    /// `chrome-extension:` resource.
    Extension,
    Http,
    Other,
}

/// Classifies `url` by its scheme prefix (case-insensitive).
pub fn classify_scheme(url: &str) -> UrlScheme {
    let scheme = match url.split_once(':') {
        Some((s, _)) => s.trim().to_ascii_lowercase(),
        None => return UrlScheme::Other,
    };
    match scheme.as_str() {
        "data" => UrlScheme::Data,
        "blob" => UrlScheme::Blob,
        "chrome-extension" => UrlScheme::Extension,
        "http" | "https" => UrlScheme::Http,
        _ => UrlScheme::Other,
    }
}
