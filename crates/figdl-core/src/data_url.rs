//! Decoding of inline `data:` URLs (canvas captures, inline images).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Extension used when the media type is not `image/<subtype>`.
const FALLBACK_EXTENSION: &str = ".png";

#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("not a data: URL")]
    NotDataUrl,
    #[error("data: URL has no payload separator")]
    MissingPayload,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// A decoded `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// Extension with leading dot, from `data:image/<subtype>;`.
    pub extension: String,
    pub bytes: Vec<u8>,
}

fn image_subtype_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^data:image/(\w+);").expect("static regex"))
}

/// Extension for a data URL's declared image subtype, `.png` otherwise.
///
/// Only a plain word subtype directly followed by `;` counts, so
/// `image/svg+xml` and parameterless `data:image/gif,...` fall back to `.png`.
pub fn data_url_extension(url: &str) -> String {
    image_subtype_re()
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| format!(".{}", m.as_str()))
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string())
}

/// Decodes `url`. Base64 payloads are decoded; other payloads are
/// percent-decoded to raw bytes.
pub fn decode_data_url(url: &str) -> Result<DataUrl, DataUrlError> {
    if !url.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("data:")) {
        return Err(DataUrlError::NotDataUrl);
    }
    let (header, payload) = url.split_once(',').ok_or(DataUrlError::MissingPayload)?;
    let is_base64 = header
        .rsplit(';')
        .next()
        .is_some_and(|p| p.trim().eq_ignore_ascii_case("base64"));
    let bytes = if is_base64 {
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        STANDARD.decode(compact)?
    } else {
        percent_decode_str(payload).collect()
    };
    Ok(DataUrl {
        extension: data_url_extension(url),
        bytes,
    })
}
