//! Turning raw markup candidates into absolute URLs.

use url::Url;

/// Resolves a raw `src`/`url(...)`/`data-*` value found on the page at `base`.
///
/// - `http://` / `https://` values are kept verbatim.
/// - Protocol-relative `//host/path` becomes `https://host/path`.
/// - Root-relative `/path` is joined onto `base`.
/// - Everything else (document-relative paths, `data:`, `javascript:`, empty)
///   is dropped.
pub fn resolve_candidate(raw: &str, base: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with("http") {
        return Some(raw.to_string());
    }
    if let Some(rest) = raw.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    if raw.starts_with('/') {
        let base = Url::parse(base).ok()?;
        return base.join(raw).ok().map(String::from);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.figma.com/proto/abc/Deck?node-id=1-2";

    #[test]
    fn absolute_kept() {
        assert_eq!(
            resolve_candidate("https://s3.example.com/a.png", BASE).as_deref(),
            Some("https://s3.example.com/a.png")
        );
        assert_eq!(
            resolve_candidate("  http://x.test/b.gif ", BASE).as_deref(),
            Some("http://x.test/b.gif")
        );
    }

    #[test]
    fn protocol_relative_gets_https() {
        assert_eq!(
            resolve_candidate("//static.figma.com/img/x.svg", BASE).as_deref(),
            Some("https://static.figma.com/img/x.svg")
        );
    }

    #[test]
    fn root_relative_joined_on_base_origin() {
        assert_eq!(
            resolve_candidate("/static/logo.png", BASE).as_deref(),
            Some("https://www.figma.com/static/logo.png")
        );
    }

    #[test]
    fn others_dropped() {
        assert_eq!(resolve_candidate("img/logo.png", BASE), None);
        assert_eq!(resolve_candidate("data:image/png;base64,AA==", BASE), None);
        assert_eq!(resolve_candidate("", BASE), None);
        assert_eq!(resolve_candidate("/x.png", "not a base"), None);
    }
}
