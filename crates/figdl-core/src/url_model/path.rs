//! Filename extraction from URL path.

/// Extracts the last path segment from a URL for use as a filename hint.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
/// Percent-escapes in the segment are left as-is.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let path = parsed.path();
    let segment = path.split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Extension (with leading dot) of the last path segment, if it has one.
///
/// A leading dot alone (`.hidden`) does not count as an extension.
pub fn extension_from_url_path(url: &str) -> Option<String> {
    let name = filename_from_url_path(url)?;
    let dot = name.rfind('.')?;
    if dot == 0 || dot + 1 == name.len() {
        return None;
    }
    Some(name[dot..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal() {
        assert_eq!(
            filename_from_url_path("https://example.com/a/b/logo.png").as_deref(),
            Some("logo.png")
        );
        assert_eq!(
            filename_from_url_path("https://example.com/single").as_deref(),
            Some("single")
        );
    }

    #[test]
    fn root_or_empty() {
        assert_eq!(filename_from_url_path("https://example.com/"), None);
        assert_eq!(filename_from_url_path("https://example.com"), None);
        assert_eq!(filename_from_url_path("not a url"), None);
    }

    #[test]
    fn with_query() {
        assert_eq!(
            filename_from_url_path("https://example.com/file.webp?token=abc").as_deref(),
            Some("file.webp")
        );
    }

    #[test]
    fn extension() {
        assert_eq!(
            extension_from_url_path("https://cdn.test/img/a.b.svg?x=1").as_deref(),
            Some(".svg")
        );
        assert_eq!(extension_from_url_path("https://cdn.test/img/abcdef"), None);
        assert_eq!(extension_from_url_path("https://cdn.test/img/.hidden"), None);
        assert_eq!(extension_from_url_path("https://cdn.test/img/trailing."), None);
    }
}
