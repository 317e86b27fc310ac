//! `url(...)` extraction from CSS text.

use regex::Regex;
use std::sync::OnceLock;

fn css_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"url\(\s*["']?([^"')]+?)["']?\s*\)"#).expect("static regex")
    })
}

/// All `url(...)` targets in a CSS value or inline style, in order.
pub fn css_urls(css: &str) -> Vec<String> {
    css_url_re()
        .captures_iter(css)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_and_unquoted() {
        assert_eq!(
            css_urls(r#"background: url("https://a.test/x.png") no-repeat"#),
            vec!["https://a.test/x.png"]
        );
        assert_eq!(css_urls("background-image:url('/b.jpg')"), vec!["/b.jpg"]);
        assert_eq!(css_urls("background-image: url( //c.test/c.gif )"), vec!["//c.test/c.gif"]);
    }

    #[test]
    fn multiple_layers() {
        let v = css_urls(r#"url("https://a.test/1.png"), linear-gradient(red, blue), url(https://a.test/2.png)"#);
        assert_eq!(v, vec!["https://a.test/1.png", "https://a.test/2.png"]);
    }

    #[test]
    fn none_and_empty() {
        assert!(css_urls("none").is_empty());
        assert!(css_urls("url()").is_empty());
    }
}
