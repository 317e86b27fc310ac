//! Parse HTTP response header lines into ResponseHead.

/// Headers of the final response in a (possibly redirected) exchange.
#[derive(Debug, Clone, Default)]
pub struct ResponseHead {
    pub status: u32,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    /// URL curl ended up at after redirects.
    pub effective_url: Option<String>,
}

/// Parse collected header lines into ResponseHead.
///
/// curl reports headers for every hop of a redirect chain; each status line
/// (`HTTP/...`) starts a new block, so only the last response's headers win.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseHead {
    let mut head = ResponseHead::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            head = ResponseHead::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                head.content_type = Some(value.to_string());
            } else if name.eq_ignore_ascii_case("content-length") {
                head.content_length = value.parse::<u64>().ok();
            }
        }
    }

    head
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_content_type_and_length() {
        let h = parse_headers(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Type: image/png",
            "Content-Length: 42",
        ]));
        assert_eq!(h.content_type.as_deref(), Some("image/png"));
        assert_eq!(h.content_length, Some(42));
    }

    #[test]
    fn last_hop_of_redirect_wins() {
        let h = parse_headers(&lines(&[
            "HTTP/1.1 302 Found",
            "Content-Type: text/html",
            "Location: https://cdn.test/a.webp",
            "",
            "HTTP/2 200",
            "content-type: image/webp",
        ]));
        assert_eq!(h.content_type.as_deref(), Some("image/webp"));
        assert_eq!(h.content_length, None);
    }

    #[test]
    fn missing_content_type() {
        let h = parse_headers(&lines(&["HTTP/1.1 200 OK", "Content-Length: nope"]));
        assert!(h.content_type.is_none());
        assert!(h.content_length.is_none());
    }
}
