//! Static discovery over fetched HTML.

use scraper::{Html, Selector};

use super::css::css_urls;
use super::snapshot::parse_srcset;
use crate::record::{DiscoveryMethod, ImageRecord, ImageSet};
use crate::url_model::resolve_candidate;

/// Attributes that commonly hold lazy-loaded or scripted image URLs.
const DATA_ATTRIBUTES: [&str; 4] = ["data-image", "data-url", "data-src", "data-background"];

/// Finds image candidates in `html` served from `base_url`.
///
/// Looks at `<img>` (`src`, falling back to `data-src`, plus `srcset`), CSS
/// `url(...)` in every inline `style`, and the `data-*` attributes in
/// `DATA_ATTRIBUTES` on `div`/`img`/`svg`/`canvas`. Candidates that cannot be
/// resolved to an absolute URL are dropped.
pub fn discover_static(html: &str, base_url: &str) -> ImageSet {
    let doc = Html::parse_document(html);
    let mut found = ImageSet::new();
    let mut push = |raw: &str, method: DiscoveryMethod| {
        if let Some(url) = resolve_candidate(raw, base_url) {
            found.insert(ImageRecord::from_dom(url, method));
        }
    };

    if let Ok(sel) = Selector::parse("img") {
        for img in doc.select(&sel) {
            let attrs = img.value();
            let src = attrs
                .attr("src")
                .filter(|s| !s.trim().is_empty())
                .or_else(|| attrs.attr("data-src"));
            if let Some(src) = src {
                push(src, DiscoveryMethod::ImgTag);
            }
            if let Some(srcset) = attrs.attr("srcset") {
                for candidate in parse_srcset(srcset) {
                    push(&candidate, DiscoveryMethod::Srcset);
                }
            }
        }
    }

    if let Ok(sel) = Selector::parse("[style]") {
        for el in doc.select(&sel) {
            if let Some(style) = el.value().attr("style") {
                for u in css_urls(style) {
                    push(&u, DiscoveryMethod::Background);
                }
            }
        }
    }

    if let Ok(sel) = Selector::parse("div, img, svg, canvas") {
        for el in doc.select(&sel) {
            for attr in DATA_ATTRIBUTES {
                if let Some(v) = el.value().attr(attr) {
                    push(v, DiscoveryMethod::DataAttribute);
                }
            }
        }
    }

    tracing::debug!(count = found.len(), "static discovery finished");
    found
}
