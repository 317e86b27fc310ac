//! Discovery over what a headless browser observed on the page.

use serde::{Deserialize, Serialize};

use super::css::css_urls;
use crate::record::{DiscoveryMethod, ImageRecord, ImageSet};

/// Content type recorded for canvas captures (`toDataURL("image/png")`).
const CANVAS_CONTENT_TYPE: &str = "image/png";

/// A request the page issued, as seen by the network listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRequest {
    pub url: String,
    /// Lowercased CDP resource type (`image`, `media`, `xhr`, `fetch`, ...).
    pub resource_type: String,
    pub method: String,
}

/// A response the page received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkResponse {
    pub url: String,
    pub resource_type: String,
    pub content_type: String,
    /// Method of the originating request, `GET` when it was not observed.
    pub method: String,
}

/// `src`, `data-src` and `srcset` of one `<img>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImgAttributes {
    pub src: Option<String>,
    #[serde(rename = "dataSrc")]
    pub data_src: Option<String>,
    pub srcset: Option<String>,
}

/// Plain-data capture of a rendered page. Holds no browser handles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub requests: Vec<NetworkRequest>,
    pub responses: Vec<NetworkResponse>,
    pub images: Vec<ImgAttributes>,
    /// Computed `background-image` values other than `none`, unparsed.
    pub backgrounds: Vec<String>,
    /// `canvas.toDataURL()` results.
    pub canvases: Vec<String>,
    /// `outerHTML` of every `<svg>`.
    pub svgs: Vec<String>,
}

/// First URL token of every comma-separated `srcset` entry.
pub fn parse_srcset(srcset: &str) -> Vec<String> {
    srcset
        .split(',')
        .filter_map(|entry| entry.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

fn is_resource(resource_type: &str, kinds: &[&str]) -> bool {
    kinds.iter().any(|k| resource_type.eq_ignore_ascii_case(k))
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn push_canvases(snapshot: &PageSnapshot, found: &mut ImageSet) {
    for data_url in &snapshot.canvases {
        if data_url.starts_with("data:image") {
            found.insert(ImageRecord::new(
                data_url.clone(),
                CANVAS_CONTENT_TYPE,
                DiscoveryMethod::Canvas,
            ));
        }
    }
}

/// Sniff strategy: image/media requests, then `<img>` src/data-src, then canvases.
pub fn discover_sniff(snapshot: &PageSnapshot) -> ImageSet {
    let mut found = ImageSet::new();

    for req in &snapshot.requests {
        if is_resource(&req.resource_type, &["image", "media"]) {
            found.insert(ImageRecord::from_dom(
                req.url.clone(),
                DiscoveryMethod::Network {
                    http_method: req.method.clone(),
                },
            ));
        }
    }

    for img in &snapshot.images {
        for v in [non_empty(&img.src), non_empty(&img.data_src)].into_iter().flatten() {
            found.insert(ImageRecord::from_dom(v, DiscoveryMethod::ImgTag));
        }
    }

    push_canvases(snapshot, &mut found);
    found
}

/// Extract strategy: image-like responses, `<img>` (incl. srcset), computed
/// backgrounds, then canvases.
pub fn discover_extract(snapshot: &PageSnapshot) -> ImageSet {
    let mut found = ImageSet::new();

    for resp in &snapshot.responses {
        if !is_resource(&resp.resource_type, &["image", "media", "xhr", "fetch"]) {
            continue;
        }
        let looks_like_image = resp.content_type.to_ascii_lowercase().contains("image")
            || is_resource(&resp.resource_type, &["image", "media"]);
        if looks_like_image {
            found.insert(ImageRecord::new(
                resp.url.clone(),
                resp.content_type.clone(),
                DiscoveryMethod::Network {
                    http_method: resp.method.clone(),
                },
            ));
        }
    }

    for img in &snapshot.images {
        for v in [non_empty(&img.src), non_empty(&img.data_src)].into_iter().flatten() {
            found.insert(ImageRecord::from_dom(v, DiscoveryMethod::ImgTag));
        }
        if let Some(srcset) = non_empty(&img.srcset) {
            for u in parse_srcset(srcset) {
                found.insert(ImageRecord::from_dom(u, DiscoveryMethod::Srcset));
            }
        }
    }

    for bg in &snapshot.backgrounds {
        if bg.trim() == "none" {
            continue;
        }
        for u in css_urls(bg) {
            found.insert(ImageRecord::from_dom(u, DiscoveryMethod::Background));
        }
    }

    push_canvases(snapshot, &mut found);
    found
}
