//! Discovered-image records and the insertion-ordered dedup set.

use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// Content type recorded for URLs found in the DOM (no response seen yet).
pub const UNKNOWN_IMAGE_TYPE: &str = "image/unknown";

/// How a candidate URL was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryMethod {
    /// `<img src>` or `<img data-src>`.
    ImgTag,
    /// One entry of an `<img srcset>`.
    Srcset,
    /// CSS `url(...)` in an inline style or computed `background-image`.
    Background,
    /// `data-image` / `data-url` / `data-src` / `data-background` attribute.
    DataAttribute,
    /// `canvas.toDataURL()` capture.
    Canvas,
    /// Observed browser network traffic; carries the HTTP method.
    Network { http_method: String },
}

impl DiscoveryMethod {
    /// Short tag used in the sidecar and in log lines.
    pub fn tag(&self) -> &str {
        match self {
            DiscoveryMethod::ImgTag => "img_tag",
            DiscoveryMethod::Srcset => "img_srcset",
            DiscoveryMethod::Background => "background",
            DiscoveryMethod::DataAttribute => "data_attribute",
            DiscoveryMethod::Canvas => "canvas",
            DiscoveryMethod::Network { http_method } => http_method,
        }
    }
}

impl Serialize for DiscoveryMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

/// A single discovered image candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub url: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub method: DiscoveryMethod,
}

impl ImageRecord {
    pub fn new(url: impl Into<String>, content_type: impl Into<String>, method: DiscoveryMethod) -> Self {
        Self {
            url: url.into(),
            content_type: content_type.into(),
            method,
        }
    }

    /// Record for a URL found in the DOM, content type not yet known.
    pub fn from_dom(url: impl Into<String>, method: DiscoveryMethod) -> Self {
        Self::new(url, UNKNOWN_IMAGE_TYPE, method)
    }
}

/// Records keyed by exact URL string, kept in discovery order.
///
/// The first record seen for a URL wins; later duplicates are dropped.
#[derive(Debug, Default, Clone)]
pub struct ImageSet {
    seen: HashSet<String>,
    records: Vec<ImageRecord>,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `record` unless its URL is already present. Returns true if added.
    pub fn insert(&mut self, record: ImageRecord) -> bool {
        if self.seen.contains(&record.url) {
            return false;
        }
        self.seen.insert(record.url.clone());
        self.records.push(record);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn into_vec(self) -> Vec<ImageRecord> {
        self.records
    }
}

impl Extend<ImageRecord> for ImageSet {
    fn extend<I: IntoIterator<Item = ImageRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl<'a> IntoIterator for &'a ImageSet {
    type Item = &'a ImageRecord;
    type IntoIter = std::slice::Iter<'a, ImageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_dedups_by_exact_url() {
        let mut set = ImageSet::new();
        assert!(set.insert(ImageRecord::from_dom("https://a.test/x.png", DiscoveryMethod::ImgTag)));
        assert!(!set.insert(ImageRecord::from_dom("https://a.test/x.png", DiscoveryMethod::Srcset)));
        // Different string, different record (no normalization).
        assert!(set.insert(ImageRecord::from_dom("https://a.test/x.png?v=1", DiscoveryMethod::ImgTag)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn first_writer_wins() {
        let mut set = ImageSet::new();
        set.insert(ImageRecord::new(
            "https://a.test/x.png",
            "image/png",
            DiscoveryMethod::Network { http_method: "GET".into() },
        ));
        set.insert(ImageRecord::from_dom("https://a.test/x.png", DiscoveryMethod::ImgTag));
        let only = set.iter().next().unwrap();
        assert_eq!(only.content_type, "image/png");
        assert_eq!(only.method.tag(), "GET");
    }

    #[test]
    fn keeps_discovery_order() {
        let mut set = ImageSet::new();
        set.extend(
            ["c", "a", "b", "a"]
                .iter()
                .map(|u| ImageRecord::from_dom(*u, DiscoveryMethod::Background)),
        );
        let urls: Vec<_> = set.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["c", "a", "b"]);
        assert!(set.contains("b"));
        assert!(!set.contains("d"));
    }

    #[test]
    fn record_serializes_with_sidecar_field_names() {
        let rec = ImageRecord::new("data:image/png;base64,AA==", "image/png", DiscoveryMethod::Canvas);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["url"], "data:image/png;base64,AA==");
        assert_eq!(json["type"], "image/png");
        assert_eq!(json["method"], "canvas");
    }
}
