//! The three discovery strategies and the per-strategy knobs that go with them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Discovery technique, from lightest to heaviest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Plain HTTP fetch and static HTML scraping.
    Scrape,
    /// Headless browser; sniff image requests, read `<img>` and canvases.
    Sniff,
    /// Headless browser; capture image responses, full DOM/canvas/SVG extraction.
    Extract,
}

/// How downloaded files are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingScheme {
    /// URL basename when it has an extension, else `image_NNN.ext`; collisions get `_N`.
    UrlBasename,
    /// `figma_image_NNN.ext` for everything.
    Indexed,
    /// Like `Indexed`, but data URLs become `figma_canvas_NNN.ext`.
    IndexedWithCanvas,
}

impl Strategy {
    pub fn uses_browser(self) -> bool {
        !matches!(self, Strategy::Scrape)
    }

    /// Fixed pause between two consecutive downloads.
    pub fn default_delay(self) -> Duration {
        match self {
            Strategy::Scrape => Duration::from_millis(500),
            Strategy::Sniff => Duration::from_millis(200),
            Strategy::Extract => Duration::from_millis(100),
        }
    }

    pub fn naming(self) -> NamingScheme {
        match self {
            Strategy::Scrape => NamingScheme::UrlBasename,
            Strategy::Sniff => NamingScheme::Indexed,
            Strategy::Extract => NamingScheme::IndexedWithCanvas,
        }
    }

    /// Extension used when the response content type matches nothing known.
    pub fn default_extension(self) -> &'static str {
        match self {
            Strategy::Scrape => ".jpg",
            Strategy::Sniff | Strategy::Extract => ".png",
        }
    }

    /// `blob:` and `chrome-extension:` URLs are skipped instead of fetched.
    pub fn skips_opaque_urls(self) -> bool {
        matches!(self, Strategy::Extract)
    }

    /// `application/octet-stream` responses take their extension from the URL path.
    pub fn sniffs_octet_stream(self) -> bool {
        matches!(self, Strategy::Extract)
    }

    /// Scroll to the bottom after load and settle again before extracting.
    pub fn scrolls(self) -> bool {
        matches!(self, Strategy::Extract)
    }

    pub fn saves_svgs(self) -> bool {
        matches!(self, Strategy::Extract)
    }

    pub fn writes_sidecar(self) -> bool {
        matches!(self, Strategy::Extract)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strategy::Scrape => "scrape",
            Strategy::Sniff => "sniff",
            Strategy::Extract => "extract",
        };
        f.write_str(s)
    }
}
