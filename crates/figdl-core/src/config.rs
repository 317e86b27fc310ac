use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::RequestOptions;
use crate::strategy::Strategy;

/// Prototype the tool was written for; used when no URL is configured or given.
pub const DEFAULT_SOURCE_URL: &str = "https://www.figma.com/proto/SvtNcyCmFhLaPRwENhxixT/%E4%B8%AD%E5%9B%BD%E5%A4%A7%E5%AD%A6%E7%9F%A2%E9%87%8F%E6%A0%A1%E5%BE%BD%E5%90%88%E9%9B%86--Community-?node-id=100-634&p=f&t=kLqYzMOxra36vpNG-0&scaling=min-zoom&content-scaling=fixed&page-id=0%3A217";

/// Desktop Chrome on macOS; Figma serves a stripped page to unknown agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Per-strategy pause between downloads (optional section in config.toml).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DelayConfig {
    #[serde(default)]
    pub scrape_ms: Option<u64>,
    #[serde(default)]
    pub sniff_ms: Option<u64>,
    #[serde(default)]
    pub extract_ms: Option<u64>,
}

/// Global configuration loaded from `~/.config/figdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigdlConfig {
    /// Page to harvest when no URL is given on the command line.
    pub source_url: String,
    /// Output directory; relative paths are taken from the current directory.
    pub output_dir: PathBuf,
    /// User-Agent for page fetches, image downloads and the browser.
    pub user_agent: String,
    /// Overall timeout for each HTTP request, in seconds.
    pub request_timeout_secs: u64,
    /// Navigation timeout for the browser strategies, in seconds.
    pub navigation_timeout_secs: u64,
    /// Extra wait after the page goes network-idle, for late rendering.
    pub settle_secs: u64,
    /// Wait after scrolling to the bottom (extract only).
    pub scroll_settle_secs: u64,
    /// Explicit Chromium/Chrome binary; searched on PATH when missing.
    #[serde(default)]
    pub chromium_path: Option<PathBuf>,
    /// Optional per-strategy download delays; built-in defaults otherwise.
    #[serde(default)]
    pub delays: Option<DelayConfig>,
}

impl Default for FigdlConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            output_dir: PathBuf::from("downloaded_images"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 30,
            navigation_timeout_secs: 60,
            settle_secs: 5,
            scroll_settle_secs: 2,
            chromium_path: None,
            delays: None,
        }
    }
}

impl FigdlConfig {
    pub fn request_options(&self) -> RequestOptions {
        RequestOptions {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    /// Configured delay for `strategy`, or the strategy's built-in default.
    pub fn delay_for(&self, strategy: Strategy) -> Duration {
        let ms = self.delays.as_ref().and_then(|d| match strategy {
            Strategy::Scrape => d.scrape_ms,
            Strategy::Sniff => d.sniff_ms,
            Strategy::Extract => d.extract_ms,
        });
        ms.map(Duration::from_millis)
            .unwrap_or_else(|| strategy.default_delay())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("figdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FigdlConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<FigdlConfig> {
    if !path.exists() {
        let default_cfg = FigdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: FigdlConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
