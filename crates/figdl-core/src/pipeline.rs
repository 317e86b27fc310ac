//! The three run stages: discover → download → extras (SVGs, sidecar).
//!
//! The CLI drives these one after another and reports between them.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::browser::{BrowserSession, CapturePlan};
use crate::config::FigdlConfig;
use crate::discover::{discover_extract, discover_sniff, discover_static};
use crate::downloader::{download_all, DownloadEvent, DownloadOptions, DownloadReport};
use crate::fetch::{fetch_page, HttpGet};
use crate::manifest::write_manifest;
use crate::record::{ImageRecord, ImageSet};
use crate::storage;
use crate::strategy::Strategy;
use crate::svg::save_svgs;

/// Everything found on the page, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub records: Vec<ImageRecord>,
    /// Inline SVG markup (extract only).
    pub svgs: Vec<String>,
    /// Set when the browser navigation failed and only network capture is available.
    pub navigation_error: Option<String>,
}

impl Discovery {
    /// A scrape that found nothing: the page is rendered by JavaScript and
    /// the run should stop before touching the output directory.
    pub fn needs_browser(&self, strategy: Strategy) -> bool {
        strategy == Strategy::Scrape && self.records.is_empty()
    }
}

/// Files written after the download phase.
#[derive(Debug, Clone, Default)]
pub struct Extras {
    pub svgs: Vec<PathBuf>,
    pub manifest: Option<PathBuf>,
}

/// Discovers image candidates at `url` with `strategy`.
///
/// Scrape: a failed page fetch is an error and ends the run. Browser
/// strategies: failing to launch Chromium is an error; navigation problems are
/// reported in [`Discovery::navigation_error`] and the run goes on with what
/// was captured.
pub async fn discover(strategy: Strategy, url: &str, cfg: &FigdlConfig) -> Result<Discovery> {
    match strategy {
        Strategy::Scrape => {
            let opts = cfg.request_options();
            let target = url.to_string();
            let page = tokio::task::spawn_blocking(move || fetch_page(&target, &opts))
                .await
                .context("page fetch task panicked")??;
            let found = discover_static(&page.html, &page.final_url);
            Ok(Discovery {
                records: found.into_vec(),
                ..Default::default()
            })
        }
        Strategy::Sniff | Strategy::Extract => {
            let session = BrowserSession::launch(cfg).await?;
            let plan = CapturePlan::for_strategy(strategy, cfg);
            let captured = session.capture(url, &plan).await;
            if let Err(e) = session.close().await {
                tracing::warn!("{e:#}");
            }
            let capture = captured?;
            let found: ImageSet = match strategy {
                Strategy::Sniff => discover_sniff(&capture.snapshot),
                _ => discover_extract(&capture.snapshot),
            };
            Ok(Discovery {
                records: found.into_vec(),
                svgs: capture.snapshot.svgs,
                navigation_error: capture.navigation_error,
            })
        }
    }
}

/// Downloads `records` into `out_dir` (created on demand), sequentially.
///
/// Blocking; call from `spawn_blocking` if used from async code.
pub fn download(
    records: &[ImageRecord],
    out_dir: &Path,
    http: &dyn HttpGet,
    opts: &DownloadOptions,
    events: Option<&tokio::sync::mpsc::UnboundedSender<DownloadEvent>>,
) -> Result<DownloadReport> {
    storage::ensure_dir(out_dir)?;
    Ok(download_all(records, out_dir, http, opts, events))
}

/// Writes the extract strategy's SVG files and `image_urls.json`. No-op for
/// the other strategies.
pub fn write_extras(strategy: Strategy, discovery: &Discovery, out_dir: &Path) -> Result<Extras> {
    let mut extras = Extras::default();
    if !strategy.saves_svgs() && !strategy.writes_sidecar() {
        return Ok(extras);
    }
    storage::ensure_dir(out_dir)?;
    if strategy.saves_svgs() {
        extras.svgs = save_svgs(&discovery.svgs, out_dir);
    }
    if strategy.writes_sidecar() {
        extras.manifest = Some(write_manifest(&discovery.records, out_dir)?);
    }
    Ok(extras)
}
