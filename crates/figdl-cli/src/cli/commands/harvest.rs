//! `figdl scrape|sniff|extract` – discover images on a page and download them.

use anyhow::{Context, Result};
use figdl_core::config::FigdlConfig;
use figdl_core::downloader::{truncate_url, DownloadEvent, DownloadOptions};
use figdl_core::pipeline;
use figdl_core::strategy::Strategy;
use std::time::Duration;

use crate::cli::HarvestArgs;

pub async fn run_harvest(strategy: Strategy, args: HarvestArgs, cfg: &FigdlConfig) -> Result<()> {
    let url = args.url.unwrap_or_else(|| cfg.source_url.clone());
    let out_dir = args.out_dir.unwrap_or_else(|| cfg.output_dir.clone());
    let delay = args
        .delay_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| cfg.delay_for(strategy));

    tracing::info!(%strategy, %url, out_dir = %out_dir.display(), "harvest start");
    if strategy.uses_browser() {
        println!("Starting headless browser...");
        println!("Loading page: {url}");
    } else {
        println!("Fetching page: {url}");
    }

    let discovery = pipeline::discover(strategy, &url, cfg).await?;
    if let Some(err) = &discovery.navigation_error {
        println!("Error loading page: {err}");
    }

    let found = discovery.records.len();
    println!("Found {found} image URLs");
    if discovery.needs_browser(strategy) {
        println!("No images found. Figma renders prototypes with JavaScript;");
        println!("try `figdl sniff` or `figdl extract` to load the page in a browser.");
        return Ok(());
    }

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<DownloadEvent>();
    let printer = tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            print_event(&ev);
        }
    });

    let records = discovery.records.clone();
    let dl_dir = out_dir.clone();
    let http = cfg.request_options();
    let opts = DownloadOptions { strategy, delay };
    let report = tokio::task::spawn_blocking(move || {
        pipeline::download(&records, &dl_dir, &http, &opts, Some(&tx))
    })
    .await
    .context("download task panicked")??;
    // Sender dropped with the blocking task; the printer drains and exits.
    let _ = printer.await;

    let extras = pipeline::write_extras(strategy, &discovery, &out_dir)?;
    for path in &extras.svgs {
        println!("Saved SVG: {}", path.display());
    }

    println!(
        "Downloaded {}/{} images to {}",
        report.downloaded,
        report.attempted,
        out_dir.display()
    );
    if report.skipped > 0 || report.failed > 0 {
        println!("  skipped: {}, failed: {}", report.skipped, report.failed);
    }
    if let Some(manifest) = &extras.manifest {
        println!("Saved URL list to {}", manifest.display());
    }
    tracing::info!(
        downloaded = report.downloaded,
        skipped = report.skipped,
        failed = report.failed,
        svgs = extras.svgs.len(),
        "harvest done"
    );
    Ok(())
}

fn print_event(ev: &DownloadEvent) {
    match ev {
        DownloadEvent::Saved {
            file_name,
            from_canvas: true,
            ..
        } => println!("Downloaded: {file_name} (from canvas)"),
        DownloadEvent::Saved {
            file_name, method, ..
        } => println!("Downloaded: {file_name} ({method})"),
        DownloadEvent::Skipped { url, .. } => {
            println!("Skipping non-downloadable URL: {}", truncate_url(url))
        }
        DownloadEvent::Failed { index, url, error } => {
            println!("Error downloading image {index} ({}): {error}", truncate_url(url))
        }
    }
}
