//! Headless Chromium session (chromiumoxide) that renders the prototype and
//! captures a [`PageSnapshot`].
//!
//! Network listeners are attached before navigation so every image request
//! the page makes is seen. DOM extraction runs after the page has gone
//! network-idle and settled. The session is closed before any download.

mod network;
mod scripts;

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{EventRequestWillBeSent, EventResponseReceived};
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

use crate::config::FigdlConfig;
use crate::discover::{ImgAttributes, NetworkRequest, PageSnapshot};
use crate::strategy::Strategy;
use network::{resource_type_name, NetworkLog, SharedLog};

/// Environment override for the browser binary.
pub const CHROMIUM_PATH_ENV: &str = "FIGDL_CHROMIUM_PATH";

/// Quiet period with no network events that counts as "network idle".
const NETWORK_IDLE: Duration = Duration::from_millis(500);
const IDLE_POLL: Duration = Duration::from_millis(100);

const WINDOW_WIDTH: u32 = 1920;
const WINDOW_HEIGHT: u32 = 1080;

/// Find the Chromium binary: explicit path, `FIGDL_CHROMIUM_PATH`, then PATH.
pub fn find_chromium(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        if p.exists() {
            return Some(p.to_path_buf());
        }
        tracing::warn!("configured chromium_path {} does not exist", p.display());
    }

    if let Ok(p) = std::env::var(CHROMIUM_PATH_ENV) {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    ["google-chrome", "google-chrome-stable", "chromium", "chromium-browser"]
        .iter()
        .find_map(|name| which::which(name).ok())
}

/// What to capture and how long to wait, derived from strategy and config.
#[derive(Debug, Clone)]
pub struct CapturePlan {
    pub navigation_timeout: Duration,
    /// Fixed wait after network idle.
    pub settle: Duration,
    /// Scroll to the bottom and wait this long (extract only).
    pub scroll_settle: Option<Duration>,
    pub backgrounds: bool,
    pub svgs: bool,
}

impl CapturePlan {
    pub fn for_strategy(strategy: Strategy, cfg: &FigdlConfig) -> Self {
        Self {
            navigation_timeout: Duration::from_secs(cfg.navigation_timeout_secs),
            settle: Duration::from_secs(cfg.settle_secs),
            scroll_settle: strategy
                .scrolls()
                .then(|| Duration::from_secs(cfg.scroll_settle_secs)),
            backgrounds: matches!(strategy, Strategy::Extract),
            svgs: strategy.saves_svgs(),
        }
    }
}

/// Result of one capture. Navigation errors do not discard what the network
/// listeners already saw.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    pub snapshot: PageSnapshot,
    pub navigation_error: Option<String>,
}

/// A running headless browser.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch headless Chromium with the configured User-Agent and a
    /// 1920×1080 window.
    pub async fn launch(cfg: &FigdlConfig) -> Result<Self> {
        let chrome_path = find_chromium(cfg.chromium_path.as_deref()).with_context(|| {
            format!("Chromium not found; install it or set {CHROMIUM_PATH_ENV}")
        })?;
        tracing::info!(path = %chrome_path.display(), "launching headless chromium");

        let config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .window_size(WINDOW_WIDTH, WINDOW_HEIGHT)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg(format!("--user-agent={}", cfg.user_agent))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("cdp handler: {e}");
                }
            }
        });

        Ok(Self { browser, handler })
    }

    /// Open `url` in a fresh tab and capture everything `plan` asks for.
    pub async fn capture(&self, url: &str, plan: &CapturePlan) -> Result<Capture> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("failed to create new page")?;

        let log = NetworkLog::shared();
        let listeners = spawn_network_listeners(&page, &log).await?;

        tracing::info!(url, "navigating");
        // One budget covers both the load and the wait for network idle.
        let deadline = Instant::now() + plan.navigation_timeout;
        let navigation_error = match tokio::time::timeout_at(deadline.into(), page.goto(url)).await {
            Ok(Ok(_)) => {
                wait_for_network_idle(&log, deadline).await;
                tracing::debug!("page loaded, settling for {:?}", plan.settle);
                tokio::time::sleep(plan.settle).await;
                None
            }
            Ok(Err(e)) => Some(format!("navigation failed: {e}")),
            Err(_) => Some(format!(
                "navigation timed out after {}s",
                plan.navigation_timeout.as_secs()
            )),
        };

        let mut snapshot = PageSnapshot::default();
        if let Some(err) = &navigation_error {
            tracing::warn!("{err}; keeping network capture only");
        } else {
            if let Some(wait) = plan.scroll_settle {
                if let Err(e) = eval_json::<String>(&page, scripts::SCROLL_TO_BOTTOM).await {
                    tracing::warn!("scroll failed: {e:#}");
                }
                tokio::time::sleep(wait).await;
            }
            extract_dom(&page, plan, &mut snapshot).await;
        }

        for l in listeners {
            l.abort();
        }
        let (requests, responses) = log
            .lock()
            .map(|mut l| l.take())
            .unwrap_or_default();
        snapshot.requests = requests;
        snapshot.responses = responses;

        if let Err(e) = page.close().await {
            tracing::debug!("closing page: {e}");
        }

        tracing::info!(
            requests = snapshot.requests.len(),
            responses = snapshot.responses.len(),
            images = snapshot.images.len(),
            canvases = snapshot.canvases.len(),
            svgs = snapshot.svgs.len(),
            "capture finished"
        );
        Ok(Capture {
            snapshot,
            navigation_error,
        })
    }

    /// Close the browser and stop the CDP handler task.
    pub async fn close(mut self) -> Result<()> {
        let res = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.handler.abort();
        res.map(|_| ()).context("failed to close Chromium")
    }
}

async fn spawn_network_listeners(page: &Page, log: &SharedLog) -> Result<Vec<JoinHandle<()>>> {
    let mut requests = page
        .event_listener::<EventRequestWillBeSent>()
        .await
        .context("subscribe to requests")?;
    let mut responses = page
        .event_listener::<EventResponseReceived>()
        .await
        .context("subscribe to responses")?;

    let req_log = log.clone();
    let req_task = tokio::spawn(async move {
        while let Some(ev) = requests.next().await {
            let resource_type = ev
                .r#type
                .as_ref()
                .map(|t| resource_type_name(t.as_ref()))
                .unwrap_or_default();
            let req = NetworkRequest {
                url: ev.request.url.clone(),
                resource_type,
                method: ev.request.method.clone(),
            };
            if let Ok(mut l) = req_log.lock() {
                l.record_request(ev.request_id.inner().clone(), req);
            }
        }
    });

    let resp_log = log.clone();
    let resp_task = tokio::spawn(async move {
        while let Some(ev) = responses.next().await {
            let resource_type = resource_type_name(ev.r#type.as_ref());
            if let Ok(mut l) = resp_log.lock() {
                l.record_response(
                    ev.request_id.inner(),
                    ev.response.url.clone(),
                    resource_type,
                    ev.response.mime_type.clone(),
                );
            }
        }
    });

    Ok(vec![req_task, resp_task])
}

/// Waits until no network event has arrived for `NETWORK_IDLE`, or `deadline` passes.
async fn wait_for_network_idle(log: &SharedLog, deadline: Instant) {
    loop {
        let idle = log.lock().map(|l| l.idle_for()).unwrap_or(NETWORK_IDLE);
        if idle >= NETWORK_IDLE {
            return;
        }
        if Instant::now() >= deadline {
            tracing::debug!("network never went idle; continuing");
            return;
        }
        tokio::time::sleep(IDLE_POLL).await;
    }
}

/// Runs the DOM queries. A failing query is logged and leaves its field empty.
async fn extract_dom(page: &Page, plan: &CapturePlan, snapshot: &mut PageSnapshot) {
    match eval_json::<Vec<ImgAttributes>>(page, scripts::IMG_ATTRIBUTES).await {
        Ok(v) => snapshot.images = v,
        Err(e) => tracing::warn!("img extraction failed: {e:#}"),
    }
    if plan.backgrounds {
        match eval_json::<Vec<String>>(page, scripts::BACKGROUND_IMAGES).await {
            Ok(v) => snapshot.backgrounds = v,
            Err(e) => tracing::warn!("background extraction failed: {e:#}"),
        }
    }
    match eval_json::<Vec<String>>(page, scripts::CANVAS_DATA_URLS).await {
        Ok(v) => snapshot.canvases = v,
        Err(e) => tracing::warn!("canvas extraction failed: {e:#}"),
    }
    if plan.svgs {
        match eval_json::<Vec<String>>(page, scripts::SVG_MARKUP).await {
            Ok(v) => snapshot.svgs = v,
            Err(e) => tracing::warn!("svg extraction failed: {e:#}"),
        }
    }
}

/// Evaluates a script that returns a JSON string and decodes it.
async fn eval_json<T: DeserializeOwned>(page: &Page, script: &str) -> Result<T> {
    let result = page
        .evaluate(script)
        .await
        .context("JS execution failed")?;
    let json: String = result
        .into_value()
        .map_err(|e| anyhow::anyhow!("failed to convert JS result: {e:?}"))?;
    serde_json::from_str(&json).context("decode JS result")
}
