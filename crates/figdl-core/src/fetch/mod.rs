//! Blocking HTTP GET for the page and for individual images.
//!
//! Uses the curl crate (libcurl). Every request carries a desktop-browser
//! User-Agent, follows redirects and is bounded by a single overall timeout.
//! Runs in the current thread; call from `spawn_blocking` if used from async
//! code.

mod parse;

use anyhow::{Context, Result};
use std::str;
use std::time::Duration;
use thiserror::Error;

pub use parse::ResponseHead;

/// Per-request settings shared by page and image fetches.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub user_agent: String,
    pub timeout: Duration,
}

/// Why a single fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Curl(#[from] curl::Error),
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },
}

/// A successful GET: final headers plus body.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub head: ResponseHead,
    pub body: Vec<u8>,
}

impl Fetched {
    /// `Content-Type` of the final response, or empty.
    pub fn content_type(&self) -> &str {
        self.head.content_type.as_deref().unwrap_or("")
    }
}

/// The fetched HTML page.
#[derive(Debug, Clone)]
pub struct Page {
    /// URL after redirects; used as the base for root-relative candidates.
    pub final_url: String,
    pub content_type: Option<String>,
    pub html: String,
}

/// Something that can GET a URL. The downloader only depends on this trait;
/// [`RequestOptions`] is the curl-backed implementation.
pub trait HttpGet {
    fn get(&self, url: &str) -> Result<Fetched, FetchError>;
}

impl HttpGet for RequestOptions {
    fn get(&self, url: &str) -> Result<Fetched, FetchError> {
        fetch_bytes(url, self)
    }
}

/// Performs a GET and returns the body. Non-2xx responses are errors.
pub fn fetch_bytes(url: &str, opts: &RequestOptions) -> Result<Fetched, FetchError> {
    let mut header_lines: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.useragent(&opts.user_agent)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.accept_encoding("")?;
    easy.connect_timeout(opts.timeout.min(Duration::from_secs(15)))?;
    easy.timeout(opts.timeout)?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                header_lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        return Err(FetchError::Http {
            url: url.to_string(),
            status,
        });
    }

    let mut head = parse::parse_headers(&header_lines);
    head.status = status;
    head.effective_url = easy.effective_url()?.map(String::from);
    Ok(Fetched { head, body })
}

/// Fetches the page HTML. Any failure here aborts a scrape run.
pub fn fetch_page(url: &str, opts: &RequestOptions) -> Result<Page> {
    let fetched = fetch_bytes(url, opts).with_context(|| format!("fetch page {url}"))?;
    let final_url = fetched
        .head
        .effective_url
        .clone()
        .unwrap_or_else(|| url.to_string());
    let html = String::from_utf8_lossy(&fetched.body).into_owned();
    tracing::debug!(
        url = %final_url,
        bytes = fetched.body.len(),
        content_type = fetched.content_type(),
        "fetched page"
    );
    Ok(Page {
        final_url,
        content_type: fetched.head.content_type,
        html,
    })
}
