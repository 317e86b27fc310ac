//! Sequential image downloader.
//!
//! Walks the discovered records in order, one blocking transfer at a time
//! with a fixed pause between items. Each item either lands in the output
//! directory or is logged and counted; no item failure aborts the run.

mod error;
mod naming;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::content_type::extension_for;
use crate::data_url::decode_data_url;
use crate::fetch::HttpGet;
use crate::record::ImageRecord;
use crate::storage;
use crate::strategy::{NamingScheme, Strategy};
use crate::url_model::{classify_scheme, UrlScheme};

pub use error::ItemError;
pub use naming::file_name_for;

/// Per-item progress, sent to the caller as it happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent {
    Saved {
        index: usize,
        file_name: String,
        method: String,
        from_canvas: bool,
    },
    Skipped {
        index: usize,
        url: String,
    },
    Failed {
        index: usize,
        url: String,
        error: String,
    },
}

/// A file written by the downloader.
#[derive(Debug, Clone)]
pub struct SavedFile {
    /// 1-based position in discovery order.
    pub index: usize,
    pub url: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Outcome counts for one download phase.
#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    pub attempted: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub files: Vec<SavedFile>,
}

/// Settings for one download phase.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub strategy: Strategy,
    /// Pause between two consecutive items.
    pub delay: Duration,
}

/// Downloads every record into `out_dir`, in order.
///
/// Runs in the current thread and sleeps between items; call from
/// `spawn_blocking` if used from async code. If `events` is `Some`, one
/// [`DownloadEvent`] is sent per item.
pub fn download_all(
    records: &[ImageRecord],
    out_dir: &Path,
    http: &dyn HttpGet,
    opts: &DownloadOptions,
    events: Option<&tokio::sync::mpsc::UnboundedSender<DownloadEvent>>,
) -> DownloadReport {
    let mut report = DownloadReport {
        attempted: records.len(),
        ..Default::default()
    };
    let emit = |ev: DownloadEvent| {
        if let Some(tx) = events {
            let _ = tx.send(ev);
        }
    };

    for (i, record) in records.iter().enumerate() {
        let index = i + 1;
        if i > 0 && !opts.delay.is_zero() {
            std::thread::sleep(opts.delay);
        }

        match download_one(index, record, out_dir, http, opts.strategy) {
            Ok(saved) => {
                tracing::info!(
                    index,
                    url = %truncate_url(&record.url),
                    path = %saved.path.display(),
                    bytes = saved.bytes,
                    method = record.method.tag(),
                    "saved image"
                );
                let file_name = saved
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                emit(DownloadEvent::Saved {
                    index,
                    file_name,
                    method: record.method.tag().to_string(),
                    from_canvas: classify_scheme(&record.url) == UrlScheme::Data,
                });
                report.downloaded += 1;
                report.files.push(saved);
            }
            Err(e) if e.is_skip() => {
                tracing::info!(index, url = %truncate_url(&record.url), "{}", e);
                emit(DownloadEvent::Skipped {
                    index,
                    url: record.url.clone(),
                });
                report.skipped += 1;
            }
            Err(e) => {
                tracing::warn!(index, url = %truncate_url(&record.url), "download failed: {}", e);
                emit(DownloadEvent::Failed {
                    index,
                    url: record.url.clone(),
                    error: e.to_string(),
                });
                report.failed += 1;
            }
        }
    }

    report
}

/// Fetches or decodes one record and writes it to `out_dir`.
fn download_one(
    index: usize,
    record: &ImageRecord,
    out_dir: &Path,
    http: &dyn HttpGet,
    strategy: Strategy,
) -> Result<SavedFile, ItemError> {
    let scheme = classify_scheme(&record.url);
    let (bytes, extension) = match scheme {
        UrlScheme::Data => {
            let decoded = decode_data_url(&record.url)?;
            (decoded.bytes, decoded.extension)
        }
        UrlScheme::Blob if strategy.skips_opaque_urls() => {
            return Err(ItemError::Skipped { kind: "blob" })
        }
        UrlScheme::Extension if strategy.skips_opaque_urls() => {
            return Err(ItemError::Skipped { kind: "extension" })
        }
        _ => {
            let fetched = http.get(&record.url)?;
            let ext = extension_for(fetched.content_type(), &record.url, strategy);
            (fetched.body, ext)
        }
    };

    let naming = strategy.naming();
    let name = file_name_for(naming, index, &record.url, &extension, scheme == UrlScheme::Data);
    let path = match naming {
        NamingScheme::UrlBasename => storage::unique_path(out_dir, &name),
        NamingScheme::Indexed | NamingScheme::IndexedWithCanvas => out_dir.join(&name),
    };
    storage::write_atomic(&path, &bytes).map_err(ItemError::Storage)?;

    Ok(SavedFile {
        index,
        url: record.url.clone(),
        path,
        bytes: bytes.len() as u64,
    })
}

/// Shortens `url` for log lines and console output; canvas data URLs run to
/// megabytes.
pub fn truncate_url(url: &str) -> String {
    const MAX: usize = 120;
    if url.len() <= MAX {
        return url.to_string();
    }
    let mut end = MAX;
    while !url.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} bytes)", &url[..end], url.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchError, Fetched, ResponseHead};
    use crate::record::DiscoveryMethod;
    use std::collections::HashMap;

    /// Serves canned bodies; unknown URLs get HTTP 404.
    struct FakeHttp(HashMap<String, (&'static str, Vec<u8>)>);

    impl FakeHttp {
        fn new(entries: &[(&str, &'static str, &[u8])]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(u, ct, b)| (u.to_string(), (*ct, b.to_vec())))
                    .collect(),
            )
        }
    }

    impl HttpGet for FakeHttp {
        fn get(&self, url: &str) -> Result<Fetched, FetchError> {
            match self.0.get(url) {
                Some((ct, body)) => Ok(Fetched {
                    head: ResponseHead {
                        status: 200,
                        content_type: Some(ct.to_string()),
                        ..Default::default()
                    },
                    body: body.clone(),
                }),
                None => Err(FetchError::Http {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }

    fn opts(strategy: Strategy) -> DownloadOptions {
        DownloadOptions {
            strategy,
            delay: Duration::ZERO,
        }
    }

    fn dom(url: &str) -> ImageRecord {
        ImageRecord::from_dom(url, DiscoveryMethod::ImgTag)
    }

    #[test]
    fn scrape_names_by_basename_and_avoids_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let http = FakeHttp::new(&[
            ("https://a.test/x/logo.png", "image/png", b"one"),
            ("https://b.test/y/logo.png", "image/png", b"two"),
            ("https://a.test/blob/abc123", "image/gif", b"three"),
        ]);
        let records = vec![
            dom("https://a.test/x/logo.png"),
            dom("https://b.test/y/logo.png"),
            dom("https://a.test/blob/abc123"),
        ];
        let report = download_all(&records, dir.path(), &http, &opts(Strategy::Scrape), None);
        assert_eq!(report.downloaded, 3);
        assert_eq!(std::fs::read(dir.path().join("logo.png")).unwrap(), b"one");
        assert_eq!(std::fs::read(dir.path().join("logo_1.png")).unwrap(), b"two");
        assert_eq!(std::fs::read(dir.path().join("image_003.gif")).unwrap(), b"three");
    }

    #[test]
    fn failures_are_counted_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let http = FakeHttp::new(&[("https://a.test/ok.png", "image/png", b"ok")]);
        let records = vec![dom("https://a.test/missing.png"), dom("https://a.test/ok.png")];
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let report = download_all(&records, dir.path(), &http, &opts(Strategy::Sniff), Some(&tx));
        assert_eq!(report.attempted, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.downloaded, 1);
        assert!(dir.path().join("figma_image_002.png").exists());

        match rx.try_recv().unwrap() {
            DownloadEvent::Failed { index, error, .. } => {
                assert_eq!(index, 1);
                assert!(error.contains("404"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(matches!(rx.try_recv().unwrap(), DownloadEvent::Saved { index: 2, .. }));
    }

    #[test]
    fn extract_decodes_canvas_and_skips_blob() {
        let dir = tempfile::tempdir().unwrap();
        let http = FakeHttp::new(&[]);
        let records = vec![
            ImageRecord::new("data:image/png;base64,aGVsbG8=", "image/png", DiscoveryMethod::Canvas),
            dom("blob:https://www.figma.com/0b1c"),
            dom("chrome-extension://abc/icon.png"),
            ImageRecord::new("data:image/png;base64,***", "image/png", DiscoveryMethod::Canvas),
        ];
        let report = download_all(&records, dir.path(), &http, &opts(Strategy::Extract), None);
        assert_eq!(report.downloaded, 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(
            std::fs::read(dir.path().join("figma_canvas_001.png")).unwrap(),
            b"hello"
        );
    }

    #[test]
    fn delay_only_between_items() {
        let dir = tempfile::tempdir().unwrap();
        let http = FakeHttp::new(&[]);
        let canvas = |b64: &str| {
            ImageRecord::new(format!("data:image/png;base64,{b64}"), "image/png", DiscoveryMethod::Canvas)
        };
        let records = vec![canvas("YQ=="), canvas("Yg=="), canvas("Yw==")];
        let opts = DownloadOptions {
            strategy: Strategy::Extract,
            delay: Duration::from_millis(80),
        };
        let start = std::time::Instant::now();
        let report = download_all(&records, dir.path(), &http, &opts, None);
        let elapsed = start.elapsed();
        assert_eq!(report.downloaded, 3);
        // Two gaps for three items; a third sleep would push it past 240 ms.
        assert!(elapsed >= Duration::from_millis(160), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(240), "{elapsed:?}");
    }

    #[test]
    fn sniff_fetches_blob_urls_like_any_other() {
        let dir = tempfile::tempdir().unwrap();
        let http = FakeHttp::new(&[]);
        let records = vec![dom("blob:https://www.figma.com/0b1c")];
        let report = download_all(&records, dir.path(), &http, &opts(Strategy::Sniff), None);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn truncate_url_keeps_short_urls() {
        assert_eq!(truncate_url("https://a.test/x.png"), "https://a.test/x.png");
        let long = format!("data:image/png;base64,{}", "A".repeat(500));
        let t = truncate_url(&long);
        assert!(t.len() < 200);
        assert!(t.ends_with("bytes)"));
    }
}
