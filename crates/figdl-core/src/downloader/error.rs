//! Per-item download failure, classified so the run can count skips apart
//! from real failures.

use thiserror::Error;

use crate::data_url::DataUrlError;
use crate::fetch::FetchError;

#[derive(Debug, Error)]
pub enum ItemError {
    /// URL kind that cannot be fetched outside the page (blob:, chrome-extension:).
    #[error("skipping {kind} URL")]
    Skipped { kind: &'static str },
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("bad data URL: {0}")]
    DataUrl(#[from] DataUrlError),
    /// Write to the output directory failed.
    #[error("storage: {0:#}")]
    Storage(anyhow::Error),
}

impl ItemError {
    pub fn is_skip(&self) -> bool {
        matches!(self, ItemError::Skipped { .. })
    }
}
