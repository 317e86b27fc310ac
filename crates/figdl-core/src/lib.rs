pub mod config;
pub mod logging;

pub mod browser;
pub mod content_type;
pub mod data_url;
pub mod discover;
pub mod downloader;
pub mod fetch;
pub mod manifest;
pub mod pipeline;
pub mod record;
pub mod storage;
pub mod strategy;
pub mod svg;
pub mod url_model;
