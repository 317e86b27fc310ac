//! `image_urls.json` sidecar: every discovered URL with its metadata.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::record::ImageRecord;
use crate::storage;

pub const MANIFEST_FILE_NAME: &str = "image_urls.json";

/// Writes the records, in discovery order, as a pretty-printed JSON array of
/// `{ "url", "type", "method" }` objects. Returns the file path.
pub fn write_manifest(records: &[ImageRecord], out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join(MANIFEST_FILE_NAME);
    let json = serde_json::to_string_pretty(records).context("serialize image list")?;
    storage::write_atomic(&path, json.as_bytes())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DiscoveryMethod;

    #[test]
    fn manifest_layout() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            ImageRecord::new(
                "https://s3.test/a",
                "image/webp",
                DiscoveryMethod::Network { http_method: "GET".into() },
            ),
            ImageRecord::from_dom("https://s3.test/b.png", DiscoveryMethod::Srcset),
        ];
        let path = write_manifest(&records, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("image_urls.json"));

        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            v,
            serde_json::json!([
                { "url": "https://s3.test/a", "type": "image/webp", "method": "GET" },
                { "url": "https://s3.test/b.png", "type": "image/unknown", "method": "img_srcset" }
            ])
        );
    }

    #[test]
    fn empty_list_is_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(&[], dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
    }
}
