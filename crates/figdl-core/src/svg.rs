//! Inline SVG export (extract strategy).

use std::path::{Path, PathBuf};

use crate::storage;

/// Writes each SVG's markup to `figma_svg_NNN.svg` (1-based) in `out_dir`.
///
/// Empty markup is ignored; write failures are logged and skipped. Returns
/// the paths written.
pub fn save_svgs(svgs: &[String], out_dir: &Path) -> Vec<PathBuf> {
    let mut written = Vec::new();
    for (i, markup) in svgs.iter().enumerate() {
        if markup.trim().is_empty() {
            continue;
        }
        let path = out_dir.join(format!("figma_svg_{:03}.svg", i + 1));
        match storage::write_atomic(&path, markup.as_bytes()) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "saved svg");
                written.push(path);
            }
            Err(e) => tracing::warn!("could not save svg {}: {:#}", i + 1, e),
        }
    }
    written
}
