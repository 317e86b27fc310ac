//! Output directory and file lifecycle.
//!
//! Every file is written to a `.part` sibling first and renamed into place,
//! so an interrupted run never leaves a truncated image under its final name.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a.png` → `a.png.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Creates the output directory (and parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create output dir {}", dir.display()))
}

/// Writes `bytes` to `final_path` via a temp file and rename.
pub fn write_atomic(final_path: &Path, bytes: &[u8]) -> Result<()> {
    let tp = temp_path(final_path);
    let mut f = fs::File::create(&tp).with_context(|| format!("create {}", tp.display()))?;
    f.write_all(bytes)
        .with_context(|| format!("write {}", tp.display()))?;
    f.sync_all().ok();
    drop(f);
    if let Err(e) = fs::rename(&tp, final_path) {
        let _ = fs::remove_file(&tp);
        return Err(e)
            .with_context(|| format!("rename {} -> {}", tp.display(), final_path.display()));
    }
    Ok(())
}

/// First free path for `filename` in `dir`: `name.ext`, then `name_1.ext`,
/// `name_2.ext`, ...
pub fn unique_path(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }
    let (stem, ext) = split_extension(filename);
    let mut counter = 1u32;
    loop {
        let p = dir.join(format!("{stem}_{counter}{ext}"));
        if !p.exists() {
            return p;
        }
        counter += 1;
    }
}

/// Splits `name.ext` into (`name`, `.ext`). A leading dot is not an extension.
fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(i) if i > 0 => filename.split_at(i),
        _ => (filename, ""),
    }
}
