//! Output filenames for downloaded items.

use crate::strategy::NamingScheme;
use crate::url_model::{filename_from_url_path, sanitize_filename};

/// Chooses the filename for the `index`-th (1-based) item.
///
/// `extension` includes the leading dot. Collision handling is up to the
/// caller (see [`crate::storage::unique_path`]).
pub fn file_name_for(
    scheme: NamingScheme,
    index: usize,
    url: &str,
    extension: &str,
    is_data_url: bool,
) -> String {
    match scheme {
        NamingScheme::UrlBasename => {
            let basename = if is_data_url {
                None
            } else {
                filename_from_url_path(url).map(|n| sanitize_filename(&n))
            };
            match basename {
                Some(name) if name.contains('.') => name,
                _ => format!("image_{index:03}{extension}"),
            }
        }
        NamingScheme::Indexed => format!("figma_image_{index:03}{extension}"),
        NamingScheme::IndexedWithCanvas if is_data_url => {
            format!("figma_canvas_{index:03}{extension}")
        }
        NamingScheme::IndexedWithCanvas => format!("figma_image_{index:03}{extension}"),
    }
}
