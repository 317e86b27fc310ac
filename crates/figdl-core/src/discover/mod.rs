//! Image candidate discovery.
//!
//! Static discovery works on fetched HTML; the browser strategies work on a
//! [`PageSnapshot`] captured by the browser session. Both are pure functions
//! returning an [`ImageSet`](crate::record::ImageSet) in discovery order.

mod css;
mod html;
mod snapshot;

pub use css::css_urls;
pub use html::discover_static;
pub use snapshot::{
    discover_extract, discover_sniff, parse_srcset, ImgAttributes, NetworkRequest, NetworkResponse,
    PageSnapshot,
};
