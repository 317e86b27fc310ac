//! Page-side JavaScript. Every script is a self-invoking expression that
//! returns a JSON string, decoded on the Rust side.

/// `[{src, dataSrc, srcset}]` for every `<img>`.
pub const IMG_ATTRIBUTES: &str = r#"(() => JSON.stringify(
  Array.from(document.querySelectorAll('img')).map(img => ({
    src: img.getAttribute('src'),
    dataSrc: img.getAttribute('data-src'),
    srcset: img.getAttribute('srcset'),
  }))
))()"#;

/// Computed `background-image` of every element, `none` excluded.
pub const BACKGROUND_IMAGES: &str = r#"(() => {
  const out = [];
  document.querySelectorAll('*').forEach(el => {
    const bg = window.getComputedStyle(el).backgroundImage;
    if (bg && bg !== 'none') out.push(bg);
  });
  return JSON.stringify(out);
})()"#;

/// `toDataURL('image/png')` of every readable canvas. Tainted canvases throw
/// and are left out.
pub const CANVAS_DATA_URLS: &str = r#"(() => {
  const out = [];
  document.querySelectorAll('canvas').forEach(canvas => {
    try {
      const url = canvas.toDataURL('image/png');
      if (url && url.startsWith('data:image')) out.push(url);
    } catch (e) {}
  });
  return JSON.stringify(out);
})()"#;

/// `outerHTML` of every `<svg>`.
pub const SVG_MARKUP: &str = r#"(() => JSON.stringify(
  Array.from(document.querySelectorAll('svg')).map(el => el.outerHTML)
))()"#;

pub const SCROLL_TO_BOTTOM: &str =
    "(() => { window.scrollTo(0, document.body ? document.body.scrollHeight : 0); return '0'; })()";
