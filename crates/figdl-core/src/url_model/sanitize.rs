//! Filesystem-safe filename sanitization.

/// Longest filename most Linux filesystems accept (NAME_MAX), in bytes.
const NAME_MAX: usize = 255;

/// Makes a URL-derived name safe to create inside the output directory.
///
/// Path separators, NUL, control characters and whitespace become `_`, runs
/// of `_` collapse to one, leading/trailing dots, spaces and underscores are
/// trimmed, and the result is cut to `NAME_MAX` bytes on a char boundary.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_underscore = false;

    for c in name.chars() {
        let unsafe_char = c == '/' || c == '\\' || c.is_control() || c.is_whitespace();
        let c = if unsafe_char { '_' } else { c };
        if c == '_' {
            if !last_was_underscore {
                out.push('_');
            }
            last_was_underscore = true;
        } else {
            out.push(c);
            last_was_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c: char| c == ' ' || c == '.' || c == '_');
    let mut end = trimmed.len().min(NAME_MAX);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}
