//! Linux-safe filename sanitization.

/// Maximum filename length on Linux (NAME_MAX).
const NAME_MAX: usize = 255;

/// Sanitizes a candidate filename for safe use on Linux.
///
/// - Replaces NUL, `/`, `\`, whitespace, and control characters with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing spaces, dots, and underscores
/// - Limits length to 255 bytes
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let mapped = if matches!(c, '\0' | '/' | '\\' | ' ' | '\t') || c.is_control() {
            '_'
        } else {
            c
        };
        if mapped == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(mapped);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '\t' || c == '.' || c == '_');

    let mut take = trimmed.len().min(NAME_MAX);
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
