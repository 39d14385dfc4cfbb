//! Filename extraction from URL path.

/// Extracts the last non-empty path segment of a URL, exactly as it appears
/// in the URL (still percent-encoded). This form is what checksum files are
/// matched against.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Percent-decode a path segment for display/storage purposes. Malformed
/// escapes are passed through untouched; non-UTF-8 bytes are replaced.
pub(super) fn percent_decode(input: &str) -> String {
    let mut out = Vec::new();
    let mut bytes = input.as_bytes().iter().cloned();
    while let Some(b) = bytes.next() {
        if b == b'%' {
            let h = bytes.next();
            let l = bytes.next();
            match (h.and_then(hex_digit), l.and_then(hex_digit)) {
                (Some(high), Some(low)) => out.push(high << 4 | low),
                _ => {
                    out.push(b'%');
                    out.extend(h);
                    out.extend(l);
                }
            }
        } else {
            out.push(b);
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
