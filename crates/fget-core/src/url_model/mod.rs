//! URL modeling and filename derivation.
//!
//! The last URL path segment names the download twice over: exactly as-is for
//! checksum-file lookup, and percent-decoded plus sanitized when it becomes
//! the default local filename.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename;

/// Default filename when the URL path yields nothing usable.
const DEFAULT_FILENAME: &str = "download.bin";

/// Derives a safe local filename for saving a download: the last path segment
/// of `url`, percent-decoded and sanitized for Linux filesystems.
pub fn derive_filename(url: &str) -> String {
    let raw = match filename_from_url_path(url) {
        Some(c) => c,
        None => return DEFAULT_FILENAME.to_string(),
    };

    let sanitized = sanitize_filename(&path::percent_decode(&raw));
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_filename_from_url_path() {
        assert_eq!(derive_filename("https://example.com/archive.zip"), "archive.zip");
        assert_eq!(
            derive_filename("https://cdn.example.com/path/to/debian-12.iso"),
            "debian-12.iso"
        );
    }

    #[test]
    fn derive_filename_empty_url_path_fallback() {
        assert_eq!(derive_filename("https://example.com/"), "download.bin");
        assert_eq!(derive_filename("https://example.com"), "download.bin");
    }

    #[test]
    fn derive_filename_decodes_and_sanitizes() {
        assert_eq!(
            derive_filename("https://example.com/some%20file.tar.gz"),
            "some_file.tar.gz"
        );
    }

    #[test]
    fn derive_filename_reserved_names_fallback() {
        assert_eq!(derive_filename("https://example.com/."), "download.bin");
        assert_eq!(derive_filename("https://example.com/.."), "download.bin");
    }
}
