//! Checksum-file parsing and digest lookup.
//!
//! Two formats are accepted: a bare digest on its own, or one
//! `<digest> <filename>` pair per line (the layout `sha256sum` emits). Blank
//! lines and surrounding whitespace are ignored; digest case is normalized.

use super::ChecksumError;

/// One decoded checksum-file line: a digest with an optional filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumEntry {
    pub digest: String,
    pub filename: Option<String>,
}

/// Finds the expected digest for `target_filename` in raw checksum content.
///
/// Two-token lines are `(digest, filename)` entries; the first entry whose
/// filename matches wins. A one-token line is a bare digest, used only when
/// the content has no two-token entries at all. The returned digest is
/// lowercase.
pub fn resolve_expected_digest(
    raw: &str,
    target_filename: &str,
) -> Result<String, ChecksumError> {
    let entries = parse_entries(raw);

    let has_named = entries.iter().any(|e| e.filename.is_some());
    if has_named {
        for entry in &entries {
            if entry.filename.as_deref() == Some(target_filename) {
                return Ok(entry.digest.clone());
            }
        }
        return Err(ChecksumError::DigestNotFound(target_filename.to_string()));
    }

    match entries.first() {
        Some(bare) => Ok(bare.digest.clone()),
        None => Err(ChecksumError::DigestNotFound(target_filename.to_string())),
    }
}

fn parse_entries(raw: &str) -> Vec<ChecksumEntry> {
    let mut entries = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [digest] => entries.push(ChecksumEntry {
                digest: digest.to_ascii_lowercase(),
                filename: None,
            }),
            [digest, filename] => entries.push(ChecksumEntry {
                digest: digest.to_ascii_lowercase(),
                filename: Some((*filename).to_string()),
            }),
            // Anything else (e.g. BSD-style "MD5 (file) = digest") is not a
            // format we produce or consume.
            _ => {}
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST_A: &str = "9e107d9d372bb6826bd81d3542a419d6";
    const DIGEST_B: &str = "d41d8cd98f00b204e9800998ecf8427e";

    #[test]
    fn two_column_entry_matches_filename() {
        let raw = format!("{}  data.bin\n", DIGEST_A);
        assert_eq!(resolve_expected_digest(&raw, "data.bin").unwrap(), DIGEST_A);
    }

    #[test]
    fn two_column_entry_unrelated_filename_fails() {
        let raw = format!("{}  data.bin\n", DIGEST_A);
        let err = resolve_expected_digest(&raw, "other.bin").unwrap_err();
        assert!(matches!(err, ChecksumError::DigestNotFound(_)));
    }

    #[test]
    fn multi_line_selects_matching_entry() {
        let raw = format!(
            "{}  alpha.tar.gz\n{}  beta.tar.gz\n",
            DIGEST_A, DIGEST_B
        );
        assert_eq!(
            resolve_expected_digest(&raw, "beta.tar.gz").unwrap(),
            DIGEST_B
        );
    }

    #[test]
    fn first_match_wins_on_duplicates() {
        let raw = format!("{}  data.bin\n{}  data.bin\n", DIGEST_A, DIGEST_B);
        assert_eq!(resolve_expected_digest(&raw, "data.bin").unwrap(), DIGEST_A);
    }

    #[test]
    fn bare_digest_matches_any_filename() {
        let raw = format!("\n  {}  \n\n", DIGEST_A.to_ascii_uppercase());
        assert_eq!(
            resolve_expected_digest(&raw, "whatever.iso").unwrap(),
            DIGEST_A
        );
        assert_eq!(resolve_expected_digest(&raw, "").unwrap(), DIGEST_A);
    }

    #[test]
    fn digest_case_is_normalized() {
        let raw = format!("{}  data.bin\n", DIGEST_A.to_ascii_uppercase());
        assert_eq!(resolve_expected_digest(&raw, "data.bin").unwrap(), DIGEST_A);
    }

    #[test]
    fn named_entries_disable_bare_fallback() {
        let raw = format!("{}\n{}  data.bin\n", DIGEST_A, DIGEST_B);
        // The named entry wins for its file, and nothing falls back to the
        // bare line for other files.
        assert_eq!(resolve_expected_digest(&raw, "data.bin").unwrap(), DIGEST_B);
        let err = resolve_expected_digest(&raw, "other.bin").unwrap_err();
        assert!(matches!(err, ChecksumError::DigestNotFound(_)));
    }

    #[test]
    fn empty_content_fails() {
        let err = resolve_expected_digest("   \n\n", "data.bin").unwrap_err();
        assert!(matches!(err, ChecksumError::DigestNotFound(_)));
    }

    #[test]
    fn extra_token_lines_are_ignored() {
        let raw = format!("MD5 (data.bin) = {}\n{}  data.bin\n", DIGEST_A, DIGEST_B);
        assert_eq!(resolve_expected_digest(&raw, "data.bin").unwrap(), DIGEST_B);
    }
}
