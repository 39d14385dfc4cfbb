//! Classification of the checksum argument.

use std::path::{Path, PathBuf};
use url::Url;

use super::ChecksumError;

/// Hex lengths of the supported digests (md5, sha1, sha256, sha512). A string
/// of one of these lengths that is not valid hex is a mistyped digest, not a
/// filename, and is rejected instead of being probed as a path.
const DIGEST_SHAPED_LENGTHS: [usize; 4] = [32, 40, 64, 128];

/// A checksum argument, classified exactly once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumSpec {
    /// The argument itself is the expected digest (stored lowercase).
    Literal(String),
    /// An absolute http(s) URL to a checksum file.
    Remote(Url),
    /// A path to an existing local checksum file.
    Local(PathBuf),
}

impl ChecksumSpec {
    /// Classifies a checksum argument.
    ///
    /// Order: absolute http(s) URL, then hex digest, then existing file.
    /// Anything that fits none of the three fails with an error whose message
    /// starts with `invalid checksum`.
    pub fn classify(arg: &str) -> Result<Self, ChecksumError> {
        if let Ok(parsed) = Url::parse(arg) {
            if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() {
                return Ok(ChecksumSpec::Remote(parsed));
            }
        }

        if is_hex_digest(arg) {
            return Ok(ChecksumSpec::Literal(arg.to_ascii_lowercase()));
        }
        if DIGEST_SHAPED_LENGTHS.contains(&arg.len()) {
            return Err(ChecksumError::InvalidSpec(arg.to_string()));
        }

        let path = Path::new(arg);
        if path.is_file() {
            return Ok(ChecksumSpec::Local(path.to_path_buf()));
        }

        Err(ChecksumError::InvalidSpec(arg.to_string()))
    }
}

/// True for a non-empty even-length string of ASCII hex digits. Truncated or
/// wrong-algorithm digests still classify as literals; they fail later as a
/// mismatch rather than here.
fn is_hex_digest(s: &str) -> bool {
    !s.is_empty() && s.len() % 2 == 0 && s.bytes().all(|b| b.is_ascii_hexdigit())
}
