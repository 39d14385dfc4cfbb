//! Typed errors for checksum resolution and verification.

use thiserror::Error;

/// Everything that can go wrong between receiving a checksum argument and
/// deciding whether the downloaded bytes match it. Verification failures are
/// kept distinct from transport errors so callers can react differently.
#[derive(Debug, Error)]
pub enum ChecksumError {
    /// The argument is neither an absolute URL, a hex digest, nor an existing
    /// file. The `invalid checksum` prefix is part of the public contract.
    #[error("invalid checksum {0:?}")]
    InvalidSpec(String),

    /// Fetching a remote checksum file failed (transport error or non-2xx).
    #[error("failed to fetch checksum file from {url}: {reason}")]
    RemoteSource { url: String, reason: String },

    /// Reading a local checksum file failed after classification succeeded.
    #[error("failed to read checksum file {path}: {source}")]
    LocalSource {
        path: String,
        source: std::io::Error,
    },

    /// The checksum file had no entry for the target filename and no bare
    /// digest to fall back to.
    #[error("no checksum entry for {0:?}")]
    DigestNotFound(String),

    /// The downloaded bytes hash to something other than the expected digest.
    #[error("checksum mismatch for {filename:?}: expected {expected}, computed {computed}")]
    Mismatch {
        filename: String,
        expected: String,
        computed: String,
    },

    /// The algorithm selector names no known implementation.
    #[error("unsupported hash algorithm {0:?}")]
    UnsupportedAlgorithm(String),
}
