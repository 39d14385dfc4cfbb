//! Hash algorithm selection and the incremental digest engine.
//!
//! Wraps the RustCrypto hashers behind one enum so the download path can feed
//! bytes without knowing which algorithm was picked.

use anyhow::{Context, Result};
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::checksum::ChecksumError;

const BUF_SIZE: usize = 64 * 1024;

/// Supported hash algorithms. Sha256 is the default when nothing is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    #[default]
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Length of this algorithm's digest in hex characters.
    pub fn hex_len(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 32,
            HashAlgorithm::Sha1 => 40,
            HashAlgorithm::Sha256 => 64,
            HashAlgorithm::Sha512 => 128,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for HashAlgorithm {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            other => Err(ChecksumError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

#[derive(Debug)]
enum Inner {
    Md5(Md5),
    Sha1(Sha1),
    Sha256(Sha256),
    Sha512(Sha512),
}

/// Incremental digest over one of the supported algorithms.
///
/// `update` never fails; `finalize_hex` consumes the engine and yields the
/// lowercase hex digest. Finalizing with no input yields the well-known
/// empty-input digest for the algorithm.
#[derive(Debug)]
pub struct DigestEngine {
    inner: Inner,
}

impl DigestEngine {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        let inner = match algorithm {
            HashAlgorithm::Md5 => Inner::Md5(Md5::new()),
            HashAlgorithm::Sha1 => Inner::Sha1(Sha1::new()),
            HashAlgorithm::Sha256 => Inner::Sha256(Sha256::new()),
            HashAlgorithm::Sha512 => Inner::Sha512(Sha512::new()),
        };
        Self { inner }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        match &mut self.inner {
            Inner::Md5(h) => h.update(bytes),
            Inner::Sha1(h) => h.update(bytes),
            Inner::Sha256(h) => h.update(bytes),
            Inner::Sha512(h) => h.update(bytes),
        }
    }

    pub fn finalize_hex(self) -> String {
        match self.inner {
            Inner::Md5(h) => hex::encode(h.finalize()),
            Inner::Sha1(h) => hex::encode(h.finalize()),
            Inner::Sha256(h) => hex::encode(h.finalize()),
            Inner::Sha512(h) => hex::encode(h.finalize()),
        }
    }
}

/// Compute the digest of a file and return it as lowercase hex.
/// Reads in chunks to keep memory use bounded; suitable for large files.
pub fn hash_file(path: &Path, algorithm: HashAlgorithm) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut engine = DigestEngine::new(algorithm);
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        engine.update(&buf[..n]);
    }
    Ok(engine.finalize_hex())
}
