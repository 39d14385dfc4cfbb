//! `fget checksum <path>` – compute the digest of a local file.

use anyhow::Result;
use fget_core::hasher::{self, HashAlgorithm};
use std::path::Path;

/// Compute and print the digest of the given file, `sha256sum`-style.
pub fn run_checksum(path: &Path, algorithm: HashAlgorithm) -> Result<()> {
    let digest = hasher::hash_file(path, algorithm)?;
    println!("{}  {}", digest, path.display());
    Ok(())
}
