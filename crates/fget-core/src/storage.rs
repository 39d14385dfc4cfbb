//! Temp-file lifecycle for downloads.
//!
//! The payload streams into `<dest>.part` in the destination directory, is
//! fsynced, and is renamed onto the final path only after the transfer (and
//! any checksum validation) succeeded. Failures remove the temp file so no
//! partial artifact survives.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path
/// (e.g. `file.iso` → `file.iso.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Sequential writer for a `.part` file next to the final destination.
pub struct PartFile {
    file: File,
    temp_path: PathBuf,
}

impl PartFile {
    /// Creates (truncating) the temp file for `final_path`.
    pub fn create(final_path: &Path) -> Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::create(&temp_path)
            .with_context(|| format!("failed to create temp file {}", temp_path.display()))?;
        Ok(Self { file, temp_path })
    }

    /// Sync file data to disk. Call before `finalize` for durability.
    pub fn sync(&self) -> Result<()> {
        self.file.sync_all().context("temp file sync failed")?;
        Ok(())
    }

    /// Path of the temp file (mainly for diagnostics and tests).
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Atomically rename the temp file onto `final_path`. Consumes the writer
    /// and closes the file; on rename failure the temp file is removed.
    pub fn finalize(self, final_path: &Path) -> Result<()> {
        let temp_path = self.temp_path;
        drop(self.file);

        if let Err(e) = fs::rename(&temp_path, final_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e).with_context(|| {
                format!(
                    "failed to rename {} to {}",
                    temp_path.display(),
                    final_path.display()
                )
            });
        }
        Ok(())
    }

    /// Removes the temp file. Used on any download or validation failure.
    pub fn discard(self) {
        let temp_path = self.temp_path;
        drop(self.file);
        if let Err(e) = fs::remove_file(&temp_path) {
            tracing::warn!("could not remove temp file {}: {}", temp_path.display(), e);
        }
    }
}

impl Write for PartFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
