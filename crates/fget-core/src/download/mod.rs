//! Download orchestration: GET a URL into a writer or file, with optional
//! streaming checksum verification.
//!
//! The validator is interposed on the copy path, so every byte that reaches
//! the destination is hashed exactly once while it streams; there is no
//! second pass over the payload. Checksum resolution (fetching/parsing the
//! checksum source) happens before the transfer starts.

pub mod progress;
mod transfer;

pub use progress::ProgressStats;

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::mpsc;
use url::Url;

use crate::checksum::{ChecksumError, StreamingValidator, ValidatingWriter};
use crate::config::FgetConfig;
use crate::hasher::HashAlgorithm;
use crate::storage::PartFile;
use crate::url_model::filename_from_url_path;

/// Timeouts and bandwidth settings shared by the payload transfer and the
/// remote checksum fetch.
#[derive(Debug, Clone, Copy)]
pub struct TransferOptions {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub checksum_timeout_secs: u64,
    pub max_recv_speed: Option<u64>,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            request_timeout_secs: 3600,
            checksum_timeout_secs: 60,
            max_recv_speed: None,
        }
    }
}

impl TransferOptions {
    pub fn from_config(cfg: &FgetConfig) -> Self {
        Self {
            connect_timeout_secs: cfg.connect_timeout_secs,
            request_timeout_secs: cfg.request_timeout_secs,
            checksum_timeout_secs: cfg.checksum_timeout_secs,
            max_recv_speed: cfg.max_recv_speed,
        }
    }
}

/// Options for one download.
#[derive(Debug, Default)]
pub struct DownloadOptions {
    /// Checksum argument: a literal hex digest, a URL to a checksum file, or
    /// a path to a local one. None disables verification.
    pub checksum: Option<String>,
    /// Hash algorithm for verification (sha256 unless told otherwise).
    pub hash: HashAlgorithm,
    pub transfer: TransferOptions,
    /// Progress snapshots are sent here while the transfer runs.
    pub progress: Option<mpsc::Sender<ProgressStats>>,
}

/// Whether to create missing parent directories of the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mkdirs {
    #[default]
    All,
    None,
}

/// Options for a download that lands in a file.
#[derive(Debug, Default)]
pub struct FileDownloadOptions {
    pub download: DownloadOptions,
    pub mkdirs: Mkdirs,
}

/// What a completed download produced.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    pub bytes_written: u64,
    /// The digest computed over the stream, when verification ran.
    pub checksum: Option<String>,
}

/// Downloads `src` into `w` with the options given.
///
/// If a checksum argument is present it is resolved first; resolution errors
/// surface before any payload byte is transferred. After the copy completes
/// the computed digest is compared with the expected one and a mismatch is a
/// `ChecksumError::Mismatch`.
pub fn download_to_writer<W: Write>(
    src: &str,
    w: &mut W,
    options: DownloadOptions,
) -> Result<DownloadOutcome> {
    let src_url = Url::parse(src).context("invalid source URL")?;
    let target_filename = filename_from_url_path(src).unwrap_or_default();

    let mut validator = match &options.checksum {
        Some(arg) => Some(StreamingValidator::for_download(
            options.hash,
            arg,
            &target_filename,
            &options.transfer,
        )?),
        None => None,
    };

    tracing::info!(url = src_url.as_str(), "starting download");
    let bytes_written = match validator.as_mut() {
        Some(v) => {
            let mut vw = ValidatingWriter::new(&mut *w, v);
            transfer::get_to_sink(
                src_url.as_str(),
                &options.transfer,
                options.progress.as_ref(),
                &mut |chunk| vw.write_all(chunk),
            )?
        }
        None => transfer::get_to_sink(
            src_url.as_str(),
            &options.transfer,
            options.progress.as_ref(),
            &mut |chunk| w.write_all(chunk),
        )?,
    };

    let checksum = match validator.as_mut() {
        Some(v) => {
            if !v.validate() {
                return Err(ChecksumError::Mismatch {
                    filename: v.filename().to_string(),
                    expected: v.expected_digest().to_string(),
                    computed: v.computed_digest().unwrap_or_default().to_string(),
                }
                .into());
            }
            v.computed_digest().map(str::to_string)
        }
        None => None,
    };

    tracing::info!(url = src_url.as_str(), bytes_written, "download finished");
    Ok(DownloadOutcome {
        bytes_written,
        checksum,
    })
}

/// Downloads `src` to the file at `dest`.
///
/// The body streams into `<dest>.part` and is renamed onto `dest` only after
/// the transfer and any checksum validation succeeded; on failure the temp
/// file is removed and `dest` is left untouched.
pub fn download_to_file(
    src: &str,
    dest: &Path,
    options: FileDownloadOptions,
) -> Result<DownloadOutcome> {
    let dest_dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if let Err(e) = fs::metadata(dest_dir) {
        if e.kind() != io::ErrorKind::NotFound || options.mkdirs == Mkdirs::None {
            return Err(e).context("failed to check destination directory");
        }
        fs::create_dir_all(dest_dir).context("failed to create destination directory")?;
    }

    let mut part = PartFile::create(dest)?;
    let outcome = match download_to_writer(src, &mut part, options.download) {
        Ok(outcome) => outcome,
        Err(e) => {
            part.discard();
            return Err(e);
        }
    };
    if let Err(e) = part.sync() {
        part.discard();
        return Err(e);
    }
    part.finalize(dest)?;

    Ok(outcome)
}
