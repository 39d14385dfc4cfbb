//! `fget get <url>` – download a URL with optional checksum verification.

use anyhow::Result;
use fget_core::config::FgetConfig;
use fget_core::download::{
    self, DownloadOptions, FileDownloadOptions, Mkdirs, ProgressStats, TransferOptions,
};
use fget_core::hasher::HashAlgorithm;
use fget_core::url_model;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Instant;

const PROGRESS_INTERVAL_MS: u64 = 500;

pub fn run_get(
    cfg: &FgetConfig,
    url: &str,
    output: Option<PathBuf>,
    checksum: Option<String>,
    hash: Option<HashAlgorithm>,
    no_mkdir: bool,
    quiet: bool,
) -> Result<()> {
    let dest = output.unwrap_or_else(|| PathBuf::from(url_model::derive_filename(url)));
    let algorithm = hash.or(cfg.default_hash).unwrap_or_default();

    let (progress_tx, progress_handle) = if quiet {
        (None, None)
    } else {
        let (tx, rx) = mpsc::channel::<ProgressStats>();
        (Some(tx), Some(std::thread::spawn(move || render_progress(rx))))
    };

    let options = FileDownloadOptions {
        download: DownloadOptions {
            checksum,
            hash: algorithm,
            transfer: TransferOptions::from_config(cfg),
            progress: progress_tx,
        },
        mkdirs: if no_mkdir { Mkdirs::None } else { Mkdirs::All },
    };

    // The progress sender is owned by the options, so the render thread
    // drains and exits once the download call returns.
    let result = download::download_to_file(url, &dest, options);
    if let Some(handle) = progress_handle {
        let _ = handle.join();
    }
    let outcome = result?;

    println!("Saved {} ({} bytes)", dest.display(), outcome.bytes_written);
    if let Some(digest) = outcome.checksum {
        println!("{} checksum OK: {}", algorithm, digest);
    }
    Ok(())
}

fn render_progress(rx: mpsc::Receiver<ProgressStats>) {
    let mut last_print = Instant::now();
    while let Ok(stats) = rx.recv() {
        let now = Instant::now();
        let finished = stats.total_bytes.is_some_and(|t| stats.bytes_done >= t);
        if now.duration_since(last_print).as_millis() as u64 >= PROGRESS_INTERVAL_MS || finished {
            let done_mib = stats.bytes_done as f64 / 1_048_576.0;
            let rate_mib = stats.bytes_per_sec() / 1_048_576.0;
            match stats.total_bytes {
                Some(total) => {
                    let total_mib = total as f64 / 1_048_576.0;
                    let pct = stats.fraction().unwrap_or(0.0) * 100.0;
                    let eta = stats
                        .eta_secs()
                        .map(|s| format!("{:.0}s", s))
                        .unwrap_or_else(|| "?".to_string());
                    println!(
                        "\r  {:.1} / {:.1} MiB ({:.1}%)  {:.2} MiB/s  ETA {}  ",
                        done_mib, total_mib, pct, rate_mib, eta
                    );
                }
                None => println!("\r  {:.1} MiB  {:.2} MiB/s  ", done_mib, rate_mib),
            }
            last_print = now;
        }
    }
}
