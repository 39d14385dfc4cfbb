//! Single-stream HTTP GET feeding a byte sink.
//!
//! The sink sees the body in arrival order, chunk by chunk; nothing is
//! buffered beyond curl's own transfer buffer. A sink error aborts the
//! transfer and is surfaced instead of the curl write error.

use anyhow::{Context, Result};
use std::cell::{Cell, RefCell};
use std::io;
use std::str;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use super::{ProgressStats, TransferOptions};

/// Minimum bytes between progress snapshots.
const PROGRESS_EVERY_BYTES: u64 = 256 * 1024;

/// Downloads `url` with a single GET, feeding every body chunk to `sink`.
/// Returns the number of bytes delivered. The HTTP status is checked after
/// the transfer; a non-2xx response is an error (the caller discards
/// whatever the sink received).
pub(super) fn get_to_sink(
    url: &str,
    options: &TransferOptions,
    progress: Option<&mpsc::Sender<ProgressStats>>,
    sink: &mut dyn FnMut(&[u8]) -> io::Result<()>,
) -> Result<u64> {
    let bytes_done = Cell::new(0u64);
    let content_length = Cell::new(None::<u64>);
    let last_progress_at = Cell::new(0u64);
    let sink_error: RefCell<Option<io::Error>> = RefCell::new(None);
    let started = Instant::now();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(options.connect_timeout_secs))?;
    easy.timeout(Duration::from_secs(options.request_timeout_secs))?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;
    if let Some(speed) = options.max_recv_speed {
        easy.max_recv_speed(speed)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            // Headers arrive for every response in a redirect chain; the
            // final response's Content-Length overwrites earlier ones.
            if let Ok(line) = str::from_utf8(data) {
                if let Some((name, value)) = line.trim_end().split_once(':') {
                    if name.trim().eq_ignore_ascii_case("content-length") {
                        if let Ok(n) = value.trim().parse::<u64>() {
                            content_length.set(Some(n));
                        }
                    }
                }
            }
            true
        })?;
        transfer.write_function(|data| {
            if let Err(e) = sink(data) {
                tracing::warn!("download sink write failed: {}", e);
                *sink_error.borrow_mut() = Some(e);
                return Ok(0); // abort transfer
            }
            let done = bytes_done.get() + data.len() as u64;
            bytes_done.set(done);
            if let Some(tx) = progress {
                if done - last_progress_at.get() >= PROGRESS_EVERY_BYTES {
                    last_progress_at.set(done);
                    let _ = tx.send(ProgressStats {
                        bytes_done: done,
                        total_bytes: content_length.get(),
                        elapsed_secs: started.elapsed().as_secs_f64(),
                    });
                }
            }
            Ok(data.len())
        })?;
        let performed = transfer.perform();
        if let Some(e) = sink_error.borrow_mut().take() {
            return Err(e).context("failed to write downloaded bytes");
        }
        performed.context("download failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }

    let total = bytes_done.get();
    if let Some(tx) = progress {
        let _ = tx.send(ProgressStats {
            bytes_done: total,
            total_bytes: content_length.get().or(Some(total)),
            elapsed_secs: started.elapsed().as_secs_f64(),
        });
    }
    Ok(total)
}
