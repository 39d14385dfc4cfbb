//! Retrieval of raw checksum-file content for a classified spec.
//!
//! Remote sources are fetched with their own curl handle, bounded by the
//! checksum timeout so a slow mirror cannot stall the download setup for the
//! full transfer timeout.

use anyhow::Context;
use std::fs;
use std::time::Duration;
use url::Url;

use super::{ChecksumError, ChecksumSpec};
use crate::download::TransferOptions;

/// Produces the raw checksum content for the spec: the literal itself, the
/// body of a remote checksum file, or the bytes of a local one. A failed
/// fetch or read is fatal; a remote source is never reinterpreted as a
/// literal digest.
pub(crate) fn resolve_raw_content(
    spec: &ChecksumSpec,
    options: &TransferOptions,
) -> Result<String, ChecksumError> {
    match spec {
        ChecksumSpec::Literal(digest) => Ok(digest.clone()),
        ChecksumSpec::Remote(url) => fetch_remote(url, options),
        ChecksumSpec::Local(path) => match fs::read(path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(source) => Err(ChecksumError::LocalSource {
                path: path.display().to_string(),
                source,
            }),
        },
    }
}

fn fetch_remote(url: &Url, options: &TransferOptions) -> Result<String, ChecksumError> {
    let body = get_body(url.as_str(), options).map_err(|e| ChecksumError::RemoteSource {
        url: url.to_string(),
        reason: format!("{:#}", e),
    })?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}

fn get_body(url: &str, options: &TransferOptions) -> anyhow::Result<Vec<u8>> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(options.connect_timeout_secs))?;
    easy.timeout(Duration::from_secs(options.checksum_timeout_secs))?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform().context("GET request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }
    Ok(body)
}
