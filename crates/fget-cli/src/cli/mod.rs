//! CLI for the fget downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fget_core::config;
use fget_core::hasher::HashAlgorithm;
use std::path::PathBuf;

use commands::{run_checksum, run_get};

/// Top-level CLI for fget.
#[derive(Debug, Parser)]
#[command(name = "fget")]
#[command(about = "fget: streaming file downloads with checksum verification", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a URL to a local file.
    Get {
        /// Direct HTTP/HTTPS URL to download.
        url: String,

        /// Output path. Defaults to a filename derived from the URL.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Expected digest, or a URL/path to a checksum file containing it.
        #[arg(long, value_name = "DIGEST|URL|PATH")]
        checksum: Option<String>,

        /// Hash algorithm: md5, sha1, sha256, or sha512. Defaults to the
        /// configured default_hash, else sha256.
        #[arg(long, value_name = "ALGO")]
        hash: Option<HashAlgorithm>,

        /// Do not create missing parent directories of the output path.
        #[arg(long)]
        no_mkdir: bool,

        /// Suppress progress output.
        #[arg(short, long)]
        quiet: bool,
    },

    /// Compute the digest of a local file (e.g. after download).
    Checksum {
        /// Path to the file.
        path: PathBuf,

        /// Hash algorithm: md5, sha1, sha256, or sha512.
        #[arg(long, default_value = "sha256", value_name = "ALGO")]
        hash: HashAlgorithm,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Get {
                url,
                output,
                checksum,
                hash,
                no_mkdir,
                quiet,
            } => run_get(&cfg, &url, output, checksum, hash, no_mkdir, quiet)?,
            CliCommand::Checksum { path, hash } => run_checksum(&path, hash)?,
        }

        Ok(())
    }
}
