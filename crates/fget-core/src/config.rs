use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::hasher::HashAlgorithm;

/// Global configuration loaded from `~/.config/fget/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FgetConfig {
    /// Connect timeout for the payload transfer, in seconds.
    pub connect_timeout_secs: u64,
    /// Overall timeout for the payload transfer, in seconds.
    pub request_timeout_secs: u64,
    /// Overall timeout for fetching a remote checksum file, in seconds.
    pub checksum_timeout_secs: u64,
    /// Optional bandwidth cap in bytes per second (None = no cap).
    #[serde(default)]
    pub max_recv_speed: Option<u64>,
    /// Hash algorithm used when the caller does not pick one (None = sha256).
    #[serde(default)]
    pub default_hash: Option<HashAlgorithm>,
}

impl Default for FgetConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            request_timeout_secs: 3600,
            checksum_timeout_secs: 60,
            max_recv_speed: None,
            default_hash: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fget")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FgetConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FgetConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FgetConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FgetConfig::default();
        assert_eq!(cfg.connect_timeout_secs, 30);
        assert_eq!(cfg.request_timeout_secs, 3600);
        assert_eq!(cfg.checksum_timeout_secs, 60);
        assert!(cfg.max_recv_speed.is_none());
        assert!(cfg.default_hash.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = FgetConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FgetConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.connect_timeout_secs, cfg.connect_timeout_secs);
        assert_eq!(parsed.request_timeout_secs, cfg.request_timeout_secs);
        assert_eq!(parsed.checksum_timeout_secs, cfg.checksum_timeout_secs);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            connect_timeout_secs = 5
            request_timeout_secs = 120
            checksum_timeout_secs = 10
            max_recv_speed = 1_000_000
        "#;
        let cfg: FgetConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.connect_timeout_secs, 5);
        assert_eq!(cfg.request_timeout_secs, 120);
        assert_eq!(cfg.checksum_timeout_secs, 10);
        assert_eq!(cfg.max_recv_speed, Some(1_000_000));
        assert!(cfg.default_hash.is_none());
    }

    #[test]
    fn config_toml_default_hash() {
        let toml = r#"
            connect_timeout_secs = 30
            request_timeout_secs = 3600
            checksum_timeout_secs = 60
            default_hash = "md5"
        "#;
        let cfg: FgetConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.default_hash, Some(HashAlgorithm::Md5));
    }
}
