// src/config.rs
//! Run configuration: file paths and digest limits.
//!
//! Resolution order: `$BRIEFING_CONFIG_PATH` (must exist if set), then
//! `config/briefing.toml` if present, then built-in defaults. The feeds
//! and state paths can additionally be overridden individually via env.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "BRIEFING_CONFIG_PATH";
pub const ENV_FEEDS_PATH: &str = "BRIEFING_FEEDS_PATH";
pub const ENV_STATE_PATH: &str = "BRIEFING_STATE_PATH";

const DEFAULT_CONFIG_PATH: &str = "config/briefing.toml";
const DEFAULT_FEEDS_PATH: &str = "config/feeds.txt";
const DEFAULT_STATE_PATH: &str = "state/seen.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BriefingConfig {
    pub feeds_path: PathBuf,
    pub state_path: PathBuf,
    pub max_total: usize,
    pub max_per_category: usize,
}

impl Default for BriefingConfig {
    fn default() -> Self {
        Self {
            feeds_path: PathBuf::from(DEFAULT_FEEDS_PATH),
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            max_total: crate::digest::MAX_TOTAL,
            max_per_category: crate::digest::MAX_PER_CATEGORY,
        }
    }
}

impl BriefingConfig {
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("BRIEFING_CONFIG_PATH points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let pb = PathBuf::from(DEFAULT_CONFIG_PATH);
            if pb.exists() {
                Self::load_from(&pb)?
            } else {
                Self::default()
            }
        };

        if let Ok(p) = std::env::var(ENV_FEEDS_PATH) {
            cfg.feeds_path = PathBuf::from(p);
        }
        if let Ok(p) = std::env::var(ENV_STATE_PATH) {
            cfg.state_path = PathBuf::from(p);
        }
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }
}
