//! Player configuration.
//!
//! All fields have defaults so an empty TOML table (or `Default::default()`)
//! yields a working player.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options applied to a player at construction time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    /// How many end-of-stream restarts a single render tick may attempt
    /// before reporting a stall.
    #[serde(default = "default_eof_retry_limit")]
    pub eof_retry_limit: u32,

    /// Restart from position zero at end-of-stream. When disabled, playback
    /// ends there and the last frame keeps being drawn.
    #[serde(default = "default_loop_playback")]
    pub loop_playback: bool,

    /// Draw tint in hex ("RRGGBB" or "AARRGGBB"); opaque white leaves the
    /// frame untouched.
    #[serde(default = "default_tint")]
    pub tint: String,

    /// Seconds between playback statistics log lines.
    #[serde(default = "default_stats_interval")]
    pub stats_interval_secs: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            eof_retry_limit: default_eof_retry_limit(),
            loop_playback: default_loop_playback(),
            tint: default_tint(),
            stats_interval_secs: default_stats_interval(),
        }
    }
}

fn default_eof_retry_limit() -> u32 {
    3
}
fn default_loop_playback() -> bool {
    true
}
fn default_tint() -> String {
    "FFFFFFFF".to_string()
}
fn default_stats_interval() -> u64 {
    3
}

impl PlayerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
