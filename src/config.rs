//! Runtime configuration from environment variables.
//!
//! Every variable is optional; unset or unparseable values fall back to the
//! defaults in [`crate::types`].

use std::env;
use std::path::PathBuf;

use crate::types::{EngineConfig, LevelThreshold};

pub const DEFAULT_SCORES_PATH: &str = "scores.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub engine: EngineConfig,
    /// Fixed seed for a reproducible shape sequence.
    pub seed: Option<u64>,
    pub scores_path: PathBuf,
    /// Log file; logging is off when unset.
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            seed: None,
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Create from `BLOCKFALL_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = EngineConfig::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let lock_delay_ms = non_empty("BLOCKFALL_LOCK_DELAY_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.lock_delay_ms);

        let allow_lateral_move_while_bottomed = non_empty("BLOCKFALL_LATERAL_WHILE_BOTTOMED")
            .and_then(|s| parse_bool(&s))
            .unwrap_or(defaults.allow_lateral_move_while_bottomed);

        let level_threshold = non_empty("BLOCKFALL_LEVEL_THRESHOLD")
            .and_then(|s| LevelThreshold::from_str(&s))
            .unwrap_or(defaults.level_threshold);

        let seed = non_empty("BLOCKFALL_SEED").and_then(|s| s.parse().ok());

        let scores_path = non_empty("BLOCKFALL_SCORES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORES_PATH));

        let log_path = non_empty("BLOCKFALL_LOG_PATH").map(PathBuf::from);

        Self {
            engine: EngineConfig {
                level_threshold,
                lock_delay_ms,
                allow_lateral_move_while_bottomed,
                ..defaults
            },
            seed,
            scores_path,
            log_path,
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
