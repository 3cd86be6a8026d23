//! Runtime configuration for the terminal binary, read from the environment.

use std::path::PathBuf;

use crate::types::{Script, TICK_MS};

/// Settings the binary reads once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Glyph set the board starts in
    pub script: Script,
    /// Event-poll timeout between redraws
    pub tick_ms: u64,
    /// Whether to enable terminal mouse capture
    pub mouse: bool,
    /// Log file; logging stays off without one
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            script: Script::Chinese,
            tick_ms: TICK_MS as u64,
            mouse: true,
            log_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let script = lookup("XIANGQI_SCRIPT")
            .and_then(|s| Script::from_str(s.trim()))
            .unwrap_or(defaults.script);

        let tick_ms = lookup("XIANGQI_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u64| ms > 0)
            .unwrap_or(defaults.tick_ms);

        let mouse = lookup("XIANGQI_MOUSE")
            .map(|s| !matches!(s.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off"))
            .unwrap_or(defaults.mouse);

        let log_path = lookup("XIANGQI_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            script,
            tick_ms,
            mouse,
            log_path,
        }
    }
}
