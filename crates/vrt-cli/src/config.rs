//! TOML configuration
//!
//! Two sections, both optional with sensible defaults:
//!
//! ```toml
//! [orchestrator]
//! max_iterations = 50
//! tolerance = 1e-5
//!
//! [logging]
//! level = "info"
//! filename = "vrt.log"   # stderr when omitted
//! format = "full"        # or "compact"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use vrt_algo::CgConfig;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VrtConfig {
    pub orchestrator: OrchestratorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        let defaults = CgConfig::default();
        Self {
            max_iterations: defaults.max_iterations,
            tolerance: defaults.tolerance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file; stderr when absent.
    pub filename: Option<PathBuf>,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            filename: None,
            format: LogFormat::default(),
        }
    }
}

/// Load the configuration, or the defaults when no path is given.
pub fn load(path: Option<&Path>) -> Result<VrtConfig> {
    match path {
        None => Ok(VrtConfig::default()),
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading config file: {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("parsing config file: {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_orchestrator() {
        let config = VrtConfig::default();
        assert_eq!(config.orchestrator.max_iterations, 50);
        assert_eq!(config.orchestrator.tolerance, 1e-5);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Full);
        assert!(config.logging.filename.is_none());
    }

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let config: VrtConfig = toml::from_str(
            r#"
            [orchestrator]
            max_iterations = 5

            [logging]
            level = "debug"
            format = "compact"
            "#,
        )
        .unwrap();
        assert_eq!(config.orchestrator.max_iterations, 5);
        assert_eq!(config.orchestrator.tolerance, 1e-5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load(Some(Path::new("/nonexistent/vrt.toml"))).is_err());
    }
}
