pub mod schema;
pub mod watcher;

pub use schema::{
    DisplayConfig, LinkConfig, MatrixConfig, MetricConfig, SamplerConfig, StartupConfig,
    ThemeConfig,
};
pub use watcher::ConfigWatcher;

use std::path::{Path, PathBuf};
use sysmatrix_core::{MatrixError, Result};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "SYSMATRIX_CONFIG";

/// Load configuration from a TOML file.  Returns `MatrixConfig::default()` if
/// the file doesn't exist so the matrix always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<MatrixConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(MatrixConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| MatrixError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse a TOML document into a [`MatrixConfig`].
pub fn parse(raw: &str) -> Result<MatrixConfig> {
    toml::from_str(raw).map_err(|e| MatrixError::Config(format!("TOML parse error: {e}")))
}

/// Return the config path: `$SYSMATRIX_CONFIG` if set, otherwise
/// `sysmatrix/sysmatrix.toml` under `$XDG_CONFIG_HOME` (or `~/.config`).
pub fn default_path() -> PathBuf {
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(explicit);
    }

    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("sysmatrix").join("sysmatrix.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = load("/nonexistent/sysmatrix/sysmatrix.toml").unwrap();
        assert_eq!(cfg.display.width, 13);
        assert!(cfg.link.socket.is_none());
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = parse("[display\nwidth = ").unwrap_err();
        assert!(matches!(err, MatrixError::Config(_)));
    }

    #[test]
    fn unknown_metric_name_is_rejected() {
        assert!(parse("[metric]\nselected = \"gpu\"\n").is_err());
    }
}
