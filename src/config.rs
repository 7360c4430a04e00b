//! Layered settings: defaults < config file < environment < CLI.
//!
//! The file is optional (`wardwatch.toml` next to the binary, or an
//! explicit `--config` path); environment overrides use the `WARDWATCH_`
//! prefix (e.g. `WARDWATCH_SEED=42`).

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Knobs that can come from the config file or the environment.
///
/// Everything is optional; `main` resolves the effective value as
/// CLI flag, then this struct, then the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Card walk interval, e.g. "3s".
    pub card_refresh: Option<String>,
    /// Chart window interval, e.g. "30s".
    pub chart_refresh: Option<String>,
    /// Assistant reply delay, e.g. "2s".
    pub reply_delay: Option<String>,
    /// Fixed simulation seed.
    pub seed: Option<u64>,
    /// "light", "dark" or "auto".
    pub theme: Option<String>,
    /// Log file path; logging is disabled when unset.
    pub log_file: Option<String>,
}

impl Settings {
    /// Load settings from an explicit file (must exist) or the default
    /// `wardwatch.toml` (may be absent), then apply env overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        builder = match explicit {
            Some(path) => builder.add_source(config::File::from(path.to_path_buf())),
            None => builder.add_source(config::File::with_name("wardwatch").required(false)),
        };

        let cfg = builder
            .add_source(config::Environment::with_prefix("WARDWATCH"))
            .build()
            .context("cannot load configuration")?;

        cfg.try_deserialize().context("invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_default_file_is_not_an_error() {
        assert!(Settings::load(None).is_ok());
    }

    #[test]
    fn test_explicit_file_is_parsed() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "card_refresh = \"1s\"\nseed = 7\ntheme = \"dark\"").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.card_refresh.as_deref(), Some("1s"));
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.theme.as_deref(), Some("dark"));
        assert!(settings.reply_delay.is_none());
    }

    #[test]
    fn test_explicit_missing_file_errors() {
        assert!(Settings::load(Some(Path::new("/nonexistent/wardwatch.toml"))).is_err());
    }
}
