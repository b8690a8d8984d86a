//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tr_core::DurationFormat;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default duration format for reports.
    pub duration_format: String,

    /// Minutes subtracted from UTC when rendering report timestamps
    /// (positive west of Greenwich).
    pub timezone_offset_minutes: i64,

    /// Directory that `report --save` writes into.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_format: DurationFormat::default().to_string(),
            timezone_offset_minutes: 0,
            output_dir: PathBuf::from("reports"),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TREPORT_*)
        figment = figment.merge(Env::prefixed("TREPORT_"));

        figment.extract()
    }

    /// Resolves the duration format, preferring `flag` over the configured one.
    pub fn resolve_format(&self, flag: Option<&str>) -> tr_core::Result<DurationFormat> {
        flag.unwrap_or(&self.duration_format).parse()
    }
}

/// Returns the platform-specific config directory for treport.
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("treport"))
}
