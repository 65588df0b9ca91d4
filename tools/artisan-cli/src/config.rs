//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use artisan_data::Latency;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["artisan.toml", ".artisan.toml", "artisan.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the cart and orders are kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Simulated backend delays.
    #[serde(default)]
    pub latency: LatencyConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Storage locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for persisted records, relative to the working directory.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// Cart session name. The cart is stored under `cart:<name>`.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_dir() -> String {
    ".artisan".to_string()
}

fn default_cart_key() -> String {
    artisan_commerce::cart::DEFAULT_SESSION.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            cart_key: default_cart_key(),
        }
    }
}

/// Per-operation delays in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_lookup")]
    pub lookup: u64,
    #[serde(default = "default_list")]
    pub list: u64,
    #[serde(default = "default_search")]
    pub search: u64,
    #[serde(default = "default_write")]
    pub write: u64,
}

fn default_true() -> bool {
    true
}

fn default_lookup() -> u64 {
    200
}

fn default_list() -> u64 {
    300
}

fn default_search() -> u64 {
    400
}

fn default_write() -> u64 {
    350
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lookup: default_lookup(),
            list: default_list(),
            search: default_search(),
            write: default_write(),
        }
    }
}

impl LatencyConfig {
    pub fn to_latency(&self) -> Latency {
        if self.enabled {
            Latency::from_millis(self.lookup, self.list, self.search, self.write)
        } else {
            Latency::none()
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format (for development).
    #[default]
    Human,
    /// JSON format (for log aggregation).
    Json,
}

/// Logging configuration. `RUST_LOG` overrides `level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// Generate a default artisan.toml config file.
pub fn generate_default_config() -> String {
    r#"# Artisan storefront configuration

[storage]
dir = ".artisan"
cart_key = "default"

[latency]
# Simulated backend delays in milliseconds
enabled = true
lookup = 200
list = 300
search = 400
write = 350

[logging]
# Overridden by RUST_LOG
level = "warn"
format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config: CliConfig = toml::from_str(
            r#"
            [latency]
            enabled = false

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.dir, ".artisan");
        assert_eq!(config.latency.lookup, 200);
        assert_eq!(config.latency.to_latency(), Latency::none());
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storage.cart_key = "guest".into();

        for name in ["artisan.toml", "artisan.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(CliConfig::load(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artisan.toml");
        std::fs::write(&path, "[latency]\nlookup = \"slow\"").unwrap();
        let err = CliConfig::load(&path).unwrap_err();
        assert!(format!("{}", err).contains("artisan.toml"));
    }
}
