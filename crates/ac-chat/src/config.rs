//! ArgoChat configuration, loadable from TOML with an environment override.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use ac_argo_data::ErddapConfig;
use ac_protocol::FloatId;

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "argo-chat.toml";

/// Environment variable overriding `archive.base_url`.
pub const ERDDAP_URL_ENV: &str = "ARGO_ERDDAP_URL";

/// Top-level configuration for the chat shell.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Remote archive settings.
    #[serde(default)]
    pub archive: ErddapConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub charts: ChartsConfig,
}

/// Conversation behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Floats offered by `:catalog`.
    #[serde(default = "default_known_floats")]
    pub known_floats: Vec<FloatId>,
    /// Print the interpretation of every utterance.
    #[serde(default)]
    pub debug_intents: bool,
    /// Render the latest-positions map whenever the loaded set changes.
    #[serde(default = "default_true")]
    pub show_positions_map: bool,
}

fn default_known_floats() -> Vec<FloatId> {
    vec![FloatId(2903893), FloatId(2903892), FloatId(6902746)]
}

fn default_true() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            known_floats: default_known_floats(),
            debug_intents: false,
            show_positions_map: true,
        }
    }
}

/// Where rendered charts go.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartsConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("charts")
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl AppConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from `path`, or from [`DEFAULT_CONFIG_PATH`] if it exists, or
    /// fall back to defaults. Applies the environment override.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ERDDAP_URL_ENV).filter(|u| !u.trim().is_empty()) {
            tracing::debug!(base_url = %url, "archive URL overridden from environment");
            self.archive.base_url = url;
        }
    }
}
