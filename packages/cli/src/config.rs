use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Folio configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Site document file, relative to the working directory
    #[serde(default = "default_data_path")]
    pub data_path: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for paths that are not pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<String>,

    /// Refuse writes, as static hosting does
    #[serde(default)]
    pub read_only: bool,

    /// Reload the site document when the data file changes
    #[serde(default)]
    pub watch: bool,
}

fn default_data_path() -> String {
    "data/site.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Absolute path of the site document, with an optional override
    pub fn data_file(&self, cwd: &Path, data: Option<&Path>) -> PathBuf {
        match data {
            Some(path) => cwd.join(path),
            None => cwd.join(&self.data_path),
        }
    }

    pub fn static_dir(&self, cwd: &Path) -> Option<PathBuf> {
        self.static_dir.as_ref().map(|dir| cwd.join(dir))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            host: default_host(),
            port: default_port(),
            static_dir: None,
            read_only: false,
            watch: false,
        }
    }
}
