use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Local,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub anon_key: String,
    #[serde(default = "default_table")]
    pub table: String,
}

/// Settings read from `config.toml`, then overridden from the environment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "default_backend")]
    pub backend: BackendKind,
    #[serde(default)]
    pub local: LocalConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

fn default_backend() -> BackendKind {
    BackendKind::Local
}

fn default_table() -> String {
    "workouts".to_string()
}

impl Default for LocalConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .map(|d| d.join("fitness-log"))
            .unwrap_or_else(|| PathBuf::from("data"));
        LocalConfig { data_dir }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            url: String::new(),
            anon_key: String::new(),
            table: default_table(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend: default_backend(),
            local: LocalConfig::default(),
            remote: RemoteConfig::default(),
        }
    }
}

impl Config {
    /// Load from `$FITNESS_LOG_CONFIG` or the platform config dir, then apply
    /// `FITNESS_LOG_*` environment overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var("FITNESS_LOG_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(Self::default_path);

        let config = match path {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("fitness-log").join("config.toml"))
    }

    pub fn with_overrides<F>(mut self, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(kind) = var("FITNESS_LOG_BACKEND") {
            self.backend = match kind.to_lowercase().as_str() {
                "local" => BackendKind::Local,
                "remote" => BackendKind::Remote,
                other => return Err(Error::Config(format!("unknown backend: {}", other))),
            };
        }
        if let Some(dir) = var("FITNESS_LOG_DATA_DIR") {
            self.local.data_dir = PathBuf::from(dir);
        }
        if let Some(url) = var("FITNESS_LOG_REMOTE_URL") {
            self.remote.url = url;
        }
        if let Some(key) = var("FITNESS_LOG_REMOTE_KEY") {
            self.remote.anon_key = key;
        }

        if self.backend == BackendKind::Remote
            && (self.remote.url.is_empty() || self.remote.anon_key.is_empty())
        {
            return Err(Error::Config(
                "remote backend needs both url and anon_key".to_string(),
            ));
        }
        Ok(self)
    }
}
