use crate::shared::paths::{get_default_data_file, get_settings_path};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_HOST: &str = "TODOLIST_HOST";
pub const ENV_PORT: &str = "TODOLIST_PORT";
pub const ENV_DATA_FILE: &str = "TODOLIST_DATA_FILE";
pub const ENV_STATIC_DIR: &str = "TODOLIST_STATIC_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "get_default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: get_default_data_file(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("Invalid bind address {0}")]
    InvalidAddress(String),
}

impl AppSettings {
    /// Resolves `host:port`; hostnames such as `localhost` go through the resolver.
    pub async fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let invalid = || SettingsError::InvalidAddress(format!("{}:{}", self.host, self.port));

        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|_| invalid())?
            .next()
            .ok_or_else(invalid)
    }

    /// Applies overrides looked up by variable name. Empty values are ignored.
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(host) = var(ENV_HOST) {
            self.host = host.trim().to_string();
        }
        if let Some(port) = var(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidEnv {
                    name: ENV_PORT,
                    value: port.clone(),
                })?;
        }
        if let Some(path) = var(ENV_DATA_FILE) {
            self.data_file = PathBuf::from(path);
        }
        if let Some(path) = var(ENV_STATIC_DIR) {
            self.static_dir = PathBuf::from(path);
        }

        Ok(self)
    }
}

/// Loads `settings.json` from the storage dir and applies env overrides.
pub fn load_settings() -> Result<AppSettings, SettingsError> {
    let path = get_settings_path();

    let settings = if path.exists() {
        load_settings_from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(
                target: "system",
                path = %path.display(),
                error = %e,
                "Ignoring unreadable settings file"
            );
            AppSettings::default()
        })
    } else {
        AppSettings::default()
    };

    settings.apply_overrides(|name| std::env::var(name).ok())
}

pub fn load_settings_from_file(path: &Path) -> Result<AppSettings, SettingsError> {
    let contents = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&contents)?;
    Ok(settings)
}
