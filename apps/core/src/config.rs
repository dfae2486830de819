use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_HOTKEY: &str = "Shift+F";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const APP_DIR_NAME: &str = "quicklaunch";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebSearchProvider {
    #[default]
    Google,
    Duckduckgo,
    Bing,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hotkey: String,
    pub api_base_url: String,
    pub web_search_provider: WebSearchProvider,
    pub web_search_custom_template: String,
    pub favorites_db_path: PathBuf,
    pub project_root: Option<PathBuf>,
    pub tray_mode: bool,
    pub log_level: String,
    pub max_window_height: u32,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base = stable_app_data_dir();
        Self {
            hotkey: DEFAULT_HOTKEY.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            web_search_provider: WebSearchProvider::Google,
            web_search_custom_template: String::new(),
            favorites_db_path: base.join("favorites.sqlite3"),
            project_root: None,
            tray_mode: false,
            log_level: "info".to_string(),
            max_window_height: 800,
            config_path: base.join("config.toml"),
        }
    }
}

impl Config {
    /// Base URL without a trailing slash so paths can be appended directly.
    pub fn api_base(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }
}

pub fn stable_app_data_dir() -> PathBuf {
    let base = std::env::var_os("APPDATA")
        .or_else(|| std::env::var_os("XDG_CONFIG_HOME"))
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(std::env::temp_dir);
    base.join(APP_DIR_NAME)
}

/// Loads config from `path` (or the default location). A missing file
/// yields defaults bound to that path.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Config::default().config_path);

    let mut cfg = match std::fs::read_to_string(&config_path) {
        Ok(raw) => toml::from_str::<Config>(&raw).map_err(|source| ConfigError::Parse {
            path: config_path.clone(),
            source,
        })?,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(source) => {
            return Err(ConfigError::Read {
                path: config_path,
                source,
            })
        }
    };
    cfg.config_path = config_path;
    validate(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    let encoded = toml::to_string_pretty(cfg)?;
    if let Some(parent) = cfg.config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(&cfg.config_path, encoded).map_err(|source| ConfigError::Write {
        path: cfg.config_path.clone(),
        source,
    })
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    crate::settings::validate_hotkey(&cfg.hotkey)?;
    crate::settings::validate_api_base_url(&cfg.api_base_url)?;

    if cfg.max_window_height < crate::layout::BASE_HEIGHT || cfg.max_window_height > 2000 {
        return Err("max_window_height out of range".into());
    }

    if cfg.favorites_db_path.as_os_str().is_empty() {
        return Err("favorites_db_path is required".into());
    }

    if cfg.config_path.as_os_str().is_empty() {
        return Err("config_path is required".into());
    }

    if cfg.web_search_provider == WebSearchProvider::Custom
        && !cfg.web_search_custom_template.contains("{query}")
    {
        return Err("web_search_custom_template must contain {query}".into());
    }

    Ok(())
}
