use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Parse(error) => write!(f, "parse error: {error}"),
            Self::Invalid(error) => write!(f, "invalid config: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    #[default]
    Substring,
    Fuzzy,
}

impl MatchStrategy {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "substring" => Some(Self::Substring),
            "fuzzy" => Some(Self::Fuzzy),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub entry_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub match_strategy: MatchStrategy,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let mut entry_dirs = vec![PathBuf::from("/usr/share/applications")];
        if let Some(home) = home_dir() {
            entry_dirs.push(home.join(".local/share/applications"));
        }

        Self {
            entry_dirs,
            match_strategy: MatchStrategy::default(),
            config_path: stable_data_dir().join(CONFIG_FILE_NAME),
        }
    }
}

pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

pub fn stable_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("QUICKLAUNCH_DATA_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(dir) = std::env::var_os("XDG_DATA_HOME") {
        return PathBuf::from(dir).join("quicklaunch");
    }
    if let Some(home) = home_dir() {
        return home.join(".local/share/quicklaunch");
    }
    std::env::temp_dir().join("quicklaunch")
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    if cfg.config_path.as_os_str().is_empty() {
        return Err("config_path is required".into());
    }

    if cfg.entry_dirs.iter().any(|dir| dir.as_os_str().is_empty()) {
        return Err("entry_dirs must not contain empty paths".into());
    }

    Ok(())
}

pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default().config_path,
    };

    if !config_path.exists() {
        let mut config = Config::default();
        config.config_path = config_path;
        return Ok(config);
    }

    let text = fs::read_to_string(&config_path)?;
    let mut config: Config =
        toml::from_str(&text).map_err(|error| ConfigError::Parse(error.to_string()))?;
    config.config_path = config_path;
    validate(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}

pub fn save(config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = config.config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let text =
        toml::to_string_pretty(config).map_err(|error| ConfigError::Parse(error.to_string()))?;
    fs::write(&config.config_path, text)?;
    Ok(())
}
