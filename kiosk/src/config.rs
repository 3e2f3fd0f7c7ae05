use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs};

use serde::Deserialize;

pub const CONFIG_FILE: &str = "Kiosk.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {CONFIG_FILE}: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse {CONFIG_FILE}: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Deserialize)]
pub struct KioskConfig {
    #[serde(default = "default_profile_path")]
    pub profile_path: PathBuf,
    #[serde(default)]
    pub machines_path: Option<PathBuf>,
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

fn default_profile_path() -> PathBuf {
    "profile.json".into()
}

fn default_log_path() -> PathBuf {
    "kiosk.log".into()
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            profile_path: default_profile_path(),
            machines_path: None,
            log_path: default_log_path(),
        }
    }
}

impl KioskConfig {
    /// Loads `Kiosk.toml` from the working directory when present, then
    /// applies `SUDS_PROFILE`, `SUDS_MACHINES` and `SUDS_LOG` environment
    /// overrides on top.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match fs::read_to_string(CONFIG_FILE) {
            Ok(raw) => toml::from_str(&raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(e.into()),
        };

        if let Ok(path) = env::var("SUDS_PROFILE") {
            config.profile_path = path.into();
        }
        if let Ok(path) = env::var("SUDS_MACHINES") {
            config.machines_path = Some(path.into());
        }
        if let Ok(path) = env::var("SUDS_LOG") {
            config.log_path = path.into();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = KioskConfig::default();
        assert_eq!(config.profile_path, PathBuf::from("profile.json"));
        assert_eq!(config.machines_path, None);
        assert_eq!(config.log_path, PathBuf::from("kiosk.log"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: KioskConfig = toml::from_str("profile_path = \"/tmp/p.json\"").unwrap();
        assert_eq!(config.profile_path, PathBuf::from("/tmp/p.json"));
        assert_eq!(config.log_path, PathBuf::from("kiosk.log"));
    }
}
