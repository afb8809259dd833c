use std::path::PathBuf;

use crate::error::WhispererError;

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_file: PathBuf,
    pub logs_dir: PathBuf,
}

impl ConfigPaths {
    pub fn resolve(config_override: Option<PathBuf>) -> Result<Self, WhispererError> {
        let logs_dir = default_data_dir()?.join("logs");
        let config_file = match config_override {
            Some(path) => path,
            None => default_config_dir()?.join("config.toml"),
        };
        Ok(Self {
            config_file,
            logs_dir,
        })
    }
}

fn home() -> Result<PathBuf, WhispererError> {
    dirs::home_dir()
        .ok_or_else(|| WhispererError::Config("missing home directory for config paths".into()))
}

fn default_config_dir() -> Result<PathBuf, WhispererError> {
    Ok(home()?.join(".config").join("whisperer"))
}

fn default_data_dir() -> Result<PathBuf, WhispererError> {
    Ok(home()?.join(".local").join("share").join("whisperer"))
}
