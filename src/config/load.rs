use std::fs;
use std::path::{Path, PathBuf};

use crate::error::WhispererError;

use super::paths::ConfigPaths;
use super::types::AppConfig;

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub paths: ConfigPaths,
    pub config_exists: bool,
}

/// Loads `.env`, then the TOML config. A missing config file yields defaults.
pub fn load_config(path_override: Option<PathBuf>) -> Result<LoadedConfig, WhispererError> {
    if dotenv::dotenv().is_ok() {
        log::debug!("loaded environment from .env");
    }
    let paths = ConfigPaths::resolve(path_override)?;
    let (config, config_exists) = read_config(&paths.config_file)?;
    Ok(LoadedConfig {
        config,
        paths,
        config_exists,
    })
}

fn read_config(path: &Path) -> Result<(AppConfig, bool), WhispererError> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let config = toml::from_str(&contents).map_err(|err| {
                WhispererError::Config(format!("{}: {err}", path.display()))
            })?;
            Ok((config, true))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok((AppConfig::default(), false)),
        Err(err) => Err(WhispererError::Io(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = load_config(Some(dir.path().join("config.toml"))).expect("load");
        assert!(!loaded.config_exists);
        assert_eq!(loaded.config.history.max_context_items, 5);
    }

    #[test]
    fn reads_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[history]\nmax_context_items = 2\n").expect("write");
        let loaded = load_config(Some(path)).expect("load");
        assert!(loaded.config_exists);
        assert_eq!(loaded.config.history.max_context_items, 2);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[history\n").expect("write");
        assert!(matches!(
            load_config(Some(path)),
            Err(WhispererError::Config(_))
        ));
    }
}
