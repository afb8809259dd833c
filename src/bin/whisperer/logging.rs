use std::path::PathBuf;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use whisperer::config::{ConfigPaths, LoggingConfig};

/// Starts file logging. Logging stops when the returned handle is dropped.
pub fn init_logging(
    config: &LoggingConfig,
    paths: &ConfigPaths,
) -> anyhow::Result<LoggerHandle> {
    let log_path = config
        .path
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| paths.logs_dir.join("whisperer.log"));
    let directory = log_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or(paths.logs_dir.clone());
    std::fs::create_dir_all(&directory)?;
    let basename = log_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("whisperer")
        .to_string();
    let handle = Logger::try_with_env_or_str(&config.level)?
        .log_to_file(FileSpec::default().directory(directory).basename(basename))
        .rotate(
            Criterion::Size(config.rotate_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.rotate_keep),
        )
        .start()?;
    Ok(handle)
}
