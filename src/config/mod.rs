//! TOML configuration with environment overrides for the credential.

mod load;
mod paths;
mod types;

pub use load::{load_config, LoadedConfig};
pub use paths::ConfigPaths;
pub use types::{AppConfig, HistoryConfig, LoggingConfig, ModelConfig};
