use common::types::config::Config;
use log::info;
use std::fmt;
use std::fmt::Display;
use std::fs::File;
use std::path::Path;

pub(super) fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config_file = File::open(path)?;
    let config: Config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_reader(config_file)?,
        _ => serde_yml::from_reader(config_file)?,
    };

    if config.chain().is_empty() {
        return Err(ConfigError::EmptyChain);
    }

    info!(target: "config", "Config read successfully from '{path:?}'");

    Ok(config)
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    Io(#[from] std::io::Error),
    Yaml(#[from] serde_yml::Error),
    Json(#[from] serde_json::Error),
    EmptyChain,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let err: &dyn Display = match self {
            ConfigError::Io(err) => err,
            ConfigError::Yaml(err) => err,
            ConfigError::Json(err) => err,
            ConfigError::EmptyChain => &"The chain must contain at least one handler",
        };
        write!(f, "{}", err)
    }
}
