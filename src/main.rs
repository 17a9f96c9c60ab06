pub mod bootstrap_config;
mod config;
mod demo;

use crate::config::load_config;
use bootstrap_config::{BootstrapConfig, Pattern};
use chain::{ChainError, DispatchError, SinkError};
use common::util::logging;
use log::{debug, error, SetLoggerError};
use std::fmt::{Display, Formatter};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ LogchainError::Logging(_)) => {
            // no logger to report through
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(target: "main", "{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), LogchainError> {
    let bootstrap_config = BootstrapConfig::read();

    logging::initialize_logging(bootstrap_config.log_level.into())?;
    debug!(target: "main", "Running the {:?} pattern", bootstrap_config.pattern);

    match bootstrap_config.pattern {
        Pattern::Chain => {
            let script = match &bootstrap_config.config_file {
                Some(path) => Some(load_config(path)?),
                None => None,
            };
            demo::run_chain(&bootstrap_config, script)
        }
        Pattern::Command => demo::run_command(&bootstrap_config),
        Pattern::Observer => demo::run_observer(&bootstrap_config),
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LogchainError {
    Logging(#[from] SetLoggerError),
    Config(#[from] config::ConfigError),
    Chain(#[from] ChainError),
    Dispatch(#[from] DispatchError),
    Sink(#[from] SinkError),
}

impl Display for LogchainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let err: &dyn Display = match self {
            LogchainError::Logging(err) => err,
            LogchainError::Config(err) => err,
            LogchainError::Chain(err) => err,
            LogchainError::Dispatch(err) => err,
            LogchainError::Sink(err) => err,
        };
        let prefix = match self {
            LogchainError::Logging(_) => "Initializing logging",
            LogchainError::Config(_) => "Reading config file",
            LogchainError::Chain(_) => "Building the handler chain",
            LogchainError::Dispatch(_) => "Dispatching messages",
            LogchainError::Sink(_) => "Writing to sink",
        };
        write!(f, "{}: {}", prefix, err)
    }
}
