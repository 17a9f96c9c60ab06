use crate::types::{LogMessage, Severity};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// Node order of the reference chain. The first entry is the node messages are submitted to.
pub const REFERENCE_CHAIN: [Severity; 4] = [
    Severity::Error,
    Severity::Warning,
    Severity::FatalError,
    Severity::Unknown,
];

#[derive(Debug, Deserialize)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1")]
    Version1 {
        #[serde(default = "reference_chain")]
        chain: Vec<Severity>,
        #[serde(default)]
        error_log: Option<PathBuf>,
        #[serde(default)]
        messages: Vec<LogMessage>,
    }
}

impl Config {
    pub fn chain(&self) -> &[Severity] {
        match self {
            Config::Version1 { chain, .. } => chain,
        }
    }

    // Overrides the error log path given on the command line
    pub fn error_log(&self) -> Option<&Path> {
        match self {
            Config::Version1 { error_log, .. } => error_log.as_deref(),
        }
    }

    pub fn messages(&self) -> &[LogMessage] {
        match self {
            Config::Version1 { messages, .. } => messages,
        }
    }
}

fn reference_chain() -> Vec<Severity> {
    REFERENCE_CHAIN.to_vec()
}
