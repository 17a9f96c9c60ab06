use std::path::Path;

use common::types::{LogMessage, Severity};
use log::debug;

use crate::errors::{ChainResult, DispatchError};
use crate::sink::{ConsoleSink, FileSink, Sink};

// The terminal action of a node, keyed by the severity it is bound to. Warning and Error write a
// line and return normally, FatalError and Unknown escalate.
pub enum Handler {
    Warning { console: Box<dyn Sink> },
    Error { file: Box<dyn Sink> },
    FatalError,
    Unknown,
}

impl Handler {
    pub fn warning() -> Self {
        Self::warning_to(ConsoleSink::stdout())
    }

    pub fn warning_to(console: impl Sink + 'static) -> Self {
        Handler::Warning { console: Box::new(console) }
    }

    // The file is opened here, so a handler that exists always has a usable sink
    pub fn error(path: impl AsRef<Path>) -> ChainResult<Self> {
        Ok(Self::error_to(FileSink::create(path)?))
    }

    pub fn error_to(file: impl Sink + 'static) -> Self {
        Handler::Error { file: Box::new(file) }
    }

    pub fn fatal_error() -> Self {
        Handler::FatalError
    }

    pub fn unknown() -> Self {
        Handler::Unknown
    }

    pub fn severity(&self) -> Severity {
        match self {
            Handler::Warning { .. } => Severity::Warning,
            Handler::Error { .. } => Severity::Error,
            Handler::FatalError => Severity::FatalError,
            Handler::Unknown => Severity::Unknown,
        }
    }

    pub fn handles(&self, message: &LogMessage) -> bool {
        self.severity() == message.severity()
    }

    // Callers only invoke this for a matching message
    pub(crate) fn handle(&mut self, message: &LogMessage) -> Result<(), DispatchError> {
        debug_assert!(self.handles(message));
        match self {
            Handler::Warning { console } => {
                console.write_line(&format!("Warning: {}", message.text()))?;
            }
            Handler::Error { file } => {
                file.write_line(&format!("Error: {}", message.text()))?;
            }
            Handler::FatalError => {
                return Err(DispatchError::Fatal(format!("Fatal Error: {}", message.text())));
            }
            Handler::Unknown => {
                return Err(DispatchError::Unknown(format!("Unknown Message: {}", message.text())));
            }
        }
        debug!(target: "chain", "{} handler wrote message", self.severity());

        Ok(())
    }
}
