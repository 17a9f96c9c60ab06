use std::collections::HashSet;
use std::path::Path;

use chain::command::{execute_log_command, ConsoleLogCommand, FileLogCommand};
use chain::observer::{
    ConsoleFileFatalErrorObserver, ConsoleWarningObserver, FileErrorObserver, Observable,
};
use chain::{Chain, ChainError, Dispatch, DispatchError, Handler, NodeId};
use common::types::config::{Config, REFERENCE_CHAIN};
use common::types::{LogMessage, Severity};
use common::util::logging;
use log::{debug, error, info, warn};

use crate::bootstrap_config::BootstrapConfig;
use crate::LogchainError;

pub(crate) fn sample_messages() -> Vec<LogMessage> {
    vec![
        LogMessage::new(Severity::Warning, "Sample Warning"),
        LogMessage::new(Severity::Error, "Sample Error"),
        LogMessage::new(Severity::FatalError, "Sample Fatal Error"),
        LogMessage::new(Severity::Unknown, "Unknown Message"),
    ]
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub(crate) struct Summary {
    pub(crate) handled: usize,
    pub(crate) dropped: usize,
    pub(crate) aborted: usize,
}

pub(super) fn run_chain(bootstrap: &BootstrapConfig, script: Option<Config>) -> Result<(), LogchainError> {
    let (severities, error_log, messages) = match &script {
        Some(config) => (
            config.chain().to_vec(),
            config.error_log().unwrap_or(bootstrap.error_log.as_path()),
            config.messages().to_vec(),
        ),
        None => (REFERENCE_CHAIN.to_vec(), bootstrap.error_log.as_path(), sample_messages()),
    };

    let (mut chain, entry) = build_chain(&severities, error_log)?;
    info!(target: "main", "Chain built with {} nodes, error log at {:?}", chain.len(), error_log);

    let summary = logging::run_with_spinner("main", "Submitting messages", || {
        submit_all(&mut chain, entry, &messages)
    })?;

    info!(
        target: "main",
        "{} messages handled, {} dropped, {} aborted",
        summary.handled, summary.dropped, summary.aborted
    );
    Ok(())
}

pub(crate) fn build_chain(severities: &[Severity], error_log: &Path) -> Result<(Chain, NodeId), ChainError> {
    let mut seen = HashSet::new();
    let mut handlers = Vec::with_capacity(severities.len());

    for severity in severities {
        if !seen.insert(*severity) {
            warn!(target: "main", "{} appears more than once in the chain, only the first node will ever act", severity);
        }
        let handler = match severity {
            Severity::Warning => Handler::warning(),
            Severity::Error => Handler::error(error_log)?,
            Severity::FatalError => Handler::fatal_error(),
            Severity::Unknown => Handler::unknown(),
        };
        handlers.push(handler);
    }

    Chain::linear(handlers)
}

// Abortive signals are recovered per message, so one fatal message does not swallow the ones
// after it. Sink failures end the run.
pub(crate) fn submit_all(chain: &mut Chain, entry: NodeId, messages: &[LogMessage]) -> Result<Summary, DispatchError> {
    let mut summary = Summary::default();

    for message in messages {
        match chain.submit(entry, message) {
            Ok(Dispatch::Handled(node)) => {
                debug!(target: "main", "{} message handled by node {}", message.severity(), node);
                summary.handled += 1;
            }
            Ok(Dispatch::Dropped) => {
                debug!(target: "main", "{} message dropped", message.severity());
                summary.dropped += 1;
            }
            Err(err) if err.is_abort() => {
                logging::suspend(|| eprintln!("Exception caught: {}", err));
                error!(target: "main", "Recovered from abortive signal: {}", err);
                summary.aborted += 1;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(summary)
}

pub(super) fn run_command(bootstrap: &BootstrapConfig) -> Result<(), LogchainError> {
    let mut console_logger = ConsoleLogCommand::new();
    let mut file_logger = FileLogCommand::create(&bootstrap.command_log)?;

    execute_log_command(&mut console_logger, "Message for Console Logger")?;
    execute_log_command(&mut file_logger, "Message for File Logger")?;

    info!(target: "main", "Command log written to {:?}", file_logger.path());
    Ok(())
}

pub(super) fn run_observer(bootstrap: &BootstrapConfig) -> Result<(), LogchainError> {
    let mut logger = Observable::new();
    logger.add_observer(ConsoleWarningObserver::new());
    logger.add_observer(FileErrorObserver::create(&bootstrap.error_log)?);
    logger.add_observer(ConsoleFileFatalErrorObserver::create(&bootstrap.fatal_log)?);

    logger.warning("Warning message")?;
    logger.error("Error message")?;
    logger.fatal_error("Fatal error message")?;

    info!(target: "main", "Notified {} observers", logger.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain::FileSink;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_all_sample_messages_are_submitted() {
        let dir = tempdir().unwrap();
        let error_log = dir.path().join("error_log.txt");
        let console_log = dir.path().join("console.txt");

        let mut chain = Chain::new();
        let error = chain.add(Handler::error(&error_log).unwrap());
        let warning = chain.add(Handler::warning_to(FileSink::create(&console_log).unwrap()));
        let fatal = chain.add(Handler::fatal_error());
        let unknown = chain.add(Handler::unknown());
        chain.link(error, warning).unwrap();
        chain.link(warning, fatal).unwrap();
        chain.link(fatal, unknown).unwrap();

        let summary = submit_all(&mut chain, error, &sample_messages()).unwrap();

        assert_eq!(summary, Summary { handled: 2, dropped: 0, aborted: 2 });
        assert_eq!(fs::read_to_string(&console_log).unwrap(), "Warning: Sample Warning\n");
        assert_eq!(fs::read_to_string(&error_log).unwrap(), "Error: Sample Error\n");
    }

    #[test]
    fn test_chain_without_unknown_node_drops() {
        let dir = tempdir().unwrap();
        let error_log = dir.path().join("error_log.txt");
        let (mut chain, entry) = build_chain(&[Severity::Error, Severity::FatalError], &error_log).unwrap();

        let messages = [
            LogMessage::new(Severity::Unknown, "x"),
            LogMessage::new(Severity::Warning, "y"),
            LogMessage::new(Severity::Error, "z"),
        ];
        let summary = submit_all(&mut chain, entry, &messages).unwrap();

        assert_eq!(summary, Summary { handled: 1, dropped: 2, aborted: 0 });
        assert_eq!(fs::read_to_string(&error_log).unwrap(), "Error: z\n");
    }

    #[test]
    fn test_build_chain_keeps_order() {
        let dir = tempdir().unwrap();
        let (chain, entry) = build_chain(&REFERENCE_CHAIN, &dir.path().join("error_log.txt")).unwrap();

        let order: Vec<_> = chain.path(entry).filter_map(|id| chain.severity_of(id)).collect();

        assert_eq!(order, REFERENCE_CHAIN.to_vec());
    }

    #[test]
    fn test_build_chain_fails_on_unwritable_error_log() {
        let dir = tempdir().unwrap();

        let result = build_chain(&[Severity::Error], &dir.path().join("missing").join("error_log.txt"));

        assert!(matches!(result, Err(ChainError::Sink(_))));
    }

    #[test]
    fn test_command_and_observer_files() {
        let dir = tempdir().unwrap();
        let bootstrap = BootstrapConfig {
            config_file: None,
            log_level: Default::default(),
            pattern: Default::default(),
            error_log: dir.path().join("error_log.txt"),
            fatal_log: dir.path().join("fatal_error_log.txt"),
            command_log: dir.path().join("log.txt"),
        };

        run_command(&bootstrap).unwrap();
        run_observer(&bootstrap).unwrap();

        assert_eq!(fs::read_to_string(&bootstrap.command_log).unwrap(), "File Log: Message for File Logger\n");
        assert_eq!(
            fs::read_to_string(&bootstrap.error_log).unwrap(),
            "File Error: Error message\nFile Fatal Error: Fatal error message\n"
        );
        assert_eq!(
            fs::read_to_string(&bootstrap.fatal_log).unwrap(),
            "File Error: Error message\nFile Fatal Error: Fatal error message\n"
        );
    }
}
