use std::path::Path;

use log::debug;

use crate::sink::{ConsoleSink, FileSink, Sink, SinkError};

// Every observer hears about every message. Kinds an observer does not care about fall through to
// the empty defaults.
pub trait Observer {
    fn on_warning(&mut self, _message: &str) -> Result<(), SinkError> {
        Ok(())
    }

    fn on_error(&mut self, _message: &str) -> Result<(), SinkError> {
        Ok(())
    }

    fn on_fatal_error(&mut self, _message: &str) -> Result<(), SinkError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct Observable {
    observers: Vec<Box<dyn Observer>>,
}

impl Observable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_observer(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn warning(&mut self, message: &str) -> Result<(), SinkError> {
        self.notify("warning", |observer| observer.on_warning(message))
    }

    pub fn error(&mut self, message: &str) -> Result<(), SinkError> {
        self.notify("error", |observer| observer.on_error(message))
    }

    pub fn fatal_error(&mut self, message: &str) -> Result<(), SinkError> {
        self.notify("fatal error", |observer| observer.on_fatal_error(message))
    }

    // Registration order; the first failing observer stops the notification
    fn notify<F>(&mut self, kind: &str, mut event: F) -> Result<(), SinkError>
    where
        F: FnMut(&mut dyn Observer) -> Result<(), SinkError>,
    {
        debug!(target: "observer", "Notifying {} observers of {}", self.observers.len(), kind);
        for observer in self.observers.iter_mut() {
            event(observer.as_mut())?;
        }
        Ok(())
    }
}

pub struct ConsoleWarningObserver<S: Sink = ConsoleSink> {
    console: S,
}

impl ConsoleWarningObserver {
    pub fn new() -> Self {
        Self::with_sink(ConsoleSink::stdout())
    }
}

impl Default for ConsoleWarningObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sink> ConsoleWarningObserver<S> {
    pub fn with_sink(console: S) -> Self {
        Self { console }
    }
}

impl<S: Sink> Observer for ConsoleWarningObserver<S> {
    fn on_warning(&mut self, message: &str) -> Result<(), SinkError> {
        self.console.write_line(&format!("Console Warning: {}", message))
    }
}

pub struct FileErrorObserver<S: Sink = FileSink> {
    file: S,
}

impl FileErrorObserver {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        Ok(Self::with_sink(FileSink::create(path)?))
    }
}

impl<S: Sink> FileErrorObserver<S> {
    pub fn with_sink(file: S) -> Self {
        Self { file }
    }
}

impl<S: Sink> Observer for FileErrorObserver<S> {
    fn on_error(&mut self, message: &str) -> Result<(), SinkError> {
        self.file.write_line(&format!("File Error: {}", message))
    }

    fn on_fatal_error(&mut self, message: &str) -> Result<(), SinkError> {
        self.file.write_line(&format!("File Fatal Error: {}", message))
    }
}

// Warnings to the console, errors to the file, fatal errors to both
pub struct ConsoleFileFatalErrorObserver<C: Sink = ConsoleSink, F: Sink = FileSink> {
    console: C,
    file: F,
}

impl ConsoleFileFatalErrorObserver {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        Ok(Self::with_sinks(ConsoleSink::stdout(), FileSink::create(path)?))
    }
}

impl<C: Sink, F: Sink> ConsoleFileFatalErrorObserver<C, F> {
    pub fn with_sinks(console: C, file: F) -> Self {
        Self { console, file }
    }
}

impl<C: Sink, F: Sink> Observer for ConsoleFileFatalErrorObserver<C, F> {
    fn on_warning(&mut self, message: &str) -> Result<(), SinkError> {
        self.console.write_line(&format!("Console Warning: {}", message))
    }

    fn on_error(&mut self, message: &str) -> Result<(), SinkError> {
        self.file.write_line(&format!("File Error: {}", message))
    }

    fn on_fatal_error(&mut self, message: &str) -> Result<(), SinkError> {
        self.console.write_line(&format!("Console Fatal Error: {}", message))?;
        self.file.write_line(&format!("File Fatal Error: {}", message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::CaptureSink;

    struct FailingObserver;

    impl Observer for FailingObserver {
        fn on_error(&mut self, _message: &str) -> Result<(), SinkError> {
            Err(SinkError::Closed)
        }
    }

    #[test]
    fn test_fan_out() {
        let console = CaptureSink::default();
        let error_file = CaptureSink::default();
        let fatal_console = CaptureSink::default();
        let fatal_file = CaptureSink::default();

        let mut logger = Observable::new();
        logger.add_observer(ConsoleWarningObserver::with_sink(console.clone()));
        logger.add_observer(FileErrorObserver::with_sink(error_file.clone()));
        logger.add_observer(ConsoleFileFatalErrorObserver::with_sinks(fatal_console.clone(), fatal_file.clone()));
        assert_eq!(logger.len(), 3);

        logger.warning("Warning message").unwrap();
        logger.error("Error message").unwrap();
        logger.fatal_error("Fatal error message").unwrap();

        assert_eq!(console.lines(), vec!["Console Warning: Warning message"]);
        assert_eq!(error_file.lines(), vec!["File Error: Error message", "File Fatal Error: Fatal error message"]);
        assert_eq!(
            fatal_console.lines(),
            vec!["Console Warning: Warning message", "Console Fatal Error: Fatal error message"]
        );
        assert_eq!(fatal_file.lines(), vec!["File Error: Error message", "File Fatal Error: Fatal error message"]);
    }

    #[test]
    fn test_no_observers() {
        let mut logger = Observable::new();

        assert!(logger.is_empty());
        logger.warning("nobody listens").unwrap();
    }

    #[test]
    fn test_failure_stops_notification() {
        let later = CaptureSink::default();
        let mut logger = Observable::new();
        logger.add_observer(FailingObserver);
        logger.add_observer(FileErrorObserver::with_sink(later.clone()));

        assert!(matches!(logger.error("lost"), Err(SinkError::Closed)));
        assert!(later.lines().is_empty());
        // kinds the failing observer ignores still go through
        logger.fatal_error("kept").unwrap();
        assert_eq!(later.lines(), vec!["File Fatal Error: kept"]);
    }
}
