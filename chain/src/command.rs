use std::path::Path;

use log::debug;

use crate::sink::{ConsoleSink, FileSink, Sink, SinkError};

// A destination that prints a single message with its own prefix. No routing, the caller picks
// the command.
pub trait LogCommand {
    fn print(&mut self, message: &str) -> Result<(), SinkError>;
}

pub struct ConsoleLogCommand<S: Sink = ConsoleSink> {
    console: S,
}

impl ConsoleLogCommand {
    pub fn new() -> Self {
        Self::with_sink(ConsoleSink::stdout())
    }
}

impl Default for ConsoleLogCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sink> ConsoleLogCommand<S> {
    pub fn with_sink(console: S) -> Self {
        Self { console }
    }
}

impl<S: Sink> LogCommand for ConsoleLogCommand<S> {
    fn print(&mut self, message: &str) -> Result<(), SinkError> {
        self.console.write_line(&format!("Console Log: {}", message))
    }
}

pub struct FileLogCommand {
    file: FileSink,
}

impl FileLogCommand {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        Ok(Self { file: FileSink::create(path)? })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl LogCommand for FileLogCommand {
    fn print(&mut self, message: &str) -> Result<(), SinkError> {
        self.file.write_line(&format!("File Log: {}", message))
    }
}

pub fn execute_log_command(command: &mut dyn LogCommand, message: &str) -> Result<(), SinkError> {
    debug!(target: "command", "Executing log command");
    command.print(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::CaptureSink;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_console_command() {
        let console = CaptureSink::default();
        let mut command = ConsoleLogCommand::with_sink(console.clone());

        execute_log_command(&mut command, "Message for Console Logger").unwrap();

        assert_eq!(console.lines(), vec!["Console Log: Message for Console Logger"]);
    }

    #[test]
    fn test_file_command() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");

        {
            let mut command = FileLogCommand::create(&path).unwrap();
            assert_eq!(command.path(), path.as_path());
            execute_log_command(&mut command, "Message for File Logger").unwrap();
            execute_log_command(&mut command, "").unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "File Log: Message for File Logger\nFile Log: \n");
    }
}
