use std::fmt;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};

use log::debug;

// A line-oriented, append-only text destination. One call writes one line; the line terminator is
// added by the sink.
pub trait Sink {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError>;
}

pub struct ConsoleSink<W: Write = Stdout> {
    out: W,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self { out: std::io::stdout() }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for ConsoleSink<W> {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError> {
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }
}

// Owns its file for as long as it lives. The handle is released either by `close` or, if that
// never happens, when the sink is dropped; never twice.
pub struct FileSink {
    path: PathBuf,
    file: Option<BufWriter<File>>,
}

impl FileSink {
    // Truncates an existing file
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        debug!(target: "chain", "Opened file sink at {:?}", path);

        Ok(Self {
            path,
            file: Some(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    pub fn close(&mut self) -> Result<(), SinkError> {
        match self.file.take() {
            Some(mut file) => {
                file.flush()?;
                debug!(target: "chain", "Closed file sink at {:?}", self.path);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Sink for FileSink {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError> {
        let file = self.file.as_mut().ok_or(SinkError::Closed)?;
        writeln!(file, "{}", line)?;
        file.flush()?;
        Ok(())
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Errors cannot be reported from here; everything written was flushed line by line.
        let _ = self.close();
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    Io(#[from] std::io::Error),
    Closed,
}

impl Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let err: &dyn Display = match self {
            SinkError::Io(err) => err,
            SinkError::Closed => &"Sink is already closed",
        };
        write!(f, "{}", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_console_sink_terminates_lines() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.write_line("first").unwrap();
        sink.write_line("").unwrap();

        assert_eq!(sink.into_inner(), b"first\n\n");
    }

    #[test]
    fn test_file_sink_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("error_log.txt");
        fs::write(&path, "stale content\n").unwrap();

        let mut sink = FileSink::create(&path).unwrap();
        assert_eq!(sink.path(), path.as_path());
        sink.write_line("fresh").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_file_sink_lines_visible_before_close() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");

        let mut sink = FileSink::create(&path).unwrap();
        sink.write_line("a").unwrap();
        sink.write_line("b").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_write_after_close() {
        let dir = tempdir().unwrap();
        let mut sink = FileSink::create(dir.path().join("log.txt")).unwrap();

        sink.close().unwrap();
        assert!(!sink.is_open());
        // closing twice does nothing
        sink.close().unwrap();

        assert!(matches!(sink.write_line("late"), Err(SinkError::Closed)));
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let result = FileSink::create(dir.path().join("missing").join("log.txt"));

        assert!(matches!(result, Err(SinkError::Io(_))));
    }
}
