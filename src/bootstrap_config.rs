use log::LevelFilter;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[command(version, about)]
pub struct BootstrapConfig {
    // Message script; without one the four sample messages are submitted
    #[clap(short('c'), long("config"), env("LOGCHAIN_CONFIG"))]
    pub config_file: Option<PathBuf>,
    #[clap(short('l'), long("log-level"), env("LOGCHAIN_LOG_LEVEL"), default_value_t, value_enum)]
    pub log_level: LogLevel,
    #[clap(short('p'), long("pattern"), default_value_t, value_enum)]
    pub pattern: Pattern,
    #[clap(short('e'), long("error-log"), env("LOGCHAIN_ERROR_LOG"), default_value = "error_log.txt")]
    pub error_log: PathBuf,
    #[clap(long("fatal-log"), env("LOGCHAIN_FATAL_LOG"), default_value = "fatal_error_log.txt")]
    pub fatal_log: PathBuf,
    #[clap(long("command-log"), env("LOGCHAIN_COMMAND_LOG"), default_value = "log.txt")]
    pub command_log: PathBuf,
}

impl BootstrapConfig {
    pub fn read() -> Self {
        BootstrapConfig::parse()
    }
}


#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Pattern {
    #[default]
    Chain,
    Command,
    Observer,
}
