use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

pub mod config;

// The classification a message is routed by. Closed on purpose: every handler node in a chain is
// bound to exactly one of these.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
    FatalError,
    Unknown,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Warning,
        Severity::Error,
        Severity::FatalError,
        Severity::Unknown,
    ];
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::FatalError => "Fatal Error",
            Severity::Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
pub struct LogMessage {
    severity: Severity,
    #[serde(default)]
    text: String,
}

impl LogMessage {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
