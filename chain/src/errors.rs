use crate::chain::NodeId;
use crate::sink::SinkError;
use std::fmt;
use std::fmt::Display;

pub type ChainResult<T> = Result<T, ChainError>;

// Failures while building a chain. A chain that was built without one of these is acyclic.
#[derive(thiserror::Error, Debug)]
pub enum ChainError {
    UnknownNode(NodeId),
    SelfLink(NodeId),
    AlreadyLinked(NodeId),
    Cycle { from: NodeId, to: NodeId },
    Empty,
    Sink(#[from] SinkError),
}

impl Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChainError::UnknownNode(id) => write!(f, "Node {} does not belong to this chain", id),
            ChainError::SelfLink(id) => write!(f, "Node {} cannot be its own successor", id),
            ChainError::AlreadyLinked(id) => write!(f, "Node {} already has a successor", id),
            ChainError::Cycle { from, to } => {
                write!(f, "Linking node {} to node {} would form a cycle", from, to)
            }
            ChainError::Empty => write!(f, "A chain needs at least one handler"),
            ChainError::Sink(err) => write!(f, "Could not open sink: {}", err),
        }
    }
}

// Everything `submit` can end in besides a normal return. Fatal and Unknown are the abortive
// signals; their payload is the complete human-readable message.
#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    Fatal(String),
    Unknown(String),
    Sink(#[from] SinkError),
    UnknownEntry(NodeId),
}

impl DispatchError {
    pub fn is_abort(&self) -> bool {
        matches!(self, DispatchError::Fatal(_) | DispatchError::Unknown(_))
    }
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let err: &dyn Display = match self {
            DispatchError::Fatal(message) => message,
            DispatchError::Unknown(message) => message,
            DispatchError::Sink(err) => err,
            DispatchError::UnknownEntry(id) => {
                return write!(f, "Entry node {} does not belong to this chain", id)
            }
        };
        write!(f, "{}", err)
    }
}
