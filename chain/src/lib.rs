pub mod chain;
pub mod command;
pub mod errors;
pub mod handler;
pub mod observer;
pub mod sink;

pub use chain::{reference_chain, Chain, Dispatch, NodeId};
pub use errors::{ChainError, DispatchError};
pub use handler::Handler;
pub use sink::{ConsoleSink, FileSink, Sink, SinkError};
