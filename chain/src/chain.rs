use std::fmt;
use std::fmt::Display;
use std::path::Path;

use common::types::{LogMessage, Severity};
use log::debug;

use crate::errors::{ChainError, ChainResult, DispatchError};
use crate::handler::Handler;

// Index of a node inside the chain that created it
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct NodeId(pub(crate) usize);

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub struct HandlerNode {
    handler: Handler,
    successor: Option<NodeId>,
}

impl HandlerNode {
    pub fn severity(&self) -> Severity {
        self.handler.severity()
    }

    pub fn successor(&self) -> Option<NodeId> {
        self.successor
    }
}

// How a submitted message left the chain when no abortive signal was raised
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Dispatch {
    Handled(NodeId),
    Dropped,
}

/// An arena of handler nodes. Nodes refer to their successor by index. Every node has at most one
/// successor and `link` refuses anything that would close a loop, so the successor graph is
/// acyclic. Two paths may still merge into a shared tail. Nodes (and with them their sinks) are
/// released together when the chain is dropped.
#[derive(Default)]
pub struct Chain {
    nodes: Vec<HandlerNode>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a path in the given order. The returned id is the head, which is where messages
    /// should be submitted.
    pub fn linear(handlers: impl IntoIterator<Item = Handler>) -> ChainResult<(Self, NodeId)> {
        let mut chain = Self::new();
        let mut previous: Option<NodeId> = None;

        for handler in handlers {
            let id = chain.add(handler);
            if let Some(previous) = previous {
                chain.link(previous, id)?;
            }
            previous = Some(id);
        }

        match chain.nodes.first() {
            Some(_) => Ok((chain, NodeId(0))),
            None => Err(ChainError::Empty),
        }
    }

    pub fn add(&mut self, handler: Handler) -> NodeId {
        self.nodes.push(HandlerNode { handler, successor: None });
        NodeId(self.nodes.len() - 1)
    }

    pub fn link(&mut self, from: NodeId, to: NodeId) -> ChainResult<()> {
        self.node(from).ok_or(ChainError::UnknownNode(from))?;
        self.node(to).ok_or(ChainError::UnknownNode(to))?;

        if from == to {
            return Err(ChainError::SelfLink(from));
        }
        if self.nodes[from.0].successor.is_some() {
            return Err(ChainError::AlreadyLinked(from));
        }
        // `from` has no successor yet, so walking from `to` terminates
        if self.path(to).any(|id| id == from) {
            return Err(ChainError::Cycle { from, to });
        }

        self.nodes[from.0].successor = Some(to);
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&HandlerNode> {
        self.nodes.get(id.0)
    }

    pub fn severity_of(&self, id: NodeId) -> Option<Severity> {
        self.node(id).map(HandlerNode::severity)
    }

    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(HandlerNode::successor)
    }

    // Node ids in traversal order, starting with `entry`
    pub fn path(&self, entry: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let first = self.node(entry).map(|_| entry);
        std::iter::successors(first, move |id| self.successor(*id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks from `entry` along the successors and lets the first node bound to the message's
    /// severity act on it. At most one node acts per call. A message no node is bound to is
    /// dropped without any side effect.
    ///
    /// FatalError and Unknown matches come back as [`DispatchError::Fatal`] and
    /// [`DispatchError::Unknown`]; it is up to the caller to recover from them.
    pub fn submit(&mut self, entry: NodeId, message: &LogMessage) -> Result<Dispatch, DispatchError> {
        let mut current = match self.node(entry) {
            Some(_) => entry,
            None => return Err(DispatchError::UnknownEntry(entry)),
        };

        loop {
            let node = &mut self.nodes[current.0];
            if node.handler.handles(message) {
                debug!(target: "chain", "Node {} handles {} message", current, message.severity());
                node.handler.handle(message)?;
                return Ok(Dispatch::Handled(current));
            }

            match node.successor {
                Some(next) => {
                    debug!(target: "chain", "Node {} forwards {} message to node {}", current, message.severity(), next);
                    current = next;
                }
                None => {
                    debug!(target: "chain", "No node handles {} message, dropping it", message.severity());
                    return Ok(Dispatch::Dropped);
                }
            }
        }
    }
}

/// The wiring the reference program uses: Error → Warning → FatalError → Unknown, with the error
/// log at `error_log` and warnings on stdout.
pub fn reference_chain(error_log: impl AsRef<Path>) -> ChainResult<(Chain, NodeId)> {
    Chain::linear([
        Handler::error(error_log)?,
        Handler::warning(),
        Handler::fatal_error(),
        Handler::unknown(),
    ])
}
