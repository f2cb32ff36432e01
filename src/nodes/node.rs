//! Compute node trait and the state every node kind shares

use crate::geometry::{Geometry, GeometryError};
use crate::nodes::interface::{Parameter, ParameterChange, ParameterError};
use std::any::Any;
use std::sync::Arc;
use thiserror::Error;

use crate::constants;

/// Unique identifier for a node. Zero is reserved for "no node".
pub type NodeId = usize;

/// Per-cook information handed to [`ComputeNode::cook`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookContext {
    /// The node being cooked
    pub node_id: NodeId,
}

impl CookContext {
    pub fn new(node_id: NodeId) -> Self {
        Self { node_id }
    }
}

/// Why a node could not produce geometry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookError {
    #[error("node {node} ({type_tag}) failed to cook: {reason}")]
    Failed {
        node: NodeId,
        type_tag: &'static str,
        reason: String,
    },
    #[error("node {node} produced invalid geometry")]
    InvalidGeometry {
        node: NodeId,
        #[source]
        source: GeometryError,
    },
    #[error("node {node} depends on itself")]
    Cycle { node: NodeId },
}

impl CookError {
    /// Node the failure is attributed to
    pub fn node(&self) -> NodeId {
        match self {
            CookError::Failed { node, .. }
            | CookError::InvalidGeometry { node, .. }
            | CookError::Cycle { node } => *node,
        }
    }
}

/// Identity, display name and parameter revision of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeHeader {
    id: NodeId,
    name: String,
    param_revision: u64,
}

impl NodeHeader {
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            param_revision: constants::node::INITIAL_REVISION,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn param_revision(&self) -> u64 {
        self.param_revision
    }

    pub fn bump_param_revision(&mut self) {
        self.param_revision += 1;
    }
}

/// A unit of computation in the graph.
///
/// `cook` must be a pure function of the node's current parameters and the
/// supplied inputs: calling it twice with the same inputs yields identical
/// output. The cooker's cache relies on this.
pub trait ComputeNode: Any + Send + Sync {
    fn header(&self) -> &NodeHeader;

    fn header_mut(&mut self) -> &mut NodeHeader;

    /// Stable tag used for registry dispatch and arity rules
    fn type_tag(&self) -> &'static str;

    /// Produce this node's geometry from its connected inputs, in slot order.
    /// Unconnected slots are not represented in `inputs`.
    fn cook(&self, ctx: &CookContext, inputs: &[Arc<Geometry>]) -> Result<Geometry, CookError>;

    /// Current values of the editable parameters
    fn parameters(&self) -> Vec<Parameter> {
        Vec::new()
    }

    /// Write one parameter. Does not bump the revision; the caller bumps
    /// once per logical edit.
    fn set_parameter(&mut self, change: &ParameterChange) -> Result<(), ParameterError> {
        Err(ParameterError::unknown(change))
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn id(&self) -> NodeId {
        self.header().id()
    }

    fn name(&self) -> &str {
        self.header().name()
    }

    fn set_name(&mut self, name: String) {
        self.header_mut().set_name(name);
    }

    fn param_revision(&self) -> u64 {
        self.header().param_revision()
    }

    fn bump_param_revision(&mut self) {
        self.header_mut().bump_param_revision();
    }
}

/// A node kind whose type tag is known statically. Needed for typed access
/// such as `Session::edit`.
pub trait NodeKind: ComputeNode {
    const TYPE_TAG: &'static str;
}

impl std::fmt::Debug for dyn ComputeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComputeNode")
            .field("id", &self.id())
            .field("type_tag", &self.type_tag())
            .field("name", &self.name())
            .field("param_revision", &self.param_revision())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_revision_starts_at_one() {
        let mut header = NodeHeader::new(7, "grid1");
        assert_eq!(header.id(), 7);
        assert_eq!(header.param_revision(), 1);

        header.set_name("Grid7");
        assert_eq!(header.param_revision(), 1);

        header.bump_param_revision();
        assert_eq!(header.param_revision(), 2);
    }

    #[test]
    fn test_cook_error_node() {
        let err = CookError::Cycle { node: 3 };
        assert_eq!(err.node(), 3);
        assert_eq!(err.to_string(), "node 3 depends on itself");
    }
}
