//! Node system - graph storage, node kinds and the memoized cooker

// Core node system modules
pub mod cache;
pub mod cooker;
pub mod factory;
pub mod graph;
pub mod interface;
pub mod node;

// Built-in geometry kinds
pub mod sop;

// Re-export core types
pub use graph::{Connection, Graph, GraphError, SlotIndex};
pub use node::{ComputeNode, CookContext, CookError, NodeHeader, NodeId, NodeKind};

// Re-export factory types
pub use factory::{input_arity, NodeCategory, NodeFactory, NodeMetadata, NodeRegistry, PortDefinition};

// Re-export interface types
pub use interface::{ParamValue, Parameter, ParameterChange, ParameterError};

// Re-export evaluation types
pub use cache::CacheStatistics;
pub use cooker::Cooker;
