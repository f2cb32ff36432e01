//! Surface operator nodes: the built-in geometry kinds

pub mod grid;
pub mod merge;
pub mod null;
pub mod transform;

pub use grid::{GridNode, GridNodeFactory};
pub use merge::{MergeNode, MergeNodeFactory};
pub use null::{NullNode, NullNodeFactory};
pub use transform::{TransformNode, TransformNodeFactory};

use crate::nodes::NodeRegistry;

/// Register Grid, Transform, Merge and Null
pub fn register_builtin_nodes(registry: &mut NodeRegistry) {
    registry.register_factory::<GridNodeFactory>();
    registry.register_factory::<TransformNodeFactory>();
    registry.register_factory::<MergeNodeFactory>();
    registry.register_factory::<NullNodeFactory>();
}
