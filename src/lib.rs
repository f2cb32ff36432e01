//! sopgraph core library
//!
//! Procedural geometry as a dataflow graph: node kinds produce triangle
//! meshes from their inputs, and a memoized cooker evaluates any node on
//! demand, recooking only what an edit made stale.

pub mod constants;
pub mod geometry;
pub mod nodes;
pub mod session;
pub mod settings;

// Re-export commonly used types
pub use geometry::{Geometry, GeometryError, Triangle};
pub use nodes::{ComputeNode, CookError, Cooker, Graph, NodeId, NodeRegistry};
pub use session::{EditError, Session};
pub use settings::{Settings, SettingsError};
