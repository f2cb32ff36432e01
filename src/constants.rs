//! Crate-wide constants and default values
//!
//! Centralized location for hard-coded values so node kinds, the session and
//! the settings loader agree on them.

use crate::nodes::NodeId;

/// Node identity constants
pub mod node {
    use super::NodeId;

    /// Identity reserved to mean "no node" (nothing selected or displayed)
    pub const RESERVED_ID: NodeId = 0;

    /// First identity handed out by a session
    pub const FIRST_ID: NodeId = 1;

    /// Starting value of every parameter revision and of the topology revision
    pub const INITIAL_REVISION: u64 = 1;
}

/// Grid generator defaults
pub mod grid {
    pub const DEFAULT_ROWS: u32 = 20;
    pub const DEFAULT_COLS: u32 = 20;
    pub const DEFAULT_SIZE: f32 = 1.0;

    /// Rows and columns are clamped to this at cook time
    pub const MIN_DIVISIONS: u32 = 2;

    /// Upper bound accepted through the parameter interface
    pub const MAX_DIVISIONS: u32 = 4096;
}

/// Transform defaults
pub mod transform {
    pub const DEFAULT_UNIFORM_SCALE: f32 = 1.0;
}

/// Settings file location
pub mod settings {
    /// Directory created under the platform config dir
    pub const APP_DIR: &str = "sopgraph";

    pub const FILE_NAME: &str = "settings.json";

    pub const DEFAULT_LOG_FILTER: &str = "info";
}
