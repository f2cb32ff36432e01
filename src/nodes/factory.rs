//! Node factory system: static metadata for built-in kinds and the registry
//! that maps a type tag to a constructor

use crate::nodes::{ComputeNode, NodeId};
use log::debug;
use std::collections::BTreeMap;

/// Hierarchical category used to group kinds in menus
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeCategory {
    path: Vec<String>,
}

impl NodeCategory {
    /// Create a new category from path components
    pub fn new(path: &[&str]) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Get the category name (last component)
    pub fn name(&self) -> &str {
        self.path.last().map(|s| s.as_str()).unwrap_or("")
    }

    /// Get display string for UI
    pub fn display_string(&self) -> String {
        self.path.join(" > ")
    }

    pub fn generators() -> Self {
        Self::new(&["Geometry", "Generate"])
    }

    pub fn modifiers() -> Self {
        Self::new(&["Geometry", "Modify"])
    }

    pub fn utility() -> Self {
        Self::new(&["Utility"])
    }
}

/// Named input port, purely descriptive
#[derive(Debug, Clone, PartialEq)]
pub struct PortDefinition {
    pub name: String,
    pub description: Option<String>,
}

impl PortDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Static description of a node kind
#[derive(Debug, Clone)]
pub struct NodeMetadata {
    pub node_type: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: NodeCategory,
    pub inputs: Vec<PortDefinition>,
    pub tags: Vec<&'static str>,
}

impl NodeMetadata {
    pub fn new(
        node_type: &'static str,
        display_name: &'static str,
        category: NodeCategory,
        description: &'static str,
    ) -> Self {
        Self {
            node_type,
            display_name,
            description,
            category,
            inputs: vec![],
            tags: vec![],
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<PortDefinition>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_tags(mut self, tags: Vec<&'static str>) -> Self {
        self.tags = tags;
        self
    }
}

/// Implemented by built-in kinds so they can be registered by type
pub trait NodeFactory {
    fn metadata() -> NodeMetadata
    where
        Self: Sized;

    /// Create a node instance with the given identity
    fn create(id: NodeId) -> Box<dyn ComputeNode>
    where
        Self: Sized;
}

/// Declared input count for a type tag.
///
/// Arity is a property of the kind, not of the node instance: generators take
/// nothing, merges take two, every other kind takes one.
pub fn input_arity(type_tag: &str) -> usize {
    match type_tag {
        "Grid" => 0,
        "Merge" => 2,
        _ => 1,
    }
}

type NodeCreator = Box<dyn Fn(NodeId) -> Box<dyn ComputeNode> + Send + Sync>;

/// Registry of node constructors keyed by type tag
#[derive(Default)]
pub struct NodeRegistry {
    creators: BTreeMap<String, NodeCreator>,
    metadata: BTreeMap<String, NodeMetadata>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding Grid, Transform, Merge and Null
    pub fn with_builtin_nodes() -> Self {
        let mut registry = Self::new();
        crate::nodes::sop::register_builtin_nodes(&mut registry);
        registry
    }

    /// Register a constructor under `type_name`. A later registration under
    /// the same name replaces this one.
    pub fn register<F>(&mut self, type_name: impl Into<String>, factory: F)
    where
        F: Fn(NodeId) -> Box<dyn ComputeNode> + Send + Sync + 'static,
    {
        let type_name = type_name.into();
        if self.creators.contains_key(&type_name) {
            debug!("Replacing factory for node type '{}'", type_name);
        }
        self.metadata.remove(&type_name);
        self.creators.insert(type_name, Box::new(factory));
    }

    /// Register a statically described kind together with its metadata
    pub fn register_factory<T: NodeFactory + 'static>(&mut self) {
        let metadata = T::metadata();
        let node_type = metadata.node_type.to_string();
        self.register(node_type.clone(), T::create);
        self.metadata.insert(node_type, metadata);
    }

    /// Create a node by type name, `None` if the type is unknown
    pub fn create(&self, type_name: &str, id: NodeId) -> Option<Box<dyn ComputeNode>> {
        let creator = self.creators.get(type_name)?;
        Some(creator(id))
    }

    /// Registered type names in sorted order
    pub fn list_types(&self) -> Vec<String> {
        self.creators.keys().cloned().collect()
    }

    pub fn metadata(&self, type_name: &str) -> Option<&NodeMetadata> {
        self.metadata.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.creators.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.creators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }
}

impl std::fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("types", &self.creators.keys().collect::<Vec<_>>())
            .finish()
    }
}
