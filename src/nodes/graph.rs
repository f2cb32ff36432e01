//! Node graph data structures and operations

use super::node::{ComputeNode, NodeId};
use crate::constants;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use thiserror::Error;

/// Input slot index on a destination node
pub type SlotIndex = usize;

/// One wire: `source` feeds `slot` of `destination`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    pub source: NodeId,
    pub destination: NodeId,
    pub slot: SlotIndex,
}

impl Connection {
    pub fn new(source: NodeId, destination: NodeId, slot: SlotIndex) -> Self {
        Self {
            source,
            destination,
            slot,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node {0} is already in the graph")]
    DuplicateNode(NodeId),
    #[error("node id 0 is reserved")]
    ReservedId,
}

/// Owns every node and the wiring between them.
///
/// The topology revision starts at 1 and increases on every structural edit;
/// parameter edits never touch it.
#[derive(Debug)]
pub struct Graph {
    nodes: BTreeMap<NodeId, Box<dyn ComputeNode>>,
    /// destination -> (slot -> source)
    inputs: BTreeMap<NodeId, BTreeMap<SlotIndex, NodeId>>,
    topology_revision: u64,
}

impl Graph {
    /// Creates a new empty graph
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            inputs: BTreeMap::new(),
            topology_revision: constants::node::INITIAL_REVISION,
        }
    }

    /// Take ownership of `node`, keyed by its own identity
    pub fn add_node(&mut self, node: Box<dyn ComputeNode>) -> Result<NodeId, GraphError> {
        let id = node.id();
        if id == constants::node::RESERVED_ID {
            return Err(GraphError::ReservedId);
        }
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        self.nodes.insert(id, node);
        self.topology_revision += 1;
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&dyn ComputeNode> {
        self.nodes.get(&id).map(|node| node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut dyn ComputeNode> {
        match self.nodes.get_mut(&id) {
            Some(node) => Some(node.as_mut()),
            None => None,
        }
    }

    /// Typed lookup, `None` if the node is missing or of another kind
    pub fn get_as<T: ComputeNode>(&self, id: NodeId) -> Option<&T> {
        self.get(id)?.as_any().downcast_ref::<T>()
    }

    pub fn get_as_mut<T: ComputeNode>(&mut self, id: NodeId) -> Option<&mut T> {
        self.get_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All node ids in ascending order
    pub fn all_node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    /// Wire `src` into `slot` of `dst`, replacing any previous source.
    /// No cycle check is made here.
    pub fn connect(&mut self, src: NodeId, dst: NodeId, slot: SlotIndex) {
        self.inputs.entry(dst).or_default().insert(slot, src);
        self.topology_revision += 1;
    }

    /// Remove the source of `slot` on `dst`; returns the removed source
    pub fn disconnect(&mut self, dst: NodeId, slot: SlotIndex) -> Option<NodeId> {
        let slots = self.inputs.get_mut(&dst)?;
        let removed = slots.remove(&slot)?;
        if slots.is_empty() {
            self.inputs.remove(&dst);
        }
        self.topology_revision += 1;
        Some(removed)
    }

    /// Sources feeding `dst`, ordered by slot. Unconnected slots are skipped.
    pub fn inputs_of(&self, dst: NodeId) -> Vec<NodeId> {
        self.inputs
            .get(&dst)
            .map(|slots| slots.values().copied().collect())
            .unwrap_or_default()
    }

    /// Like [`inputs_of`](Self::inputs_of) but keeps the slot index
    pub fn input_slots_of(&self, dst: NodeId) -> Vec<(SlotIndex, NodeId)> {
        self.inputs
            .get(&dst)
            .map(|slots| slots.iter().map(|(&slot, &src)| (slot, src)).collect())
            .unwrap_or_default()
    }

    /// Nodes that consume `src`, ascending and de-duplicated
    pub fn outputs_of(&self, src: NodeId) -> Vec<NodeId> {
        self.inputs
            .iter()
            .filter(|(_, slots)| slots.values().any(|&s| s == src))
            .map(|(&dst, _)| dst)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every wire, ordered by destination then slot
    pub fn connections(&self) -> Vec<Connection> {
        self.inputs
            .iter()
            .flat_map(|(&dst, slots)| {
                slots
                    .iter()
                    .map(move |(&slot, &src)| Connection::new(src, dst, slot))
            })
            .collect()
    }

    /// Whether `ancestor` is reachable by walking the inputs of `node`.
    /// A node depends on itself.
    pub fn depends_on(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if current == ancestor {
                return true;
            }
            if visited.insert(current) {
                stack.extend(self.inputs_of(current));
            }
        }
        false
    }

    pub fn topology_revision(&self) -> u64 {
        self.topology_revision
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
