//! Grid generator node

pub mod logic;
pub mod parameters;

use crate::constants::grid::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_SIZE};
use crate::geometry::Geometry;
use crate::nodes::factory::{NodeCategory, NodeFactory, NodeMetadata};
use crate::nodes::interface::{Parameter, ParameterChange, ParameterError};
use crate::nodes::{ComputeNode, CookContext, CookError, NodeHeader, NodeId, NodeKind};
use std::any::Any;
use std::sync::Arc;

#[derive(Default)]
pub struct GridNodeFactory;

impl NodeFactory for GridNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "Grid",
            "Grid",
            NodeCategory::generators(),
            "Planar lattice of points triangulated into quads",
        )
        .with_tags(vec!["geometry", "primitive", "grid", "plane"])
    }

    fn create(id: NodeId) -> Box<dyn ComputeNode> {
        Box::new(GridNode::new(id))
    }
}

/// Generates a `rows x cols` lattice spanning `size` units. Takes no inputs.
#[derive(Debug, Clone)]
pub struct GridNode {
    header: NodeHeader,
    pub rows: u32,
    pub cols: u32,
    pub size: f32,
}

impl GridNode {
    pub fn new(id: NodeId) -> Self {
        Self {
            header: NodeHeader::new(id, "grid1"),
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            size: DEFAULT_SIZE,
        }
    }
}

impl NodeKind for GridNode {
    const TYPE_TAG: &'static str = "Grid";
}

impl ComputeNode for GridNode {
    fn header(&self) -> &NodeHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut NodeHeader {
        &mut self.header
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn cook(&self, ctx: &CookContext, _inputs: &[Arc<Geometry>]) -> Result<Geometry, CookError> {
        logic::build_grid(self.rows, self.cols, self.size).ok_or_else(|| CookError::Failed {
            node: ctx.node_id,
            type_tag: self.type_tag(),
            reason: format!("{} x {} lattice exceeds the index range", self.rows, self.cols),
        })
    }

    fn parameters(&self) -> Vec<Parameter> {
        parameters::list(self)
    }

    fn set_parameter(&mut self, change: &ParameterChange) -> Result<(), ParameterError> {
        parameters::apply(self, change)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
