//! Merge node - concatenates its inputs into one geometry

pub mod logic;

use crate::geometry::Geometry;
use crate::nodes::factory::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};
use crate::nodes::{ComputeNode, CookContext, CookError, NodeHeader, NodeId, NodeKind};
use std::any::Any;
use std::sync::Arc;

#[derive(Default)]
pub struct MergeNodeFactory;

impl NodeFactory for MergeNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "Merge",
            "Merge",
            NodeCategory::modifiers(),
            "Combines two geometries, keeping their triangles intact",
        )
        .with_inputs(vec![
            PortDefinition::new("First"),
            PortDefinition::new("Second"),
        ])
        .with_tags(vec!["geometry", "merge", "combine"])
    }

    fn create(id: NodeId) -> Box<dyn ComputeNode> {
        Box::new(MergeNode::new(id))
    }
}

#[derive(Debug, Clone)]
pub struct MergeNode {
    header: NodeHeader,
}

impl MergeNode {
    pub fn new(id: NodeId) -> Self {
        Self {
            header: NodeHeader::new(id, "merge1"),
        }
    }
}

impl NodeKind for MergeNode {
    const TYPE_TAG: &'static str = "Merge";
}

impl ComputeNode for MergeNode {
    fn header(&self) -> &NodeHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut NodeHeader {
        &mut self.header
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn cook(&self, ctx: &CookContext, inputs: &[Arc<Geometry>]) -> Result<Geometry, CookError> {
        logic::merge_geometries(inputs).map_err(|reason| CookError::Failed {
            node: ctx.node_id,
            type_tag: self.type_tag(),
            reason,
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
