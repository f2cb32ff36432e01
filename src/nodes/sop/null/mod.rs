//! Null node - passes its input through unchanged

use crate::geometry::Geometry;
use crate::nodes::factory::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};
use crate::nodes::{ComputeNode, CookContext, CookError, NodeHeader, NodeId, NodeKind};
use std::any::Any;
use std::sync::Arc;

#[derive(Default)]
pub struct NullNodeFactory;

impl NodeFactory for NullNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "Null",
            "Null",
            NodeCategory::utility(),
            "Pass-through, typically used as a display or output marker",
        )
        .with_inputs(vec![PortDefinition::new("Input")])
        .with_tags(vec!["utility", "passthrough", "output"])
    }

    fn create(id: NodeId) -> Box<dyn ComputeNode> {
        Box::new(NullNode::new(id))
    }
}

#[derive(Debug, Clone)]
pub struct NullNode {
    header: NodeHeader,
}

impl NullNode {
    pub fn new(id: NodeId) -> Self {
        Self {
            header: NodeHeader::new(id, "null1"),
        }
    }
}

impl NodeKind for NullNode {
    const TYPE_TAG: &'static str = "Null";
}

impl ComputeNode for NullNode {
    fn header(&self) -> &NodeHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut NodeHeader {
        &mut self.header
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn cook(&self, _ctx: &CookContext, inputs: &[Arc<Geometry>]) -> Result<Geometry, CookError> {
        Ok(inputs
            .first()
            .map(|input| input.as_ref().clone())
            .unwrap_or_default())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
