//! Transform node - uniform scale and translation of every point

pub mod logic;
pub mod parameters;

use crate::constants::transform::DEFAULT_UNIFORM_SCALE;
use crate::geometry::Geometry;
use crate::nodes::factory::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};
use crate::nodes::interface::{Parameter, ParameterChange, ParameterError};
use crate::nodes::{ComputeNode, CookContext, CookError, NodeHeader, NodeId, NodeKind};
use glam::Vec3;
use std::any::Any;
use std::sync::Arc;

#[derive(Default)]
pub struct TransformNodeFactory;

impl NodeFactory for TransformNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "Transform",
            "Transform",
            NodeCategory::modifiers(),
            "Scales points uniformly about the origin, then translates them",
        )
        .with_inputs(vec![
            PortDefinition::new("Geometry").with_description("Geometry to transform"),
        ])
        .with_tags(vec!["geometry", "transform", "translate", "scale"])
    }

    fn create(id: NodeId) -> Box<dyn ComputeNode> {
        Box::new(TransformNode::new(id))
    }
}

#[derive(Debug, Clone)]
pub struct TransformNode {
    header: NodeHeader,
    pub translate: Vec3,
    pub uniform_scale: f32,
}

impl TransformNode {
    pub fn new(id: NodeId) -> Self {
        Self {
            header: NodeHeader::new(id, "xform1"),
            translate: Vec3::ZERO,
            uniform_scale: DEFAULT_UNIFORM_SCALE,
        }
    }
}

impl NodeKind for TransformNode {
    const TYPE_TAG: &'static str = "Transform";
}

impl ComputeNode for TransformNode {
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
        Ok(match inputs.first() {
            Some(input) => logic::transform_points(input, self.translate, self.uniform_scale),
            None => Geometry::empty(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::interface::ParamValue;

    #[test]
    fn test_missing_input_is_empty() {
        let node = TransformNode::new(2);
        let out = node.cook(&CookContext::new(2), &[]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_cook_applies_fields() {
        let mut node = TransformNode::new(2);
        node.translate = Vec3::new(1.0, 2.0, 3.0);
        node.uniform_scale = 0.5;

        let input = Arc::new(Geometry::new(vec![Vec3::new(2.0, 2.0, 2.0)], vec![]).unwrap());
        let out = node.cook(&CookContext::new(2), &[input]).unwrap();
        assert_eq!(out.points(), &[Vec3::new(2.0, 3.0, 4.0)]);
    }

    #[test]
    fn test_parameters() {
        let mut node = TransformNode::new(2);
        node.set_parameter(&ParameterChange::new(
            "translate",
            ParamValue::Vector3(Vec3::Y),
        ))
        .unwrap();
        node.set_parameter(&ParameterChange::new("uniform_scale", ParamValue::Float(3.0)))
            .unwrap();
        assert_eq!(node.translate, Vec3::Y);
        assert_eq!(node.uniform_scale, 3.0);

        assert!(matches!(
            node.set_parameter(&ParameterChange::new("translate", ParamValue::Float(1.0))),
            Err(ParameterError::TypeMismatch { .. })
        ));
        assert!(matches!(
            node.set_parameter(&ParameterChange::new(
                "uniform_scale",
                ParamValue::Float(f32::INFINITY)
            )),
            Err(ParameterError::OutOfRange { .. })
        ));
        assert_eq!(node.uniform_scale, 3.0);
    }
}
