//! Transform parameter access

use super::TransformNode;
use crate::nodes::interface::{ParamValue, Parameter, ParameterChange, ParameterError};

pub const TRANSLATE: &str = "translate";
pub const UNIFORM_SCALE: &str = "uniform_scale";

pub(super) fn list(node: &TransformNode) -> Vec<Parameter> {
    vec![
        Parameter::new(TRANSLATE, ParamValue::Vector3(node.translate)),
        Parameter::new(UNIFORM_SCALE, ParamValue::Float(node.uniform_scale)),
    ]
}

pub(super) fn apply(
    node: &mut TransformNode,
    change: &ParameterChange,
) -> Result<(), ParameterError> {
    match change.parameter.as_str() {
        TRANSLATE => {
            let translate = change
                .value
                .as_vector3()
                .ok_or_else(|| ParameterError::mismatch(change, "Vector3"))?;
            if !translate.is_finite() {
                return Err(ParameterError::out_of_range(change));
            }
            node.translate = translate;
        }
        UNIFORM_SCALE => {
            let scale = change
                .value
                .as_float()
                .ok_or_else(|| ParameterError::mismatch(change, "Float"))?;
            if !scale.is_finite() {
                return Err(ParameterError::out_of_range(change));
            }
            node.uniform_scale = scale;
        }
        _ => return Err(ParameterError::unknown(change)),
    }
    Ok(())
}
