//! Grid parameter access

use super::GridNode;
use crate::constants::grid::MAX_DIVISIONS;
use crate::nodes::interface::{ParamValue, Parameter, ParameterChange, ParameterError};

pub const ROWS: &str = "rows";
pub const COLS: &str = "cols";
pub const SIZE: &str = "size";

pub(super) fn list(node: &GridNode) -> Vec<Parameter> {
    vec![
        Parameter::new(ROWS, ParamValue::Integer(i64::from(node.rows))),
        Parameter::new(COLS, ParamValue::Integer(i64::from(node.cols))),
        Parameter::new(SIZE, ParamValue::Float(node.size)),
    ]
}

pub(super) fn apply(node: &mut GridNode, change: &ParameterChange) -> Result<(), ParameterError> {
    match change.parameter.as_str() {
        ROWS => node.rows = divisions(change)?,
        COLS => node.cols = divisions(change)?,
        SIZE => {
            let size = change
                .value
                .as_float()
                .ok_or_else(|| ParameterError::mismatch(change, "Float"))?;
            if !size.is_finite() {
                return Err(ParameterError::out_of_range(change));
            }
            node.size = size;
        }
        _ => return Err(ParameterError::unknown(change)),
    }
    Ok(())
}

/// Values below the minimum are kept and clamped at cook time
fn divisions(change: &ParameterChange) -> Result<u32, ParameterError> {
    let value = change
        .value
        .as_integer()
        .ok_or_else(|| ParameterError::mismatch(change, "Integer"))?;
    u32::try_from(value)
        .ok()
        .filter(|&v| v <= MAX_DIVISIONS)
        .ok_or_else(|| ParameterError::out_of_range(change))
}
