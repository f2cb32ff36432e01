//! Node parameter interface
//!
//! Generic read/write access to a node's typed fields, used by the
//! parameter-editing side of a session. Kinds without editable fields simply
//! report an empty parameter list.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Value carried by a single node parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Integer(i64),
    Float(f32),
    Vector3(Vec3),
}

impl ParamValue {
    /// Name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Integer(_) => "Integer",
            ParamValue::Float(_) => "Float",
            ParamValue::Vector3(_) => "Vector3",
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers are accepted where a float is expected
    pub fn as_float(&self) -> Option<f32> {
        match self {
            ParamValue::Float(f) => Some(*f),
            ParamValue::Integer(i) => Some(*i as f32),
            ParamValue::Vector3(_) => None,
        }
    }

    pub fn as_vector3(&self) -> Option<Vec3> {
        match self {
            ParamValue::Vector3(v) => Some(*v),
            _ => None,
        }
    }
}

/// Snapshot of one named parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: &'static str,
    pub value: ParamValue,
}

impl Parameter {
    pub fn new(name: &'static str, value: ParamValue) -> Self {
        Self { name, value }
    }
}

/// A requested write to one parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterChange {
    pub parameter: String,
    pub value: ParamValue,
}

impl ParameterChange {
    pub fn new(parameter: impl Into<String>, value: ParamValue) -> Self {
        Self {
            parameter: parameter.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("unknown parameter '{parameter}'")]
    Unknown { parameter: String },
    #[error("parameter '{parameter}' expects {expected}, got {actual}")]
    TypeMismatch {
        parameter: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("value for parameter '{parameter}' is out of range")]
    OutOfRange { parameter: String },
}

impl ParameterError {
    pub fn unknown(change: &ParameterChange) -> Self {
        ParameterError::Unknown {
            parameter: change.parameter.clone(),
        }
    }

    pub fn mismatch(change: &ParameterChange, expected: &'static str) -> Self {
        ParameterError::TypeMismatch {
            parameter: change.parameter.clone(),
            expected,
            actual: change.value.kind(),
        }
    }

    pub fn out_of_range(change: &ParameterChange) -> Self {
        ParameterError::OutOfRange {
            parameter: change.parameter.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_accepts_integer() {
        assert_eq!(ParamValue::Integer(3).as_float(), Some(3.0));
        assert_eq!(ParamValue::Vector3(Vec3::ONE).as_float(), None);
        assert_eq!(ParamValue::Float(1.5).as_integer(), None);
    }

    #[test]
    fn test_mismatch_message() {
        let change = ParameterChange::new("rows", ParamValue::Float(2.0));
        let err = ParameterError::mismatch(&change, "Integer");
        assert_eq!(err.to_string(), "parameter 'rows' expects Integer, got Float");
    }
}
