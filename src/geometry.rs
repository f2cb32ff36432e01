//! Immutable geometry values produced by cooking a node
//!
//! A [`Geometry`] is a point cloud plus a triangle list indexing into it. It is
//! built once per cook and then only ever shared behind an `Arc`, so the cache
//! and any number of viewers can hold the same instance.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use thiserror::Error;

/// Three indices into a geometry's point list
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Triangle {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Triangle {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    pub fn indices(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }

    /// Shift every index by `offset` points
    pub fn offset(self, offset: u32) -> Self {
        Self {
            a: self.a + offset,
            b: self.b + offset,
            c: self.c + offset,
        }
    }
}

impl From<[u32; 3]> for Triangle {
    fn from([a, b, c]: [u32; 3]) -> Self {
        Self { a, b, c }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("triangle {triangle} references point {index} but only {point_count} points exist")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        point_count: usize,
    },
}

/// Point positions plus triangle primitives.
///
/// Every triangle index is below `points().len()`. A geometry with no points
/// or no triangles is valid and means "nothing to show".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Geometry {
    points: Vec<Vec3>,
    triangles: Vec<Triangle>,
}

impl Geometry {
    /// Build a geometry, checking that every triangle stays inside `points`
    pub fn new(points: Vec<Vec3>, triangles: Vec<Triangle>) -> Result<Self, GeometryError> {
        let geometry = Self { points, triangles };
        geometry.validate()?;
        Ok(geometry)
    }

    /// The empty geometry
    pub fn empty() -> Self {
        Self::default()
    }

    /// Used by cooks whose output is correct by construction
    pub(crate) fn from_parts_unchecked(points: Vec<Vec3>, triangles: Vec<Triangle>) -> Self {
        debug_assert!(check_indices(points.len(), &triangles).is_ok());
        Self { points, triangles }
    }

    /// Skips validation entirely, for exercising the cooker's output checks
    #[cfg(test)]
    pub(crate) fn from_parts_unvalidated(points: Vec<Vec3>, triangles: Vec<Triangle>) -> Self {
        Self { points, triangles }
    }

    /// Check the index invariant
    pub fn validate(&self) -> Result<(), GeometryError> {
        check_indices(self.points.len(), &self.triangles)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() || self.triangles.is_empty()
    }

    /// Axis-aligned bounds as `(min, max)`, `None` without points
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
        )
    }

    /// Raw point data, tightly packed `f32` triples
    pub fn point_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    /// Raw index data, tightly packed `u32` triples
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }
}

fn check_indices(point_count: usize, triangles: &[Triangle]) -> Result<(), GeometryError> {
    for (triangle, tri) in triangles.iter().enumerate() {
        if let Some(index) = tri
            .indices()
            .into_iter()
            .find(|&index| index as usize >= point_count)
        {
            return Err(GeometryError::IndexOutOfRange {
                triangle,
                index,
                point_count,
            });
        }
    }
    Ok(())
}
