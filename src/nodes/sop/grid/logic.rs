//! Grid lattice generation

use crate::constants::grid::MIN_DIVISIONS;
use crate::geometry::{Geometry, Triangle};
use glam::Vec3;

/// Build a `rows x cols` lattice on the XZ plane, centered at the origin and
/// spanning `size` on both axes.
///
/// Rows run along +Z and columns along +X; point `(r, c)` is stored at
/// `r * cols + c`. Each quad is split into two triangles with the same
/// winding. Returns `None` when the lattice cannot be indexed with `u32`.
pub fn build_grid(rows: u32, cols: u32, size: f32) -> Option<Geometry> {
    let rows = rows.max(MIN_DIVISIONS);
    let cols = cols.max(MIN_DIVISIONS);
    let point_count = u32::try_from(u64::from(rows) * u64::from(cols)).ok()?;

    let half = size * 0.5;
    let mut points = Vec::with_capacity(point_count as usize);
    for r in 0..rows {
        let z = -half + (r as f32 / (rows - 1) as f32) * size;
        for c in 0..cols {
            let x = -half + (c as f32 / (cols - 1) as f32) * size;
            points.push(Vec3::new(x, 0.0, z));
        }
    }

    let mut triangles = Vec::with_capacity((rows as usize - 1) * (cols as usize - 1) * 2);
    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            let i0 = r * cols + c;
            let i1 = i0 + 1;
            let i2 = i0 + cols;
            let i3 = i2 + 1;

            triangles.push(Triangle::new(i0, i2, i1));
            triangles.push(Triangle::new(i1, i2, i3));
        }
    }

    Some(Geometry::from_parts_unchecked(points, triangles))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_by_three() {
        let grid = build_grid(3, 3, 1.0).unwrap();
        assert_eq!(grid.point_count(), 9);
        assert_eq!(grid.triangle_count(), 8);
        assert!(grid
            .triangles()
            .iter()
            .flat_map(|t| t.indices())
            .all(|i| i < 9));
    }

    #[test]
    fn test_divisions_clamp_to_two() {
        let grid = build_grid(0, 1, 1.0).unwrap();
        assert_eq!(grid.point_count(), 4);
        assert_eq!(grid.triangles(), &[Triangle::new(0, 2, 1), Triangle::new(1, 2, 3)]);
    }

    #[test]
    fn test_lattice_is_centered_on_xz() {
        let grid = build_grid(2, 3, 2.0).unwrap();
        assert_eq!(
            grid.points(),
            &[
                Vec3::new(-1.0, 0.0, -1.0),
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(1.0, 0.0, -1.0),
                Vec3::new(-1.0, 0.0, 1.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
            ]
        );
        assert_eq!(
            grid.bounds(),
            Some((Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0)))
        );
    }

    #[test]
    fn test_winding_is_consistent() {
        // every triangle faces the same way
        let grid = build_grid(4, 5, 1.0).unwrap();
        let points = grid.points();
        for tri in grid.triangles() {
            let [a, b, c] = tri.indices().map(|i| points[i as usize]);
            let normal = (b - a).cross(c - a);
            assert!(normal.y > 0.0, "{:?}", tri);
        }
    }

    #[test]
    fn test_unindexable_lattice() {
        assert!(build_grid(u32::MAX, u32::MAX, 1.0).is_none());
    }
}
