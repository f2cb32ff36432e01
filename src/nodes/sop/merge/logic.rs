//! Geometry concatenation

use crate::geometry::Geometry;
use std::sync::Arc;

/// Append every input in order. Each input's triangles are shifted by the
/// number of points that precede it, so indices stay valid.
///
/// Fails if an input breaks the index invariant (possible when output
/// validation is off) or the combined point count cannot be indexed with
/// `u32`.
pub fn merge_geometries(inputs: &[Arc<Geometry>]) -> Result<Geometry, String> {
    let point_total: usize = inputs.iter().map(|g| g.point_count()).sum();
    let triangle_total = inputs.iter().map(|g| g.triangle_count()).sum();
    if u32::try_from(point_total).is_err() {
        return Err(format!("merged point count {} exceeds the index range", point_total));
    }

    let mut points = Vec::with_capacity(point_total);
    let mut triangles = Vec::with_capacity(triangle_total);
    for (slot, input) in inputs.iter().enumerate() {
        input
            .validate()
            .map_err(|e| format!("input {} is malformed: {}", slot, e))?;

        // every index is below this input's point count, so the sum stays
        // within the checked total
        let offset = points.len() as u32;
        points.extend_from_slice(input.points());
        triangles.extend(input.triangles().iter().map(|t| t.offset(offset)));
    }

    Ok(Geometry::from_parts_unchecked(points, triangles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Triangle;
    use glam::Vec3;

    fn quad(y: f32) -> Arc<Geometry> {
        Arc::new(
            Geometry::new(
                vec![
                    Vec3::new(0.0, y, 0.0),
                    Vec3::new(1.0, y, 0.0),
                    Vec3::new(0.0, y, 1.0),
                    Vec3::new(1.0, y, 1.0),
                ],
                vec![Triangle::new(0, 2, 1), Triangle::new(1, 2, 3)],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_indices_are_offset() {
        let merged = merge_geometries(&[quad(0.0), quad(1.0)]).unwrap();
        assert_eq!(merged.point_count(), 8);
        assert_eq!(
            merged.triangles(),
            &[
                Triangle::new(0, 2, 1),
                Triangle::new(1, 2, 3),
                Triangle::new(4, 6, 5),
                Triangle::new(5, 6, 7),
            ]
        );
        assert_eq!(merged.points()[4], Vec3::new(0.0, 1.0, 0.0));
        assert!(merged.validate().is_ok());
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        // would overflow once shifted past the first input's points
        let broken = Arc::new(Geometry::from_parts_unvalidated(
            vec![Vec3::ZERO],
            vec![Triangle::new(0, 0, u32::MAX)],
        ));
        let err = merge_geometries(&[quad(0.0), broken]).unwrap_err();
        assert!(err.starts_with("input 1 is malformed"), "{}", err);
    }

    #[test]
    fn test_empty_inputs_contribute_nothing() {
        let empty = Arc::new(Geometry::empty());
        let merged = merge_geometries(&[empty.clone(), quad(0.0), empty]).unwrap();
        assert_eq!(merged, *quad(0.0));
        assert!(merge_geometries(&[]).unwrap().is_empty());
    }
}
