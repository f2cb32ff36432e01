//! Point transformation

use crate::geometry::Geometry;
use glam::Vec3;

/// Scale about the origin, then translate. Triangles are carried over as-is.
pub fn transform_points(input: &Geometry, translate: Vec3, uniform_scale: f32) -> Geometry {
    let points = input
        .points()
        .iter()
        .map(|&p| p * uniform_scale + translate)
        .collect();
    Geometry::from_parts_unchecked(points, input.triangles().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Triangle;

    fn triangle() -> Geometry {
        Geometry::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Z],
            vec![Triangle::new(0, 2, 1)],
        )
        .unwrap()
    }

    #[test]
    fn test_scale_before_translate() {
        let out = transform_points(&triangle(), Vec3::new(0.0, 1.0, 0.0), 2.0);
        assert_eq!(
            out.points(),
            &[
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(2.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 2.0),
            ]
        );
        assert_eq!(out.triangles(), triangle().triangles());
    }

    #[test]
    fn test_identity() {
        let input = triangle();
        assert_eq!(transform_points(&input, Vec3::ZERO, 1.0), input);
    }
}
