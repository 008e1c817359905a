//! Collision shapes in local space and their world-space resolution.

use serde::{Deserialize, Serialize};

use crate::domain::errors::ShapeError;
use crate::rigid_body::{Transform2D, Vec2};

/// Discriminant used to key the pairwise dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Aabb,
    Polygon,
    HalfPlane,
}

/// Closed set of collider shapes, defined around the body origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Circle { radius: f32 },
    /// Axis-aligned box; ignores body rotation.
    Aabb { half_extents: Vec2 },
    /// Convex polygon; follows body rotation.
    Polygon(Polygon),
    /// Solid region `dot(p, normal) <= offset`, e.g. a ground plane.
    HalfPlane { normal: Vec2, offset: f32 },
}

impl Shape {
    pub fn circle(radius: f32) -> Result<Self, ShapeError> {
        let shape = Shape::Circle { radius };
        shape.validate()?;
        Ok(shape)
    }

    pub fn aabb(half_width: f32, half_height: f32) -> Result<Self, ShapeError> {
        let shape = Shape::Aabb { half_extents: Vec2::new(half_width, half_height) };
        shape.validate()?;
        Ok(shape)
    }

    pub fn polygon(vertices: Vec<Vec2>) -> Result<Self, ShapeError> {
        Ok(Shape::Polygon(Polygon::new(vertices)?))
    }

    /// `normal` need not be unit length; `offset` is rescaled with it so the
    /// solid region `dot(p, normal) <= offset` is unchanged.
    pub fn half_plane(normal: Vec2, offset: f32) -> Result<Self, ShapeError> {
        let (normal, offset) = unit_plane(normal, offset).ok_or(ShapeError::ZeroNormal)?;
        Ok(Shape::HalfPlane { normal, offset })
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Aabb { .. } => ShapeKind::Aabb,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::HalfPlane { .. } => ShapeKind::HalfPlane,
        }
    }

    /// Check invariants of shapes built by hand or deserialized.
    pub fn validate(&self) -> Result<(), ShapeError> {
        match self {
            Shape::Circle { radius } => {
                if !(radius.is_finite() && *radius > 0.0) {
                    return Err(ShapeError::InvalidRadius(*radius));
                }
            }
            Shape::Aabb { half_extents: h } => {
                if !(h.is_finite() && h.x > 0.0 && h.y > 0.0) {
                    return Err(ShapeError::InvalidExtents(h.x, h.y));
                }
            }
            // Polygon::new already enforced its invariants.
            Shape::Polygon(_) => {}
            Shape::HalfPlane { normal, offset } => {
                unit_plane(*normal, *offset).ok_or(ShapeError::ZeroNormal)?;
            }
        }
        Ok(())
    }

    /// Moment of inertia about the body origin for a uniform body of `mass`.
    ///
    /// `None` for unbounded shapes.
    pub fn moment_of_inertia(&self, mass: f32) -> Option<f32> {
        match self {
            Shape::Circle { radius } => Some(0.5 * mass * radius * radius),
            Shape::Aabb { half_extents: h } => {
                let (w, hh) = (2.0 * h.x, 2.0 * h.y);
                Some(mass * (w * w + hh * hh) / 12.0)
            }
            Shape::Polygon(poly) => Some(poly.moment_of_inertia(mass)),
            Shape::HalfPlane { .. } => None,
        }
    }

    /// Resolve into world space at `at`.
    pub fn to_world(&self, at: &Transform2D) -> WorldShape {
        match self {
            Shape::Circle { radius } => WorldShape::Circle {
                center: at.position,
                radius: *radius,
            },
            Shape::Aabb { half_extents } => WorldShape::Aabb {
                center: at.position,
                half_extents: *half_extents,
            },
            Shape::Polygon(poly) => WorldShape::Polygon {
                vertices: poly.vertices.iter().map(|v| at.local_to_world(*v)).collect(),
            },
            Shape::HalfPlane { normal, offset } => {
                // Deserialized planes skip the constructor and may not be unit length.
                let (unit, offset) = unit_plane(*normal, *offset).unwrap_or((*normal, *offset));
                let n = at.rotate(unit);
                WorldShape::HalfPlane {
                    normal: n,
                    offset: offset + at.position.dot(n),
                }
            }
        }
    }
}

/// Convex polygon with counter-clockwise winding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPolygon", into = "RawPolygon")]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

#[derive(Clone, Serialize, Deserialize)]
struct RawPolygon {
    vertices: Vec<Vec2>,
}

impl TryFrom<RawPolygon> for Polygon {
    type Error = ShapeError;

    fn try_from(raw: RawPolygon) -> Result<Self, ShapeError> {
        Polygon::new(raw.vertices)
    }
}

impl From<Polygon> for RawPolygon {
    fn from(poly: Polygon) -> Self {
        RawPolygon { vertices: poly.vertices }
    }
}

impl Polygon {
    /// Build a polygon; clockwise input is reversed to counter-clockwise.
    pub fn new(mut vertices: Vec<Vec2>) -> Result<Self, ShapeError> {
        if vertices.len() < 3 {
            return Err(ShapeError::TooFewVertices(vertices.len()));
        }
        let area = signed_area(&vertices);
        if !area.is_finite() || area.abs() <= f32::EPSILON {
            return Err(ShapeError::ZeroArea);
        }
        if area < 0.0 {
            vertices.reverse();
        }
        Ok(Self { vertices })
    }

    /// Axis-aligned rectangle centered at the origin.
    pub fn rect(half_width: f32, half_height: f32) -> Result<Self, ShapeError> {
        Self::new(vec![
            Vec2::new(-half_width, -half_height),
            Vec2::new(half_width, -half_height),
            Vec2::new(half_width, half_height),
            Vec2::new(-half_width, half_height),
        ])
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// About the local origin, which the body rotates around; not the centroid.
    fn moment_of_inertia(&self, mass: f32) -> f32 {
        // I = m/6 * Σ cross_i (p_i·p_i + p_i·p_j + p_j·p_j) / Σ cross_i
        let mut num = 0.0f32;
        let mut den = 0.0f32;
        for (i, p) in self.vertices.iter().enumerate() {
            let q = self.vertices[(i + 1) % self.vertices.len()];
            let cross = p.cross(q).abs();
            num += cross * (p.dot(*p) + p.dot(q) + q.dot(q));
            den += cross;
        }
        if den <= 0.0 {
            return 0.0;
        }
        mass * num / (6.0 * den)
    }
}

/// Unit normal and matching offset, or `None` for a zero or non-finite plane.
fn unit_plane(normal: Vec2, offset: f32) -> Option<(Vec2, f32)> {
    let len = normal.length();
    if !(len.is_finite() && len > 0.0 && offset.is_finite()) {
        return None;
    }
    Some((normal * (1.0 / len), offset / len))
}

fn signed_area(vertices: &[Vec2]) -> f32 {
    let mut sum = 0.0;
    for (i, p) in vertices.iter().enumerate() {
        let q = vertices[(i + 1) % vertices.len()];
        sum += p.cross(q);
    }
    sum * 0.5
}

/// A shape placed in world space for one step of overlap testing.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldShape {
    Circle { center: Vec2, radius: f32 },
    Aabb { center: Vec2, half_extents: Vec2 },
    Polygon { vertices: Vec<Vec2> },
    HalfPlane { normal: Vec2, offset: f32 },
}

impl WorldShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            WorldShape::Circle { .. } => ShapeKind::Circle,
            WorldShape::Aabb { .. } => ShapeKind::Aabb,
            WorldShape::Polygon { .. } => ShapeKind::Polygon,
            WorldShape::HalfPlane { .. } => ShapeKind::HalfPlane,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_rejects_degenerate_input() {
        assert_eq!(
            Polygon::new(vec![Vec2::zero(), Vec2::new(1.0, 0.0)]),
            Err(ShapeError::TooFewVertices(2))
        );
        assert_eq!(
            Polygon::new(vec![Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)]),
            Err(ShapeError::ZeroArea)
        );
    }

    #[test]
    fn polygon_winding_is_normalized() {
        let cw = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 0.0),
        ])
        .unwrap();
        assert!(signed_area(cw.vertices()) > 0.0);
    }

    #[test]
    fn box_inertia_matches_polygon_inertia() {
        let mass = 3.0;
        let aabb = Shape::aabb(1.0, 0.5).unwrap().moment_of_inertia(mass).unwrap();
        let poly = Shape::Polygon(Polygon::rect(1.0, 0.5).unwrap())
            .moment_of_inertia(mass)
            .unwrap();
        assert!((aabb - poly).abs() < 1e-4, "{aabb} vs {poly}");
    }

    #[test]
    fn off_centre_polygon_inertia_is_about_origin() {
        let mass = 3.0;
        let tri = Shape::polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ])
        .unwrap();
        let about_origin = tri.moment_of_inertia(mass).unwrap();
        // Centroid (1/3, 1/3), I_c = m/18 * (1 + 1) = m/9, plus the parallel-axis term.
        let about_centroid = mass / 9.0;
        let offset2 = 2.0 / 9.0;
        assert!((about_origin - (about_centroid + mass * offset2)).abs() < 1e-5, "{about_origin}");
        assert!((about_origin - 1.0).abs() < 1e-5);
    }

    #[test]
    fn invalid_primitives_are_rejected() {
        assert_eq!(Shape::circle(0.0), Err(ShapeError::InvalidRadius(0.0)));
        assert!(Shape::aabb(1.0, -1.0).is_err());
        assert_eq!(Shape::half_plane(Vec2::zero(), 0.0), Err(ShapeError::ZeroNormal));
        assert_eq!(Shape::circle(1.0).unwrap().moment_of_inertia(2.0), Some(1.0));
        assert_eq!(
            Shape::half_plane(Vec2::new(0.0, 1.0), 0.0).unwrap().moment_of_inertia(1.0),
            None
        );
    }

    #[test]
    fn shape_json_uses_kind_tag() {
        let shape: Shape = serde_json::from_str(
            r#"{"kind":"polygon","vertices":[{"x":0,"y":0},{"x":1,"y":0},{"x":0,"y":1}]}"#,
        )
        .unwrap();
        assert_eq!(shape.kind(), ShapeKind::Polygon);
        let bad = serde_json::from_str::<Shape>(r#"{"kind":"polygon","vertices":[]}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn half_plane_offset_follows_translation() {
        let shape = Shape::half_plane(Vec2::new(0.0, 1.0), 0.0).unwrap();
        let world = shape.to_world(&Transform2D::at(5.0, 2.0));
        assert_eq!(world, WorldShape::HalfPlane { normal: Vec2::new(0.0, 1.0), offset: 2.0 });
    }

    #[test]
    fn half_plane_offset_is_scaled_with_normal() {
        let shape = Shape::half_plane(Vec2::new(0.0, 2.0), 1.0).unwrap();
        assert_eq!(shape, Shape::HalfPlane { normal: Vec2::new(0.0, 1.0), offset: 0.5 });

        // Built by hand, as serde would.
        let raw = Shape::HalfPlane { normal: Vec2::new(0.0, 4.0), offset: 2.0 };
        assert_eq!(raw.validate(), Ok(()));
        let world = raw.to_world(&Transform2D::at(0.0, 0.0));
        assert_eq!(world, WorldShape::HalfPlane { normal: Vec2::new(0.0, 1.0), offset: 0.5 });

        let zero = Shape::HalfPlane { normal: Vec2::zero(), offset: 1.0 };
        assert_eq!(zero.validate(), Err(ShapeError::ZeroNormal));
    }

    #[test]
    fn rotated_translated_half_plane() {
        // Local solid region x <= 1, turned 90° so it becomes y <= 1, then raised by 2.
        let shape = Shape::half_plane(Vec2::new(3.0, 0.0), 3.0).unwrap();
        let world = shape.to_world(&Transform2D::new(Vec2::new(5.0, 2.0), 90.0));
        match world {
            WorldShape::HalfPlane { normal, offset } => {
                assert!((normal.x).abs() < 1e-5 && (normal.y - 1.0).abs() < 1e-5, "{normal:?}");
                assert!((offset - 3.0).abs() < 1e-5, "{offset}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
