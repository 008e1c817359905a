//! Pairwise overlap tests
//!
//! `collide` is the double-dispatch table keyed by the two shape kinds. Every
//! routine returns a manifold oriented for its *first* argument; reversed
//! pairs reuse the forward routine and flip the result.

use crate::rigid_body::Vec2;

use super::manifold::Manifold;
use super::shape::WorldShape;

/// Distances below this are treated as coincident.
const COINCIDENT_EPSILON: f32 = 1e-6;

/// Overlap test between two world-space shapes.
///
/// Returns `None` when the shapes are apart or the pair cannot be tested.
pub fn collide(a: &WorldShape, b: &WorldShape) -> Option<Manifold> {
    use WorldShape::*;

    match (a, b) {
        (Circle { center: c0, radius: r0 }, Circle { center: c1, radius: r1 }) => {
            circle_circle(*c0, *r0, *c1, *r1)
        }
        (Circle { center, radius }, Aabb { center: bc, half_extents }) => {
            circle_aabb(*center, *radius, *bc, *half_extents)
        }
        (Aabb { center: bc, half_extents }, Circle { center, radius }) => {
            circle_aabb(*center, *radius, *bc, *half_extents).map(|m| m.flipped())
        }
        (Aabb { center: c0, half_extents: h0 }, Aabb { center: c1, half_extents: h1 }) => {
            aabb_aabb(*c0, *h0, *c1, *h1)
        }
        (Polygon { vertices: v0 }, Polygon { vertices: v1 }) => polygon_polygon(v0, v1),
        (Aabb { center, half_extents }, Polygon { vertices }) => {
            polygon_polygon(&aabb_vertices(*center, *half_extents), vertices)
        }
        (Polygon { vertices }, Aabb { center, half_extents }) => {
            polygon_polygon(vertices, &aabb_vertices(*center, *half_extents))
        }
        (Circle { center, radius }, Polygon { vertices }) => {
            circle_polygon(*center, *radius, vertices)
        }
        (Polygon { vertices }, Circle { center, radius }) => {
            circle_polygon(*center, *radius, vertices).map(|m| m.flipped())
        }
        (HalfPlane { .. }, HalfPlane { .. }) => {
            log::warn!("unsupported collider pair half_plane/half_plane; treating as no contact");
            None
        }
        (shape, HalfPlane { normal, offset }) => against_half_plane(shape, *normal, *offset),
        (HalfPlane { normal, offset }, shape) => {
            against_half_plane(shape, *normal, *offset).map(|m| m.flipped())
        }
    }
}

fn circle_circle(c0: Vec2, r0: f32, c1: Vec2, r1: f32) -> Option<Manifold> {
    let delta = c0 - c1;
    let reach = r0 + r1;
    let dist2 = delta.length_squared();
    if dist2 >= reach * reach {
        return None;
    }
    let dist = dist2.sqrt();
    if dist <= COINCIDENT_EPSILON {
        return Some(Manifold::without_direction(reach, c0));
    }
    let normal = delta * (1.0 / dist);
    Some(Manifold::new(normal, reach - dist, c0 - normal * r0))
}

fn circle_aabb(center: Vec2, radius: f32, box_center: Vec2, half: Vec2) -> Option<Manifold> {
    let d = center - box_center;
    let clamped = Vec2::new(d.x.clamp(-half.x, half.x), d.y.clamp(-half.y, half.y));

    if clamped != d {
        let delta = d - clamped;
        let dist2 = delta.length_squared();
        if dist2 >= radius * radius {
            return None;
        }
        let dist = dist2.sqrt();
        let normal = delta * (1.0 / dist);
        return Some(Manifold::new(normal, radius - dist, center - normal * radius));
    }

    // Centre inside the box: leave through the nearest face.
    if d.length_squared() <= COINCIDENT_EPSILON * COINCIDENT_EPSILON {
        return Some(Manifold::without_direction(radius + half.x.min(half.y), center));
    }
    let to_x = half.x - d.x.abs();
    let to_y = half.y - d.y.abs();
    let (normal, face) = if to_x < to_y {
        (Vec2::new(sign(d.x), 0.0), to_x)
    } else {
        (Vec2::new(0.0, sign(d.y)), to_y)
    };
    Some(Manifold::new(normal, radius + face, center - normal * radius))
}

fn aabb_aabb(c0: Vec2, h0: Vec2, c1: Vec2, h1: Vec2) -> Option<Manifold> {
    let d = c0 - c1;
    let overlap_x = h0.x + h1.x - d.x.abs();
    let overlap_y = h0.y + h1.y - d.y.abs();
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    // Middle of the shared interval on each axis.
    let mid_x = 0.5 * ((c0.x - h0.x).max(c1.x - h1.x) + (c0.x + h0.x).min(c1.x + h1.x));
    let mid_y = 0.5 * ((c0.y - h0.y).max(c1.y - h1.y) + (c0.y + h0.y).min(c1.y + h1.y));

    if d.is_zero() {
        return Some(Manifold::without_direction(
            overlap_x.min(overlap_y),
            Vec2::new(mid_x, mid_y),
        ));
    }
    if overlap_x < overlap_y {
        let normal = Vec2::new(sign(d.x), 0.0);
        let contact = Vec2::new(c0.x - normal.x * h0.x, mid_y);
        Some(Manifold::new(normal, overlap_x, contact))
    } else {
        let normal = Vec2::new(0.0, sign(d.y));
        let contact = Vec2::new(mid_x, c0.y - normal.y * h0.y);
        Some(Manifold::new(normal, overlap_y, contact))
    }
}

/// Separating-axis test between two convex counter-clockwise polygons.
fn polygon_polygon(a: &[Vec2], b: &[Vec2]) -> Option<Manifold> {
    let mut best: Option<(f32, Vec2)> = None;

    for poly in [a, b] {
        for axis in edge_normals(poly) {
            let (min_a, max_a) = project(a, axis);
            let (min_b, max_b) = project(b, axis);
            let (depth, dir) = axis_depth(min_a, max_a, min_b, max_b, axis)?;
            if best.map_or(true, |(d, _)| depth < d) {
                best = Some((depth, dir));
            }
        }
    }

    let (depth, normal) = best?;
    Some(Manifold::new(normal, depth, support(a, -normal)))
}

fn circle_polygon(center: Vec2, radius: f32, vertices: &[Vec2]) -> Option<Manifold> {
    let mut best: Option<(f32, Vec2)> = None;

    let closest = vertices
        .iter()
        .copied()
        .min_by(|p, q| {
            (*p - center)
                .length_squared()
                .total_cmp(&(*q - center).length_squared())
        })?;
    let vertex_axis = (center - closest).normalize();

    let axes = edge_normals(vertices).chain((!vertex_axis.is_zero()).then_some(vertex_axis));
    for axis in axes {
        let c = center.dot(axis);
        let (min_p, max_p) = project(vertices, axis);
        let (depth, dir) = axis_depth(c - radius, c + radius, min_p, max_p, axis)?;
        if best.map_or(true, |(d, _)| depth < d) {
            best = Some((depth, dir));
        }
    }

    let (depth, normal) = best?;
    Some(Manifold::new(normal, depth, center - normal * radius))
}

fn against_half_plane(shape: &WorldShape, normal: Vec2, offset: f32) -> Option<Manifold> {
    let deepest = match shape {
        WorldShape::Circle { center, radius } => *center - normal * *radius,
        WorldShape::Aabb { center, half_extents } => {
            *center - Vec2::new(half_extents.x * sign0(normal.x), half_extents.y * sign0(normal.y))
        }
        WorldShape::Polygon { vertices } => support(vertices, -normal),
        WorldShape::HalfPlane { .. } => return None,
    };
    let depth = offset - deepest.dot(normal);
    if depth <= 0.0 {
        return None;
    }
    Some(Manifold::new(normal, depth, deepest))
}

/// Penetration along `axis` for interval A against interval B.
///
/// Returns the smaller push and its direction (for A), or `None` if separated.
fn axis_depth(min_a: f32, max_a: f32, min_b: f32, max_b: f32, axis: Vec2) -> Option<(f32, Vec2)> {
    let push_pos = max_b - min_a;
    let push_neg = max_a - min_b;
    if push_pos <= 0.0 || push_neg <= 0.0 {
        return None;
    }
    if push_pos < push_neg {
        Some((push_pos, axis))
    } else {
        Some((push_neg, -axis))
    }
}

fn edge_normals(vertices: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    let n = vertices.len();
    (0..n).filter_map(move |i| {
        let edge = vertices[(i + 1) % n] - vertices[i];
        let normal = Vec2::new(edge.y, -edge.x).normalize();
        (!normal.is_zero()).then_some(normal)
    })
}

fn project(vertices: &[Vec2], axis: Vec2) -> (f32, f32) {
    vertices.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
        let d = v.dot(axis);
        (lo.min(d), hi.max(d))
    })
}

/// Vertex furthest along `dir`.
fn support(vertices: &[Vec2], dir: Vec2) -> Vec2 {
    vertices
        .iter()
        .copied()
        .max_by(|p, q| p.dot(dir).total_cmp(&q.dot(dir)))
        .unwrap_or_default()
}

fn aabb_vertices(center: Vec2, half: Vec2) -> [Vec2; 4] {
    [
        center + Vec2::new(-half.x, -half.y),
        center + Vec2::new(half.x, -half.y),
        center + Vec2::new(half.x, half.y),
        center + Vec2::new(-half.x, half.y),
    ]
}

#[inline]
fn sign(v: f32) -> f32 {
    if v >= 0.0 { 1.0 } else { -1.0 }
}

#[inline]
fn sign0(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "narrow_phase_tests.rs"]
mod tests;
