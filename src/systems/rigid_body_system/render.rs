//! Debug overlay: outlines of every live collider.
//!
//! Static colliders are yellow (magenta while colliding), dynamic ones blue
//! (red while colliding), triggers white. Unknown bodies are not drawn.

use std::f32::consts::TAU;

use crate::collider::WorldShape;
use crate::rigid_body::{SimulationType, Vec2};

use super::system::RigidBodySystem;

/// Half length of the segment drawn for an unbounded half-plane.
const HALF_PLANE_EXTENT: f32 = 1000.0;
const CIRCLE_SEGMENTS: usize = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const YELLOW: Rgba = Rgba(255, 255, 0, 255);
    pub const MAGENTA: Rgba = Rgba(255, 0, 255, 255);
    pub const BLUE: Rgba = Rgba(0, 0, 255, 255);
    pub const RED: Rgba = Rgba(255, 0, 0, 255);
    pub const WHITE: Rgba = Rgba(255, 255, 255, 255);

    /// Packed as 0xAABBGGRR, the canvas ImageData byte order.
    pub fn to_abgr(self) -> u32 {
        u32::from_le_bytes([self.0, self.1, self.2, self.3])
    }
}

/// Sink for debug geometry.
pub trait DebugRenderer {
    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba);

    fn circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let point = |i: usize| {
            let angle = TAU * i as f32 / CIRCLE_SEGMENTS as f32;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        };
        for i in 0..CIRCLE_SEGMENTS {
            self.line(point(i), point(i + 1), color);
        }
    }
}

pub fn draw_shape(renderer: &mut dyn DebugRenderer, shape: &WorldShape, color: Rgba) {
    match shape {
        WorldShape::Circle { center, radius } => renderer.circle(*center, *radius, color),
        WorldShape::Aabb { center, half_extents } => {
            let (hx, hy) = (half_extents.x, half_extents.y);
            let corners = [
                *center + Vec2::new(-hx, -hy),
                *center + Vec2::new(hx, -hy),
                *center + Vec2::new(hx, hy),
                *center + Vec2::new(-hx, hy),
            ];
            draw_loop(renderer, &corners, color);
        }
        WorldShape::Polygon { vertices } => draw_loop(renderer, vertices, color),
        WorldShape::HalfPlane { normal, offset } => {
            let origin = *normal * *offset;
            let along = normal.rotated_90() * HALF_PLANE_EXTENT;
            renderer.line(origin - along, origin + along, color);
            renderer.line(origin, origin + *normal, color);
        }
    }
}

fn draw_loop(renderer: &mut dyn DebugRenderer, points: &[Vec2], color: Rgba) {
    for (i, &from) in points.iter().enumerate() {
        let to = points[(i + 1) % points.len()];
        renderer.line(from, to, color);
    }
}

impl RigidBodySystem {
    pub fn debug_render(&self, renderer: &mut dyn DebugRenderer) {
        for (ty, idle, hit) in [
            (SimulationType::Static, Rgba::YELLOW, Rgba::MAGENTA),
            (SimulationType::Dynamic, Rgba::BLUE, Rgba::RED),
        ] {
            for (_, body) in self.live_bodies(ty) {
                let color = if body.collider().in_collision() { hit } else { idle };
                draw_shape(renderer, &body.collider().world_shape(&body.transform), color);
            }
        }
        for (_, trigger) in self.live_triggers() {
            draw_shape(renderer, &trigger.collider().world_shape(&trigger.transform), Rgba::WHITE);
        }
    }
}
