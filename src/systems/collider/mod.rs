//! Collider - shape plus per-step contact state
//!
//! Overlap tests go through `narrow_phase::collide`, a double dispatch over
//! the closed `Shape` variant set, so adding a shape is a compile error until
//! every pairing is handled.

mod manifold;
mod narrow_phase;
mod shape;

pub use manifold::Manifold;
pub use narrow_phase::collide;
pub use shape::{Polygon, Shape, ShapeKind, WorldShape};

use crate::rigid_body::Transform2D;

/// Shape owned by a body or trigger, with its per-step collision flag.
#[derive(Clone, Debug)]
pub struct Collider {
    shape: Shape,
    in_collision: bool,
    /// Event fired on the bus when a resolved contact involves this collider.
    event_name: Option<String>,
}

impl Collider {
    pub fn new(shape: Shape) -> Self {
        Self { shape, in_collision: false, event_name: None }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn event_name(&self) -> Option<&str> {
        self.event_name.as_deref()
    }

    pub fn set_event_name(&mut self, name: Option<String>) {
        self.event_name = name;
    }

    /// Debug flag: reset every step, set by any successful pairwise test.
    pub fn in_collision(&self) -> bool {
        self.in_collision
    }

    pub fn set_collision(&mut self, colliding: bool) {
        self.in_collision = colliding;
    }

    pub fn world_shape(&self, at: &Transform2D) -> WorldShape {
        self.shape.to_world(at)
    }

    /// Pure overlap test of `self` placed at `at` against `other` at `other_at`.
    pub fn is_touching(
        &self,
        at: &Transform2D,
        other: &Collider,
        other_at: &Transform2D,
    ) -> Option<Manifold> {
        collide(&self.world_shape(at), &other.world_shape(other_at))
    }
}
