//! RigidBody - A solid body that moves as a unit
//!
//! The body keeps a working copy of its host object's transform for the
//! duration of a step; the host's `ObjectTransform` stays canonical.

mod vec2;
mod body;

pub use vec2::{Transform2D, Vec2};
pub use body::{BodyDesc, ObjectTransform, RigidBody, SimulationType};
