//! RigidBodySystem - registry and per-step passes
//!
//! Bodies and triggers live in generational arenas and are referenced by
//! handle. Buckets split them by simulation type; the step walks buckets in
//! a fixed order:
//! - static vs static (flags and events only)
//! - dynamic vs static with impulses
//! - dynamic vs dynamic
//! - dynamic vs static again, position only
//! - triggers

mod collision;
mod render;
mod resolve;
mod system;

pub use collision::{ContactListener, PassStats};
pub use render::{draw_shape, DebugRenderer, Rgba};
pub use resolve::{friction_impulse, resolve_contact, separate_pair, AppliedImpulse, ContactBody};
pub use system::{BodyHandle, RigidBodySystem, TriggerHandle};
