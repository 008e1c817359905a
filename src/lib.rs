//! Rigid2D Engine - 2D rigid-body simulation in WASM
//!
//! Architecture:
//! - core/          - Arena storage, logging
//! - domain/        - Errors, materials, configuration
//! - systems/       - Bodies, colliders, triggers and the collision passes
//! - simulation/    - World orchestration, events, perf, JS facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

pub use systems::collider;
pub use systems::rigid_body;
pub use systems::rigid_body_system;
pub use systems::trigger;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::logging::install_console_logger(log::Level::Info);
    log::info!("rigid2d engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use collider::{Collider, Manifold, Shape};
pub use crate::core::{Arena, Handle};
pub use domain::config::{PhysicsConfig, SceneDesc};
pub use domain::errors::{BodyError, ConfigError, RegistryError, ShapeError};
pub use domain::material::Material;
pub use rigid_body::{BodyDesc, ObjectTransform, RigidBody, SimulationType, Transform2D, Vec2};
pub use rigid_body_system::{BodyHandle, RigidBodySystem, TriggerHandle};
pub use simulation::{EventBus, NamedProperties, PerfStats, World, WorldCore};
pub use trigger::{Trigger, TriggerDesc};
