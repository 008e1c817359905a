//! World - explicit simulation context
//!
//! `WorldCore` owns the registry, the configuration, the event bus and the
//! perf counters; nothing lives in globals. `World` (facade.rs) is the
//! `wasm_bindgen` surface over it.

use crate::domain::config::{PhysicsConfig, SceneDesc};
use crate::domain::errors::{BodyError, ConfigError, ShapeError};
use crate::rigid_body::{BodyDesc, Vec2};
use crate::rigid_body_system::{BodyHandle, DebugRenderer, RigidBodySystem, TriggerHandle};
use crate::trigger::TriggerDesc;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "events/events.rs"]
mod events;
#[path = "render/debug_lines.rs"]
mod debug_lines;
#[path = "step/step.rs"]
mod step;
#[path = "rigid/rigid.rs"]
mod rigid;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use debug_lines::DebugLines;
pub use events::{EventBus, EventCallback, NamedProperties, SubscriptionId};
pub use facade::World;
pub use perf_stats::PerfStats;
pub use rigid::SceneHandles;

use perf_timer::PerfTimer;

/// The simulation world
pub struct WorldCore {
    bodies: RigidBodySystem,
    config: PhysicsConfig,
    events: EventBus,

    // State
    frame: u32,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    pub fn new() -> Self {
        init::create_world_core(PhysicsConfig::default())
    }

    pub fn with_config(config: PhysicsConfig) -> Self {
        init::create_world_core(config)
    }

    pub fn from_config_json(json: &str) -> Result<Self, ConfigError> {
        Ok(init::create_world_core(PhysicsConfig::from_json(json)?))
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Steps taken so far; also the trigger last-seen clock.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, x: f32, y: f32) {
        settings::set_gravity(self, x, y);
    }

    pub fn set_resolve_impulses(&mut self, enabled: bool) {
        settings::set_resolve_impulses(self, enabled);
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    pub fn bodies(&self) -> &RigidBodySystem {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut RigidBodySystem {
        &mut self.bodies
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn subscribe(
        &mut self,
        name: impl Into<String>,
        callback: impl FnMut(&NamedProperties) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(name, callback)
    }

    // === BODY API ===

    /// Create and bucket a body, using the world's default material when the
    /// descriptor has none.
    pub fn spawn(&mut self, desc: BodyDesc) -> Result<BodyHandle, BodyError> {
        rigid::spawn(self, desc)
    }

    pub fn create_rigidbody(&mut self, desc: BodyDesc) -> Result<BodyHandle, BodyError> {
        rigid::create_rigidbody(self, desc)
    }

    pub fn destroy_rigidbody(&mut self, handle: BodyHandle) -> bool {
        self.bodies.destroy_rigidbody(handle).is_some()
    }

    pub fn spawn_trigger(&mut self, desc: TriggerDesc) -> Result<TriggerHandle, ShapeError> {
        self.bodies.spawn_trigger(desc)
    }

    pub fn destroy_trigger(&mut self, handle: TriggerHandle) -> bool {
        self.bodies.destroy_trigger(handle).is_some()
    }

    /// Spawn every body and trigger of a scene; on error nothing stays.
    pub fn load_scene(&mut self, scene: SceneDesc) -> Result<SceneHandles, ConfigError> {
        rigid::load_scene(self, scene)
    }

    pub fn load_scene_json(&mut self, json: &str) -> Result<SceneHandles, ConfigError> {
        let scene = SceneDesc::from_json(json)?;
        self.load_scene(scene)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.body_count()
    }

    pub fn trigger_count(&self) -> usize {
        self.bodies.trigger_count()
    }

    /// Drop every body, trigger and subscriber and restart the frame clock.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.events.clear();
        self.frame = 0;
        self.perf_stats.reset();
    }

    // === STEPPING ===

    /// Advance by `dt` seconds. Non-positive or non-finite `dt` is ignored.
    pub fn update(&mut self, dt: f32) {
        step::update(self, dt);
    }

    /// Free killed bodies and triggers and compact the buckets.
    pub fn purge_deleted_objects(&mut self) -> usize {
        self.bodies.purge_deleted_objects()
    }

    /// `update` followed by `purge_deleted_objects`: one host frame.
    pub fn step_frame(&mut self, dt: f32) {
        self.update(dt);
        self.purge_deleted_objects();
    }

    pub fn copy_transforms_from_objects(&mut self) {
        self.bodies.copy_transforms_from_objects();
    }

    pub fn copy_transforms_to_objects(&self) {
        self.bodies.copy_transforms_to_objects();
    }

    pub fn set_all_collisions_to_false(&mut self) {
        self.bodies.set_all_collisions_to_false();
    }

    pub fn debug_render(&self, renderer: &mut dyn DebugRenderer) {
        self.bodies.debug_render(renderer);
    }
}

impl Default for WorldCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
