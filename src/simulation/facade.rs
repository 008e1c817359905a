use log::warn;
use wasm_bindgen::prelude::*;

use crate::collider::Shape;
use crate::core::Handle;
use crate::rigid_body::{BodyDesc, SimulationType, Vec2};
use crate::trigger::TriggerDesc;

use super::perf_stats::PerfStats;
use super::{DebugLines, NamedProperties, WorldCore};

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn simulation_type(dynamic: bool) -> SimulationType {
    if dynamic { SimulationType::Dynamic } else { SimulationType::Static }
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
    debug_lines: DebugLines,
}

impl World {
    fn spawn_shape(&mut self, shape: Shape, x: f32, y: f32, mass: f32, dynamic: bool) -> Result<u64, JsValue> {
        let desc = BodyDesc { mass, ..BodyDesc::new(simulation_type(dynamic), shape) }.at(x, y);
        let handle = self.core.spawn(desc).map_err(js_err)?;
        Ok(handle.to_bits())
    }
}

#[wasm_bindgen]
impl World {
    /// Create a world with default gravity (0, -9.8)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            core: WorldCore::new(),
            debug_lines: DebugLines::new(),
        }
    }

    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: String) -> Result<World, JsValue> {
        Ok(Self {
            core: WorldCore::from_config_json(&json).map_err(js_err)?,
            debug_lines: DebugLines::new(),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u32 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize { self.core.body_count() }

    #[wasm_bindgen(getter)]
    pub fn trigger_count(&self) -> usize { self.core.trigger_count() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    pub fn set_gravity(&mut self, x: f32, y: f32) {
        self.core.set_gravity(x, y);
    }

    pub fn set_resolve_impulses(&mut self, enabled: bool) {
        self.core.set_resolve_impulses(enabled);
    }

    // === BODY API ===

    pub fn spawn_circle(&mut self, x: f32, y: f32, radius: f32, mass: f32, dynamic: bool) -> Result<u64, JsValue> {
        let shape = Shape::circle(radius).map_err(js_err)?;
        self.spawn_shape(shape, x, y, mass, dynamic)
    }

    pub fn spawn_box(&mut self, x: f32, y: f32, half_w: f32, half_h: f32, mass: f32, dynamic: bool) -> Result<u64, JsValue> {
        let shape = Shape::aabb(half_w, half_h).map_err(js_err)?;
        self.spawn_shape(shape, x, y, mass, dynamic)
    }

    /// Static ground: points `p` with `dot(p, n) <= offset` are solid.
    pub fn spawn_half_plane(&mut self, nx: f32, ny: f32, offset: f32) -> Result<u64, JsValue> {
        let shape = Shape::half_plane(Vec2::new(nx, ny), offset).map_err(js_err)?;
        self.spawn_shape(shape, 0.0, 0.0, 1.0, false)
    }

    pub fn spawn_trigger_box(
        &mut self,
        x: f32,
        y: f32,
        half_w: f32,
        half_h: f32,
        on_enter: Option<String>,
        on_exit: Option<String>,
    ) -> Result<u64, JsValue> {
        let shape = Shape::aabb(half_w, half_h).map_err(js_err)?;
        let desc = TriggerDesc { on_enter, on_exit, ..TriggerDesc::new(shape) }.at(x, y);
        let handle = self.core.spawn_trigger(desc).map_err(js_err)?;
        Ok(handle.to_bits())
    }

    /// Name the event fired when this body collides.
    pub fn set_collision_event(&mut self, id: u64, name: Option<String>) -> bool {
        match self.core.bodies_mut().body_mut(Handle::from_bits(id)) {
            Some(body) => {
                body.collider_mut().set_event_name(name);
                true
            }
            None => false,
        }
    }

    pub fn destroy_body(&mut self, id: u64) -> bool {
        self.core.destroy_rigidbody(Handle::from_bits(id))
    }

    /// Remove at the next purge.
    pub fn kill_body(&mut self, id: u64) -> bool {
        self.core.bodies_mut().kill(Handle::from_bits(id))
    }

    pub fn destroy_trigger(&mut self, id: u64) -> bool {
        self.core.destroy_trigger(Handle::from_bits(id))
    }

    /// Spawn a JSON scene. Returns the number of bodies created.
    pub fn load_scene(&mut self, json: String) -> Result<usize, JsValue> {
        let handles = self.core.load_scene_json(&json).map_err(js_err)?;
        Ok(handles.bodies.len())
    }

    /// `[x, y, rotation_degrees]`, or nothing for a stale id.
    pub fn body_transform(&self, id: u64) -> Option<Vec<f32>> {
        let body = self.core.bodies().body(Handle::from_bits(id))?;
        let t = body.transform;
        Some(vec![t.position.x, t.position.y, t.rotation])
    }

    /// `[vx, vy, angular_velocity_degrees]`, or nothing for a stale id.
    pub fn body_velocity(&self, id: u64) -> Option<Vec<f32>> {
        let body = self.core.bodies().body(Handle::from_bits(id))?;
        Some(vec![body.velocity.x, body.velocity.y, body.angular_velocity])
    }

    pub fn set_body_velocity(&mut self, id: u64, vx: f32, vy: f32) -> bool {
        match self.core.bodies_mut().body_mut(Handle::from_bits(id)) {
            Some(body) => {
                body.velocity = Vec2::new(vx, vy);
                true
            }
            None => false,
        }
    }

    pub fn body_in_collision(&self, id: u64) -> bool {
        self.core
            .bodies()
            .body(Handle::from_bits(id))
            .is_some_and(|b| b.collider().in_collision())
    }

    /// Call `callback(json)` for each event `name`; `json` is the property bag.
    pub fn subscribe(&mut self, name: String, callback: js_sys::Function) {
        self.core.subscribe(name, move |args: &NamedProperties| {
            let payload = JsValue::from_str(&args.to_json());
            if let Err(err) = callback.call1(&JsValue::NULL, &payload) {
                warn!("event callback threw: {err:?}");
            }
        });
    }

    // === STEPPING ===

    pub fn update(&mut self, dt: f32) {
        self.core.update(dt);
    }

    pub fn purge_deleted_objects(&mut self) -> usize {
        self.core.purge_deleted_objects()
    }

    /// Update then purge
    pub fn step(&mut self, dt: f32) {
        self.core.step_frame(dt);
    }

    pub fn clear(&mut self) {
        self.core.clear();
        self.debug_lines.clear();
    }

    // === DEBUG RENDER ===

    /// Rebuild the debug line buffers; returns the number of lines.
    pub fn build_debug_lines(&mut self) -> usize {
        self.debug_lines.clear();
        self.core.debug_render(&mut self.debug_lines);
        self.debug_lines.len()
    }

    /// `x0, y0, x1, y1` per line, from the last `build_debug_lines`.
    pub fn debug_line_points(&self) -> Vec<f32> {
        self.debug_lines.points().to_vec()
    }

    /// One 0xAABBGGRR colour per line, from the last `build_debug_lines`.
    pub fn debug_line_colors(&self) -> Vec<u32> {
        self.debug_lines.colors().to_vec()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
