use wasm_bindgen::prelude::*;

use crate::rigid_body_system::PassStats;

/// Snapshot of the last `update`. All zeros while perf metrics are off.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) sync_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) static_ms: f64,
    pub(super) dynamic_static_ms: f64,
    pub(super) dynamic_dynamic_ms: f64,
    pub(super) correction_ms: f64,
    pub(super) trigger_ms: f64,
    pub(super) pair_tests: u32,
    pub(super) contacts: u32,
    pub(super) impulses: u32,
    pub(super) trigger_events: u32,
    pub(super) body_count: u32,
    pub(super) trigger_count: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }

    pub(crate) fn record_passes(&mut self, passes: PassStats) {
        self.pair_tests = passes.pair_tests;
        self.contacts = passes.contacts;
        self.impulses = passes.impulses;
        self.trigger_events = passes.trigger_events;
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn sync_ms(&self) -> f64 { self.sync_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn static_ms(&self) -> f64 { self.static_ms }
    #[wasm_bindgen(getter)]
    pub fn dynamic_static_ms(&self) -> f64 { self.dynamic_static_ms }
    #[wasm_bindgen(getter)]
    pub fn dynamic_dynamic_ms(&self) -> f64 { self.dynamic_dynamic_ms }
    #[wasm_bindgen(getter)]
    pub fn correction_ms(&self) -> f64 { self.correction_ms }
    #[wasm_bindgen(getter)]
    pub fn trigger_ms(&self) -> f64 { self.trigger_ms }
    #[wasm_bindgen(getter)]
    pub fn pair_tests(&self) -> u32 { self.pair_tests }
    #[wasm_bindgen(getter)]
    pub fn contacts(&self) -> u32 { self.contacts }
    #[wasm_bindgen(getter)]
    pub fn impulses(&self) -> u32 { self.impulses }
    #[wasm_bindgen(getter)]
    pub fn trigger_events(&self) -> u32 { self.trigger_events }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn trigger_count(&self) -> u32 { self.trigger_count }
}
