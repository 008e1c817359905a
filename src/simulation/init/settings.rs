use log::warn;

use crate::rigid_body::Vec2;

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    world.config.perf_stats = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}

pub(super) fn set_gravity(world: &mut WorldCore, x: f32, y: f32) {
    let gravity = Vec2::new(x, y);
    if !gravity.is_finite() {
        warn!("set_gravity: ignoring non-finite ({x}, {y})");
        return;
    }
    world.config.gravity = gravity;
}

pub(super) fn set_resolve_impulses(world: &mut WorldCore, enabled: bool) {
    world.config.resolve_impulses = enabled;
}
