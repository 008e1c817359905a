use log::debug;

use crate::domain::config::PhysicsConfig;
use crate::rigid_body_system::RigidBodySystem;

use super::perf_stats::PerfStats;
use super::{EventBus, WorldCore};

pub(super) fn create_world_core(config: PhysicsConfig) -> WorldCore {
    debug!(
        "world created: gravity ({}, {}), impulses {}",
        config.gravity.x,
        config.gravity.y,
        if config.resolve_impulses { "on" } else { "off" }
    );
    let perf_enabled = config.perf_stats;
    WorldCore {
        bodies: RigidBodySystem::new(),
        config,
        events: EventBus::new(),
        frame: 0,
        perf_enabled,
        perf_stats: PerfStats::default(),
    }
}
