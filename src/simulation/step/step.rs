use log::{trace, warn};

use crate::rigid_body_system::PassStats;

use super::perf_timer::timed;
use super::{PerfTimer, WorldCore};

/// One fixed-order physics step.
pub(super) fn update(world: &mut WorldCore, dt: f32) {
    if !(dt.is_finite() && dt > 0.0) {
        warn!("update: ignoring dt {dt}");
        return;
    }

    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    let WorldCore { bodies, config, events, frame, perf_stats, .. } = world;
    let mut passes = PassStats::default();

    timed(perf_on, &mut perf_stats.sync_ms, || bodies.copy_transforms_from_objects());
    bodies.set_all_collisions_to_false();
    *frame = frame.wrapping_add(1);

    timed(perf_on, &mut perf_stats.integrate_ms, || {
        bodies.move_all_dynamic_objects(dt, config.gravity)
    });

    // Static geometry only reports; it never moves.
    let static_hits = timed(perf_on, &mut perf_stats.static_ms, || {
        bodies.check_static_vs_static(&mut *events, &mut passes)
    });

    timed(perf_on, &mut perf_stats.dynamic_static_ms, || {
        bodies.resolve_dynamic_vs_static(config.resolve_impulses, &mut *events, &mut passes)
    });
    timed(perf_on, &mut perf_stats.dynamic_dynamic_ms, || {
        bodies.resolve_dynamic_vs_dynamic(config.resolve_impulses, &mut passes)
    });
    // Dynamic pairs may have pushed bodies back into static geometry.
    timed(perf_on, &mut perf_stats.correction_ms, || {
        bodies.resolve_dynamic_vs_static(false, &mut *events, &mut passes)
    });

    let now = *frame;
    timed(perf_on, &mut perf_stats.trigger_ms, || {
        bodies.update_triggers(now, &mut *events, &mut passes)
    });

    timed(perf_on, &mut perf_stats.sync_ms, || bodies.copy_transforms_to_objects());

    trace!(
        "frame {now}: {static_hits} static hits, {} contacts, {} impulses, {} trigger events",
        passes.contacts,
        passes.impulses,
        passes.trigger_events
    );

    if perf_on {
        perf_stats.record_passes(passes);
        perf_stats.body_count = bodies.body_count() as u32;
        perf_stats.trigger_count = bodies.trigger_count() as u32;
        if let Some(start) = step_start {
            perf_stats.step_ms = start.elapsed_ms();
        }
    }
}
