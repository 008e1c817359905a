//! Per-step passes over the buckets
//!
//! Each pass walks bucket handles by index and skips stale or killed
//! entries; nothing is removed while a pass runs.

use crate::collider::{collide, Manifold, WorldShape};
use crate::rigid_body::Vec2;
use crate::trigger::TriggerTransition;

use super::resolve::{resolve_contact, separate_pair};
use super::system::{live_in, BodyHandle, RigidBodySystem, TriggerHandle};

const STATIC: usize = 0;
const DYNAMIC: usize = 1;

/// Receives named events fired by the passes.
pub trait ContactListener {
    /// `body`'s collider named `event` touched `other`.
    fn on_collision(&mut self, event: &str, body: BodyHandle, other: BodyHandle);
    /// `body` entered or left `trigger`; `event` is the matching name.
    fn on_trigger(&mut self, event: &str, trigger: TriggerHandle, body: BodyHandle);
}

impl ContactListener for () {
    fn on_collision(&mut self, _: &str, _: BodyHandle, _: BodyHandle) {}
    fn on_trigger(&mut self, _: &str, _: TriggerHandle, _: BodyHandle) {}
}

/// Counters for one step, folded into the perf stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    pub pair_tests: u32,
    pub contacts: u32,
    pub impulses: u32,
    pub trigger_events: u32,
}

/// `n * (n - 1)`, saturating at `u32::MAX`.
fn ordered_pairs(n: usize) -> u32 {
    let n = u32::try_from(n).unwrap_or(u32::MAX);
    n.saturating_mul(n.saturating_sub(1))
}

#[cfg(feature = "parallel")]
fn static_hits(shapes: &[(BodyHandle, WorldShape)]) -> Vec<(usize, usize, Manifold)> {
    use rayon::prelude::*;

    (0..shapes.len())
        .into_par_iter()
        .flat_map_iter(|i| {
            (0..shapes.len()).filter(move |&j| j != i).filter_map(move |j| {
                collide(&shapes[i].1, &shapes[j].1).map(|m| (i, j, m))
            })
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn static_hits(shapes: &[(BodyHandle, WorldShape)]) -> Vec<(usize, usize, Manifold)> {
    let mut hits = Vec::new();
    for (i, (_, a)) in shapes.iter().enumerate() {
        for (j, (_, b)) in shapes.iter().enumerate() {
            if i == j {
                continue;
            }
            if let Some(m) = collide(a, b) {
                hits.push((i, j, m));
            }
        }
    }
    hits
}

impl RigidBodySystem {
    pub fn copy_transforms_from_objects(&mut self) {
        let Self { bodies, buckets, triggers, trigger_buckets } = self;
        for &h in buckets.iter().flatten() {
            if let Some(body) = bodies.get_mut(h) {
                body.copy_transform_from_object();
            }
        }
        for &h in trigger_buckets.iter().flatten() {
            if let Some(trigger) = triggers.get_mut(h) {
                trigger.copy_transform_from_object();
            }
        }
    }

    pub fn copy_transforms_to_objects(&self) {
        for &h in self.buckets.iter().flatten() {
            if let Some(body) = self.bodies.get(h).filter(|b| b.is_alive()) {
                body.copy_transform_to_object();
            }
        }
        for &h in self.trigger_buckets.iter().flatten() {
            if let Some(trigger) = self.triggers.get(h).filter(|t| t.is_alive()) {
                trigger.copy_transform_to_object();
            }
        }
    }

    /// Clear the debug collision flag on every bucketed body and trigger.
    pub fn set_all_collisions_to_false(&mut self) {
        let Self { bodies, buckets, triggers, trigger_buckets } = self;
        for &h in buckets.iter().flatten() {
            if let Some(body) = bodies.get_mut(h) {
                body.collider_mut().set_collision(false);
            }
        }
        for &h in trigger_buckets.iter().flatten() {
            if let Some(trigger) = triggers.get_mut(h) {
                trigger.collider_mut().set_collision(false);
            }
        }
    }

    pub fn move_all_dynamic_objects(&mut self, dt: f32, gravity: Vec2) {
        for &h in &self.buckets[DYNAMIC] {
            if let Some(body) = self.bodies.get_mut(h).filter(|b| b.is_alive()) {
                body.integrate(dt, gravity);
            }
        }
    }

    /// Every ordered pair of static bodies. Only flags are set, and the event
    /// of the first body of each pair is fired; nothing moves. Returns the
    /// number of overlapping ordered pairs.
    pub fn check_static_vs_static(
        &mut self,
        listener: &mut dyn ContactListener,
        stats: &mut PassStats,
    ) -> usize {
        let shapes: Vec<(BodyHandle, WorldShape)> = live_in(&self.bodies, &self.buckets[STATIC])
            .map(|(h, body)| (h, body.collider().world_shape(&body.transform)))
            .collect();
        stats.pair_tests = stats.pair_tests.saturating_add(ordered_pairs(shapes.len()));

        let hits = static_hits(&shapes);
        let count = hits.len();
        for (i, j, _) in hits {
            let (body, other) = (shapes[i].0, shapes[j].0);
            stats.contacts += 1;
            if let Some((a, b)) = self.bodies.get2_mut(body, other) {
                a.collider_mut().set_collision(true);
                b.collider_mut().set_collision(true);
                if let Some(event) = a.collider().event_name() {
                    listener.on_collision(event, body, other);
                }
            }
        }
        count
    }

    /// Dynamic bodies against static ones, in bucket order.
    ///
    /// Overlapping pairs get their flags and events (both sides), then the
    /// dynamic body is pushed out along the manifold. With `resolve` set an
    /// impulse follows.
    pub fn resolve_dynamic_vs_static(
        &mut self,
        resolve: bool,
        listener: &mut dyn ContactListener,
        stats: &mut PassStats,
    ) {
        for i in 0..self.buckets[DYNAMIC].len() {
            let dh = self.buckets[DYNAMIC][i];
            for k in 0..self.buckets[STATIC].len() {
                let sh = self.buckets[STATIC][k];
                let Some((dynamic, fixed)) = self.bodies.get2_mut(dh, sh) else {
                    continue;
                };
                if !dynamic.is_alive() || !fixed.is_alive() {
                    continue;
                }
                stats.pair_tests += 1;
                let Some(manifold) =
                    dynamic.collider().is_touching(&dynamic.transform, fixed.collider(), &fixed.transform)
                else {
                    continue;
                };
                stats.contacts += 1;

                dynamic.collider_mut().set_collision(true);
                fixed.collider_mut().set_collision(true);
                if let Some(event) = dynamic.collider().event_name() {
                    listener.on_collision(event, dh, sh);
                }
                if let Some(event) = fixed.collider().event_name() {
                    listener.on_collision(event, sh, dh);
                }

                if !manifold.has_direction() {
                    continue;
                }
                dynamic.move_by(manifold.separation());
                if resolve && resolve_contact(dynamic, fixed, &manifold, 1.0).is_some() {
                    stats.impulses += 1;
                }
            }
        }
    }

    /// Each unordered dynamic pair once. Correction is split by mass; no
    /// events are fired.
    pub fn resolve_dynamic_vs_dynamic(&mut self, resolve: bool, stats: &mut PassStats) {
        let count = self.buckets[DYNAMIC].len();
        for i in 0..count {
            for j in (i + 1)..count {
                let (ah, bh) = (self.buckets[DYNAMIC][i], self.buckets[DYNAMIC][j]);
                let Some((a, b)) = self.bodies.get2_mut(ah, bh) else {
                    continue;
                };
                if !a.is_alive() || !b.is_alive() {
                    continue;
                }
                stats.pair_tests += 1;
                let Some(manifold) = a.collider().is_touching(&a.transform, b.collider(), &b.transform)
                else {
                    continue;
                };
                stats.contacts += 1;

                a.collider_mut().set_collision(true);
                b.collider_mut().set_collision(true);
                if !manifold.has_direction() {
                    continue;
                }
                let share = separate_pair(a, b, &manifold);
                if resolve && resolve_contact(a, b, &manifold, share).is_some() {
                    stats.impulses += 1;
                }
            }
        }
    }

    /// Enter/exit bookkeeping of every trigger against the live dynamic bodies.
    pub fn update_triggers(
        &mut self,
        frame: u32,
        listener: &mut dyn ContactListener,
        stats: &mut PassStats,
    ) {
        let Self { bodies, buckets, triggers, trigger_buckets } = self;
        let dynamic = &buckets[DYNAMIC];
        for &th in trigger_buckets.iter().flatten() {
            let Some(trigger) = triggers.get_mut(th).filter(|t| t.is_alive()) else {
                continue;
            };
            let transitions = trigger.update(frame, live_in(bodies, dynamic));
            for transition in transitions {
                let (event, body) = match transition {
                    TriggerTransition::Enter(body) => (trigger.on_enter_event(), body),
                    TriggerTransition::Exit(body) => (trigger.on_exit_event(), body),
                };
                stats.trigger_events += 1;
                if let Some(event) = event {
                    listener.on_trigger(event, th, body);
                }
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::Shape;
    use crate::domain::material::Material;
    use crate::rigid_body::BodyDesc;

    #[derive(Default)]
    struct Recorder {
        collisions: Vec<(String, BodyHandle, BodyHandle)>,
        triggers: Vec<(String, TriggerHandle, BodyHandle)>,
    }

    impl ContactListener for Recorder {
        fn on_collision(&mut self, event: &str, body: BodyHandle, other: BodyHandle) {
            self.collisions.push((event.to_string(), body, other));
        }

        fn on_trigger(&mut self, event: &str, trigger: TriggerHandle, body: BodyHandle) {
            self.triggers.push((event.to_string(), trigger, body));
        }
    }

    fn wall(x: f32, event: &str) -> BodyDesc {
        BodyDesc::fixed(Shape::aabb(1.0, 1.0).unwrap()).at(x, 0.0).with_event(event)
    }

    #[test]
    fn static_pairs_fire_on_first_body() {
        let mut sys = RigidBodySystem::new();
        let a = sys.spawn(wall(0.0, "a"), Material::default()).unwrap();
        let b = sys.spawn(wall(1.5, "b"), Material::default()).unwrap();
        let far = sys.spawn(wall(10.0, "far"), Material::default()).unwrap();

        let mut rec = Recorder::default();
        let mut stats = PassStats::default();
        let hits = sys.check_static_vs_static(&mut rec, &mut stats);

        assert_eq!(stats.pair_tests, 6);
        assert_eq!(hits, 2);
        assert_eq!(
            rec.collisions,
            vec![("a".to_string(), a, b), ("b".to_string(), b, a)]
        );
        assert!(sys.body(a).unwrap().collider().in_collision());
        assert!(!sys.body(far).unwrap().collider().in_collision());
        // Static bodies never move.
        assert_eq!(sys.body(a).unwrap().position(), Vec2::zero());
    }

    #[test]
    fn dynamic_vs_static_fires_both_and_pushes_out() {
        let mut sys = RigidBodySystem::new();
        let ground = sys
            .spawn(
                BodyDesc::fixed(Shape::half_plane(Vec2::new(0.0, 1.0), 0.0).unwrap()).with_event("ground"),
                Material::default(),
            )
            .unwrap();
        let ball = sys
            .spawn(
                BodyDesc::dynamic(Shape::circle(1.0).unwrap(), 1.0)
                    .at(0.0, 0.5)
                    .with_velocity(Vec2::new(0.0, -1.0))
                    .with_event("ball"),
                Material::default(),
            )
            .unwrap();

        let mut rec = Recorder::default();
        let mut stats = PassStats::default();
        sys.resolve_dynamic_vs_static(true, &mut rec, &mut stats);

        assert_eq!(
            rec.collisions,
            vec![("ball".to_string(), ball, ground), ("ground".to_string(), ground, ball)]
        );
        let body = sys.body(ball).unwrap();
        assert!((body.position().y - 1.0).abs() < 1e-5);
        assert!(body.velocity.y > 0.0);
        assert_eq!(stats.impulses, 1);
    }

    #[test]
    fn non_resolving_pass_only_corrects_position() {
        let mut sys = RigidBodySystem::new();
        sys.spawn(
            BodyDesc::fixed(Shape::half_plane(Vec2::new(0.0, 1.0), 0.0).unwrap()),
            Material::default(),
        )
        .unwrap();
        let ball = sys
            .spawn(
                BodyDesc::dynamic(Shape::circle(1.0).unwrap(), 1.0)
                    .at(0.0, 0.5)
                    .with_velocity(Vec2::new(0.0, -1.0)),
                Material::default(),
            )
            .unwrap();

        let mut stats = PassStats::default();
        sys.resolve_dynamic_vs_static(false, &mut (), &mut stats);
        let body = sys.body(ball).unwrap();
        assert!((body.position().y - 1.0).abs() < 1e-5);
        assert_eq!(body.velocity, Vec2::new(0.0, -1.0));
        assert_eq!(stats.impulses, 0);
    }

    #[test]
    fn dynamic_pairs_split_correction_by_mass() {
        let mut sys = RigidBodySystem::new();
        let light = sys
            .spawn(BodyDesc::dynamic(Shape::circle(1.0).unwrap(), 1.0).at(-0.9, 0.0), Material::default())
            .unwrap();
        let heavy = sys
            .spawn(BodyDesc::dynamic(Shape::circle(1.0).unwrap(), 3.0).at(0.9, 0.0), Material::default())
            .unwrap();

        let mut stats = PassStats::default();
        sys.resolve_dynamic_vs_dynamic(false, &mut stats);
        let (l, h) = (sys.body(light).unwrap().position(), sys.body(heavy).unwrap().position());
        assert!((l.x + 0.9 + 0.15).abs() < 1e-5, "{l:?}");
        assert!((h.x - 0.9 - 0.05).abs() < 1e-5, "{h:?}");
        assert_eq!(stats.pair_tests, 1);
    }

    #[test]
    fn killed_bodies_are_skipped_by_passes() {
        let mut sys = RigidBodySystem::new();
        let a = sys.spawn(wall(0.0, "a"), Material::default()).unwrap();
        sys.spawn(wall(1.0, "b"), Material::default()).unwrap();
        sys.kill(a);

        let mut rec = Recorder::default();
        let mut stats = PassStats::default();
        assert_eq!(sys.check_static_vs_static(&mut rec, &mut stats), 0);
        assert!(rec.collisions.is_empty());
    }

    #[test]
    fn static_pair_count_saturates() {
        assert_eq!(ordered_pairs(0), 0);
        assert_eq!(ordered_pairs(1), 0);
        assert_eq!(ordered_pairs(4), 12);
        assert_eq!(ordered_pairs(65_535), 65_535 * 65_534);
        assert_eq!(ordered_pairs(65_536), 65_536 * 65_535);
        assert_eq!(ordered_pairs(65_537), u32::MAX);
        assert_eq!(ordered_pairs(usize::MAX), u32::MAX);
    }
}
