use rigid2d_engine::rigid_body_system::friction_impulse;
use rigid2d_engine::{BodyDesc, Material, Shape, SimulationType, Vec2, WorldCore};

const DT: f32 = 1.0 / 60.0;

fn world_without_gravity() -> WorldCore {
    let mut world = WorldCore::new();
    world.set_gravity(0.0, 0.0);
    world
}

fn ground(material: Material) -> BodyDesc {
    BodyDesc::fixed(Shape::half_plane(Vec2::new(0.0, 1.0), 0.0).unwrap()).with_material(material)
}

#[test]
fn separated_static_bodies_stay_unflagged() {
    let mut world = WorldCore::new();
    let a = world.spawn(BodyDesc::fixed(Shape::aabb(1.0, 1.0).unwrap()).at(0.0, 0.0)).unwrap();
    let b = world.spawn(BodyDesc::fixed(Shape::aabb(1.0, 1.0).unwrap()).at(3.0, 0.0)).unwrap();
    let c = world.spawn(BodyDesc::fixed(Shape::circle(0.5).unwrap()).at(0.0, 5.0)).unwrap();

    world.step_frame(DT);
    for h in [a, b, c] {
        assert!(!world.bodies().body(h).unwrap().collider().in_collision());
    }

    // Overlapping statics, by contrast, are flagged and stay put.
    let d = world.spawn(BodyDesc::fixed(Shape::aabb(1.0, 1.0).unwrap()).at(1.5, 0.0)).unwrap();
    world.step_frame(DT);
    assert!(world.bodies().body(d).unwrap().collider().in_collision());
    assert_eq!(world.bodies().body(d).unwrap().position(), Vec2::new(1.5, 0.0));
}

#[test]
fn inelastic_ball_comes_to_rest_on_ground() {
    let mut world = WorldCore::new();
    world.spawn(ground(Material::new(0.5, 0.0))).unwrap();
    let ball = world
        .spawn(
            BodyDesc::dynamic(Shape::circle(0.5).unwrap(), 2.0)
                .at(0.0, 2.0)
                .with_material(Material::new(0.5, 0.0)),
        )
        .unwrap();

    let mut peak_after_contact = f32::NEG_INFINITY;
    let mut touched = false;
    for _ in 0..600 {
        world.step_frame(DT);
        let body = world.bodies().body(ball).unwrap();
        if body.collider().in_collision() {
            touched = true;
        }
        if touched {
            peak_after_contact = peak_after_contact.max(body.position().y);
        }
    }

    let body = world.bodies().body(ball).unwrap();
    let penetration = 0.5 - body.position().y;
    assert!(penetration <= 1e-3, "penetration {penetration}");
    assert!(body.velocity.y.abs() < 1e-2, "vy {}", body.velocity.y);
    // No bounce: it never climbs back towards the drop height.
    assert!(peak_after_contact < 0.6, "peak {peak_after_contact}");
}

#[test]
fn equal_mass_elastic_head_on_swaps_velocities() {
    let mut world = world_without_gravity();
    let elastic = Material::new(0.0, 1.0);
    let left = world
        .spawn(
            BodyDesc::dynamic(Shape::circle(1.0).unwrap(), 1.0)
                .at(-0.99, 0.0)
                .with_velocity(Vec2::new(1.0, 0.0))
                .with_material(elastic),
        )
        .unwrap();
    let right = world
        .spawn(
            BodyDesc::dynamic(Shape::circle(1.0).unwrap(), 1.0)
                .at(0.99, 0.0)
                .with_velocity(Vec2::new(-1.0, 0.0))
                .with_material(elastic),
        )
        .unwrap();

    world.update(0.01);
    let (l, r) = (world.bodies().body(left).unwrap(), world.bodies().body(right).unwrap());
    assert!((l.velocity.x + 1.0).abs() < 1e-4, "left {:?}", l.velocity);
    assert!((r.velocity.x - 1.0).abs() < 1e-4, "right {:?}", r.velocity);
    assert!(l.velocity.y.abs() < 1e-5 && r.velocity.y.abs() < 1e-5);
}

#[test]
fn positional_correction_never_deepens_penetration() {
    let statics = [
        BodyDesc::fixed(Shape::half_plane(Vec2::new(0.0, 1.0), 0.0).unwrap()),
        BodyDesc::fixed(Shape::aabb(2.0, 0.5).unwrap()),
        BodyDesc::fixed(Shape::polygon(vec![
            Vec2::new(-2.0, -1.0),
            Vec2::new(2.0, -1.0),
            Vec2::new(0.0, 1.5),
        ]).unwrap()),
        BodyDesc::fixed(Shape::circle(1.0).unwrap()),
    ];
    let movers = [
        Shape::circle(0.5).unwrap(),
        Shape::aabb(0.5, 0.25).unwrap(),
        Shape::polygon(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]).unwrap(),
    ];
    let offsets = [Vec2::new(0.1, 0.2), Vec2::new(-0.7, 0.6), Vec2::new(0.9, -0.1)];

    for fixed in &statics {
        for shape in &movers {
            for &at in &offsets {
                let mut world = world_without_gravity();
                world.set_resolve_impulses(false);
                let s = world.spawn(fixed.clone()).unwrap();
                let d = world
                    .spawn(BodyDesc::dynamic(shape.clone(), 1.0).at(at.x, at.y))
                    .unwrap();

                let depth = |world: &WorldCore| {
                    let (db, sb) = (world.bodies().body(d).unwrap(), world.bodies().body(s).unwrap());
                    db.collider()
                        .is_touching(&db.transform, sb.collider(), &sb.transform)
                        .map_or(0.0, |m| m.penetration)
                };
                let before = depth(&world);
                world.update(1e-4);
                let after = depth(&world);
                assert!(
                    after <= before + 1e-5,
                    "{:?} vs {:?} at {at:?}: {before} -> {after}",
                    shape.kind(),
                    fixed.shape.kind()
                );
            }
        }
    }
}

#[test]
fn purge_removes_dead_and_keeps_order() {
    let mut world = world_without_gravity();
    let handles: Vec<_> = (0..5)
        .map(|i| {
            world
                .spawn(BodyDesc::dynamic(Shape::circle(0.5).unwrap(), 1.0).at(i as f32 * 4.0, 0.0))
                .unwrap()
        })
        .collect();

    world.bodies_mut().body_mut(handles[2]).unwrap().set_alive(false);
    world.update(DT);
    // Still bucketed until the purge.
    assert_eq!(world.bodies().bucket(SimulationType::Dynamic).len(), 5);

    assert_eq!(world.purge_deleted_objects(), 1);
    let expected = [handles[0], handles[1], handles[3], handles[4]];
    assert_eq!(world.bodies().bucket(SimulationType::Dynamic), &expected);
    assert!(world.bodies().body(handles[2]).is_none());
}

#[test]
fn free_fall_matches_gravity() {
    let mut world = WorldCore::new();
    world.enable_perf_metrics(true);
    let h = world
        .spawn(BodyDesc::dynamic(Shape::circle(0.5).unwrap(), 1.0).at(0.0, 100.0))
        .unwrap();

    for step in 1..=60 {
        world.step_frame(DT);
        assert_eq!(world.get_perf_stats().impulses(), 0);
        let t = step as f32 * DT;
        let vy = world.bodies().body(h).unwrap().velocity.y;
        assert!((vy + 9.8 * t).abs() < 1e-3, "t={t} vy={vy}");
    }
}

#[test]
fn friction_impulse_is_bounded_by_normal_impulse() {
    // Deterministic spread of values, including extreme friction inputs.
    let mut seed = 0x2545_f491_u32;
    let mut next = || {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        (seed as f32 / u32::MAX as f32) * 200.0 - 100.0
    };
    for _ in 0..2000 {
        let (jt, j, mu) = (next(), next(), next());
        for friction in [mu, mu.abs(), 0.0, 1e6, f32::INFINITY] {
            let applied = friction_impulse(jt, j, friction);
            assert!(applied.abs() <= j.abs(), "jt={jt} j={j} mu={friction} -> {applied}");
        }
    }
}
