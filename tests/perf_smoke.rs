use rigid2d_engine::World;

#[test]
fn perf_smoke_step() {
    let mut world = World::new();
    world.enable_perf_metrics(true);
    world.spawn_half_plane(0.0, 1.0, 0.0).unwrap();
    for i in 0..8 {
        for j in 0..4 {
            world
                .spawn_circle(i as f32 * 1.1, 1.0 + j as f32 * 1.1, 0.5, 1.0, true)
                .unwrap();
        }
    }
    world.step(1.0 / 60.0);
    let stats = world.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.body_count(), 33);
    // 32 dynamic vs 1 static, twice, plus every dynamic pair once.
    assert_eq!(stats.pair_tests(), 2 * 32 + 32 * 31 / 2);
}

#[test]
fn debug_lines_are_built() {
    let mut world = World::new();
    world.spawn_box(0.0, 0.0, 1.0, 1.0, 1.0, false).unwrap();
    world.spawn_circle(0.0, 5.0, 0.5, 1.0, true).unwrap();
    let lines = world.build_debug_lines();
    assert_eq!(world.debug_line_points().len(), lines * 4);
    assert_eq!(world.debug_line_colors().len(), lines);
    assert!(lines > 4);
}
