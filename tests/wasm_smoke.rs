#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use rigid2d_engine::World;

#[wasm_bindgen_test]
fn facade_steps_and_reports() {
    rigid2d_engine::init();
    let mut world = World::new();
    world.spawn_half_plane(0.0, 1.0, 0.0).unwrap();
    let ball = world.spawn_circle(0.0, 3.0, 0.5, 1.0, true).unwrap();

    for _ in 0..120 {
        world.step(1.0 / 60.0);
    }
    let t = world.body_transform(ball).unwrap();
    assert!(t[1] > 0.4 && t[1] < 3.0);
    assert_eq!(world.frame(), 120);
}

#[wasm_bindgen_test]
fn invalid_shape_is_a_js_error() {
    let mut world = World::new();
    assert!(world.spawn_circle(0.0, 0.0, -1.0, 1.0, true).is_err());
    assert!(world.spawn_circle(0.0, 0.0, 1.0, 0.0, true).is_err());
    assert_eq!(world.body_count(), 0);
}

#[wasm_bindgen_test]
fn init_installs_the_console_logger_once() {
    rigid2d_engine::init();
    assert!(!rigid2d_engine::core::logging::install_console_logger(log::Level::Debug));
    log::info!("console logger reachable");
}
