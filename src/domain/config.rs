//! World configuration and scene files (JSON).

use serde::{Deserialize, Serialize};

use crate::domain::errors::ConfigError;
use crate::domain::material::Material;
use crate::rigid_body::{BodyDesc, Vec2};
use crate::trigger::TriggerDesc;

pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, -9.8);

fn default_gravity() -> Vec2 {
    DEFAULT_GRAVITY
}

fn default_true() -> bool {
    true
}

fn check_gravity(gravity: Vec2) -> Result<Vec2, ConfigError> {
    if gravity.is_finite() {
        Ok(gravity)
    } else {
        Err(ConfigError::InvalidGravity(gravity.x, gravity.y))
    }
}

/// Global knobs of a world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    #[serde(default = "default_gravity")]
    pub gravity: Vec2,
    /// Off: contacts are still detected and pushed apart, but velocities are
    /// left alone.
    #[serde(default = "default_true")]
    pub resolve_impulses: bool,
    /// Used by bodies whose descriptor has no material.
    #[serde(default)]
    pub default_material: Material,
    /// Collect per-pass timings into `PerfStats`.
    #[serde(default)]
    pub perf_stats: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            resolve_impulses: true,
            default_material: Material::default(),
            perf_stats: false,
        }
    }
}

impl PhysicsConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: PhysicsConfig = serde_json::from_str(json)?;
        config.gravity = check_gravity(config.gravity)?;
        config.default_material = config.default_material.sanitized();
        Ok(config)
    }
}

/// A scene to spawn into a world: optional gravity override, bodies and
/// triggers in bucket order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDesc {
    #[serde(default)]
    pub gravity: Option<Vec2>,
    #[serde(default)]
    pub bodies: Vec<BodyDesc>,
    #[serde(default)]
    pub triggers: Vec<TriggerDesc>,
}

impl SceneDesc {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let scene: SceneDesc = serde_json::from_str(json)?;
        if let Some(gravity) = scene.gravity {
            check_gravity(gravity)?;
        }
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::ShapeKind;
    use crate::rigid_body::SimulationType;

    #[test]
    fn empty_config_uses_defaults() {
        let config = PhysicsConfig::from_json("{}").unwrap();
        assert_eq!(config, PhysicsConfig::default());
        assert_eq!(config.gravity, Vec2::new(0.0, -9.8));
    }

    #[test]
    fn config_overrides_and_sanitizes() {
        let config = PhysicsConfig::from_json(
            r#"{ "gravity": { "x": 1.0, "y": 0.0 }, "resolve_impulses": false,
                 "default_material": { "friction": -2.0, "restitution": 0.5 } }"#,
        )
        .unwrap();
        assert_eq!(config.gravity, Vec2::new(1.0, 0.0));
        assert!(!config.resolve_impulses);
        assert_eq!(config.default_material, Material::new(0.0, 0.5));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(PhysicsConfig::from_json("{ gravity"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn scene_parses_bodies_and_triggers() {
        let scene = SceneDesc::from_json(
            r#"{
                "bodies": [
                    { "simulation_type": "static",
                      "shape": { "kind": "half_plane", "normal": { "x": 0.0, "y": 1.0 }, "offset": 0.0 } },
                    { "simulation_type": "dynamic", "mass": 2.0,
                      "transform": { "position": { "x": 0.0, "y": 5.0 } },
                      "shape": { "kind": "circle", "radius": 0.5 },
                      "on_collision": "ball_hit" }
                ],
                "triggers": [
                    { "shape": { "kind": "aabb", "half_extents": { "x": 1.0, "y": 1.0 } },
                      "on_enter": "entered" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(scene.gravity, None);
        assert_eq!(scene.bodies.len(), 2);
        assert_eq!(scene.bodies[0].shape.kind(), ShapeKind::HalfPlane);
        assert_eq!(scene.bodies[1].simulation_type, SimulationType::Dynamic);
        assert_eq!(scene.bodies[1].mass, 2.0);
        assert_eq!(scene.bodies[1].on_collision.as_deref(), Some("ball_hit"));
        assert_eq!(scene.triggers[0].simulation_type, SimulationType::Static);
    }
}
