use log::debug;

use crate::domain::config::SceneDesc;
use crate::domain::errors::{BodyError, ConfigError};
use crate::rigid_body::BodyDesc;
use crate::rigid_body_system::{BodyHandle, TriggerHandle};

use super::WorldCore;

/// What a scene load created, in scene order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneHandles {
    pub bodies: Vec<BodyHandle>,
    pub triggers: Vec<TriggerHandle>,
}

pub(super) fn create_rigidbody(world: &mut WorldCore, desc: BodyDesc) -> Result<BodyHandle, BodyError> {
    world.bodies.create_rigidbody(desc, world.config.default_material)
}

pub(super) fn spawn(world: &mut WorldCore, desc: BodyDesc) -> Result<BodyHandle, BodyError> {
    world.bodies.spawn(desc, world.config.default_material)
}

pub(super) fn load_scene(world: &mut WorldCore, scene: SceneDesc) -> Result<SceneHandles, ConfigError> {
    if let Some(gravity) = scene.gravity.filter(|g| !g.is_finite()) {
        return Err(ConfigError::InvalidGravity(gravity.x, gravity.y));
    }
    let mut created = SceneHandles::default();
    if let Err(err) = spawn_all(world, scene, &mut created) {
        world.bodies.retract(&created.bodies, &created.triggers);
        return Err(err);
    }
    debug!(
        "scene loaded: {} bodies, {} triggers",
        created.bodies.len(),
        created.triggers.len()
    );
    Ok(created)
}

fn spawn_all(world: &mut WorldCore, scene: SceneDesc, created: &mut SceneHandles) -> Result<(), ConfigError> {
    for (index, desc) in scene.bodies.into_iter().enumerate() {
        let handle = spawn(world, desc).map_err(|source| ConfigError::Body { index, source })?;
        created.bodies.push(handle);
    }
    for (index, desc) in scene.triggers.into_iter().enumerate() {
        let handle = world
            .bodies
            .spawn_trigger(desc)
            .map_err(|source| ConfigError::Trigger { index, source })?;
        created.triggers.push(handle);
    }
    if let Some(gravity) = scene.gravity {
        world.config.gravity = gravity;
    }
    Ok(())
}
