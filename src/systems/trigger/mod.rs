//! Trigger volumes
//!
//! A trigger overlaps bodies without ever pushing them. Each update it tests
//! its collider against the dynamic bodies it is given and reports which ones
//! entered or left, keyed by the frame counter of the step.

use serde::{Deserialize, Serialize};

use crate::collider::{Collider, Shape};
use crate::domain::errors::ShapeError;
use crate::rigid_body::{ObjectTransform, RigidBody, SimulationType, Transform2D};
use crate::rigid_body_system::BodyHandle;

fn default_trigger_type() -> SimulationType {
    SimulationType::Static
}

/// Scene-file / constructor record for a trigger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerDesc {
    #[serde(default = "default_trigger_type")]
    pub simulation_type: SimulationType,
    #[serde(default)]
    pub transform: Transform2D,
    pub shape: Shape,
    #[serde(default)]
    pub on_enter: Option<String>,
    #[serde(default)]
    pub on_exit: Option<String>,
}

impl TriggerDesc {
    pub fn new(shape: Shape) -> Self {
        Self {
            simulation_type: default_trigger_type(),
            transform: Transform2D::default(),
            shape,
            on_enter: None,
            on_exit: None,
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.transform = Transform2D::at(x, y);
        self
    }

    pub fn on_enter(mut self, name: impl Into<String>) -> Self {
        self.on_enter = Some(name.into());
        self
    }

    pub fn on_exit(mut self, name: impl Into<String>) -> Self {
        self.on_exit = Some(name.into());
        self
    }
}

/// A body crossing the trigger boundary this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerTransition {
    Enter(BodyHandle),
    Exit(BodyHandle),
}

#[derive(Clone, Copy, Debug)]
struct Occupant {
    body: BodyHandle,
    last_seen: u32,
}

#[derive(Debug)]
pub struct Trigger {
    simulation_type: SimulationType,
    alive: bool,
    pub transform: Transform2D,
    collider: Collider,
    object: ObjectTransform,
    on_enter: Option<String>,
    on_exit: Option<String>,
    /// In order of entry
    occupants: Vec<Occupant>,
}

impl Trigger {
    pub fn from_desc(desc: TriggerDesc) -> Result<Self, ShapeError> {
        desc.shape.validate()?;
        Ok(Self {
            simulation_type: desc.simulation_type,
            alive: true,
            transform: desc.transform,
            collider: Collider::new(desc.shape),
            object: ObjectTransform::new(desc.transform),
            on_enter: desc.on_enter,
            on_exit: desc.on_exit,
            occupants: Vec::new(),
        })
    }

    pub fn simulation_type(&self) -> SimulationType {
        self.simulation_type
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    pub fn collider_mut(&mut self) -> &mut Collider {
        &mut self.collider
    }

    pub fn on_enter_event(&self) -> Option<&str> {
        self.on_enter.as_deref()
    }

    pub fn on_exit_event(&self) -> Option<&str> {
        self.on_exit.as_deref()
    }

    pub fn object_transform(&self) -> &ObjectTransform {
        &self.object
    }

    pub fn attach_object(&mut self, object: ObjectTransform) {
        self.transform = object.get();
        self.object = object;
    }

    pub fn copy_transform_from_object(&mut self) {
        self.transform = self.object.get();
    }

    pub fn copy_transform_to_object(&self) {
        self.object.set(self.transform);
    }

    pub fn contains(&self, body: BodyHandle) -> bool {
        self.occupants.iter().any(|o| o.body == body)
    }

    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    /// Enter/exit bookkeeping for one frame.
    ///
    /// `bodies` should be the live dynamic bodies; anything absent this frame
    /// (destroyed, killed, moved away) counts as having left.
    pub fn update<'a>(
        &mut self,
        frame: u32,
        bodies: impl IntoIterator<Item = (BodyHandle, &'a RigidBody)>,
    ) -> Vec<TriggerTransition> {
        let mut transitions = Vec::new();

        for (handle, body) in bodies {
            let touching = self
                .collider
                .is_touching(&self.transform, body.collider(), &body.transform)
                .is_some();
            if !touching {
                continue;
            }
            match self.occupants.iter_mut().find(|o| o.body == handle) {
                Some(occupant) => occupant.last_seen = frame,
                None => {
                    self.occupants.push(Occupant { body: handle, last_seen: frame });
                    transitions.push(TriggerTransition::Enter(handle));
                }
            }
        }

        self.occupants.retain(|o| {
            let stayed = o.last_seen == frame;
            if !stayed {
                transitions.push(TriggerTransition::Exit(o.body));
            }
            stayed
        });

        self.collider.set_collision(!self.occupants.is_empty());
        transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Arena;
    use crate::domain::material::Material;
    use crate::rigid_body::{BodyDesc, Vec2};

    fn ball_at(arena: &mut Arena<RigidBody>, x: f32) -> BodyHandle {
        let desc = BodyDesc::dynamic(Shape::circle(0.5).unwrap(), 1.0).at(x, 0.0);
        arena.insert(RigidBody::from_desc(desc, Material::default()).unwrap())
    }

    #[test]
    fn enter_stay_exit() {
        let mut arena = Arena::new();
        let ball = ball_at(&mut arena, -5.0);
        let mut trigger =
            Trigger::from_desc(TriggerDesc::new(Shape::aabb(1.0, 1.0).unwrap())).unwrap();

        assert!(trigger.update(1, arena.iter()).is_empty());

        arena.get_mut(ball).unwrap().transform.position = Vec2::zero();
        assert_eq!(trigger.update(2, arena.iter()), vec![TriggerTransition::Enter(ball)]);
        assert!(trigger.collider().in_collision());

        // Staying inside is silent.
        assert!(trigger.update(3, arena.iter()).is_empty());
        assert!(trigger.contains(ball));

        arena.get_mut(ball).unwrap().transform.position = Vec2::new(5.0, 0.0);
        assert_eq!(trigger.update(4, arena.iter()), vec![TriggerTransition::Exit(ball)]);
        assert!(!trigger.collider().in_collision());
        assert_eq!(trigger.occupant_count(), 0);
    }

    #[test]
    fn removed_body_counts_as_exit() {
        let mut arena = Arena::new();
        let a = ball_at(&mut arena, 0.0);
        let b = ball_at(&mut arena, 0.5);
        let mut trigger =
            Trigger::from_desc(TriggerDesc::new(Shape::circle(2.0).unwrap())).unwrap();

        let entered = trigger.update(1, arena.iter());
        assert_eq!(entered, vec![TriggerTransition::Enter(a), TriggerTransition::Enter(b)]);

        arena.remove(a);
        assert_eq!(trigger.update(2, arena.iter()), vec![TriggerTransition::Exit(a)]);
        assert!(trigger.contains(b));
    }
}
