use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::collider::{Collider, Shape};
use crate::domain::errors::BodyError;
use crate::domain::material::Material;

use super::vec2::{Transform2D, Vec2};

/// How the stepper treats a body. Fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationType {
    /// Never moves; infinite mass in impulse math.
    Static,
    /// Integrated every step and resolved against everything.
    Dynamic,
    /// Registered but never simulated.
    Unknown,
}

impl SimulationType {
    pub const ALL: [SimulationType; 3] =
        [SimulationType::Static, SimulationType::Dynamic, SimulationType::Unknown];

    #[inline]
    pub fn bucket_index(self) -> usize {
        match self {
            SimulationType::Static => 0,
            SimulationType::Dynamic => 1,
            SimulationType::Unknown => 2,
        }
    }
}

/// Transform owned by the host object that a body mirrors each step.
///
/// Cloning shares the same cell: the host keeps one clone, the body another.
#[derive(Clone, Debug, Default)]
pub struct ObjectTransform(Rc<Cell<Transform2D>>);

impl ObjectTransform {
    pub fn new(transform: Transform2D) -> Self {
        Self(Rc::new(Cell::new(transform)))
    }

    pub fn get(&self) -> Transform2D {
        self.0.get()
    }

    pub fn set(&self, transform: Transform2D) {
        self.0.set(transform);
    }

    pub fn set_position(&self, position: Vec2) {
        let mut t = self.0.get();
        t.position = position;
        self.0.set(t);
    }

    pub fn ptr_eq(&self, other: &ObjectTransform) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

fn default_mass() -> f32 {
    1.0
}

/// Everything needed to create a body; also the scene-file body record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    pub simulation_type: SimulationType,
    #[serde(default)]
    pub transform: Transform2D,
    pub shape: Shape,
    #[serde(default = "default_mass")]
    pub mass: f32,
    /// Derived from the shape when absent.
    #[serde(default)]
    pub moment_of_inertia: Option<f32>,
    /// World default material when absent.
    #[serde(default)]
    pub material: Option<Material>,
    #[serde(default)]
    pub velocity: Vec2,
    /// Degrees per second
    #[serde(default)]
    pub angular_velocity: f32,
    #[serde(default)]
    pub on_collision: Option<String>,
}

impl BodyDesc {
    pub fn new(simulation_type: SimulationType, shape: Shape) -> Self {
        Self {
            simulation_type,
            transform: Transform2D::default(),
            shape,
            mass: default_mass(),
            moment_of_inertia: None,
            material: None,
            velocity: Vec2::zero(),
            angular_velocity: 0.0,
            on_collision: None,
        }
    }

    pub fn dynamic(shape: Shape, mass: f32) -> Self {
        Self { mass, ..Self::new(SimulationType::Dynamic, shape) }
    }

    pub fn fixed(shape: Shape) -> Self {
        Self::new(SimulationType::Static, shape)
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.transform.position = Vec2::new(x, y);
        self
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.transform.rotation = degrees;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, degrees_per_second: f32) -> Self {
        self.angular_velocity = degrees_per_second;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_inertia(mut self, moment_of_inertia: f32) -> Self {
        self.moment_of_inertia = Some(moment_of_inertia);
        self
    }

    pub fn with_event(mut self, name: impl Into<String>) -> Self {
        self.on_collision = Some(name.into());
        self
    }
}

/// Rigid Body - moves as a single unit
#[derive(Debug)]
pub struct RigidBody {
    // === Identity ===
    simulation_type: SimulationType,
    alive: bool,

    // === Physics State ===
    /// Working copy of the object transform for the current step
    pub transform: Transform2D,
    /// Velocity (units per second)
    pub velocity: Vec2,
    /// Angular velocity (degrees per second)
    pub angular_velocity: f32,
    /// Surface response
    pub material: Material,
    mass: f32,
    moment_of_inertia: f32,
    force: Vec2,
    torque: f32,

    // === Shape ===
    collider: Collider,

    /// Canonical transform, owned by the host object
    object: ObjectTransform,
}

impl RigidBody {
    /// Validate a descriptor and build the body.
    ///
    /// Dynamic bodies must end up with finite, positive mass and inertia:
    /// impulse math divides by both.
    pub fn from_desc(desc: BodyDesc, default_material: Material) -> Result<Self, BodyError> {
        desc.shape.validate()?;

        let dynamic = desc.simulation_type == SimulationType::Dynamic;
        if dynamic && !(desc.mass.is_finite() && desc.mass > 0.0) {
            return Err(BodyError::DegenerateMass(desc.mass));
        }

        let moment_of_inertia = match desc.moment_of_inertia {
            Some(inertia) => inertia,
            None => match desc.shape.moment_of_inertia(desc.mass) {
                Some(inertia) => inertia,
                None if dynamic => return Err(BodyError::NoInertiaForShape(desc.shape.kind())),
                None => 0.0,
            },
        };
        if dynamic && !(moment_of_inertia.is_finite() && moment_of_inertia > 0.0) {
            return Err(BodyError::DegenerateInertia(moment_of_inertia));
        }

        let mut collider = Collider::new(desc.shape);
        collider.set_event_name(desc.on_collision);

        Ok(Self {
            simulation_type: desc.simulation_type,
            alive: true,
            transform: desc.transform,
            velocity: desc.velocity,
            angular_velocity: desc.angular_velocity,
            material: desc.material.unwrap_or(default_material).sanitized(),
            mass: desc.mass,
            moment_of_inertia,
            force: Vec2::zero(),
            torque: 0.0,
            collider,
            object: ObjectTransform::new(desc.transform),
        })
    }

    #[inline]
    pub fn simulation_type(&self) -> SimulationType {
        self.simulation_type
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.simulation_type == SimulationType::Dynamic
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark for removal at the next purge.
    pub fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Zero for anything that is not dynamic (infinite mass).
    pub fn inverse_mass(&self) -> f32 {
        if self.is_dynamic() { 1.0 / self.mass } else { 0.0 }
    }

    pub fn moment_of_inertia(&self) -> f32 {
        self.moment_of_inertia
    }

    pub fn inverse_inertia(&self) -> f32 {
        if self.is_dynamic() { 1.0 / self.moment_of_inertia } else { 0.0 }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    pub fn collider_mut(&mut self) -> &mut Collider {
        &mut self.collider
    }

    /// Handle on the host-side transform this body mirrors.
    pub fn object_transform(&self) -> &ObjectTransform {
        &self.object
    }

    /// Mirror a different host transform from now on.
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

    /// Velocity of the material point at `point` (world space).
    pub fn velocity_at(&self, point: Vec2) -> Vec2 {
        let perp = (point - self.position()).rotated_90();
        self.velocity + perp * self.angular_velocity.to_radians()
    }

    /// Semi-implicit Euler step under gravity and accumulated force/torque.
    ///
    /// Only dynamic bodies move. Accumulators are cleared afterwards.
    pub fn integrate(&mut self, dt: f32, gravity: Vec2) {
        if !self.is_dynamic() {
            return;
        }
        let accel = gravity + self.force * self.inverse_mass();
        self.velocity += accel * dt;
        self.angular_velocity += (self.torque * self.inverse_inertia()).to_degrees() * dt;

        self.transform.position += self.velocity * dt;
        self.transform.rotation += self.angular_velocity * dt;

        self.force = Vec2::zero();
        self.torque = 0.0;
    }

    /// Direct positional nudge; velocity is untouched.
    pub fn move_by(&mut self, offset: Vec2) {
        self.transform.position += offset;
    }

    /// Apply an impulse at a world-space point, coupling linear and angular response.
    pub fn apply_impulse_at(&mut self, impulse: Vec2, point: Vec2) {
        if !self.is_dynamic() {
            return;
        }
        let r = point - self.position();
        self.velocity += impulse * self.inverse_mass();
        self.angular_velocity += (r.cross(impulse) * self.inverse_inertia()).to_degrees();
    }

    /// Accumulate a force for the next integration
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Accumulate a torque (rotational force) for the next integration
    pub fn apply_torque(&mut self, torque: f32) {
        self.torque += torque;
    }
}
