//! Impulse resolution for one contact
//!
//! Normal impulse with combined restitution `e0 * e1`, then a tangential
//! (friction) impulse computed the same way along the normal's 90° rotation,
//! bounded by the normal impulse and scaled by `sqrt(|f0 * f1|)`.

use crate::collider::Manifold;
use crate::domain::material::Material;
use crate::rigid_body::{RigidBody, Vec2};

/// What the resolver may read from and do to a body.
///
/// Anything without a finite mass reports zero inverse mass and inertia and
/// ignores impulses.
pub trait ContactBody {
    fn position(&self) -> Vec2;
    fn velocity_at(&self, point: Vec2) -> Vec2;
    fn inverse_mass(&self) -> f32;
    fn inverse_inertia(&self) -> f32;
    fn material(&self) -> Material;
    fn apply_impulse_at(&mut self, impulse: Vec2, point: Vec2);
    fn move_by(&mut self, offset: Vec2);
}

impl ContactBody for RigidBody {
    fn position(&self) -> Vec2 {
        RigidBody::position(self)
    }

    fn velocity_at(&self, point: Vec2) -> Vec2 {
        RigidBody::velocity_at(self, point)
    }

    fn inverse_mass(&self) -> f32 {
        RigidBody::inverse_mass(self)
    }

    fn inverse_inertia(&self) -> f32 {
        RigidBody::inverse_inertia(self)
    }

    fn material(&self) -> Material {
        self.material
    }

    fn apply_impulse_at(&mut self, impulse: Vec2, point: Vec2) {
        RigidBody::apply_impulse_at(self, impulse, point)
    }

    fn move_by(&mut self, offset: Vec2) {
        RigidBody::move_by(self, offset)
    }
}

/// Magnitudes applied to the first body (the second got the negation).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppliedImpulse {
    pub normal: f32,
    pub tangent: f32,
}

/// Lever-arm terms of one body at the contact point.
struct Arm {
    perp: Vec2,
    inv_inertia: f32,
}

impl Arm {
    fn of(body: &impl ContactBody, point: Vec2) -> Self {
        Self {
            perp: (point - body.position()).rotated_90(),
            inv_inertia: body.inverse_inertia(),
        }
    }

    fn angular_term(&self, dir: Vec2) -> f32 {
        let d = self.perp.dot(dir);
        d * d * self.inv_inertia
    }
}

fn impulse_along(relative: Vec2, dir: Vec2, restitution: f32, inv_mass_sum: f32, a: &Arm, b: &Arm) -> f32 {
    let denom = inv_mass_sum + a.angular_term(dir) + b.angular_term(dir);
    if !(denom > 0.0) {
        return 0.0;
    }
    -(1.0 + restitution) * relative.dot(dir) / denom
}

/// Coulomb bound: the tangential impulse never exceeds the normal one.
pub fn friction_impulse(tangent: f32, normal: f32, friction: f32) -> f32 {
    let bound = normal.abs();
    let scaled = tangent.clamp(-bound, bound) * friction;
    if scaled.is_nan() {
        return 0.0;
    }
    scaled.clamp(-bound, bound)
}

/// Resolve velocities of `a` against `b` at the manifold contact.
///
/// `contact_shift` is the fraction of the penetration `a` was already moved
/// by positional correction (1 against static geometry, `m1/(m0+m1)` between
/// dynamic bodies); the contact point moves with it. Returns `None` when the
/// manifold has no direction or the bodies are already separating.
pub fn resolve_contact<A, B>(
    a: &mut A,
    b: &mut B,
    manifold: &Manifold,
    contact_shift: f32,
) -> Option<AppliedImpulse>
where
    A: ContactBody,
    B: ContactBody,
{
    if !manifold.has_direction() {
        return None;
    }
    let normal = manifold.normal;
    let point = manifold.contact + normal * (manifold.penetration * contact_shift);

    let (mat_a, mat_b) = (a.material(), b.material());
    let restitution = mat_a.restitution * mat_b.restitution;
    let friction = (mat_a.friction * mat_b.friction).abs().sqrt();

    let arm_a = Arm::of(a, point);
    let arm_b = Arm::of(b, point);
    let inv_mass_sum = a.inverse_mass() + b.inverse_mass();

    let relative = a.velocity_at(point) - b.velocity_at(point);
    let j = impulse_along(relative, normal, restitution, inv_mass_sum, &arm_a, &arm_b);
    if !(j > 0.0) {
        return None;
    }
    a.apply_impulse_at(normal * j, point);
    b.apply_impulse_at(-(normal * j), point);

    let tangent = normal.rotated_90();
    let relative = a.velocity_at(point) - b.velocity_at(point);
    let jt = impulse_along(relative, tangent, restitution, inv_mass_sum, &arm_a, &arm_b);
    let jt = friction_impulse(jt, j, friction);
    a.apply_impulse_at(tangent * jt, point);
    b.apply_impulse_at(-(tangent * jt), point);

    Some(AppliedImpulse { normal: j, tangent: jt })
}

/// Split positional correction between two dynamic bodies by mass.
///
/// Returns the share `a` moved, `m1 / (m0 + m1)`.
pub fn separate_pair(a: &mut RigidBody, b: &mut RigidBody, manifold: &Manifold) -> f32 {
    let (m0, m1) = (a.mass(), b.mass());
    let share_a = m1 / (m0 + m1);
    let offset = manifold.separation();
    a.move_by(offset * share_a);
    b.move_by(-offset * (1.0 - share_a));
    share_a
}
