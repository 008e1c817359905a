use crate::rigid_body::Vec2;

/// Contact geometry of one overlapping pair.
///
/// `normal` is the unit direction the *first* collider must move to separate
/// from the second, so `first.position += normal * penetration` resolves the
/// overlap. `contact` is the deepest point of the first collider inside the
/// second. A zero `normal` means the shapes touch without a usable direction
/// (coincident centres).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Manifold {
    pub normal: Vec2,
    pub penetration: f32,
    pub contact: Vec2,
}

impl Manifold {
    pub fn new(normal: Vec2, penetration: f32, contact: Vec2) -> Self {
        Self { normal, penetration: penetration.max(0.0), contact }
    }

    /// Touching, but no direction to resolve along.
    pub fn without_direction(penetration: f32, contact: Vec2) -> Self {
        Self::new(Vec2::zero(), penetration, contact)
    }

    pub fn has_direction(&self) -> bool {
        !self.normal.is_zero()
    }

    /// The same contact seen from the second collider.
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            penetration: self.penetration,
            contact: self.contact + self.normal * self.penetration,
        }
    }

    /// Offset that separates the first collider, or zero without a direction.
    pub fn separation(&self) -> Vec2 {
        if self.has_direction() {
            self.normal * self.penetration
        } else {
            Vec2::zero()
        }
    }
}
