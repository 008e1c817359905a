use serde::{Deserialize, Serialize};

/// Surface response used by impulse resolution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Coulomb friction coefficient (>= 0)
    pub friction: f32,
    /// Bounciness (0.0 = no bounce, 1.0 = full elastic)
    pub restitution: f32,
}

impl Material {
    pub fn new(friction: f32, restitution: f32) -> Self {
        Self { friction, restitution }.sanitized()
    }

    /// Clamp into the valid ranges; NaN becomes 0.
    pub fn sanitized(self) -> Self {
        let friction = if self.friction.is_finite() { self.friction.max(0.0) } else { 0.0 };
        let restitution = if self.restitution.is_nan() {
            0.0
        } else {
            self.restitution.clamp(0.0, 1.0)
        };
        Self { friction, restitution }
    }
}

impl Default for Material {
    fn default() -> Self {
        // Slight bounce like stone
        Self { friction: 0.5, restitution: 0.3 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_clamps_ranges() {
        let m = Material::new(-1.0, 2.0);
        assert_eq!(m, Material { friction: 0.0, restitution: 1.0 });
        let m = Material::new(f32::NAN, f32::NAN);
        assert_eq!(m, Material { friction: 0.0, restitution: 0.0 });
        // Friction above 1 is legal (rubber on concrete).
        assert_eq!(Material::new(1.5, 0.2).friction, 1.5);
    }
}
