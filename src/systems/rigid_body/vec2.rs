use serde::{Deserialize, Serialize};

/// Lengths below this are treated as zero when normalizing.
pub const NORMALIZE_EPSILON: f32 = 1e-6;

/// 2D Vector for physics calculations
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn dot(&self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component of the 3D cross product).
    pub fn cross(&self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Counter-clockwise rotation by 90 degrees.
    pub fn rotated_90(&self) -> Self {
        Self { x: -self.y, y: self.x }
    }

    pub fn rotated_degrees(&self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Unit vector in the same direction, or zero for (near) zero vectors.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > NORMALIZE_EPSILON {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::zero()
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl std::ops::Mul<Vec2> for f32 {
    type Output = Vec2;
    fn mul(self, rhs: Vec2) -> Vec2 {
        rhs * self
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

/// Position plus rotation (degrees, counter-clockwise).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub position: Vec2,
    #[serde(default)]
    pub rotation: f32,
}

impl Transform2D {
    pub const fn new(position: Vec2, rotation: f32) -> Self {
        Self { position, rotation }
    }

    pub const fn at(x: f32, y: f32) -> Self {
        Self { position: Vec2::new(x, y), rotation: 0.0 }
    }

    /// Transform a local-space point to world space.
    #[inline]
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        self.position + local.rotated_degrees(self.rotation)
    }

    /// Rotate a local-space direction into world space.
    #[inline]
    pub fn rotate(&self, dir: Vec2) -> Vec2 {
        dir.rotated_degrees(self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotated_90_is_counter_clockwise() {
        assert_eq!(Vec2::new(1.0, 0.0).rotated_90(), Vec2::new(0.0, 1.0));
        assert_eq!(Vec2::new(0.0, 1.0).rotated_90(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn cross_matches_rotated_dot() {
        let r = Vec2::new(2.0, -3.0);
        let j = Vec2::new(0.5, 4.0);
        assert!((r.cross(j) - r.rotated_90().dot(j)).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_stays_zero() {
        assert!(Vec2::zero().normalize().is_zero());
        let n = Vec2::new(3.0, 4.0).normalize();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn transform_rotates_then_translates() {
        let t = Transform2D::new(Vec2::new(10.0, 0.0), 90.0);
        let p = t.local_to_world(Vec2::new(1.0, 0.0));
        assert!((p.x - 10.0).abs() < 1e-5);
        assert!((p.y - 1.0).abs() < 1e-5);
    }
}
