/// Small fixed-size vectors used for geometry, colors and camera state
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 2D vector, mostly used for texture coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit-length copy of this vector.
    ///
    /// The vector must not be zero-length; a zero vector yields NaN components.
    pub fn normalize(&self) -> Self {
        *self / self.magnitude()
    }

    /// Clamp each component independently into `[min, max]`
    pub fn clamp(&self, min: f32, max: f32) -> Self {
        Self::new(self.x.max(min).min(max), self.y.max(min).min(max))
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).magnitude()
    }

    pub fn to_array(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Div<f32> for Vector2 {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }
}

/// A 3D vector for positions, directions, normals and RGB colors
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// All three components set to `value`, handy for grey colors
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn magnitude(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit-length copy of this vector.
    ///
    /// The vector must not be zero-length; a zero vector yields NaN components.
    pub fn normalize(&self) -> Self {
        *self / self.magnitude()
    }

    /// Clamp each component independently into `[min, max]`
    pub fn clamp(&self, min: f32, max: f32) -> Self {
        Self::new(
            self.x.max(min).min(max),
            self.y.max(min).min(max),
            self.z.max(min).min(max),
        )
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).magnitude()
    }

    /// Component-wise product, used when modulating colors
    pub fn mul_elem(&self, other: &Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// The three floats in x, y, z order, as a shader `vec3` expects them
    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Div<f32> for Vector3 {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_has_unit_length() {
        let samples = [
            Vector3::new(3.0, 4.0, 0.0),
            Vector3::new(-0.001, 0.002, 0.0005),
            Vector3::new(1250.0, -80.0, 3.5),
            Vector3::new(0.0, 0.0, -7.0),
        ];
        for v in samples {
            assert!((v.normalize().magnitude() - 1.0).abs() < 1e-5, "{:?}", v);
        }

        let flat = Vector2::new(-6.0, 8.0).normalize();
        assert!((flat.magnitude() - 1.0).abs() < 1e-5);
        assert!((flat.x + 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_is_nan() {
        let n = Vector3::zero().normalize();
        assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());
    }

    #[test]
    fn test_cross_follows_right_hand_rule() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(x.dot(&y), 0.0);
    }

    #[test]
    fn test_clamp_is_per_component() {
        let v = Vector3::new(-2.0, 0.5, 9.0).clamp(0.0, 1.0);
        assert_eq!(v, Vector3::new(0.0, 0.5, 1.0));

        let t = Vector2::new(1.5, -0.25).clamp(0.0, 1.0);
        assert_eq!(t, Vector2::new(1.0, 0.0));
    }

    #[test]
    fn test_distance() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 6.0, 3.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
        assert!((Vector2::new(0.0, 0.0).distance(&Vector2::new(0.0, 2.0)) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_operators() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(a + a, a * 2.0);
        assert_eq!((a * 2.0) / 2.0, a);
        assert_eq!(a - a, Vector3::zero());
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a.to_array(), [1.0, 2.0, 3.0]);
    }
}
