/// Model transforms: where each object sits in the world
use crate::matrix::Matrix4;
use crate::vector::Vector3;

/// Rotation about one axis, in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rotation {
    X(f32),
    Y(f32),
    Z(f32),
}

impl Rotation {
    pub fn matrix(&self) -> Matrix4 {
        match *self {
            Rotation::X(radians) => Matrix4::rotate_x(radians),
            Rotation::Y(radians) => Matrix4::rotate_y(radians),
            Rotation::Z(radians) => Matrix4::rotate_z(radians),
        }
    }
}

/// Scale, optional rotation and translation of one object.
///
/// The model matrix is built as the chain
/// `identity * scale * rotation * translate`, multiplying the running matrix
/// on the right at each step. The order is fixed; swapping steps moves the
/// object somewhere else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: Vector3,
    pub rotation: Option<Rotation>,
    pub translation: Vector3,
}

impl Transform {
    pub fn new() -> Self {
        Self {
            scale: Vector3::splat(1.0),
            rotation: None,
            translation: Vector3::zero(),
        }
    }

    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    pub fn with_uniform_scale(self, s: f32) -> Self {
        self.with_scale(s, s, s)
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_translation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translation = Vector3::new(x, y, z);
        self
    }

    /// Build the model matrix
    pub fn matrix(&self) -> Matrix4 {
        let mut model = Matrix4::identity();
        model = model * Matrix4::scale(self.scale.x, self.scale.y, self.scale.z);
        if let Some(rotation) = self.rotation {
            model = model * rotation.matrix();
        }
        model = model * Matrix4::translate(self.translation.x, self.translation.y, self.translation.z);
        model
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
