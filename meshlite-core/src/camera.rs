/// First-person camera driven by yaw/pitch angles
use crate::matrix::{degrees_to_radians, Matrix4};
use crate::vector::Vector3;

/// Pitch limit in degrees, keeps the view from flipping over the poles
pub const PITCH_LIMIT: f32 = 89.0;

/// Direction of a keyboard camera move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Camera with a position and an orientation basis derived from yaw and pitch.
///
/// `front`, `up` and `right` are recomputed after every rotation and always
/// form an orthonormal basis.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vector3,
    front: Vector3,
    up: Vector3,
    right: Vector3,
    world_up: Vector3,
    /// Degrees
    yaw: f32,
    /// Degrees, within `[-PITCH_LIMIT, PITCH_LIMIT]`
    pitch: f32,
    pub mouse_sensitivity: f32,
}

impl Camera {
    pub fn new(position: Vector3, world_up: Vector3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vector3::new(0.0, 0.0, -1.0),
            up: world_up,
            right: Vector3::new(1.0, 0.0, 0.0),
            world_up,
            yaw,
            pitch: pitch.max(-PITCH_LIMIT).min(PITCH_LIMIT),
            mouse_sensitivity: 0.1,
        };
        camera.update_vectors();
        camera
    }

    pub fn front(&self) -> Vector3 {
        self.front
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    pub fn right(&self) -> Vector3 {
        self.right
    }

    pub fn world_up(&self) -> Vector3 {
        self.world_up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Move along the camera basis; `distance` is usually speed times frame time
    pub fn translate(&mut self, direction: CameraMovement, distance: f32) {
        let offset = match direction {
            CameraMovement::Forward => self.front * distance,
            CameraMovement::Backward => -(self.front * distance),
            CameraMovement::Left => -(self.right * distance),
            CameraMovement::Right => self.right * distance,
            CameraMovement::Up => self.world_up * distance,
            CameraMovement::Down => -(self.world_up * distance),
        };
        self.position = self.position + offset;
    }

    /// Turn by raw mouse offsets, scaled by `mouse_sensitivity`
    pub fn rotate(&mut self, offset_x: f32, offset_y: f32) {
        self.yaw += offset_x * self.mouse_sensitivity;
        self.pitch = (self.pitch + offset_y * self.mouse_sensitivity)
            .max(-PITCH_LIMIT)
            .min(PITCH_LIMIT);
        self.update_vectors();
    }

    /// View matrix looking from `position` along `front`
    pub fn view_matrix(&self) -> Matrix4 {
        Matrix4::look_at(self.position, self.position + self.front, self.up)
    }

    fn update_vectors(&mut self) {
        let yaw = degrees_to_radians(self.yaw);
        let pitch = degrees_to_radians(self.pitch);
        let front = Vector3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());

        self.front = front.normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
    }
}

impl Default for Camera {
    /// At the origin, +Y up, looking down -Z
    fn default() -> Self {
        Self::new(Vector3::zero(), Vector3::new(0.0, 1.0, 0.0), -90.0, 0.0)
    }
}
