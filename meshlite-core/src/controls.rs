/// Per-frame input handling: keys move either the camera or the light
use crate::camera::{Camera, CameraMovement};
use crate::gpu::GpuBackend;
use crate::scene::Scene;
use crate::vector::Vector3;

/// Keys the controls react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    Tab,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Held-state queries supplied by the windowing layer
pub trait InputSource {
    fn is_key_down(&self, key: Key) -> bool;
    fn is_mouse_button_down(&self, button: MouseButton) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Exit,
}

const BINDINGS: [(Key, CameraMovement); 6] = [
    (Key::W, CameraMovement::Forward),
    (Key::S, CameraMovement::Backward),
    (Key::A, CameraMovement::Left),
    (Key::D, CameraMovement::Right),
    (Key::Q, CameraMovement::Down),
    (Key::E, CameraMovement::Up),
];

/// World-space direction the light travels for a movement key
fn light_direction(movement: CameraMovement) -> Vector3 {
    match movement {
        CameraMovement::Forward => Vector3::new(0.0, 0.0, 1.0),
        CameraMovement::Backward => Vector3::new(0.0, 0.0, -1.0),
        CameraMovement::Left => Vector3::new(-1.0, 0.0, 0.0),
        CameraMovement::Right => Vector3::new(1.0, 0.0, 0.0),
        CameraMovement::Up => Vector3::new(0.0, 1.0, 0.0),
        CameraMovement::Down => Vector3::new(0.0, -1.0, 0.0),
    }
}

/// Turns absolute cursor positions into look offsets.
///
/// The first position after activation only sets the baseline. Screen y
/// grows downward, so the vertical offset is reversed.
#[derive(Debug, Clone, Default)]
pub struct MouseLook {
    last: Option<(f32, f32)>,
}

impl MouseLook {
    pub fn offset(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let previous = self.last.replace((x, y));
        previous.map(|(last_x, last_y)| (x - last_x, last_y - y))
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Routes held keys to the camera (while looking) or to the light
#[derive(Debug, Clone)]
pub struct Controls {
    /// Light travel in world units per second
    pub light_speed: f32,
    /// Camera travel in world units per second
    pub camera_speed: f32,
    camera_lock: bool,
    toggle_was_down: bool,
    mouse_look: MouseLook,
}

impl Controls {
    pub fn new(camera_speed: f32, light_speed: f32) -> Self {
        Self {
            light_speed,
            camera_speed,
            camera_lock: false,
            toggle_was_down: false,
            mouse_look: MouseLook::default(),
        }
    }

    /// Camera mode is active while the right button is held or the lock is on
    pub fn camera_mode(&self, input: &impl InputSource) -> bool {
        self.camera_lock || input.is_mouse_button_down(MouseButton::Right)
    }

    pub fn camera_locked(&self) -> bool {
        self.camera_lock
    }

    /// The input step of a frame. Runs before the scene is drawn.
    pub fn apply<B: GpuBackend>(
        &mut self,
        input: &impl InputSource,
        scene: &mut Scene<B>,
        dt: f32,
    ) -> ControlFlow {
        if input.is_key_down(Key::Escape) {
            return ControlFlow::Exit;
        }

        let toggle_down = input.is_key_down(Key::Tab);
        if toggle_down && !self.toggle_was_down {
            self.camera_lock = !self.camera_lock;
            log::debug!("camera lock {}", if self.camera_lock { "on" } else { "off" });
        }
        self.toggle_was_down = toggle_down;

        let camera_mode = self.camera_mode(input);
        if !camera_mode {
            self.mouse_look.reset();
        }

        for (key, movement) in BINDINGS {
            if !input.is_key_down(key) {
                continue;
            }
            if camera_mode {
                scene.camera.translate(movement, self.camera_speed * dt);
            } else {
                let offset = light_direction(movement) * (self.light_speed * dt);
                scene.light.position = scene.light.position + offset;
            }
        }

        ControlFlow::Continue
    }

    /// Cursor callback: rotates the camera only in camera mode
    pub fn cursor_moved(&mut self, input: &impl InputSource, x: f32, y: f32, camera: &mut Camera) {
        if !self.camera_mode(input) {
            self.mouse_look.reset();
            return;
        }
        if let Some((dx, dy)) = self.mouse_look.offset(x, y) {
            camera.rotate(dx, dy);
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(1.0, 100.0)
    }
}
