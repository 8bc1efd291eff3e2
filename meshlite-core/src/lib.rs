/// meshlite core library - geometry ingestion and scene transforms
///
/// This library provides the renderer-independent parts of meshlite:
/// vector and matrix algebra, the text mesh loader, the first-person camera,
/// model transforms, and per-frame scene composition over a pluggable
/// GPU backend.

pub mod camera;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod matrix;
pub mod obj;
pub mod projection;
pub mod scene;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use camera::{Camera, CameraMovement};
pub use controls::{ControlFlow, Controls, InputSource, Key, MouseButton, MouseLook};
pub use error::MeshLoadError;
pub use geometry::{Light, Material, Mesh, MeshData, Vertex};
pub use gpu::{GpuBackend, TextureHandle, TextureImage, UniformValue};
pub use matrix::{degrees_to_radians, Matrix4};
pub use obj::{load_mesh, parse_mesh};
pub use projection::{clip_to_screen, Projection};
pub use scene::{Scene, SceneObject};
pub use transform::{Rotation, Transform};
pub use vector::{Vector2, Vector3};
