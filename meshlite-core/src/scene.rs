/// Scene composition: objects, the camera, the shared light and one frame's draw calls
use crate::camera::Camera;
use crate::geometry::{Light, Mesh};
use crate::gpu::{uniforms, GpuBackend, UniformValue};
use crate::projection::Projection;
use crate::transform::Transform;

/// A mesh placed in the world
pub struct SceneObject<B: GpuBackend> {
    pub mesh: Mesh<B>,
    pub transform: Transform,
}

/// Everything drawn in a frame.
///
/// The camera and light are mutated by the input step and only read while
/// drawing. Objects are drawn in insertion order.
pub struct Scene<B: GpuBackend> {
    pub camera: Camera,
    pub light: Light,
    pub projection: Projection,
    objects: Vec<SceneObject<B>>,
}

impl<B: GpuBackend> Scene<B> {
    pub fn new(camera: Camera, light: Light, projection: Projection) -> Self {
        Self {
            camera,
            light,
            projection,
            objects: Vec::new(),
        }
    }

    pub fn add(&mut self, mesh: Mesh<B>, transform: Transform) {
        self.objects.push(SceneObject { mesh, transform });
    }

    pub fn objects(&self) -> &[SceneObject<B>] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Issue the draw calls for one frame
    pub fn draw_frame(&self, backend: &mut B) {
        backend.set_uniform(uniforms::VIEW_POS, UniformValue::Vec3(self.camera.position.to_array()));

        let view = self.camera.view_matrix();
        let projection = self.projection.matrix();

        for object in &self.objects {
            let model = object.transform.matrix();
            object.mesh.draw(backend, &projection, &view, &model, &self.light);
        }
    }
}
