/// Geometry primitives and GPU-resident meshes
use crate::gpu::{uniforms, GpuBackend, TextureHandle, UniformValue};
use crate::matrix::Matrix4;
use crate::vector::{Vector2, Vector3};

/// A vertex with position, normal and texture coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: Vector3,
    pub normal: Vector3,
    pub texture: Vector2,
}

impl Vertex {
    pub fn new(position: Vector3, normal: Vector3, texture: Vector2) -> Self {
        Self {
            position,
            normal,
            texture,
        }
    }
}

/// Surface response to light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub texture: TextureHandle,
    pub ambient: Vector3,
    pub diffuse: Vector3,
    pub specular: Vector3,
    pub shininess: f32,
}

/// A point light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vector3,
    pub ambient: Vector3,
    pub diffuse: Vector3,
    pub specular: Vector3,
}

/// CPU-side triangle list: every three indices form one triangle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Records the loader reported and skipped while producing this data
    pub skipped_records: usize,
}

impl MeshData {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices,
            skipped_records: 0,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate the triangles as vertex triples, resolving indices
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(move |tri| {
            let a = self.vertices.get(tri[0] as usize)?;
            let b = self.vertices.get(tri[1] as usize)?;
            let c = self.vertices.get(tri[2] as usize)?;
            Some([*a, *b, *c])
        })
    }

    /// A single upright triangle facing +Z, one unit wide
    pub fn triangle() -> Self {
        let normal = Vector3::new(0.0, 0.0, 1.0);
        Self::new(
            vec![
                Vertex::new(Vector3::new(-0.5, -0.5, 0.0), normal, Vector2::new(0.0, 0.0)),
                Vertex::new(Vector3::new(0.5, -0.5, 0.0), normal, Vector2::new(1.0, 0.0)),
                Vertex::new(Vector3::new(0.0, 0.5, 0.0), normal, Vector2::new(0.5, 1.0)),
            ],
            vec![0, 1, 2],
        )
    }
}

/// A mesh uploaded to a backend.
///
/// The backend buffers are created in [`Mesh::new`] and released when the
/// mesh is dropped.
pub struct Mesh<B: GpuBackend> {
    data: MeshData,
    material: Material,
    light: Light,
    buffers: B::Buffers,
}

impl<B: GpuBackend> Mesh<B> {
    pub fn new(backend: &mut B, data: MeshData, material: Material, light: Light) -> Self {
        let buffers = backend.create_buffers(&data.vertices, &data.indices);
        Self {
            data,
            material,
            light,
            buffers,
        }
    }

    pub fn data(&self) -> &MeshData {
        &self.data
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// The light this mesh was built under
    pub fn light(&self) -> &Light {
        &self.light
    }

    /// Upload this mesh's uniforms and draw it with the given transforms and light
    pub fn draw(
        &self,
        backend: &mut B,
        projection: &Matrix4,
        view: &Matrix4,
        model: &Matrix4,
        light: &Light,
    ) {
        backend.set_uniform(uniforms::LIGHT_POSITION, UniformValue::Vec3(light.position.to_array()));
        backend.set_uniform(uniforms::LIGHT_AMBIENT, UniformValue::Vec3(light.ambient.to_array()));
        backend.set_uniform(uniforms::LIGHT_DIFFUSE, UniformValue::Vec3(light.diffuse.to_array()));
        backend.set_uniform(uniforms::LIGHT_SPECULAR, UniformValue::Vec3(light.specular.to_array()));

        backend.bind_texture(0, self.material.texture);
        backend.set_uniform(uniforms::MATERIAL_TEXTURE, UniformValue::Int(0));

        backend.set_uniform(uniforms::PROJECTION, UniformValue::Mat4(*projection.as_slice()));
        backend.set_uniform(uniforms::VIEW, UniformValue::Mat4(*view.as_slice()));
        backend.set_uniform(uniforms::MODEL, UniformValue::Mat4(*model.as_slice()));

        let material = &self.material;
        backend.set_uniform(uniforms::MATERIAL_AMBIENT, UniformValue::Vec3(material.ambient.to_array()));
        backend.set_uniform(uniforms::MATERIAL_DIFFUSE, UniformValue::Vec3(material.diffuse.to_array()));
        backend.set_uniform(uniforms::MATERIAL_SPECULAR, UniformValue::Vec3(material.specular.to_array()));
        backend.set_uniform(uniforms::MATERIAL_SHININESS, UniformValue::Float(material.shininess));

        backend.draw_indexed(&self.buffers, self.data.indices.len());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::gpu::TextureImage;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Records every backend call; buffers decrement a shared counter on drop
    #[derive(Default)]
    pub(crate) struct RecordingBackend {
        pub uniforms: Vec<(String, UniformValue)>,
        pub bound: Vec<(u32, TextureHandle)>,
        pub draws: Vec<(u32, usize)>,
        pub live: Rc<Cell<usize>>,
        next_id: u32,
    }

    pub(crate) struct RecordedBuffers {
        id: u32,
        live: Rc<Cell<usize>>,
    }

    impl Drop for RecordedBuffers {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    impl RecordingBackend {
        pub fn uniform(&self, name: &str) -> Option<UniformValue> {
            self.uniforms
                .iter()
                .rev()
                .find(|(n, _)| n == name)
                .map(|(_, v)| *v)
        }
    }

    impl GpuBackend for RecordingBackend {
        type Buffers = RecordedBuffers;

        fn create_buffers(&mut self, _vertices: &[Vertex], _indices: &[u32]) -> RecordedBuffers {
            self.next_id += 1;
            self.live.set(self.live.get() + 1);
            RecordedBuffers {
                id: self.next_id,
                live: Rc::clone(&self.live),
            }
        }

        fn create_texture(&mut self, _image: &TextureImage) -> TextureHandle {
            TextureHandle(7)
        }

        fn bind_texture(&mut self, unit: u32, texture: TextureHandle) {
            self.bound.push((unit, texture));
        }

        fn set_uniform(&mut self, name: &str, value: UniformValue) {
            self.uniforms.push((name.to_string(), value));
        }

        fn draw_indexed(&mut self, buffers: &RecordedBuffers, index_count: usize) {
            self.draws.push((buffers.id, index_count));
        }
    }

    pub(crate) fn grey_material() -> Material {
        Material {
            texture: TextureHandle(3),
            ambient: Vector3::splat(0.5),
            diffuse: Vector3::splat(0.4),
            specular: Vector3::splat(1.0),
            shininess: 32.0,
        }
    }

    pub(crate) fn white_light() -> Light {
        Light {
            position: Vector3::new(-4.0, 3.0, 0.0),
            ambient: Vector3::splat(0.5),
            diffuse: Vector3::splat(0.7),
            specular: Vector3::splat(1.0),
        }
    }

    #[test]
    fn test_triangles_iterate_in_index_order() {
        let data = MeshData::triangle();
        assert_eq!(data.triangle_count(), 1);
        let tris: Vec<_> = data.triangles().collect();
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0][2].texture, Vector2::new(0.5, 1.0));
    }

    #[test]
    fn test_draw_uploads_named_uniforms() {
        let mut backend = RecordingBackend::default();
        let mesh = Mesh::new(&mut backend, MeshData::triangle(), grey_material(), white_light());

        let model = Matrix4::translate(1.0, 2.0, 3.0);
        let mut moved = white_light();
        moved.position = Vector3::new(9.0, 9.0, 9.0);
        mesh.draw(&mut backend, &Matrix4::identity(), &Matrix4::identity(), &model, &moved);

        let expected = [
            uniforms::PROJECTION,
            uniforms::VIEW,
            uniforms::MODEL,
            uniforms::LIGHT_POSITION,
            uniforms::LIGHT_AMBIENT,
            uniforms::LIGHT_DIFFUSE,
            uniforms::LIGHT_SPECULAR,
            uniforms::MATERIAL_AMBIENT,
            uniforms::MATERIAL_DIFFUSE,
            uniforms::MATERIAL_SPECULAR,
            uniforms::MATERIAL_SHININESS,
            uniforms::MATERIAL_TEXTURE,
        ];
        for name in expected {
            assert!(backend.uniform(name).is_some(), "missing uniform {}", name);
        }

        assert_eq!(backend.uniform("model"), Some(UniformValue::Mat4(*model.as_slice())));
        assert_eq!(backend.uniform("light.position"), Some(UniformValue::Vec3([9.0, 9.0, 9.0])));
        assert_eq!(backend.uniform("material.shininess"), Some(UniformValue::Float(32.0)));
        assert_eq!(backend.uniform("material.texture1"), Some(UniformValue::Int(0)));
        assert_eq!(backend.bound, vec![(0, TextureHandle(3))]);
        assert_eq!(backend.draws, vec![(1, 3)]);

        // The construction-time light is untouched
        assert_eq!(mesh.light().position, Vector3::new(-4.0, 3.0, 0.0));
    }

    #[test]
    fn test_buffers_released_on_drop() {
        let mut backend = RecordingBackend::default();
        let live = Rc::clone(&backend.live);
        {
            let _a = Mesh::new(&mut backend, MeshData::triangle(), grey_material(), white_light());
            let _b = Mesh::new(&mut backend, MeshData::triangle(), grey_material(), white_light());
            assert_eq!(live.get(), 2);
        }
        assert_eq!(live.get(), 0);
    }
}
