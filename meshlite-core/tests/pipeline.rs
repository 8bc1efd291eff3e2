//! Load a mesh file from disk, place it in a scene and check the draw calls
//! a backend receives.

use std::cell::Cell;
use std::rc::Rc;

use meshlite_core::gpu::uniforms;
use meshlite_core::{
    load_mesh, Camera, GpuBackend, Light, Material, Mesh, MeshData, Projection, Rotation, Scene,
    TextureHandle, TextureImage, Transform, UniformValue, Vector3, Vertex,
};

/// Logs draw calls as (vertex count, index count, texture bound at draw time)
#[derive(Default)]
struct CountingBackend {
    live: Rc<Cell<usize>>,
    bound: TextureHandle,
    textures: u32,
    models: Vec<[f32; 16]>,
    light_positions: Vec<[f32; 3]>,
    draws: Vec<(usize, usize, TextureHandle)>,
}

struct CountedBuffers {
    vertices: usize,
    live: Rc<Cell<usize>>,
}

impl Drop for CountedBuffers {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

impl GpuBackend for CountingBackend {
    type Buffers = CountedBuffers;

    fn create_buffers(&mut self, vertices: &[Vertex], _indices: &[u32]) -> CountedBuffers {
        self.live.set(self.live.get() + 1);
        CountedBuffers {
            vertices: vertices.len(),
            live: Rc::clone(&self.live),
        }
    }

    fn create_texture(&mut self, _image: &TextureImage) -> TextureHandle {
        self.textures += 1;
        TextureHandle(self.textures)
    }

    fn bind_texture(&mut self, _unit: u32, texture: TextureHandle) {
        self.bound = texture;
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        match (name, value) {
            (uniforms::MODEL, UniformValue::Mat4(m)) => self.models.push(m),
            (uniforms::LIGHT_POSITION, UniformValue::Vec3(v)) => self.light_positions.push(v),
            _ => {}
        }
    }

    fn draw_indexed(&mut self, buffers: &CountedBuffers, index_count: usize) {
        self.draws.push((buffers.vertices, index_count, self.bound));
    }
}

const BOX_SIDE: &str = "\
# one quad and a broken face
v -1 -1 0
v 1 -1 0
v 1 1 0
v -1 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
f 1/1/1 2/2/1
";

fn material(texture: TextureHandle) -> Material {
    Material {
        texture,
        ambient: Vector3::splat(0.5),
        diffuse: Vector3::splat(0.4),
        specular: Vector3::splat(1.0),
        shininess: 32.0,
    }
}

fn light() -> Light {
    Light {
        position: Vector3::new(-4.0, 3.0, 0.0),
        ambient: Vector3::splat(0.5),
        diffuse: Vector3::splat(0.7),
        specular: Vector3::splat(1.0),
    }
}

fn write_temp_mesh(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("meshlite-pipeline-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_loaded_mesh_flows_through_scene() {
    let path = write_temp_mesh("side.obj", BOX_SIDE);
    let data = load_mesh(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(data.vertices.len(), 6);
    assert_eq!(data.indices, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(data.skipped_records, 1);

    let mut backend = CountingBackend::default();
    let texture = backend.create_texture(&TextureImage {
        width: 1,
        height: 1,
        channels: 3,
        pixels: vec![255, 255, 255],
    });

    let mut scene = Scene::new(Camera::default(), light(), Projection::default());
    let side = Mesh::new(&mut backend, data, material(texture), light());
    let triangle = Mesh::new(&mut backend, MeshData::triangle(), material(TextureHandle::NONE), light());

    let side_transform = Transform::new()
        .with_uniform_scale(0.5)
        .with_rotation(Rotation::Z(45.0))
        .with_translation(-1.0, 0.0, -3.0);
    scene.add(side, side_transform);
    scene.add(triangle, Transform::new().with_translation(0.0, 1.0, -3.0));
    assert_eq!(backend.live.get(), 2);

    // The light moves between frames; both meshes see the new position
    scene.draw_frame(&mut backend);
    scene.light.position = Vector3::new(0.0, 0.0, 0.0);
    scene.draw_frame(&mut backend);

    assert_eq!(
        backend.draws,
        vec![
            (6, 6, texture),
            (3, 3, TextureHandle::NONE),
            (6, 6, texture),
            (3, 3, TextureHandle::NONE),
        ]
    );
    assert_eq!(backend.models[0], *side_transform.matrix().as_slice());
    assert_eq!(backend.light_positions[1], [-4.0, 3.0, 0.0]);
    assert_eq!(backend.light_positions[2], [0.0, 0.0, 0.0]);

    drop(scene);
    assert_eq!(backend.live.get(), 0);
}

#[test]
fn test_missing_file_reports_path() {
    let err = load_mesh("does/not/exist.obj").unwrap_err();
    assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    assert!(err.to_string().contains("does/not/exist.obj"));
}
