/// The demo scene: a triangle, a box, a sphere and a cylinder under one light
use anyhow::{Context, Result};
use meshlite_core::{
    load_mesh, Camera, GpuBackend, Light, Material, Mesh, MeshData, Rotation, Scene, TextureHandle,
    Transform, Vector3,
};

use crate::config::AppConfig;
use crate::texture::load_texture;

pub const TEXTURES: [&str; 4] = [
    "textures/Scratches-Textures.jpg",
    "textures/Triangles-Textures.png",
    "textures/Color-Textures.jpg",
    "textures/Vibrant-Swirl-Textures-1.jpg",
];

pub const MESHES: [&str; 3] = ["assets/box.obj", "assets/sphere.obj", "assets/cylinder.obj"];

fn red(texture: TextureHandle) -> Material {
    Material {
        texture,
        ambient: Vector3::splat(0.1),
        diffuse: Vector3::new(0.8, 0.0, 0.0),
        specular: Vector3::splat(1.0),
        shininess: 32.0,
    }
}

fn grey(texture: TextureHandle) -> Material {
    Material {
        texture,
        ambient: Vector3::splat(0.5),
        diffuse: Vector3::splat(0.4),
        specular: Vector3::splat(1.0),
        shininess: 32.0,
    }
}

pub fn demo_light() -> Light {
    Light {
        position: Vector3::new(-4.0, 3.0, 0.0),
        ambient: Vector3::splat(0.5),
        diffuse: Vector3::splat(0.7),
        specular: Vector3::splat(1.0),
    }
}

fn load_asset(config: &AppConfig, relative: &str) -> Result<MeshData> {
    let path = config.asset(relative);
    load_mesh(&path).with_context(|| format!("loading mesh asset {}", relative))
}

/// Build the demo scene. A missing mesh is fatal; a missing texture is not.
pub fn build_demo_scene<B: GpuBackend>(backend: &mut B, config: &AppConfig) -> Result<Scene<B>> {
    let [scratches, triangles, colors, swirl] =
        TEXTURES.map(|relative| load_texture(backend, config.asset(relative)));

    let [box_data, sphere_data, cylinder_data] = [
        load_asset(config, MESHES[0])?,
        load_asset(config, MESHES[1])?,
        load_asset(config, MESHES[2])?,
    ];

    let light = demo_light();
    let mut camera = Camera::default();
    camera.mouse_sensitivity = config.mouse_sensitivity;
    let mut scene = Scene::new(camera, light, config.projection);

    let triangle = Mesh::new(backend, MeshData::triangle(), red(scratches), light);
    scene.add(
        triangle,
        Transform::new().with_uniform_scale(0.5).with_translation(0.0, 1.0, -3.0),
    );

    let cube = Mesh::new(backend, box_data, grey(swirl), light);
    scene.add(
        cube,
        Transform::new()
            .with_uniform_scale(0.5)
            .with_rotation(Rotation::Z(45.0))
            .with_translation(-1.0, 0.0, -3.0),
    );

    let sphere = Mesh::new(backend, sphere_data, red(triangles), light);
    scene.add(
        sphere,
        Transform::new().with_uniform_scale(0.5).with_translation(0.0, 0.0, -3.0),
    );

    let cylinder = Mesh::new(backend, cylinder_data, grey(colors), light);
    scene.add(
        cylinder,
        Transform::new()
            .with_uniform_scale(0.5)
            .with_rotation(Rotation::X(45.0))
            .with_translation(1.0, 0.0, -3.0),
    );

    log::info!("demo scene ready with {} objects", scene.len());
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::SoftwareRenderer;
    use std::path::{Path, PathBuf};

    fn workspace_assets() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("..")
    }

    #[test]
    fn test_builds_with_bundled_assets() {
        let config = AppConfig {
            asset_dir: workspace_assets(),
            ..AppConfig::default()
        };
        let mut renderer = SoftwareRenderer::new(80, 24);
        let scene = build_demo_scene(&mut renderer, &config).unwrap();

        assert_eq!(scene.len(), 4);
        assert_eq!(renderer.live_buffers(), 4);
        assert_eq!(scene.light.position, Vector3::new(-4.0, 3.0, 0.0));
        // Textures are not bundled; every material falls back to untextured
        assert!(scene.objects().iter().all(|o| o.mesh.material().texture.is_none()));

        drop(scene);
        assert_eq!(renderer.live_buffers(), 0);
    }

    #[test]
    fn test_missing_mesh_is_fatal() {
        let config = AppConfig {
            asset_dir: PathBuf::from("no/such/dir"),
            ..AppConfig::default()
        };
        let mut renderer = SoftwareRenderer::new(8, 8);
        let err = build_demo_scene(&mut renderer, &config).err().unwrap();
        assert!(format!("{:#}", err).contains("assets/box.obj"));
        assert_eq!(renderer.live_buffers(), 0);
    }
}
