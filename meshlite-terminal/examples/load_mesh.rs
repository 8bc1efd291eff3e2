/// Example: Load one mesh file and view it in the terminal
///
/// Usage: cargo run --example load_mesh -- path/to/model.obj

use anyhow::{Context, Result};
use crossterm::terminal;
use meshlite_core::{
    load_mesh, Camera, Material, Mesh, MeshData, Scene, TextureHandle, Transform, Vector3,
};
use meshlite_terminal::demo::demo_light;
use meshlite_terminal::{init_logging, AppConfig, LoggingConfig, SoftwareRenderer, TerminalApp};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let data = match std::env::args().nth(1) {
        Some(path) => {
            let data = load_mesh(&path).with_context(|| format!("loading {}", path))?;
            println!(
                "Loaded {} triangles ({} records skipped)",
                data.triangle_count(),
                data.skipped_records
            );
            data
        }
        None => {
            eprintln!("No mesh file provided, using the built-in triangle...");
            MeshData::triangle()
        }
    };

    let config = AppConfig::default();
    let (width, height) = terminal::size()?;
    let mut renderer = SoftwareRenderer::new(width as usize, height as usize);

    let light = demo_light();
    let material = Material {
        texture: TextureHandle::NONE,
        ambient: Vector3::splat(0.3),
        diffuse: Vector3::splat(0.7),
        specular: Vector3::splat(0.5),
        shininess: 32.0,
    };
    let mesh = Mesh::new(&mut renderer, data, material, light);

    let mut scene = Scene::new(Camera::default(), light, config.projection);
    scene.add(mesh, Transform::new().with_translation(0.0, 0.0, -3.0));

    TerminalApp::new(renderer, scene, &config).run()?;
    Ok(())
}
