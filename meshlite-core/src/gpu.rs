/// The seam between the scene and whatever draws it
///
/// A backend owns device-side buffers and textures and consumes uniforms by
/// name. Shaders written against this renderer rely on the exact names in
/// [`uniforms`].
use crate::geometry::Vertex;

/// Uniform names shared with the shader program
pub mod uniforms {
    pub const PROJECTION: &str = "projection";
    pub const VIEW: &str = "view";
    pub const MODEL: &str = "model";
    pub const VIEW_POS: &str = "viewPos";

    pub const LIGHT_POSITION: &str = "light.position";
    pub const LIGHT_AMBIENT: &str = "light.ambient";
    pub const LIGHT_DIFFUSE: &str = "light.diffuse";
    pub const LIGHT_SPECULAR: &str = "light.specular";

    pub const MATERIAL_AMBIENT: &str = "material.ambient";
    pub const MATERIAL_DIFFUSE: &str = "material.diffuse";
    pub const MATERIAL_SPECULAR: &str = "material.specular";
    pub const MATERIAL_SHININESS: &str = "material.shininess";
    pub const MATERIAL_TEXTURE: &str = "material.texture1";
}

/// A value uploaded to a named uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// 16 floats in `Matrix4` storage order
    Mat4([f32; 16]),
    Vec3([f32; 3]),
    Float(f32),
    /// Sampler unit or other integer uniform
    Int(i32),
}

/// Opaque handle to a texture living on the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// Handle for a texture that failed to load; samples as plain white
    pub const NONE: TextureHandle = TextureHandle(0);

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl Default for TextureHandle {
    fn default() -> Self {
        Self::NONE
    }
}

/// Decoded pixel data ready for upload
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    /// 3 for RGB, 4 for RGBA
    pub channels: u8,
    pub pixels: Vec<u8>,
}

/// GPU collaborator used by [`crate::Mesh`] and [`crate::Scene`]
pub trait GpuBackend {
    /// Vertex and index buffers for one mesh. Dropping the value releases them.
    type Buffers;

    fn create_buffers(&mut self, vertices: &[Vertex], indices: &[u32]) -> Self::Buffers;

    fn create_texture(&mut self, image: &TextureImage) -> TextureHandle;

    fn bind_texture(&mut self, unit: u32, texture: TextureHandle);

    fn set_uniform(&mut self, name: &str, value: UniformValue);

    /// Draw `index_count` indices from `buffers` as a triangle list
    fn draw_indexed(&mut self, buffers: &Self::Buffers, index_count: usize);
}
