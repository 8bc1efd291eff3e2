/// Software rasterizer that draws into a grid of terminal cells
use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::cell::Cell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use meshlite_core::gpu::uniforms;
use meshlite_core::{
    clip_to_screen, GpuBackend, Matrix4, TextureHandle, TextureImage, UniformValue, Vector2,
    Vector3, Vertex,
};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// One character cell of the frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    pub character: char,
    pub color: [u8; 3],
}

impl Pixel {
    const EMPTY: Pixel = Pixel {
        character: ' ',
        color: [0, 0, 0],
    };
}

/// Vertex and index data owned by one mesh. Dropping it releases the slot.
pub struct SoftwareBuffers {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    live: Rc<Cell<usize>>,
}

impl Drop for SoftwareBuffers {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
        log::trace!("released buffers for {} vertices", self.vertices.len());
    }
}

/// A vertex after the vertex stage
#[derive(Debug, Clone, Copy)]
struct Shaded {
    screen: (f32, f32, f32),
    /// 1 / clip w, for perspective-correct interpolation
    inv_w: f32,
    color: Vector3,
    uv: Vector2,
}

/// CPU implementation of the GPU backend.
///
/// Uniforms are stored by name and read back while drawing, the way a shader
/// program would see them.
pub struct SoftwareRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    frame: Vec<Pixel>,
    uniforms: HashMap<String, UniformValue>,
    textures: Vec<Rc<TextureImage>>,
    bound_texture: TextureHandle,
    live_buffers: Rc<Cell<usize>>,
}

impl SoftwareRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            frame: vec![Pixel::EMPTY; size],
            uniforms: HashMap::new(),
            textures: Vec::new(),
            bound_texture: TextureHandle::NONE,
            live_buffers: Rc::new(Cell::new(0)),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of mesh buffers currently alive
    pub fn live_buffers(&self) -> usize {
        self.live_buffers.get()
    }

    /// Viewport resize; the next frame starts blank
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.depth_buffer = vec![f32::INFINITY; width * height];
        self.frame = vec![Pixel::EMPTY; width * height];
        log::debug!("viewport resized to {}x{}", width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.frame.fill(Pixel::EMPTY);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.frame[y * self.width + x])
    }

    /// Queue the frame to a terminal writer, one row at a time
    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let pixel = self.frame[y * self.width + x];
                let [r, g, b] = pixel.color;
                writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                writer.queue(Print(pixel.character))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    fn mat4(&self, name: &str) -> Matrix4 {
        match self.uniforms.get(name) {
            Some(UniformValue::Mat4(m)) => Matrix4::from_array(*m),
            _ => Matrix4::identity(),
        }
    }

    fn vec3(&self, name: &str) -> Vector3 {
        match self.uniforms.get(name) {
            Some(UniformValue::Vec3(v)) => Vector3::from(*v),
            _ => Vector3::zero(),
        }
    }

    fn float(&self, name: &str) -> f32 {
        match self.uniforms.get(name) {
            Some(UniformValue::Float(f)) => *f,
            _ => 0.0,
        }
    }

    fn texture(&self, handle: TextureHandle) -> Option<Rc<TextureImage>> {
        if handle.is_none() {
            return None;
        }
        self.textures.get(handle.0 as usize - 1).cloned()
    }

    /// Vertex stage: transform to screen space and light the vertex
    fn shade_vertex(&self, vertex: &Vertex, face_normal: Vector3, stage: &Stage) -> Option<Shaded> {
        let world = stage.model.transform_point(vertex.position);
        let eye = stage.view.transform([world.x, world.y, world.z, 1.0]);
        let clip = stage.projection.transform(eye);
        let screen = clip_to_screen(clip, self.width as u32, self.height as u32)?;
        let inv_w = 1.0 / clip[3];

        let normal = stage.model.transform_direction(vertex.normal);
        let normal = if normal.magnitude() > 1e-6 {
            normal.normalize()
        } else {
            face_normal
        };

        Some(Shaded {
            screen,
            inv_w,
            color: stage.phong(world, normal),
            uv: vertex.texture,
        })
    }

    fn rasterize(&mut self, corners: [Shaded; 3], texture: Option<&TextureImage>) {
        let points = corners.map(|c| (c.screen.0, c.screen.1));
        let Some((x_range, y_range)) = covered_cells(points, self.width, self.height) else {
            return;
        };
        let inv_w = corners.map(|c| c.inv_w);

        for y in y_range {
            for x in x_range.clone() {
                let center = (x as f32 + 0.5, y as f32 + 0.5);
                let Some(weights) = barycentric(points, center) else {
                    return;
                };
                if weights.iter().any(|&w| w < 0.0) {
                    continue;
                }

                // NDC depth is affine in screen space; attributes are not
                let depth: f32 = (0..3).map(|i| weights[i] * corners[i].screen.2).sum();
                if !(-1.0..=1.0).contains(&depth) {
                    continue;
                }

                let idx = y * self.width + x;
                if depth >= self.depth_buffer[idx] {
                    continue;
                }

                let [w0, w1, w2] = perspective_correct(weights, inv_w);
                let [v0, v1, v2] = corners;
                let lit = v0.color * w0 + v1.color * w1 + v2.color * w2;
                let uv = v0.uv * w0 + v1.uv * w1 + v2.uv * w2;
                let texel = texture.map(|t| sample(t, uv)).unwrap_or(Vector3::splat(1.0));
                let color = lit.mul_elem(&texel).clamp(0.0, 1.0);

                self.depth_buffer[idx] = depth;
                self.frame[idx] = Pixel {
                    character: ramp(color),
                    color: [
                        (color.x * 255.0) as u8,
                        (color.y * 255.0) as u8,
                        (color.z * 255.0) as u8,
                    ],
                };
            }
        }
    }
}

/// Uniform values read once per draw call
struct Stage {
    projection: Matrix4,
    view: Matrix4,
    model: Matrix4,
    view_pos: Vector3,
    light_position: Vector3,
    light_ambient: Vector3,
    light_diffuse: Vector3,
    light_specular: Vector3,
    material_ambient: Vector3,
    material_diffuse: Vector3,
    material_specular: Vector3,
    shininess: f32,
}

impl Stage {
    fn read(renderer: &SoftwareRenderer) -> Self {
        Self {
            projection: renderer.mat4(uniforms::PROJECTION),
            view: renderer.mat4(uniforms::VIEW),
            model: renderer.mat4(uniforms::MODEL),
            view_pos: renderer.vec3(uniforms::VIEW_POS),
            light_position: renderer.vec3(uniforms::LIGHT_POSITION),
            light_ambient: renderer.vec3(uniforms::LIGHT_AMBIENT),
            light_diffuse: renderer.vec3(uniforms::LIGHT_DIFFUSE),
            light_specular: renderer.vec3(uniforms::LIGHT_SPECULAR),
            material_ambient: renderer.vec3(uniforms::MATERIAL_AMBIENT),
            material_diffuse: renderer.vec3(uniforms::MATERIAL_DIFFUSE),
            material_specular: renderer.vec3(uniforms::MATERIAL_SPECULAR),
            shininess: renderer.float(uniforms::MATERIAL_SHININESS),
        }
    }

    /// Phong lighting at a world-space point with a unit normal
    fn phong(&self, world: Vector3, normal: Vector3) -> Vector3 {
        let ambient = self.light_ambient.mul_elem(&self.material_ambient);

        let to_light = self.light_position - world;
        if to_light.magnitude() < 1e-6 {
            return ambient;
        }
        let l = to_light.normalize();
        let diff = normal.dot(&l).max(0.0);
        let diffuse = self.light_diffuse.mul_elem(&(self.material_diffuse * diff));

        let to_eye = self.view_pos - world;
        let specular = if diff > 0.0 && to_eye.magnitude() > 1e-6 {
            let v = to_eye.normalize();
            let r = normal * (2.0 * normal.dot(&l)) - l;
            let spec = v.dot(&r).max(0.0).powf(self.shininess);
            self.light_specular.mul_elem(&(self.material_specular * spec))
        } else {
            Vector3::zero()
        };

        ambient + diffuse + specular
    }
}

impl GpuBackend for SoftwareRenderer {
    type Buffers = SoftwareBuffers;

    fn create_buffers(&mut self, vertices: &[Vertex], indices: &[u32]) -> SoftwareBuffers {
        self.live_buffers.set(self.live_buffers.get() + 1);
        SoftwareBuffers {
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
            live: Rc::clone(&self.live_buffers),
        }
    }

    fn create_texture(&mut self, image: &TextureImage) -> TextureHandle {
        self.textures.push(Rc::new(image.clone()));
        TextureHandle(self.textures.len() as u32)
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureHandle) {
        if unit != 0 {
            log::warn!("only texture unit 0 is supported, ignoring unit {}", unit);
            return;
        }
        self.bound_texture = texture;
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.uniforms.insert(name.to_string(), value);
    }

    fn draw_indexed(&mut self, buffers: &SoftwareBuffers, index_count: usize) {
        let stage = Stage::read(self);
        let count = index_count.min(buffers.indices.len());

        let mut triangles = Vec::with_capacity(count / 3);
        for tri in buffers.indices[..count].chunks_exact(3) {
            let corners = [tri[0], tri[1], tri[2]].map(|i| buffers.vertices.get(i as usize));
            let [Some(a), Some(b), Some(c)] = corners else {
                log::warn!("index out of range in draw call, skipping triangle");
                continue;
            };

            let face_normal = face_normal(&stage.model, [a, b, c]);
            let shaded = [a, b, c].map(|v| self.shade_vertex(v, face_normal, &stage));
            // Triangles crossing behind the eye are dropped; there is no clipper
            if let [Some(s0), Some(s1), Some(s2)] = shaded {
                triangles.push([s0, s1, s2]);
            }
        }

        let texture = self.texture(self.bound_texture);
        for corners in triangles {
            self.rasterize(corners, texture.as_deref());
        }
    }
}

/// World-space face normal, used when a vertex carries no normal
fn face_normal(model: &Matrix4, corners: [&Vertex; 3]) -> Vector3 {
    let [p0, p1, p2] = corners.map(|v| model.transform_point(v.position));
    let n = (p1 - p0).cross(&(p2 - p0));
    if n.magnitude() > 1e-12 {
        n.normalize()
    } else {
        Vector3::zero()
    }
}

/// Map a color's brightness onto the character ramp
fn ramp(color: Vector3) -> char {
    let luminance = 0.2126 * color.x + 0.7152 * color.y + 0.0722 * color.z;
    let char_index = (luminance * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    // Covered cells never render as blank
    LUMINOSITY_RAMP[char_index.clamp(1, LUMINOSITY_RAMP.len() - 1)]
}

/// Nearest-texel lookup with repeat wrapping. Row 0 of the image is v = 0.
pub fn sample(texture: &TextureImage, uv: Vector2) -> Vector3 {
    if texture.width == 0 || texture.height == 0 {
        return Vector3::splat(1.0);
    }
    let u = uv.x - uv.x.floor();
    let v = uv.y - uv.y.floor();
    let x = ((u * texture.width as f32) as u32).min(texture.width - 1);
    let y = ((v * texture.height as f32) as u32).min(texture.height - 1);

    let channels = texture.channels as usize;
    let offset = (y as usize * texture.width as usize + x as usize) * channels;
    match texture.pixels.get(offset..offset + 3) {
        Some(rgb) => Vector3::new(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32) / 255.0,
        None => Vector3::splat(1.0),
    }
}

/// Cell columns and rows touched by a triangle's screen bounds, clipped to the grid
fn covered_cells(
    points: [(f32, f32); 3],
    width: usize,
    height: usize,
) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
    let span = |coords: [f32; 3], limit: usize| {
        let lo = coords.iter().copied().fold(f32::INFINITY, f32::min).floor().max(0.0);
        let hi = coords.iter().copied().fold(f32::NEG_INFINITY, f32::max).ceil().min(limit as f32);
        (lo < hi).then(|| lo as usize..hi as usize)
    };
    let xs = span(points.map(|p| p.0), width)?;
    let ys = span(points.map(|p| p.1), height)?;
    Some((xs, ys))
}

/// Barycentric weights of `p` from signed edge areas; `None` for a degenerate triangle
fn barycentric(points: [(f32, f32); 3], p: (f32, f32)) -> Option<[f32; 3]> {
    let edge = |a: (f32, f32), b: (f32, f32), c: (f32, f32)| {
        (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
    };
    let [a, b, c] = points;
    let area = edge(a, b, c);
    if area.abs() < 1e-6 {
        return None;
    }
    Some([edge(b, c, p) / area, edge(c, a, p) / area, edge(a, b, p) / area])
}

/// Reweight screen-space barycentrics by each corner's 1/w
fn perspective_correct(weights: [f32; 3], inv_w: [f32; 3]) -> [f32; 3] {
    let scaled = [0, 1, 2].map(|i| weights[i] * inv_w[i]);
    let total: f32 = scaled.iter().sum();
    if total.abs() < 1e-12 {
        return weights;
    }
    scaled.map(|w| w / total)
}
