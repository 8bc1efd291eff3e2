/// Projection settings and clip-space to screen-space mapping
use crate::matrix::{degrees_to_radians, Matrix4};

/// Perspective frustum parameters shared by every object in a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov,
            aspect,
            near,
            far,
        }
    }

    pub fn matrix(&self) -> Matrix4 {
        Matrix4::perspective(self.fov, self.aspect, self.near, self.far)
    }
}

impl Default for Projection {
    /// 45 degree field of view on a 1920x1080 frame
    fn default() -> Self {
        Self::new(degrees_to_radians(45.0), 1920.0 / 1080.0, 0.1, 100.0)
    }
}

/// Map a clip-space position to screen coordinates.
///
/// Returns `(x, y, depth)` with `y` growing downward and `depth` the NDC z in
/// `[-1, 1]`. Points behind the eye (w <= 0) yield `None`; points outside
/// the screen are still returned so triangles crossing the border can be
/// rasterized partially.
pub fn clip_to_screen(clip: [f32; 4], width: u32, height: u32) -> Option<(f32, f32, f32)> {
    let w = clip[3];
    // Prevent division by near-zero or negative w
    if w <= 1e-6 {
        return None;
    }

    let ndc_x = clip[0] / w;
    let ndc_y = clip[1] / w;
    let ndc_z = clip[2] / w;

    let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
    let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

    Some((screen_x, screen_y, ndc_z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector3;

    #[test]
    fn test_default_projection() {
        let projection = Projection::default();
        assert!((projection.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert!((projection.fov - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn test_near_and_far_planes_map_to_ndc_bounds() {
        let m = Projection::default().matrix();
        let near = m.transform([0.0, 0.0, -0.1, 1.0]);
        let far = m.transform([0.0, 0.0, -100.0, 1.0]);
        assert!((near[2] / near[3] + 1.0).abs() < 1e-4);
        assert!((far[2] / far[3] - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_center_of_view_maps_to_screen_center() {
        let m = Projection::default().matrix();
        let clip = m.transform([0.0, 0.0, -3.0, 1.0]);
        let (x, y, depth) = clip_to_screen(clip, 80, 24).unwrap();
        assert!((x - 40.0).abs() < 1e-4);
        assert!((y - 12.0).abs() < 1e-4);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_up_is_toward_top_of_screen() {
        let m = Projection::default().matrix();
        let p = Vector3::new(0.0, 0.5, -3.0);
        let (_, y, _) = clip_to_screen(m.transform([p.x, p.y, p.z, 1.0]), 80, 24).unwrap();
        assert!(y < 12.0);
    }

    #[test]
    fn test_behind_eye_is_rejected() {
        let m = Projection::default().matrix();
        let clip = m.transform([0.0, 0.0, 2.0, 1.0]);
        assert!(clip_to_screen(clip, 80, 24).is_none());
    }
}
