/// 4x4 matrices for model, view and projection transforms
///
/// Storage is a flat array of 16 floats where element `(i, j)` lives at
/// `data[i * 4 + j]`. The GPU reads the same 16 floats column-major, so
/// storage row `i` is column `i` of the matrix a shader sees.
use std::ops::{Index, IndexMut, Mul};

use crate::vector::Vector3;

/// Convert an angle in degrees to radians
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    data: [f32; 16],
}

impl Matrix4 {
    pub const fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Build a matrix from its 16 elements, row by row in storage order
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        x00: f32, x01: f32, x02: f32, x03: f32,
        x10: f32, x11: f32, x12: f32, x13: f32,
        x20: f32, x21: f32, x22: f32, x23: f32,
        x30: f32, x31: f32, x32: f32, x33: f32,
    ) -> Self {
        Self {
            data: [
                x00, x01, x02, x03, //
                x10, x11, x12, x13, //
                x20, x21, x22, x23, //
                x30, x31, x32, x33,
            ],
        }
    }

    pub const fn from_array(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Read-only view of the 16 floats in storage order, ready for upload
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }

    pub fn transpose(&self) -> Self {
        let mut result = Self::identity();
        for i in 0..4 {
            for j in 0..4 {
                result[(i, j)] = self[(j, i)];
            }
        }
        result
    }

    /// Translation by `(x, y, z)`
    pub fn translate(x: f32, y: f32, z: f32) -> Self {
        Self::new(
            1.0, 0.0, 0.0, x,
            0.0, 1.0, 0.0, y,
            0.0, 0.0, 1.0, z,
            0.0, 0.0, 0.0, 1.0,
        )
        .transpose()
    }

    /// Axis-aligned scale. Diagonal, so no transpose is needed.
    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self::new(
            x, 0.0, 0.0, 0.0,
            0.0, y, 0.0, 0.0,
            0.0, 0.0, z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotate_x(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c, -s, 0.0,
            0.0, s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
        .transpose()
    }

    pub fn rotate_y(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(
            c, 0.0, s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            -s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
        .transpose()
    }

    pub fn rotate_z(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(
            c, -s, 0.0, 0.0,
            s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
        .transpose()
    }

    /// Symmetric-frustum perspective projection.
    ///
    /// `fov` is the vertical field of view in radians. View space looks down -Z.
    pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let t = (fov / 2.0).tan();
        Self::new(
            1.0 / (aspect * t), 0.0, 0.0, 0.0,
            0.0, 1.0 / t, 0.0, 0.0,
            0.0, 0.0, (far + near) / (near - far), 2.0 * far * near / (near - far),
            0.0, 0.0, -1.0, 0.0,
        )
        .transpose()
    }

    /// Right-handed view matrix looking from `eye` toward `center`.
    ///
    /// Built directly in storage layout: the basis vectors occupy the first
    /// three storage columns and the translation the last storage row.
    pub fn look_at(eye: Vector3, center: Vector3, up: Vector3) -> Self {
        let f = (center - eye).normalize();
        let r = f.cross(&up).normalize();
        let u = r.cross(&f);

        Self::new(
            r.x, u.x, -f.x, 0.0,
            r.y, u.y, -f.y, 0.0,
            r.z, u.z, -f.z, 0.0,
            -r.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0,
        )
    }

    /// Apply the matrix to a homogeneous vector the way a shader computes `M * v`
    pub fn transform(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (r, slot) in out.iter_mut().enumerate() {
            *slot = (0..4).map(|c| self[(c, r)] * v[c]).sum();
        }
        out
    }

    /// Transform a position (w = 1), ignoring the resulting w
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        let [x, y, z, _] = self.transform([p.x, p.y, p.z, 1.0]);
        Vector3::new(x, y, z)
    }

    /// Transform a direction (w = 0), so translation does not apply
    pub fn transform_direction(&self, d: Vector3) -> Vector3 {
        let [x, y, z, _] = self.transform([d.x, d.y, d.z, 0.0]);
        Vector3::new(x, y, z)
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Index<(usize, usize)> for Matrix4 {
    type Output = f32;

    fn index(&self, (i, j): (usize, usize)) -> &f32 {
        &self.data[i * 4 + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix4 {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f32 {
        &mut self.data[i * 4 + j]
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let mut result = Self::from_array([0.0; 16]);
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    result[(i, j)] += self[(i, k)] * other[(k, j)];
                }
            }
        }
        result
    }
}
