//! Fixed-size argument types of the RenderMan interface and glam conversions.
//!
//! RenderMan matrices are row-major with the translation in the last row.
//! glam stores `Mat4` column-major with the translation in the last column,
//! so the flattened element orders coincide: `Mat4::to_cols_array()` is
//! exactly the sixteen floats RIB expects.

pub use glam::{Mat4, Vec3};

/// RGB color triple.
pub type Color = [f32; 3];

/// 3D point triple.
pub type Point = [f32; 3];

/// 4x4 transformation matrix, `m[row][col]`.
pub type Matrix = [[f32; 4]; 4];

/// 4x4 spline basis matrix, `b[row][col]`.
pub type BasisMatrix = [[f32; 4]; 4];

/// Bounding box as `[xmin, xmax, ymin, ymax, zmin, zmax]`.
pub type Bound = [f32; 6];

/// Identity matrix.
pub const IDENTITY: Matrix = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Flatten a 4x4 matrix into row-major order.
#[inline]
pub fn flatten(m: &Matrix) -> [f32; 16] {
    let mut out = [0.0f32; 16];
    for (row, chunk) in m.iter().zip(out.chunks_exact_mut(4)) {
        chunk.copy_from_slice(row);
    }
    out
}

/// Convert a glam matrix into a RenderMan matrix.
#[inline]
pub fn matrix_from_mat4(m: &Mat4) -> Matrix {
    m.to_cols_array_2d()
}

/// Convert a glam vector into a point triple.
#[inline]
pub fn point_from_vec3(v: Vec3) -> Point {
    v.to_array()
}
