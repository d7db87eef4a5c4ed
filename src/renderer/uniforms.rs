//! Global View-Projection Uniforms
//!
//! The lighting shader reconstructs world-space positions from the depth
//! buffer, so it needs the combined view-projection matrix and its inverse
//! in the clip convention of the GPU actually doing the rendering.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

use crate::camera::Camera;

/// Clip-space depth convention of the host GPU backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClipConvention {
    /// OpenGL: NDC depth in `[-1, 1]`.
    OpenGl,
    /// Vulkan / Metal / D3D / WebGPU: NDC depth in `[0, 1]`.
    #[default]
    ZeroToOne,
    /// `[0, 1]` with near mapped to 1 and far to 0.
    ReversedZ,
}

impl ClipConvention {
    /// Matrix remapping OpenGL clip space into this convention.
    #[must_use]
    pub fn remap_matrix(self) -> Mat4 {
        match self {
            Self::OpenGl => Mat4::IDENTITY,
            Self::ZeroToOne => Mat4::from_cols(
                Vec4::X,
                Vec4::Y,
                Vec4::new(0.0, 0.0, 0.5, 0.0),
                Vec4::new(0.0, 0.0, 0.5, 1.0),
            ),
            Self::ReversedZ => Mat4::from_cols(
                Vec4::X,
                Vec4::Y,
                Vec4::new(0.0, 0.0, -0.5, 0.0),
                Vec4::new(0.0, 0.0, 0.5, 1.0),
            ),
        }
    }
}

/// Converts an OpenGL-convention projection into the GPU's convention.
#[inline]
#[must_use]
pub fn gpu_projection(projection: Mat4, convention: ClipConvention) -> Mat4 {
    convention.remap_matrix() * projection
}

/// The `_vpMatrix` / `_vpMatrixInv` pair, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ViewProjection {
    pub vp_matrix: Mat4,
    pub vp_matrix_inv: Mat4,
}

impl ViewProjection {
    /// Computes the pair for `camera`. Never cached: a moving camera gets a
    /// fresh pair every frame.
    #[must_use]
    pub fn new(camera: &Camera, convention: ClipConvention) -> Self {
        Self::from_matrices(
            camera.projection_matrix(),
            camera.world_to_camera_matrix(),
            convention,
        )
    }

    #[must_use]
    pub fn from_matrices(projection: Mat4, world_to_camera: Mat4, convention: ClipConvention) -> Self {
        let vp_matrix = gpu_projection(projection, convention) * world_to_camera;
        Self {
            vp_matrix,
            vp_matrix_inv: vp_matrix.inverse(),
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
