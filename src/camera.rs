//! Camera & Culling Parameters
//!
//! The host hands every camera to the pipeline as a [`Camera`]: a projection
//! matrix in OpenGL clip convention (`z ∈ [-1, 1]`) plus a world-to-camera
//! view matrix. [`Camera::culling_parameters`] turns that into the
//! [`CullingParameters`] the host's culling primitive consumes, or `None` when
//! the camera has no renderable view.

use std::borrow::Cow;

use glam::{Affine3A, Mat4, Vec3, Vec4};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionType {
    Perspective,
    Orthographic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub name: Cow<'static, str>,
    /// Disabled cameras never produce culling parameters.
    pub enabled: bool,

    // === 投影属性 (Projection Only) ===
    pub projection_type: ProjectionType,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub ortho_size: f32,

    // 缓存的矩阵 renderer只读
    pub(crate) world_matrix: Affine3A,
    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
}

impl Camera {
    /// Creates a perspective camera. `fov` is given in degrees.
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            name: Cow::Borrowed("Camera"),
            enabled: true,
            projection_type: ProjectionType::Perspective,
            fov: fov.to_radians(),
            aspect,
            near,
            far,
            ortho_size: 10.0,

            world_matrix: Affine3A::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
        };

        cam.update_projection_matrix();
        cam
    }

    /// Creates an orthographic camera with the given half-height.
    #[must_use]
    pub fn new_orthographic(ortho_size: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self::new_perspective(60.0, aspect, near, far);
        cam.projection_type = ProjectionType::Orthographic;
        cam.ortho_size = ortho_size;
        cam.update_projection_matrix();
        cam
    }

    /// Wraps matrices supplied directly by the host.
    ///
    /// `projection` must follow the OpenGL clip convention; the pipeline
    /// converts it with [`gpu_projection`](crate::renderer::uniforms::gpu_projection)
    /// before upload.
    #[must_use]
    pub fn from_matrices(name: impl Into<Cow<'static, str>>, projection: Mat4, world_to_camera: Mat4) -> Self {
        let mut cam = Self::new_perspective(60.0, 1.0, 0.1, 1000.0);
        cam.name = name.into();
        cam.projection_matrix = projection;
        cam.view_matrix = world_to_camera;
        cam.world_matrix = Affine3A::from_mat4(world_to_camera.inverse());
        cam
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = match self.projection_type {
            ProjectionType::Perspective => {
                Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far)
            }
            ProjectionType::Orthographic => {
                let w = self.ortho_size * self.aspect;
                let h = self.ortho_size;
                Mat4::orthographic_rh_gl(-w, w, -h, h, self.near, self.far)
            }
        };
    }

    /// Places the camera in the world. The view matrix is the inverse of the
    /// world transform.
    pub fn update_view(&mut self, world_transform: &Affine3A) {
        self.world_matrix = *world_transform;
        self.view_matrix = Mat4::from(*world_transform).inverse();
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// World-to-camera (view) matrix.
    #[inline]
    #[must_use]
    pub fn world_to_camera_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.world_matrix.translation)
    }

    /// Computes the parameters the host needs to cull for this camera.
    ///
    /// Returns `None` when the camera is disabled or its view is not
    /// renderable: a non-finite view-projection, or one without a finite
    /// inverse (zero-area viewport, `near == far`, ...). Scale alone never
    /// disqualifies a camera.
    #[must_use]
    pub fn culling_parameters(&self) -> Option<CullingParameters> {
        if !self.enabled {
            return None;
        }

        let view_projection = self.projection_matrix * self.view_matrix;
        if !view_projection.is_finite() || !view_projection.inverse().is_finite() {
            return None;
        }

        let frustum = Frustum::from_matrix(view_projection)?;
        Some(CullingParameters {
            frustum,
            view_projection,
            camera_position: self.position(),
        })
    }
}

/// Inputs to the host's culling primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CullingParameters {
    pub frustum: Frustum,
    /// `projection × world_to_camera` in OpenGL clip convention.
    pub view_projection: Mat4,
    pub camera_position: Vec3,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frustum {
    planes: [Vec4; 6], // Left, Right, Bottom, Top, Near, Far
}

impl Frustum {
    /// Extracts the six clip planes from an OpenGL-convention view-projection
    /// matrix (Gribb-Hartmann). Returns `None` if any plane is degenerate,
    /// i.e. its normal vanishes relative to the rows it was built from.
    #[must_use]
    pub fn from_matrix(m: Mat4) -> Option<Self> {
        let rows = [m.row(0), m.row(1), m.row(2), m.row(3)];

        let mut planes = [
            rows[3] + rows[0], // Left
            rows[3] - rows[0], // Right
            rows[3] + rows[1], // Bottom
            rows[3] - rows[1], // Top
            rows[3] + rows[2], // Near (z >= -w)
            rows[3] - rows[2], // Far
        ];
        let sources = [0, 0, 1, 1, 2, 2];

        for (plane, row) in planes.iter_mut().zip(sources) {
            let length = plane.truncate().length();
            let scale = rows[3].truncate().length() + rows[row].truncate().length();
            if !length.is_finite() || length <= f32::EPSILON * scale {
                return None;
            }
            *plane /= length;
        }

        Some(Self { planes })
    }

    #[inline]
    #[must_use]
    pub fn planes(&self) -> &[Vec4; 6] {
        &self.planes
    }

    // 简单的球体相交检测
    #[must_use]
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.truncate().dot(center) + plane.w >= -radius)
    }
}
