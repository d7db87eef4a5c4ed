//! Host Render Context
//!
//! [`RenderContext`] is the seam between the pipeline and the host engine.
//! Every primitive the pipeline relies on but does not implement (culling,
//! renderer drawing, command execution, skybox and gizmo drawing, submission,
//! render-texture allocation, shader lookup) is a method here.
//!
//! # Call Contract
//!
//! The pipeline calls into the context from a single thread, one camera at a
//! time. Commands recorded in a [`CommandBuffer`] take effect only when the
//! buffer is executed; direct calls (`draw_renderers`, `draw_skybox`, ...) are
//! issued immediately, in call order.

use std::borrow::Cow;

use crate::camera::{Camera, CullingParameters};

use super::command::CommandBuffer;
use super::gbuffer::RenderTextureDesc;
use super::resources::{ShaderHandle, TextureHandle};
use super::uniforms::ClipConvention;

/// Pass tag selecting which shader pass of a material is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderTagId(pub Cow<'static, str>);

impl ShaderTagId {
    #[must_use]
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Draw ordering requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortingCriteria {
    /// Host-defined order (usually submission order).
    #[default]
    None,
    /// Render queue, then front-to-back / material batching.
    CommonOpaque,
}

/// Inclusive range of render-queue values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderQueueRange {
    pub lower_bound: i32,
    pub upper_bound: i32,
}

impl RenderQueueRange {
    pub const OPAQUE: Self = Self {
        lower_bound: 0,
        upper_bound: 2500,
    };

    #[inline]
    #[must_use]
    pub fn contains(&self, queue: i32) -> bool {
        (self.lower_bound..=self.upper_bound).contains(&queue)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingSettings {
    pub shader_tag: ShaderTagId,
    pub sorting: SortingCriteria,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilteringSettings {
    pub queue_range: RenderQueueRange,
}

/// Editor gizmo layers, drawn in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GizmoSubset {
    PreImageEffects,
    PostImageEffects,
}

/// Host primitives used by the pipeline.
pub trait RenderContext {
    /// Host-defined visibility results produced by [`cull`](Self::cull).
    type CullingResults;

    /// Culling parameters for `camera`, or `None` when the camera has no
    /// renderable view this frame.
    fn culling_parameters(&self, camera: &Camera) -> Option<CullingParameters> {
        camera.culling_parameters()
    }

    fn cull(&mut self, parameters: &CullingParameters) -> Self::CullingResults;

    /// Pushes the camera's transform and projection properties to the GPU state.
    fn setup_camera_properties(&mut self, camera: &Camera);

    /// Schedules every command recorded in `buffer`. The buffer is not retained.
    fn execute_command_buffer(&mut self, buffer: &CommandBuffer);

    fn draw_renderers(
        &mut self,
        culling: &Self::CullingResults,
        drawing: &DrawingSettings,
        filtering: &FilteringSettings,
    );

    fn draw_skybox(&mut self, camera: &Camera);

    /// Whether the editor currently wants gizmos drawn.
    fn should_render_gizmos(&self) -> bool {
        false
    }

    fn draw_gizmos(&mut self, camera: &Camera, subset: GizmoSubset);

    /// Hands everything issued so far to the GPU queue.
    fn submit(&mut self);

    fn find_shader(&self, name: &str) -> Option<ShaderHandle>;

    fn create_render_texture(&mut self, desc: &RenderTextureDesc) -> TextureHandle;

    fn release_render_texture(&mut self, texture: TextureHandle);

    fn clip_convention(&self) -> ClipConvention {
        ClipConvention::default()
    }
}
