//! Camera Renderer
//!
//! Runs the deferred stage sequence for one camera:
//!
//! ```text
//! Cull ─✗─► Skipped
//!  │
//!  ▼
//! Setup → Begin → GeometryPass → UniformUpload → LightingPass → SkyAndOverlay → End
//! ```
//!
//! The camera, the context and the culling results are passed through the
//! stage functions as arguments; the renderer itself only holds the G-buffer,
//! the configuration and a reusable command buffer that is empty between
//! calls.

use log::trace;

use crate::asset::PipelineAsset;
use crate::camera::Camera;
use crate::errors::{PipelineError, Result};

use super::bindings::{VP_MATRIX, VP_MATRIX_INV};
use super::command::CommandBuffer;
use super::context::{DrawingSettings, FilteringSettings, GizmoSubset, RenderContext, RenderQueueRange, ShaderTagId, SortingCriteria};
use super::gbuffer::{Extent, GBuffer};
use super::resources::Material;
use super::stage::CameraStage;
use super::uniforms::ViewProjection;

/// Result of rendering one camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraOutcome {
    /// Every stage ran and the context was submitted.
    Rendered,
    /// The camera had nothing to render this frame.
    Skipped { stage: CameraStage },
}

impl CameraOutcome {
    #[inline]
    #[must_use]
    pub fn is_rendered(self) -> bool {
        matches!(self, Self::Rendered)
    }
}

#[derive(Debug)]
pub struct CameraRenderer {
    gbuffer: GBuffer,
    settings: PipelineAsset,
    buffer: CommandBuffer,
}

impl CameraRenderer {
    pub fn new<C: RenderContext>(ctx: &mut C, screen: Extent, settings: PipelineAsset) -> Result<Self> {
        let gbuffer = GBuffer::allocate(ctx, screen)?;
        let buffer = CommandBuffer::new(settings.sample_name.clone());
        Ok(Self {
            gbuffer,
            settings,
            buffer,
        })
    }

    #[inline]
    #[must_use]
    pub fn gbuffer(&self) -> &GBuffer {
        &self.gbuffer
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &PipelineAsset {
        &self.settings
    }

    /// Reallocates the G-buffer for a new screen resolution.
    pub fn resize<C: RenderContext>(&mut self, ctx: &mut C, extent: Extent) -> Result<bool> {
        self.gbuffer.resize(ctx, extent)
    }

    /// Returns the G-buffer textures to the host.
    pub fn release<C: RenderContext>(self, ctx: &mut C) {
        self.gbuffer.release(ctx);
    }

    /// Renders `camera` through the full stage sequence.
    ///
    /// A camera without culling parameters is skipped before anything is
    /// recorded, executed or drawn. The lighting shader is resolved right
    /// after culling, so a missing shader also fails before any command
    /// buffer reaches the host.
    pub fn render<C: RenderContext>(&mut self, ctx: &mut C, camera: &Camera) -> Result<CameraOutcome> {
        trace!("[{}] {}", camera.name, CameraStage::Cull);
        let Some(parameters) = ctx.culling_parameters(camera) else {
            return Ok(CameraOutcome::Skipped {
                stage: CameraStage::Cull,
            });
        };
        let culling = ctx.cull(&parameters);
        let light_material = self.light_material(ctx)?;

        self.run_stages(ctx, camera, &culling, light_material);
        Ok(CameraOutcome::Rendered)
    }

    fn run_stages<C: RenderContext>(
        &mut self,
        ctx: &mut C,
        camera: &Camera,
        culling: &C::CullingResults,
        light_material: Material,
    ) {
        trace!("[{}] {}", camera.name, CameraStage::Setup);
        self.buffer
            .set_render_target(&self.gbuffer.color_handles(), self.gbuffer.depth.handle);

        self.begin(ctx, camera);
        self.draw_geometry_pass(ctx, camera, culling);
        self.set_global_uniforms(ctx, camera);
        self.draw_light_pass(ctx, camera, light_material);
        Self::draw_sky_and_overlays(ctx, camera);
        self.end(ctx, camera);
    }

    fn begin<C: RenderContext>(&mut self, ctx: &mut C, camera: &Camera) {
        trace!("[{}] {}", camera.name, CameraStage::Begin);
        ctx.setup_camera_properties(camera);
        self.buffer
            .clear_render_target(true, true, self.settings.clear_color());
        self.buffer.begin_sample(self.settings.sample_name.clone());
        self.execute_buffer(ctx);
    }

    fn draw_geometry_pass<C: RenderContext>(&self, ctx: &mut C, camera: &Camera, culling: &C::CullingResults) {
        trace!("[{}] {}", camera.name, CameraStage::GeometryPass);
        let drawing = DrawingSettings {
            shader_tag: ShaderTagId::new(self.settings.geometry_pass_tag.clone()),
            sorting: SortingCriteria::CommonOpaque,
        };
        let filtering = FilteringSettings {
            queue_range: RenderQueueRange::OPAQUE,
        };
        ctx.draw_renderers(culling, &drawing, &filtering);
    }

    fn set_global_uniforms<C: RenderContext>(&mut self, ctx: &mut C, camera: &Camera) {
        trace!("[{}] {}", camera.name, CameraStage::UniformUpload);
        for (name, texture) in self.gbuffer.global_bindings() {
            self.buffer.set_global_texture(name, texture);
        }

        let view_projection = ViewProjection::new(camera, ctx.clip_convention());
        self.buffer
            .set_global_matrix(VP_MATRIX, view_projection.vp_matrix);
        self.buffer
            .set_global_matrix(VP_MATRIX_INV, view_projection.vp_matrix_inv);

        // Globals must reach the host before the lighting buffer reads them.
        self.execute_buffer(ctx);
    }

    fn light_material<C: RenderContext>(&self, ctx: &C) -> Result<Material> {
        ctx.find_shader(&self.settings.lighting_shader)
            .map(Material::new)
            .ok_or_else(|| PipelineError::ShaderNotFound(self.settings.lighting_shader.to_string()))
    }

    // Buffer and material are built per call and not reused across frames.
    fn draw_light_pass<C: RenderContext>(&self, ctx: &mut C, camera: &Camera, material: Material) {
        trace!("[{}] {}", camera.name, CameraStage::LightingPass);
        let mut cmd = CommandBuffer::new(self.settings.lighting_buffer_name.clone());
        cmd.blit(self.gbuffer.albedo.handle, material);
        ctx.execute_command_buffer(&cmd);
    }

    fn draw_sky_and_overlays<C: RenderContext>(ctx: &mut C, camera: &Camera) {
        trace!("[{}] {}", camera.name, CameraStage::SkyAndOverlay);
        ctx.draw_skybox(camera);
        if ctx.should_render_gizmos() {
            ctx.draw_gizmos(camera, GizmoSubset::PreImageEffects);
            ctx.draw_gizmos(camera, GizmoSubset::PostImageEffects);
        }
    }

    fn end<C: RenderContext>(&mut self, ctx: &mut C, camera: &Camera) {
        trace!("[{}] {}", camera.name, CameraStage::End);
        self.buffer.end_sample(self.settings.sample_name.clone());
        self.execute_buffer(ctx);
        ctx.submit();
    }

    fn execute_buffer<C: RenderContext>(&mut self, ctx: &mut C) {
        ctx.execute_command_buffer(&self.buffer);
        self.buffer.clear();
    }
}
