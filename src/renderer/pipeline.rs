//! Deferred Pipeline Instance
//!
//! `DeferredPipeline` is what the host calls once per frame. It hands each
//! camera to the [`CameraRenderer`] in the order the host supplied them.
//!
//! # Execution Model
//! - Cameras are rendered one after another on the calling thread; command
//!   buffers are not thread-safe, so there is no parallel camera path.
//! - A skipped camera (no culling parameters) does not affect the others.
//! - A host fault aborts the frame and is returned to the caller.

use log::{debug, info};
use smallvec::SmallVec;

use crate::asset::PipelineAsset;
use crate::camera::Camera;
use crate::errors::Result;

use super::camera_renderer::{CameraOutcome, CameraRenderer};
use super::context::RenderContext;
use super::gbuffer::Extent;

/// Per-frame summary, one outcome per camera in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    outcomes: SmallVec<[CameraOutcome; 4]>,
}

impl FrameReport {
    #[inline]
    #[must_use]
    pub fn outcomes(&self) -> &[CameraOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn rendered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_rendered()).count()
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.rendered()
    }
}

#[derive(Debug)]
pub struct DeferredPipeline {
    asset: PipelineAsset,
    camera_renderer: CameraRenderer,
    frame_count: u64,
}

impl DeferredPipeline {
    pub(crate) fn new<C: RenderContext>(ctx: &mut C, asset: PipelineAsset, screen: Extent) -> Result<Self> {
        let camera_renderer = CameraRenderer::new(ctx, screen, asset.clone())?;
        Ok(Self {
            asset,
            camera_renderer,
            frame_count: 0,
        })
    }

    /// Host render callback: renders every camera, sequentially, in order.
    pub fn render<C: RenderContext>(&mut self, ctx: &mut C, cameras: &[Camera]) -> Result<FrameReport> {
        let mut report = FrameReport {
            outcomes: SmallVec::with_capacity(cameras.len()),
        };

        for camera in cameras {
            let outcome = self.camera_renderer.render(ctx, camera)?;
            report.outcomes.push(outcome);
        }

        self.frame_count += 1;
        Ok(report)
    }

    /// Screen-resolution change. Reallocates the G-buffer when the size differs.
    pub fn resize<C: RenderContext>(&mut self, ctx: &mut C, extent: Extent) -> Result<bool> {
        let resized = self.camera_renderer.resize(ctx, extent)?;
        if resized {
            debug!("Deferred pipeline resized to {}x{}", extent.width, extent.height);
        }
        Ok(resized)
    }

    /// Tears the pipeline down and returns its textures to the host.
    pub fn dispose<C: RenderContext>(self, ctx: &mut C) {
        info!("Disposing deferred pipeline after {} frames", self.frame_count);
        self.camera_renderer.release(ctx);
    }

    #[inline]
    #[must_use]
    pub fn asset(&self) -> &PipelineAsset {
        &self.asset
    }

    #[inline]
    #[must_use]
    pub fn camera_renderer(&self) -> &CameraRenderer {
        &self.camera_renderer
    }

    /// Number of completed `render` calls.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
