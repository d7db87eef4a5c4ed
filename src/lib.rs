//! # toy-rp
//!
//! A minimal deferred-rendering camera pipeline for host engines that expose
//! a scriptable render-pipeline hook.
//!
//! The host implements [`RenderContext`]; the pipeline drives it through a
//! fixed sequence per camera: cull, clear, geometry pass into a four-target
//! G-buffer, global uniform upload, full-screen lighting pass, skybox and
//! gizmos, submit.
//!
//! ```rust,ignore
//! use toy_rp::{Camera, Extent, PipelineAsset};
//! use toy_rp::headless::{HeadlessContext, SceneObject};
//!
//! let mut host = HeadlessContext::new();
//! host.add_object(SceneObject::opaque("cube", glam::Vec3::new(0.0, 0.0, -5.0), 1.0));
//!
//! let mut pipeline = PipelineAsset::default().create_pipeline(&mut host, Extent::new(1280, 720))?;
//! let report = pipeline.render(&mut host, &[Camera::new_perspective(60.0, 16.0 / 9.0, 0.1, 100.0)])?;
//! assert_eq!(report.rendered(), 1);
//! ```

pub mod asset;
pub mod camera;
pub mod errors;
pub mod headless;
pub mod renderer;

pub use asset::PipelineAsset;
pub use camera::{Camera, CullingParameters, Frustum, ProjectionType};
pub use errors::{PipelineError, Result};
pub use renderer::{
    CameraOutcome, CameraRenderer, CameraStage, ClipConvention, Command, CommandBuffer, DeferredPipeline, Extent,
    FrameReport, GBuffer, GBufferSlot, RenderContext,
};
