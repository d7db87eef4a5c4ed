//! 延迟渲染管线
//!
//! 提供：
//! - DeferredPipeline: 每帧相机调度
//! - CameraRenderer: 单相机阶段序列
//! - GBuffer: 几何缓冲布局与生命周期
//! - CommandBuffer: 延迟命令录制
//! - RenderContext: 宿主引擎接口

pub mod bindings;
pub mod camera_renderer;
pub mod command;
pub mod context;
pub mod gbuffer;
pub mod pipeline;
pub mod resources;
pub mod stage;
pub mod uniforms;

pub use camera_renderer::{CameraOutcome, CameraRenderer};
pub use command::{Command, CommandBuffer};
pub use context::{
    DrawingSettings, FilteringSettings, GizmoSubset, RenderContext, RenderQueueRange, ShaderTagId,
    SortingCriteria,
};
pub use gbuffer::{Extent, GBuffer, GBufferLayout, GBufferSlot, RenderTexture, RenderTextureDesc};
pub use pipeline::{DeferredPipeline, FrameReport};
pub use resources::{Material, ShaderHandle, TextureHandle};
pub use stage::CameraStage;
pub use uniforms::{ClipConvention, ViewProjection, gpu_projection};
