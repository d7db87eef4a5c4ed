//! Shader Binding Names
//!
//! Global names shared between the pipeline and the shaders that consume its
//! output. Any geometry or lighting shader must bind exactly these names.

/// Depth buffer of the G-buffer set.
pub const GDEPTH: &str = "_gdepth";

/// G-buffer colour targets, indexed by [`GBufferSlot::index`](super::gbuffer::GBufferSlot::index).
pub const GBUFFER_TEXTURES: [&str; 4] = ["_GT0", "_GT1", "_GT2", "_GT3"];

/// GPU view-projection matrix.
pub const VP_MATRIX: &str = "_vpMatrix";

/// Inverse of [`VP_MATRIX`].
pub const VP_MATRIX_INV: &str = "_vpMatrixInv";

/// Pass tag a material must declare to take part in the geometry pass.
pub const GBUFFER_PASS_TAG: &str = "gbuffer";

/// Name of the full-screen lighting shader.
pub const LIGHT_PASS_SHADER: &str = "ToyRP/LightPass";

/// Name of the one-shot lighting command buffer.
pub const LIGHT_PASS_BUFFER: &str = "LightPass";

/// Default profiling sample / main command buffer name.
pub const CAMERA_SAMPLE: &str = "Render Camera";
