//! Pipeline Asset & Configuration
//!
//! [`PipelineAsset`] is the persisted object a host selects in its graphics
//! settings. Its runtime job is to build the [`DeferredPipeline`]; its fields
//! carry the few names and values the pipeline would otherwise hard-code.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use toy_rp::{PipelineAsset, Extent};
//!
//! // Canonical configuration
//! let asset = PipelineAsset::default();
//!
//! // Or persisted settings; missing fields fall back to the defaults
//! let asset = PipelineAsset::from_json(r#"{ "clear_color": [0.0, 0.0, 0.0, 1.0] }"#)?;
//!
//! let mut pipeline = asset.create_pipeline(&mut host, Extent::new(1280, 720))?;
//! pipeline.render(&mut host, &cameras)?;
//! ```

use std::borrow::Cow;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::{PipelineError, Result};
use crate::renderer::bindings::{CAMERA_SAMPLE, GBUFFER_PASS_TAG, LIGHT_PASS_BUFFER, LIGHT_PASS_SHADER};
use crate::renderer::context::RenderContext;
use crate::renderer::gbuffer::Extent;
use crate::renderer::pipeline::DeferredPipeline;

/// Persisted configuration of the deferred pipeline.
///
/// # Fields
///
/// | Field | Description | Default |
/// |-------|-------------|---------|
/// | `clear_color` | RGBA colour the G-buffer is cleared to | Gray (0.5, 0.5, 0.5, 1) |
/// | `lighting_shader` | Shader used by the full-screen lighting pass | `"ToyRP/LightPass"` |
/// | `geometry_pass_tag` | Pass tag drawn in the geometry pass | `"gbuffer"` |
/// | `sample_name` | Profiling scope and main command buffer name | `"Render Camera"` |
/// | `lighting_buffer_name` | Name of the lighting command buffer | `"LightPass"` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineAsset {
    /// Background clear colour for every G-buffer target.
    pub clear_color: [f64; 4],

    /// Name the host resolves to the lighting shader.
    ///
    /// Shaders found under this name must read `_GT0`..`_GT3`, `_gdepth`,
    /// `_vpMatrix` and `_vpMatrixInv`.
    pub lighting_shader: Cow<'static, str>,

    /// Materials take part in the geometry pass only through a pass carrying
    /// this tag.
    pub geometry_pass_tag: Cow<'static, str>,

    pub sample_name: Cow<'static, str>,

    pub lighting_buffer_name: Cow<'static, str>,
}

impl Default for PipelineAsset {
    fn default() -> Self {
        Self {
            clear_color: [0.5, 0.5, 0.5, 1.0],
            lighting_shader: Cow::Borrowed(LIGHT_PASS_SHADER),
            geometry_pass_tag: Cow::Borrowed(GBUFFER_PASS_TAG),
            sample_name: Cow::Borrowed(CAMERA_SAMPLE),
            lighting_buffer_name: Cow::Borrowed(LIGHT_PASS_BUFFER),
        }
    }
}

impl PipelineAsset {
    /// Instantiates the pipeline, allocating its G-buffer at `screen`.
    pub fn create_pipeline<C: RenderContext>(&self, ctx: &mut C, screen: Extent) -> Result<DeferredPipeline> {
        self.validate()?;
        info!(
            "Creating deferred pipeline at {}x{} (lighting shader '{}')",
            screen.width, screen.height, self.lighting_shader
        );
        DeferredPipeline::new(ctx, self.clone(), screen)
    }

    #[inline]
    #[must_use]
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_color;
        wgpu::Color { r, g, b, a }
    }

    pub fn validate(&self) -> Result<()> {
        if self.clear_color.iter().any(|c| !c.is_finite()) {
            return Err(PipelineError::InvalidAsset(format!(
                "clear_color must be finite, got {:?}",
                self.clear_color
            )));
        }

        let names = [
            ("lighting_shader", &self.lighting_shader),
            ("geometry_pass_tag", &self.geometry_pass_tag),
            ("sample_name", &self.sample_name),
            ("lighting_buffer_name", &self.lighting_buffer_name),
        ];
        if let Some((field, _)) = names.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(PipelineError::InvalidAsset(format!("{field} must not be empty")));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
