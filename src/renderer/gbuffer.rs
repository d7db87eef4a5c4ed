//! Geometry Buffer
//!
//! Four colour targets plus one depth target, all at the same resolution.
//!
//! | Slot | Content | Format | Global name |
//! |------|---------|--------|-------------|
//! | `Albedo` | base colour | `Rgba8Unorm` | `_GT0` |
//! | `Normal` | world normal | `Rgb10a2Unorm` | `_GT1` |
//! | `MotionRoughMetal` | motion vector, roughness, metallic | `Rgba16Unorm` | `_GT2` |
//! | `EmissionOcclusion` | emission, ambient occlusion | `Rgba32Float` | `_GT3` |
//! | depth | scene depth | `Depth24Plus` | `_gdepth` |
//!
//! The set is allocated through the host when the camera renderer is created.
//! A resolution change is an explicit [`GBuffer::resize`] that releases the
//! five old textures and allocates five new ones.

use log::debug;

use crate::errors::{PipelineError, Result};

use super::bindings::{GBUFFER_TEXTURES, GDEPTH};
use super::context::RenderContext;
use super::resources::TextureHandle;

/// Render-target resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn validate(self) -> Result<Self> {
        if self.is_empty() {
            return Err(PipelineError::InvalidExtent {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Colour slots of the G-buffer, in MRT binding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum GBufferSlot {
    Albedo = 0,
    Normal = 1,
    MotionRoughMetal = 2,
    EmissionOcclusion = 3,
}

impl GBufferSlot {
    pub const ALL: [Self; 4] = [
        Self::Albedo,
        Self::Normal,
        Self::MotionRoughMetal,
        Self::EmissionOcclusion,
    ];

    /// MRT attachment index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    #[must_use]
    pub const fn format(self) -> wgpu::TextureFormat {
        match self {
            Self::Albedo => wgpu::TextureFormat::Rgba8Unorm,
            Self::Normal => wgpu::TextureFormat::Rgb10a2Unorm,
            Self::MotionRoughMetal => wgpu::TextureFormat::Rgba16Unorm,
            Self::EmissionOcclusion => wgpu::TextureFormat::Rgba32Float,
        }
    }

    /// Shader-visible global texture name.
    #[inline]
    #[must_use]
    pub const fn global_name(self) -> &'static str {
        GBUFFER_TEXTURES[self.index()]
    }

    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Albedo => "GBuffer Albedo",
            Self::Normal => "GBuffer Normal",
            Self::MotionRoughMetal => "GBuffer Motion/Rough/Metal",
            Self::EmissionOcclusion => "GBuffer Emission/Occlusion",
        }
    }
}

/// Descriptor for requesting a render texture from the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderTextureDesc {
    pub label: &'static str,
    pub extent: Extent,
    pub format: wgpu::TextureFormat,
    pub usage: wgpu::TextureUsages,
}

impl RenderTextureDesc {
    /// The equivalent wgpu descriptor, for hosts backed by wgpu.
    #[must_use]
    pub fn to_wgpu(&self) -> wgpu::TextureDescriptor<'static> {
        wgpu::TextureDescriptor {
            label: Some(self.label),
            size: wgpu::Extent3d {
                width: self.extent.width,
                height: self.extent.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.format,
            usage: self.usage,
            view_formats: &[],
        }
    }
}

/// Fixed G-buffer layout.
pub struct GBufferLayout;

impl GBufferLayout {
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;
    pub const DEPTH_LABEL: &'static str = "GBuffer Depth";
    pub const USAGE: wgpu::TextureUsages = wgpu::TextureUsages::RENDER_ATTACHMENT
        .union(wgpu::TextureUsages::TEXTURE_BINDING);

    #[must_use]
    pub fn color_desc(slot: GBufferSlot, extent: Extent) -> RenderTextureDesc {
        RenderTextureDesc {
            label: slot.label(),
            extent,
            format: slot.format(),
            usage: Self::USAGE,
        }
    }

    #[must_use]
    pub fn depth_desc(extent: Extent) -> RenderTextureDesc {
        RenderTextureDesc {
            label: Self::DEPTH_LABEL,
            extent,
            format: Self::DEPTH_FORMAT,
            usage: Self::USAGE,
        }
    }
}

/// A host texture together with the descriptor it was created from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTexture {
    pub handle: TextureHandle,
    pub desc: RenderTextureDesc,
}

impl RenderTexture {
    fn create<C: RenderContext>(ctx: &mut C, desc: RenderTextureDesc) -> Self {
        let handle = ctx.create_render_texture(&desc);
        Self { handle, desc }
    }
}

#[derive(Debug)]
pub struct GBuffer {
    extent: Extent,
    pub albedo: RenderTexture,
    pub normal: RenderTexture,
    pub motion_rough_metal: RenderTexture,
    pub emission_occlusion: RenderTexture,
    pub depth: RenderTexture,
}

impl GBuffer {
    /// Allocates all five targets at `extent`.
    pub fn allocate<C: RenderContext>(ctx: &mut C, extent: Extent) -> Result<Self> {
        let extent = extent.validate()?;
        debug!("Allocating G-buffer at {}x{}", extent.width, extent.height);

        let mut color = |slot| RenderTexture::create(ctx, GBufferLayout::color_desc(slot, extent));
        let albedo = color(GBufferSlot::Albedo);
        let normal = color(GBufferSlot::Normal);
        let motion_rough_metal = color(GBufferSlot::MotionRoughMetal);
        let emission_occlusion = color(GBufferSlot::EmissionOcclusion);
        let depth = RenderTexture::create(ctx, GBufferLayout::depth_desc(extent));

        Ok(Self {
            extent,
            albedo,
            normal,
            motion_rough_metal,
            emission_occlusion,
            depth,
        })
    }

    /// Reallocates the set at `extent`.
    ///
    /// Returns `Ok(false)` without touching the host when `extent` is the
    /// current size. A zero dimension is rejected and the set is left intact.
    pub fn resize<C: RenderContext>(&mut self, ctx: &mut C, extent: Extent) -> Result<bool> {
        let extent = extent.validate()?;
        if extent == self.extent {
            return Ok(false);
        }

        debug!(
            "Resizing G-buffer {}x{} -> {}x{}",
            self.extent.width, self.extent.height, extent.width, extent.height
        );
        self.release_textures(ctx);
        *self = Self::allocate(ctx, extent)?;
        Ok(true)
    }

    /// Returns every texture to the host.
    pub fn release<C: RenderContext>(self, ctx: &mut C) {
        self.release_textures(ctx);
    }

    fn release_textures<C: RenderContext>(&self, ctx: &mut C) {
        for texture in self.textures() {
            ctx.release_render_texture(texture.handle);
        }
    }

    #[inline]
    #[must_use]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    #[must_use]
    pub fn target(&self, slot: GBufferSlot) -> &RenderTexture {
        match slot {
            GBufferSlot::Albedo => &self.albedo,
            GBufferSlot::Normal => &self.normal,
            GBufferSlot::MotionRoughMetal => &self.motion_rough_metal,
            GBufferSlot::EmissionOcclusion => &self.emission_occlusion,
        }
    }

    /// Colour handles in MRT order.
    #[must_use]
    pub fn color_handles(&self) -> [TextureHandle; 4] {
        GBufferSlot::ALL.map(|slot| self.target(slot).handle)
    }

    /// All five targets: the four colour slots in order, then depth.
    pub fn textures(&self) -> impl Iterator<Item = &RenderTexture> {
        GBufferSlot::ALL
            .into_iter()
            .map(|slot| self.target(slot))
            .chain(std::iter::once(&self.depth))
    }

    /// `(global name, handle)` pairs in upload order: depth first, then slots.
    pub fn global_bindings(&self) -> impl Iterator<Item = (&'static str, TextureHandle)> + '_ {
        std::iter::once((GDEPTH, self.depth.handle)).chain(
            GBufferSlot::ALL
                .into_iter()
                .map(|slot| (slot.global_name(), self.target(slot).handle)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_names_follow_binding_order() {
        let names: Vec<_> = GBufferSlot::ALL.iter().map(|s| s.global_name()).collect();
        assert_eq!(names, ["_GT0", "_GT1", "_GT2", "_GT3"]);
    }

    #[test]
    fn wgpu_descriptor_matches_request() {
        let desc = GBufferLayout::color_desc(GBufferSlot::Normal, Extent::new(640, 360));
        let wgpu_desc = desc.to_wgpu();
        assert_eq!(wgpu_desc.size.width, 640);
        assert_eq!(wgpu_desc.size.height, 360);
        assert_eq!(wgpu_desc.format, wgpu::TextureFormat::Rgb10a2Unorm);
        assert!(wgpu_desc.usage.contains(wgpu::TextureUsages::TEXTURE_BINDING));
    }

    #[test]
    fn empty_extent_detected() {
        assert!(Extent::new(0, 10).is_empty());
        assert!(Extent::new(10, 0).is_empty());
        assert!(!Extent::new(1, 1).is_empty());
    }
}
