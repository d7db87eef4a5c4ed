//! Host Resource Handles
//!
//! Opaque identifiers for objects the host owns. The pipeline never looks
//! inside a handle; it only passes them back to the host.

/// Unique identifier of a host render texture.
///
/// A released texture's handle must not be reused by the host while the
/// pipeline may still hold it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u64);

/// Unique identifier of a host shader, as returned by
/// [`RenderContext::find_shader`](super::context::RenderContext::find_shader).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderHandle(pub u64);

/// A material instance bound to a single shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material {
    shader: ShaderHandle,
}

impl Material {
    #[inline]
    #[must_use]
    pub fn new(shader: ShaderHandle) -> Self {
        Self { shader }
    }

    #[inline]
    #[must_use]
    pub fn shader(&self) -> ShaderHandle {
        self.shader
    }
}
