//! Command Buffer
//!
//! A named, reusable list of deferred commands. Commands are recorded on the
//! CPU and reach the host only when the buffer is passed to
//! [`RenderContext::execute_command_buffer`](super::context::RenderContext::execute_command_buffer).
//!
//! ```text
//! record (set_render_target, clear, set_global_*, blit, ...)
//!     → execute_command_buffer(&buffer)
//!     → clear()            (buffer may be recorded again)
//! ```

use std::borrow::Cow;

use glam::Mat4;
use smallvec::SmallVec;

use super::resources::{Material, TextureHandle};

/// A single recorded command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Binds a multiple-render-target set plus a depth target.
    SetRenderTarget {
        colors: SmallVec<[TextureHandle; 4]>,
        depth: TextureHandle,
    },
    /// Clears the bound targets.
    ClearRenderTarget {
        clear_depth: bool,
        clear_color: bool,
        color: wgpu::Color,
    },
    /// Opens a named profiling scope.
    BeginSample(Cow<'static, str>),
    /// Closes a named profiling scope.
    EndSample(Cow<'static, str>),
    /// Exposes a texture to every shader under `name`.
    SetGlobalTexture {
        name: Cow<'static, str>,
        texture: TextureHandle,
    },
    /// Exposes a 4x4 matrix to every shader under `name`.
    SetGlobalMatrix {
        name: Cow<'static, str>,
        value: Mat4,
    },
    /// Full-screen pass sampling `source` through `material` into the
    /// camera's output target (back buffer or camera texture).
    Blit {
        source: TextureHandle,
        material: Material,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandBuffer {
    name: Cow<'static, str>,
    commands: Vec<Command>,
}

impl CommandBuffer {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drops every recorded command, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn set_render_target(&mut self, colors: &[TextureHandle], depth: TextureHandle) {
        self.commands.push(Command::SetRenderTarget {
            colors: SmallVec::from_slice(colors),
            depth,
        });
    }

    pub fn clear_render_target(&mut self, clear_depth: bool, clear_color: bool, color: wgpu::Color) {
        self.commands.push(Command::ClearRenderTarget {
            clear_depth,
            clear_color,
            color,
        });
    }

    pub fn begin_sample(&mut self, name: impl Into<Cow<'static, str>>) {
        self.commands.push(Command::BeginSample(name.into()));
    }

    pub fn end_sample(&mut self, name: impl Into<Cow<'static, str>>) {
        self.commands.push(Command::EndSample(name.into()));
    }

    pub fn set_global_texture(&mut self, name: impl Into<Cow<'static, str>>, texture: TextureHandle) {
        self.commands.push(Command::SetGlobalTexture {
            name: name.into(),
            texture,
        });
    }

    pub fn set_global_matrix(&mut self, name: impl Into<Cow<'static, str>>, value: Mat4) {
        self.commands.push(Command::SetGlobalMatrix {
            name: name.into(),
            value,
        });
    }

    pub fn blit(&mut self, source: TextureHandle, material: Material) {
        self.commands.push(Command::Blit { source, material });
    }
}

impl<'a> IntoIterator for &'a CommandBuffer {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
