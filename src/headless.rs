//! Headless Host
//!
//! [`HeadlessContext`] is a complete [`RenderContext`] that never touches a
//! GPU. It keeps a flat list of [`SceneObject`]s, culls them against the
//! camera frustum, and appends every call it receives to a [`HostCall`] log.
//! Tests and tools inspect the log to check what the pipeline issued.
//!
//! # Data Flow
//! ```text
//! SceneObject[] ──cull(frustum)──► HeadlessCulling ──draw_renderers(filter, sort)──► HostCall::DrawRenderer
//! ```

use std::borrow::Cow;

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::camera::{Camera, CullingParameters};
use crate::renderer::bindings::{GBUFFER_PASS_TAG, LIGHT_PASS_SHADER};
use crate::renderer::command::{Command, CommandBuffer};
use crate::renderer::context::{DrawingSettings, FilteringSettings, GizmoSubset, RenderContext, SortingCriteria};
use crate::renderer::gbuffer::RenderTextureDesc;
use crate::renderer::resources::{ShaderHandle, TextureHandle};
use crate::renderer::uniforms::ClipConvention;

/// A renderer in the headless scene, bounded by a sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: Cow<'static, str>,
    pub center: Vec3,
    pub radius: f32,
    pub render_queue: i32,
    /// Pass tags declared by the object's material.
    pub pass_tags: Vec<Cow<'static, str>>,
}

impl SceneObject {
    /// Geometry (2000) queue object with a `gbuffer` pass.
    #[must_use]
    pub fn opaque(name: impl Into<Cow<'static, str>>, center: Vec3, radius: f32) -> Self {
        Self {
            name: name.into(),
            center,
            radius,
            render_queue: 2000,
            pass_tags: vec![Cow::Borrowed(GBUFFER_PASS_TAG)],
        }
    }

    #[must_use]
    pub fn with_queue(mut self, render_queue: i32) -> Self {
        self.render_queue = render_queue;
        self
    }

    #[must_use]
    pub fn with_pass_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        self.pass_tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Every host primitive the pipeline invoked, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    CreateRenderTexture {
        texture: TextureHandle,
        desc: RenderTextureDesc,
    },
    ReleaseRenderTexture(TextureHandle),
    Cull {
        visible: usize,
    },
    SetupCameraProperties {
        camera: String,
    },
    ExecuteCommandBuffer {
        name: String,
        commands: Vec<Command>,
    },
    DrawRenderer {
        object: String,
        shader_tag: String,
    },
    DrawSkybox {
        camera: String,
    },
    DrawGizmos {
        camera: String,
        subset: GizmoSubset,
    },
    Submit,
}

/// Culling output: indices of visible objects and the viewer position.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessCulling {
    pub visible: Vec<usize>,
    pub camera_position: Vec3,
}

#[derive(Debug, Default)]
pub struct HeadlessContext {
    objects: Vec<SceneObject>,
    shaders: FxHashMap<String, ShaderHandle>,
    textures: FxHashMap<TextureHandle, RenderTextureDesc>,
    next_texture: u64,
    gizmos: bool,
    clip_convention: ClipConvention,
    calls: Vec<HostCall>,
}

impl HeadlessContext {
    /// A host with the lighting shader already registered.
    #[must_use]
    pub fn new() -> Self {
        let mut ctx = Self::empty();
        ctx.register_shader(LIGHT_PASS_SHADER);
        ctx
    }

    /// A host with no shaders registered.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn register_shader(&mut self, name: impl Into<String>) -> ShaderHandle {
        let next = ShaderHandle(self.shaders.len() as u64 + 1);
        *self.shaders.entry(name.into()).or_insert(next)
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn set_gizmos(&mut self, enabled: bool) {
        self.gizmos = enabled;
    }

    pub fn set_clip_convention(&mut self, convention: ClipConvention) {
        self.clip_convention = convention;
    }

    #[must_use]
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Drains the call log.
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of logged calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    /// Every command executed so far, flattened across buffers.
    pub fn executed_commands(&self) -> impl Iterator<Item = &Command> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::ExecuteCommandBuffer { commands, .. } => Some(commands.iter()),
                _ => None,
            })
            .flatten()
    }

    /// Textures created and not yet released.
    #[must_use]
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    #[must_use]
    pub fn texture_desc(&self, texture: TextureHandle) -> Option<&RenderTextureDesc> {
        self.textures.get(&texture)
    }
}

impl RenderContext for HeadlessContext {
    type CullingResults = HeadlessCulling;

    fn cull(&mut self, parameters: &CullingParameters) -> HeadlessCulling {
        let visible: Vec<usize> = self
            .objects
            .iter()
            .enumerate()
            .filter(|(_, object)| parameters.frustum.intersects_sphere(object.center, object.radius))
            .map(|(index, _)| index)
            .collect();

        self.calls.push(HostCall::Cull {
            visible: visible.len(),
        });
        HeadlessCulling {
            visible,
            camera_position: parameters.camera_position,
        }
    }

    fn setup_camera_properties(&mut self, camera: &Camera) {
        self.calls.push(HostCall::SetupCameraProperties {
            camera: camera.name.to_string(),
        });
    }

    fn execute_command_buffer(&mut self, buffer: &CommandBuffer) {
        self.calls.push(HostCall::ExecuteCommandBuffer {
            name: buffer.name().to_owned(),
            commands: buffer.commands().to_vec(),
        });
    }

    fn draw_renderers(&mut self, culling: &HeadlessCulling, drawing: &DrawingSettings, filtering: &FilteringSettings) {
        let tag = drawing.shader_tag.as_str();
        let mut items: Vec<(&SceneObject, f32)> = culling
            .visible
            .iter()
            .filter_map(|&index| self.objects.get(index))
            .filter(|object| filtering.queue_range.contains(object.render_queue))
            .filter(|object| object.pass_tags.iter().any(|t| t == tag))
            .map(|object| (object, object.center.distance_squared(culling.camera_position)))
            .collect();

        match drawing.sorting {
            SortingCriteria::None => {}
            SortingCriteria::CommonOpaque => items.sort_by(|(a, da), (b, db)| {
                a.render_queue.cmp(&b.render_queue).then(da.total_cmp(db))
            }),
        }

        let draws: Vec<HostCall> = items
            .into_iter()
            .map(|(object, _)| HostCall::DrawRenderer {
                object: object.name.to_string(),
                shader_tag: tag.to_owned(),
            })
            .collect();
        self.calls.extend(draws);
    }

    fn draw_skybox(&mut self, camera: &Camera) {
        self.calls.push(HostCall::DrawSkybox {
            camera: camera.name.to_string(),
        });
    }

    fn should_render_gizmos(&self) -> bool {
        self.gizmos
    }

    fn draw_gizmos(&mut self, camera: &Camera, subset: GizmoSubset) {
        self.calls.push(HostCall::DrawGizmos {
            camera: camera.name.to_string(),
            subset,
        });
    }

    fn submit(&mut self) {
        self.calls.push(HostCall::Submit);
    }

    fn find_shader(&self, name: &str) -> Option<ShaderHandle> {
        self.shaders.get(name).copied()
    }

    fn create_render_texture(&mut self, desc: &RenderTextureDesc) -> TextureHandle {
        self.next_texture += 1;
        let texture = TextureHandle(self.next_texture);
        self.textures.insert(texture, desc.clone());
        self.calls.push(HostCall::CreateRenderTexture {
            texture,
            desc: desc.clone(),
        });
        texture
    }

    fn release_render_texture(&mut self, texture: TextureHandle) {
        if self.textures.remove(&texture).is_none() {
            log::warn!("Release of unknown render texture {texture:?}");
        }
        self.calls.push(HostCall::ReleaseRenderTexture(texture));
    }

    fn clip_convention(&self) -> ClipConvention {
        self.clip_convention
    }
}
