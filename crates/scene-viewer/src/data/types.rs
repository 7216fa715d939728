//! GPU-side data for the scene: uniform buffer layouts and per-object
//! resource bundles.

use glam::Mat4;

use crate::scene::SceneState;

/// Frame-wide uniforms shared by every lit draw, respecting std140 layout.
/// Must match `FrameUniforms` in `lit_mesh.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// Camera eye in world space; the specular term needs it.
    pub camera_pos: [f32; 3],
    pub _pad0: f32,
    pub light_pos: [f32; 3],
    pub _pad1: f32,
    pub light_color: [f32; 3],
    pub _pad2: f32,
    /// Fixed object base color; reserved in the block, not read by the
    /// shader (the texture supplies the surface color).
    pub object_color: [f32; 3],
    pub _pad3: f32,
    pub uv_scale: [f32; 2],
    /// Index of the active [`crate::scene::WrapMode`].
    pub wrap_mode: u32,
    pub _pad4: u32,
}

// Buffer size must match the WGSL-reflected size.
const _: [(); 144] = [(); std::mem::size_of::<FrameUniforms>()];

impl FrameUniforms {
    pub fn new(scene: &SceneState, view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: scene.camera.position.to_array(),
            _pad0: 0.0,
            light_pos: scene.light.position.to_array(),
            _pad1: 0.0,
            light_color: scene.light.color.to_array(),
            _pad2: 0.0,
            object_color: scene.settings.object_color.to_array(),
            _pad3: 0.0,
            uv_scale: scene.settings.uv_scale.to_array(),
            wrap_mode: scene.settings.wrap_mode.index() as u32,
            _pad4: 0,
        }
    }
}

/// Per-object uniforms for the lit pipeline.
/// Must match `ObjectUniforms` in `lit_mesh.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
}

const _: [(); 64] = [(); std::mem::size_of::<ObjectUniforms>()];

/// The flat-color pipeline's only uniform, rewritten every frame as the
/// marker follows the light.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FlatUniforms {
    pub mvp: [[f32; 4]; 4],
}

const _: [(); 64] = [(); std::mem::size_of::<FlatUniforms>()];

/// GPU-resident vertex and index buffers for one mesh.
#[derive(Debug)]
pub struct MeshGpu {
    pub vtx: wgpu::Buffer,
    pub idx: wgpu::Buffer,
    pub index_count: u32,
}

/// A mesh plus the bind group carrying its static model-matrix UBO.
#[derive(Debug)]
pub struct LitObjectGpu {
    pub mesh: MeshGpu,
    pub bind: wgpu::BindGroup,
}

/// One renderable scene object, tagged by the pipeline that draws it.
#[derive(Debug)]
pub enum ObjectGpu {
    /// Textured and lit, with a fixed placement.
    Lit(LitObjectGpu),
    /// The light marker: flat white, repositioned to the light each frame.
    FlatMarker(MeshGpu),
}
