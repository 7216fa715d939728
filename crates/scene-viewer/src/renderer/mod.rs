//! Rendering orchestrator: owns the GPU context, the depth target, and the
//! two scene pipelines, and runs the one pass each frame needs.

pub mod context;
pub mod pipelines;
pub mod targets;

use std::sync::Arc;

use glam::Mat4;
use winit::window::Window;

use self::{
    context::GfxContext,
    pipelines::{flat_color::FlatColorPipeline, lit_mesh::LitMeshPipeline},
    targets::Targets,
};
use crate::data::types::{FrameUniforms, ObjectGpu};

pub struct Renderer {
    pub gfx: GfxContext,
    pub targets: Targets,
    pub lit: LitMeshPipeline,
    pub flat: FlatColorPipeline,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let gfx = GfxContext::new(window).await?;
        let size = gfx.size;

        let targets = Targets::new(&gfx.device, size);
        let lit = LitMeshPipeline::new(&gfx.device, gfx.config.format, targets.depth_fmt);
        let flat = FlatColorPipeline::new(&gfx.device, gfx.config.format, targets.depth_fmt);

        Ok(Self {
            gfx,
            targets,
            lit,
            flat,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.gfx.resize(new_size);
            self.targets.resize(&self.gfx.device, new_size);
        }
    }

    /// Draws one frame: lit objects first, then the light marker, into a
    /// single pass over a black clear.
    pub fn render(
        &mut self,
        swap_view: &wgpu::TextureView,
        frame_uniforms: &FrameUniforms,
        lamp_mvp: Mat4,
        objects: &[ObjectGpu],
        texture_bind: &wgpu::BindGroup,
    ) {
        self.lit.write_frame(&self.gfx.queue, frame_uniforms);
        self.flat.write_mvp(&self.gfx.queue, lamp_mvp);

        let mut encoder = self
            .gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: swap_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for object in objects {
                match object {
                    ObjectGpu::Lit(lit_object) => {
                        self.lit.draw(&mut pass, lit_object, texture_bind);
                    }
                    ObjectGpu::FlatMarker(mesh) => {
                        self.flat.draw(&mut pass, mesh);
                    }
                }
            }
        }

        self.gfx.queue.submit(std::iter::once(encoder.finish()));
    }
}
