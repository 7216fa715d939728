//! Uploads CPU meshes to GPU buffers.

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::data::types::{LitObjectGpu, MeshGpu, ObjectUniforms};

/// Creates vertex and index buffers for `mesh`.
pub fn upload_mesh(device: &wgpu::Device, mesh: &procmesh::Mesh, label: &str) -> MeshGpu {
    let vtx = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label} VB")),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let idx = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label} IB")),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    MeshGpu {
        vtx,
        idx,
        index_count: mesh.index_count(),
    }
}

/// Uploads `mesh` together with its fixed model matrix for the lit
/// pipeline. The object UBO is written once here; placements never change
/// after startup.
pub fn upload_lit_object(
    device: &wgpu::Device,
    object_layout: &wgpu::BindGroupLayout,
    mesh: &procmesh::Mesh,
    model: Mat4,
    label: &str,
) -> LitObjectGpu {
    let gpu = upload_mesh(device, mesh, label);

    let uniforms = ObjectUniforms {
        model: model.to_cols_array_2d(),
    };

    let ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label} UBO")),
        contents: bytemuck::bytes_of(&uniforms),
        usage: wgpu::BufferUsages::UNIFORM,
    });

    // The bind group keeps the UBO alive; placements never change after
    // startup, so nothing writes it again.
    let bind = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{label} Bind Group")),
        layout: object_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: ubo.as_entire_binding(),
        }],
    });

    LitObjectGpu { mesh: gpu, bind }
}
