use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::scene::WrapMode;

/// The scene texture plus one sampler per [`WrapMode`], indexed by
/// `WrapMode::index`. Border mode reuses an edge-clamping sampler; the
/// shader substitutes the magenta border itself.
pub struct SceneTexture {
    pub view: wgpu::TextureView,
    pub samplers: [wgpu::Sampler; 4],
    _texture: wgpu::Texture,
}

/// Decodes `path`, flips it vertically, and uploads it as RGBA8.
///
/// Only 3- and 4-channel images are accepted; anything else is a startup
/// error. The flip compensates for image row order (top-down) versus the
/// UV convention (v grows upward).
pub fn load_scene_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    path: &Path,
) -> Result<SceneTexture> {
    let img = image::open(path)
        .with_context(|| format!("failed to load texture {}", path.display()))?;

    let channels = img.color().channel_count();
    if channels != 3 && channels != 4 {
        bail!(
            "texture {} has {} channels; only RGB and RGBA images are supported",
            path.display(),
            channels
        );
    }

    let rgba = img.flipv().to_rgba8();
    let (width, height) = rgba.dimensions();

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Scene Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &rgba,
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    log::info!("loaded texture {} ({}x{})", path.display(), width, height);

    let sampler = |label: &str, mode: wgpu::AddressMode| {
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: mode,
            address_mode_v: mode,
            address_mode_w: mode,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        })
    };

    // Indexed by WrapMode::index; border mode clamps and lets the shader
    // paint the border color.
    let samplers = [
        sampler("Repeat Sampler", wgpu::AddressMode::Repeat),
        sampler("Mirror Sampler", wgpu::AddressMode::MirrorRepeat),
        sampler("Clamp Sampler", wgpu::AddressMode::ClampToEdge),
        sampler("Border Sampler", wgpu::AddressMode::ClampToEdge),
    ];
    debug_assert_eq!(WrapMode::ClampToBorder.index(), 3);

    Ok(SceneTexture {
        view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
        samplers,
        _texture: texture,
    })
}
