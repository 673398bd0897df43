use stronghold_assets::{CubemapAsset, Filter, ImageData, MeshAsset, TextureAsset, TextureChannel, TextureDesc, Wrap};
use wgpu::util::DeviceExt;

use crate::uniforms::GpuMeshVertex;

pub struct GpuTexture {
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

pub struct GpuCubemap {
    pub bind_group: wgpu::BindGroup,
}

pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

fn texture_format(channel: TextureChannel) -> wgpu::TextureFormat {
    if channel.is_srgb() {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    }
}

fn filter_mode(filter: Filter) -> wgpu::FilterMode {
    match filter {
        Filter::Nearest => wgpu::FilterMode::Nearest,
        Filter::Linear => wgpu::FilterMode::Linear,
    }
}

fn address_mode(wrap: Wrap) -> wgpu::AddressMode {
    match wrap {
        Wrap::Repeat => wgpu::AddressMode::Repeat,
        Wrap::ClampToEdge => wgpu::AddressMode::ClampToEdge,
    }
}

fn write_layer(queue: &wgpu::Queue, texture: &wgpu::Texture, image: &ImageData, layer: u32) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d { x: 0, y: 0, z: layer },
            aspect: wgpu::TextureAspect::All,
        },
        &image.pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(image.bytes_per_row()),
            rows_per_image: Some(image.height),
        },
        wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        },
    );
}

pub fn upload_image(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    image: &ImageData,
    desc: &TextureDesc,
) -> GpuTexture {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: image.width.max(1),
            height: image.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: texture_format(desc.channel),
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    if image.width > 0 && image.height > 0 {
        write_layer(queue, &texture, image, 0);
    }
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        mag_filter: filter_mode(desc.mag_filter),
        min_filter: filter_mode(desc.min_filter),
        mipmap_filter: wgpu::FilterMode::Nearest,
        address_mode_u: address_mode(desc.wrap),
        address_mode_v: address_mode(desc.wrap),
        address_mode_w: address_mode(desc.wrap),
        ..Default::default()
    });
    GpuTexture { view, sampler }
}

pub fn upload_texture(device: &wgpu::Device, queue: &wgpu::Queue, asset: &TextureAsset) -> GpuTexture {
    tracing::debug!(label = %asset.label, width = asset.image.width, height = asset.image.height, "uploading texture");
    upload_image(device, queue, &asset.label, &asset.image, &asset.desc)
}

/// Upload six faces into one cube texture, one array layer per face.
pub fn upload_cubemap(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    asset: &CubemapAsset,
) -> GpuCubemap {
    let size = asset.size().max(1);
    tracing::debug!(label = %asset.label, size, "uploading cubemap");
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(&asset.label),
        size: wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 6,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    for (layer, face) in asset.faces.iter().enumerate() {
        write_layer(queue, &texture, face, layer as u32);
    }
    let view = texture.create_view(&wgpu::TextureViewDescriptor {
        label: Some(&asset.label),
        dimension: Some(wgpu::TextureViewDimension::Cube),
        array_layer_count: Some(6),
        ..Default::default()
    });
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(&asset.label),
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        ..Default::default()
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&asset.label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    });
    GpuCubemap { bind_group }
}

pub fn upload_mesh(device: &wgpu::Device, asset: &MeshAsset) -> GpuMesh {
    let vertices: Vec<GpuMeshVertex> = asset
        .data
        .vertices
        .iter()
        .map(|v| GpuMeshVertex {
            position: v.position.to_array(),
            normal: v.normal.to_array(),
            uv: v.uv.to_array(),
        })
        .collect();
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&asset.name),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&asset.name),
        contents: bytemuck::cast_slice(&asset.data.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    tracing::debug!(name = %asset.name, vertices = vertices.len(), "uploading mesh");
    GpuMesh {
        vertex_buffer,
        index_buffer,
        index_count: asset.data.indices.len() as u32,
    }
}

pub fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_stencil_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: crate::pipelines::DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}
