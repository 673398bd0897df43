use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use stronghold_common::Color;
use stronghold_render::{FrameView, LineVertex, MeshDraw};

/// Stride between per-object uniform blocks; the dynamic offset alignment
/// wgpu guarantees on every adapter.
pub const OBJECT_STRIDE: u64 = 256;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub screen_proj: [[f32; 4]; 4],
    pub sky_inv_view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub ambient: [f32; 4],
    pub light_position: [f32; 4],
    pub light_color: [f32; 4],
    pub light_params: [f32; 4],
}

impl FrameUniforms {
    pub fn from_view(view: &FrameView) -> Self {
        let lighting = &view.lighting;
        let ambient = lighting.ambient.color * lighting.ambient.strength;
        let specular = &lighting.specular;
        Self {
            view_proj: view.view_projection().to_cols_array_2d(),
            screen_proj: view.screen_projection().to_cols_array_2d(),
            sky_inv_view_proj: view.rotation_only().inverse().to_cols_array_2d(),
            camera_position: view.camera_position.extend(1.0).to_array(),
            ambient: ambient.extend(1.0).to_array(),
            light_position: specular.position.extend(1.0).to_array(),
            light_color: specular.color.extend(specular.strength).to_array(),
            light_params: [specular.shininess, 0.0, 0.0, 0.0],
        }
    }
}

impl Default for FrameUniforms {
    fn default() -> Self {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        Self {
            view_proj: identity,
            screen_proj: identity,
            sky_inv_view_proj: identity,
            camera_position: [0.0; 4],
            ambient: [1.0; 4],
            light_position: [0.0; 4],
            light_color: [0.0; 4],
            light_params: [1.0, 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 4],
    pub params: [f32; 4],
}

impl ObjectUniforms {
    pub fn mesh(draw: &MeshDraw) -> Self {
        Self {
            model: draw.model.to_cols_array_2d(),
            tint: draw.tint.to_array(),
            params: [draw.uv_scale.x, draw.uv_scale.y, if draw.unlit { 1.0 } else { 0.0 }, 0.0],
        }
    }

    pub fn flat(model: Mat4, color: Color) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            tint: color.to_array(),
            params: [1.0, 1.0, 1.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct GpuMeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct GpuLineVertex {
    pub position: [f32; 3],
    pub color: [u8; 4],
}

impl From<&LineVertex> for GpuLineVertex {
    fn from(v: &LineVertex) -> Self {
        Self {
            position: v.position.to_array(),
            color: [v.color.r, v.color.g, v.color.b, v.color.a],
        }
    }
}

/// Pack `objects` at [`OBJECT_STRIDE`] intervals for a dynamic-offset buffer.
pub fn pack_objects(objects: &[ObjectUniforms]) -> Vec<u8> {
    let stride = OBJECT_STRIDE as usize;
    let mut bytes = vec![0u8; objects.len() * stride];
    for (i, object) in objects.iter().enumerate() {
        let raw = bytemuck::bytes_of(object);
        bytes[i * stride..i * stride + raw.len()].copy_from_slice(raw);
    }
    bytes
}
