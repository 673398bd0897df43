use stronghold_assets::{ShaderPack, ShaderSource};
use stronghold_render::RenderError;

use crate::uniforms::{FrameUniforms, GpuLineVertex, GpuMeshVertex, ObjectUniforms};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// Bind group layouts shared by every pipeline.
///
/// - group 0: frame uniforms
/// - group 1: per-object uniforms (dynamic offset) or the skybox cubemap
/// - group 2: diffuse and specular texture/sampler pairs
pub struct Layouts {
    pub frame: wgpu::BindGroupLayout,
    pub object: wgpu::BindGroupLayout,
    pub material: wgpu::BindGroupLayout,
    pub cubemap: wgpu::BindGroupLayout,
}

fn uniform_entry(binding: u32, dynamic: bool, size: usize) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: dynamic,
            min_binding_size: wgpu::BufferSize::new(size as u64),
        },
        count: None,
    }
}

fn texture_entry(binding: u32, dimension: wgpu::TextureViewDimension) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: dimension,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

impl Layouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let frame = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_layout"),
            entries: &[uniform_entry(0, false, std::mem::size_of::<FrameUniforms>())],
        });
        let object = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_layout"),
            entries: &[uniform_entry(0, true, std::mem::size_of::<ObjectUniforms>())],
        });
        let material = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_layout"),
            entries: &[
                texture_entry(0, wgpu::TextureViewDimension::D2),
                sampler_entry(1),
                texture_entry(2, wgpu::TextureViewDimension::D2),
                sampler_entry(3),
            ],
        });
        let cubemap = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("cubemap_layout"),
            entries: &[texture_entry(0, wgpu::TextureViewDimension::Cube), sampler_entry(1)],
        });
        Self {
            frame,
            object,
            material,
            cubemap,
        }
    }
}

pub struct Pipelines {
    pub mesh: wgpu::RenderPipeline,
    pub outline: wgpu::RenderPipeline,
    pub line: wgpu::RenderPipeline,
    pub skybox: wgpu::RenderPipeline,
    pub widget: wgpu::RenderPipeline,
}

struct Modules {
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
}

/// Compile one program, turning validation errors into [`RenderError::Shader`].
fn compile(device: &wgpu::Device, shaders: &ShaderPack, name: &str) -> Result<Modules, RenderError> {
    let ShaderSource { vertex, fragment } = shaders
        .get(name)
        .ok_or_else(|| RenderError::MissingShader(name.to_string()))?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{name}.vert")),
        source: wgpu::ShaderSource::Wgsl(vertex.as_str().into()),
    });
    let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{name}.frag")),
        source: wgpu::ShaderSource::Wgsl(fragment.as_str().into()),
    });
    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(RenderError::Shader {
            name: name.to_string(),
            message: error.to_string(),
        });
    }
    Ok(Modules { vertex, fragment })
}

const MESH_ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
    2 => Float32x2,
];

const LINE_ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Unorm8x4,
];

fn mesh_buffer() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<GpuMeshVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &MESH_ATTRIBUTES,
    }
}

fn line_buffer() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<GpuLineVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &LINE_ATTRIBUTES,
    }
}

fn stencil_face(compare: wgpu::CompareFunction, pass_op: wgpu::StencilOperation) -> wgpu::StencilFaceState {
    wgpu::StencilFaceState {
        compare,
        fail_op: wgpu::StencilOperation::Keep,
        depth_fail_op: wgpu::StencilOperation::Keep,
        pass_op,
    }
}

fn depth_state(
    depth_write_enabled: bool,
    depth_compare: wgpu::CompareFunction,
    stencil: wgpu::StencilState,
) -> Option<wgpu::DepthStencilState> {
    Some(wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled,
        depth_compare,
        stencil,
        bias: Default::default(),
    })
}

struct PipelineSpec<'a> {
    name: &'a str,
    layouts: &'a [&'a wgpu::BindGroupLayout],
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
    blend: wgpu::BlendState,
    depth_stencil: Option<wgpu::DepthStencilState>,
}

fn build(
    device: &wgpu::Device,
    shaders: &ShaderPack,
    format: wgpu::TextureFormat,
    spec: PipelineSpec<'_>,
) -> Result<wgpu::RenderPipeline, RenderError> {
    let modules = compile(device, shaders, spec.name)?;
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(spec.name),
        bind_group_layouts: spec.layouts,
        push_constant_ranges: &[],
    });

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.name),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &modules.vertex,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: spec.buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: &modules.fragment,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(spec.blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: spec.topology,
            cull_mode: spec.cull_mode,
            ..Default::default()
        },
        depth_stencil: spec.depth_stencil,
        multisample: Default::default(),
        multiview: None,
        cache: None,
    });
    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(RenderError::Shader {
            name: spec.name.to_string(),
            message: error.to_string(),
        });
    }
    tracing::debug!(program = spec.name, "pipeline built");
    Ok(pipeline)
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        shaders: &ShaderPack,
        layouts: &Layouts,
        format: wgpu::TextureFormat,
    ) -> Result<Self, RenderError> {
        let mesh_buffers = [mesh_buffer()];
        let line_buffers = [line_buffer()];

        // Every mesh writes its stencil reference: 1 for outlined, 0 otherwise.
        let write_stencil = wgpu::StencilState {
            front: stencil_face(wgpu::CompareFunction::Always, wgpu::StencilOperation::Replace),
            back: stencil_face(wgpu::CompareFunction::Always, wgpu::StencilOperation::Replace),
            read_mask: 0xff,
            write_mask: 0xff,
        };
        // Outline pixels only where no outlined mesh was drawn.
        let mask_stencil = wgpu::StencilState {
            front: stencil_face(wgpu::CompareFunction::NotEqual, wgpu::StencilOperation::Keep),
            back: stencil_face(wgpu::CompareFunction::NotEqual, wgpu::StencilOperation::Keep),
            read_mask: 0xff,
            write_mask: 0x00,
        };

        let mesh = build(
            device,
            shaders,
            format,
            PipelineSpec {
                name: "mesh",
                layouts: &[&layouts.frame, &layouts.object, &layouts.material],
                buffers: &mesh_buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_stencil: depth_state(true, wgpu::CompareFunction::Less, write_stencil),
            },
        )?;
        let outline = build(
            device,
            shaders,
            format,
            PipelineSpec {
                name: "outline",
                layouts: &[&layouts.frame, &layouts.object],
                buffers: &mesh_buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_stencil: depth_state(false, wgpu::CompareFunction::Always, mask_stencil),
            },
        )?;
        let line = build(
            device,
            shaders,
            format,
            PipelineSpec {
                name: "line",
                layouts: &[&layouts.frame],
                buffers: &line_buffers,
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_stencil: depth_state(true, wgpu::CompareFunction::Less, Default::default()),
            },
        )?;
        let skybox = build(
            device,
            shaders,
            format,
            PipelineSpec {
                name: "skybox",
                layouts: &[&layouts.frame, &layouts.cubemap],
                buffers: &[],
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                blend: wgpu::BlendState::REPLACE,
                depth_stencil: depth_state(false, wgpu::CompareFunction::Always, Default::default()),
            },
        )?;
        let widget = build(
            device,
            shaders,
            format,
            PipelineSpec {
                name: "widget",
                layouts: &[&layouts.frame, &layouts.object, &layouts.material],
                buffers: &[],
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_stencil: depth_state(false, wgpu::CompareFunction::Always, Default::default()),
            },
        )?;

        Ok(Self {
            mesh,
            outline,
            line,
            skybox,
            widget,
        })
    }
}
