use std::collections::HashMap;
use std::ops::Range;

use glam::Vec3;
use stronghold_assets::{AssetStore, ImageData, ShaderPack, TextureChannel, TextureDesc, TextureId};
use stronghold_render::{Backend, DrawCommand, FrameView, RenderError};
use wgpu::util::DeviceExt;

use crate::overlay::{OverlayFrame, OverlayPainter};
use crate::pipelines::{Layouts, Pipelines};
use crate::resources::{self, GpuCubemap, GpuMesh, GpuTexture};
use crate::uniforms::{FrameUniforms, GpuLineVertex, OBJECT_STRIDE, ObjectUniforms, pack_objects};

const INITIAL_OBJECTS: u64 = 256;

/// Diffuse and specular texture pair; `None` selects the fallback texture.
type MaterialKey = (Option<TextureId>, Option<TextureId>);

enum DrawOp {
    Skybox { cubemap: usize },
    Mesh { mesh: usize, object: u32, material: MaterialKey, stencil: u32 },
    Outline { mesh: usize, object: u32 },
    Lines { range: Range<u32> },
    Widget { object: u32, material: MaterialKey },
}

#[derive(Default)]
struct PendingFrame {
    clear: wgpu::Color,
    frame: FrameUniforms,
    objects: Vec<ObjectUniforms>,
    lines: Vec<GpuLineVertex>,
    ops: Vec<DrawOp>,
}

/// [`Backend`] drawing into a window surface with wgpu.
///
/// Draw calls are recorded on the CPU and replayed in one render pass at
/// `present`, followed by the egui overlay when one is queued.
pub struct WgpuBackend {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: wgpu::TextureView,
    layouts: Layouts,
    pipelines: Option<Pipelines>,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    object_capacity: u64,
    white: GpuTexture,
    black: GpuTexture,
    textures: Vec<GpuTexture>,
    cubemaps: Vec<GpuCubemap>,
    meshes: Vec<GpuMesh>,
    materials: HashMap<MaterialKey, wgpu::BindGroup>,
    pending: Option<PendingFrame>,
    overlay: OverlayPainter,
    overlay_frame: Option<OverlayFrame>,
}

impl WgpuBackend {
    /// Create a device for `target` and configure its surface.
    pub fn new(target: impl Into<wgpu::SurfaceTarget<'static>>, width: u32, height: u32) -> Result<Self, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(target)
            .map_err(|e| RenderError::Surface(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("stronghold_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| RenderError::Device(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or_else(|| RenderError::Surface("surface reports no formats".into()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            adapter = %adapter.get_info().name,
            ?format,
            "GPU initialized"
        );

        let layouts = Layouts::new(&device);
        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frame_uniforms"),
            contents: bytemuck::bytes_of(&FrameUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bind_group"),
            layout: &layouts.frame,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });
        let (object_buffer, object_bind_group) = Self::create_object_buffer(&device, &layouts, INITIAL_OBJECTS);

        let fallback = TextureDesc::new(TextureChannel::Rgba);
        let white = resources::upload_image(&device, &queue, "fallback_white", &ImageData::solid(1, 1, [255; 4]), &fallback);
        let black = resources::upload_image(&device, &queue, "fallback_black", &ImageData::solid(1, 1, [0, 0, 0, 255]), &fallback);
        let depth = resources::create_depth_texture(&device, config.width, config.height);
        let overlay = OverlayPainter::new(&device, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            layouts,
            pipelines: None,
            frame_buffer,
            frame_bind_group,
            object_buffer,
            object_bind_group,
            object_capacity: INITIAL_OBJECTS,
            white,
            black,
            textures: Vec::new(),
            cubemaps: Vec::new(),
            meshes: Vec::new(),
            materials: HashMap::new(),
            pending: None,
            overlay,
            overlay_frame: None,
        })
    }

    fn create_object_buffer(device: &wgpu::Device, layouts: &Layouts, capacity: u64) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object_uniforms"),
            size: capacity * OBJECT_STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bind_group"),
            layout: &layouts.object,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniforms>() as u64),
                }),
            }],
        });
        (buffer, bind_group)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.depth = resources::create_depth_texture(&self.device, self.config.width, self.config.height);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Queue egui output to be painted over the next presented frame.
    pub fn set_overlay(&mut self, frame: OverlayFrame) {
        match &mut self.overlay_frame {
            Some(pending) => pending.absorb(frame),
            None => self.overlay_frame = Some(frame),
        }
    }

    fn check_texture(&self, id: Option<TextureId>) -> Result<(), RenderError> {
        match id {
            Some(id) if id.0 as usize >= self.textures.len() => Err(RenderError::TextureNotUploaded(id)),
            _ => Ok(()),
        }
    }

    fn ensure_material(&mut self, key: MaterialKey) -> Result<(), RenderError> {
        if self.materials.contains_key(&key) {
            return Ok(());
        }
        self.check_texture(key.0)?;
        self.check_texture(key.1)?;
        let diffuse = key.0.map(|id| &self.textures[id.0 as usize]).unwrap_or(&self.white);
        let specular = key.1.map(|id| &self.textures[id.0 as usize]).unwrap_or(&self.black);
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("material_bind_group"),
            layout: &self.layouts.material,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&diffuse.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&diffuse.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&specular.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&specular.sampler),
                },
            ],
        });
        self.materials.insert(key, bind_group);
        Ok(())
    }

    fn mesh_index(&self, id: stronghold_assets::MeshId) -> Result<usize, RenderError> {
        let index = id.0 as usize;
        if index < self.meshes.len() {
            Ok(index)
        } else {
            Err(RenderError::MeshNotUploaded(id))
        }
    }
}

impl Backend for WgpuBackend {
    fn prepare(&mut self, assets: &AssetStore, shaders: &ShaderPack) -> Result<(), RenderError> {
        if self.pipelines.is_none() {
            self.pipelines = Some(Pipelines::new(&self.device, shaders, &self.layouts, self.config.format)?);
        }
        for asset in &assets.textures()[self.textures.len().min(assets.textures().len())..] {
            let texture = resources::upload_texture(&self.device, &self.queue, asset);
            self.textures.push(texture);
        }
        for asset in &assets.cubemaps()[self.cubemaps.len().min(assets.cubemaps().len())..] {
            let cubemap = resources::upload_cubemap(&self.device, &self.queue, &self.layouts.cubemap, asset);
            self.cubemaps.push(cubemap);
        }
        for asset in &assets.meshes()[self.meshes.len().min(assets.meshes().len())..] {
            let mesh = resources::upload_mesh(&self.device, asset);
            self.meshes.push(mesh);
        }
        Ok(())
    }

    fn clear(&mut self, color: Vec3) -> Result<(), RenderError> {
        self.pending = Some(PendingFrame {
            clear: wgpu::Color {
                r: color.x as f64,
                g: color.y as f64,
                b: color.z as f64,
                a: 1.0,
            },
            ..Default::default()
        });
        Ok(())
    }

    fn draw(&mut self, view: &FrameView, command: &DrawCommand) -> Result<(), RenderError> {
        if self.pending.is_none() {
            return Err(RenderError::NoFrame);
        }

        let op = match command {
            DrawCommand::Skybox { cubemap } => {
                let index = cubemap.0 as usize;
                if index >= self.cubemaps.len() {
                    return Err(RenderError::CubemapNotUploaded(*cubemap));
                }
                Some((DrawOp::Skybox { cubemap: index }, None, None))
            }
            DrawCommand::Mesh(draw) => {
                let mesh = self.mesh_index(draw.mesh)?;
                let material = (draw.texture, draw.specular);
                self.ensure_material(material)?;
                let op = DrawOp::Mesh {
                    mesh,
                    object: 0,
                    material,
                    stencil: u32::from(draw.stencil),
                };
                Some((op, Some(ObjectUniforms::mesh(draw)), None))
            }
            DrawCommand::Outline { mesh, model, color } => {
                let mesh = self.mesh_index(*mesh)?;
                Some((DrawOp::Outline { mesh, object: 0 }, Some(ObjectUniforms::flat(*model, *color)), None))
            }
            DrawCommand::Lines { vertices, .. } if vertices.len() >= 2 => {
                let lines: Vec<GpuLineVertex> = vertices.iter().map(GpuLineVertex::from).collect();
                Some((DrawOp::Lines { range: 0..0 }, None, Some(lines)))
            }
            DrawCommand::Lines { .. } => None,
            DrawCommand::Widget { texture, model } => {
                let material = (Some(*texture), None);
                self.ensure_material(material)?;
                let object = ObjectUniforms::flat(*model, stronghold_common::Color::WHITE);
                Some((DrawOp::Widget { object: 0, material }, Some(object), None))
            }
        };

        let Some(pending) = self.pending.as_mut() else {
            return Err(RenderError::NoFrame);
        };
        pending.frame = FrameUniforms::from_view(view);
        let Some((mut op, object, lines)) = op else {
            return Ok(());
        };

        if let Some(uniforms) = object {
            let slot = pending.objects.len() as u32;
            pending.objects.push(uniforms);
            match &mut op {
                DrawOp::Mesh { object, .. } | DrawOp::Outline { object, .. } | DrawOp::Widget { object, .. } => {
                    *object = slot;
                }
                _ => {}
            }
        }
        if let (Some(lines), DrawOp::Lines { range }) = (lines, &mut op) {
            let start = pending.lines.len() as u32;
            pending.lines.extend(lines);
            *range = start..pending.lines.len() as u32;
        }
        pending.ops.push(op);
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        let pending = self.pending.take().ok_or(RenderError::NoFrame)?;
        let Some(pipelines) = self.pipelines.as_ref() else {
            return Err(RenderError::NotPrepared);
        };

        let output = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost, reconfiguring and skipping frame");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("surface timeout, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(RenderError::Surface(e.to_string())),
        };
        let target = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&pending.frame));

        let needed = pending.objects.len() as u64;
        if needed > self.object_capacity {
            let capacity = needed.next_power_of_two();
            let (buffer, bind_group) = Self::create_object_buffer(&self.device, &self.layouts, capacity);
            self.object_buffer = buffer;
            self.object_bind_group = bind_group;
            self.object_capacity = capacity;
            tracing::debug!(capacity, "object uniform buffer grown");
        }
        if !pending.objects.is_empty() {
            self.queue
                .write_buffer(&self.object_buffer, 0, &pack_objects(&pending.objects));
        }
        let line_buffer = (!pending.lines.is_empty()).then(|| {
            self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("line_vertices"),
                contents: bytemuck::cast_slice(&pending.lines),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(pending.clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(0),
                        store: wgpu::StoreOp::Store,
                    }),
                }),
                ..Default::default()
            });
            pass.set_bind_group(0, &self.frame_bind_group, &[]);

            for op in &pending.ops {
                match op {
                    DrawOp::Skybox { cubemap } => {
                        pass.set_pipeline(&pipelines.skybox);
                        pass.set_bind_group(1, &self.cubemaps[*cubemap].bind_group, &[]);
                        pass.draw(0..3, 0..1);
                    }
                    DrawOp::Mesh {
                        mesh,
                        object,
                        material,
                        stencil,
                    } => {
                        let Some(material) = self.materials.get(material) else {
                            continue;
                        };
                        let mesh = &self.meshes[*mesh];
                        pass.set_pipeline(&pipelines.mesh);
                        pass.set_stencil_reference(*stencil);
                        pass.set_bind_group(1, &self.object_bind_group, &[object * OBJECT_STRIDE as u32]);
                        pass.set_bind_group(2, material, &[]);
                        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                    }
                    DrawOp::Outline { mesh, object } => {
                        let mesh = &self.meshes[*mesh];
                        pass.set_pipeline(&pipelines.outline);
                        pass.set_stencil_reference(1);
                        pass.set_bind_group(1, &self.object_bind_group, &[object * OBJECT_STRIDE as u32]);
                        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                    }
                    DrawOp::Lines { range } => {
                        let Some(buffer) = &line_buffer else {
                            continue;
                        };
                        pass.set_pipeline(&pipelines.line);
                        pass.set_vertex_buffer(0, buffer.slice(..));
                        pass.draw(range.clone(), 0..1);
                    }
                    DrawOp::Widget { object, material } => {
                        let Some(material) = self.materials.get(material) else {
                            continue;
                        };
                        pass.set_pipeline(&pipelines.widget);
                        pass.set_bind_group(1, &self.object_bind_group, &[object * OBJECT_STRIDE as u32]);
                        pass.set_bind_group(2, material, &[]);
                        pass.draw(0..6, 0..1);
                    }
                }
            }
        }

        if let Some(frame) = self.overlay_frame.take() {
            let size = [self.config.width, self.config.height];
            self.overlay
                .paint(&self.device, &self.queue, &mut encoder, &target, size, &frame);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
