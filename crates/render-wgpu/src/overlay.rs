/// Tessellated egui output waiting to be painted over the next frame.
pub struct OverlayFrame {
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

impl OverlayFrame {
    /// Fold a newer frame into one that was never painted. The newer
    /// shapes win; texture uploads and frees of both frames are kept in order.
    pub fn absorb(&mut self, newer: OverlayFrame) {
        self.primitives = newer.primitives;
        self.pixels_per_point = newer.pixels_per_point;
        self.textures_delta.append(newer.textures_delta);
    }
}

/// Paints egui on top of the scene before the frame is presented.
pub struct OverlayPainter {
    renderer: egui_wgpu::Renderer,
}

impl OverlayPainter {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        Self {
            renderer: egui_wgpu::Renderer::new(device, format, None, 1, false),
        }
    }

    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        size: [u32; 2],
        frame: &OverlayFrame,
    ) {
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: size,
            pixels_per_point: frame.pixels_per_point,
        };
        for (id, delta) in &frame.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, &frame.primitives, &screen);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("overlay_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.renderer.render(&mut pass, &frame.primitives, &screen);
        }
        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
