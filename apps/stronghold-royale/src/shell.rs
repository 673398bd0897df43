use std::sync::Arc;

use anyhow::Context as _;
use glam::IVec2;
use stronghold_game::{FrameLoop, FrameOutcome, GameConfig, GameError, GameState};
use stronghold_input::{EventQueue, InputEvent};
use stronghold_render_wgpu::{OverlayFrame, WgpuBackend};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window, WindowId};

use crate::{keymap, overlay};

/// Raw mouse motion turns the camera only while the window has focus and
/// the debug overlay is hidden.
fn steers_camera(focused: bool, overlay_visible: bool) -> bool {
    focused && !overlay_visible
}

/// Everything that only exists once the window is up.
struct Running {
    window: Arc<Window>,
    frames: FrameLoop<WgpuBackend>,
    egui_winit: egui_winit::State,
}

/// winit application: owns the window, buffers its events for the frame
/// loop and drives one frame per redraw.
pub struct App {
    config: GameConfig,
    running: Option<Running>,
    events: EventQueue,
    cursor: IVec2,
    focused: bool,
    egui_ctx: egui::Context,
    failure: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            running: None,
            events: EventQueue::new(),
            cursor: IVec2::ZERO,
            focused: true,
            egui_ctx: egui::Context::default(),
            failure: None,
        }
    }

    /// Error that stopped the event loop, if any.
    pub fn take_failure(&mut self) -> Option<anyhow::Error> {
        self.failure.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("stopping: {error:#}");
        self.failure = Some(error);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<Running> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.window_width, self.config.window_height));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
        if let Err(e) = grabbed {
            tracing::warn!("cursor grab unavailable: {e}");
        }
        window.set_cursor_visible(false);

        let size = window.inner_size();
        let backend = WgpuBackend::new(window.clone(), size.width, size.height).map_err(GameError::from)?;

        let mut frames = FrameLoop::new(backend, GameState::new(self.config.clone()));
        frames.set_viewport(size.width.max(1), size.height.max(1));
        frames.start()?;

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        Ok(Running {
            window,
            frames,
            egui_winit,
        })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = &mut self.running else {
            return;
        };

        if running.frames.state().overlay_visible() {
            let raw_input = running.egui_winit.take_egui_input(&running.window);
            let frames = &running.frames;
            let output = self.egui_ctx.run(raw_input, |ctx| overlay::draw(ctx, frames));
            running
                .egui_winit
                .handle_platform_output(&running.window, output.platform_output);
            let primitives = self.egui_ctx.tessellate(output.shapes, output.pixels_per_point);
            running.frames.backend_mut().set_overlay(OverlayFrame {
                primitives,
                textures_delta: output.textures_delta,
                pixels_per_point: output.pixels_per_point,
            });
        }

        match running.frames.frame(&mut self.events) {
            Ok(FrameOutcome::Continue) => running.window.request_redraw(),
            Ok(FrameOutcome::Exit) => {
                tracing::info!("exiting");
                std::process::exit(0);
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(running) => {
                tracing::info!(title = %self.config.title, "window ready");
                self.running = Some(running);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(running) = &mut self.running else {
            return;
        };
        if running.frames.state().overlay_visible() {
            let response = running.egui_winit.on_window_event(&running.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => self.events.request_close(),
            WindowEvent::Resized(size) => {
                running.frames.backend_mut().resize(size.width, size.height);
                running.frames.set_viewport(size.width.max(1), size.height.max(1));
            }
            WindowEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    running.frames.state_mut().input_mut().release_all();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                if let Some(key) = keymap::key(code) {
                    self.events.push(match state {
                        ElementState::Pressed => InputEvent::KeyPressed(key),
                        ElementState::Released => InputEvent::KeyReleased(key),
                    });
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = IVec2::new(position.x as i32, position.y as i32);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = keymap::button(button) {
                    let position = self.cursor;
                    self.events.push(match state {
                        ElementState::Pressed => InputEvent::MousePressed { button, position },
                        ElementState::Released => InputEvent::MouseReleased { button, position },
                    });
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        let overlay_visible = self
            .running
            .as_ref()
            .is_some_and(|running| running.frames.state().overlay_visible());
        if !steers_camera(self.focused, overlay_visible) {
            return;
        }
        if let DeviceEvent::MouseMotion { delta } = event {
            self.events
                .push(InputEvent::MouseMoved(IVec2::new(delta.0 as i32, delta.1 as i32)));
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = &self.running {
            running.window.request_redraw();
        }
    }
}
