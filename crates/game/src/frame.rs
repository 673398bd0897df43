use std::time::{Duration, Instant};

use glam::UVec2;
use stronghold_input::EventSource;
use stronghold_kernel::{AppContext, Clock, Repeat, Timer, TimerId};
use stronghold_render::Backend;

use crate::{GameError, GameState};

/// What the shell should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// Terminate the process immediately.
    Exit,
}

/// Drives one [`GameState`] against one [`Backend`].
///
/// Each [`frame`](Self::frame) runs, in order: start the clock, upload new
/// assets, clear, advance animations and the camera, draw the tick's
/// commands, fire due timers, poll input and apply actions, present, run
/// the updateables, then store the frame time as `"tick"`.
pub struct FrameLoop<B: Backend> {
    backend: B,
    state: GameState,
    context: AppContext,
    clock: Clock,
    viewport: UVec2,
    session: Option<Instant>,
    report_timer: Option<TimerId>,
}

impl<B: Backend> FrameLoop<B> {
    pub fn new(backend: B, state: GameState) -> Self {
        let viewport = UVec2::new(state.config().window_width, state.config().window_height);
        Self {
            backend,
            state,
            context: AppContext::new(),
            clock: Clock::new(),
            viewport,
            session: None,
            report_timer: None,
        }
    }

    /// Create the game state and upload its assets.
    pub fn start(&mut self) -> Result<(), GameError> {
        let report_secs = self.state.config().frame_report_secs;
        let every = Duration::try_from_secs_f64(report_secs.max(0.001))
            .map_err(|_| GameError::InvalidSetting {
                name: "frame_report_secs",
                value: report_secs.to_string(),
            })?;

        self.state.on_create()?;
        self.backend.prepare(self.state.assets(), self.state.shaders())?;

        self.report_timer = Some(
            self.context
                .world
                .add_timer(Timer::new("frame report", every, Repeat::Infinity)),
        );
        self.session = Some(Instant::now());
        tracing::info!(viewport = ?self.viewport, "frame loop started");
        Ok(())
    }

    pub fn frame(&mut self, events: &mut dyn EventSource) -> Result<FrameOutcome, GameError> {
        if !self.state.is_ready() {
            return Err(GameError::NotReady);
        }
        self.clock.start();

        self.backend.prepare(self.state.assets(), self.state.shaders())?;
        self.backend.clear(self.state.clear_color())?;

        let dt = Duration::from_secs_f64(self.context.variables.tick());
        let elapsed = self.session.map(|s| s.elapsed()).unwrap_or_default();
        self.state.update(dt, elapsed);

        let list = self.state.on_tick()?;
        let view = self.state.frame_view(self.viewport);
        for (_, command) in list.iter() {
            self.backend.draw(&view, command)?;
        }

        for id in self.context.world.update(dt) {
            if Some(id) == self.report_timer {
                self.report();
            }
        }

        let polled = events.poll();
        if events.close_requested() {
            tracing::info!("window close requested");
            return Ok(FrameOutcome::Exit);
        }
        for action in self.state.input_mut().collect(&polled) {
            if self.state.apply(action) == FrameOutcome::Exit {
                return Ok(FrameOutcome::Exit);
            }
        }

        self.backend.present()?;
        self.context.updateables.update_all(&self.context.variables);

        let tick = self.clock.stop();
        self.context.variables.set_tick(tick);
        self.context.stats.record(tick);
        Ok(FrameOutcome::Continue)
    }

    fn report(&self) {
        let stats = &self.context.stats;
        tracing::info!(
            fps = stats.fps(),
            avg_ms = stats.average().as_secs_f64() * 1000.0,
            max_ms = stats.max().as_secs_f64() * 1000.0,
            "frame stats"
        );
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = UVec2::new(width, height);
        self.state.camera_mut().set_viewport(width, height);
    }

    pub fn viewport(&self) -> UVec2 {
        self.viewport
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.context
    }
}
