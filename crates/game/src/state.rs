use std::time::Duration;

use glam::{UVec2, Vec3};
use stronghold_assets::{AssetStore, ShaderPack};
use stronghold_input::{Action, InputMap, Key, KeyboardInputAction, MouseButton, MouseInputAction};
use stronghold_render::{Camera, DrawList, FrameView, Lighting};
use stronghold_scene::{RayCast, Scene};

use crate::frame::FrameOutcome;
use crate::scenario::Setup;
use crate::{GameConfig, GameError};

/// The single game state of the demo.
///
/// Starts uninitialized; [`on_create`](Self::on_create) loads everything the
/// configured scenario needs, after which [`on_tick`](Self::on_tick) yields
/// one draw list per frame.
#[derive(Debug)]
pub struct GameState {
    config: GameConfig,
    camera: Camera,
    lighting: Lighting,
    assets: AssetStore,
    shaders: ShaderPack,
    scene: Scene,
    input: InputMap,
    overlay_visible: bool,
    ready: bool,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        let mut camera = Camera::new();
        camera.set_viewport(config.window_width, config.window_height);
        Self {
            config,
            camera,
            lighting: Lighting::default(),
            assets: AssetStore::new(),
            shaders: ShaderPack::new(),
            scene: Scene::new(),
            input: InputMap::new(),
            overlay_visible: false,
            ready: false,
        }
    }

    /// Uninitialized → ready: camera, shaders, bindings and scenario content.
    /// Calling it again once ready does nothing.
    pub fn on_create(&mut self) -> Result<(), GameError> {
        if self.ready {
            tracing::warn!("on_create called on a ready game state, ignoring");
            return Ok(());
        }
        let paths = self.config.paths();
        tracing::info!(scenario = %self.config.scenario, root = %paths.root().display(), "creating game state");

        self.camera.set_sensitivity(self.config.sensitivity());
        self.camera.set_fov(self.config.camera_fov);
        self.shaders = ShaderPack::load_standard(paths.shaders())?;
        self.bind_input();

        self.config.scenario.build(Setup {
            paths: &paths,
            assets: &mut self.assets,
            scene: &mut self.scene,
            lighting: &mut self.lighting,
            camera: &mut self.camera,
        })?;

        self.ready = true;
        Ok(())
    }

    fn bind_input(&mut self) {
        let impulse = self.config.camera_impulse;
        let moves = [
            ("Move right", Key::D, Action::MoveRight(impulse)),
            ("Move left", Key::A, Action::MoveRight(-impulse)),
            ("Move forward", Key::W, Action::MoveForward(impulse)),
            ("Move backward", Key::S, Action::MoveForward(-impulse)),
            ("Move up", Key::Space, Action::MoveUp(impulse)),
            ("Move down", Key::C, Action::MoveUp(-impulse)),
        ];
        for (name, key, action) in moves {
            self.input.bind_key(KeyboardInputAction::new(name, key).on_action(action));
        }
        self.input.bind_key(
            KeyboardInputAction::new("Exit", Key::Esc)
                .repeatable(false)
                .on_action(Action::Exit),
        );
        self.input.bind_key(
            KeyboardInputAction::new("Overlay", Key::F1)
                .repeatable(false)
                .on_action(Action::ToggleOverlay),
        );
        self.input
            .bind_mouse(MouseInputAction::new("Camera rotate").on_move(Action::RotateCamera));
        self.input.bind_mouse(
            MouseInputAction::new("Camera ray")
                .button(MouseButton::Left)
                .repeatable(false)
                .on_click(Action::CastRay),
        );
    }

    /// Ready → ready: this frame's draw commands.
    pub fn on_tick(&self) -> Result<DrawList, GameError> {
        if !self.ready {
            return Err(GameError::NotReady);
        }
        Ok(self.scene.draw_list(&self.assets))
    }

    /// Advance animations and camera motion by one frame.
    pub fn update(&mut self, dt: Duration, elapsed: Duration) {
        self.scene.animate(elapsed);
        self.camera.update(dt.as_secs_f32());
    }

    /// Apply one input command.
    pub fn apply(&mut self, action: Action) -> FrameOutcome {
        match action {
            Action::MoveRight(amount) => self.camera.add_impulse_right(amount),
            Action::MoveForward(amount) => self.camera.add_impulse_forward(amount),
            Action::MoveUp(amount) => self.camera.add_impulse_up(amount),
            Action::RotateCamera(delta) => self.camera.rotate(delta.as_vec2()),
            Action::CastRay(_) => self.cast_ray(),
            Action::ToggleOverlay => {
                self.overlay_visible = !self.overlay_visible;
                tracing::debug!(visible = self.overlay_visible, "overlay toggled");
            }
            Action::Exit => {
                tracing::info!("exit requested");
                return FrameOutcome::Exit;
            }
        }
        FrameOutcome::Continue
    }

    fn cast_ray(&mut self) {
        let (start, end) = self.camera.ray(self.config.ray_length);
        let mut ray = RayCast::new();
        ray.set_start_and_end_point(start, end);
        ray.set_width(self.config.ray_width);
        ray.set_color(self.config.ray_color());

        match ray.find_intersects(&self.scene) {
            Some(id) => {
                self.scene.toggle_selection(id);
            }
            None => tracing::debug!(?start, ?end, "ray missed"),
        }
        self.scene.set_last_ray(ray);
    }

    /// Camera and lighting snapshot for the backend.
    pub fn frame_view(&self, viewport: UVec2) -> FrameView {
        FrameView::new(&self.camera, self.lighting, viewport)
    }

    pub fn clear_color(&self) -> Vec3 {
        self.config.clear_color()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetStore {
        &mut self.assets
    }

    pub fn shaders(&self) -> &ShaderPack {
        &self.shaders
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn input(&self) -> &InputMap {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputMap {
        &mut self.input
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scenario;
    use crate::fixtures::AssetTree;
    use stronghold_render::DrawCommand;

    fn created(scenario: Scenario) -> (AssetTree, GameState) {
        let tree = AssetTree::new();
        let mut state = GameState::new(tree.config(scenario));
        state.on_create().unwrap();
        (tree, state)
    }

    #[test]
    fn tick_before_create_is_an_error() {
        let state = GameState::new(GameConfig::default());
        assert!(matches!(state.on_tick(), Err(GameError::NotReady)));
    }

    #[test]
    fn create_fails_without_shaders() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig {
            assets_root: dir.path().to_path_buf(),
            ..GameConfig::default()
        };
        let mut state = GameState::new(config);
        assert!(matches!(state.on_create(), Err(GameError::Asset(_))));
        assert!(!state.is_ready());
    }

    #[test]
    fn showcase_builds_the_demo_scene() {
        let (_tree, state) = created(Scenario::Showcase);
        let scene = state.scene();
        for name in ["grid", "cube", "cube1", "cube2", "cube3", "sun", "loading", "rock"] {
            assert!(scene.find(name).is_some(), "missing {name}");
        }
        assert!(scene.visualizer().is_some());
        assert_eq!(state.lighting().specular.position, Vec3::new(1000.0, 0.0, 0.0));
        assert_eq!(state.camera().position(), Vec3::new(1000.0, 0.0, 1000.0));
        assert_eq!(state.camera().fov(), 120.0);
        assert_eq!(state.input().keyboard_bindings().len(), 8);
        assert_eq!(state.input().mouse_bindings().len(), 2);

        let list = state.on_tick().unwrap();
        assert!(list.iter().any(|(_, c)| matches!(c, DrawCommand::Widget { .. })));
        assert!(list.iter().any(|(_, c)| matches!(c, DrawCommand::Lines { .. })));
    }

    #[test]
    fn second_create_does_not_duplicate_content() {
        let (_tree, mut state) = created(Scenario::Showcase);
        let entities = state.scene().len();
        state.on_create().unwrap();
        assert_eq!(state.input().keyboard_bindings().len(), 8);
        assert_eq!(state.input().mouse_bindings().len(), 2);
        assert_eq!(state.scene().len(), entities);
    }

    #[test]
    fn landscape_starts_with_the_skybox() {
        let (_tree, state) = created(Scenario::Landscape);
        assert_eq!(state.camera().position(), Vec3::new(100.0, 100.0, 100.0));
        let list = state.on_tick().unwrap();
        let first = list.iter().next().map(|(_, c)| c.kind());
        assert_eq!(first, Some("skybox"));
    }

    #[test]
    fn opposite_impulses_cancel() {
        let (_tree, mut state) = created(Scenario::Empty);
        let before = state.camera().position();
        state.apply(Action::MoveRight(5.0));
        state.apply(Action::MoveRight(-5.0));
        state.update(Duration::from_millis(16), Duration::ZERO);
        assert_eq!(state.camera().position(), before);
    }

    #[test]
    fn ray_toggles_the_cube_in_front_of_the_camera() {
        let (_tree, mut state) = created(Scenario::Empty);
        let id = state
            .scene_mut()
            .add(stronghold_scene::Entity::cube("target").with_position(Vec3::new(-50.0, -50.0, -500.0)));
        state.camera_mut().set_position(Vec3::ZERO);

        assert_eq!(state.apply(Action::CastRay(glam::IVec2::ZERO)), FrameOutcome::Continue);
        assert!(state.scene().get(id).unwrap().is_outlined());
        assert!(state.scene().last_ray().is_some());

        state.apply(Action::CastRay(glam::IVec2::ZERO));
        assert!(!state.scene().get(id).unwrap().is_outlined());
    }

    #[test]
    fn exit_and_overlay_actions() {
        let mut state = GameState::new(GameConfig::default());
        assert_eq!(state.apply(Action::Exit), FrameOutcome::Exit);
        state.apply(Action::ToggleOverlay);
        assert!(state.overlay_visible());
    }
}
