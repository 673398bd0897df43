use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use stronghold_common::Color;

use crate::{GameError, Scenario};

/// Session configuration. Every field has a default, so a config file only
/// lists what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub assets_root: PathBuf,
    pub scenario: Scenario,
    pub clear_color: [f32; 3],
    pub camera_impulse: f32,
    pub camera_fov: f32,
    pub camera_sensitivity: [f32; 2],
    pub ray_length: f32,
    pub ray_width: f32,
    pub ray_color: [u8; 4],
    /// Interval of the frame statistics log line, in seconds.
    pub frame_report_secs: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Stronghold Royale".to_string(),
            window_width: 2000,
            window_height: 1000,
            assets_root: PathBuf::from("assets"),
            scenario: Scenario::Showcase,
            clear_color: [0.2, 0.3, 0.3],
            camera_impulse: 5.0,
            camera_fov: 120.0,
            camera_sensitivity: [3.0, 3.0],
            ray_length: 10_000.0,
            ray_width: 10.0,
            ray_color: [255, 0, 0, 255],
            frame_report_secs: 1.0,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| GameError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn clear_color(&self) -> Vec3 {
        Vec3::from(self.clear_color)
    }

    pub fn sensitivity(&self) -> Vec2 {
        Vec2::from(self.camera_sensitivity)
    }

    pub fn ray_color(&self) -> Color {
        let [r, g, b, a] = self.ray_color;
        Color::rgba(r, g, b, a)
    }

    pub fn paths(&self) -> AssetPaths {
        AssetPaths::new(&self.assets_root)
    }
}

/// Resolves the fixed asset layout under one root directory.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    root: PathBuf,
}

impl AssetPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn shaders(&self) -> PathBuf {
        self.root.join("shaders")
    }

    pub fn texture(&self, file: &str) -> PathBuf {
        self.root.join("textures").join(file)
    }

    pub fn model(&self, file: &str) -> PathBuf {
        self.root.join("models").join(file)
    }

    /// Skybox faces in +X, -X, +Y, -Y, +Z, -Z order.
    pub fn cubemap_faces(&self) -> [PathBuf; 6] {
        ["px", "nx", "py", "ny", "pz", "nz"].map(|face| self.root.join("textures").join("cubemap").join(format!("{face}.png")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo() {
        let config = GameConfig::default();
        assert_eq!((config.window_width, config.window_height), (2000, 1000));
        assert_eq!(config.title, "Stronghold Royale");
        assert_eq!(config.clear_color(), Vec3::new(0.2, 0.3, 0.3));
        assert_eq!(config.ray_color(), Color::RED);
        assert_eq!(config.scenario, Scenario::Showcase);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        std::fs::write(&path, r#"{ "scenario": "landscape", "camera_fov": 90.0 }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.scenario, Scenario::Landscape);
        assert_eq!(config.camera_fov, 90.0);
        assert_eq!(config.camera_impulse, 5.0);
    }

    #[test]
    fn missing_and_malformed_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = GameConfig::load(dir.path().join("nope.json"));
        assert!(matches!(missing, Err(GameError::ConfigIo { .. })));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(GameConfig::load(&path), Err(GameError::Config { .. })));
    }

    #[test]
    fn cubemap_faces_follow_axis_order() {
        let faces = AssetPaths::new("assets").cubemap_faces();
        let names: Vec<_> = faces
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["px.png", "nx.png", "py.png", "ny.png", "pz.png", "nz.png"]);
        assert!(faces[0].starts_with("assets/textures/cubemap"));
    }
}
