use std::path::PathBuf;

use stronghold_assets::AssetError;
use stronghold_render::RenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("game state ticked before on_create")]
    NotReady,
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("setting `{name}` has an unusable value {value}")]
    InvalidSetting { name: &'static str, value: String },
    #[error("unknown scenario `{0}`")]
    UnknownScenario(String),
}
