use glam::Vec3;
use stronghold_assets::{AssetStore, CubemapId, MeshId, ShaderPack, TextureId};
use thiserror::Error;

use crate::{DrawCommand, FrameView};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("shader program `{0}` is missing")]
    MissingShader(String),
    #[error("shader program `{name}` failed to compile: {message}")]
    Shader { name: String, message: String },
    #[error("texture {0:?} is not uploaded")]
    TextureNotUploaded(TextureId),
    #[error("cubemap {0:?} is not uploaded")]
    CubemapNotUploaded(CubemapId),
    #[error("mesh {0:?} is not uploaded")]
    MeshNotUploaded(MeshId),
    #[error("draw issued outside a frame; call clear first")]
    NoFrame,
    #[error("backend used before prepare")]
    NotPrepared,
    #[error("surface error: {0}")]
    Surface(String),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("device request failed: {0}")]
    Device(String),
}

/// GPU-facing half of the frame loop.
///
/// A frame is `clear`, any number of `draw` calls, then `present`. Assets are
/// append-only, so `prepare` uploads whatever the store gained since the last
/// call and may be called every frame.
pub trait Backend {
    /// Compile shader programs on first call and upload new assets.
    fn prepare(&mut self, assets: &AssetStore, shaders: &ShaderPack) -> Result<(), RenderError>;

    /// Begin a frame cleared to `color` (linear RGB).
    fn clear(&mut self, color: Vec3) -> Result<(), RenderError>;

    fn draw(&mut self, view: &FrameView, command: &DrawCommand) -> Result<(), RenderError>;

    /// Finish the frame and show it.
    fn present(&mut self) -> Result<(), RenderError>;
}
