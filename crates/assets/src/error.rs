use std::path::PathBuf;

/// Errors from asset loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to load model {path}: {source}")]
    Model {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
    #[error("model {0} contains no meshes")]
    EmptyModel(PathBuf),
    #[error("cubemap face {face} is {width}x{height}, expected {expected}x{expected}")]
    CubemapFace {
        face: usize,
        width: u32,
        height: u32,
        expected: u32,
    },
}
