//! Asset pipeline: decodes images, loads OBJ model packs and cubemaps, reads
//! shader sources, and hands out handles.
//!
//! The renderer consumes assets by handle, never by raw file paths. Stores are
//! append-only, so a backend can upload everything past the last id it saw.

mod error;
mod image_data;
mod mesh;
mod model;
mod shader;
mod store;
mod texture;

pub use error::AssetError;
pub use image_data::{ImageData, TextureChannel};
pub use mesh::{MeshData, MeshVertex};
pub use model::{ModelEntry, ModelPack};
pub use shader::{PROGRAMS, ShaderPack, ShaderSource};
pub use store::{AssetStore, CUBE_SIZE, CubemapAsset, CubemapId, MeshAsset, MeshId, TRIANGLE_SIZE, TextureAsset, TextureId};
pub use texture::{Filter, TextureDesc, Wrap};
