//! wgpu implementation of the render [`Backend`](stronghold_render::Backend).
//!
//! Five pipelines cover every draw command: lit meshes, stencil-masked
//! outlines, debug lines, the cubemap skybox and screen-space widgets. An
//! optional egui overlay is painted last.
//!
//! # Invariants
//! - Pipelines are built from the `ShaderPack` on the first `prepare`.
//! - Assets are uploaded in store order, so GPU indices equal asset handles.
//! - The backend never mutates scene state.

mod gpu;
mod overlay;
mod pipelines;
mod resources;
mod uniforms;

pub use gpu::WgpuBackend;
pub use overlay::OverlayFrame;
