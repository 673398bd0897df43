//! Rendering adapter: everything about drawing a frame that does not depend on
//! a particular GPU API.
//!
//! # Invariants
//! - Backends never mutate scene state; they consume [`DrawCommand`]s.
//! - A backend refuses to draw an asset it has not uploaded in `prepare`.
//! - Draw commands are executed in [`DrawLayer`] order, stable within a layer.

mod backend;
mod camera;
mod draw;
mod lighting;
mod recording;
mod view;

pub use backend::{Backend, RenderError};
pub use camera::Camera;
pub use draw::{DrawCommand, DrawLayer, DrawList, LineVertex, MeshDraw};
pub use lighting::{AmbientLight, Lighting, SpecularLight};
pub use recording::{BackendCall, RecordingBackend};
pub use view::FrameView;
