//! Scene model for the demo: a closed set of drawable kinds, per-entity
//! animation rules, ray picking and the debug line visualizers.
//!
//! # Invariants
//! - Iteration follows insertion order, so draw order inside a layer is
//!   the order entities were added.
//! - Entities never own textures or meshes, only handles into the
//!   `AssetStore`.

mod animation;
mod entity;
mod grid;
mod raycast;
mod scene;
mod visualizer;

pub use animation::Animation;
pub use entity::{Drawable, Entity};
pub use grid::GridStyle;
pub use raycast::RayCast;
pub use scene::Scene;
pub use visualizer::{CoordinateSystemVisualizer, axis_lines};
