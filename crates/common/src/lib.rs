//! Shared types used across the Stronghold Royale workspace.

mod bounds;
mod types;

pub use bounds::Aabb;
pub use types::{Color, EntityId, Transform};
