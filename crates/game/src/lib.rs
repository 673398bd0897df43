//! Stronghold Royale game layer: configuration, the two demo scenarios, the
//! game state machine and the fixed-order frame loop.
//!
//! # Invariants
//! - `GameState::on_tick` fails until `on_create` succeeded.
//! - Every frame runs the same steps in the same order (see [`FrameLoop`]).
//! - Errors are never recovered inside the loop; they surface to the caller.

mod config;
mod error;
mod fatal;
mod frame;
mod scenario;
mod state;

#[cfg(test)]
mod fixtures;

pub use config::{AssetPaths, GameConfig};
pub use error::GameError;
pub use fatal::{FatalReport, FatalTier, classify, panic_report};
pub use frame::{FrameLoop, FrameOutcome};
pub use scenario::Scenario;
pub use state::GameState;
