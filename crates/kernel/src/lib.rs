//! Kernel: the frame clock, the world variable table, timers and the
//! application context that owns them.
//!
//! # Invariants
//! - Nothing here is process-global; every piece of state lives in an
//!   [`AppContext`] owned by the frame loop.
//! - `"tick"` is overwritten once per frame, never accumulated.
//! - Timers fire synchronously inside [`World::update`], once per frame.

mod clock;
mod context;
mod stats;
mod updateable;
mod variables;
pub mod world;

pub use clock::Clock;
pub use context::AppContext;
pub use stats::FrameStats;
pub use updateable::{UpdateCollector, Updateable};
pub use variables::{TICK, VarValue, WorldVariables};
pub use world::{Repeat, Timer, TimerId, World};
