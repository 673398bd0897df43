//! Input: declarative keyboard/mouse bindings that turn raw window events
//! into typed [`Action`] commands.
//!
//! # Invariants
//! - Bindings never capture game state; they only name the command to emit.
//! - A non-repeatable binding emits at most once per discrete press.
//! - A repeatable binding emits once per frame while its key is held.

pub mod action;
mod binding;
mod event;
mod key;
mod map;

pub use action::Action;
pub use binding::{KeyboardInputAction, MouseInputAction};
pub use event::{EventQueue, EventSource, InputEvent};
pub use key::{Key, MouseButton};
pub use map::InputMap;
