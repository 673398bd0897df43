//! Translation of winit input into the game's key and button set.

use stronghold_input::{Key, MouseButton};
use winit::event::MouseButton as WinitButton;
use winit::keyboard::KeyCode;

/// Game key for a physical key code, `None` for keys the game ignores.
pub fn key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyC => Key::C,
        KeyCode::Space => Key::Space,
        KeyCode::Escape => Key::Esc,
        KeyCode::F1 => Key::F1,
        _ => return None,
    })
}

pub fn button(button: WinitButton) -> Option<MouseButton> {
    match button {
        WinitButton::Left => Some(MouseButton::Left),
        WinitButton::Right => Some(MouseButton::Right),
        WinitButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}
