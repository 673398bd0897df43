use crate::action::Action;
use crate::binding::{KeyboardInputAction, MouseInputAction};
use crate::event::InputEvent;
use crate::key::{Key, MouseButton};
use glam::IVec2;
use std::collections::HashSet;

/// The set of bindings of one game state plus the held-key bookkeeping
/// needed to tell repeatable and one-shot bindings apart.
#[derive(Debug, Default)]
pub struct InputMap {
    keyboard: Vec<KeyboardInputAction>,
    mouse: Vec<MouseInputAction>,
    held_keys: HashSet<Key>,
    held_buttons: HashSet<MouseButton>,
    last_click: IVec2,
}

impl InputMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_key(&mut self, binding: KeyboardInputAction) {
        tracing::debug!(name = binding.name(), key = ?binding.key(), "key bound");
        self.keyboard.push(binding);
    }

    pub fn bind_mouse(&mut self, binding: MouseInputAction) {
        tracing::debug!(name = binding.name(), button = ?binding.mouse_button(), "mouse bound");
        self.mouse.push(binding);
    }

    pub fn keyboard_bindings(&self) -> &[KeyboardInputAction] {
        &self.keyboard
    }

    pub fn mouse_bindings(&self) -> &[MouseInputAction] {
        &self.mouse
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held_keys.contains(&key)
    }

    /// Forget every held key and button, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held_keys.clear();
        self.held_buttons.clear();
    }

    /// Turn one frame worth of events into actions.
    ///
    /// One-shot bindings fire in event order, on the first press only; an
    /// auto-repeated press of a key that is already down is ignored.
    /// Repeatable bindings then fire once each if their key is down or was
    /// pressed during this frame.
    pub fn collect(&mut self, events: &[InputEvent]) -> Vec<Action> {
        let mut actions = Vec::new();
        let mut pressed_keys = HashSet::new();
        let mut pressed_buttons = HashSet::new();

        for event in events {
            match *event {
                InputEvent::KeyPressed(key) => {
                    if !self.held_keys.insert(key) {
                        continue;
                    }
                    pressed_keys.insert(key);
                    actions.extend(
                        self.keyboard
                            .iter()
                            .filter(|b| b.key() == key && !b.is_repeatable())
                            .filter_map(KeyboardInputAction::action),
                    );
                }
                InputEvent::KeyReleased(key) => {
                    self.held_keys.remove(&key);
                }
                InputEvent::MouseMoved(delta) => {
                    actions.extend(
                        self.mouse
                            .iter()
                            .filter_map(MouseInputAction::move_command)
                            .map(|cmd| cmd(delta)),
                    );
                }
                InputEvent::MousePressed { button, position } => {
                    self.last_click = position;
                    if !self.held_buttons.insert(button) {
                        continue;
                    }
                    pressed_buttons.insert(button);
                    actions.extend(
                        self.mouse
                            .iter()
                            .filter(|b| b.mouse_button() == Some(button) && !b.is_repeatable())
                            .filter_map(MouseInputAction::click_command)
                            .map(|cmd| cmd(position)),
                    );
                }
                InputEvent::MouseReleased { button, .. } => {
                    self.held_buttons.remove(&button);
                }
            }
        }

        for binding in self.keyboard.iter().filter(|b| b.is_repeatable()) {
            let key = binding.key();
            if self.held_keys.contains(&key) || pressed_keys.contains(&key) {
                actions.extend(binding.action());
            }
        }

        for binding in self.mouse.iter().filter(|b| b.is_repeatable()) {
            let Some(button) = binding.mouse_button() else {
                continue;
            };
            if self.held_buttons.contains(&button) || pressed_buttons.contains(&button) {
                actions.extend(binding.click_command().map(|cmd| cmd(self.last_click)));
            }
        }

        if !actions.is_empty() {
            tracing::trace!(count = actions.len(), "input actions collected");
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> InputMap {
        let mut map = InputMap::new();
        map.bind_key(
            KeyboardInputAction::new("Move camera to right", Key::D).on_action(Action::MoveRight(5.0)),
        );
        map.bind_key(
            KeyboardInputAction::new("Exit", Key::Esc)
                .repeatable(false)
                .on_action(Action::Exit),
        );
        map.bind_mouse(MouseInputAction::new("Camera rotate").on_move(Action::RotateCamera));
        map.bind_mouse(
            MouseInputAction::new("Camera ray")
                .button(MouseButton::Left)
                .repeatable(false)
                .on_click(Action::CastRay),
        );
        map
    }

    #[test]
    fn repeatable_fires_every_frame_while_held() {
        let mut map = map();
        assert_eq!(
            map.collect(&[InputEvent::KeyPressed(Key::D)]),
            vec![Action::MoveRight(5.0)]
        );
        assert_eq!(map.collect(&[]), vec![Action::MoveRight(5.0)]);
        assert_eq!(map.collect(&[]), vec![Action::MoveRight(5.0)]);
        assert!(map.collect(&[InputEvent::KeyReleased(Key::D)]).is_empty());
        assert!(map.collect(&[]).is_empty());
    }

    #[test]
    fn tap_within_one_frame_still_fires_repeatable() {
        let mut map = map();
        let actions = map.collect(&[InputEvent::KeyPressed(Key::D), InputEvent::KeyReleased(Key::D)]);
        assert_eq!(actions, vec![Action::MoveRight(5.0)]);
    }

    #[test]
    fn one_shot_fires_once_per_press() {
        let mut map = map();
        assert_eq!(map.collect(&[InputEvent::KeyPressed(Key::Esc)]), vec![Action::Exit]);
        // Held: nothing more, even with OS auto-repeat.
        assert!(map.collect(&[]).is_empty());
        assert!(map.collect(&[InputEvent::KeyPressed(Key::Esc)]).is_empty());
        // Release and press again: a new discrete press.
        map.collect(&[InputEvent::KeyReleased(Key::Esc)]);
        assert_eq!(map.collect(&[InputEvent::KeyPressed(Key::Esc)]), vec![Action::Exit]);
    }

    #[test]
    fn mouse_move_maps_delta() {
        let mut map = map();
        let actions = map.collect(&[InputEvent::MouseMoved(IVec2::new(4, -2))]);
        assert_eq!(actions, vec![Action::RotateCamera(IVec2::new(4, -2))]);
    }

    #[test]
    fn click_is_one_shot() {
        let mut map = map();
        let press = InputEvent::MousePressed {
            button: MouseButton::Left,
            position: IVec2::new(1000, 500),
        };
        assert_eq!(map.collect(&[press]), vec![Action::CastRay(IVec2::new(1000, 500))]);
        assert!(map.collect(&[]).is_empty());
        assert!(map.collect(&[press]).is_empty());
        map.collect(&[InputEvent::MouseReleased {
            button: MouseButton::Left,
            position: IVec2::new(1000, 500),
        }]);
        assert_eq!(map.collect(&[press]).len(), 1);
    }

    #[test]
    fn unbound_events_are_ignored() {
        let mut map = map();
        assert!(map.collect(&[InputEvent::KeyPressed(Key::W)]).is_empty());
        assert!(map.is_held(Key::W));
        map.release_all();
        assert!(!map.is_held(Key::W));
    }
}
