use crate::action::Action;
use crate::key::{Key, MouseButton};
use glam::IVec2;

/// A keyboard key bound to an [`Action`].
#[derive(Debug, Clone)]
pub struct KeyboardInputAction {
    name: String,
    key: Key,
    repeatable: bool,
    action: Option<Action>,
}

impl KeyboardInputAction {
    /// New binding; repeatable by default.
    pub fn new(name: impl Into<String>, key: Key) -> Self {
        Self {
            name: name.into(),
            key,
            repeatable: true,
            action: None,
        }
    }

    pub fn repeatable(mut self, repeatable: bool) -> Self {
        self.repeatable = repeatable;
        self
    }

    /// Command emitted while (repeatable) or when (one-shot) the key is active.
    pub fn on_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    pub fn action(&self) -> Option<Action> {
        self.action
    }
}

/// A mouse binding: pointer motion and/or a button click.
#[derive(Debug, Clone)]
pub struct MouseInputAction {
    name: String,
    button: Option<MouseButton>,
    repeatable: bool,
    on_move: Option<fn(IVec2) -> Action>,
    on_click: Option<fn(IVec2) -> Action>,
}

impl MouseInputAction {
    /// New binding without a button; repeatable by default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            button: None,
            repeatable: true,
            on_move: None,
            on_click: None,
        }
    }

    pub fn button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }

    pub fn repeatable(mut self, repeatable: bool) -> Self {
        self.repeatable = repeatable;
        self
    }

    /// Command built from the pointer delta on every motion event.
    pub fn on_move(mut self, command: fn(IVec2) -> Action) -> Self {
        self.on_move = Some(command);
        self
    }

    /// Command built from the cursor position when the button is pressed.
    pub fn on_click(mut self, command: fn(IVec2) -> Action) -> Self {
        self.on_click = Some(command);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mouse_button(&self) -> Option<MouseButton> {
        self.button
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    pub(crate) fn move_command(&self) -> Option<fn(IVec2) -> Action> {
        self.on_move
    }

    pub(crate) fn click_command(&self) -> Option<fn(IVec2) -> Action> {
        self.on_click
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_builder() {
        let ia = KeyboardInputAction::new("Exit", Key::Esc)
            .repeatable(false)
            .on_action(Action::Exit);
        assert_eq!(ia.name(), "Exit");
        assert_eq!(ia.key(), Key::Esc);
        assert!(!ia.is_repeatable());
        assert_eq!(ia.action(), Some(Action::Exit));
    }

    #[test]
    fn mouse_builder() {
        let ia = MouseInputAction::new("Camera ray")
            .button(MouseButton::Left)
            .repeatable(false)
            .on_click(Action::CastRay);
        assert_eq!(ia.mouse_button(), Some(MouseButton::Left));
        assert!(ia.move_command().is_none());
        let cmd = ia.click_command().unwrap();
        assert_eq!(cmd(IVec2::new(3, 4)), Action::CastRay(IVec2::new(3, 4)));
    }
}
