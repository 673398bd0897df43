use crate::key::{Key, MouseButton};
use glam::IVec2;
use std::collections::VecDeque;

/// A raw input event as delivered by the window shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPressed(Key),
    KeyReleased(Key),
    /// Relative pointer motion since the previous event.
    MouseMoved(IVec2),
    MousePressed { button: MouseButton, position: IVec2 },
    MouseReleased { button: MouseButton, position: IVec2 },
}

/// Non-blocking source of input events, polled once per frame.
pub trait EventSource {
    /// Drain every event received since the previous poll.
    fn poll(&mut self) -> Vec<InputEvent>;

    /// Whether the window asked to close.
    fn close_requested(&self) -> bool {
        false
    }
}

/// FIFO buffer the window shell pushes into between frames.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<InputEvent>,
    close_requested: bool,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSource for EventQueue {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }

    fn close_requested(&self) -> bool {
        self.close_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_drains_in_order() {
        let mut q = EventQueue::new();
        q.push(InputEvent::KeyPressed(Key::W));
        q.push(InputEvent::KeyReleased(Key::W));
        assert_eq!(q.len(), 2);

        let events = q.poll();
        assert_eq!(
            events,
            vec![InputEvent::KeyPressed(Key::W), InputEvent::KeyReleased(Key::W)]
        );
        assert!(q.is_empty());
        assert!(q.poll().is_empty());
    }

    #[test]
    fn close_request_is_sticky() {
        let mut q = EventQueue::new();
        assert!(!q.close_requested());
        q.request_close();
        q.poll();
        assert!(q.close_requested());
    }
}
