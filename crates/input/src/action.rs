use glam::IVec2;

/// A game command produced by an input binding.
///
/// The game consumes actions, never raw input events, and applies them to
/// its own state after input has been polled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Camera impulse along its right vector.
    MoveRight(f32),
    /// Camera impulse along its forward vector.
    MoveForward(f32),
    /// Camera impulse along world up.
    MoveUp(f32),
    /// Rotate the camera by a pointer delta in pixels.
    RotateCamera(IVec2),
    /// Cast a selection ray from the camera; carries the cursor position.
    CastRay(IVec2),
    /// Show or hide the debug overlay.
    ToggleOverlay,
    /// Terminate the process.
    Exit,
}
