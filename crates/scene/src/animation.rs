use glam::{Quat, Vec3};
use std::time::Duration;
use stronghold_common::Transform;

/// Per-entity rule applied once per frame before drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animation {
    /// Rotate by these degrees around local X, Y and Z every frame.
    Spin { degrees: Vec3 },
    /// Uniform scale `sin(elapsed_ms / period_ms) * amplitude + base`.
    Pulse { amplitude: f32, base: f32, period_ms: f32 },
    /// Turn a screen-space widget by `degrees` per frame.
    Rotate2D { degrees: f32 },
}

impl Animation {
    /// Advance `transform`. `elapsed` is the session time since setup.
    pub fn apply(&self, transform: &mut Transform, elapsed: Duration) {
        match *self {
            Self::Spin { degrees } => {
                transform.rotate_x(degrees.x);
                transform.rotate_y(degrees.y);
                transform.rotate_z(degrees.z);
            }
            Self::Pulse {
                amplitude,
                base,
                period_ms,
            } => {
                let ms = elapsed.as_secs_f32() * 1000.0;
                let phase = if period_ms > 0.0 { ms / period_ms } else { 0.0 };
                transform.scale = Vec3::splat(phase.sin() * amplitude + base);
            }
            Self::Rotate2D { degrees } => {
                transform.rotation *= Quat::from_rotation_z(degrees.to_radians());
            }
        }
    }
}
