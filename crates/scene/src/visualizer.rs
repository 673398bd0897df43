use glam::Vec3;
use stronghold_common::Color;
use stronghold_render::LineVertex;

/// Three colored axis segments starting at `origin`: X red, Y green, Z blue.
pub fn axis_lines(origin: Vec3, length: f32) -> Vec<LineVertex> {
    [(Vec3::X, Color::RED), (Vec3::Y, Color::GREEN), (Vec3::Z, Color::BLUE)]
        .into_iter()
        .flat_map(|(axis, color)| {
            [
                LineVertex::new(origin, color),
                LineVertex::new(origin + axis * length, color),
            ]
        })
        .collect()
}

/// World axes drawn at a fixed point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSystemVisualizer {
    pub origin: Vec3,
    pub length: f32,
    pub width: f32,
}

impl Default for CoordinateSystemVisualizer {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            length: 1000.0,
            width: 3.0,
        }
    }
}

impl CoordinateSystemVisualizer {
    pub fn lines(&self) -> Vec<LineVertex> {
        axis_lines(self.origin, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_axes() {
        let lines = CoordinateSystemVisualizer::default().lines();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1].position, Vec3::new(1000.0, 0.0, 0.0));
        assert_eq!(lines[3].color, Color::GREEN);
        assert_eq!(lines[5].position, Vec3::new(0.0, 0.0, 1000.0));
    }
}
