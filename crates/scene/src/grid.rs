use glam::Vec3;
use stronghold_common::Color;
use stronghold_render::LineVertex;

/// Floor grid on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    pub color: Color,
    /// Requested line width in pixels.
    pub width: f32,
    /// Half extent along X and Z.
    pub size: f32,
    pub spacing: f32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            color: Color::rgba(44, 44, 44, 97),
            width: 2.0,
            size: 10_000.0,
            spacing: 100.0,
        }
    }
}

impl GridStyle {
    pub fn lines(&self) -> Vec<LineVertex> {
        if self.size <= 0.0 || self.spacing <= 0.0 {
            return Vec::new();
        }
        let steps = (self.size / self.spacing).floor() as i32;
        let mut out = Vec::with_capacity(((2 * steps + 1) * 4) as usize);
        for i in -steps..=steps {
            let k = i as f32 * self.spacing;
            out.push(LineVertex::new(Vec3::new(k, 0.0, -self.size), self.color));
            out.push(LineVertex::new(Vec3::new(k, 0.0, self.size), self.color));
            out.push(LineVertex::new(Vec3::new(-self.size, 0.0, k), self.color));
            out.push(LineVertex::new(Vec3::new(self.size, 0.0, k), self.color));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_count_covers_both_axes() {
        let style = GridStyle {
            size: 200.0,
            spacing: 100.0,
            ..GridStyle::default()
        };
        // five lines per axis, two vertices each
        assert_eq!(style.lines().len(), 5 * 2 * 2);
        assert!(style.lines().iter().all(|v| v.position.y == 0.0));
    }

    #[test]
    fn degenerate_grid_is_empty() {
        let style = GridStyle {
            spacing: 0.0,
            ..GridStyle::default()
        };
        assert!(style.lines().is_empty());
    }
}
