use glam::Vec3;
use stronghold_common::{Color, EntityId};
use stronghold_render::LineVertex;

use crate::Scene;

/// A picking segment, also drawn as a debug line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCast {
    start: Vec3,
    end: Vec3,
    width: f32,
    color: Color,
}

impl Default for RayCast {
    fn default() -> Self {
        Self {
            start: Vec3::ZERO,
            end: Vec3::ZERO,
            width: 1.0,
            color: Color::WHITE,
        }
    }
}

impl RayCast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_start_and_end_point(&mut self, start: Vec3, end: Vec3) {
        self.start = start;
        self.end = end;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn end(&self) -> Vec3 {
        self.end
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Nearest pickable entity crossed by the segment.
    ///
    /// The segment is moved into each entity's local space and tested
    /// against its local bounds, so rotated and scaled entities pick
    /// correctly. The segment parameter is preserved by affine maps, which
    /// makes hits from different entities comparable.
    pub fn find_intersects(&self, scene: &Scene) -> Option<EntityId> {
        let mut nearest: Option<(f32, EntityId)> = None;
        for (id, entity) in scene.iter() {
            let Some(bounds) = entity.drawable.local_bounds() else {
                continue;
            };
            let model = entity.model_matrix();
            if model.determinant() == 0.0 {
                continue;
            }
            let inverse = model.inverse();
            if !inverse.is_finite() {
                continue;
            }
            let local_start = inverse.transform_point3(self.start);
            let local_end = inverse.transform_point3(self.end);
            if let Some(t) = bounds.intersect_segment(local_start, local_end) {
                if nearest.is_none_or(|(best, _)| t < best) {
                    nearest = Some((t, id));
                }
            }
        }
        if let Some((t, id)) = nearest {
            tracing::debug!(entity = %id.short(), t, "ray hit");
        }
        nearest.map(|(_, id)| id)
    }

    pub fn lines(&self) -> Vec<LineVertex> {
        vec![
            LineVertex::new(self.start, self.color),
            LineVertex::new(self.end, self.color),
        ]
    }
}
