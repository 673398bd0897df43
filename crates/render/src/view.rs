use glam::{Mat4, UVec2, Vec3};

use crate::{Camera, Lighting};

/// Per-frame constants shared by every draw command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
    pub viewport: UVec2,
    pub lighting: Lighting,
}

impl FrameView {
    pub fn new(camera: &Camera, lighting: Lighting, viewport: UVec2) -> Self {
        Self {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            camera_position: camera.position(),
            viewport,
            lighting,
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Pixel-space projection for overlays: origin top-left, y down.
    pub fn screen_projection(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.viewport.x.max(1) as f32, self.viewport.y.max(1) as f32, 0.0, -1.0, 1.0)
    }

    /// View-projection with the translation removed, for the skybox.
    pub fn rotation_only(&self) -> Mat4 {
        let mut view = self.view;
        view.w_axis = glam::Vec4::W;
        self.projection * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_projection_maps_corners() {
        let view = FrameView::new(&Camera::new(), Lighting::default(), UVec2::new(200, 100));
        let p = view.screen_projection();
        let top_left = p.transform_point3(Vec3::ZERO);
        let bottom_right = p.transform_point3(Vec3::new(200.0, 100.0, 0.0));
        assert!((top_left.truncate() - glam::Vec2::new(-1.0, 1.0)).length() < 1e-5);
        assert!((bottom_right.truncate() - glam::Vec2::new(1.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn rotation_only_ignores_position() {
        let mut cam = Camera::new();
        let a = FrameView::new(&cam, Lighting::default(), UVec2::new(10, 10)).rotation_only();
        cam.set_position(Vec3::new(100.0, 5.0, -3.0));
        let b = FrameView::new(&cam, Lighting::default(), UVec2::new(10, 10)).rotation_only();
        assert!((a.to_cols_array()[0] - b.to_cols_array()[0]).abs() < 1e-6);
        assert!(a.abs_diff_eq(b, 1e-5));
    }
}
