use glam::{Mat4, Vec2, Vec3};
use stronghold_assets::{CUBE_SIZE, CubemapId, MeshId, TRIANGLE_SIZE, TextureId};
use stronghold_common::{Aabb, Color, Transform};
use stronghold_render::DrawLayer;

use crate::{Animation, GridStyle};

/// The closed set of things a scene can draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Cube,
    Triangle,
    /// One mesh of a loaded model pack.
    Model { mesh: MeshId, bounds: Aabb },
    Grid(GridStyle),
    /// Screen-space quad, `size` in pixels.
    Widget { texture: TextureId, size: Vec2 },
    Skybox { cubemap: CubemapId },
}

impl Drawable {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Triangle => "triangle",
            Self::Model { .. } => "model",
            Self::Grid(_) => "grid",
            Self::Widget { .. } => "widget",
            Self::Skybox { .. } => "skybox",
        }
    }

    /// Mesh drawn for this variant, if it is a lit mesh.
    pub fn mesh(&self) -> Option<MeshId> {
        match self {
            Self::Cube => Some(MeshId::CUBE),
            Self::Triangle => Some(MeshId::TRIANGLE),
            Self::Model { mesh, .. } => Some(*mesh),
            _ => None,
        }
    }

    /// Local-space bounds used for picking. `None` for variants that cannot
    /// be picked.
    pub fn local_bounds(&self) -> Option<Aabb> {
        match self {
            Self::Cube => Some(Aabb::new(Vec3::ZERO, Vec3::splat(CUBE_SIZE))),
            Self::Triangle => Some(Aabb::new(Vec3::ZERO, Vec3::new(TRIANGLE_SIZE, TRIANGLE_SIZE, 0.0))),
            Self::Model { bounds, .. } => Some(*bounds),
            _ => None,
        }
    }

    fn default_layer(&self) -> DrawLayer {
        match self {
            Self::Cube | Self::Triangle => DrawLayer::Boxes,
            Self::Model { .. } => DrawLayer::Models,
            Self::Grid(_) => DrawLayer::Grid,
            Self::Widget { .. } => DrawLayer::Overlay,
            Self::Skybox { .. } => DrawLayer::Skybox,
        }
    }
}

/// A drawable with its transform, material and debug flags.
///
/// For widgets `transform.position` and `transform.origin` are in pixels and
/// only the Z rotation is meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    pub drawable: Drawable,
    pub transform: Transform,
    pub texture: Option<TextureId>,
    pub specular: Option<TextureId>,
    /// Pixel rect of the texture the UVs span; `None` means the full texture.
    pub texture_rect: Option<Vec2>,
    pub layer: DrawLayer,
    pub tint: Color,
    pub unlit: bool,
    /// Outline growth relative to the object's size, `0.1` is ten percent.
    pub outline_size: f32,
    pub outline_color: Color,
    pub animation: Option<Animation>,
    outlined: bool,
    draw_coordinate_system: bool,
}

impl Entity {
    pub fn new(name: impl Into<String>, drawable: Drawable) -> Self {
        let layer = drawable.default_layer();
        Self {
            name: name.into(),
            drawable,
            transform: Transform::default(),
            texture: None,
            specular: None,
            texture_rect: None,
            layer,
            tint: Color::WHITE,
            unlit: false,
            outline_size: 0.05,
            outline_color: Color::rgba(255, 165, 0, 255),
            animation: None,
            outlined: false,
            draw_coordinate_system: false,
        }
    }

    pub fn cube(name: impl Into<String>) -> Self {
        Self::new(name, Drawable::Cube)
    }

    pub fn triangle(name: impl Into<String>) -> Self {
        Self::new(name, Drawable::Triangle)
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.transform.origin = origin;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_specular(mut self, specular: TextureId) -> Self {
        self.specular = Some(specular);
        self
    }

    pub fn with_texture_rect(mut self, rect: Vec2) -> Self {
        self.texture_rect = Some(rect);
        self
    }

    pub fn with_outline_size(mut self, size: f32) -> Self {
        self.outline_size = size;
        self
    }

    pub fn in_layer(mut self, layer: DrawLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn unlit(mut self) -> Self {
        self.unlit = true;
        self
    }

    pub fn animated(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn is_outlined(&self) -> bool {
        self.outlined
    }

    pub fn toggle_outline(&mut self) {
        self.outlined = !self.outlined;
    }

    pub fn draws_coordinate_system(&self) -> bool {
        self.draw_coordinate_system
    }

    pub fn toggle_coordinate_system(&mut self) {
        self.draw_coordinate_system = !self.draw_coordinate_system;
    }

    pub fn is_pickable(&self) -> bool {
        self.drawable.local_bounds().is_some()
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.transform.model_matrix()
    }

    /// Model matrix enlarged around the local bounds center for the outline.
    pub fn outline_matrix(&self) -> Mat4 {
        let center = self.drawable.local_bounds().map(|b| b.center()).unwrap_or(Vec3::ZERO);
        self.model_matrix()
            * Mat4::from_translation(center)
            * Mat4::from_scale(Vec3::splat(1.0 + self.outline_size.max(0.0)))
            * Mat4::from_translation(-center)
    }

    /// Bounds in world space.
    pub fn world_bounds(&self) -> Option<Aabb> {
        self.drawable.local_bounds().map(|b| b.transformed(&self.model_matrix()))
    }

    /// Maps the unit square to pixel space for widgets.
    pub fn widget_matrix(&self) -> Option<Mat4> {
        let Drawable::Widget { size, .. } = &self.drawable else {
            return None;
        };
        let t = &self.transform;
        Some(
            Mat4::from_translation(t.position)
                * Mat4::from_quat(t.rotation)
                * Mat4::from_translation(-t.origin)
                * Mat4::from_scale(size.extend(1.0)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_are_idempotent_in_pairs() {
        let mut e = Entity::cube("box");
        assert!(!e.is_outlined());
        e.toggle_outline();
        e.toggle_coordinate_system();
        assert!(e.is_outlined() && e.draws_coordinate_system());
        e.toggle_outline();
        e.toggle_coordinate_system();
        assert!(!e.is_outlined() && !e.draws_coordinate_system());
    }

    #[test]
    fn default_layers_follow_kind() {
        assert_eq!(Entity::cube("c").layer, DrawLayer::Boxes);
        let grid = Entity::new("g", Drawable::Grid(GridStyle::default()));
        assert_eq!(grid.layer, DrawLayer::Grid);
        assert!(!grid.is_pickable());
    }

    #[test]
    fn centered_cube_world_bounds() {
        let e = Entity::cube("c")
            .with_origin(Vec3::splat(CUBE_SIZE / 2.0))
            .with_position(Vec3::new(350.0, 50.0, 350.0));
        let b = e.world_bounds().unwrap();
        assert!((b.center() - Vec3::new(350.0, 50.0, 350.0)).length() < 1e-3);
        assert!((b.size() - Vec3::splat(CUBE_SIZE)).length() < 1e-3);
    }

    #[test]
    fn outline_grows_around_center() {
        let e = Entity::cube("c").with_outline_size(0.1);
        let m = e.outline_matrix();
        let center = Vec3::splat(CUBE_SIZE / 2.0);
        assert!((m.transform_point3(center) - center).length() < 1e-3);
        let corner = m.transform_point3(Vec3::ZERO);
        assert!((corner - Vec3::splat(-5.0)).length() < 1e-3);
    }

    #[test]
    fn widget_matrix_places_origin() {
        let mut e = Entity::new(
            "loading",
            Drawable::Widget {
                texture: TextureId(0),
                size: Vec2::new(64.0, 32.0),
            },
        );
        e.transform.position = Vec3::new(100.0, 100.0, 0.0);
        e.transform.origin = Vec3::new(-50.0, -50.0, 0.0);
        let m = e.widget_matrix().unwrap();
        let p = m.transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(150.0, 150.0, 0.0)).length() < 1e-4);
        assert!(Entity::cube("c").widget_matrix().is_none());
    }
}
