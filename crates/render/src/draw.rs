use glam::{Mat4, Vec2, Vec3};
use stronghold_assets::{CubemapId, MeshId, TextureId};
use stronghold_common::Color;

/// Draw order buckets. Lower layers are drawn first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrawLayer {
    Skybox,
    Grid,
    Models,
    Boxes,
    Outlines,
    Debug,
    Sun,
    Overlay,
}

/// A textured, lit mesh instance.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDraw {
    pub mesh: MeshId,
    pub model: Mat4,
    pub texture: Option<TextureId>,
    pub specular: Option<TextureId>,
    pub tint: Color,
    /// Multiplier applied to mesh UVs.
    pub uv_scale: Vec2,
    /// Skip lighting, used for emissive objects like the sun.
    pub unlit: bool,
    /// Write the stencil buffer so a following outline can mask against it.
    pub stencil: bool,
}

impl MeshDraw {
    pub fn new(mesh: MeshId, model: Mat4) -> Self {
        Self {
            mesh,
            model,
            texture: None,
            specular: None,
            tint: Color::WHITE,
            uv_scale: Vec2::ONE,
            unlit: false,
            stencil: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineVertex {
    pub position: Vec3,
    pub color: Color,
}

impl LineVertex {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}

/// Backend-neutral draw instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Skybox {
        cubemap: CubemapId,
    },
    Mesh(MeshDraw),
    /// Flat silhouette drawn where the stencil of earlier meshes is not set.
    /// `model` is already enlarged around the mesh center.
    Outline {
        mesh: MeshId,
        model: Mat4,
        color: Color,
    },
    /// Line list, two vertices per segment.
    Lines {
        vertices: Vec<LineVertex>,
        width: f32,
    },
    /// Screen-space quad in pixels. `model` maps the unit square to pixels.
    Widget {
        texture: TextureId,
        model: Mat4,
    },
}

impl DrawCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Skybox { .. } => "skybox",
            Self::Mesh(_) => "mesh",
            Self::Outline { .. } => "outline",
            Self::Lines { .. } => "lines",
            Self::Widget { .. } => "widget",
        }
    }
}

/// Draw commands collected for one frame.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<(DrawLayer, DrawCommand)>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: DrawLayer, command: DrawCommand) {
        self.items.push((layer, command));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sort by layer, keeping insertion order inside a layer.
    pub fn sort(&mut self) {
        self.items.sort_by_key(|(layer, _)| *layer);
    }

    pub fn iter(&self) -> impl Iterator<Item = (DrawLayer, &DrawCommand)> {
        self.items.iter().map(|(layer, cmd)| (*layer, cmd))
    }
}
