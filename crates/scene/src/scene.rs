use std::collections::BTreeMap;
use std::time::Duration;

use glam::Vec2;
use stronghold_assets::AssetStore;
use stronghold_common::EntityId;
use stronghold_render::{DrawCommand, DrawLayer, DrawList, MeshDraw};

use crate::{CoordinateSystemVisualizer, Drawable, Entity, RayCast, axis_lines};

/// Entities of one game state plus the scene-wide debug overlays.
#[derive(Debug, Default)]
pub struct Scene {
    entities: BTreeMap<EntityId, Entity>,
    order: Vec<EntityId>,
    visualizer: Option<CoordinateSystemVisualizer>,
    last_ray: Option<RayCast>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: Entity) -> EntityId {
        let id = EntityId::new();
        tracing::debug!(entity = %id.short(), name = %entity.name, kind = entity.drawable.kind(), "entity added");
        self.entities.insert(id, entity);
        self.order.push(id);
        id
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.order.retain(|e| *e != id);
        self.entities.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// First entity with `name`, in insertion order.
    pub fn find(&self, name: &str) -> Option<EntityId> {
        self.iter().find(|(_, e)| e.name == name).map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.order
            .iter()
            .filter_map(|id| self.entities.get(id).map(|e| (*id, e)))
    }

    pub fn set_visualizer(&mut self, visualizer: CoordinateSystemVisualizer) {
        self.visualizer = Some(visualizer);
    }

    pub fn visualizer(&self) -> Option<&CoordinateSystemVisualizer> {
        self.visualizer.as_ref()
    }

    /// Remember `ray` so it is drawn with the debug overlays.
    pub fn set_last_ray(&mut self, ray: RayCast) {
        self.last_ray = Some(ray);
    }

    pub fn last_ray(&self) -> Option<&RayCast> {
        self.last_ray.as_ref()
    }

    /// Flip outline and coordinate-system flags of a picked entity.
    pub fn toggle_selection(&mut self, id: EntityId) -> bool {
        match self.entities.get_mut(&id) {
            Some(entity) => {
                entity.toggle_outline();
                entity.toggle_coordinate_system();
                tracing::info!(entity = %id.short(), name = %entity.name, outlined = entity.is_outlined(), "selection toggled");
                true
            }
            None => false,
        }
    }

    /// Run every entity's animation rule once.
    pub fn animate(&mut self, elapsed: Duration) {
        for entity in self.entities.values_mut() {
            if let Some(animation) = entity.animation {
                animation.apply(&mut entity.transform, elapsed);
            }
        }
    }

    /// Build this frame's draw commands, sorted by layer.
    pub fn draw_list(&self, assets: &AssetStore) -> DrawList {
        let mut list = DrawList::new();

        for (_, entity) in self.iter() {
            match &entity.drawable {
                Drawable::Skybox { cubemap } => {
                    list.push(entity.layer, DrawCommand::Skybox { cubemap: *cubemap });
                }
                Drawable::Grid(style) => {
                    list.push(
                        entity.layer,
                        DrawCommand::Lines {
                            vertices: style.lines(),
                            width: style.width,
                        },
                    );
                }
                Drawable::Widget { texture, .. } => {
                    if let Some(model) = entity.widget_matrix() {
                        list.push(entity.layer, DrawCommand::Widget { texture: *texture, model });
                    }
                }
                Drawable::Cube | Drawable::Triangle | Drawable::Model { .. } => {
                    self.push_mesh(&mut list, entity, assets);
                }
            }
        }

        if let Some(visualizer) = &self.visualizer {
            list.push(
                DrawLayer::Debug,
                DrawCommand::Lines {
                    vertices: visualizer.lines(),
                    width: visualizer.width,
                },
            );
        }
        if let Some(ray) = &self.last_ray {
            list.push(
                DrawLayer::Debug,
                DrawCommand::Lines {
                    vertices: ray.lines(),
                    width: ray.width(),
                },
            );
        }

        list.sort();
        list
    }

    fn push_mesh(&self, list: &mut DrawList, entity: &Entity, assets: &AssetStore) {
        let Some(mesh) = entity.drawable.mesh() else {
            return;
        };
        let model = entity.model_matrix();
        let mut draw = MeshDraw::new(mesh, model);
        draw.texture = entity.texture;
        draw.specular = entity.specular;
        draw.tint = entity.tint;
        draw.unlit = entity.unlit;
        draw.stencil = entity.is_outlined();
        draw.uv_scale = uv_scale(entity, assets);
        list.push(entity.layer, DrawCommand::Mesh(draw));

        if entity.is_outlined() {
            list.push(
                DrawLayer::Outlines,
                DrawCommand::Outline {
                    mesh,
                    model: entity.outline_matrix(),
                    color: entity.outline_color,
                },
            );
        }
        if entity.draws_coordinate_system() {
            if let Some(bounds) = entity.world_bounds() {
                let length = bounds.size().max_element().max(1.0);
                list.push(
                    DrawLayer::Debug,
                    DrawCommand::Lines {
                        vertices: axis_lines(bounds.center(), length),
                        width: 2.0,
                    },
                );
            }
        }
    }
}

/// UV multiplier so the mesh UVs span `texture_rect` pixels of the texture.
fn uv_scale(entity: &Entity, assets: &AssetStore) -> Vec2 {
    let (Some(rect), Some(texture)) = (entity.texture_rect, entity.texture) else {
        return Vec2::ONE;
    };
    match assets.texture(texture) {
        Some(asset) if asset.image.width > 0 && asset.image.height > 0 => {
            rect / Vec2::new(asset.image.width as f32, asset.image.height as f32)
        }
        _ => Vec2::ONE,
    }
}
