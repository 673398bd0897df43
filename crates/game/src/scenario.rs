use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use stronghold_assets::{AssetStore, CUBE_SIZE, Filter, ModelPack, TextureChannel, TextureDesc};
use stronghold_render::{Camera, DrawLayer, Lighting};
use stronghold_scene::{Animation, CoordinateSystemVisualizer, Drawable, Entity, GridStyle, Scene};

use crate::{AssetPaths, GameError};

/// Which demo scene `on_create` builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Cubes, a rock model, the sun and the loading widget.
    #[default]
    Showcase,
    /// Skybox over the landscape model.
    Landscape,
    /// Camera and bindings only, no drawables.
    Empty,
}

impl Scenario {
    pub fn name(self) -> &'static str {
        match self {
            Self::Showcase => "showcase",
            Self::Landscape => "landscape",
            Self::Empty => "empty",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "showcase" => Ok(Self::Showcase),
            "landscape" => Ok(Self::Landscape),
            "empty" => Ok(Self::Empty),
            _ => Err(GameError::UnknownScenario(s.to_string())),
        }
    }
}

/// Everything a scenario may populate during `on_create`.
pub(crate) struct Setup<'a> {
    pub paths: &'a AssetPaths,
    pub assets: &'a mut AssetStore,
    pub scene: &'a mut Scene,
    pub lighting: &'a mut Lighting,
    pub camera: &'a mut Camera,
}

/// Offset that puts the center of the built-in cube on its position.
const CUBE_CENTER: Vec3 = Vec3::splat(CUBE_SIZE / 2.0);

fn srgb() -> TextureDesc {
    TextureDesc::new(TextureChannel::Srgb)
}

fn srgba() -> TextureDesc {
    TextureDesc::new(TextureChannel::Srgba)
}

impl Scenario {
    pub(crate) fn build(self, setup: Setup<'_>) -> Result<(), GameError> {
        match self {
            Self::Showcase => build_showcase(setup),
            Self::Landscape => build_landscape(setup),
            Self::Empty => Ok(()),
        }
    }
}

fn build_showcase(setup: Setup<'_>) -> Result<(), GameError> {
    let Setup {
        paths,
        assets,
        scene,
        lighting,
        camera,
    } = setup;

    camera.set_position(Vec3::new(1000.0, 0.0, 1000.0));

    let loading = assets.load_texture(paths.texture("loading.png"), srgba())?;
    let rock = assets.load_texture(paths.texture("rock.png"), srgba())?;
    let rock_specular = assets.load_texture(paths.texture("rockSpecular.png"), srgba())?;
    let boxes = assets.load_texture(
        paths.texture("box.jpg"),
        srgb().with_filters(Filter::Nearest, Filter::Nearest),
    )?;
    let box_specular = assets.load_texture(paths.texture("boxSpecular.jpg"), srgb())?;
    let sun_texture = assets.load_texture(paths.texture("sun.jpg"), srgb())?;
    let fabric = assets.load_texture(paths.texture("Fabric048_4K-JPG_Color.jpg"), srgb())?;
    let fabric_specular = assets.load_texture(paths.texture("Fabric048_4K-JPG_Specular.jpg"), srgb())?;

    scene.add(Entity::new("grid", Drawable::Grid(GridStyle::default())));

    scene.add(
        Entity::cube("cube1")
            .with_texture(boxes)
            .with_origin(CUBE_CENTER)
            .with_position(Vec3::new(0.0, 0.0, -1000.0))
            .animated(Animation::Pulse {
                amplitude: 3.0,
                base: 3.2,
                period_ms: 300.0,
            }),
    );
    scene.add(
        Entity::cube("cube")
            .with_texture(boxes)
            .with_specular(box_specular)
            .with_origin(CUBE_CENTER)
            .with_position(Vec3::new(350.0, 50.0, 350.0)),
    );

    let pack = ModelPack::load(assets, paths.model("rock.obj"))?;
    for model in &pack {
        scene.add(
            Entity::new(
                model.name.clone(),
                Drawable::Model {
                    mesh: model.mesh,
                    bounds: model.bounds,
                },
            )
            .with_scale(Vec3::splat(100.0))
            .with_position(Vec3::new(1000.0, 0.0, 1000.0))
            .with_texture(rock)
            .with_specular(rock_specular)
            .with_texture_rect(Vec2::splat(2048.0))
            .with_outline_size(0.8),
        );
    }

    scene.add(
        Entity::cube("cube2")
            .with_texture(fabric)
            .with_specular(fabric_specular)
            .with_origin(CUBE_CENTER)
            .with_position(Vec3::new(0.0, 500.0, 0.0)),
    );
    scene.add(
        Entity::cube("cube3")
            .with_texture(boxes)
            .with_specular(box_specular)
            .with_origin(CUBE_CENTER)
            .with_position(Vec3::new(-350.0, 50.0, 350.0))
            .animated(Animation::Spin {
                degrees: Vec3::splat(0.05),
            }),
    );

    scene.set_visualizer(CoordinateSystemVisualizer::default());

    let sun_position = Vec3::new(1000.0, 0.0, 0.0);
    scene.add(
        Entity::cube("sun")
            .with_texture(sun_texture)
            .with_origin(CUBE_CENTER)
            .with_position(sun_position)
            .in_layer(DrawLayer::Sun)
            .unlit()
            .animated(Animation::Spin {
                degrees: Vec3::new(0.0, -0.005, 0.0),
            }),
    );
    lighting.specular.position = sun_position;

    let widget_size = assets
        .texture(loading)
        .map(|t| Vec2::new(t.image.width as f32, t.image.height as f32))
        .unwrap_or(Vec2::splat(100.0));
    let mut widget = Entity::new(
        "loading",
        Drawable::Widget {
            texture: loading,
            size: widget_size,
        },
    )
    .animated(Animation::Rotate2D { degrees: -0.05 });
    widget.transform.position = Vec3::new(100.0, 100.0, 0.0);
    widget.transform.origin = Vec3::new(-50.0, -50.0, 0.0);
    scene.add(widget);

    tracing::info!(entities = scene.len(), textures = assets.textures().len(), "showcase built");
    Ok(())
}

fn build_landscape(setup: Setup<'_>) -> Result<(), GameError> {
    let Setup {
        paths,
        assets,
        scene,
        camera,
        ..
    } = setup;

    camera.set_position(Vec3::new(100.0, 100.0, 100.0));

    let rock = assets.load_texture(paths.texture("overlay.png"), srgba())?;
    let rock_specular = assets.load_texture(paths.texture("overlaySpecular.png"), srgba())?;
    let cubemap = assets.load_cubemap(paths.cubemap_faces())?;

    scene.add(Entity::new("skybox", Drawable::Skybox { cubemap }));
    scene.add(Entity::new("grid", Drawable::Grid(GridStyle::default())));
    scene.set_visualizer(CoordinateSystemVisualizer::default());

    let pack = ModelPack::load(assets, paths.model("landscape2.obj"))?;
    for model in &pack {
        scene.add(
            Entity::new(
                model.name.clone(),
                Drawable::Model {
                    mesh: model.mesh,
                    bounds: model.bounds,
                },
            )
            .with_scale(Vec3::splat(100.0))
            .with_texture(rock)
            .with_specular(rock_specular)
            .with_texture_rect(Vec2::new(3072.0, 2560.0)),
        );
    }

    tracing::info!(entities = scene.len(), models = pack.len(), "landscape built");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Showcase".parse::<Scenario>().unwrap(), Scenario::Showcase);
        assert_eq!("landscape".parse::<Scenario>().unwrap(), Scenario::Landscape);
        assert!(matches!(
            "arena".parse::<Scenario>(),
            Err(GameError::UnknownScenario(name)) if name == "arena"
        ));
    }

    #[test]
    fn display_round_trips() {
        for scenario in [Scenario::Showcase, Scenario::Landscape, Scenario::Empty] {
            assert_eq!(scenario.to_string().parse::<Scenario>().unwrap(), scenario);
        }
    }
}
