//! Throwaway asset trees for tests.

use std::path::Path;

use stronghold_assets::PROGRAMS;
use tempfile::TempDir;

use crate::{GameConfig, Scenario};

const CUBE_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
f 1 2 3
f 1 3 4
f 5 6 7
f 5 7 8
f 1 2 6
f 1 6 5
";

/// Complete asset root: every shader stage, texture, cubemap face and model
/// the scenarios ask for.
pub(crate) struct AssetTree {
    dir: TempDir,
}

impl AssetTree {
    pub(crate) fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        let shaders = root.join("shaders");
        std::fs::create_dir_all(&shaders).unwrap();
        for name in PROGRAMS {
            std::fs::write(shaders.join(format!("{name}.vert.wgsl")), format!("// {name} vertex")).unwrap();
            std::fs::write(shaders.join(format!("{name}.frag.wgsl")), format!("// {name} fragment")).unwrap();
        }

        let textures = root.join("textures");
        std::fs::create_dir_all(textures.join("cubemap")).unwrap();
        for (i, file) in ["loading.png", "rock.png", "rockSpecular.png", "overlay.png", "overlaySpecular.png"]
            .into_iter()
            .enumerate()
        {
            write_png(&textures.join(file), [i as u8 * 40, 90, 160, 255]);
        }
        for (i, file) in [
            "box.jpg",
            "boxSpecular.jpg",
            "sun.jpg",
            "Fabric048_4K-JPG_Color.jpg",
            "Fabric048_4K-JPG_Specular.jpg",
        ]
        .into_iter()
        .enumerate()
        {
            write_jpg(&textures.join(file), [200, i as u8 * 40, 30]);
        }
        for face in ["px", "nx", "py", "ny", "pz", "nz"] {
            write_png(&textures.join("cubemap").join(format!("{face}.png")), [20, 40, 80, 255]);
        }

        let models = root.join("models");
        std::fs::create_dir_all(&models).unwrap();
        std::fs::write(models.join("rock.obj"), format!("o rock\n{CUBE_OBJ}")).unwrap();
        std::fs::write(models.join("landscape2.obj"), format!("o ground\n{CUBE_OBJ}")).unwrap();

        Self { dir }
    }

    pub(crate) fn root(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn config(&self, scenario: Scenario) -> GameConfig {
        GameConfig {
            assets_root: self.root().to_path_buf(),
            scenario,
            ..GameConfig::default()
        }
    }
}

pub(crate) fn write_png(path: &Path, rgba: [u8; 4]) {
    image::RgbaImage::from_pixel(8, 8, image::Rgba(rgba)).save(path).unwrap();
}

fn write_jpg(path: &Path, rgb: [u8; 3]) {
    image::RgbImage::from_pixel(8, 8, image::Rgb(rgb)).save(path).unwrap();
}
