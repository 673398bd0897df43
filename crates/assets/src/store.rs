use crate::error::AssetError;
use crate::image_data::ImageData;
use crate::mesh::MeshData;
use crate::texture::TextureDesc;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;

/// Edge length of the built-in cube mesh.
pub const CUBE_SIZE: f32 = 100.0;
/// Edge length of the built-in triangle mesh.
pub const TRIANGLE_SIZE: f32 = 100.0;

/// Handle of a 2D texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Handle of a cubemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubemapId(pub u32);

/// Handle of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u32);

impl MeshId {
    /// The built-in `CUBE_SIZE` cube, registered by [`AssetStore::new`].
    pub const CUBE: Self = Self(0);
    /// The built-in `TRIANGLE_SIZE` triangle, registered by [`AssetStore::new`].
    pub const TRIANGLE: Self = Self(1);
}

#[derive(Debug, Clone)]
pub struct TextureAsset {
    pub label: String,
    pub image: ImageData,
    pub desc: TextureDesc,
}

#[derive(Debug, Clone)]
pub struct CubemapAsset {
    pub label: String,
    /// Faces in +X, -X, +Y, -Y, +Z, -Z order.
    pub faces: [ImageData; 6],
}

impl CubemapAsset {
    pub fn size(&self) -> u32 {
        self.faces[0].width
    }
}

#[derive(Debug, Clone)]
pub struct MeshAsset {
    pub name: String,
    pub data: MeshData,
}

/// CPU-side registry of every asset of a session.
///
/// Textures are deduplicated by content: loading the same image with the same
/// sampling twice yields the same handle, so entities share one GPU texture.
#[derive(Debug, Clone)]
pub struct AssetStore {
    textures: Vec<TextureAsset>,
    cubemaps: Vec<CubemapAsset>,
    meshes: Vec<MeshAsset>,
    texture_hashes: HashMap<[u8; 32], TextureId>,
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetStore {
    /// New store holding only the built-in cube and triangle meshes.
    pub fn new() -> Self {
        let mut store = Self {
            textures: Vec::new(),
            cubemaps: Vec::new(),
            meshes: Vec::new(),
            texture_hashes: HashMap::new(),
        };
        store.add_mesh("cube", MeshData::cube(CUBE_SIZE));
        store.add_mesh("triangle", MeshData::triangle(TRIANGLE_SIZE));
        store
    }

    /// Decode an image file and register it as a texture.
    pub fn load_texture(
        &mut self,
        path: impl AsRef<Path>,
        desc: TextureDesc,
    ) -> Result<TextureId, AssetError> {
        let path = path.as_ref();
        let image = ImageData::open(path)?;
        Ok(self.add_texture(path.display().to_string(), image, desc))
    }

    pub fn add_texture(&mut self, label: impl Into<String>, image: ImageData, desc: TextureDesc) -> TextureId {
        let hash = texture_hash(&image, &desc);
        if let Some(id) = self.texture_hashes.get(&hash) {
            tracing::debug!(id = id.0, "texture already loaded, sharing handle");
            return *id;
        }
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(TextureAsset {
            label: label.into(),
            image,
            desc,
        });
        self.texture_hashes.insert(hash, id);
        id
    }

    /// Decode six face images (+X, -X, +Y, -Y, +Z, -Z) into a cubemap.
    ///
    /// Every face must be square and the same size as the first.
    pub fn load_cubemap<P: AsRef<Path>>(&mut self, faces: [P; 6]) -> Result<CubemapId, AssetError> {
        let label = faces[0].as_ref().display().to_string();
        let [px, nx, py, ny, pz, nz] = &faces;
        let images = [
            ImageData::open(px)?,
            ImageData::open(nx)?,
            ImageData::open(py)?,
            ImageData::open(ny)?,
            ImageData::open(pz)?,
            ImageData::open(nz)?,
        ];
        self.add_cubemap(label, images)
    }

    pub fn add_cubemap(&mut self, label: impl Into<String>, faces: [ImageData; 6]) -> Result<CubemapId, AssetError> {
        let expected = faces[0].width;
        for (face, img) in faces.iter().enumerate() {
            if img.width != expected || img.height != expected {
                return Err(AssetError::CubemapFace {
                    face,
                    width: img.width,
                    height: img.height,
                    expected,
                });
            }
        }
        let id = CubemapId(self.cubemaps.len() as u32);
        self.cubemaps.push(CubemapAsset {
            label: label.into(),
            faces,
        });
        Ok(id)
    }

    pub fn add_mesh(&mut self, name: impl Into<String>, data: MeshData) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(MeshAsset {
            name: name.into(),
            data,
        });
        id
    }

    pub fn texture(&self, id: TextureId) -> Option<&TextureAsset> {
        self.textures.get(id.0 as usize)
    }

    pub fn cubemap(&self, id: CubemapId) -> Option<&CubemapAsset> {
        self.cubemaps.get(id.0 as usize)
    }

    pub fn mesh(&self, id: MeshId) -> Option<&MeshAsset> {
        self.meshes.get(id.0 as usize)
    }

    pub fn textures(&self) -> &[TextureAsset] {
        &self.textures
    }

    pub fn cubemaps(&self) -> &[CubemapAsset] {
        &self.cubemaps
    }

    pub fn meshes(&self) -> &[MeshAsset] {
        &self.meshes
    }
}

fn texture_hash(image: &ImageData, desc: &TextureDesc) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(image.width.to_le_bytes());
    hasher.update(image.height.to_le_bytes());
    hasher.update(&image.pixels);
    hasher.update(format!("{desc:?}").as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_data::TextureChannel;
    use crate::texture::Filter;

    #[test]
    fn builtins_are_registered() {
        let store = AssetStore::new();
        assert_eq!(store.mesh(MeshId::CUBE).unwrap().name, "cube");
        assert_eq!(store.mesh(MeshId::TRIANGLE).unwrap().name, "triangle");
        assert!(store.textures().is_empty());
    }

    #[test]
    fn identical_textures_share_a_handle() {
        let mut store = AssetStore::new();
        let desc = TextureDesc::new(TextureChannel::Srgb);
        let a = store.add_texture("a", ImageData::solid(2, 2, [1, 2, 3, 255]), desc);
        let b = store.add_texture("b", ImageData::solid(2, 2, [1, 2, 3, 255]), desc);
        assert_eq!(a, b);
        assert_eq!(store.textures().len(), 1);
    }

    #[test]
    fn sampling_distinguishes_textures() {
        let mut store = AssetStore::new();
        let img = ImageData::solid(2, 2, [9, 9, 9, 255]);
        let linear = store.add_texture("l", img.clone(), TextureDesc::default());
        let nearest = store.add_texture(
            "n",
            img,
            TextureDesc::default().with_filters(Filter::Nearest, Filter::Nearest),
        );
        assert_ne!(linear, nearest);
    }

    #[test]
    fn load_texture_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sun.png");
        image::RgbaImage::from_pixel(8, 8, image::Rgba([255, 200, 0, 255]))
            .save(&path)
            .unwrap();
        let mut store = AssetStore::new();
        let id = store.load_texture(&path, TextureDesc::default()).unwrap();
        assert_eq!(store.texture(id).unwrap().image.width, 8);
    }

    #[test]
    fn cubemap_faces_must_match() {
        let mut store = AssetStore::new();
        let face = ImageData::solid(4, 4, [0, 0, 0, 255]);
        let mut faces: [ImageData; 6] = std::array::from_fn(|_| face.clone());
        assert!(store.add_cubemap("sky", faces.clone()).is_ok());

        faces[3] = ImageData::solid(4, 2, [0, 0, 0, 255]);
        let err = store.add_cubemap("bad", faces).unwrap_err();
        assert!(matches!(err, AssetError::CubemapFace { face: 3, .. }));
        assert_eq!(store.cubemaps().len(), 1);
        assert_eq!(store.cubemap(CubemapId(0)).unwrap().size(), 4);
    }
}
