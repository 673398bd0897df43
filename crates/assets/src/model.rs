use crate::error::AssetError;
use crate::mesh::{MeshData, MeshVertex};
use crate::store::{AssetStore, MeshId};
use glam::{Vec2, Vec3};
use std::path::Path;
use stronghold_common::Aabb;

/// One named mesh of an OBJ file, registered in the asset store.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEntry {
    pub name: String,
    pub mesh: MeshId,
    pub bounds: Aabb,
}

/// All meshes loaded from a single OBJ file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelPack {
    entries: Vec<ModelEntry>,
}

impl ModelPack {
    /// Parse an OBJ file and register every mesh in `store`.
    ///
    /// Faces are triangulated; missing normals are computed; missing texture
    /// coordinates default to zero. Material libraries are ignored.
    pub fn load(store: &mut AssetStore, path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let (models, _materials) =
            tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS).map_err(|source| AssetError::Model {
                path: path.to_path_buf(),
                source,
            })?;

        let mut entries = Vec::with_capacity(models.len());
        for model in models {
            let data = mesh_from_obj(&model.mesh);
            let Some(bounds) = data.bounds() else {
                tracing::warn!(name = %model.name, "skipping empty OBJ mesh");
                continue;
            };
            let mesh = store.add_mesh(model.name.clone(), data);
            entries.push(ModelEntry {
                name: model.name,
                mesh,
                bounds,
            });
        }

        if entries.is_empty() {
            return Err(AssetError::EmptyModel(path.to_path_buf()));
        }
        tracing::info!(path = %path.display(), meshes = entries.len(), "model pack loaded");
        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ModelEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

impl<'a> IntoIterator for &'a ModelPack {
    type Item = &'a ModelEntry;
    type IntoIter = std::slice::Iter<'a, ModelEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn mesh_from_obj(mesh: &tobj::Mesh) -> MeshData {
    let count = mesh.positions.len() / 3;
    let has_normals = mesh.normals.len() == mesh.positions.len();
    let has_uvs = mesh.texcoords.len() / 2 == count;

    let vertices = (0..count)
        .map(|i| MeshVertex {
            position: Vec3::from_slice(&mesh.positions[i * 3..i * 3 + 3]),
            normal: if has_normals {
                Vec3::from_slice(&mesh.normals[i * 3..i * 3 + 3])
            } else {
                Vec3::ZERO
            },
            // OBJ puts v = 0 at the bottom of the image.
            uv: if has_uvs {
                Vec2::new(mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1])
            } else {
                Vec2::ZERO
            },
        })
        .collect();

    let mut data = MeshData {
        vertices,
        indices: mesh.indices.clone(),
    };
    if !has_normals {
        data.compute_normals();
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_OBJ: &str = "\
o rock
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 2/2 3/3 4/4
o pebble
v 0 0 5
v 2 0 5
v 0 2 5
f 5 6 7
";

    fn write_obj(dir: &tempfile::TempDir, text: &str) -> std::path::PathBuf {
        let path = dir.path().join("rock.obj");
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn loads_every_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_obj(&dir, QUAD_OBJ);
        let mut store = AssetStore::new();
        let pack = ModelPack::load(&mut store, &path).unwrap();

        assert_eq!(pack.len(), 2);
        let rock = pack.get("rock").unwrap();
        let mesh = &store.mesh(rock.mesh).unwrap().data;
        // Quad is triangulated.
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(rock.bounds.max, Vec3::new(1.0, 1.0, 0.0));
        // Normals computed from winding.
        assert!(mesh.vertices.iter().all(|v| (v.normal - Vec3::Z).length() < 1e-5));
    }

    #[test]
    fn texture_v_is_flipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_obj(&dir, QUAD_OBJ);
        let mut store = AssetStore::new();
        let pack = ModelPack::load(&mut store, &path).unwrap();
        let mesh = &store.mesh(pack.get("rock").unwrap().mesh).unwrap().data;
        let first = mesh
            .vertices
            .iter()
            .find(|v| v.position == Vec3::ZERO)
            .unwrap();
        assert_eq!(first.uv, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn missing_file_fails() {
        let mut store = AssetStore::new();
        let err = ModelPack::load(&mut store, "assets/models/none.obj").unwrap_err();
        assert!(matches!(err, AssetError::Model { .. }));
    }

    #[test]
    fn file_without_faces_is_empty_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_obj(&dir, "# nothing here\n");
        let mut store = AssetStore::new();
        let err = ModelPack::load(&mut store, &path).unwrap_err();
        assert!(matches!(err, AssetError::EmptyModel(_)));
    }
}
