use crate::error::AssetError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Shader programs every backend expects to find in a [`ShaderPack`].
pub const PROGRAMS: [&str; 5] = ["mesh", "outline", "line", "skybox", "widget"];

/// WGSL source of one program: a vertex stage and a fragment stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

/// Named registry of shader programs, filled once at setup.
#[derive(Debug, Clone, Default)]
pub struct ShaderPack {
    programs: BTreeMap<String, ShaderSource>,
}

impl ShaderPack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a vertex/fragment pair from disk and register it under `name`.
    pub fn load_shaders(
        &mut self,
        name: impl Into<String>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<(), AssetError> {
        let name = name.into();
        let source = ShaderSource {
            vertex: read_source(vertex_path.as_ref())?,
            fragment: read_source(fragment_path.as_ref())?,
        };
        tracing::debug!(%name, "shader program loaded");
        self.programs.insert(name, source);
        Ok(())
    }

    /// Load every program in [`PROGRAMS`] as `<dir>/<name>.vert.wgsl` and
    /// `<dir>/<name>.frag.wgsl`.
    pub fn load_standard(dir: impl AsRef<Path>) -> Result<Self, AssetError> {
        let dir = dir.as_ref();
        let mut pack = Self::new();
        for name in PROGRAMS {
            pack.load_shaders(
                name,
                dir.join(format!("{name}.vert.wgsl")),
                dir.join(format!("{name}.frag.wgsl")),
            )?;
        }
        Ok(pack)
    }

    pub fn insert(&mut self, name: impl Into<String>, source: ShaderSource) {
        self.programs.insert(name.into(), source);
    }

    pub fn get(&self, name: &str) -> Option<&ShaderSource> {
        self.programs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.programs.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.programs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

fn read_source(path: &Path) -> Result<String, AssetError> {
    std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: PathBuf::from(path),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_pair() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("line.vert.wgsl"), "// vs").unwrap();
        std::fs::write(dir.path().join("line.frag.wgsl"), "// fs").unwrap();

        let mut pack = ShaderPack::new();
        pack.load_shaders(
            "line",
            dir.path().join("line.vert.wgsl"),
            dir.path().join("line.frag.wgsl"),
        )
        .unwrap();

        let src = pack.get("line").unwrap();
        assert_eq!(src.vertex, "// vs");
        assert_eq!(src.fragment, "// fs");
        assert!(pack.contains("line"));
        assert!(!pack.contains("mesh"));
    }

    #[test]
    fn missing_stage_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mesh.vert.wgsl"), "// vs").unwrap();
        let mut pack = ShaderPack::new();
        let err = pack
            .load_shaders(
                "mesh",
                dir.path().join("mesh.vert.wgsl"),
                dir.path().join("mesh.frag.wgsl"),
            )
            .unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
        assert!(pack.is_empty());
    }

    #[test]
    fn load_standard_reads_all_programs() {
        let dir = tempfile::tempdir().unwrap();
        for name in PROGRAMS {
            std::fs::write(dir.path().join(format!("{name}.vert.wgsl")), name).unwrap();
            std::fs::write(dir.path().join(format!("{name}.frag.wgsl")), name).unwrap();
        }
        let pack = ShaderPack::load_standard(dir.path()).unwrap();
        assert_eq!(pack.len(), PROGRAMS.len());
        assert_eq!(pack.names().collect::<Vec<_>>().len(), 5);
    }
}
