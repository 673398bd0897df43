use glam::Vec3;
use stronghold_assets::{AssetStore, PROGRAMS, ShaderPack};

use crate::{Backend, DrawCommand, FrameView, RenderError};

/// One call received by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Prepare,
    Clear(Vec3),
    Draw(DrawCommand),
    Present,
}

/// Headless backend that validates and records every call.
///
/// Applies the same checks a GPU backend does: every shader program must be
/// present, and draws may only reference assets seen by `prepare`.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    textures: usize,
    cubemaps: usize,
    meshes: usize,
    in_frame: bool,
    frames: u64,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Draw commands of every recorded frame, in submission order.
    pub fn draws(&self) -> impl Iterator<Item = &DrawCommand> {
        self.calls.iter().filter_map(|c| match c {
            BackendCall::Draw(cmd) => Some(cmd),
            _ => None,
        })
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    pub fn uploaded_textures(&self) -> usize {
        self.textures
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Human-readable dump of the recorded calls, for logs and test output.
    pub fn dump(&self) -> String {
        let mut out = format!(
            "=== Recording (frames={}, textures={}, cubemaps={}, meshes={}) ===\n",
            self.frames, self.textures, self.cubemaps, self.meshes
        );
        for call in &self.calls {
            match call {
                BackendCall::Prepare => out.push_str("prepare\n"),
                BackendCall::Clear(c) => out.push_str(&format!("clear ({:.2}, {:.2}, {:.2})\n", c.x, c.y, c.z)),
                BackendCall::Draw(cmd) => out.push_str(&format!("  draw {}\n", cmd.kind())),
                BackendCall::Present => out.push_str("present\n"),
            }
        }
        out
    }

    fn check(&self, command: &DrawCommand) -> Result<(), RenderError> {
        let texture = |id: stronghold_assets::TextureId| {
            if (id.0 as usize) < self.textures {
                Ok(())
            } else {
                Err(RenderError::TextureNotUploaded(id))
            }
        };
        let mesh = |id: stronghold_assets::MeshId| {
            if (id.0 as usize) < self.meshes {
                Ok(())
            } else {
                Err(RenderError::MeshNotUploaded(id))
            }
        };

        match command {
            DrawCommand::Skybox { cubemap } => {
                if (cubemap.0 as usize) >= self.cubemaps {
                    return Err(RenderError::CubemapNotUploaded(*cubemap));
                }
            }
            DrawCommand::Mesh(draw) => {
                mesh(draw.mesh)?;
                if let Some(id) = draw.texture {
                    texture(id)?;
                }
                if let Some(id) = draw.specular {
                    texture(id)?;
                }
            }
            DrawCommand::Outline { mesh: id, .. } => mesh(*id)?,
            DrawCommand::Lines { .. } => {}
            DrawCommand::Widget { texture: id, .. } => texture(*id)?,
        }
        Ok(())
    }
}

impl Backend for RecordingBackend {
    fn prepare(&mut self, assets: &AssetStore, shaders: &ShaderPack) -> Result<(), RenderError> {
        if let Some(missing) = PROGRAMS.iter().find(|name| !shaders.contains(name)) {
            return Err(RenderError::MissingShader((*missing).to_string()));
        }
        self.textures = assets.textures().len();
        self.cubemaps = assets.cubemaps().len();
        self.meshes = assets.meshes().len();
        tracing::trace!(textures = self.textures, cubemaps = self.cubemaps, meshes = self.meshes, "recording prepare");
        self.calls.push(BackendCall::Prepare);
        Ok(())
    }

    fn clear(&mut self, color: Vec3) -> Result<(), RenderError> {
        self.in_frame = true;
        self.calls.push(BackendCall::Clear(color));
        Ok(())
    }

    fn draw(&mut self, _view: &FrameView, command: &DrawCommand) -> Result<(), RenderError> {
        if !self.in_frame {
            return Err(RenderError::NoFrame);
        }
        self.check(command)?;
        self.calls.push(BackendCall::Draw(command.clone()));
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        if !self.in_frame {
            return Err(RenderError::NoFrame);
        }
        self.in_frame = false;
        self.frames += 1;
        self.calls.push(BackendCall::Present);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, Lighting, MeshDraw};
    use glam::{Mat4, UVec2};
    use stronghold_assets::{ImageData, MeshId, ShaderSource, TextureChannel, TextureDesc, TextureId};

    fn shaders() -> ShaderPack {
        let mut pack = ShaderPack::new();
        for name in PROGRAMS {
            pack.insert(
                name,
                ShaderSource {
                    vertex: String::new(),
                    fragment: String::new(),
                },
            );
        }
        pack
    }

    fn view() -> FrameView {
        FrameView::new(&Camera::new(), Lighting::default(), UVec2::new(64, 64))
    }

    #[test]
    fn missing_program_fails_prepare() {
        let mut pack = ShaderPack::new();
        for name in PROGRAMS.iter().filter(|n| **n != "skybox") {
            pack.insert(
                *name,
                ShaderSource {
                    vertex: String::new(),
                    fragment: String::new(),
                },
            );
        }
        let mut backend = RecordingBackend::new();
        let err = backend.prepare(&AssetStore::new(), &pack).unwrap_err();
        assert!(matches!(err, RenderError::MissingShader(name) if name == "skybox"));
    }

    #[test]
    fn draw_requires_clear() {
        let mut backend = RecordingBackend::new();
        backend.prepare(&AssetStore::new(), &shaders()).unwrap();
        let cmd = DrawCommand::Mesh(MeshDraw::new(MeshId::CUBE, Mat4::IDENTITY));
        assert!(matches!(backend.draw(&view(), &cmd), Err(RenderError::NoFrame)));
    }

    #[test]
    fn texture_must_be_uploaded() {
        let mut store = AssetStore::new();
        let mut backend = RecordingBackend::new();
        backend.prepare(&store, &shaders()).unwrap();
        backend.clear(Vec3::ZERO).unwrap();

        let mut draw = MeshDraw::new(MeshId::CUBE, Mat4::IDENTITY);
        draw.texture = Some(TextureId(0));
        let cmd = DrawCommand::Mesh(draw);
        assert!(matches!(
            backend.draw(&view(), &cmd),
            Err(RenderError::TextureNotUploaded(_))
        ));

        store.add_texture("white", ImageData::solid(2, 2, [255; 4]), TextureDesc::new(TextureChannel::Srgba));
        backend.prepare(&store, &shaders()).unwrap();
        backend.draw(&view(), &cmd).unwrap();
        backend.present().unwrap();

        assert_eq!(backend.frames_presented(), 1);
        assert_eq!(backend.draws().count(), 1);
        assert!(backend.dump().contains("draw mesh"));
    }
}
