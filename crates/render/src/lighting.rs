use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Vec3,
    pub strength: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            strength: 0.25,
        }
    }
}

/// Point light driving diffuse and specular terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecularLight {
    pub position: Vec3,
    pub color: Vec3,
    pub strength: f32,
    pub shininess: f32,
}

impl Default for SpecularLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1000.0, 0.0),
            color: Vec3::ONE,
            strength: 0.5,
            shininess: 32.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub specular: SpecularLight,
}
