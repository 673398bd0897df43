use glam::{Vec2, Vec3};
use stronghold_common::Aabb;

/// One vertex of a textured, lit mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Indexed triangle mesh in local space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Axis-aligned cube spanning `[0, size]` on every axis, one quad per face.
    pub fn cube(size: f32) -> Self {
        const FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
            // +Z
            ([0.0, 0.0, 1.0], [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]]),
            // -Z
            ([0.0, 0.0, -1.0], [[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]]),
            // +X
            ([1.0, 0.0, 0.0], [[1.0, 0.0, 1.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0]]),
            // -X
            ([-1.0, 0.0, 0.0], [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]]),
            // +Y
            ([0.0, 1.0, 0.0], [[0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]),
            // -Y
            ([0.0, -1.0, 0.0], [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]]),
        ];
        const UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

        let mut mesh = Self::default();
        for (normal, corners) in FACES {
            let base = mesh.vertices.len() as u32;
            for (corner, uv) in corners.iter().zip(UVS) {
                mesh.vertices.push(MeshVertex {
                    position: Vec3::from(*corner) * size,
                    normal: Vec3::from(normal),
                    uv: Vec2::from(uv),
                });
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }
        mesh
    }

    /// Single triangle in the XY plane facing +Z, `size` wide and tall.
    pub fn triangle(size: f32) -> Self {
        let normal = Vec3::Z;
        let v = |x: f32, y: f32, u: f32, w: f32| MeshVertex {
            position: Vec3::new(x, y, 0.0),
            normal,
            uv: Vec2::new(u, w),
        };
        Self {
            vertices: vec![
                v(0.0, 0.0, 0.0, 1.0),
                v(size, 0.0, 1.0, 1.0),
                v(size * 0.5, size, 0.5, 0.0),
            ],
            indices: vec![0, 1, 2],
        }
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().map(|v| v.position))
    }

    /// Replace normals with area-weighted smooth normals.
    pub fn compute_normals(&mut self) {
        for v in &mut self.vertices {
            v.normal = Vec3::ZERO;
        }
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let (pa, pb, pc) = (
                self.vertices[a].position,
                self.vertices[b].position,
                self.vertices[c].position,
            );
            let n = (pb - pa).cross(pc - pa);
            for i in [a, b, c] {
                self.vertices[i].normal += n;
            }
        }
        for v in &mut self.vertices {
            v.normal = v.normal.normalize_or_zero();
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_six_quads() {
        let cube = MeshData::cube(100.0);
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.triangle_count(), 12);
        let b = cube.bounds().unwrap();
        assert_eq!(b.min, Vec3::ZERO);
        assert_eq!(b.max, Vec3::splat(100.0));
    }

    #[test]
    fn cube_faces_wind_counter_clockwise_outward() {
        let cube = MeshData::cube(1.0);
        for tri in cube.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| cube.vertices[i as usize]);
            let n = (b.position - a.position).cross(c.position - a.position);
            assert!(n.dot(a.normal) > 0.0);
        }
    }

    #[test]
    fn triangle_faces_z() {
        let tri = MeshData::triangle(2.0);
        assert_eq!(tri.triangle_count(), 1);
        assert_eq!(tri.bounds().unwrap().max, Vec3::new(2.0, 2.0, 0.0));
    }

    #[test]
    fn computed_normals_match_winding() {
        let mut tri = MeshData::triangle(1.0);
        for v in &mut tri.vertices {
            v.normal = Vec3::ZERO;
        }
        tri.compute_normals();
        assert!(tri.vertices.iter().all(|v| (v.normal - Vec3::Z).length() < 1e-6));
    }
}
