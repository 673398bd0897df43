use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Smallest box containing all `points`. `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// The eight corners, transformed and re-boxed. Used to get world bounds.
    pub fn transformed(&self, m: &Mat4) -> Self {
        let corners = (0..8).map(|i| {
            let c = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            m.transform_point3(c)
        });
        // Eight corners always yield a box.
        Self::from_points(corners).unwrap_or(*self)
    }

    /// Slab test of the segment `start + t * (end - start)`, `t` in `[0, 1]`.
    ///
    /// Returns the entry parameter `t` of the first intersection, `0.0` when
    /// `start` is already inside the box.
    pub fn intersect_segment(&self, start: Vec3, end: Vec3) -> Option<f32> {
        let dir = end - start;
        let mut t_min = 0.0_f32;
        let mut t_max = 1.0_f32;

        for axis in 0..3 {
            let o = start[axis];
            let d = dir[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < 1e-10 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t1 = (lo - o) * inv;
            let mut t2 = (hi - o) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Aabb {
        Aabb::new(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn new_orders_corners() {
        let b = Aabb::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(b.min, Vec3::ZERO);
        assert_eq!(b.max, Vec3::ONE);
    }

    #[test]
    fn from_points_bounds_everything() {
        let b = Aabb::from_points([Vec3::new(-1.0, 2.0, 0.0), Vec3::new(3.0, -4.0, 5.0)]).unwrap();
        assert_eq!(b.min, Vec3::new(-1.0, -4.0, 0.0));
        assert_eq!(b.max, Vec3::new(3.0, 2.0, 5.0));
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn segment_through_box_hits_at_entry() {
        let t = unit()
            .intersect_segment(Vec3::new(-1.0, 0.5, 0.5), Vec3::new(3.0, 0.5, 0.5))
            .unwrap();
        assert!((t - 0.25).abs() < 1e-6);
    }

    #[test]
    fn segment_stopping_short_misses() {
        let hit = unit().intersect_segment(Vec3::new(-3.0, 0.5, 0.5), Vec3::new(-1.0, 0.5, 0.5));
        assert!(hit.is_none());
    }

    #[test]
    fn segment_beside_box_misses() {
        let hit = unit().intersect_segment(Vec3::new(-1.0, 2.0, 0.5), Vec3::new(3.0, 2.0, 0.5));
        assert!(hit.is_none());
    }

    #[test]
    fn segment_starting_inside_hits_at_zero() {
        let t = unit()
            .intersect_segment(Vec3::splat(0.5), Vec3::splat(10.0))
            .unwrap();
        assert_eq!(t, 0.0);
    }

    #[test]
    fn transformed_box_follows_translation() {
        let b = unit().transformed(&Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(b.min, Vec3::new(10.0, 0.0, 0.0));
        assert!(b.contains(Vec3::new(10.5, 0.5, 0.5)));
    }
}
