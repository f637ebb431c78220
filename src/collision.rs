//! Ray queries the solver uses to keep rope points out of geometry.

use crate::float::Float;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Bit filter selecting which collision layers a query sees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CollisionMask(pub u32);

impl CollisionMask {
    pub const NONE: CollisionMask = CollisionMask(0);
    pub const ALL: CollisionMask = CollisionMask(u32::MAX);

    /// Mask with only layer `n` (0-based) set. Layers past 31 don't exist
    /// and give an empty mask.
    pub const fn layer(n: u32) -> Self {
        match 1u32.checked_shl(n) {
            Some(bits) => CollisionMask(bits),
            None => CollisionMask::NONE,
        }
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn intersects(self, other: CollisionMask) -> bool {
        self.0 & other.0 != 0
    }
}

/// Where a ray first touched geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit<F: Float> {
    pub position: Vec2<F>,
    /// Unit surface normal facing the ray origin.
    pub normal: Vec2<F>,
}

/// A spatial index that can cast segments.
pub trait CollisionQuery<F: Float> {
    /// First hit along `start -> end` against colliders matching `mask`.
    fn intersect_ray(&self, start: Vec2<F>, end: Vec2<F>, mask: CollisionMask) -> Option<RayHit<F>>;
}

impl<F: Float, T: CollisionQuery<F> + ?Sized> CollisionQuery<F> for &T {
    fn intersect_ray(&self, start: Vec2<F>, end: Vec2<F>, mask: CollisionMask) -> Option<RayHit<F>> {
        (**self).intersect_ray(start, end, mask)
    }
}

/// Empty world.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCollision;

impl<F: Float> CollisionQuery<F> for NoCollision {
    fn intersect_ray(&self, _start: Vec2<F>, _end: Vec2<F>, _mask: CollisionMask) -> Option<RayHit<F>> {
        None
    }
}

/// A static line segment collider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall<F: Float> {
    pub a: Vec2<F>,
    pub b: Vec2<F>,
    pub layers: CollisionMask,
}

/// Brute-force world of static segments, for hosts without a spatial index
/// of their own.
#[derive(Clone, Debug, Default)]
pub struct SegmentWorld<F: Float> {
    walls: AllocVec<Wall<F>>,
}

impl<F: Float> SegmentWorld<F> {
    pub fn new() -> Self {
        SegmentWorld { walls: AllocVec::new() }
    }

    /// Add a wall on layer 0.
    pub fn add_wall(&mut self, a: Vec2<F>, b: Vec2<F>) -> usize {
        self.add_wall_on(a, b, CollisionMask::layer(0))
    }

    pub fn add_wall_on(&mut self, a: Vec2<F>, b: Vec2<F>, layers: CollisionMask) -> usize {
        let idx = self.walls.len();
        self.walls.push(Wall { a, b, layers });
        idx
    }

    pub fn with_wall(mut self, a: Vec2<F>, b: Vec2<F>) -> Self {
        self.add_wall(a, b);
        self
    }

    pub fn walls(&self) -> &[Wall<F>] {
        &self.walls
    }

    pub fn clear(&mut self) {
        self.walls.clear();
    }

    fn cast(wall: &Wall<F>, start: Vec2<F>, ray: Vec2<F>) -> Option<(F, RayHit<F>)> {
        let edge = wall.b - wall.a;
        let denom = ray.cross(edge);
        if denom == F::zero() {
            return None; // parallel
        }

        let to_wall = wall.a - start;
        let t = to_wall.cross(edge) / denom;
        let u = to_wall.cross(ray) / denom;
        if t < F::zero() || t > F::one() || u < F::zero() || u > F::one() {
            return None;
        }

        let mut normal = edge.tangent().normalized();
        if normal.dot(ray) > F::zero() {
            normal = -normal;
        }
        Some((t, RayHit { position: start + ray * t, normal }))
    }
}

impl<F: Float> CollisionQuery<F> for SegmentWorld<F> {
    fn intersect_ray(&self, start: Vec2<F>, end: Vec2<F>, mask: CollisionMask) -> Option<RayHit<F>> {
        let ray = end - start;
        self.walls
            .iter()
            .filter(|w| w.layers.intersects(mask))
            .filter_map(|w| Self::cast(w, start, ray))
            .fold(None, |best: Option<(F, RayHit<F>)>, hit| match best {
                Some((t, _)) if t <= hit.0 => best,
                _ => Some(hit),
            })
            .map(|(_, hit)| hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> SegmentWorld<f32> {
        SegmentWorld::new().with_wall(Vec2::new(-10.0, 5.0), Vec2::new(10.0, 5.0))
    }

    #[test]
    fn ray_hits_floor_with_upward_normal() {
        let hit = floor()
            .intersect_ray(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0), CollisionMask::ALL)
            .unwrap();
        assert_eq!(hit.position, Vec2::new(0.0, 5.0));
        assert_eq!(hit.normal, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn short_ray_misses() {
        let hit = floor().intersect_ray(Vec2::new(0.0, 0.0), Vec2::new(0.0, 4.0), CollisionMask::ALL);
        assert!(hit.is_none());
    }

    #[test]
    fn mask_filters_layers() {
        let mut world = SegmentWorld::new();
        world.add_wall_on(Vec2::new(-1.0f32, 1.0), Vec2::new(1.0, 1.0), CollisionMask::layer(3));
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(0.0, 2.0);
        assert!(world.intersect_ray(start, end, CollisionMask::layer(0)).is_none());
        assert!(world.intersect_ray(start, end, CollisionMask::layer(3)).is_some());
    }

    #[test]
    fn out_of_range_layer_is_empty() {
        assert_eq!(CollisionMask::layer(31).bits(), 1 << 31);
        assert_eq!(CollisionMask::layer(32), CollisionMask::NONE);
        assert!(!CollisionMask::layer(u32::MAX).intersects(CollisionMask::ALL));
    }

    #[test]
    fn closest_wall_wins() {
        let world = floor().with_wall(Vec2::new(-10.0, 2.0), Vec2::new(10.0, 2.0));
        let hit = world
            .intersect_ray(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0), CollisionMask::ALL)
            .unwrap();
        assert!(hit.position.distance(Vec2::new(0.0, 2.0)) < 1e-5);
    }
}
