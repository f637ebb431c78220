//! One simulation step for one rope.
//!
//! A step runs three phases in a fixed order:
//!
//! 1. **Integrate**: Verlet velocity from the previous positions, an
//!    accumulated bending force, exponential damping and gravity.
//! 2. **Relax**: pin point 0 to the anchor, snap point 1 to its rest length,
//!    then walk the rest of the chain splitting each length error between
//!    the two points of the segment. Repeated `iterations` times.
//! 3. **Collide**: sweep every moving point from where it was to where it
//!    ended up and slide it along whatever it hits.
//!
//! The phases are order dependent; results are reproducible bit for bit for
//! identical inputs.

use crate::collision::CollisionQuery;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::rope::RopeHandle;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Divisor turning a bend angle into a force scale.
const BEND_ANGLE_DIVISOR: f32 = 3.1415;
/// A hit closer than this fraction of the sweep counts as stuck.
const STUCK_FRACTION: f32 = 0.001;
/// A hit further than this fraction of the sweep ends sliding.
const COMPLETE_FRACTION: f32 = 0.999;

/// Steps ropes one at a time.
///
/// Holds scratch buffers only, so a single solver can serve any number of
/// ropes without allocating once the buffers have grown.
#[derive(Debug, Default)]
pub struct ChainSolver<F: Float> {
    points: AllocVec<Vec2<F>>,
    old_points: AllocVec<Vec2<F>>,
}

impl<F: Float> ChainSolver<F> {
    pub fn new() -> Self {
        ChainSolver {
            points: AllocVec::new(),
            old_points: AllocVec::new(),
        }
    }

    /// Advance `rope` by `delta` seconds.
    ///
    /// Returns `false` when the rope was left untouched: fewer than two
    /// points, or buffers that disagree on the point count.
    pub fn step<R, Q, O>(&mut self, rope: &mut R, delta: F, world: &Q, observer: &mut O) -> bool
    where
        R: RopeHandle<F> + ?Sized,
        Q: CollisionQuery<F> + ?Sized,
        O: StepObserver,
    {
        let n = rope.points().len();
        if n < 2 {
            return false;
        }
        if rope.old_points().len() != n || rope.segment_lengths().len() + 1 != n {
            log::warn!(
                "skipping rope with {} points, {} old points and {} segment lengths",
                n,
                rope.old_points().len(),
                rope.segment_lengths().len()
            );
            return false;
        }

        self.points.clear();
        self.points.extend_from_slice(rope.points());
        self.old_points.clear();
        self.old_points.extend_from_slice(rope.old_points());

        integrate(&mut self.points, &mut self.old_points, &*rope, delta);
        observer.on_integrate();

        let config = rope.config();
        for iteration in 0..config.iterations {
            relax(&mut self.points, rope.segment_lengths(), rope.anchor_position());
            observer.on_constraint_iteration(iteration);
        }

        if config.collisions {
            collide(&mut self.points, &self.old_points, &*rope, world);
            observer.on_collisions();
        }

        rope.set_points(&self.points);
        rope.set_old_points(&self.old_points);
        observer.on_step_complete();
        true
    }
}

/// Normalized position of point `index` along a rope of `count` points.
pub fn point_fraction<F: Float>(index: usize, count: usize) -> F {
    if count > 1 {
        F::from_f64(index as f64) / F::from_f64((count - 1) as f64)
    } else {
        F::zero()
    }
}

fn integrate<F, R>(points: &mut [Vec2<F>], old_points: &mut [Vec2<F>], rope: &R, delta: F)
where
    F: Float,
    R: RopeHandle<F> + ?Sized,
{
    let config = rope.config();
    let curve = rope.damping_curve();
    let gravity = Vec2::down() * config.gravity * delta;
    let bend_divisor = F::from_f32(BEND_ANGLE_DIVISOR);

    // Both accumulate down the chain and start fresh every step.
    let mut bend_force = Vec2::zero();
    let mut parent_dir = rope.reference_down();

    let n = points.len();
    for i in 1..n {
        let mut velocity = points[i] - old_points[i];
        let damp_mult = match curve {
            Some(curve) => curve.evaluate(point_fraction(i, n)),
            None => F::one(),
        };

        if config.stiffness > F::zero() {
            let seg_dir = (points[i] - points[i - 1]).normalized();
            let angle = seg_dir.angle_to(parent_dir);
            bend_force += seg_dir.tangent() * (-angle / bend_divisor) * config.stiffness;
            velocity += bend_force;
            parent_dir = seg_dir;
        }

        let damped = velocity * (-config.damping * damp_mult * delta).exp();
        old_points[i] = points[i];
        points[i] = points[i] + damped + gravity;
    }
}

fn relax<F: Float>(points: &mut [Vec2<F>], segment_lengths: &[F], anchor: Vec2<F>) {
    points[0] = anchor;
    points[1] = points[0] + (points[1] - points[0]).normalized() * segment_lengths[0];

    for i in 1..points.len() - 1 {
        let diff = points[i + 1] - points[i];
        let distance = diff.length();
        let dir = diff / distance;
        let error = (segment_lengths[i] - distance) * F::half();
        points[i] -= dir * error;
        points[i + 1] += dir * error;
    }
}

fn collide<F, R, Q>(points: &mut [Vec2<F>], old_points: &[Vec2<F>], rope: &R, world: &Q)
where
    F: Float,
    R: RopeHandle<F> + ?Sized,
    Q: CollisionQuery<F> + ?Sized,
{
    let config = rope.config();
    let stuck = F::from_f32(STUCK_FRACTION);
    let complete = F::from_f32(COMPLETE_FRACTION);

    for i in 1..points.len() {
        let mut start = old_points[i];
        let mut end = points[i];
        let mut velocity = end - start;
        let original_velocity = velocity;

        if velocity.length_sq() == F::zero() {
            continue;
        }

        for _ in 0..config.max_slides {
            let Some(hit) = world.intersect_ray(start, end, config.collision_mask) else {
                points[i] = end;
                break;
            };

            let traveled = start.distance(hit.position) / velocity.length();

            // Keep the simulated position so the point can work itself free.
            if traveled <= stuck {
                break;
            }

            points[i] = hit.position + hit.normal;

            if traveled > complete {
                break;
            }

            velocity = velocity.slide(hit.normal) * (F::one() - traveled);

            // Sliding back against the original motion only jitters.
            if velocity.dot(original_velocity) < F::zero() {
                break;
            }

            start = points[i];
            end = start + velocity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_guards_short_ropes() {
        assert_eq!(point_fraction::<f32>(0, 0), 0.0);
        assert_eq!(point_fraction::<f32>(0, 1), 0.0);
        assert_eq!(point_fraction::<f32>(2, 5), 0.5);
        assert_eq!(point_fraction::<f64>(4, 5), 1.0);
    }

    #[test]
    fn relax_pins_anchor_and_first_segment() {
        let mut points = [Vec2::new(3.0f32, 3.0), Vec2::new(0.0, 5.0)];
        relax(&mut points, &[2.0], Vec2::new(0.0, 0.0));
        assert_eq!(points[0], Vec2::new(0.0, 0.0));
        assert_eq!(points[1], Vec2::new(0.0, 2.0));
    }

    #[test]
    fn relax_splits_error_between_neighbours() {
        let mut points = [Vec2::new(0.0f32, 0.0), Vec2::new(0.0, 1.0), Vec2::new(0.0, 4.0)];
        relax(&mut points, &[1.0, 1.0], Vec2::new(0.0, 0.0));
        // distance 3, rest 1: each end moves by 1 towards the other
        assert_eq!(points[1], Vec2::new(0.0, 2.0));
        assert_eq!(points[2], Vec2::new(0.0, 3.0));
    }
}
