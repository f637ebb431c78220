//! Rope state: the capability set the solver reads and writes, and a plain
//! owned rope that implements it.

use core::fmt;

use crate::config::RopeConfig;
use crate::curve::DampingCurve;
use crate::error::{Result, RopeError};
use crate::float::Float;
use crate::vec::Vec2;
use alloc::boxed::Box;
use alloc::vec::Vec as AllocVec;

/// Everything [`ChainSolver`](crate::solver::ChainSolver) needs from a rope.
///
/// Hosts with their own entity storage implement this on their rope type;
/// [`Rope`] is the ready-made implementation.
pub trait RopeHandle<F: Float> {
    /// Current positions, anchor first.
    fn points(&self) -> &[Vec2<F>];
    /// Positions from the previous step. Same length as [`points`](Self::points).
    fn old_points(&self) -> &[Vec2<F>];
    fn set_points(&mut self, points: &[Vec2<F>]);
    fn set_old_points(&mut self, old_points: &[Vec2<F>]);
    /// Rest length between point `i` and `i + 1`.
    fn segment_lengths(&self) -> &[F];
    fn config(&self) -> &RopeConfig<F>;
    /// Where point 0 is pinned each step.
    fn anchor_position(&self) -> Vec2<F>;
    /// Unit "down" of the rope's owner, the reference for the first bend.
    fn reference_down(&self) -> Vec2<F>;
    fn damping_curve(&self) -> Option<&dyn DampingCurve<F>> {
        None
    }
}

/// An owned rope of Verlet points.
pub struct Rope<F: Float> {
    points: AllocVec<Vec2<F>>,
    old_points: AllocVec<Vec2<F>>,
    segment_lengths: AllocVec<F>,
    /// Initial layout relative to point 0, used by [`Rope::reset`].
    rest_offsets: AllocVec<Vec2<F>>,
    anchor: Vec2<F>,
    down: Vec2<F>,
    config: RopeConfig<F>,
    damping_curve: Option<Box<dyn DampingCurve<F>>>,
}

impl<F: Float> Rope<F> {
    /// Build a rope at rest from its initial layout.
    ///
    /// Rest lengths are measured from `points`, the anchor is the first point
    /// and `old_points` equals `points` so the rope starts without velocity.
    /// Empty and single-point ropes are valid; they simply never move.
    pub fn new(points: AllocVec<Vec2<F>>, config: RopeConfig<F>) -> Self {
        let segment_lengths = points.windows(2).map(|w| w[0].distance(w[1])).collect();
        let old_points = points.clone();
        Self::assemble(points, old_points, segment_lengths, config)
    }

    /// Build a rope from explicit buffers, e.g. state restored from a host.
    pub fn with_state(
        points: AllocVec<Vec2<F>>,
        old_points: AllocVec<Vec2<F>>,
        segment_lengths: AllocVec<F>,
        config: RopeConfig<F>,
    ) -> Result<Self> {
        if old_points.len() != points.len() {
            return Err(RopeError::LengthMismatch {
                points: points.len(),
                old_points: old_points.len(),
            });
        }
        if segment_lengths.len() != points.len().saturating_sub(1) {
            return Err(RopeError::SegmentCountMismatch {
                points: points.len(),
                segments: segment_lengths.len(),
            });
        }
        Ok(Self::assemble(points, old_points, segment_lengths, config))
    }

    /// Evenly split the line from `start` to `end` into `segments` pieces.
    pub fn straight(start: Vec2<F>, end: Vec2<F>, segments: usize, config: RopeConfig<F>) -> Result<Self> {
        if segments == 0 {
            return Err(RopeError::InvalidSegmentCount);
        }
        let count = F::from_f64(segments as f64);
        let points = (0..=segments)
            .map(|i| start.lerp(end, F::from_f64(i as f64) / count))
            .collect();
        Ok(Self::new(points, config))
    }

    /// A rope of total `length` hanging straight down from `anchor`.
    pub fn hanging(anchor: Vec2<F>, length: F, segments: usize, config: RopeConfig<F>) -> Result<Self> {
        Self::straight(anchor, anchor + Vec2::down() * length, segments, config)
    }

    fn assemble(
        points: AllocVec<Vec2<F>>,
        old_points: AllocVec<Vec2<F>>,
        segment_lengths: AllocVec<F>,
        config: RopeConfig<F>,
    ) -> Self {
        let anchor = points.first().copied().unwrap_or_else(Vec2::zero);
        let rest_offsets = points.iter().map(|&p| p - anchor).collect();
        Rope {
            points,
            old_points,
            segment_lengths,
            rest_offsets,
            anchor,
            down: Vec2::down(),
            config,
            damping_curve: None,
        }
    }

    pub fn anchor(&self) -> Vec2<F> {
        self.anchor
    }

    /// Move the anchor. Point 0 follows on the next step.
    pub fn set_anchor(&mut self, anchor: Vec2<F>) {
        self.anchor = anchor;
    }

    pub fn set_reference_down(&mut self, down: Vec2<F>) {
        self.down = down.normalized();
    }

    pub fn set_damping_curve<C: DampingCurve<F> + 'static>(&mut self, curve: C) {
        self.damping_curve = Some(Box::new(curve));
    }

    pub fn with_damping_curve<C: DampingCurve<F> + 'static>(mut self, curve: C) -> Self {
        self.set_damping_curve(curve);
        self
    }

    pub fn clear_damping_curve(&mut self) {
        self.damping_curve = None;
    }

    pub fn has_damping_curve(&self) -> bool {
        self.damping_curve.is_some()
    }

    pub fn config_mut(&mut self) -> &mut RopeConfig<F> {
        &mut self.config
    }

    /// Put the rope back into its initial layout, hanging from the current
    /// anchor, with all velocity dropped.
    pub fn reset(&mut self) {
        let anchor = self.anchor;
        self.points.clear();
        self.points.extend(self.rest_offsets.iter().map(|&o| anchor + o));
        self.old_points.clone_from(&self.points);
    }

    /// Sum of the rest lengths.
    pub fn rope_length(&self) -> F {
        self.segment_lengths.iter().fold(F::zero(), |acc, &l| acc + l)
    }

    /// Sum of the current distances between neighbouring points.
    pub fn current_length(&self) -> F {
        self.points
            .windows(2)
            .fold(F::zero(), |acc, w| acc + w[0].distance(w[1]))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.segment_lengths.len()
    }

    /// The free end of the rope.
    pub fn tip(&self) -> Option<Vec2<F>> {
        self.points.last().copied()
    }

    pub fn point(&self, index: usize) -> Option<Vec2<F>> {
        self.points.get(index).copied()
    }
}

impl<F: Float> RopeHandle<F> for Rope<F> {
    fn points(&self) -> &[Vec2<F>] {
        &self.points
    }

    fn old_points(&self) -> &[Vec2<F>] {
        &self.old_points
    }

    fn set_points(&mut self, points: &[Vec2<F>]) {
        self.points.clear();
        self.points.extend_from_slice(points);
    }

    fn set_old_points(&mut self, old_points: &[Vec2<F>]) {
        self.old_points.clear();
        self.old_points.extend_from_slice(old_points);
    }

    fn segment_lengths(&self) -> &[F] {
        &self.segment_lengths
    }

    fn config(&self) -> &RopeConfig<F> {
        &self.config
    }

    fn anchor_position(&self) -> Vec2<F> {
        self.anchor
    }

    fn reference_down(&self) -> Vec2<F> {
        self.down
    }

    fn damping_curve(&self) -> Option<&dyn DampingCurve<F>> {
        match &self.damping_curve {
            Some(curve) => Some(&**curve),
            None => None,
        }
    }
}

impl<F: Float> fmt::Debug for Rope<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rope")
            .field("points", &self.points)
            .field("old_points", &self.old_points)
            .field("segment_lengths", &self.segment_lengths)
            .field("anchor", &self.anchor)
            .field("down", &self.down)
            .field("config", &self.config)
            .field("damping_curve", &self.damping_curve.is_some())
            .finish()
    }
}
