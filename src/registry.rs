//! The set of ropes stepped every physics tick.
//!
//! The registry never owns ropes. It tracks [`RopeId`] handles and resolves
//! them through a [`RopeStore`] at tick time, so ropes live wherever the host
//! keeps them ([`RopeArena`] is the stock storage).

use crate::clock::Clock;
use crate::collision::CollisionQuery;
use crate::config::RegistryConfig;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::rope::RopeHandle;
use crate::solver::ChainSolver;
use alloc::vec::Vec as AllocVec;
use log::{debug, trace, warn};

/// Handle to a rope held in some [`RopeStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RopeId {
    index: u32,
    generation: u32,
}

impl RopeId {
    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// Resolves rope handles to ropes.
pub trait RopeStore<F: Float> {
    type Rope: RopeHandle<F> + ?Sized;

    fn rope_mut(&mut self, id: RopeId) -> Option<&mut Self::Rope>;
}

struct Slot<R> {
    generation: u32,
    rope: Option<R>,
}

/// Dense slot storage for ropes.
///
/// Removed slots are reused; a stale [`RopeId`] from a removed rope never
/// resolves to the rope that took its slot.
pub struct RopeArena<R> {
    slots: AllocVec<Slot<R>>,
    free: AllocVec<u32>,
    len: usize,
}

impl<R> RopeArena<R> {
    pub fn new() -> Self {
        RopeArena {
            slots: AllocVec::new(),
            free: AllocVec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, rope: R) -> RopeId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.rope = Some(rope);
            return RopeId { index, generation: slot.generation };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, rope: Some(rope) });
        RopeId { index, generation: 0 }
    }

    pub fn remove(&mut self, id: RopeId) -> Option<R> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        let rope = slot.rope.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(rope)
    }

    pub fn get(&self, id: RopeId) -> Option<&R> {
        self.slots
            .get(id.index())
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.rope.as_ref())
    }

    pub fn get_mut(&mut self, id: RopeId) -> Option<&mut R> {
        self.slots
            .get_mut(id.index())
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.rope.as_mut())
    }

    pub fn contains(&self, id: RopeId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<R> Default for RopeArena<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, R: RopeHandle<F>> RopeStore<F> for RopeArena<R> {
    type Rope = R;

    fn rope_mut(&mut self, id: RopeId) -> Option<&mut R> {
        self.get_mut(id)
    }
}

/// Tracks which ropes to simulate and steps them once per tick.
///
/// Stepping only happens while the registry is *active*: at least one rope
/// is registered and the host is either running or has the override set.
pub struct SimulationRegistry<F: Float, C: Clock> {
    ropes: AllocVec<RopeId>,
    solver: ChainSolver<F>,
    clock: C,
    override_active: bool,
    host_suspended: bool,
    active: bool,
    last_step_ms: f64,
}

impl<F: Float, C: Clock> SimulationRegistry<F, C> {
    pub fn new(clock: C) -> Self {
        Self::with_config(clock, RegistryConfig::default())
    }

    pub fn with_config(clock: C, config: RegistryConfig) -> Self {
        SimulationRegistry {
            ropes: AllocVec::new(),
            solver: ChainSolver::new(),
            clock,
            override_active: config.override_active,
            host_suspended: config.host_suspended,
            active: false,
            last_step_ms: 0.0,
        }
    }

    /// Start stepping `rope` every tick. Registering a rope twice steps it
    /// twice per tick.
    pub fn register(&mut self, rope: RopeId) {
        self.ropes.push(rope);
        self.update_activation();
    }

    /// Stop stepping one registration of `rope`. Storage order is not kept.
    ///
    /// Returns `false`, logs a warning and changes nothing when `rope` is
    /// not registered.
    pub fn unregister(&mut self, rope: RopeId) -> bool {
        let index = if self.ropes.last() == Some(&rope) {
            self.ropes.len() - 1
        } else {
            match self.ropes.iter().position(|&r| r == rope) {
                Some(index) => index,
                None => {
                    warn!("unregistering rope {:?} that was never registered", rope);
                    return false;
                }
            }
        };
        self.ropes.swap_remove(index);
        self.update_activation();
        true
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        self.ropes.clear();
        self.update_activation();
    }

    pub fn contains(&self, rope: RopeId) -> bool {
        self.ropes.contains(&rope)
    }

    /// Registered ropes in stepping order.
    pub fn ropes(&self) -> &[RopeId] {
        &self.ropes
    }

    /// Number of registrations, duplicates included.
    pub fn step_count(&self) -> usize {
        self.ropes.len()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn override_active(&self) -> bool {
        self.override_active
    }

    /// Keep stepping while the host is suspended.
    pub fn set_override_active(&mut self, value: bool) {
        self.override_active = value;
        self.update_activation();
    }

    pub fn host_suspended(&self) -> bool {
        self.host_suspended
    }

    /// Tell the registry whether the host is in a suspended (editor-like)
    /// state.
    pub fn set_host_suspended(&mut self, value: bool) {
        self.host_suspended = value;
        self.update_activation();
    }

    /// Wall time the last tick spent stepping ropes. Zero until the first
    /// tick after (re)activation.
    pub fn last_step_duration_ms(&self) -> f64 {
        self.last_step_ms
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Step every registered rope once, in registration order.
    ///
    /// Returns how many rope steps ran; `0` when inactive. Ids the store
    /// cannot resolve are skipped.
    pub fn tick<S, Q, O>(&mut self, delta: F, store: &mut S, world: &Q, observer: &mut O) -> usize
    where
        S: RopeStore<F> + ?Sized,
        Q: CollisionQuery<F> + ?Sized,
        O: StepObserver,
    {
        if !self.active {
            return 0;
        }

        observer.on_pre_update();
        let start = self.clock.now_micros();

        let mut stepped = 0;
        for &id in self.ropes.iter() {
            match store.rope_mut(id) {
                Some(rope) => {
                    self.solver.step(rope, delta, world, observer);
                    stepped += 1;
                }
                None => debug!("registered rope {:?} is not in the store", id),
            }
        }

        let elapsed = self.clock.now_micros().saturating_sub(start);
        self.last_step_ms = elapsed as f64 / 1000.0;
        trace!("stepped {} ropes in {:.3} ms", stepped, self.last_step_ms);
        observer.on_post_update();
        stepped
    }

    fn update_activation(&mut self) {
        self.last_step_ms = 0.0;
        let active = !self.ropes.is_empty() && (!self.host_suspended || self.override_active);
        if active != self.active {
            debug!("rope simulation {}", if active { "activated" } else { "deactivated" });
        }
        self.active = active;
    }
}

#[cfg(feature = "std")]
impl<F: Float> Default for SimulationRegistry<F, crate::clock::StdClock> {
    fn default() -> Self {
        Self::new(crate::clock::StdClock::new())
    }
}
