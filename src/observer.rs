//! Step observer trait for hooking into registry ticks and rope steps.

/// Trait for observing rope simulation.
///
/// The registry brackets every tick with [`on_pre_update`](Self::on_pre_update)
/// and [`on_post_update`](Self::on_post_update); the solver reports its phases
/// in between, once per rope step. All methods have default no-op
/// implementations.
pub trait StepObserver {
    /// Called before any rope is stepped in a tick.
    fn on_pre_update(&mut self) {}

    /// Called after a rope's points have been integrated and bent.
    fn on_integrate(&mut self) {}

    /// Called after each distance relaxation pass.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called after the collision pass of a rope with collisions enabled.
    fn on_collisions(&mut self) {}

    /// Called when one rope's step has been written back.
    fn on_step_complete(&mut self) {}

    /// Called once every rope is stepped and the tick duration is recorded.
    fn on_post_update(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

impl<O: StepObserver + ?Sized> StepObserver for &mut O {
    fn on_pre_update(&mut self) { (**self).on_pre_update() }
    fn on_integrate(&mut self) { (**self).on_integrate() }
    fn on_constraint_iteration(&mut self, iteration: usize) { (**self).on_constraint_iteration(iteration) }
    fn on_collisions(&mut self) { (**self).on_collisions() }
    fn on_step_complete(&mut self) { (**self).on_step_complete() }
    fn on_post_update(&mut self) { (**self).on_post_update() }
}
