//! Configuration types for ropes and the simulation registry.

use crate::collision::CollisionMask;
use crate::float::Float;

/// Per-rope simulation parameters.
///
/// # Builder Pattern
/// ```
/// use ropy::config::RopeConfig;
/// use ropy::collision::CollisionMask;
///
/// let config: RopeConfig<f32> = RopeConfig::new()
///     .with_gravity(98.0)
///     .with_damping(2.0)
///     .with_stiffness(0.5)
///     .with_iterations(12)
///     .with_collisions(true)
///     .with_collision_mask(CollisionMask::layer(1))
///     .with_max_slides(2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RopeConfig<F: Float> {
    /// Acceleration along the down axis. Default: 100.
    pub gravity: F,
    /// Exponential velocity decay rate, per second. 0 = undamped. Default: 5.
    pub damping: F,
    /// Bending resistance. 0 disables the bending pass. Default: 0.
    pub stiffness: F,
    /// Distance relaxation passes per step. 0 lets points drift. Default: 10.
    pub iterations: usize,
    /// Run the collision sliding pass. Default: false.
    pub collisions: bool,
    /// Layers the collision pass queries. Default: layer 0.
    pub collision_mask: CollisionMask,
    /// Slides attempted per point per step. Default: 4.
    pub max_slides: usize,
}

impl<F: Float> RopeConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        RopeConfig {
            gravity: F::from_f32(100.0),
            damping: F::from_f32(5.0),
            stiffness: F::zero(),
            iterations: 10,
            collisions: false,
            collision_mask: CollisionMask::layer(0),
            max_slides: 4,
        }
    }

    /// A config with every force switched off, one relaxation pass and no
    /// collisions. Handy as a starting point for tests and kinematic ropes.
    pub fn still() -> Self {
        RopeConfig {
            gravity: F::zero(),
            damping: F::zero(),
            stiffness: F::zero(),
            iterations: 1,
            ..Self::new()
        }
    }

    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    /// Set the number of constraint iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_collisions(mut self, enabled: bool) -> Self {
        self.collisions = enabled;
        self
    }

    pub fn with_collision_mask(mut self, mask: CollisionMask) -> Self {
        self.collision_mask = mask;
        self
    }

    pub fn with_max_slides(mut self, max_slides: usize) -> Self {
        self.max_slides = max_slides;
        self
    }
}

impl<F: Float> Default for RopeConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Startup flags for a [`SimulationRegistry`](crate::registry::SimulationRegistry).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Keep stepping while the host is suspended (e.g. an editor view).
    pub override_active: bool,
    /// Whether the host starts out suspended.
    pub host_suspended: bool,
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override_active(mut self, value: bool) -> Self {
        self.override_active = value;
        self
    }

    pub fn with_host_suspended(mut self, value: bool) -> Self {
        self.host_suspended = value;
        self
    }
}
