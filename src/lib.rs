//! Verlet rope chains for 2D games.
//!
//! `ropy` steps independent chains of points once per physics tick:
//! Verlet integration under gravity and exponential damping, an accumulated
//! bending force, sequential distance relaxation from a pinned anchor, and
//! swept collision sliding against whatever spatial index the host provides.
//!
//! # Features
//!
//! - **Verlet ropes**: implicit velocity from the previous positions
//! - **Bending stiffness**: springy joints that resist turning away from the
//!   owner's "down"
//! - **Distance relaxation**: anchor-pinned, Gauss-Seidel style
//! - **Collision sliding**: multi-slide response through the `CollisionQuery` trait
//! - **Registry**: track ropes by handle and time each tick
//! - **Observable**: monitor ticks and phases via the `StepObserver` trait
//! - **`no_std` compatible**: disable the default `std` feature for embedded
//!   and WASM hosts
//!
//! # Example
//! ```
//! use ropy::{NoCollision, NoOpStepObserver, Rope, RopeArena, RopeConfig, SimulationRegistry, ManualClock, Vec2};
//!
//! let mut ropes = RopeArena::new();
//! let rope = Rope::hanging(Vec2::new(0.0f32, 0.0), 10.0, 10, RopeConfig::new()).unwrap();
//! let id = ropes.insert(rope);
//!
//! let mut registry: SimulationRegistry<f32, _> = SimulationRegistry::new(ManualClock::new());
//! registry.register(id);
//! registry.tick(1.0 / 60.0, &mut ropes, &NoCollision, &mut NoOpStepObserver);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod curve;
pub mod collision;
pub mod config;
pub mod rope;
pub mod solver;
pub mod registry;
pub mod clock;
pub mod observer;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use curve::{DampingCurve, ConstantCurve, BakedCurve};
pub use collision::{CollisionMask, CollisionQuery, RayHit, NoCollision, SegmentWorld, Wall};
pub use config::{RopeConfig, RegistryConfig};
pub use rope::{Rope, RopeHandle};
pub use solver::ChainSolver;
pub use registry::{SimulationRegistry, RopeArena, RopeId, RopeStore};
pub use clock::{Clock, ManualClock};
#[cfg(feature = "std")]
pub use clock::StdClock;
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::RopeError;
