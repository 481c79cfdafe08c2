//! Simulation module
//!
//! All bubble logic lives here. This module must stay pure:
//! - One step per animation frame, no wall-clock input
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod bubble;
pub mod collision;
pub mod layout;
pub mod physics;
pub mod state;
pub mod tick;

pub use bubble::Bubble;
pub use collision::{CollisionResult, circle_collision, exchange_velocities};
pub use layout::{
    CirclePlacement, GridPlacement, Pattern, Placement, RandomPlacement, SpiralPlacement, layout,
};
pub use physics::{PhysicsConfig, PhysicsEngine};
pub use state::{Drag, SandboxState, SimPhase, Snapshot};
pub use tick::tick;
