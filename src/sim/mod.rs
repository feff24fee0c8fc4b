//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Synchronous, ordered event dispatch
//! - No rendering or platform dependencies

pub mod collision;
pub mod controller;
pub mod events;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::CollisionCheck;
pub use controller::{TrackingMode, track_ball};
pub use events::{Event, EventBus, EventKind, HitDirection, HitTarget};
pub use session::{GameSession, World};
pub use state::{Ball, Entities, GamePhase, Outcome, Paddle, PaddleKind};
pub use tick::tick;
