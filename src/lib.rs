//! Canvas Pong - classic two-paddle Pong against a tracking computer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state machine)
//! - `game_loop`: Fixed-interval tick driver
//! - `renderer`: Drawing against an abstract 2D render surface
//! - `audio`: Fire-and-forget sound effects
//! - `input`: Logical key mapping
//! - `settings`: Restart configuration

pub mod audio;
pub mod game_loop;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game_loop::GameLoop;
pub use input::InputKey;
pub use settings::GameConfig;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Frequency constant the tick period and per-tick speeds derive from
    pub const FREQ: f64 = 5.0;
    /// Fixed tick period in milliseconds (40 ms)
    pub const TICK_MS: f64 = 200.0 / FREQ;
    /// Maximum ticks per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Delay between the final frame and the win/lose message
    pub const OUTCOME_DELAY_MS: f64 = 100.0;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f64 = 800.0;
    pub const ARENA_HEIGHT: f64 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f64 = 20.0;
    pub const PADDLE_HEIGHT: f64 = 80.0;
    /// Distance a paddle travels per key press or per tracking tick
    pub const PADDLE_STEP: f64 = 40.0 / FREQ;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 10.0;
    /// Base ball speed (distance per tick)
    pub const BALL_BASE_SPEED: f64 = 50.0 / FREQ;

    /// Points awarded per human paddle hit
    pub const SCORE_INCREMENT: u32 = 10;
}

/// Arena dimensions, taken from the render surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ArenaSize {
    fn default() -> Self {
        Self {
            width: consts::ARENA_WIDTH,
            height: consts::ARENA_HEIGHT,
        }
    }
}

impl ArenaSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Arena center point
    #[inline]
    pub fn center(&self) -> glam::DVec2 {
        glam::DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}
