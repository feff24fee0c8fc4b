//! Game configuration
//!
//! Passed in on (re)start. Nothing here is persisted; the page hands the
//! values over as JSON or explicit parameters.

use serde::{Deserialize, Serialize};

use crate::ArenaSize;
use crate::sim::TrackingMode;

/// Default background image
pub const DEFAULT_BACKGROUND: &str = "asset/pong_table.jpeg";

/// Restart parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Background image reference
    pub background: String,
    /// Opacity of the background image (0.0 - 1.0)
    pub background_alpha: f64,
    /// Opacity of the paddles (0.0 - 1.0)
    pub foreground_alpha: f64,
    /// CSS color of the ball
    pub ball_color: String,
    /// Computer paddle policy
    pub tracking: TrackingMode,
    pub arena: ArenaSize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
            background_alpha: 0.5,
            foreground_alpha: 1.0,
            ball_color: "white".to_string(),
            tracking: TrackingMode::Center,
            arena: ArenaSize::default(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON object; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Clamp opacities into range
    pub fn sanitized(mut self) -> Self {
        self.background_alpha = self.background_alpha.clamp(0.0, 1.0);
        self.foreground_alpha = self.foreground_alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_arena(mut self, arena: ArenaSize) -> Self {
        self.arena = arena;
        self
    }
}
