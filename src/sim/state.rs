//! Game entities and phase types
//!
//! Positions are in arena pixels with the origin at the top-left corner;
//! velocities are in pixels per tick.

use glam::DVec2;
use rand::Rng;

use crate::ArenaSize;
use crate::consts::*;

/// How a run ended, from the human's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Motion frozen until the next Space
    Paused,
    /// Run ended; only Enter does anything
    Ended(Outcome),
}

impl GamePhase {
    #[inline]
    pub fn is_playing(self) -> bool {
        self == GamePhase::Playing
    }
}

/// Which side controls a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleKind {
    /// Right side, driven by Up/Down key events
    Human,
    /// Left side, driven by the tracking heuristic each tick
    Computer,
}

/// A paddle. `pos` is the top-left corner.
#[derive(Debug, Clone)]
pub struct Paddle {
    pub kind: PaddleKind,
    pub pos: DVec2,
    pub width: f64,
    pub height: f64,
    /// Distance moved per key press or tracking step
    pub speed: f64,
    /// Points earned; only the human paddle scores
    pub score: u32,
}

impl Paddle {
    fn new(kind: PaddleKind, pos: DVec2) -> Self {
        Self {
            kind,
            pos,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_STEP,
            score: 0,
        }
    }

    /// Human paddle against the right edge, vertically centered
    pub fn human(arena: ArenaSize) -> Self {
        Self::new(
            PaddleKind::Human,
            DVec2::new(
                arena.width - PADDLE_WIDTH,
                arena.height / 2.0 - PADDLE_HEIGHT / 2.0,
            ),
        )
    }

    /// Computer paddle against the left edge, vertically centered
    pub fn computer(arena: ArenaSize) -> Self {
        Self::new(
            PaddleKind::Computer,
            DVec2::new(0.0, arena.height / 2.0 - PADDLE_HEIGHT / 2.0),
        )
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.pos.y + self.height
    }

    #[inline]
    pub fn center_y(&self) -> f64 {
        self.pos.y + self.height / 2.0
    }

    /// Whether `y` lies on the paddle's face (edges inclusive)
    #[inline]
    pub fn covers(&self, y: f64) -> bool {
        y >= self.top() && y <= self.bottom()
    }

    /// Move up one step, clamped to the top of the arena
    pub fn step_up(&mut self) {
        self.pos.y = (self.pos.y - self.speed).max(0.0);
    }

    /// Move down one step, clamped so the paddle stays inside the arena
    pub fn step_down(&mut self, arena_height: f64) {
        let max_y = (arena_height - self.height).max(0.0);
        self.pos.y = (self.pos.y + self.speed).min(max_y);
    }
}

/// The ball. `pos` is the center.
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    /// Speed at launch; the speed-up curve scales from this
    pub base_speed: f64,
    /// Current speed; always equals `vel.length()`
    pub speed: f64,
}

impl Ball {
    /// Ball at `pos` heading along `angle` (radians) at the base speed
    pub fn launch(pos: DVec2, angle: f64) -> Self {
        let speed = BALL_BASE_SPEED;
        Self {
            pos,
            vel: DVec2::new(angle.cos(), angle.sin()) * speed,
            radius: BALL_RADIUS,
            base_speed: speed,
            speed,
        }
    }

    /// Advance one tick
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Speed after a human paddle hit at the given score:
    /// `base * (ln(score / 10 + 1) + 1)`
    pub fn speed_for_score(&self, score: u32) -> f64 {
        self.base_speed * ((score as f64 / 10.0 + 1.0).ln() + 1.0)
    }

    /// Rescale velocity to `new_speed`, keeping its direction
    pub fn set_speed(&mut self, new_speed: f64) {
        if self.speed > 0.0 {
            self.vel *= new_speed / self.speed;
        }
        self.speed = new_speed;
    }

    /// Reverse the velocity component orthogonal to the hit surface
    pub fn bounce(&mut self, horizontal: bool) {
        if horizontal {
            self.vel.x = -self.vel.x;
        } else {
            self.vel.y = -self.vel.y;
        }
    }
}

/// The three entities of an active game
#[derive(Debug, Clone)]
pub struct Entities {
    pub human: Paddle,
    pub computer: Paddle,
    pub ball: Ball,
}

impl Entities {
    /// Fresh paddles and a centered ball launched at a random angle in [0, 2π)
    pub fn spawn<R: Rng + ?Sized>(arena: ArenaSize, rng: &mut R) -> Self {
        let angle = rng.random_range(0.0..std::f64::consts::TAU);
        Self {
            human: Paddle::human(arena),
            computer: Paddle::computer(arena),
            ball: Ball::launch(arena.center(), angle),
        }
    }
}
