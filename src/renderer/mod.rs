//! Frame rendering
//!
//! Draws the session against a minimal immediate-mode 2D surface. The
//! browser implementation lives in `canvas`; tests record draw calls.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::sim::{GamePhase, GameSession, Outcome, Paddle, PaddleKind};

pub const BACKDROP_COLOR: &str = "black";
pub const HUMAN_COLOR: &str = "green";
pub const COMPUTER_COLOR: &str = "yellow";
pub const SCORE_COLOR: &str = "white";
pub const PAUSE_COLOR: &str = "red";
pub const WIN_COLOR: &str = "green";
pub const LOSE_COLOR: &str = "red";
/// All text is drawn centered in this font
pub const FONT: &str = "30px Arial";

pub const PAUSE_MESSAGE: &str = "Press [Spacebar] to continue to game";
pub const WIN_MESSAGE: &str = "You have WON!! Press [Enter] to start another game!";
pub const LOSE_MESSAGE: &str = "Ohh~ You LOSE :( Press [Enter] to start another game ...";

/// Immediate-mode drawing primitives
pub trait RenderSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str);
    /// Centered text at (x, y) in [`FONT`]
    fn draw_text(&mut self, text: &str, x: f64, y: f64, color: &str);
    fn draw_image(&mut self, src: &str, x: f64, y: f64, w: f64, h: f64);
    fn save(&mut self);
    fn set_alpha(&mut self, alpha: f64);
    fn restore(&mut self);
}

/// Surface that draws nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn clear_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {}
    fn fill_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64, _color: &str) {}
    fn fill_circle(&mut self, _cx: f64, _cy: f64, _radius: f64, _color: &str) {}
    fn draw_text(&mut self, _text: &str, _x: f64, _y: f64, _color: &str) {}
    fn draw_image(&mut self, _src: &str, _x: f64, _y: f64, _w: f64, _h: f64) {}
    fn save(&mut self) {}
    fn set_alpha(&mut self, _alpha: f64) {}
    fn restore(&mut self) {}
}

/// Run `draw` with the global alpha set, restoring it afterwards
fn with_alpha(
    surface: &mut dyn RenderSurface,
    alpha: f64,
    draw: impl FnOnce(&mut dyn RenderSurface),
) {
    surface.save();
    surface.set_alpha(alpha);
    draw(&mut *surface);
    surface.restore();
}

/// Black backdrop with the translucent background image on top
fn draw_backdrop(session: &GameSession, surface: &mut dyn RenderSurface) {
    let arena = session.arena();
    let config = session.config();
    surface.clear_rect(0.0, 0.0, arena.width, arena.height);
    surface.fill_rect(0.0, 0.0, arena.width, arena.height, BACKDROP_COLOR);
    with_alpha(surface, config.background_alpha, |s| {
        s.draw_image(&config.background, 0.0, 0.0, arena.width, arena.height)
    });
}

fn draw_paddle(paddle: &Paddle, alpha: f64, surface: &mut dyn RenderSurface) {
    let color = match paddle.kind {
        PaddleKind::Human => HUMAN_COLOR,
        PaddleKind::Computer => COMPUTER_COLOR,
    };
    with_alpha(surface, alpha, |s| {
        s.fill_rect(paddle.pos.x, paddle.pos.y, paddle.width, paddle.height, color)
    });
}

/// Draw one gameplay frame: backdrop, paddles, ball, score and pause overlay
pub fn draw_frame(session: &GameSession, surface: &mut dyn RenderSurface) {
    let arena = session.arena();
    let config = session.config();
    let entities = session.entities();

    draw_backdrop(session, surface);
    draw_paddle(&entities.human, config.foreground_alpha, surface);
    draw_paddle(&entities.computer, config.foreground_alpha, surface);

    let ball = &entities.ball;
    surface.fill_circle(ball.pos.x, ball.pos.y, ball.radius, &config.ball_color);

    surface.draw_text(
        &format!("Score: {}", session.score()),
        arena.width / 2.0,
        30.0,
        SCORE_COLOR,
    );
    if session.phase() == GamePhase::Paused {
        surface.draw_text(PAUSE_MESSAGE, arena.width / 2.0, arena.height / 2.0, PAUSE_COLOR);
    }
}

/// Draw the end-of-game screen
pub fn draw_outcome(session: &GameSession, outcome: Outcome, surface: &mut dyn RenderSurface) {
    let arena = session.arena();
    let (message, color) = match outcome {
        Outcome::Win => (WIN_MESSAGE, WIN_COLOR),
        Outcome::Lose => (LOSE_MESSAGE, LOSE_COLOR),
    };
    draw_backdrop(session, surface);
    surface.draw_text(message, arena.width / 2.0, arena.height / 2.0, color);
}
