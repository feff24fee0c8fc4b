//! Computer paddle policy
//!
//! Pure tracking: no prediction and no overshoot correction. The paddle
//! steps toward the ball's current height once per tick and holds still
//! when exactly aligned.

use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle};

/// Which part of the paddle is compared against the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackingMode {
    /// Compare the paddle's vertical center to the ball
    #[default]
    Center,
    /// Only move once the ball is past the top or bottom edge
    Edges,
}

/// Step the computer paddle toward the ball for one tick
pub fn track_ball(paddle: &mut Paddle, ball: &Ball, mode: TrackingMode) {
    let target = ball.pos.y;
    match mode {
        TrackingMode::Center => {
            let mid = paddle.center_y();
            if mid < target {
                paddle.pos.y += paddle.speed;
            } else if mid > target {
                paddle.pos.y -= paddle.speed;
            }
        }
        TrackingMode::Edges => {
            if paddle.bottom() < target {
                paddle.pos.y += paddle.speed;
            } else if paddle.top() > target {
                paddle.pos.y -= paddle.speed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArenaSize;
    use glam::DVec2;

    fn setup(ball_y: f64) -> (Paddle, Ball) {
        let paddle = Paddle::computer(ArenaSize::new(800.0, 600.0));
        let ball = Ball::launch(DVec2::new(400.0, ball_y), 0.0);
        (paddle, ball)
    }

    #[test]
    fn test_center_moves_toward_ball() {
        let (mut paddle, ball) = setup(500.0);
        let before = paddle.pos.y;
        track_ball(&mut paddle, &ball, TrackingMode::Center);
        assert_eq!(paddle.pos.y, before + paddle.speed);

        let (mut paddle, ball) = setup(100.0);
        track_ball(&mut paddle, &ball, TrackingMode::Center);
        assert_eq!(paddle.pos.y, before - paddle.speed);
    }

    #[test]
    fn test_center_holds_when_aligned() {
        // Paddle center is 300 in a 600-high arena
        let (mut paddle, ball) = setup(300.0);
        let before = paddle.pos.y;
        track_ball(&mut paddle, &ball, TrackingMode::Center);
        assert_eq!(paddle.pos.y, before);
    }

    #[test]
    fn test_edges_holds_while_ball_on_face() {
        let (mut paddle, ball) = setup(330.0);
        let before = paddle.pos.y;
        track_ball(&mut paddle, &ball, TrackingMode::Edges);
        assert_eq!(paddle.pos.y, before);

        let (mut paddle, ball) = setup(341.0);
        track_ball(&mut paddle, &ball, TrackingMode::Edges);
        assert_eq!(paddle.pos.y, before + paddle.speed);

        let (mut paddle, ball) = setup(259.0);
        track_ball(&mut paddle, &ball, TrackingMode::Edges);
        assert_eq!(paddle.pos.y, before - paddle.speed);
    }
}
