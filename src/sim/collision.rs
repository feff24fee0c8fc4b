//! Ball boundary and paddle checks
//!
//! Four independent checks run every tick in a fixed order. They are not
//! mutually exclusive: a ball in a corner can trip a wall check and a
//! paddle check in the same tick, and both events are reported.

use super::events::{Event, HitDirection, HitTarget};
use super::state::Entities;
use crate::ArenaSize;

/// One boundary test against the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionCheck {
    UpperWall,
    LowerWall,
    /// Right edge, defended by the human paddle
    HumanEdge,
    /// Left edge, defended by the computer paddle
    EnemyEdge,
}

impl CollisionCheck {
    /// Evaluation order within a tick
    pub const ORDER: [CollisionCheck; 4] = [
        CollisionCheck::UpperWall,
        CollisionCheck::LowerWall,
        CollisionCheck::HumanEdge,
        CollisionCheck::EnemyEdge,
    ];

    /// Run this check against the ball's current position.
    ///
    /// A successful human return also applies the speed-up for the
    /// human's current score before the hit is reported.
    pub fn evaluate(self, entities: &mut Entities, arena: ArenaSize) -> Option<Event> {
        let Entities {
            human,
            computer,
            ball,
        } = entities;

        match self {
            CollisionCheck::UpperWall => (ball.pos.y - ball.radius < 0.0).then_some(Event::BallHit {
                direction: HitDirection::Up,
                target: HitTarget::Wall,
            }),
            CollisionCheck::LowerWall => {
                (ball.pos.y + ball.radius > arena.height).then_some(Event::BallHit {
                    direction: HitDirection::Down,
                    target: HitTarget::Wall,
                })
            }
            CollisionCheck::HumanEdge => {
                if ball.pos.x + ball.radius <= arena.width - human.width {
                    return None;
                }
                if !human.covers(ball.pos.y) {
                    log::debug!(
                        "Ball at ({:.1}, {:.1}) missed human paddle [{:.1}, {:.1}]",
                        ball.pos.x,
                        ball.pos.y,
                        human.top(),
                        human.bottom()
                    );
                    return Some(Event::GameLose);
                }
                let new_speed = ball.speed_for_score(human.score);
                ball.set_speed(new_speed);
                log::debug!("Human hit, ball speed now {:.3}", ball.vel.length());
                Some(Event::BallHit {
                    direction: HitDirection::Right,
                    target: HitTarget::Human,
                })
            }
            CollisionCheck::EnemyEdge => {
                if ball.pos.x - ball.radius >= computer.width {
                    return None;
                }
                if !computer.covers(ball.pos.y) {
                    log::debug!(
                        "Ball at ({:.1}, {:.1}) missed computer paddle [{:.1}, {:.1}]",
                        ball.pos.x,
                        ball.pos.y,
                        computer.top(),
                        computer.bottom()
                    );
                    return Some(Event::GameWin);
                }
                Some(Event::BallHit {
                    direction: HitDirection::Left,
                    target: HitTarget::Enemy,
                })
            }
        }
    }
}
