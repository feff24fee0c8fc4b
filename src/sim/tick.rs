//! Fixed timestep simulation tick
//!
//! One tick moves every entity, then runs the collision checks against the
//! new positions. Nothing moves or collides unless the phase is Playing:
//! collisions are gated with motion, otherwise a frozen ball resting on the
//! human paddle's face would gain score and speed on every paused tick.

use super::collision::CollisionCheck;
use super::controller::track_ball;
use super::session::GameSession;

/// Advance the session by one tick
pub fn tick(session: &mut GameSession) {
    if !session.phase().is_playing() {
        return;
    }

    let world = session.world_mut();
    world.time_ticks += 1;
    world.entities.ball.advance();
    let tracking = world.tracking;
    let entities = &mut world.entities;
    track_ball(&mut entities.computer, &entities.ball, tracking);

    log::trace!(
        "Tick {}: ball ({:.2}, {:.2})",
        world.time_ticks,
        world.entities.ball.pos.x,
        world.entities.ball.pos.y
    );

    // Each check sees the effects of the listeners fired by the one before
    for check in CollisionCheck::ORDER {
        let world = session.world_mut();
        let arena = world.arena;
        if let Some(event) = check.evaluate(&mut world.entities, arena) {
            session.dispatch(event);
        }
    }
}
