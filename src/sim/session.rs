//! Game session: owns the entities, the phase and the event listeners
//!
//! All game-state transitions happen inside bus listeners. Restart is the
//! one operation a listener cannot perform itself (it rebuilds the bus it
//! is running on), so the Enter listener only flags the request and the
//! session carries it out once dispatch has finished.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::controller::TrackingMode;
use super::events::{Event, EventBus, EventKind, HitTarget};
use super::state::{Entities, GamePhase, Outcome};
use crate::ArenaSize;
use crate::audio::SoundEffect;
use crate::consts::SCORE_INCREMENT;
use crate::input::InputKey;
use crate::settings::GameConfig;

/// Mutable game data handed to every listener
#[derive(Debug, Clone)]
pub struct World {
    pub phase: GamePhase,
    pub entities: Entities,
    pub arena: ArenaSize,
    pub tracking: TrackingMode,
    /// Ticks simulated since the last (re)start
    pub time_ticks: u64,
    restart_requested: bool,
    sounds: Vec<SoundEffect>,
}

impl World {
    fn new(config: &GameConfig, rng: &mut Pcg32) -> Self {
        Self {
            phase: GamePhase::Playing,
            entities: Entities::spawn(config.arena, rng),
            arena: config.arena,
            tracking: config.tracking,
            time_ticks: 0,
            restart_requested: false,
            sounds: Vec::new(),
        }
    }

    fn end(&mut self, outcome: Outcome) {
        if self.phase.is_playing() {
            log::info!(
                "Game over: {:?} with score {}",
                outcome,
                self.entities.human.score
            );
            self.phase = GamePhase::Ended(outcome);
        }
    }
}

/// One player's game, from start through any number of restarts
pub struct GameSession {
    world: World,
    bus: EventBus<World>,
    rng: Pcg32,
    config: GameConfig,
    generation: u64,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("world", &self.world)
            .field("bus", &self.bus)
            .field("generation", &self.generation)
            .finish()
    }
}

impl GameSession {
    /// Start a new session; the seed drives every ball launch angle
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = World::new(&config, &mut rng);
        let mut session = Self {
            world,
            bus: EventBus::new(),
            rng,
            config,
            generation: 0,
        };
        session.install_listeners();
        log::info!("Session started with seed {}", seed);
        session
    }

    /// Current phase
    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn entities(&self) -> &Entities {
        &self.world.entities
    }

    pub fn score(&self) -> u32 {
        self.world.entities.human.score
    }

    pub fn arena(&self) -> ArenaSize {
        self.world.arena
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn time_ticks(&self) -> u64 {
        self.world.time_ticks
    }

    /// Incremented on every restart
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Registered listener count for `kind`
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.bus.listener_count(kind)
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Sounds queued by listeners since the last drain
    pub fn drain_sounds(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.world.sounds)
    }

    /// Deliver a logical key press
    pub fn handle_key(&mut self, key: InputKey) {
        self.dispatch(key.event());
    }

    /// Publish an event to the listeners, then apply a pending restart
    pub fn dispatch(&mut self, event: Event) {
        log::trace!("Dispatch {:?}", event);
        self.bus.publish(&mut self.world, &event);
        if self.world.restart_requested {
            self.restart();
        }
    }

    /// Full reset with the current configuration
    pub fn restart(&mut self) {
        self.bus.clear();
        self.world = World::new(&self.config, &mut self.rng);
        self.install_listeners();
        self.generation += 1;
        log::info!("Game restarted (generation {})", self.generation);
    }

    /// Full reset with a new configuration
    pub fn restart_with(&mut self, config: GameConfig) {
        self.config = config;
        self.restart();
    }

    /// Rebuild the listener set. Always clears first, so calling this any
    /// number of times leaves exactly one handler per concern.
    fn install_listeners(&mut self) {
        let bus = &mut self.bus;
        bus.clear();

        bus.subscribe(EventKind::KeyUp, |world, _| {
            if world.phase.is_playing() {
                world.entities.human.step_up();
            }
        });

        bus.subscribe(EventKind::KeyDown, |world, _| {
            if world.phase.is_playing() {
                let height = world.arena.height;
                world.entities.human.step_down(height);
            }
        });

        bus.subscribe(EventKind::KeySpace, |world, _| {
            world.phase = match world.phase {
                GamePhase::Playing => {
                    log::info!("Paused");
                    GamePhase::Paused
                }
                GamePhase::Paused => {
                    log::info!("Resumed");
                    GamePhase::Playing
                }
                ended @ GamePhase::Ended(_) => ended,
            };
        });

        bus.subscribe(EventKind::KeyEnter, |world, _| {
            world.restart_requested = true;
        });

        bus.subscribe(EventKind::BallHit, |world, event| {
            let Event::BallHit { direction, target } = *event else {
                return;
            };
            world.sounds.push(SoundEffect::Hit);
            if target == HitTarget::Human {
                world.entities.human.score += SCORE_INCREMENT;
            }
            world.entities.ball.bounce(direction.is_horizontal());
        });

        bus.subscribe(EventKind::GameWin, |world, _| world.end(Outcome::Win));
        bus.subscribe(EventKind::GameLose, |world, _| world.end(Outcome::Lose));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::events::HitDirection;

    fn session() -> GameSession {
        GameSession::new(GameConfig::default(), 42)
    }

    #[test]
    fn test_starts_playing_with_zero_score() {
        let s = session();
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.score(), 0);
        assert_eq!(s.generation(), 0);
    }

    #[test]
    fn test_space_toggles_pause() {
        let mut s = session();
        s.handle_key(InputKey::Space);
        assert_eq!(s.phase(), GamePhase::Paused);
        s.handle_key(InputKey::Space);
        assert_eq!(s.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_paddle_keys_ignored_unless_playing() {
        let mut s = session();
        let start = s.entities().human.pos.y;

        s.handle_key(InputKey::Up);
        assert_eq!(s.entities().human.pos.y, start - 8.0);

        s.handle_key(InputKey::Space);
        s.handle_key(InputKey::Down);
        s.handle_key(InputKey::Down);
        assert_eq!(s.entities().human.pos.y, start - 8.0);

        s.handle_key(InputKey::Space);
        s.dispatch(Event::GameLose);
        s.handle_key(InputKey::Down);
        assert_eq!(s.entities().human.pos.y, start - 8.0);
    }

    #[test]
    fn test_human_hit_scores_and_bounces() {
        let mut s = session();
        let vel = s.entities().ball.vel;
        s.dispatch(Event::BallHit {
            direction: HitDirection::Right,
            target: HitTarget::Human,
        });
        assert_eq!(s.score(), 10);
        assert_eq!(s.entities().ball.vel.x, -vel.x);
        assert_eq!(s.entities().ball.vel.y, vel.y);
        assert_eq!(s.drain_sounds(), vec![SoundEffect::Hit]);
    }

    #[test]
    fn test_wall_hit_flips_vertical_only() {
        let mut s = session();
        let vel = s.entities().ball.vel;
        s.dispatch(Event::BallHit {
            direction: HitDirection::Up,
            target: HitTarget::Wall,
        });
        assert_eq!(s.score(), 0);
        assert_eq!(s.entities().ball.vel.x, vel.x);
        assert_eq!(s.entities().ball.vel.y, -vel.y);
    }

    #[test]
    fn test_outcome_only_from_playing() {
        let mut s = session();
        s.dispatch(Event::GameWin);
        assert_eq!(s.phase(), GamePhase::Ended(Outcome::Win));
        s.dispatch(Event::GameLose);
        assert_eq!(s.phase(), GamePhase::Ended(Outcome::Win));
        s.handle_key(InputKey::Space);
        assert_eq!(s.phase(), GamePhase::Ended(Outcome::Win));

        let mut s = session();
        s.handle_key(InputKey::Space);
        s.dispatch(Event::GameLose);
        assert_eq!(s.phase(), GamePhase::Paused);
    }

    #[test]
    fn test_enter_restarts_from_any_phase() {
        for setup in [None, Some(Event::KeySpace), Some(Event::GameLose)] {
            let mut s = session();
            s.dispatch(Event::BallHit {
                direction: HitDirection::Right,
                target: HitTarget::Human,
            });
            if let Some(event) = setup {
                s.dispatch(event);
            }
            s.handle_key(InputKey::Enter);
            assert_eq!(s.phase(), GamePhase::Playing);
            assert_eq!(s.score(), 0);
            assert_eq!(s.generation(), 1);
        }
    }

    #[test]
    fn test_restart_does_not_duplicate_listeners() {
        let mut s = session();
        let kinds = [
            EventKind::KeyUp,
            EventKind::KeyDown,
            EventKind::KeySpace,
            EventKind::KeyEnter,
            EventKind::BallHit,
            EventKind::GameWin,
            EventKind::GameLose,
        ];
        s.handle_key(InputKey::Enter);
        s.handle_key(InputKey::Enter);
        for kind in kinds {
            assert_eq!(s.listener_count(kind), 1, "{:?}", kind);
        }

        s.dispatch(Event::BallHit {
            direction: HitDirection::Right,
            target: HitTarget::Human,
        });
        assert_eq!(s.score(), 10);
    }

    #[test]
    fn test_restart_draws_fresh_angle() {
        let mut s = session();
        let first = s.entities().ball.vel;
        s.restart();
        let second = s.entities().ball.vel;
        assert_ne!(first, second);
        assert!((second.length() - s.entities().ball.base_speed).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_launch() {
        let a = GameSession::new(GameConfig::default(), 99);
        let b = GameSession::new(GameConfig::default(), 99);
        assert_eq!(a.entities().ball.vel, b.entities().ball.vel);
    }
}
