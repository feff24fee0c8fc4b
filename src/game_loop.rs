//! Fixed-interval tick driver
//!
//! The platform calls `advance` with wall-clock time; the loop turns that
//! into whole ticks via an accumulator. There is exactly one driver per
//! session: halting and re-arming flip a flag and reset the accumulator,
//! they never create a second schedule.

use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::input::InputKey;
use crate::renderer::{self, RenderSurface};
use crate::settings::GameConfig;
use crate::sim::{GamePhase, GameSession, Outcome, tick};

/// Outcome screen waiting for the final frame to settle
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingOutcome {
    outcome: Outcome,
    remaining_ms: f64,
}

/// Drives a `GameSession` at the fixed tick rate
#[derive(Debug)]
pub struct GameLoop {
    session: GameSession,
    accumulator: f64,
    running: bool,
    /// Session generation this driver was armed for
    generation: u64,
    pending_outcome: Option<PendingOutcome>,
}

impl GameLoop {
    /// Create a running loop for `session`
    pub fn new(session: GameSession) -> Self {
        let generation = session.generation();
        Self {
            session,
            accumulator: 0.0,
            running: true,
            generation,
            pending_outcome: None,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether an outcome screen is still waiting to be shown
    pub fn outcome_pending(&self) -> bool {
        self.pending_outcome.is_some()
    }

    /// Resume ticking; a no-op when already running
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.accumulator = 0.0;
    }

    /// Stop ticking and drop any partial tick
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    /// Forward a key press and re-arm if it restarted the session
    pub fn press(&mut self, key: InputKey) {
        self.session.handle_key(key);
        self.sync_generation();
    }

    /// Restart the session with new settings
    pub fn restart(&mut self, config: GameConfig) {
        self.session.restart_with(config);
        self.sync_generation();
    }

    /// The previous game's schedule is dropped entirely before the new one
    /// starts: no leftover time, no outcome screen from the old game.
    fn sync_generation(&mut self) {
        if self.session.generation() == self.generation {
            return;
        }
        self.generation = self.session.generation();
        self.pending_outcome = None;
        self.stop();
        self.start();
        log::debug!("Game loop re-armed for generation {}", self.generation);
    }

    /// Advance wall-clock time by `elapsed_ms`, running whole ticks.
    ///
    /// Each tick updates, checks collisions, plays queued sounds and renders,
    /// in that order. Returns the number of ticks run.
    pub fn advance(
        &mut self,
        elapsed_ms: f64,
        surface: &mut dyn RenderSurface,
        audio: &mut dyn AudioSink,
    ) -> u32 {
        // A non-finite delta would poison the accumulator for good
        let elapsed_ms = if elapsed_ms.is_finite() { elapsed_ms } else { 0.0 };
        let elapsed_ms = elapsed_ms.clamp(0.0, TICK_MS * MAX_SUBSTEPS as f64);

        if let Some(pending) = self.pending_outcome.as_mut() {
            pending.remaining_ms -= elapsed_ms;
            if pending.remaining_ms <= 0.0 {
                let outcome = pending.outcome;
                self.pending_outcome = None;
                renderer::draw_outcome(&self.session, outcome, surface);
                audio.play(match outcome {
                    Outcome::Win => SoundEffect::Win,
                    Outcome::Lose => SoundEffect::Lose,
                });
            }
            return 0;
        }

        if !self.running {
            return 0;
        }

        self.accumulator += elapsed_ms;
        let mut substeps = 0;
        while self.accumulator >= TICK_MS && substeps < MAX_SUBSTEPS {
            tick(&mut self.session);
            self.accumulator -= TICK_MS;
            substeps += 1;

            for effect in self.session.drain_sounds() {
                audio.play(effect);
            }
            renderer::draw_frame(&self.session, surface);

            if let GamePhase::Ended(outcome) = self.session.phase() {
                self.stop();
                self.pending_outcome = Some(PendingOutcome {
                    outcome,
                    remaining_ms: OUTCOME_DELAY_MS,
                });
                log::info!("Game loop halted ({:?})", outcome);
                break;
            }
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::tests::Recorder;
    use crate::renderer::{LOSE_MESSAGE, WIN_MESSAGE};
    use glam::DVec2;

    #[derive(Debug, Default)]
    struct AudioLog(Vec<SoundEffect>);

    impl AudioSink for AudioLog {
        fn play(&mut self, effect: SoundEffect) {
            self.0.push(effect);
        }
    }

    fn game() -> GameLoop {
        GameLoop::new(GameSession::new(GameConfig::default(), 7))
    }

    fn place_ball(game: &mut GameLoop, pos: DVec2, vel: DVec2) {
        let ball = &mut game.session.world_mut().entities.ball;
        ball.pos = pos;
        ball.vel = vel;
        ball.speed = vel.length();
    }

    #[test]
    fn test_accumulates_partial_ticks() {
        let mut g = game();
        let mut rec = Recorder::default();
        let mut audio = AudioLog::default();
        place_ball(&mut g, DVec2::new(400.0, 300.0), DVec2::new(1.0, 0.0));

        assert_eq!(g.advance(TICK_MS / 2.0, &mut rec, &mut audio), 0);
        assert_eq!(g.advance(TICK_MS / 2.0, &mut rec, &mut audio), 1);
        assert_eq!(g.advance(TICK_MS * 3.0, &mut rec, &mut audio), 3);
        assert_eq!(g.session().time_ticks(), 4);
        assert_eq!(g.session().entities().ball.pos.x, 404.0);
    }

    #[test]
    fn test_large_gaps_are_capped() {
        let mut g = game();
        let mut rec = Recorder::default();
        let mut audio = AudioLog::default();
        place_ball(&mut g, DVec2::new(400.0, 300.0), DVec2::new(0.1, 0.0));
        assert_eq!(
            g.advance(TICK_MS * 100.0, &mut rec, &mut audio),
            MAX_SUBSTEPS
        );
    }

    #[test]
    fn test_renders_every_tick() {
        let mut g = game();
        let mut rec = Recorder::default();
        let mut audio = AudioLog::default();
        place_ball(&mut g, DVec2::new(400.0, 300.0), DVec2::new(1.0, 0.0));
        g.advance(TICK_MS * 2.0, &mut rec, &mut audio);
        assert_eq!(rec.texts(), vec!["Score: 0", "Score: 0"]);
    }

    #[test]
    fn test_win_halts_then_shows_message_after_delay() {
        let mut g = game();
        let mut rec = Recorder::default();
        let mut audio = AudioLog::default();
        place_ball(&mut g, DVec2::new(32.0, 50.0), DVec2::new(-4.0, 0.0));

        assert_eq!(g.advance(TICK_MS * 3.0, &mut rec, &mut audio), 1);
        assert!(!g.is_running());
        assert!(g.outcome_pending());
        assert!(audio.0.is_empty());

        g.advance(OUTCOME_DELAY_MS / 2.0, &mut rec, &mut audio);
        assert!(!rec.texts().contains(&WIN_MESSAGE));

        g.advance(OUTCOME_DELAY_MS / 2.0, &mut rec, &mut audio);
        assert!(rec.texts().contains(&WIN_MESSAGE));
        assert_eq!(audio.0, vec![SoundEffect::Win]);

        let ticks = g.session().time_ticks();
        assert_eq!(g.advance(TICK_MS * 5.0, &mut rec, &mut audio), 0);
        assert_eq!(g.session().time_ticks(), ticks);
    }

    #[test]
    fn test_lose_plays_lose_sound() {
        let mut g = game();
        let mut rec = Recorder::default();
        let mut audio = AudioLog::default();
        place_ball(&mut g, DVec2::new(768.0, 550.0), DVec2::new(4.0, 0.0));
        g.advance(TICK_MS, &mut rec, &mut audio);
        g.advance(OUTCOME_DELAY_MS, &mut rec, &mut audio);
        assert!(rec.texts().contains(&LOSE_MESSAGE));
        assert_eq!(audio.0, vec![SoundEffect::Lose]);
    }

    #[test]
    fn test_hit_sound_per_bounce() {
        let mut g = game();
        let mut rec = Recorder::default();
        let mut audio = AudioLog::default();
        place_ball(&mut g, DVec2::new(400.0, 12.0), DVec2::new(0.0, -4.0));
        g.advance(TICK_MS, &mut rec, &mut audio);
        assert_eq!(audio.0, vec![SoundEffect::Hit]);
    }

    #[test]
    fn test_restart_rearms_single_driver() {
        let mut g = game();
        let mut rec = Recorder::default();
        let mut audio = AudioLog::default();
        place_ball(&mut g, DVec2::new(32.0, 50.0), DVec2::new(-4.0, 0.0));
        g.advance(TICK_MS, &mut rec, &mut audio);
        assert!(!g.is_running());

        g.press(InputKey::Enter);
        g.press(InputKey::Enter);
        assert!(g.is_running());
        assert!(!g.outcome_pending());
        assert_eq!(g.session().phase(), GamePhase::Playing);
        assert_eq!(g.session().score(), 0);

        // One tick of time moves the ball exactly once
        place_ball(&mut g, DVec2::new(400.0, 300.0), DVec2::new(2.0, 1.0));
        assert_eq!(g.advance(TICK_MS, &mut rec, &mut audio), 1);
        assert_eq!(g.session().entities().ball.pos, DVec2::new(402.0, 301.0));
    }

    #[test]
    fn test_restart_with_new_config() {
        let mut g = game();
        let config = GameConfig {
            ball_color: "pink".to_string(),
            background_alpha: 0.2,
            ..Default::default()
        };
        g.restart(config.clone());
        assert_eq!(g.session().config(), &config);
        assert_eq!(g.session().generation(), 1);
        assert!(g.is_running());
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut g = game();
        let mut rec = Recorder::default();
        let mut audio = AudioLog::default();
        place_ball(&mut g, DVec2::new(400.0, 300.0), DVec2::new(1.0, 0.0));
        g.start();
        g.start();
        assert_eq!(g.advance(TICK_MS, &mut rec, &mut audio), 1);
        assert_eq!(g.session().entities().ball.pos.x, 401.0);
    }

    #[test]
    fn test_non_finite_elapsed_is_ignored() {
        let mut g = game();
        let mut rec = Recorder::default();
        let mut audio = AudioLog::default();
        place_ball(&mut g, DVec2::new(400.0, 300.0), DVec2::new(1.0, 0.0));

        assert_eq!(g.advance(f64::NAN, &mut rec, &mut audio), 0);
        assert_eq!(g.advance(f64::INFINITY, &mut rec, &mut audio), 0);
        assert_eq!(g.advance(TICK_MS, &mut rec, &mut audio), 1);
        assert_eq!(g.session().entities().ball.pos.x, 401.0);
    }

    #[test]
    fn test_stopped_loop_does_not_tick() {
        let mut g = game();
        let mut rec = Recorder::default();
        let mut audio = AudioLog::default();
        g.stop();
        assert_eq!(g.advance(TICK_MS * 4.0, &mut rec, &mut audio), 0);
        assert_eq!(g.session().time_ticks(), 0);
    }

    #[test]
    fn test_paused_loop_keeps_rendering_overlay() {
        let mut g = game();
        let mut rec = Recorder::default();
        let mut audio = AudioLog::default();
        g.press(InputKey::Space);
        assert_eq!(g.advance(TICK_MS, &mut rec, &mut audio), 1);
        assert_eq!(g.session().time_ticks(), 0);
        assert!(rec.texts().contains(&crate::renderer::PAUSE_MESSAGE));
    }
}
