//! Sound effects
//!
//! The game only ever asks for a sound to start; it never waits on or
//! inspects playback.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a wall or paddle
    Hit,
    /// Computer missed
    Win,
    /// Human missed
    Lose,
}

impl SoundEffect {
    /// Asset path of the sample
    pub fn asset(self) -> &'static str {
        match self {
            SoundEffect::Hit => "./asset/pong_hit.wav",
            SoundEffect::Win => "./asset/win.wav",
            SoundEffect::Lose => "./asset/lose.wav",
        }
    }
}

/// Fire-and-forget playback
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Sink for headless runs
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("(silent) {:?}", effect);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::HtmlAudioElement;

    use super::{AudioSink, SoundEffect};

    /// Preloaded `<audio>` elements, one per effect
    pub struct AudioManager {
        hit: Option<HtmlAudioElement>,
        win: Option<HtmlAudioElement>,
        lose: Option<HtmlAudioElement>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            let load = |effect: SoundEffect| {
                let el = HtmlAudioElement::new_with_src(effect.asset()).ok();
                if el.is_none() {
                    log::warn!("Failed to create audio element for {:?}", effect);
                }
                el
            };
            Self {
                hit: load(SoundEffect::Hit),
                win: load(SoundEffect::Win),
                lose: load(SoundEffect::Lose),
            }
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let el = match effect {
                SoundEffect::Hit => &self.hit,
                SoundEffect::Win => &self.win,
                SoundEffect::Lose => &self.lose,
            };
            let Some(el) = el else { return };
            // Restart the sample so rapid hits are all audible
            el.set_current_time(0.0);
            // Autoplay may be refused before the first user gesture
            let _ = el.play();
        }
    }
}
