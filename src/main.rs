//! Canvas Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use canvas_pong::audio::AudioManager;
    use canvas_pong::renderer::CanvasSurface;
    use canvas_pong::sim::GameSession;
    use canvas_pong::{ArenaSize, GameConfig, GameLoop, InputKey};

    /// Game instance holding all state
    struct Game {
        game_loop: GameLoop,
        surface: CanvasSurface,
        audio: AudioManager,
        last_time: f64,
    }

    thread_local! {
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    /// Restart from the page with optional JSON settings
    /// (`background`, `background_alpha`, `foreground_alpha`, `ball_color`).
    #[wasm_bindgen]
    pub fn restart_game(settings: Option<String>) {
        let config = match settings.as_deref().map(GameConfig::from_json) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                log::warn!("Invalid game settings ({}), using defaults", e);
                GameConfig::default()
            }
            None => GameConfig::default(),
        };

        GAME.with(|slot| {
            if let Some(game) = slot.borrow().as_ref() {
                let mut g = game.borrow_mut();
                let arena = g.game_loop.session().arena();
                g.game_loop.restart(config.with_arena(arena));
                g.last_time = 0.0;
            } else {
                log::warn!("restart_game called before the game was initialized");
            }
        });
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Canvas Pong starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("mycanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element #mycanvas");
            return;
        };
        let Some(surface) = CanvasSurface::new(&canvas) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let arena = ArenaSize::new(canvas.width() as f64, canvas.height() as f64);
        let seed = js_sys::Date::now() as u64;
        let session = GameSession::new(GameConfig::default().with_arena(arena), seed);

        let game = Rc::new(RefCell::new(Game {
            game_loop: GameLoop::new(session),
            surface,
            audio: AudioManager::new(),
            last_time: 0.0,
        }));
        GAME.with(|slot| *slot.borrow_mut() = Some(game.clone()));

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Canvas Pong running ({}x{})", arena.width, arena.height);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(key) = InputKey::from_key(&event.key()) else {
                return;
            };
            if key == InputKey::Space {
                // Keep the page from scrolling
                event.prevent_default();
            }
            game.borrow_mut().game_loop.press(key);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let Game {
                game_loop,
                surface,
                audio,
                last_time,
            } = &mut *g;
            let elapsed = if *last_time > 0.0 { time - *last_time } else { 0.0 };
            *last_time = time;
            game_loop.advance(elapsed, surface, audio);
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Canvas Pong (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(rand::random::<u64>);
    demo(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one game with a simple autopilot on the human paddle
#[cfg(not(target_arch = "wasm32"))]
fn demo(seed: u64) {
    use canvas_pong::audio::SilentAudio;
    use canvas_pong::consts::TICK_MS;
    use canvas_pong::renderer::NullSurface;
    use canvas_pong::sim::{GamePhase, GameSession};
    use canvas_pong::{GameConfig, GameLoop, InputKey};

    const MAX_TICKS: u32 = 20_000;

    let mut game = GameLoop::new(GameSession::new(GameConfig::default(), seed));
    let mut surface = NullSurface;
    let mut audio = SilentAudio;

    let mut ticks = 0;
    while ticks < MAX_TICKS && game.session().phase() == GamePhase::Playing {
        let entities = game.session().entities();
        let ball_y = entities.ball.pos.y;
        let human = &entities.human;
        if human.bottom() < ball_y {
            game.press(InputKey::Down);
        } else if human.top() > ball_y {
            game.press(InputKey::Up);
        }
        ticks += game.advance(TICK_MS, &mut surface, &mut audio);
    }

    println!(
        "seed {}: {:?} after {} ticks, score {}",
        seed,
        game.session().phase(),
        ticks,
        game.session().score()
    );
}
