//! Pixel Portfolio entry point
//!
//! On the web: wires DOM events to the session and runs the frame loop.
//! Natively: plays the levels headless with the autopilot and logs the run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlInputElement, KeyboardEvent, MouseEvent};

    use pixel_portfolio::audio::{AudioManager, BackgroundMusic, SoundEffect};
    use pixel_portfolio::consts::*;
    use pixel_portfolio::input::{KeyAction, action_for_code, captures_key, intent_for_key};
    use pixel_portfolio::presentation::BLOCK_ID_ATTR;
    use pixel_portfolio::renderer::DomRenderer;
    use pixel_portfolio::sim::{GameEvent, Intent, autopilot_intents};
    use pixel_portfolio::{Catalog, LevelSet, Session, SessionConfig, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        renderer: Option<DomRenderer>,
        audio: AudioManager,
        music: BackgroundMusic,
        settings: Settings,
        catalog: Catalog,
        accumulator: f32,
        last_time: f64,
        /// Demo mode: the autopilot posts intents every tick
        autopilot: bool,
    }

    impl Game {
        fn new(config: SessionConfig, settings: Settings) -> Self {
            let mut renderer = DomRenderer::new();
            if let Some(r) = renderer.as_mut() {
                r.reduced_motion = settings.reduced_motion;
            }
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_sfx_volume());

            Self {
                session: Session::new(LevelSet::builtin(), config),
                renderer,
                audio,
                music: BackgroundMusic::from_page(),
                settings,
                catalog: Catalog::builtin(),
                accumulator: 0.0,
                last_time: 0.0,
                autopilot: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                if self.autopilot {
                    for intent in autopilot_intents(&self.session) {
                        self.session.apply_intent(intent);
                    }
                }
                self.session.tick();
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            // Drop time we could not catch up on
            if substeps == MAX_SUBSTEPS {
                self.accumulator = self.accumulator.min(SIM_DT);
            }

            self.announce();
        }

        /// Play sounds and visual feedback for queued events
        fn announce(&mut self) {
            for event in self.session.drain_events() {
                log::debug!("{:?}", event);
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                match event {
                    GameEvent::BlockHit { id } | GameEvent::Revealed { id } => {
                        if let Some(r) = self.renderer.as_mut() {
                            r.bounce_block(id);
                        }
                    }
                    GameEvent::GameOver | GameEvent::Won { .. } => self.music.pause(),
                    _ => {}
                }
            }
        }

        fn render(&mut self) {
            let viewport = viewport_size();
            if let Some(r) = self.renderer.as_mut() {
                r.render(&self.session, &self.catalog, viewport);
            }
        }

        /// Start or restart a playthrough
        fn start(&mut self) {
            self.session.restart();
            self.accumulator = 0.0;
            self.audio.resume();
            self.music.play(self.settings.effective_music_volume());
        }

        fn set_autopilot(&mut self, on: bool) {
            self.autopilot = on;
            if !on {
                self.session.apply_intent(Intent::MoveLeft(false));
                self.session.apply_intent(Intent::MoveRight(false));
            }
            log::info!("Autopilot: {}", on);
        }

        fn set_music(&mut self, enabled: bool) {
            self.settings.music_enabled = enabled;
            self.settings.save();
            self.audio.set_volume(self.settings.effective_sfx_volume());
            if enabled && self.session.state().is_playing() {
                self.audio.resume();
                self.music.play(self.settings.effective_music_volume());
            } else {
                self.music.pause();
            }
        }
    }

    /// Window inner size in CSS pixels
    fn viewport_size() -> (f32, f32) {
        let Some(window) = web_sys::window() else {
            return (0.0, VIEWPORT_HEIGHT);
        };
        let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).map(|v| v as f32);
        (
            read(window.inner_width()).unwrap_or(0.0),
            read(window.inner_height()).unwrap_or(VIEWPORT_HEIGHT),
        )
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Pixel Portfolio starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window - not running in a browser");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let (width, height) = viewport_size();
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(
            SessionConfig::for_viewport(width, height),
            settings,
        )));

        setup_keyboard(game.clone());
        setup_buttons(&document, game.clone());
        setup_world_clicks(&document, game.clone());
        setup_music_toggle(&document, game.clone());
        setup_auto_mute(game.clone());
        setup_resize(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Pixel Portfolio running ({}x{})", width, height);
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        for (kind, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if captures_key(&code) {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                if action_for_code(&code) == Some(KeyAction::Autopilot) {
                    if pressed && !event.repeat() {
                        let on = !g.autopilot;
                        g.set_autopilot(on);
                    }
                    return;
                }
                if let Some(intent) = intent_for_key(&code, pressed) {
                    g.session.apply_intent(intent);
                }
            });
            let _ = window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Attach a click handler to an element by id, if present
    fn on_click(
        document: &web_sys::Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        action: fn(&mut Game),
    ) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing #{} button", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            action(&mut game.borrow_mut());
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        on_click(document, "start-btn", game.clone(), Game::start);
        on_click(document, "restart-btn", game.clone(), Game::start);
        on_click(document, "play-again-btn", game.clone(), Game::start);
        on_click(document, "close-project", game.clone(), |g| g.session.close_card());
        on_click(document, "close-achievement", game.clone(), |g| {
            g.session.close_card()
        });
        on_click(document, "view-traditional-btn", game, |_| {
            log::info!("Traditional portfolio view requested");
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message("Traditional portfolio view would open here");
            }
        });
    }

    /// Route clicks on block elements to the session
    fn setup_world_clicks(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        let Some(world) = document.get_element_by_id("game-world") else {
            return;
        };
        let selector = format!("[{}]", BLOCK_ID_ATTR);
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let id = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(&selector).ok().flatten())
                .and_then(|el| el.get_attribute(BLOCK_ID_ATTR))
                .and_then(|id| id.parse::<u32>().ok());
            if let Some(id) = id {
                game.borrow_mut().session.hit_block(id);
            }
        });
        let _ = world.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_music_toggle(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        let Some(toggle) = document
            .get_element_by_id("music-toggle")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            log::warn!("Missing #music-toggle checkbox");
            return;
        };
        toggle.set_checked(game.borrow().settings.music_enabled);

        let input = toggle.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().set_music(input.checked());
        });
        let _ = toggle.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Quiet period before a resize is applied
    const RESIZE_DEBOUNCE_MS: i32 = 250;

    /// Re-derive player size and death line once resizing settles
    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        let apply = Closure::<dyn FnMut()>::new(move || {
            let (width, height) = viewport_size();
            game.borrow_mut().session.set_viewport(width, height);
        });
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else { return };
            if let Some(handle) = pending.take() {
                window.clear_timeout_with_handle(handle);
            }
            let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                apply.as_ref().unchecked_ref(),
                RESIZE_DEBOUNCE_MS,
            );
            pending.set(handle.ok());
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Pause music while the tab is hidden or unfocused
    fn setup_auto_mute(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let g = game.borrow();
                if g.settings.mute_on_blur {
                    g.music.pause();
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus regained
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let g = game.borrow();
                if g.settings.mute_on_blur && g.session.state().is_playing() {
                    g.music.play(g.settings.effective_music_volume());
                }
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Upper bound on a headless run, about three minutes of play
#[cfg(not(target_arch = "wasm32"))]
const DEMO_TICK_LIMIT: u32 = 10_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use pixel_portfolio::sim::autopilot_intents;
    use pixel_portfolio::{LevelSet, Session, SessionConfig};
    use std::process::ExitCode;

    env_logger::init();
    log::info!("Pixel Portfolio (native) starting...");
    log::info!("The playable version runs in the browser - build for wasm32 and serve the page");

    // Optional level file as the first argument
    let levels = match std::env::args().nth(1) {
        Some(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| LevelSet::from_json(&json).map_err(|e| e.to_string()));
            match loaded {
                Ok(levels) => {
                    log::info!("Loaded levels from {}", path);
                    levels
                }
                Err(e) => {
                    log::error!("Cannot load {}: {}", path, e);
                    return ExitCode::FAILURE;
                }
            }
        }
        None => LevelSet::builtin(),
    };

    let mut session = Session::new(levels, SessionConfig::default());
    session.start();

    let mut ticks = 0;
    while session.state().is_playing() && ticks < DEMO_TICK_LIMIT {
        for intent in autopilot_intents(&session) {
            session.apply_intent(intent);
        }
        session.tick();
        for event in session.drain_events() {
            log::info!("tick {}: {:?}", ticks, event);
        }
        ticks += 1;
    }

    let snapshot = session.snapshot();
    log::info!(
        "Finished after {} ticks: {:?}, level {}, score {}, lives {}",
        ticks,
        snapshot.screen,
        snapshot.level,
        snapshot.score,
        snapshot.lives
    );
    ExitCode::SUCCESS
}
