//! Bean Hopper entry point
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

    use bean_hopper::Settings;
    use bean_hopper::renderer::canvas::CanvasSurface;
    use bean_hopper::renderer::draw_frame;
    use bean_hopper::assets::AssetSet;
    use bean_hopper::sim::{GameEvent, GameState, InputState, Phase, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        surface: Option<CanvasSurface>,
        assets: AssetSet,
        settings: Settings,
        /// Start screen is revealed once, when the last sprite arrives
        start_screen_shown: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, assets: AssetSet, viewport_w: f32, viewport_h: f32) -> Self {
            Self {
                state: GameState::new(seed, viewport_w, viewport_h),
                input: InputState::default(),
                surface: None,
                assets,
                settings: Settings::load(),
                start_screen_shown: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Begin a fresh run with a wall-clock seed.
        fn start(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.state.start(seed);
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Advance one frame: preloader gate, simulation, HUD, draw.
        fn frame(&mut self, time: f64) {
            if !self.assets.ready() {
                self.update_preloader();
                return;
            }
            if !self.start_screen_shown {
                self.start_screen_shown = true;
                set_class("preloader", "hidden");
                set_class("start-screen", "");
            }

            tick(&mut self.state, self.input);

            let events: Vec<GameEvent> = self.state.drain_events().collect();
            for event in events {
                self.apply_event(event);
            }

            if let Some(ref mut surface) = self.surface {
                draw_frame(&self.state, &self.settings, surface);
            }

            self.track_fps(time);
            if self.settings.show_fps {
                set_text("fps-display", &format!("{} FPS", self.fps));
            }
        }

        /// Reflect loading progress (or failure) in the preloader overlay.
        fn update_preloader(&self) {
            if self.assets.failed() {
                set_text(
                    "loading-progress",
                    "Failed to load game assets. Please reload the page.",
                );
            } else {
                let percent = (self.assets.progress() * 100.0).round() as u32;
                set_text("loading-progress", &format!("Loading... {percent}%"));
            }
        }

        /// Mirror one simulation event into the DOM.
        fn apply_event(&self, event: GameEvent) {
            match event {
                GameEvent::Started => {
                    set_class("start-screen", "hidden");
                    set_class("game-over-screen", "hidden");
                }
                GameEvent::ScoreChanged(score) => {
                    set_text("score-board", &format!("Score: {score}"));
                }
                GameEvent::LivesChanged(lives) => {
                    set_text("lives-display", &format!("Lives: {lives}"));
                }
                GameEvent::JumpPowerChanged(power) => {
                    set_text(
                        "jump-power-display",
                        &format!("Jump Power: {}", power.floor() as u32),
                    );
                }
                GameEvent::GameOver(score) => {
                    set_text("final-score", &score.to_string());
                    set_class("game-over-screen", "");
                }
                GameEvent::Won(score) => {
                    set_text("win-score", &score.to_string());
                    set_class("start-screen", "");
                }
            }
        }
    }

    /// Set an element's text content, ignoring missing elements.
    fn set_text(id: &str, text: &str) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }
    }

    /// Set an element's class attribute, ignoring missing elements.
    fn set_class(id: &str, class: &str) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = document.get_element_by_id(id) {
                let _ = el.set_attribute("class", class);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bean Hopper starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let assets = AssetSet::load().expect("failed to create image elements");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            assets.clone(),
            width as f32,
            height as f32,
        )));

        let ctx = canvas
            .get_context("2d")
            .expect("get_context failed")
            .expect("no 2d context")
            .dyn_into::<web_sys::CanvasRenderingContext2d>()
            .expect("not a 2d context");
        game.borrow_mut().surface = Some(CanvasSurface::new(ctx, assets, width, height));

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_resize(&canvas, game.clone());
        setup_button("start-btn", game.clone());
        setup_button("restart-btn", game.clone());

        request_animation_frame(game);

        log::info!("Bean Hopper running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowRight" | "KeyD" => g.input.right = true,
                    "ArrowLeft" | "KeyA" => g.input.left = true,
                    "Space" | "ArrowUp" | "KeyW" => {
                        event.prevent_default();
                        g.input.up = true;
                    }
                    "Enter" => {
                        // Start or restart, once assets are in
                        if g.assets.ready() && g.state.phase != Phase::Running {
                            g.start();
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowRight" | "KeyD" => g.input.right = false,
                    "ArrowLeft" | "KeyA" => g.input.left = false,
                    "Space" | "ArrowUp" | "KeyW" => g.input.up = false,
                    _ => {}
                }
            });
            let _ = web_sys::window()
                .unwrap()
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0);
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);

            let mut g = game.borrow_mut();
            g.state.set_viewport(width as f32, height as f32);
            if let Some(ref mut surface) = g.surface {
                surface.resize(width, height);
            }
        });
        let _ = web_sys::window()
            .unwrap()
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_button(id: &str, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if g.assets.ready() {
                    g.start();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
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
    use bean_hopper::sim::Level;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    env_logger::init();
    log::info!("Bean Hopper (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Smoke-check the generator
    let mut rng = Pcg32::seed_from_u64(42);
    let level = Level::generate(&mut rng, 720.0);
    println!(
        "Generated level: {} platforms, {} patrollers, {} collectibles, {:.0}px wide",
        level.platforms.len(),
        level.patrollers.len(),
        level.collectibles.len(),
        level.width
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
