//! Diwali Bomb entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use diwali_bomb::audio::WebAudio;
    use diwali_bomb::consts::*;
    use diwali_bomb::platform;
    use diwali_bomb::renderer::SdfRenderState;
    use diwali_bomb::sim::GamePhase;
    use diwali_bomb::{Runner, Settings};

    /// Game instance holding all state
    struct Game {
        runner: Runner,
        render_state: Option<SdfRenderState>,
        audio: WebAudio,
        settings: Settings,
        last_time: f64,
        audio_primed: bool,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                runner: Runner::new(seed),
                render_state: None,
                audio: WebAudio::new(&settings),
                settings,
                last_time: 0.0,
                audio_primed: false,
            }
        }

        /// Run simulation ticks and forward their events to audio
        fn update(&mut self, dt: f32, time: f64) {
            let Game { runner, audio, .. } = self;
            runner.frame(dt, audio);
            runner.record_frame_time(time);
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.runner.state, &self.settings, time) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = &self.runner.state;

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", state.score)));
            }

            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&format!("{} fps", self.runner.fps)));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Show start prompt only while waiting for the first flap
            if let Some(el) = document.get_element_by_id("start-prompt") {
                if state.phase == GamePhase::WaitingForStart {
                    let _ = el.set_attribute("class", "overlay");
                } else {
                    let _ = el.set_attribute("class", "overlay hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "overlay");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&format!("Final Score: {}", state.score)));
                    }
                    if let Some(best_el) = document.get_element_by_id("best-score") {
                        best_el.set_text_content(Some(&format!("Best: {}", self.runner.best_score)));
                    }
                } else {
                    let _ = el.set_attribute("class", "overlay hidden");
                }
            }
        }

        /// Browsers only allow audio loading after a user gesture
        fn prime_audio(&mut self) {
            if !self.audio_primed {
                self.audio.preload();
                self.audio_primed = true;
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Diwali Bomb starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Backing store at device resolution, CSS size fitted to the window
        let dpr = window.device_pixel_ratio().max(1.0);
        let width = (PLAYFIELD_WIDTH as f64 * dpr) as u32;
        let height = (PLAYFIELD_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        platform::resize_canvas(&window, &canvas);

        let settings = Settings::load(&canvas);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut render_state = SdfRenderState::new(surface, &adapter, width, height).await;
        render_state.set_start_time(js_sys::Date::now());
        game.borrow_mut().render_state = Some(render_state);

        setup_welcome_screen(game.clone());
        setup_input_handlers(game.clone());
        setup_resize(&canvas);

        // Start game loop
        request_animation_frame(game);

        log::info!("Diwali Bomb running!");
    }

    fn setup_welcome_screen(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(welcome) = document.get_element_by_id("welcome-screen") else {
            // No welcome screen on the page: start right away
            game.borrow_mut().runner.start_session();
            return;
        };

        let welcome_clone = welcome.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let _ = welcome_clone.set_attribute("class", "hidden");
            let mut g = game.borrow_mut();
            g.prime_audio();
            g.runner.start_session();
        });
        let _ = welcome.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        g.prime_audio();
                        g.runner.flap();
                    }
                    "KeyM" => g.audio.toggle_track(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (flap)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                let mut g = game.borrow_mut();
                g.prime_audio();
                g.runner.flap();
            });
            let _ = document
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                platform::resize_canvas(&window, &canvas);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Diwali Bomb (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    let (score, ticks) = autopilot::play(seed, 60 * 60 * 2);
    println!("Autopilot (seed {seed}) scored {score} in {ticks} ticks");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo player
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use diwali_bomb::Runner;
    use diwali_bomb::audio::SilentAudio;
    use diwali_bomb::consts::*;
    use diwali_bomb::sim::{GamePhase, GameState};

    /// Flap whenever the bomb sinks below the middle of the next gap
    fn wants_flap(state: &GameState) -> bool {
        let bomb = &state.bomb;
        let target = state
            .matches
            .iter()
            .find(|m| m.right_edge() + HIT_BOX >= bomb.pos.x)
            .map(|m| m.top_height + m.gap * 0.5)
            .unwrap_or(state.viewport.center_y());
        bomb.velocity >= 0.0 && bomb.pos.y > target + 15.0
    }

    /// Play one run; returns (score, ticks)
    pub fn play(seed: u64, max_ticks: u32) -> (u32, u32) {
        let mut runner = Runner::new(seed);
        let mut audio = SilentAudio::default();

        runner.start_session();
        runner.frame(SIM_DT, &mut audio);
        runner.flap();

        let mut ticks = 0;
        while ticks < max_ticks && runner.state.phase != GamePhase::GameOver {
            if runner.state.phase == GamePhase::Running && wants_flap(&runner.state) {
                runner.flap();
            }
            ticks += runner.frame(SIM_DT, &mut audio);
        }

        log::info!("Autopilot finished in {:?}", runner.state.phase);
        (runner.state.score, ticks)
    }
}
