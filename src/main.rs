//! Lane Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use lane_rush::audio::{AudioManager, EngineLoop, SoundEffect};
    use lane_rush::consts::*;
    use lane_rush::renderer::{RenderState, build_scene};
    use lane_rush::sim::{GameEvent, GameMode, GameState, Key, key_down, key_up, tick};
    use lane_rush::{HighScores, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        settings: Settings,
        audio: AudioManager,
        engine: EngineLoop,
        highscores: HighScores,
        /// Tick count at the start of the current run (for run duration)
        run_start_ticks: u64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            let engine = audio.engine_loop(settings.effective_engine_volume());

            Self {
                state: GameState::new(seed),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                settings,
                audio,
                engine,
                highscores: HighScores::load(),
                run_start_ticks: 0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            self.process_events();

            // Track frame times for FPS
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

        /// Turn pending simulation events into audio cues and bookkeeping.
        /// Called after ticking and directly from input handlers so cues
        /// fire inside the user-gesture context browsers require.
        fn process_events(&mut self) {
            for event in self.state.take_events() {
                match event {
                    GameEvent::MenuClick => self.audio.play(SoundEffect::MenuClick),
                    GameEvent::RunStarted => {
                        self.run_start_ticks = self.state.time_ticks;
                        self.engine.start();
                    }
                    GameEvent::ObstaclesPassed => self.audio.play(SoundEffect::Pass),
                    GameEvent::Crashed => {
                        self.audio.play(SoundEffect::Crash);
                        self.engine.pause();
                        self.record_run();
                    }
                }
            }
        }

        /// Push the finished run onto the leaderboard
        fn record_run(&mut self) {
            let duration = self.state.time_ticks - self.run_start_ticks;
            let now = js_sys::Date::now();
            if let Some(rank) = self.highscores.add_score(self.state.score, duration, now) {
                log::info!("Run ranked #{rank}: {} cars passed", self.state.score);
                self.highscores.save();
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.state);
                match render_state.render(&vertices) {
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
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            // Update score
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            // Update best score
            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                let best = self
                    .highscores
                    .top_score()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());
                el.set_text_content(Some(&best));
            }

            // Update FPS
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten()
                    {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // Show/hide menu overlay
            if let Some(el) = document.get_element_by_id("menu") {
                if self.state.mode == GameMode::Menu {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Show/hide in-game HUD
            if let Some(el) = document.get_element_by_id("hud") {
                if self.state.mode == GameMode::Menu {
                    let _ = el.set_attribute("class", "hidden");
                } else {
                    let _ = el.set_attribute("class", "");
                }
            }

            // Show/hide game over overlay
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.mode == GameMode::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    /// Map a DOM key string to a logical game key
    fn map_key(key: &str) -> Option<Key> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "Enter" => Some(Key::Confirm),
            "r" | "R" => Some(Key::Restart),
            _ => None,
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        // Set up input and focus handlers
        setup_input_handlers(game.clone());
        setup_mute_on_blur(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Lane Rush running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                // Edge-triggered: ignore auto-repeat
                if event.repeat() {
                    return;
                }
                if let Some(key) = map_key(&event.key()) {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    key_down(&mut g.state, key);
                    g.process_events();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(key) = map_key(&event.key()) {
                    key_up(&mut game.borrow_mut().state, key);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_mute_on_blur(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if !g.settings.mute_on_blur {
                    return;
                }
                let hidden =
                    document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                g.audio.set_muted(hidden);
                if hidden {
                    g.engine.pause();
                } else if g.state.mode == GameMode::Playing {
                    g.engine.resume();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur/focus (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                    g.engine.pause();
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let window2 = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.audio.set_muted(false);
                if g.state.mode == GameMode::Playing {
                    g.engine.resume();
                }
            });
            let _ =
                window2.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
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
            g.render();
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
    log::info!("Lane Rush (native) starting...");
    log::info!("Native mode requires winit integration - run with `trunk serve` for web version");

    // Run tests
    println!("\nRunning simulation smoke check...");
    smoke_check();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_check() {
    use glam::Vec2;
    use lane_rush::consts::SIM_DT;
    use lane_rush::sim::{Aabb, GameMode, GameState, Key, first_hit, key_down, tick};

    // Collision primitive catches a dead-center overlap
    let mut state = GameState::new(42);
    key_down(&mut state, Key::Confirm);
    assert_eq!(state.mode, GameMode::Playing);

    let probe = Aabb::new(Vec2::new(300.0, 100.0), Vec2::new(30.0, 50.0));
    let synthetic = lane_rush::sim::Obstacle::new(1, Vec2::new(300.0, 100.0), -5.0);
    assert!(first_hit(&probe, &[synthetic]).is_some(), "overlap detected");

    // Ten seconds of traffic keeps the road populated
    for _ in 0..600 {
        tick(&mut state, SIM_DT);
    }
    assert!(
        !state.traffic.obstacles.is_empty(),
        "traffic should be flowing"
    );
    println!("✓ Simulation smoke check passed!");
}
