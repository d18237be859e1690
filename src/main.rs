//! Neon Runner entry point
//!
//! Wires the simulation to the browser: requestAnimationFrame drives ticks,
//! a wall-clock interval drives the obstacle spawner, and input listeners
//! mutate the next tick's input directly.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use neon_runner::audio::AudioManager;
    use neon_runner::consts::SPAWN_INTERVAL_MS;
    use neon_runner::render::Renderer;
    use neon_runner::sim::{self, GamePhase, GameState, TickInput, Viewport};
    use neon_runner::{HighScore, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Renderer,
        audio: AudioManager,
        settings: Settings,
        high_score: HighScore,
        input: TickInput,
        canvas: HtmlCanvasElement,
        /// Interval handle, present only while in the Playing phase
        spawn_timer: Option<i32>,
        last_phase: GamePhase,
    }

    impl Game {
        /// Read the drawing surface fresh so resizes apply on the next tick
        fn viewport(&self) -> Viewport {
            Viewport::new(self.canvas.width() as f32, self.canvas.height() as f32)
        }

        /// Run one simulation tick and route its events
        fn update(&mut self) {
            let viewport = self.viewport();
            let input = self.input;
            sim::tick(&mut self.state, &input, viewport);

            // Clear one-shot inputs after processing
            self.input = TickInput::default();

            for event in self.state.drain_events() {
                self.audio.play(event.into());
            }

            let phase = self.state.phase;
            if phase != self.last_phase {
                // Persist the record at both session-ending transitions;
                // the restart write is a no-op when already persisted
                if phase == GamePhase::GameOver
                    || (self.last_phase == GamePhase::GameOver && phase == GamePhase::Start)
                {
                    if self.high_score.record(self.state.score) {
                        self.high_score.save();
                        log::info!("New high score: {}", self.high_score.best());
                    }
                }
                self.last_phase = phase;
            }
        }

        fn render(&mut self) {
            let viewport = self.viewport();
            self.renderer
                .render(&self.state, viewport, self.high_score.best());
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        fit_canvas(&canvas);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("get_context failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let viewport = Viewport::new(canvas.width() as f32, canvas.height() as f32);
        let seed = js_sys::Date::now() as u64;

        let settings = Settings::load();
        let mut audio = AudioManager::new();
        audio.set_muted(settings.muted);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, viewport),
            renderer: Renderer::new(ctx, viewport, seed),
            audio,
            settings,
            high_score: HighScore::load(),
            input: TickInput::default(),
            canvas: canvas.clone(),
            spawn_timer: None,
            last_phase: GamePhase::Start,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(canvas);

        request_animation_frame(game);

        log::info!("Neon Runner running!");
    }

    /// Size the canvas backing store to the window
    fn fit_canvas(canvas: &HtmlCanvasElement) {
        let window = web_sys::window().expect("no window");
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
    }

    fn setup_resize_handler(canvas: HtmlCanvasElement) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fit_canvas(&canvas);
        });
        let _ =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard: Space = jump/restart, P = pause toggle, M = mute toggle
        {
            let game = game.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" => {
                        g.audio.resume();
                        if g.state.phase == GamePhase::GameOver {
                            g.input.restart = true;
                        } else {
                            g.input.jump = true;
                        }
                    }
                    "KeyP" => g.input.pause = true,
                    "KeyM" => {
                        let muted = g.settings.toggle_mute();
                        g.audio.set_muted(muted);
                        g.settings.save();
                        log::info!("Muted: {}", muted);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: tap = jump during play, restart after a game over
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                match g.state.phase {
                    GamePhase::GameOver => g.input.restart = true,
                    GamePhase::Playing => g.input.jump = true,
                    _ => {}
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click: difficulty buttons on the menu
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase != GamePhase::Start {
                    return;
                }
                let (mx, my) = (event.offset_x() as f32, event.offset_y() as f32);
                if let Some(difficulty) = g.renderer.button_at(mx, my) {
                    g.audio.resume();
                    g.input.start = Some(difficulty);
                }
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
        }

        // The spawn timer lives only while the session is in Playing:
        // entering the phase starts it, leaving the phase clears it
        manage_spawn_timer(&game);

        request_animation_frame(game);
    }

    fn manage_spawn_timer(game: &Rc<RefCell<Game>>) {
        let (phase, running) = {
            let g = game.borrow();
            (g.state.phase, g.spawn_timer.is_some())
        };

        if phase == GamePhase::Playing && !running {
            start_spawn_timer(game.clone());
        } else if phase != GamePhase::Playing && running {
            stop_spawn_timer(game);
        }
    }

    fn start_spawn_timer(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut()>::new({
            let game = game.clone();
            move || {
                let mut g = game.borrow_mut();
                let viewport = g.viewport();
                sim::spawn_obstacle(&mut g.state, viewport);
            }
        });
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            SPAWN_INTERVAL_MS,
        ) {
            Ok(handle) => game.borrow_mut().spawn_timer = Some(handle),
            Err(e) => log::warn!("Failed to start spawn timer: {:?}", e),
        }
        closure.forget();
    }

    fn stop_spawn_timer(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        if let Some(handle) = g.spawn_timer.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_runner::consts::SPAWN_INTERVAL_MS;
    use neon_runner::sim::{self, Difficulty, GamePhase, GameState, TickInput, Viewport};

    env_logger::init();
    log::info!("Neon Runner (native) starting...");
    log::info!("Headless mode - run with `trunk serve` for the web version");

    // Scripted smoke run: jump on a fixed cadence until the run ends
    let viewport = Viewport::new(1280.0, 720.0);
    let mut state = GameState::new(2024, viewport);
    state.start_game(Difficulty::Easy, viewport);

    // Spawn cadence approximated at 60 ticks per second
    let ticks_per_spawn = (SPAWN_INTERVAL_MS as f32 / (1000.0 / 60.0)) as u64;
    for i in 0..20_000u64 {
        if i % ticks_per_spawn == 0 {
            sim::spawn_obstacle(&mut state, viewport);
        }
        let input = TickInput {
            jump: i % 50 == 0,
            ..Default::default()
        };
        sim::tick(&mut state, &input, viewport);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }
    println!("Demo run over after {} ticks, score {}", state.ticks, state.score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
