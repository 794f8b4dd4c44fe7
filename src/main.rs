//! Flappy entry point
//!
//! Browser: canvas game driven by `requestAnimationFrame`.
//! Native: headless runner where the autopilot plays and the log keeps score.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy::platform::{Command, Game, Renderer};
    use flappy::renderer::{CanvasRenderer, clouds};
    use flappy::sim::GameState;

    /// Game plus the canvas it draws on
    struct App {
        game: Game,
        renderer: CanvasRenderer,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let seed = js_sys::Date::now() as u64;
        let state = GameState::with_seed(seed);
        let (width, height) = (state.config.visible_width, state.config.visible_height);

        // Backing store at device resolution, drawn in game pixels
        let dpr = window.device_pixel_ratio();
        canvas.set_width((width as f64 * dpr) as u32);
        canvas.set_height((height as f64 * dpr) as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("getContext failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let renderer = CanvasRenderer::new(ctx, clouds(state.seed, width, height), dpr);
        let app = Rc::new(RefCell::new(App {
            game: Game::new(state),
            renderer,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, app.clone());
        request_animation_frame(app);

        log::info!("Flappy running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse click flaps (or restarts)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.apply(Command::Action);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().game.apply(Command::Action);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let command = match event.key().as_str() {
                    " " | "ArrowUp" => Command::Action,
                    "Escape" => Command::Quit,
                    "i" | "I" => Command::ToggleAutopilot,
                    _ => return,
                };
                // Keep Space from scrolling the page
                event.prevent_default();
                app.borrow_mut().game.apply(command);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut guard = app.borrow_mut();
            let App { game, renderer } = &mut *guard;

            if game.quit_requested() {
                log::info!("Stopped (best score {})", game.state.best_score);
                return;
            }

            game.update(time);
            renderer.render(&game.snapshot(), game.events());
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use clap::Parser;

    use flappy::GameConfig;
    use flappy::consts::TARGET_FPS;
    use flappy::platform::{
        self, Command, Game, InputSource, ManualClock, Renderer, RunSummary, SystemClock,
    };
    use flappy::sim::{GameEvent, GamePhase, GameState, Snapshot};

    #[derive(Parser, Debug)]
    #[command(name = "flappy")]
    #[command(about = "Headless Flappy runner: the autopilot plays, the log keeps score")]
    struct Args {
        /// Gap RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
        /// Frames to run
        #[arg(long, default_value_t = 3600)]
        frames: u64,
        /// JSON file with tuning overrides
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Run as fast as possible instead of at 60 Hz
        #[arg(long)]
        unpaced: bool,
    }

    /// Switches the autopilot on, then restarts each run a while after it crashes
    struct DemoInput {
        started: bool,
        restart_delay: u32,
        waited: u32,
    }

    impl DemoInput {
        fn new(restart_delay: u32) -> Self {
            Self {
                started: false,
                restart_delay,
                waited: 0,
            }
        }
    }

    impl InputSource for DemoInput {
        fn poll(&mut self, snapshot: &Snapshot, out: &mut Vec<Command>) {
            if !self.started {
                self.started = true;
                out.push(Command::ToggleAutopilot);
            }
            if snapshot.phase != GamePhase::GameOver {
                self.waited = 0;
                return;
            }
            self.waited += 1;
            if self.waited >= self.restart_delay {
                self.waited = 0;
                out.push(Command::Reset);
            }
        }
    }

    /// Narrates events instead of drawing
    struct LogRenderer;

    impl Renderer for LogRenderer {
        fn render(&mut self, _snapshot: &Snapshot, events: &[GameEvent]) {
            for event in events {
                match event {
                    GameEvent::Scored { score } => log::debug!("Scored: {}", score),
                    GameEvent::PipeSpawned { id } => log::trace!("Pipe {} spawned", id),
                    GameEvent::Flapped => log::trace!("Flap"),
                    // Logged by the session itself
                    GameEvent::Crashed { .. } | GameEvent::Reset => {}
                }
            }
        }
    }

    fn load_config(path: Option<&Path>) -> Result<GameConfig> {
        let Some(path) = path else {
            return Ok(GameConfig::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        GameConfig::from_json(&json)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }

    pub fn main() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let args = Args::parse();
        let config = load_config(args.config.as_deref())?;
        let seed = args.seed.unwrap_or_else(clock_seed);

        log::info!("Flappy (native) starting: seed {}, {} frames", seed, args.frames);

        let state = GameState::new(config, seed).context("Failed to start session")?;
        let mut game = Game::new(state);
        let mut input = DemoInput::new(TARGET_FPS);
        let frames = Some(args.frames);

        let summary: RunSummary = if args.unpaced {
            platform::run(&mut game, &mut input, &mut LogRenderer, &mut ManualClock::new(), frames)
        } else {
            platform::run(&mut game, &mut input, &mut LogRenderer, &mut SystemClock::new(), frames)
        };

        log::info!(
            "Finished after {} frames (seed {}): {} crashes, final score {}, best {}",
            summary.frames,
            game.state.seed,
            summary.crashes,
            summary.final_score,
            summary.best_score
        );
        if game.dropped_ms() > 0.0 {
            log::warn!("Skipped {:.0} ms of wall-clock stalls", game.dropped_ms());
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
