//! Hop Square entry point
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

    use hop_square::consts::*;
    use hop_square::platform::StepAccumulator;
    use hop_square::renderer::{QuadBatch, RenderState, draw_scene};
    use hop_square::sim::{GameEvent, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        batch: QuadBatch,
        stepper: StepAccumulator,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                render_state: None,
                batch: QuadBatch::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                stepper: StepAccumulator::default(),
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run the fixed ticks this frame's delta pays for
        fn update(&mut self, dt: f32) {
            for _ in 0..self.stepper.advance(dt) {
                let input = self.input.clone();
                for event in tick(&mut self.state, &input, SIM_DT) {
                    if let GameEvent::Scored { score } = event {
                        web_sys::console::log_1(&format!("score: {}", score).into());
                    }
                }

                // Clear one-shot inputs after processing
                self.input.hop = false;
                self.input.quit = false;

                if self.state.phase.is_over() {
                    break;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            draw_scene(&self.state, &mut self.batch);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.batch) {
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
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("game-over") {
                let class = if self.state.phase.is_over() { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Hop Square starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fixed-size playfield
        let width = SCREEN_WIDTH as u32;
        let height = SCREEN_HEIGHT as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
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

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_input_handlers(game.clone());

        request_animation_frame(game);

        log::info!("Hop Square running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if event.repeat() {
                return;
            }
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                " " | "ArrowUp" | "w" | "W" => {
                    event.prevent_default();
                    g.input.hop = true;
                }
                "Escape" => g.input.quit = true,
                "i" | "I" => {
                    g.input.autopilot = !g.input.autopilot;
                    log::info!("Autopilot: {}", g.input.autopilot);
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let over = {
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
            g.update_hud();
            g.state.phase.is_over()
        };

        if over {
            let g = game.borrow();
            log::info!(
                "Game over ({:?}) with score {} after {} ticks",
                g.state.phase,
                g.state.score,
                g.state.time_ticks
            );
            return;
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
mod native_game {
    use std::fs::File;
    use std::io::BufWriter;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use hop_square::Tuning;
    use hop_square::consts::FPS;
    use hop_square::platform::native::FixedRatePacer;
    use hop_square::platform::{AutopilotInput, FramePacer, Unpaced, run_session};
    use hop_square::renderer::Framebuffer;
    use hop_square::sim::GameState;

    /// Headless Hop Square: the autopilot plays until it crashes
    #[derive(Parser, Debug)]
    #[command(name = "hop-square", version, about)]
    pub struct Args {
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,

        /// JSON tuning file overriding the reference configuration
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Pace frames at 30 Hz instead of running flat out
        #[arg(long)]
        realtime: bool,

        /// Stop after this many ticks
        #[arg(long)]
        max_ticks: Option<u64>,

        /// Write the last rendered frame as a PPM image
        #[arg(long)]
        snapshot: Option<PathBuf>,
    }

    pub fn run(args: Args) -> Result<()> {
        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)
                .with_context(|| format!("loading tuning from {}", path.display()))?,
            None => Tuning::default(),
        };

        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
        log::info!("Hop Square (native) starting with seed {}", seed);

        let mut state = GameState::with_tuning(seed, tuning)?;
        let mut framebuffer = Framebuffer::new(
            state.tuning.screen_width as usize,
            state.tuning.screen_height as usize,
        );

        let mut pacer: Box<dyn FramePacer> = if args.realtime {
            Box::new(FixedRatePacer::new(FPS))
        } else {
            Box::new(Unpaced)
        };

        let summary = run_session(
            &mut state,
            &mut AutopilotInput,
            &mut framebuffer,
            &mut pacer,
            args.max_ticks,
        );

        log::info!(
            "Session ended ({:?}) after {} ticks",
            summary.phase,
            summary.ticks
        );
        println!("final score: {}", summary.score);

        if let Some(path) = &args.snapshot {
            let file = File::create(path)
                .with_context(|| format!("creating snapshot {}", path.display()))?;
            framebuffer
                .write_ppm(&mut BufWriter::new(file))
                .with_context(|| format!("writing snapshot {}", path.display()))?;
            log::info!("Wrote snapshot to {}", path.display());
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    native_game::run(native_game::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
