//! Breakout entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use breakout::audio::AudioManager;
    use breakout::consts::*;
    use breakout::platform::input::{Direction, client_to_play_x};
    use breakout::platform::LocalStorageStore;
    use breakout::renderer::vertex::css_hex;
    use breakout::renderer::{RenderState, Scene, TextNode, text_layout};
    use breakout::{Game, Settings};

    /// Browser host: the game session plus everything that draws it
    struct App {
        game: Game<AudioManager, LocalStorageStore>,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        hud: Option<HtmlElement>,
        /// Text overlay currently in the DOM, rebuilt when text or display size changes
        hud_nodes: Vec<TextNode>,
    }

    impl App {
        fn new(seed: u64, canvas: HtmlCanvasElement, hud: Option<HtmlElement>) -> Self {
            let settings = Settings::load();
            let audio = AudioManager::new(seed);
            Self {
                game: Game::new(seed, settings, audio, LocalStorageStore::default()),
                render_state: None,
                canvas,
                hud,
                hud_nodes: Vec::new(),
            }
        }

        /// Draw the shapes through WebGPU
        fn render(&mut self, scene: &Scene) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(scene) {
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

        /// Mirror the scene's text commands into absolutely positioned DOM nodes
        fn update_hud(&mut self, scene: &Scene) {
            let Some(hud) = &self.hud else { return };

            let nodes = text_layout(scene, self.canvas.client_height() as f32);
            if nodes == self.hud_nodes {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            hud.set_inner_html("");
            for node in &nodes {
                let Ok(el) = document.create_element("div") else {
                    continue;
                };
                el.set_text_content(Some(&node.text));
                let style = format!(
                    "position:absolute;left:{:.3}%;top:{:.3}%;transform:translate(-50%,-50%);\
                     font:{} {}px sans-serif;color:{};white-space:nowrap;pointer-events:none",
                    node.left_pct,
                    node.top_pct,
                    if node.bold { "bold" } else { "normal" },
                    node.font_px,
                    css_hex(node.color),
                );
                let _ = el.set_attribute("style", &style);
                let _ = hud.append_child(&el);
            }
            self.hud_nodes = nodes;
        }

        fn pointer_to_play_x(&self, event: &MouseEvent) -> Option<f32> {
            let rect = self.canvas.get_bounding_client_rect();
            client_to_play_x(event.client_x() as f32, rect.left() as f32, rect.width() as f32)
        }
    }

    fn document() -> Result<Document, JsValue> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Breakout starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = document()?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        let hud: Option<HtmlElement> = document
            .get_element_by_id("hud")
            .and_then(|el| el.dyn_into().ok());

        // Backing store at device resolution, same aspect as the play area
        let dpr = window.device_pixel_ratio();
        let width = (SCREEN_WIDTH as f64 * dpr) as u32;
        let height = (SCREEN_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed, canvas.clone(), hud)));
        log::info!("Game initialized with seed: {}", seed);

        match init_renderer(&canvas, width, height).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("WebGPU unavailable, drawing text only: {}", e),
        }

        setup_input_handlers(&canvas, app.clone())?;

        request_animation_frame(app);

        log::info!("Breakout running!");
        Ok(())
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| format!("surface: {}", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| format!("adapter: {}", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| format!("device: {}", e))
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = document()?;

        // Pointer anywhere on the page steers the paddle
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                if let Some(x) = a.pointer_to_play_x(&event) {
                    a.game.pointer_move(x);
                }
            });
            document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click starts or restarts
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.game.audio().resume();
                a.game.activate();
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut a = app.borrow_mut();
                if let Some(dir) = Direction::from_key(&key) {
                    event.prevent_default();
                    a.game.key_down(dir);
                } else if key == "i" || key == "I" {
                    a.game.toggle_autopilot();
                } else if key == "m" || key == "M" {
                    a.game.toggle_mute().save();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(dir) = Direction::from_key(&event.key()) {
                    app.borrow_mut().game.key_up(dir);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            let scene = a.game.frame();
            a.render(&scene);
            a.update_hud(&scene);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

/// Frames the headless demo runs for (about five minutes at 60 fps)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAMES: u64 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use breakout::audio::NullAudio;
    use breakout::game::run;
    use breakout::platform::MemoryStore;
    use breakout::renderer::Scene;
    use breakout::{FixedFrames, Game, Settings};

    env_logger::init();
    log::info!("Breakout (native) starting...");
    log::info!("No window on native builds - running a headless autopilot demo");

    let seed: u64 = rand::random();
    let mut game = Game::new(seed, Settings::default(), NullAudio, MemoryStore::new());
    game.toggle_autopilot();
    game.activate();

    let mut shapes = 0usize;
    let frames = run(
        &mut game,
        &mut FixedFrames::new(DEMO_FRAMES).until_finished(),
        &mut |scene: &Scene| shapes += scene.shape_count(),
    );

    let state = game.state();
    log::info!(
        "Demo finished after {} frames: {:?}, score {}, lives {}, bricks left {}",
        frames,
        state.phase,
        state.score,
        state.lives,
        state.bricks.alive_count()
    );
    log::debug!("Shapes drawn: {}", shapes);
    println!(
        "seed {} -> {:?} with score {} in {} frames (best {})",
        seed,
        state.phase,
        state.score,
        frames,
        game.high_score().best().unwrap_or(0)
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
