//! Duck Party entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use duck_party::Settings;
    use duck_party::audio::{AudioManager, ToneSink};
    use duck_party::platform::{backing_size, click_command, command_for_key};
    use duck_party::renderer::{
        DrawList, FrameOptions, RenderState, Vertex, compose_frame, tessellate_into,
    };
    use duck_party::sim::{Command, Scene, tick};

    /// App instance holding all state
    struct App {
        scene: Scene,
        settings: Settings,
        audio: AudioManager,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        draw_list: DrawList,
        vertices: Vec<Vertex>,
    }

    impl App {
        fn new(canvas: HtmlCanvasElement, size: Vec2, settings: Settings) -> Self {
            let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
            log::info!("Scene initialized with seed: {}", seed);
            Self {
                scene: Scene::new(seed, size, settings.scene_params()),
                audio: AudioManager::from_settings(&settings),
                settings,
                render_state: None,
                canvas,
                draw_list: DrawList::new(),
                vertices: Vec::new(),
            }
        }

        /// One animation frame: simulate, play sounds, draw
        fn frame(&mut self) {
            tick(&mut self.scene);

            for event in self.scene.drain_events() {
                self.audio.play_event(&event);
            }

            let options = FrameOptions {
                show_legend: self.settings.show_legend,
            };
            compose_frame(&self.scene, &options, &mut self.draw_list);
            self.vertices.clear();
            tessellate_into(&self.draw_list, &mut self.vertices);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn apply(&mut self, command: Command) {
            log::debug!("Command: {:?}", command);
            self.scene.apply(command);
        }

        /// Match the canvas backing store to its on-page size
        fn resize(&mut self, dpr: f32) {
            let size = css_size(&self.canvas);
            let (width, height) = backing_size(size, dpr);
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.scene.resize(size);
            if let Some(ref mut render_state) = self.render_state {
                render_state.set_scale_factor(dpr);
                render_state.resize(width, height);
            }
        }

        /// Fill and place the DOM legend over the legend box
        fn update_legend(&mut self, document: &Document) {
            let Some(el) = document
                .get_element_by_id("legend")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };

            if !self.settings.show_legend {
                let _ = el.set_attribute("class", "hidden");
                return;
            }

            // Compose once so the text positions match what will be drawn
            compose_frame(&self.scene, &FrameOptions { show_legend: true }, &mut self.draw_list);
            let mut lines = self.draw_list.texts();
            let Some((origin, first)) = lines.next() else {
                return;
            };
            let mut text = first.to_string();
            for (_, line) in lines {
                text.push('\n');
                text.push_str(line);
            }

            el.set_text_content(Some(&text));
            let style = el.style();
            let _ = style.set_property("left", &format!("{}px", origin.x));
            let _ = style.set_property("top", &format!("{}px", origin.y));
            let _ = el.set_attribute("class", "");
        }
    }

    /// On-page canvas size in CSS pixels; the scene lives in this space
    fn css_size(canvas: &HtmlCanvasElement) -> Vec2 {
        Vec2::new(
            (canvas.client_width() as f32).max(1.0),
            (canvas.client_height() as f32).max(1.0),
        )
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Duck Party starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio() as f32;
        let size = css_size(&canvas);
        let (width, height) = backing_size(size, dpr);
        canvas.set_width(width);
        canvas.set_height(height);

        // Write back so the stored JSON always lists every field
        let settings = Settings::load();
        settings.save();
        let app = Rc::new(RefCell::new(App::new(canvas.clone(), size, settings)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, dpr)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        app.borrow_mut().render_state = Some(render_state);
        app.borrow_mut().update_legend(&document);

        setup_input_handlers(&canvas, app.clone())?;
        setup_resize_handler(app.clone())?;

        // Start animation loop
        request_animation_frame(app);

        log::info!("Duck Party running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(command) = command_for_key(&event.key()) else {
                    return;
                };
                event.prevent_default();
                let mut a = app.borrow_mut();
                a.audio.resume();
                a.apply(command);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse down - hit-test ducks
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.audio.resume();
                let offset = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                let element = Vec2::new(
                    canvas_clone.client_width() as f32,
                    canvas_clone.client_height() as f32,
                );
                let command = click_command(offset, element, a.scene.canvas);
                a.apply(command);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize_handler(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let mut a = app.borrow_mut();
            a.resize(window.device_pixel_ratio() as f32);
            if let Some(document) = window.document() {
                a.update_legend(&document);
            }
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            animation_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn animation_loop(app: Rc<RefCell<App>>) {
        app.borrow_mut().frame();
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Duck Party (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(7);
    let frames = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);

    let summary = headless::run(seed, frames);
    println!(
        "{} frames, {} ducks: {} edge hits, {} parties, {} quacks, {} confetti left, {} vertices in last frame",
        frames,
        summary.ducks,
        summary.hits,
        summary.parties,
        summary.quacks,
        summary.confetti,
        summary.vertices
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use duck_party::Settings;
    use duck_party::audio::{AudioManager, ToneSink};
    use duck_party::renderer::{DrawList, FrameOptions, compose_frame, tessellate};
    use duck_party::sim::{Command, Scene, SceneEvent, tick};

    const CANVAS: Vec2 = Vec2::new(800.0, 600.0);

    #[derive(Debug, Default)]
    pub struct Summary {
        pub ducks: usize,
        pub hits: usize,
        pub parties: usize,
        pub quacks: usize,
        pub confetti: usize,
        pub vertices: usize,
    }

    /// Scripted keypresses, by frame
    fn scripted(frame: u64) -> Option<Command> {
        match frame {
            1 => Some(Command::ToggleMotion),
            60 => Some(Command::AddDucks(3)),
            120 => Some(Command::CycleHat),
            180 => Some(Command::CycleTerrain),
            240 => Some(Command::Party),
            300 => Some(Command::Click(CANVAS / 2.0)),
            360 => Some(Command::CycleColor),
            _ => None,
        }
    }

    pub fn run(seed: u64, frames: u64) -> Summary {
        let settings = Settings::load();
        let audio = AudioManager::from_settings(&settings);
        let mut scene = Scene::new(seed, CANVAS, settings.scene_params());
        let mut summary = Summary::default();

        log::info!("Headless run: seed {} for {} frames", seed, frames);

        for frame in 1..=frames {
            if let Some(command) = scripted(frame) {
                log::info!("Frame {}: {:?}", frame, command);
                scene.apply(command);
            }
            tick(&mut scene);

            for event in scene.drain_events() {
                match event {
                    SceneEvent::BoundaryHit { .. } => summary.hits += 1,
                    SceneEvent::Party { .. } => summary.parties += 1,
                    SceneEvent::Quack { .. } => summary.quacks += 1,
                }
                audio.play_event(&event);
            }
        }

        let mut list = DrawList::new();
        compose_frame(
            &scene,
            &FrameOptions {
                show_legend: settings.show_legend,
            },
            &mut list,
        );
        summary.vertices = tessellate(&list).len();
        summary.ducks = scene.ducks.len();
        summary.confetti = scene.confetti.len();
        summary
    }
}
