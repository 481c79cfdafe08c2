//! Bubble Sandbox entry point
//!
//! Wires the canvas, pointer and keyboard input, control buttons and the
//! animation loop in the browser. Natively runs a short headless simulation.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_sandbox {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use bubble_sandbox::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use bubble_sandbox::platform::FrameClock;
    use bubble_sandbox::platform::canvas::{CanvasSurface, WebIconLoader};
    use bubble_sandbox::renderer::{Hud, SceneRenderer};
    use bubble_sandbox::sim::{PhysicsEngine, SandboxState, tick};
    use bubble_sandbox::{Catalog, Settings};

    const CANVAS_ID: &str = "canvas";

    /// Sandbox instance holding all state
    struct Sandbox {
        state: SandboxState,
        engine: PhysicsEngine,
        catalog: Catalog,
        renderer: SceneRenderer<CanvasSurface, WebIconLoader>,
        clock: FrameClock,
        settings: Settings,
    }

    impl Sandbox {
        fn new(settings: Settings, surface: CanvasSurface, seed: u64) -> Self {
            Self {
                state: SandboxState::new(seed, settings.pattern),
                engine: PhysicsEngine::new(settings.physics),
                catalog: Catalog::builtin(),
                renderer: SceneRenderer::new(surface, WebIconLoader, settings.style.clone()),
                clock: FrameClock::new(),
                settings,
            }
        }

        fn bounds(&self) -> Vec2 {
            self.renderer.dimensions()
        }

        fn reset(&mut self) {
            let bounds = self.bounds();
            self.state.reset(&self.catalog, &self.engine, bounds);
        }

        fn add_bubble(&mut self) {
            let bounds = self.bounds();
            if self.state.add_random(&self.catalog, &self.engine, bounds).is_none() {
                log::warn!("Catalog is empty; nothing to add");
            }
        }

        fn toggle_physics(&mut self) {
            self.state.toggle_pause();
            sync_toggle_label(self.state.is_paused());
        }

        /// Flip a HUD preference and persist it
        fn toggle_grid(&mut self) {
            self.settings.show_grid = !self.settings.show_grid;
            self.settings.save();
        }

        fn toggle_stats(&mut self) {
            self.settings.show_stats = !self.settings.show_stats;
            self.settings.save();
        }

        /// Start (or retry) every catalog icon
        fn preload_icons(&mut self) {
            let refs = self.catalog.icon_refs();
            let slots = self.renderer.preload_icons(refs);
            log::info!("Requested {} icons", slots.len());
        }

        /// Size the canvas to its container; lay out if nothing is on it yet
        fn fit_to_parent(&mut self) {
            let canvas = self.renderer.surface().canvas();
            let (w, h) = canvas
                .parent_element()
                .map(|p| (p.client_width(), p.client_height()))
                .filter(|&(w, h)| w > 0 && h > 0)
                .map(|(w, h)| (w as u32, h as u32))
                .unwrap_or((DEFAULT_WIDTH as u32, DEFAULT_HEIGHT as u32));

            self.renderer.resize(w, h);
            if self.state.snapshot().is_empty() {
                self.reset();
            }
        }

        fn pointer(&self, event: &MouseEvent) -> Vec2 {
            self.renderer
                .screen_to_canvas(event.client_x() as f32, event.client_y() as f32)
        }

        /// One animation frame: step, then draw the published snapshot
        fn frame(&mut self, time: f64) {
            let fps = self.clock.frame(time);
            let bounds = self.bounds();
            tick(&mut self.state, &self.engine, bounds);

            let snapshot = self.state.snapshot();
            let hud = Hud {
                fps,
                instructions: self.settings.instructions(),
                show_stats: self.settings.show_stats,
                show_grid: self.settings.show_grid,
            };
            self.renderer.render(&snapshot, &hud);
        }
    }

    fn sync_toggle_label(paused: bool) {
        let label = if paused { "Resume Physics" } else { "Pause Physics" };
        if let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("toggle-physics"))
        {
            btn.set_text_content(Some(label));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger unavailable: {e}").into());
        }

        log::info!("Bubble Sandbox starting...");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let surface = CanvasSurface::from_element_id(CANVAS_ID)?;
        let canvas = surface.canvas().clone();

        let sandbox = Rc::new(RefCell::new(Sandbox::new(settings, surface, seed)));
        {
            let mut s = sandbox.borrow_mut();
            s.fit_to_parent();
            s.preload_icons();
        }

        log::info!("Sandbox initialized with seed: {}", seed);

        setup_pointer_handlers(&canvas, sandbox.clone());
        setup_controls(sandbox.clone());
        setup_resize(sandbox.clone());

        request_animation_frame(sandbox);

        log::info!("Bubble Sandbox running!");
        Ok(())
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, sandbox: Rc<RefCell<Sandbox>>) {
        // Press
        {
            let sandbox = sandbox.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut s = sandbox.borrow_mut();
                let point = s.pointer(&event);
                let Sandbox { state, engine, .. } = &mut *s;
                state.press(engine, point, event.time_stamp());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Move
        {
            let sandbox = sandbox.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut s = sandbox.borrow_mut();
                if s.state.drag.is_none() {
                    return;
                }
                let point = s.pointer(&event);
                s.state.drag_to(point, event.time_stamp());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Release; leaving the canvas counts as a release
        for event_name in ["mouseup", "mouseleave"] {
            let sandbox = sandbox.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut s = sandbox.borrow_mut();
                let point = s.pointer(&event);
                let Sandbox { state, engine, .. } = &mut *s;
                state.release(engine, point, event.time_stamp());
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_controls(sandbox: Rc<RefCell<Sandbox>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let buttons: [(&str, fn(&mut Sandbox)); 3] = [
            ("toggle-physics", Sandbox::toggle_physics),
            ("reset-bubbles", Sandbox::reset),
            ("add-bubble", Sandbox::add_bubble),
        ];
        for (id, action) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::debug!("No #{} button", id);
                continue;
            };
            let sandbox = sandbox.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                action(&mut sandbox.borrow_mut());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut s = sandbox.borrow_mut();
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        s.toggle_physics();
                    }
                    "r" | "R" => s.reset(),
                    "a" | "A" => s.add_bubble(),
                    "i" | "I" => s.preload_icons(),
                    "g" | "G" => s.toggle_grid(),
                    "s" | "S" => s.toggle_stats(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(sandbox: Rc<RefCell<Sandbox>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            sandbox.borrow_mut().fit_to_parent();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(sandbox: Rc<RefCell<Sandbox>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; animation loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(sandbox, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(sandbox: Rc<RefCell<Sandbox>>, time: f64) {
        sandbox.borrow_mut().frame(time);
        request_animation_frame(sandbox);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    web_sandbox::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bubble Sandbox (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the interactive canvas");

    run_headless(600);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Lay out the built-in catalog, fling one bubble, run `frames` steps and
/// log where things ended up
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(frames: u32) {
    use bubble_sandbox::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use bubble_sandbox::sim::{PhysicsEngine, SandboxState, tick};
    use bubble_sandbox::{Catalog, Settings};
    use glam::Vec2;

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or(42);
    let bounds = Vec2::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    let engine = PhysicsEngine::new(settings.physics);
    let catalog = Catalog::builtin();

    let mut state = SandboxState::new(seed, settings.pattern);
    state.reset(&catalog, &engine, bounds);
    state.add_random(&catalog, &engine, bounds);

    if let Some(first) = state.bubbles().first() {
        let start = first.pos;
        state.press(&engine, start, 0.0);
        state.drag_to(start + Vec2::new(10.0, 0.0), 16.0);
        if let Some(fling) = state.release(&engine, start + Vec2::new(60.0, 40.0), 32.0) {
            log::info!("Flung at ({:.2}, {:.2})", fling.x, fling.y);
        }
    }

    for _ in 0..frames {
        tick(&mut state, &engine, bounds);
    }

    let max_speed = state
        .bubbles()
        .iter()
        .map(|b| b.speed())
        .fold(0.0f32, f32::max);
    log::info!(
        "{} bubbles after {} frames (snapshot v{}, max speed {:.2})",
        state.bubbles().len(),
        frames,
        state.version(),
        max_speed
    );
    println!(
        "✓ Simulated {} bubbles for {} frames, max speed {:.2}",
        state.bubbles().len(),
        frames,
        max_speed
    );
}
