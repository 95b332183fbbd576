//! Sling Dot entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_toy {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, PointerEvent};

    use glam::Vec2;
    use sling_dot::renderer::pipeline::device_size;
    use sling_dot::renderer::{RenderState, Vertex, shapes};
    use sling_dot::sim::{WorldState, apply_release, step};
    use sling_dot::tuning::Tuning;

    /// One registered pointer listener, scoped to a single contact.
    ///
    /// `detach` unregisters the callback but keeps the closure alive: a
    /// wasm closure must not be freed while its own dispatch may still be
    /// on the stack, so spent guards move to a retired bin that the frame
    /// loop drains once dispatch is over.
    struct ScopedListener {
        target: web_sys::EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(PointerEvent)>,
        attached: bool,
    }

    impl ScopedListener {
        fn attach(
            target: &web_sys::EventTarget,
            event: &'static str,
            closure: Closure<dyn FnMut(PointerEvent)>,
        ) -> Self {
            let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            Self {
                target: target.clone(),
                event,
                closure,
                attached: true,
            }
        }

        fn detach(&mut self) {
            if self.attached {
                let _ = self
                    .target
                    .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
                self.attached = false;
            }
        }
    }

    impl Drop for ScopedListener {
        fn drop(&mut self) {
            self.detach();
        }
    }

    /// Toy instance holding all state
    struct Toy {
        world: WorldState,
        tuning: Tuning,
        render_state: Option<RenderState>,
        last_time: f64,
        /// Viewport size in CSS pixels
        viewport: Vec2,
        dpr: f32,
        /// Listeners registered for the currently tracked contact
        contact_listeners: Vec<ScopedListener>,
        /// Detached listeners awaiting safe destruction
        retired_listeners: Vec<ScopedListener>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Toy {
        fn new(tuning: Tuning) -> Self {
            Self {
                world: WorldState::new(),
                tuning,
                render_state: None,
                last_time: 0.0,
                viewport: Vec2::ZERO,
                dpr: 1.0,
                contact_listeners: Vec::new(),
                retired_listeners: Vec::new(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Advance the sim and bookkeeping for one frame
        fn update(&mut self, dt_ms: f32, time: f64) {
            step(&mut self.world, dt_ms, &self.tuning);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let scene = shapes::scene(&self.world, &self.tuning, self.viewport);
            let dpr = self.dpr;
            let device_px: Vec<Vertex> = scene
                .iter()
                .map(|v| Vertex::new(v.position[0] * dpr, v.position[1] * dpr, v.color))
                .collect();

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&device_px) {
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

        /// Update the FPS HUD element, if present
        fn update_hud(&self) {
            if !self.tuning.show_fps {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("hud-fps") {
                el.set_text_content(Some(&self.fps.to_string()));
            }
        }
    }

    /// Contact position in CSS pixels relative to the canvas
    fn event_position(canvas: &HtmlCanvasElement, ev: &PointerEvent) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            ev.client_x() as f32 - rect.left() as f32,
            ev.client_y() as f32 - rect.top() as f32,
        )
    }

    /// Release the tracked contact: apply the slingshot impulse and tear
    /// down this contact's listeners. Every exit path (up, cancel, leave)
    /// funnels through here.
    fn release_contact(toy: &Rc<RefCell<Toy>>, id: i32) {
        let mut t = toy.borrow_mut();
        let t = &mut *t;
        let Some(released) = t.world.pointer.on_release(id) else {
            return;
        };
        apply_release(&mut t.world.body, &released, &t.tuning);

        let mut spent: Vec<ScopedListener> = t.contact_listeners.drain(..).collect();
        for listener in &mut spent {
            listener.detach();
        }
        t.retired_listeners.append(&mut spent);
    }

    /// Register move/up/cancel/leave listeners scoped to one contact
    fn attach_contact_listeners(toy: &Rc<RefCell<Toy>>, canvas: &HtmlCanvasElement) {
        let document = web_sys::window().unwrap().document().unwrap();
        let target: &web_sys::EventTarget = document.as_ref();

        let move_listener = {
            let toy = toy.clone();
            let canvas = canvas.clone();
            Closure::<dyn FnMut(_)>::new(move |ev: PointerEvent| {
                let position = event_position(&canvas, &ev);
                toy.borrow_mut().world.pointer.on_move(ev.pointer_id(), position);
            })
        };

        let mut listeners = vec![ScopedListener::attach(target, "pointermove", move_listener)];
        for event in ["pointerup", "pointercancel", "pointerleave"] {
            let toy = toy.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |ev: PointerEvent| {
                release_contact(&toy, ev.pointer_id());
            });
            listeners.push(ScopedListener::attach(target, event, closure));
        }

        toy.borrow_mut().contact_listeners = listeners;
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, toy: Rc<RefCell<Toy>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |ev: PointerEvent| {
            let position = event_position(&canvas_clone, &ev);
            let accepted = toy
                .borrow_mut()
                .world
                .pointer
                .on_down(ev.pointer_id(), position);
            // Concurrent second contacts are ignored outright
            if accepted {
                attach_contact_listeners(&toy, &canvas_clone);
            }
        });
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Keep the canvas backing store, surface, and viewport in sync with
    /// the window. The device pixel ratio is re-read too; it changes when
    /// the window moves between displays.
    fn setup_resize_handler(canvas: &HtmlCanvasElement, toy: Rc<RefCell<Toy>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_ev: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let client_w = canvas.client_width();
            let client_h = canvas.client_height();
            let (width, height) = device_size(client_w, client_h, dpr);
            canvas.set_width(width);
            canvas.set_height(height);

            let mut t = toy.borrow_mut();
            t.viewport = Vec2::new(client_w as f32, client_h as f32);
            t.dpr = dpr as f32;
            if let Some(ref mut render_state) = t.render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_frame(toy: Rc<RefCell<Toy>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(toy, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(toy: Rc<RefCell<Toy>>, time: f64) {
        {
            let mut t = toy.borrow_mut();

            // Safe point: no pointer dispatch is on the stack here
            t.retired_listeners.clear();

            let dt_ms = if t.last_time > 0.0 {
                (time - t.last_time) as f32
            } else {
                0.0
            };
            t.last_time = time;

            t.update(dt_ms, time);
            t.render();
            t.update_hud();
        }

        request_frame(toy);
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sling Dot starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let (width, height) = device_size(client_w, client_h, dpr);
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = Tuning::load();
        // Write the key back so it exists for hand-editing in devtools
        tuning.save();

        let toy = Rc::new(RefCell::new(Toy::new(tuning)));
        {
            let mut t = toy.borrow_mut();
            t.viewport = Vec2::new(client_w as f32, client_h as f32);
            t.dpr = dpr as f32;
        }

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
        toy.borrow_mut().render_state = Some(render_state);

        setup_pointer_handlers(&canvas, toy.clone());
        setup_resize_handler(&canvas, toy.clone());
        request_frame(toy);

        log::info!("Sling Dot running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_toy::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use sling_dot::sim::{WorldState, apply_release, step};
    use sling_dot::tuning::Tuning;

    env_logger::init();
    log::info!("Sling Dot (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    // Headless demo: one slingshot release, integrated for a second
    let tuning = Tuning::load();
    let mut world = WorldState::new();

    world.pointer.on_down(0, Vec2::new(400.0, 300.0));
    world.pointer.on_move(0, Vec2::new(400.0, 420.0));
    let released = world.pointer.on_release(0).expect("release signal");
    apply_release(&mut world.body, &released, &tuning);
    log::info!("Released with velocity {:?}", world.body.vel);

    for frame in 1..=60 {
        step(&mut world, 1000.0 / 60.0, &tuning);
        if frame % 15 == 0 {
            log::info!(
                "t={:.2}s pos=({:.3}, {:.3})",
                frame as f32 / 60.0,
                world.body.pos.x,
                world.body.pos.y
            );
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
