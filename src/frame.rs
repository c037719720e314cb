use crate::audio::AudioEngine;
use crate::core::{SimEvent, SimEvents, Simulation};
use crate::dom;
use crate::render::Painter;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything one animation frame needs: the simulation, the painter, the
/// medallion image, the audio engine, and the live intensity control.
pub struct FrameContext {
    pub sim: Simulation,
    pub painter: Painter,
    pub canvas: web::HtmlCanvasElement,
    pub image: web::HtmlImageElement,
    pub audio: Rc<RefCell<AudioEngine>>,
    pub intensity: Rc<Cell<f32>>,
    pub pending_resize: Rc<Cell<bool>>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        if self.pending_resize.take() {
            let (w, h) = dom::sync_canvas_to_viewport(&self.canvas);
            self.sim.resize(w, h);
        }

        self.painter
            .fill_trail(self.sim.width() as f64, self.sim.height() as f64);

        // Intensity is read fresh each frame so live adjustments take
        // effect without restarting the engine.
        let mut events = SimEvents::new();
        self.sim.step(self.intensity.get(), &mut events);

        // Sound triggers belong to the same frame as their visual event
        {
            let mut audio = self.audio.borrow_mut();
            for ev in &events {
                match ev {
                    SimEvent::RocketLaunched { audible: true } => audio.play_firework_launch(),
                    SimEvent::RocketLaunched { audible: false } => {}
                    SimEvent::RocketExploded => audio.play_explosion(),
                }
            }
        }

        // Fixed back-to-front order: medallions, rockets, particles
        for m in self.sim.medallions() {
            self.painter.draw_medallion(m, &self.image);
        }
        for r in self.sim.rockets() {
            self.painter.draw_rocket(r);
        }
        for p in self.sim.particles() {
            self.painter.draw_particle(p);
        }
    }
}

/// On/off driver for the frame loop. `start` resets the populations, fires
/// the activation burst and begins scheduling; `stop` cancels the pending
/// animation frame and releases the resize listener. No frame runs while
/// inactive.
pub struct RenderLoop {
    ctx: Rc<RefCell<FrameContext>>,
    active: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    pending_resize: Rc<Cell<bool>>,
    resize_closure: Option<Closure<dyn FnMut()>>,
}

impl RenderLoop {
    pub fn new(ctx: FrameContext) -> Self {
        let pending_resize = ctx.pending_resize.clone();
        Self {
            ctx: Rc::new(RefCell::new(ctx)),
            active: Rc::new(Cell::new(false)),
            raf_id: Rc::new(Cell::new(None)),
            pending_resize,
            resize_closure: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn start(&mut self) {
        if self.active.get() {
            return;
        }
        self.active.set(true);

        {
            let mut fc = self.ctx.borrow_mut();
            let (w, h) = dom::sync_canvas_to_viewport(&fc.canvas);
            fc.sim.resize(w, h);
            fc.sim.reset();
        }

        let pending = self.pending_resize.clone();
        let closure = Closure::wrap(Box::new(move || pending.set(true)) as Box<dyn FnMut()>);
        if let Some(w) = web::window() {
            _ = w.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
        self.resize_closure = Some(closure);

        schedule_raf(self.ctx.clone(), self.active.clone(), self.raf_id.clone());
    }

    pub fn stop(&mut self) {
        if !self.active.get() {
            return;
        }
        self.active.set(false);
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        if let Some(closure) = self.resize_closure.take() {
            if let Some(w) = web::window() {
                _ = w.remove_event_listener_with_callback(
                    "resize",
                    closure.as_ref().unchecked_ref(),
                );
            }
        }
    }
}

// Self-rescheduling requestAnimationFrame closure, gated on the shared
// active flag so deactivation between frames stops the chain.
fn schedule_raf(
    ctx: Rc<RefCell<FrameContext>>,
    active: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let active_tick = active.clone();
    let raf_id_tick = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !active_tick.get() {
            return;
        }
        ctx.borrow_mut().frame();
        if !active_tick.get() {
            return;
        }
        if let Some(w) = web::window() {
            if let Ok(id) = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            ) {
                raf_id_tick.set(Some(id));
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Ok(id) =
            w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
        {
            raf_id.set(Some(id));
        }
    }
}
