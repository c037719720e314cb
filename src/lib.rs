#![cfg(target_arch = "wasm32")]
use crate::audio::AudioEngine;
use crate::core::Simulation;
use crate::frame::{FrameContext, RenderLoop};
use crate::render::Painter;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fiesta-web starting");
    Ok(())
}

/// The externally visible surface of the celebration engine: start/stop the
/// effects, adjust intensity live, and forward volume/mute to the audio
/// engine. Everything else (form UI, music playback) lives outside.
#[wasm_bindgen]
pub struct Celebration {
    audio: Rc<RefCell<AudioEngine>>,
    render_loop: RenderLoop,
    intensity: Rc<Cell<f32>>,
}

#[wasm_bindgen]
impl Celebration {
    /// Bind to an existing full-viewport canvas. `medallion_src` is the
    /// image shown inside the bouncing medallions; it loads asynchronously
    /// and medallions simply skip drawing until it is ready.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, medallion_src: &str) -> Result<Celebration, JsValue> {
        build(canvas_id, medallion_src).map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }

    /// Switch the engine on: fade out the ambient drone, fire the crowd
    /// swell, reset the populations and start the frame loop.
    pub fn activate(&mut self) {
        {
            let mut a = self.audio.borrow_mut();
            a.stop_ambient();
            a.play_celebration();
        }
        self.render_loop.start();
    }

    /// Switch the engine off. Cancels the pending frame and releases the
    /// resize listener; in-flight particles are discarded.
    pub fn deactivate(&mut self) {
        self.render_loop.stop();
    }

    pub fn is_active(&self) -> bool {
        self.render_loop.is_active()
    }

    /// Live spawn-rate control, read fresh every frame. Negative values are
    /// clamped so the spawn probability stays a probability.
    pub fn set_intensity(&mut self, value: f32) {
        self.intensity.set(value.max(0.0));
    }

    pub fn set_volume(&mut self, value: f32) {
        self.audio.borrow_mut().set_volume(value);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.audio.borrow_mut().set_muted(muted);
    }

    /// Must be called from within a user-gesture handler to lift autoplay
    /// suspension; harmless otherwise.
    pub fn resume_audio(&mut self) {
        self.audio.borrow_mut().resume();
    }

    pub fn start_ambient(&mut self) {
        self.audio.borrow_mut().start_ambient();
    }

    pub fn stop_ambient(&mut self) {
        self.audio.borrow_mut().stop_ambient();
    }

    /// Gift-unwrap interaction sound.
    pub fn play_unwrap(&mut self) {
        self.audio.borrow_mut().play_unwrap();
    }

    pub fn trigger_celebration_sequence(&mut self) {
        self.audio.borrow_mut().play_celebration();
    }

    /// Install one-time window listeners that unlock audio and start the
    /// drone on the first click/keydown/touch.
    pub fn wire_gesture_unlock(&self) {
        events::wire_gesture_unlock(self.audio.clone());
    }
}

fn build(canvas_id: &str, medallion_src: &str) -> anyhow::Result<Celebration> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{canvas_id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let ctx_obj: js_sys::Object = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?;
    let ctx2d: web::CanvasRenderingContext2d = ctx_obj
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let image = web::HtmlImageElement::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    image.set_src(medallion_src);

    let (width, height) = dom::sync_canvas_to_viewport(&canvas);
    let audio = Rc::new(RefCell::new(AudioEngine::new()));
    let intensity = Rc::new(Cell::new(0.5));
    let frame_ctx = FrameContext {
        sim: Simulation::new(width, height),
        painter: Painter::new(ctx2d),
        canvas,
        image,
        audio: audio.clone(),
        intensity: intensity.clone(),
        pending_resize: Rc::new(Cell::new(false)),
    };
    Ok(Celebration {
        audio,
        render_loop: RenderLoop::new(frame_ctx),
        intensity,
    })
}
