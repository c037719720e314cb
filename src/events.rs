use crate::audio::AudioEngine;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const UNLOCK_EVENTS: [&str; 3] = ["click", "keydown", "touchstart"];

/// Browsers keep a fresh AudioContext suspended until a user gesture. Wire
/// one-time listeners that resume the context and start the ambient drone
/// on the first interaction, then detach themselves.
pub fn wire_gesture_unlock(audio: Rc<RefCell<AudioEngine>>) {
    let Some(window) = web::window() else {
        return;
    };
    let done = Rc::new(Cell::new(false));
    let handles: Rc<RefCell<Vec<(&'static str, Closure<dyn FnMut()>)>>> =
        Rc::new(RefCell::new(Vec::new()));

    for event in UNLOCK_EVENTS {
        let done = done.clone();
        let audio = audio.clone();
        let handles = handles.clone();
        let window_rm = window.clone();
        let closure = Closure::wrap(Box::new(move || {
            if done.replace(true) {
                return;
            }
            {
                let mut a = audio.borrow_mut();
                a.resume();
                a.start_ambient();
            }
            for (name, handle) in handles.borrow().iter() {
                _ = window_rm
                    .remove_event_listener_with_callback(name, handle.as_ref().unchecked_ref());
            }
        }) as Box<dyn FnMut()>);
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        handles.borrow_mut().push((event, closure));
    }
}
