//! requestAnimationFrame and setTimeout helpers

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(callback: &Closure<dyn FnMut(f64)>) {
    if let Some(window) = web_sys::window() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

/// Call `frame` with the frame timestamp (ms) every animation frame until it
/// returns false.
pub fn animation_loop(mut frame: impl FnMut(f64) -> bool + 'static) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::new(move |time: f64| {
        // The closure can't be dropped while it is running; a stopped loop just
        // stops rescheduling.
        if !frame(time) {
            return;
        }
        if let Some(callback) = f.borrow().as_ref() {
            request_frame(callback);
        }
    }));

    if let Some(callback) = g.borrow().as_ref() {
        request_frame(callback);
    }
}

/// Run `callback` once after `delay_ms`
pub fn set_timeout(delay_ms: u32, callback: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(callback);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms.min(i32::MAX as u32) as i32,
    );
    closure.forget();
}
