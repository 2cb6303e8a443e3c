//! IntersectionObserver-backed visibility source

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::fx::Observation;
use crate::platform::VisibilitySource;

/// One observer per watched element, disconnected as soon as its callback says stop
#[derive(Debug, Default)]
pub struct IntersectionSource {
    observed: usize,
}

impl IntersectionSource {
    pub fn new() -> Self {
        Self { observed: 0 }
    }

    /// Elements successfully put under observation
    pub fn observed(&self) -> usize {
        self.observed
    }
}

impl VisibilitySource for IntersectionSource {
    type Target = Element;

    fn observe(
        &mut self,
        target: &Element,
        threshold: f64,
        mut on_change: Box<dyn FnMut(f64) -> Observation>,
    ) {
        let closure = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let ratio = if entry.is_intersecting() {
                        entry.intersection_ratio()
                    } else {
                        0.0
                    };
                    if on_change(ratio) == Observation::Stop {
                        observer.disconnect();
                        return;
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        match IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                observer.observe(target);
                self.observed += 1;
                closure.forget();
            }
            Err(e) => log::warn!("IntersectionObserver unavailable: {:?}", e),
        }
    }
}
