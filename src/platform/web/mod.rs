//! Browser bindings
//!
//! Thin wrappers over `web-sys` shared by the entry point's feature setup. Lookups
//! return `Option` so a page missing some markup just loses that feature.

mod schedule;
mod storage;
mod transport;
mod visibility;

pub use schedule::{animation_loop, set_timeout};
pub use storage::LocalStore;
pub use transport::FetchTransport;
pub use visibility::IntersectionSource;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

/// Markup contract: ids, classes and data attributes the page provides
pub mod selectors {
    pub const STARFIELD: &str = "starfield";
    pub const MATRIX_CANVAS: &str = "matrix-canvas";
    pub const HERO_TEXT: &str = "typewriter";
    pub const REVEAL: &str = ".reveal";
    pub const REVEALED_CLASS: &str = "revealed";
    pub const SKILL_BAR: &str = ".skill-bar[data-progress]";
    pub const SKILL_FILL: &str = ".skill-fill";
    pub const PROGRESS_ATTR: &str = "data-progress";
    pub const PROJECT_CARD: &str = ".project-card";
    pub const CATEGORY_ATTR: &str = "data-category";
    pub const MODAL_ATTR: &str = "data-modal";
    pub const MODAL: &str = ".modal";
    pub const MODAL_CLOSE: &str = ".modal-close";
    pub const OPEN_CLASS: &str = "active";
    pub const THEME_TOGGLE: &str = "theme-toggle";
    pub const THEME_ICON: &str = "theme-icon";
    pub const LIGHT_MODE_CLASS: &str = "light-mode";
    pub const TAB_BUTTON: &str = ".tab-btn[data-category]";
    pub const ACTIVE_TAB_CLASS: &str = "active";
    pub const CONTACT_FORM: &str = "contact-form";
    pub const FORM_STATUS: &str = "form-status";
    pub const YEAR: &str = "year";
    pub const NAV_TOGGLE: &str = "nav-toggle";
    pub const NAV_LINKS: &str = "nav-links";
    pub const NAV_OPEN_CLASS: &str = "open";
    pub const CELEBRATION_CLASS: &str = "celebration";
    pub const PARTICLE_CLASS: &str = "confetti";
}

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Element by id, cast to a concrete element type
pub fn by_id_as<T: JsCast>(id: &str) -> Option<T> {
    by_id(id)?.dyn_into::<T>().ok()
}

/// Every element under `root` (or the document) matching `selector`, in document order
pub fn query_all(root: Option<&Element>, selector: &str) -> Vec<Element> {
    let list = match root {
        Some(root) => root.query_selector_all(selector),
        None => match document() {
            Some(doc) => doc.query_selector_all(selector),
            None => return Vec::new(),
        },
    };
    let Ok(list) = list else {
        log::warn!("Bad selector: {}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Viewport size in CSS pixels
pub fn viewport_size() -> (f32, f32) {
    let Some(window) = window() else {
        return (0.0, 0.0);
    };
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w as f32, h as f32)
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

/// Show or hide an element via `display`
pub fn set_shown(el: &Element, shown: bool) {
    if shown {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let _ = html.style().remove_property("display");
        }
    } else {
        set_style(el, "display", "none");
    }
}

/// Lock or release page scrolling
pub fn set_scroll_locked(locked: bool) {
    if let Some(body) = document().and_then(|d| d.body()) {
        let _ = body
            .style()
            .set_property("overflow", if locked { "hidden" } else { "" });
    }
}

/// Seed for the page's RNGs
pub fn time_seed() -> u64 {
    js_sys::Date::now() as u64
}
