//! Platform abstraction layer
//!
//! Capabilities the components need from their host:
//! - Visibility reports (IntersectionObserver on web)
//! - Storage (`persistence::KeyValueStore`, LocalStorage on web)
//! - Outbound form transport (`fx::Transport`, `fetch` on web)
//!
//! The `web` module binds them to the browser and holds the DOM helpers used by the
//! entry point.

use crate::fx::Observation;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Source of "how much of this element is on screen" reports
pub trait VisibilitySource {
    type Target;

    /// Report the visible ratio of `target` to `on_change` each time it crosses
    /// `threshold`, until `on_change` returns [`Observation::Stop`].
    fn observe(
        &mut self,
        target: &Self::Target,
        threshold: f64,
        on_change: Box<dyn FnMut(f64) -> Observation>,
    );
}
