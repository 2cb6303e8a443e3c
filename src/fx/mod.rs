//! Deterministic page-effect state
//!
//! Every component's behavior lives here, free of the DOM. This module must stay pure:
//! - Time only arrives through explicit `dt`/delay values
//! - Seeded RNG only
//! - No browser or platform dependencies
//!
//! The browser shell in `platform::web` feeds events in and applies the effects these
//! types report.

pub mod clock;
pub mod contact;
pub mod filter;
pub mod matrix;
pub mod modal;
pub mod nav;
pub mod reveal;
pub mod secret;
pub mod starfield;
pub mod theme;
pub mod typewriter;

pub use clock::FrameClock;
pub use contact::{ContactForm, FormControl, FormSubmitter, SubmitError, SubmitStatus, Transport};
pub use filter::{CategoryFilter, WILDCARD_CATEGORY};
pub use matrix::{GlyphDraw, MatrixFrame, MatrixRain};
pub use modal::{ModalChange, ModalController, ScrollLock};
pub use nav::NavMenu;
pub use reveal::{Observation, RevealEffect, RevealKind, RevealTarget, parse_percent, watch};
pub use secret::{Celebration, Particle, SECRET_SEQUENCE, SecretSequence};
pub use starfield::{Sprite, Starfield};
pub use theme::{Theme, ThemeManager};
pub use typewriter::Typewriter;
