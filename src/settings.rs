//! Page configuration
//!
//! Every tunable has a default. A page can override any subset with a JSON block:
//!
//! ```html
//! <script type="application/json" id="page-config">
//!   { "form_endpoint": "https://formsubmit.co/ajax/me@example.com", "star_count": 300 }
//! </script>
//! ```

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    // === Background ===
    /// Number of starfield sprites
    pub star_count: usize,
    /// Matrix rain cell size (pixels)
    pub glyph_size: f32,
    /// Chance a column past the bottom restarts each frame
    pub matrix_reset_probability: f64,

    // === Hero text ===
    pub hero_text: String,
    pub type_min_delay_ms: u32,
    pub type_max_delay_ms: u32,
    pub type_dwell_ms: u32,

    // === Reveals ===
    pub reveal_threshold: f64,
    pub progress_threshold: f64,

    // === Contact ===
    /// Relay URL. Empty means "use the form's action attribute".
    pub form_endpoint: String,

    // === Easter egg ===
    pub celebration_particles: usize,
    pub celebration_cleanup_ms: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            star_count: STAR_COUNT,
            glyph_size: GLYPH_SIZE,
            matrix_reset_probability: MATRIX_RESET_PROBABILITY,

            hero_text: "Hi, I build fast, reliable software.".to_string(),
            type_min_delay_ms: TYPE_MIN_DELAY_MS,
            type_max_delay_ms: TYPE_MAX_DELAY_MS,
            type_dwell_ms: TYPE_DWELL_MS,

            reveal_threshold: REVEAL_THRESHOLD,
            progress_threshold: PROGRESS_THRESHOLD,

            form_endpoint: String::new(),

            celebration_particles: CELEBRATION_PARTICLES,
            celebration_cleanup_ms: CELEBRATION_CLEANUP_MS,
        }
    }
}

impl PageConfig {
    /// Element id of the optional JSON override block
    pub const ELEMENT_ID: &'static str = "page-config";

    /// Parse overrides, falling back to defaults for anything missing
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    /// Clamp values into ranges the components can work with
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !(self.glyph_size.is_finite() && self.glyph_size >= 4.0) {
            self.glyph_size = defaults.glyph_size;
        }
        if !self.matrix_reset_probability.is_finite() {
            self.matrix_reset_probability = defaults.matrix_reset_probability;
        }
        self.matrix_reset_probability = self.matrix_reset_probability.clamp(0.0, 1.0);
        if self.type_min_delay_ms > self.type_max_delay_ms {
            std::mem::swap(&mut self.type_min_delay_ms, &mut self.type_max_delay_ms);
        }
        self.reveal_threshold = clamp_ratio(self.reveal_threshold, defaults.reveal_threshold);
        self.progress_threshold = clamp_ratio(self.progress_threshold, defaults.progress_threshold);
        self.star_count = self.star_count.min(5000);
        self.celebration_particles = self.celebration_particles.min(500);
        self
    }

    /// Load overrides from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded page config overrides");
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring invalid page config: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default page config");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

fn clamp_ratio(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value.clamp(0.0, 1.0) } else { fallback }
}
