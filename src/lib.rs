//! Portfolio FX - behavior layer for a static portfolio page
//!
//! Core modules:
//! - `fx`: Deterministic component state (animators, reveals, modal, theme, filter, form, easter egg)
//! - `platform`: Capability traits and the browser bindings behind them
//! - `persistence`: Key-value storage for the theme flag
//! - `settings`: Page configuration with defaults

pub mod fx;
pub mod persistence;
pub mod platform;
pub mod settings;

pub use settings::PageConfig;

/// Page tuning constants
pub mod consts {
    /// Frame length the per-frame velocities are expressed in (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest step a single frame may advance (tab switches, long GC pauses)
    pub const MAX_FRAME_STEP: f32 = 4.0;

    /// Starfield defaults
    pub const STAR_COUNT: usize = 500;
    pub const STAR_MIN_SIZE: f32 = 0.5;
    pub const STAR_MAX_SIZE: f32 = 2.5;
    /// Per-axis drift speed limit (pixels per frame)
    pub const STAR_MAX_SPEED: f32 = 0.25;
    pub const STAR_TWINKLE_MIN_S: f32 = 2.0;
    pub const STAR_TWINKLE_MAX_S: f32 = 5.0;
    pub const STAR_TWINKLE_MAX_DELAY_S: f32 = 5.0;

    /// Matrix rain defaults
    pub const GLYPH_SIZE: f32 = 16.0;
    pub const MATRIX_RESET_PROBABILITY: f64 = 0.025;
    /// Alpha of the black overlay painted each frame (trail length)
    pub const MATRIX_FADE_ALPHA: f32 = 0.05;
    pub const MATRIX_CHARSET: &str =
        "アァカサタナハマヤャラワガザダバパイィキシチニヒミリヰギジヂビピウゥクスツヌフムユュルグズブプエェケセテネヘメレヱゲゼデベペオォコソトノホモヨョロヲゴゾドボポヴッン0123456789ABCDEF";

    /// Typewriter pacing (milliseconds)
    pub const TYPE_MIN_DELAY_MS: u32 = 50;
    pub const TYPE_MAX_DELAY_MS: u32 = 150;
    pub const TYPE_DWELL_MS: u32 = 2000;

    /// Visible fraction before a reveal fires
    pub const REVEAL_THRESHOLD: f64 = 0.15;
    pub const PROGRESS_THRESHOLD: f64 = 0.5;

    /// Easter egg celebration
    pub const CELEBRATION_PARTICLES: usize = 50;
    pub const CELEBRATION_CLEANUP_MS: u32 = 6000;
    pub const CELEBRATION_MIN_FALL_S: f32 = 2.0;
    pub const CELEBRATION_MAX_FALL_S: f32 = 5.0;

    /// Persisted theme key
    pub const THEME_STORAGE_KEY: &str = "theme";
}

/// Wrap a coordinate into `[0, max)`.
///
/// `rem_euclid` can round up to exactly `max` for tiny negative inputs, so that
/// case folds back to zero. A non-positive `max` collapses everything to zero.
#[inline]
pub fn wrap_coord(value: f32, max: f32) -> f32 {
    if max <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(max);
    if wrapped >= max { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_coord_edges() {
        assert_eq!(wrap_coord(105.0, 100.0), 5.0);
        assert_eq!(wrap_coord(-5.0, 100.0), 95.0);
        assert_eq!(wrap_coord(100.0, 100.0), 0.0);
        assert!(wrap_coord(-1e-9, 100.0) < 100.0);
        assert_eq!(wrap_coord(42.0, 0.0), 0.0);
        assert_eq!(wrap_coord(f32::NAN, 10.0), 0.0);
    }
}
