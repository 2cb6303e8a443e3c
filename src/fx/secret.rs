//! Konami-code Easter egg
//!
//! Keys are matched against a fixed sequence with a single cursor. Any wrong key
//! drops the cursor back to the start; there is no partial-match backtracking.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

pub const SECRET_SEQUENCE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

const PARTICLE_COLORS: [&str; 6] = ["#ff6b6b", "#feca57", "#48dbfb", "#1dd1a1", "#ff9ff3", "#54a0ff"];

#[derive(Debug, Clone, Default)]
pub struct SecretSequence {
    cursor: usize,
}

impl SecretSequence {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    /// Feed one key. Returns true when this key completes the sequence.
    pub fn press(&mut self, key: &str) -> bool {
        if SECRET_SEQUENCE[self.cursor] != key {
            self.cursor = 0;
            return false;
        }

        self.cursor += 1;
        if self.cursor == SECRET_SEQUENCE.len() {
            self.cursor = 0;
            log::info!("Secret sequence entered");
            return true;
        }
        false
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// One falling celebration particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Horizontal start, percent of viewport width
    pub left_pct: f32,
    /// Fall animation length (seconds)
    pub fall_duration_s: f32,
    pub size_px: f32,
    pub color: &'static str,
}

/// A burst of particles plus how long to keep them around
#[derive(Debug, Clone)]
pub struct Celebration {
    pub particles: Vec<Particle>,
    /// Remove every particle after this long, whatever state their animation is in
    pub cleanup_ms: u32,
}

impl Celebration {
    pub fn spawn(count: usize, cleanup_ms: u32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = (0..count)
            .map(|_| Particle {
                left_pct: rng.random_range(0.0..100.0),
                fall_duration_s: rng.random_range(CELEBRATION_MIN_FALL_S..=CELEBRATION_MAX_FALL_S),
                size_px: rng.random_range(6.0..=12.0),
                color: PARTICLE_COLORS[rng.random_range(0..PARTICLE_COLORS.len())],
            })
            .collect();
        Self { particles, cleanup_ms }
    }

    /// Inline style for one particle element
    pub fn particle_style(particle: &Particle) -> String {
        format!(
            "left:{:.2}%;width:{:.0}px;height:{:.0}px;background:{};animation-duration:{:.2}s",
            particle.left_pct,
            particle.size_px,
            particle.size_px,
            particle.color,
            particle.fall_duration_s
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(seq: &mut SecretSequence, keys: &[&str]) -> usize {
        keys.iter().filter(|k| seq.press(k)).count()
    }

    #[test]
    fn test_exact_sequence_fires_once() {
        let mut seq = SecretSequence::new();
        assert_eq!(feed(&mut seq, &SECRET_SEQUENCE), 1);
        assert_eq!(seq.cursor(), 0);
    }

    #[test]
    fn test_any_single_altered_token_never_fires() {
        for i in 0..SECRET_SEQUENCE.len() {
            let mut keys = SECRET_SEQUENCE.to_vec();
            keys[i] = "x";
            let mut seq = SecretSequence::new();
            assert_eq!(feed(&mut seq, &keys), 0, "altered token {} still fired", i);
        }
    }

    #[test]
    fn test_sequence_twice_fires_twice() {
        let mut keys = SECRET_SEQUENCE.to_vec();
        keys.extend(SECRET_SEQUENCE);
        let mut seq = SecretSequence::new();
        assert_eq!(feed(&mut seq, &keys), 2);
    }

    #[test]
    fn test_mismatch_resets_without_backtracking() {
        let mut seq = SecretSequence::new();
        // A third ArrowUp is a mismatch, not the start of a new attempt
        feed(&mut seq, &["ArrowUp", "ArrowUp", "ArrowUp"]);
        assert_eq!(seq.cursor(), 0);
        assert_eq!(feed(&mut seq, &SECRET_SEQUENCE[1..]), 0);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut keys = SECRET_SEQUENCE.to_vec();
        keys[9] = "A";
        let mut seq = SecretSequence::new();
        assert_eq!(feed(&mut seq, &keys), 0);
    }

    #[test]
    fn test_celebration_particles_within_ranges() {
        let burst = Celebration::spawn(CELEBRATION_PARTICLES, CELEBRATION_CLEANUP_MS, 11);
        assert_eq!(burst.particles.len(), CELEBRATION_PARTICLES);
        assert_eq!(burst.cleanup_ms, 6000);
        for p in &burst.particles {
            assert!((0.0..100.0).contains(&p.left_pct));
            assert!((CELEBRATION_MIN_FALL_S..=CELEBRATION_MAX_FALL_S).contains(&p.fall_duration_s));
            assert!(PARTICLE_COLORS.contains(&p.color));
        }
        let style = Celebration::particle_style(&burst.particles[0]);
        assert!(style.starts_with("left:"));
        assert!(style.contains("animation-duration:"));
    }
}
