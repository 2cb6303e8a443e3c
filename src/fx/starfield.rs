//! Drifting starfield
//!
//! A fixed batch of sprites drifts slowly across the viewport. Sprites wrap at the
//! edges instead of bouncing, so the field density never changes.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::wrap_coord;

/// One star
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Position in viewport pixels, always inside the viewport
    pub pos: Vec2,
    /// Drift per 60 Hz frame
    pub vel: Vec2,
    /// Diameter in pixels
    pub size: f32,
    /// Twinkle cycle length (seconds)
    pub twinkle_duration: f32,
    /// Twinkle phase offset (seconds)
    pub twinkle_delay: f32,
}

/// The full set of stars for one viewport
#[derive(Debug, Clone)]
pub struct Starfield {
    sprites: Vec<Sprite>,
    width: f32,
    height: f32,
    count: usize,
    rng: Pcg32,
}

impl Starfield {
    /// Populate `count` sprites at random positions across a `width` x `height` viewport
    pub fn new(width: f32, height: f32, count: usize, seed: u64) -> Self {
        let mut field = Self {
            sprites: Vec::with_capacity(count),
            width: width.max(0.0),
            height: height.max(0.0),
            count,
            rng: Pcg32::seed_from_u64(seed),
        };
        field.populate();
        field
    }

    fn populate(&mut self) {
        self.sprites.clear();
        for _ in 0..self.count {
            let sprite = self.spawn_sprite();
            self.sprites.push(sprite);
        }
    }

    fn spawn_sprite(&mut self) -> Sprite {
        let rng = &mut self.rng;
        let x = if self.width > 0.0 { rng.random_range(0.0..self.width) } else { 0.0 };
        let y = if self.height > 0.0 { rng.random_range(0.0..self.height) } else { 0.0 };
        Sprite {
            pos: Vec2::new(x, y),
            vel: Vec2::new(
                rng.random_range(-STAR_MAX_SPEED..=STAR_MAX_SPEED),
                rng.random_range(-STAR_MAX_SPEED..=STAR_MAX_SPEED),
            ),
            size: rng.random_range(STAR_MIN_SIZE..=STAR_MAX_SIZE),
            twinkle_duration: rng.random_range(STAR_TWINKLE_MIN_S..=STAR_TWINKLE_MAX_S),
            twinkle_delay: rng.random_range(0.0..=STAR_TWINKLE_MAX_DELAY_S),
        }
    }

    /// Advance every sprite by `dt` frames, wrapping at the viewport edges
    pub fn tick(&mut self, dt: f32) {
        let (w, h) = (self.width, self.height);
        for sprite in &mut self.sprites {
            let next = sprite.pos + sprite.vel * dt;
            sprite.pos = Vec2::new(wrap_coord(next.x, w), wrap_coord(next.y, h));
        }
    }

    /// Throw away every sprite and regenerate against the new viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.populate();
        log::debug!(
            "Starfield regenerated: {} sprites for {}x{}",
            self.sprites.len(),
            self.width,
            self.height
        );
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn in_bounds(field: &Starfield) -> bool {
        let (w, h) = field.size();
        field
            .sprites()
            .iter()
            .all(|s| s.pos.x >= 0.0 && s.pos.x < w && s.pos.y >= 0.0 && s.pos.y < h)
    }

    #[test]
    fn test_new_populates_fixed_count_in_bounds() {
        let field = Starfield::new(800.0, 600.0, STAR_COUNT, 7);
        assert_eq!(field.sprites().len(), STAR_COUNT);
        assert!(in_bounds(&field));
        for s in field.sprites() {
            assert!(s.vel.x.abs() <= STAR_MAX_SPEED && s.vel.y.abs() <= STAR_MAX_SPEED);
            assert!((STAR_MIN_SIZE..=STAR_MAX_SIZE).contains(&s.size));
        }
    }

    #[test]
    fn test_tick_wraps_to_opposite_edge() {
        let mut field = Starfield::new(100.0, 100.0, 1, 1);
        field.sprites[0].pos = Vec2::new(99.9, 0.05);
        field.sprites[0].vel = Vec2::new(0.2, -0.1);
        field.tick(1.0);
        let pos = field.sprites()[0].pos;
        assert!((pos.x - 0.1).abs() < 1e-3, "wrapped x = {}", pos.x);
        assert!((pos.y - 99.95).abs() < 1e-3, "wrapped y = {}", pos.y);
    }

    #[test]
    fn test_resize_regenerates_against_new_viewport() {
        let mut field = Starfield::new(1920.0, 1080.0, 200, 3);
        let before = field.sprites().to_vec();
        field.resize(320.0, 240.0);
        assert_eq!(field.sprites().len(), 200);
        assert_ne!(before, field.sprites());
        assert!(in_bounds(&field));
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = Starfield::new(640.0, 480.0, 50, 99);
        let b = Starfield::new(640.0, 480.0, 50, 99);
        assert_eq!(a.sprites(), b.sprites());
    }

    #[test]
    fn test_empty_viewport_does_not_panic() {
        let mut field = Starfield::new(0.0, 0.0, 10, 5);
        field.tick(1.0);
        assert!(field.sprites().iter().all(|s| s.pos == Vec2::ZERO));
    }

    proptest! {
        #[test]
        fn prop_sprites_never_escape_viewport(
            seed in any::<u64>(),
            width in 1.0f32..4000.0,
            height in 1.0f32..4000.0,
            steps in proptest::collection::vec(0.0f32..=MAX_FRAME_STEP, 1..200),
        ) {
            let mut field = Starfield::new(width, height, 25, seed);
            for dt in steps {
                field.tick(dt);
                prop_assert!(in_bounds(&field));
            }
        }
    }
}
