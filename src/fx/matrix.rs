//! Matrix rain
//!
//! A grid of falling glyph columns. Each column keeps a drop row that advances one
//! cell per frame. Once past the bottom a column only restarts with a small
//! probability, so columns fall out of step with each other.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// One glyph to paint this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphDraw {
    pub glyph: char,
    pub x: f32,
    pub y: f32,
}

/// Paint instructions for a single frame
#[derive(Debug, Clone, Default)]
pub struct MatrixFrame {
    /// Alpha of the full-surface overlay painted before the glyphs
    pub fade_alpha: f32,
    pub glyphs: Vec<GlyphDraw>,
}

/// Column state for the rain effect
#[derive(Debug, Clone)]
pub struct MatrixRain {
    drops: Vec<u32>,
    charset: Vec<char>,
    glyph_size: f32,
    reset_probability: f64,
    width: f32,
    height: f32,
    rng: Pcg32,
}

impl MatrixRain {
    pub fn new(width: f32, height: f32, glyph_size: f32, seed: u64) -> Self {
        let glyph_size = if glyph_size > 0.0 { glyph_size } else { GLYPH_SIZE };
        let mut rain = Self {
            drops: Vec::new(),
            charset: MATRIX_CHARSET.chars().collect(),
            glyph_size,
            reset_probability: MATRIX_RESET_PROBABILITY,
            width: 0.0,
            height: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        };
        rain.resize(width, height);
        rain
    }

    /// Override the bottom-reset probability (clamped to `[0, 1]`)
    pub fn with_reset_probability(mut self, probability: f64) -> Self {
        self.reset_probability = probability.clamp(0.0, 1.0);
        self
    }

    fn column_count(width: f32, glyph_size: f32) -> usize {
        (width.max(0.0) / glyph_size).floor() as usize
    }

    /// Adopt a new surface size. Existing columns keep their drop rows; new
    /// columns start at row 1 and columns beyond the new width are dropped.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        let columns = Self::column_count(self.width, self.glyph_size);
        self.drops.resize(columns, 1);
    }

    /// Advance one frame, writing paint instructions into `frame`
    pub fn tick(&mut self, frame: &mut MatrixFrame) {
        frame.fade_alpha = MATRIX_FADE_ALPHA;
        frame.glyphs.clear();
        if self.charset.is_empty() {
            return;
        }

        for (column, row) in self.drops.iter_mut().enumerate() {
            let glyph = self.charset[self.rng.random_range(0..self.charset.len())];
            frame.glyphs.push(GlyphDraw {
                glyph,
                x: column as f32 * self.glyph_size,
                y: *row as f32 * self.glyph_size,
            });

            *row += 1;
            if *row as f32 * self.glyph_size > self.height
                && self.rng.random_bool(self.reset_probability)
            {
                *row = 0;
            }
        }
    }

    pub fn drops(&self) -> &[u32] {
        &self.drops
    }

    pub fn glyph_size(&self) -> f32 {
        self.glyph_size
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}
