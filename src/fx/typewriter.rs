//! Typewriter text reveal
//!
//! One message typed a character at a time with jittered pacing, held on screen,
//! then wiped and typed again forever. The host drives it with a single timer:
//! call [`Typewriter::step`], show [`Typewriter::visible`], wait the returned delay,
//! repeat.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
    min_delay_ms: u32,
    max_delay_ms: u32,
    dwell_ms: u32,
    /// Bumped by `restart` so timers from an older run can tell they are stale
    generation: u64,
    cycles: u64,
    rng: Pcg32,
}

impl Typewriter {
    pub fn new(text: &str, seed: u64) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
            min_delay_ms: TYPE_MIN_DELAY_MS,
            max_delay_ms: TYPE_MAX_DELAY_MS,
            dwell_ms: TYPE_DWELL_MS,
            generation: 0,
            cycles: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Override pacing; a reversed range is swapped
    pub fn with_timing(mut self, min_delay_ms: u32, max_delay_ms: u32, dwell_ms: u32) -> Self {
        self.min_delay_ms = min_delay_ms.min(max_delay_ms);
        self.max_delay_ms = min_delay_ms.max(max_delay_ms);
        self.dwell_ms = dwell_ms;
        self
    }

    fn char_delay(&mut self) -> u32 {
        self.rng.random_range(self.min_delay_ms..=self.max_delay_ms)
    }

    /// Advance the reveal by one beat and return how long to wait before the next.
    ///
    /// Typing the final character returns the dwell time. The beat after the dwell
    /// wipes the text back to empty and starts a new cycle.
    pub fn step(&mut self) -> u32 {
        if self.shown >= self.chars.len() {
            self.shown = 0;
            self.cycles += 1;
            return self.char_delay();
        }

        self.shown += 1;
        if self.shown == self.chars.len() {
            self.dwell_ms
        } else {
            self.char_delay()
        }
    }

    /// Currently revealed prefix
    pub fn visible(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    /// Start over from an empty line. Returns the new generation; any timer still
    /// holding an older generation must stop rescheduling itself.
    pub fn restart(&mut self) -> u64 {
        self.shown = 0;
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn is_complete(&self) -> bool {
        self.shown == self.chars.len()
    }

    /// Number of completed type-dwell-wipe cycles
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run one full cycle from empty, returning every visible string and delay
    fn run_cycle(tw: &mut Typewriter) -> Vec<(String, u32)> {
        let mut frames = Vec::new();
        loop {
            let delay = tw.step();
            frames.push((tw.visible(), delay));
            if tw.visible().is_empty() {
                return frames;
            }
        }
    }

    #[test]
    fn test_reveals_one_char_per_step() {
        let mut tw = Typewriter::new("héllo", 1);
        let mut seen = Vec::new();
        for _ in 0..5 {
            tw.step();
            seen.push(tw.visible());
        }
        assert_eq!(seen, vec!["h", "hé", "hél", "héll", "héllo"]);
        assert!(tw.is_complete());
    }

    #[test]
    fn test_delays_are_jittered_within_range_and_dwell_at_end() {
        let mut tw = Typewriter::new("abcdefghijklmnop", 2);
        let frames = run_cycle(&mut tw);
        let (typing, rest) = frames.split_at(15);
        for (_, delay) in typing {
            assert!((TYPE_MIN_DELAY_MS..=TYPE_MAX_DELAY_MS).contains(delay));
        }
        assert_eq!(rest[0], ("abcdefghijklmnop".to_string(), TYPE_DWELL_MS));
        assert_eq!(rest[1].0, "");
    }

    #[test]
    fn test_cycle_repeats_identically_after_dwell() {
        let mut tw = Typewriter::new("Hi there", 3);
        let first: Vec<String> = run_cycle(&mut tw).into_iter().map(|(s, _)| s).collect();
        let second: Vec<String> = run_cycle(&mut tw).into_iter().map(|(s, _)| s).collect();
        let third: Vec<String> = run_cycle(&mut tw).into_iter().map(|(s, _)| s).collect();
        assert_eq!(first, second);
        assert_eq!(second, third);
        assert_eq!(first.last().map(String::as_str), Some(""));
        assert_eq!(tw.cycles(), 3);
    }

    #[test]
    fn test_restart_invalidates_older_generation() {
        let mut tw = Typewriter::new("abc", 4);
        let gen_a = tw.restart();
        tw.step();
        tw.step();
        let gen_b = tw.restart();
        assert!(!tw.is_current(gen_a));
        assert!(tw.is_current(gen_b));
        assert_eq!(tw.visible(), "");
    }

    #[test]
    fn test_empty_text_keeps_looping() {
        let mut tw = Typewriter::new("", 5).with_timing(10, 10, 500);
        assert_eq!(tw.step(), 10);
        assert_eq!(tw.visible(), "");
        assert_eq!(tw.step(), 10);
    }

    #[test]
    fn test_custom_timing_swaps_reversed_range() {
        let mut tw = Typewriter::new("xy", 6).with_timing(90, 30, 700);
        let d = tw.step();
        assert!((30..=90).contains(&d));
        assert_eq!(tw.step(), 700);
    }
}
