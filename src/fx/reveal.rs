//! One-shot visibility reveals
//!
//! Marked elements flip to a revealed state the first time enough of them is on
//! screen. Progress bars are the same thing with a payload: the bar's target width.
//! Either way the transition happens once and the element is then unobserved.

use crate::platform::VisibilitySource;

/// What revealing an element does
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealKind {
    /// Add the revealed class
    Fade,
    /// Grow the inner bar to `percent` width
    Progress { percent: f32 },
}

/// Effect the host applies to the element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealEffect {
    Reveal,
    SetWidth(f32),
}

/// Whether the visibility source should keep reporting for an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Continue,
    Stop,
}

/// Reveal state for one element
#[derive(Debug, Clone)]
pub struct RevealTarget {
    kind: RevealKind,
    threshold: f64,
    revealed: bool,
}

impl RevealTarget {
    pub fn fade(threshold: f64) -> Self {
        Self {
            kind: RevealKind::Fade,
            threshold: threshold.clamp(0.0, 1.0),
            revealed: false,
        }
    }

    pub fn progress(percent: f32, threshold: f64) -> Self {
        Self {
            kind: RevealKind::Progress {
                percent: percent.clamp(0.0, 100.0),
            },
            threshold: threshold.clamp(0.0, 1.0),
            revealed: false,
        }
    }

    /// Feed one visibility report. Returns the effect the first time `ratio`
    /// reaches the threshold and `None` on every other call. A ratio of 0 never
    /// qualifies, even with a zero threshold.
    pub fn on_intersection(&mut self, ratio: f64) -> Option<RevealEffect> {
        if self.revealed || ratio <= 0.0 || ratio < self.threshold {
            return None;
        }
        self.revealed = true;
        Some(match self.kind {
            RevealKind::Fade => RevealEffect::Reveal,
            RevealKind::Progress { percent } => RevealEffect::SetWidth(percent),
        })
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Parse a progress attribute such as `"85"`, `"85%"` or `" 72.5 "`, clamped to 0-100
pub fn parse_percent(raw: &str) -> Option<f32> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    let value: f32 = number.parse().ok()?;
    value.is_finite().then(|| value.clamp(0.0, 100.0))
}

/// Observe `element` and apply `target`'s effect exactly once, then stop observing
pub fn watch<V: VisibilitySource>(
    source: &mut V,
    element: &V::Target,
    mut target: RevealTarget,
    mut apply: impl FnMut(RevealEffect) + 'static,
) {
    let threshold = target.threshold();
    source.observe(
        element,
        threshold,
        Box::new(move |ratio| match target.on_intersection(ratio) {
            Some(effect) => {
                apply(effect);
                Observation::Stop
            }
            None if target.is_revealed() => Observation::Stop,
            None => Observation::Continue,
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{PROGRESS_THRESHOLD, REVEAL_THRESHOLD};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Callback = Box<dyn FnMut(f64) -> Observation>;

    /// Visibility source that lets the test decide when elements scroll into view
    #[derive(Default)]
    struct FakeVisibility {
        watchers: Vec<(usize, f64, Callback, bool)>,
    }

    impl FakeVisibility {
        fn emit(&mut self, element: usize, ratio: f64) {
            for (id, _, callback, stopped) in &mut self.watchers {
                if *id == element && !*stopped {
                    *stopped = callback(ratio) == Observation::Stop;
                }
            }
        }

        fn observing(&self, element: usize) -> bool {
            self.watchers.iter().any(|(id, _, _, stopped)| *id == element && !stopped)
        }
    }

    impl VisibilitySource for FakeVisibility {
        type Target = usize;

        fn observe(&mut self, target: &usize, threshold: f64, on_change: Callback) {
            self.watchers.push((*target, threshold, on_change, false));
        }
    }

    #[test]
    fn test_fade_reveals_once_at_threshold() {
        let mut target = RevealTarget::fade(REVEAL_THRESHOLD);
        assert_eq!(target.on_intersection(0.0), None);
        assert_eq!(target.on_intersection(0.05), None);
        assert_eq!(target.on_intersection(0.15), Some(RevealEffect::Reveal));
        assert_eq!(target.on_intersection(1.0), None);
        assert!(target.is_revealed());
    }

    #[test]
    fn test_ratio_just_under_threshold_does_not_fire() {
        let mut target = RevealTarget::fade(REVEAL_THRESHOLD);
        assert_eq!(target.on_intersection(0.1495), None);
        assert!(!target.is_revealed());
        assert_eq!(target.on_intersection(REVEAL_THRESHOLD), Some(RevealEffect::Reveal));
    }

    #[test]
    fn test_progress_sets_declared_width() {
        let mut target = RevealTarget::progress(85.0, PROGRESS_THRESHOLD);
        assert_eq!(target.on_intersection(0.3), None);
        assert_eq!(target.on_intersection(0.6), Some(RevealEffect::SetWidth(85.0)));
        assert_eq!(target.on_intersection(0.9), None);
    }

    #[test]
    fn test_watch_applies_effect_at_most_once() {
        let mut source = FakeVisibility::default();
        let applied = Rc::new(RefCell::new(Vec::new()));

        for element in 0..3 {
            let applied = applied.clone();
            watch(&mut source, &element, RevealTarget::fade(REVEAL_THRESHOLD), move |e| {
                applied.borrow_mut().push((element, e));
            });
        }

        source.emit(1, 0.2);
        source.emit(1, 0.9);
        source.emit(1, 0.4);
        source.emit(0, 0.1);
        source.emit(2, 1.0);
        source.emit(2, 1.0);

        assert_eq!(
            *applied.borrow(),
            vec![(1, RevealEffect::Reveal), (2, RevealEffect::Reveal)]
        );
        assert!(source.observing(0));
        assert!(!source.observing(1));
        assert!(!source.observing(2));
    }

    #[test]
    fn test_progress_width_never_changes_after_reveal() {
        let mut source = FakeVisibility::default();
        let width = Rc::new(RefCell::new(None));
        let sink = width.clone();
        watch(&mut source, &0, RevealTarget::progress(72.5, PROGRESS_THRESHOLD), move |e| {
            if let RevealEffect::SetWidth(w) = e {
                *sink.borrow_mut() = Some(w);
            }
        });

        assert_eq!(*width.borrow(), None);
        source.emit(0, 0.75);
        assert_eq!(*width.borrow(), Some(72.5));
        for _ in 0..5 {
            source.emit(0, 1.0);
        }
        assert_eq!(*width.borrow(), Some(72.5));
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("85"), Some(85.0));
        assert_eq!(parse_percent(" 72.5% "), Some(72.5));
        assert_eq!(parse_percent("140"), Some(100.0));
        assert_eq!(parse_percent("-3"), Some(0.0));
        assert_eq!(parse_percent("lots"), None);
        assert_eq!(parse_percent(""), None);
        assert_eq!(parse_percent("NaN"), None);
    }
}
