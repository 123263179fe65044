//! Fallback feedback lines used when a dataset row leaves them blank.

/// Lines shown after a correct answer when the row has no `feedback_correct`.
pub const MOTIVATIONAL: [&str; 8] = [
    "Nailed it! 🚀",
    "Great! 👏",
    "Spot on! 🎯",
    "Top notch! ✨",
    "You're flying! 🛫",
    "Excellent! 🧠",
    "You shone there! 🌟",
    "Well done! ✅",
];

/// Lines shown after a wrong answer when the row has no `feedback_wrong`.
pub const FUNNY_WRONG: [&str; 5] = [
    "Go study a bit more and come back tomorrow… 😅",
    "Almost! Try the next one. 😉",
    "Breathe and go again. 😌",
    "Write it down and review later. 📝",
    "Don't give up! 💪",
];

/// Chooses an index into a non-empty list of `len` entries.
///
/// Injected into normalization so fallback selection is reproducible.
pub trait FeedbackPicker {
    fn pick(&mut self, len: usize) -> usize;
}

impl<F> FeedbackPicker for F
where
    F: FnMut(usize) -> usize,
{
    fn pick(&mut self, len: usize) -> usize {
        self(len)
    }
}

/// Picker that walks the pool in order, wrapping around.
#[derive(Debug, Clone, Default)]
pub struct CyclingPicker {
    next: usize,
}

impl CyclingPicker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeedbackPicker for CyclingPicker {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let picked = self.next % len;
        self.next = self.next.wrapping_add(1);
        picked
    }
}

/// The two pools fallback text is drawn from.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackPools {
    pub correct: &'static [&'static str],
    pub wrong: &'static [&'static str],
}

impl Default for FeedbackPools {
    fn default() -> Self {
        Self {
            correct: &MOTIVATIONAL,
            wrong: &FUNNY_WRONG,
        }
    }
}

impl FeedbackPools {
    #[must_use]
    pub fn pick_correct(&self, picker: &mut dyn FeedbackPicker) -> &'static str {
        pick_from(self.correct, picker)
    }

    #[must_use]
    pub fn pick_wrong(&self, picker: &mut dyn FeedbackPicker) -> &'static str {
        pick_from(self.wrong, picker)
    }
}

fn pick_from(pool: &'static [&'static str], picker: &mut dyn FeedbackPicker) -> &'static str {
    if pool.is_empty() {
        return "";
    }
    // Out-of-range picks are clamped rather than trusted.
    let index = picker.pick(pool.len()).min(pool.len() - 1);
    pool[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_picker_wraps() {
        let mut picker = CyclingPicker::new();
        let picks: Vec<usize> = (0..5).map(|_| picker.pick(3)).collect();
        assert_eq!(picks, vec![0, 1, 2, 0, 1]);
    }

    #[test]
    fn closures_are_pickers() {
        let pools = FeedbackPools::default();
        let mut last = |len: usize| len - 1;
        assert_eq!(pools.pick_correct(&mut last), MOTIVATIONAL[7]);
        assert_eq!(pools.pick_wrong(&mut last), FUNNY_WRONG[4]);
    }

    #[test]
    fn out_of_range_pick_is_clamped() {
        let pools = FeedbackPools::default();
        let mut wild = |_len: usize| 99;
        assert_eq!(pools.pick_wrong(&mut wild), FUNNY_WRONG[4]);
    }
}
