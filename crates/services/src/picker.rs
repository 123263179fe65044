use quiz_core::feedback::FeedbackPicker;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Feedback picker backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngPicker<R> {
    rng: R,
}

impl<R: Rng> RngPicker<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngPicker<StdRng> {
    /// Reproducible picker; the same seed yields the same picks.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Picker seeded from the thread-local generator.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> FeedbackPicker for RngPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}
