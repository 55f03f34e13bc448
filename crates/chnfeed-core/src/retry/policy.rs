use rand::Rng;
use std::time::Duration;

/// Uniformly jittered backoff in whole seconds, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_secs(30),
            max_delay: Duration::from_secs(120),
        }
    }
}

impl BackoffPolicy {
    /// Sample one delay from `[min_delay, max_delay]`.
    pub fn sample(&self) -> Duration {
        self.sample_with(&mut rand::thread_rng())
    }

    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let lo = self.min_delay.as_secs();
        let hi = self.max_delay.as_secs().max(lo);
        Duration::from_secs(rng.gen_range(lo..=hi))
    }
}
