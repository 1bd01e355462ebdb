use rand::Rng;
use std::time::Duration;

/// Exponential delay schedule for retrying failed requests.
///
/// Formula: min(max_delay, base * 2^attempt) + random_jitter
///
/// The schedule is stateless: callers pass the zero-based attempt number, so a
/// single value can be shared by every request that uses it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialBackoff {
    base: Duration,
    max_delay: Duration,
    jitter_factor: f64,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            jitter_factor: 0.1,
        }
    }
}

impl ExponentialBackoff {
    /// Create a new schedule.
    ///
    /// # Arguments
    /// * `base` - Delay after the first failed attempt
    /// * `max_delay` - Maximum delay cap
    /// * `jitter_factor` - Jitter as a fraction of delay (0.0 to 1.0). Negative values are clamped to 0.
    pub fn new(base: Duration, max_delay: Duration, jitter_factor: f64) -> Self {
        Self {
            base,
            max_delay,
            jitter_factor: jitter_factor.max(0.0),
        }
    }

    /// Delay to wait after the given zero-based failed attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp_delay = self.base.saturating_mul(2u32.saturating_pow(attempt));
        let capped_delay = exp_delay.min(self.max_delay);

        let jitter_range = capped_delay.as_secs_f64() * self.jitter_factor;
        let jitter = if jitter_range > 0.0 {
            rand::thread_rng().gen_range(-jitter_range..=jitter_range)
        } else {
            0.0
        };

        Duration::from_secs_f64((capped_delay.as_secs_f64() + jitter).max(0.0))
    }
}
