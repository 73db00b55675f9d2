//! Motif and duration selection.

use std::time::Duration;

use ado_core::TransitionOptions;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shortest randomized animation when the delay is enabled.
pub const DELAYED_MIN_ANIMATION: Duration = Duration::from_millis(800);

/// Picks what each loading session looks like and how long it runs.
pub trait TransitionPolicy: Send {
    /// Index into a motif list of length `count` (`count > 0`).
    fn pick_motif(&mut self, count: usize) -> usize;

    /// Total progress-bar duration for one session.
    fn duration(&mut self, options: &TransitionOptions) -> Duration;
}

/// Random motif; random duration when the delay is enabled.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionPolicy for RandomPolicy {
    fn pick_motif(&mut self, count: usize) -> usize {
        self.rng.gen_range(0..count.max(1))
    }

    fn duration(&mut self, options: &TransitionOptions) -> Duration {
        if !options.enable_delay {
            return options.min_animation();
        }

        let high = options.max_animation();
        let low = DELAYED_MIN_ANIMATION.min(high);
        let millis = self
            .rng
            .gen_range(low.as_millis() as u64..=high.as_millis() as u64);
        Duration::from_millis(millis)
    }
}

/// Deterministic policy.
///
/// Without an explicit duration it uses the configured minimum, or the
/// configured maximum when the delay is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPolicy {
    pub motif: usize,
    pub duration: Option<Duration>,
}

impl FixedPolicy {
    pub fn new(motif: usize) -> Self {
        Self {
            motif,
            duration: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

impl TransitionPolicy for FixedPolicy {
    fn pick_motif(&mut self, count: usize) -> usize {
        self.motif % count.max(1)
    }

    fn duration(&mut self, options: &TransitionOptions) -> Duration {
        match self.duration {
            Some(duration) => duration,
            None if options.enable_delay => options.max_animation(),
            None => options.min_animation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delayed() -> TransitionOptions {
        TransitionOptions {
            enable_delay: true,
            ..TransitionOptions::default()
        }
    }

    #[test]
    fn test_random_without_delay_uses_minimum() {
        let mut policy = RandomPolicy::seeded(7);
        let options = TransitionOptions::default();

        for _ in 0..20 {
            assert_eq!(policy.duration(&options), Duration::from_millis(300));
        }
    }

    #[test]
    fn test_random_with_delay_stays_in_range() {
        let mut policy = RandomPolicy::seeded(7);
        let options = delayed();

        for _ in 0..200 {
            let d = policy.duration(&options);
            assert!(d >= Duration::from_millis(800), "{d:?}");
            assert!(d <= Duration::from_millis(1500), "{d:?}");
        }
    }

    #[test]
    fn test_random_with_small_maximum() {
        let mut policy = RandomPolicy::seeded(1);
        let options = TransitionOptions {
            enable_delay: true,
            max_animation_time: 500,
            ..TransitionOptions::default()
        };

        assert_eq!(policy.duration(&options), Duration::from_millis(500));
    }

    #[test]
    fn test_random_motif_in_bounds() {
        let mut policy = RandomPolicy::seeded(3);
        for _ in 0..100 {
            assert!(policy.pick_motif(8) < 8);
        }
    }

    #[test]
    fn test_fixed_policy() {
        let mut policy = FixedPolicy::new(10);
        assert_eq!(policy.pick_motif(8), 2);
        assert_eq!(
            policy.duration(&TransitionOptions::default()),
            Duration::from_millis(300)
        );
        assert_eq!(policy.duration(&delayed()), Duration::from_millis(1500));

        let mut policy = policy.with_duration(Duration::from_millis(90));
        assert_eq!(policy.duration(&delayed()), Duration::from_millis(90));
    }
}
