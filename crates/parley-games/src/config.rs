//! Configuration for a session controller.

use std::time::Duration;

/// Configuration for a [`SessionController`](crate::SessionController).
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// RNG seed for reproducible word draws. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Interval between countdown ticks.
    pub tick_period: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_period: Duration::from_secs(1),
        }
    }
}

impl ControllerConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the tick period (clamped to at least one millisecond).
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period.max(Duration::from_millis(1));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = ControllerConfig::default();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.tick_period, Duration::from_secs(1));
    }

    #[test]
    fn builder_methods() {
        let cfg = ControllerConfig::default()
            .with_seed(7)
            .with_tick_period(Duration::from_millis(250));
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.tick_period, Duration::from_millis(250));
    }

    #[test]
    fn tick_period_clamped() {
        let cfg = ControllerConfig::default().with_tick_period(Duration::ZERO);
        assert_eq!(cfg.tick_period, Duration::from_millis(1));
    }
}
