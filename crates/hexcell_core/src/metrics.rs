//! Performance metrics collection for the simulation.
//!
//! Provides structured logging and metrics tracking for monitoring
//! stepping throughput and rule turnover.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tracing_subscriber::EnvFilter;

/// Metrics collector for simulation statistics.
pub struct Metrics {
    generation_count: AtomicU64,
    rule_count: AtomicU64,
    mutation_count: AtomicU64,
    last_step_micros: AtomicU64,
    total_step_micros: AtomicU64,
    log_interval: u64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Metrics {
    /// Creates a collector that logs a progress line every `log_interval` generations.
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            generation_count: AtomicU64::new(0),
            rule_count: AtomicU64::new(0),
            mutation_count: AtomicU64::new(0),
            last_step_micros: AtomicU64::new(0),
            total_step_micros: AtomicU64::new(0),
            log_interval: log_interval.max(1),
            start_time: Instant::now(),
        }
    }

    /// Records a completed generation with its duration.
    pub fn record_step(&self, duration: Duration, cells: usize) {
        let micros = duration.as_micros() as u64;
        let generation = self.generation_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.last_step_micros.store(micros, Ordering::Relaxed);
        self.total_step_micros.fetch_add(micros, Ordering::Relaxed);

        if generation % self.log_interval == 0 {
            tracing::info!(
                generation,
                cells,
                step_us = micros,
                avg_step_us = self.average_step().as_micros() as u64,
                "Simulation step"
            );
        }
    }

    /// Records that a new rule replaced the current one.
    pub fn record_rule(&self, source: &str) {
        self.rule_count.fetch_add(1, Ordering::Relaxed);
        tracing::info!(source, "Rule replaced");
    }

    pub fn record_mutation(&self) {
        self.mutation_count.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn generation_count(&self) -> u64 {
        self.generation_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn rule_count(&self) -> u64 {
        self.rule_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn mutation_count(&self) -> u64 {
        self.mutation_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn last_step(&self) -> Duration {
        Duration::from_micros(self.last_step_micros.load(Ordering::Relaxed))
    }

    /// Mean step duration over every recorded generation.
    #[must_use]
    pub fn average_step(&self) -> Duration {
        let steps = self.generation_count();
        if steps == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(self.total_step_micros.load(Ordering::Relaxed) / steps)
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
///
/// Honors `RUST_LOG`, defaulting to `info`. Calling it twice is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new(10);
        assert_eq!(metrics.generation_count(), 0);
        assert_eq!(metrics.average_step(), Duration::ZERO);
    }

    #[test]
    fn test_record_step() {
        let metrics = Metrics::new(1);
        metrics.record_step(Duration::from_micros(300), 100);
        metrics.record_step(Duration::from_micros(100), 100);
        assert_eq!(metrics.generation_count(), 2);
        assert_eq!(metrics.last_step(), Duration::from_micros(100));
        assert_eq!(metrics.average_step(), Duration::from_micros(200));
    }

    #[test]
    fn test_rule_and_mutation_counters() {
        let metrics = Metrics::default();
        metrics.record_rule("random");
        metrics.record_mutation();
        metrics.record_mutation();
        assert_eq!(metrics.rule_count(), 1);
        assert_eq!(metrics.mutation_count(), 2);
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
    }
}
