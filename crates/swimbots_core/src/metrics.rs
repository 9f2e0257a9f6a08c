//! Run metrics and structured logging.
//!
//! Counters are atomics so that read-only observers can sample them while the
//! driver owns the simulation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Per-generation event counts reported by the stepper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationEvents {
    pub births: usize,
    pub deaths: usize,
    pub meals: usize,
    pub food_added: usize,
}

/// Cumulative counters for a simulation run.
pub struct Metrics {
    generation_count: AtomicU64,
    population: AtomicU64,
    food_count: AtomicU64,
    births: AtomicU64,
    deaths: AtomicU64,
    meals: AtomicU64,
    log_interval: u64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Metrics {
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            generation_count: AtomicU64::new(0),
            population: AtomicU64::new(0),
            food_count: AtomicU64::new(0),
            births: AtomicU64::new(0),
            deaths: AtomicU64::new(0),
            meals: AtomicU64::new(0),
            log_interval: log_interval.max(1),
            start_time: Instant::now(),
        }
    }

    /// Records a completed generation with its duration.
    pub fn record_generation(
        &self,
        duration: Duration,
        population: usize,
        food: usize,
        events: &GenerationEvents,
    ) {
        let generation = self.generation_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.population.store(population as u64, Ordering::Relaxed);
        self.food_count.store(food as u64, Ordering::Relaxed);
        self.births
            .fetch_add(events.births as u64, Ordering::Relaxed);
        self.deaths
            .fetch_add(events.deaths as u64, Ordering::Relaxed);
        self.meals.fetch_add(events.meals as u64, Ordering::Relaxed);

        tracing::debug!(
            generation,
            population,
            food,
            births = events.births,
            deaths = events.deaths,
            meals = events.meals,
            "Generation complete"
        );

        if generation % self.log_interval == 0 {
            tracing::info!(
                generation,
                population,
                food,
                total_births = self.births(),
                total_deaths = self.deaths(),
                duration_us = duration.as_micros() as u64,
                "Simulation progress"
            );
        }
    }

    #[must_use]
    pub fn generation_count(&self) -> u64 {
        self.generation_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn population(&self) -> u64 {
        self.population.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn food_count(&self) -> u64 {
        self.food_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn births(&self) -> u64 {
        self.births.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn deaths(&self) -> u64 {
        self.deaths.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn meals(&self) -> u64 {
        self.meals.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
///
/// Honors `RUST_LOG`; defaults to `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}
