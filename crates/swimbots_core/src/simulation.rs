//! Run driver: owns the RNG, the history and the metrics of one simulation.

use crate::config::SimConfig;
use crate::error::Result;
use crate::lifecycle::initialize_pond;
use crate::metrics::{GenerationEvents, Metrics};
use crate::pond::update_pond;
use crate::snapshot::History;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use swimbots_data::Pond;

pub struct Simulation {
    config: SimConfig,
    rng: ChaCha8Rng,
    history: History,
    /// Newest generation, also the last entry of `history`.
    current: Pond,
    metrics: Metrics,
    generation: u64,
}

impl Simulation {
    /// Validates `config`, seeds the RNG from `run.seed` and builds generation 0.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.run.seed);
        let initial = initialize_pond(&config, &mut rng)?;
        tracing::info!(
            seed = config.run.seed,
            fingerprint = %config.fingerprint(),
            population = initial.live_count(),
            food = initial.food_count(),
            preference = %config.behavior.mating_preference,
            "Simulation initialized"
        );

        let mut history = History::with_capacity(config.run.generations + 1);
        history.push(initial.clone());

        Ok(Self {
            metrics: Metrics::new(config.run.log_interval),
            config,
            rng,
            history,
            current: initial,
            generation: 0,
        })
    }

    /// Produces the next generation and appends it to the history.
    pub fn step(&mut self) -> Result<&Pond> {
        let next = self.generation + 1;
        let span = tracing::debug_span!("generation", generation = next);
        let _enter = span.enter();

        let start = Instant::now();
        let outcome = update_pond(&self.current, next, &self.config, &mut self.rng).map_err(|e| {
            tracing::error!(error = %e, "Generation failed");
            e
        })?;

        self.record(start.elapsed(), &outcome.pond, &outcome.events);
        self.history.push(outcome.pond.clone());
        self.current = outcome.pond;
        self.generation = next;

        Ok(&self.current)
    }

    /// Runs `generations` more steps. Stops early, keeping what was produced,
    /// on the first error.
    pub fn run(&mut self, generations: usize) -> Result<()> {
        for _ in 0..generations {
            self.step()?;
        }
        tracing::info!(
            generations = self.generation,
            population = self.metrics.population(),
            births = self.metrics.births(),
            deaths = self.metrics.deaths(),
            meals = self.metrics.meals(),
            elapsed_ms = self.metrics.elapsed().as_millis() as u64,
            "Run finished"
        );
        Ok(())
    }

    fn record(&self, elapsed: std::time::Duration, pond: &Pond, events: &GenerationEvents) {
        self.metrics
            .record_generation(elapsed, pond.live_count(), pond.food_count(), events);
    }

    /// Newest generation.
    #[must_use]
    pub fn current(&self) -> &Pond {
        &self.current
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn into_history(self) -> History {
        self.history
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Index of the newest generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Runs `config.run.generations` generations and returns all
/// `generations + 1` snapshots.
pub fn simulate_pond(config: SimConfig) -> Result<History> {
    let generations = config.run.generations;
    let mut simulation = Simulation::new(config)?;
    simulation.run(generations)?;
    Ok(simulation.into_history())
}
