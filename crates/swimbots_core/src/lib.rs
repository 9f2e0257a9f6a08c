//! # Swimbots Core
//!
//! The simulation engine for swimbots, segmented agents that swim through a
//! square pond, eat, mate and pass their genomes on.
//!
//! This crate contains the deterministic simulation logic, including:
//! - Genome generation, crossover and body construction
//! - Goal selection with selectable mating preferences
//! - Steering, drag and position integration
//! - The generation stepper and the run driver
//! - Metrics collection and structured logging
//!
//! ## Architecture
//!
//! Each generation is a complete [`Pond`](swimbots_data::Pond) snapshot. The
//! stepper clones the prior snapshot, reads goals and targets from the prior
//! one and mutates only the clone. All randomness flows through one seeded
//! `ChaCha8Rng`, consumed in ascending swimbot index, so a seed fully
//! determines a run.
//!
//! ## Example
//!
//! ```
//! use swimbots_core::config::SimConfig;
//! use swimbots_core::simulation::simulate_pond;
//!
//! let mut config = SimConfig::default();
//! config.run.generations = 3;
//! config.pond.initial_population = 10;
//!
//! let history = simulate_pond(config).unwrap();
//! assert_eq!(history.len(), 4);
//! ```

/// Segment tree construction and repositioning
pub mod body;
/// Configuration management for simulation parameters
pub mod config;
/// Fatal simulation errors
pub mod error;
/// Random genome generation
pub mod genome;
/// Goal selection and mating preferences
pub mod goal;
/// Founder generation and death
pub mod lifecycle;
/// Performance metrics collection and logging
pub mod metrics;
/// Steering, drag and integration
pub mod motion;
/// Generation stepper (motion, eating, mating, food)
pub mod pond;
/// Crossover and offspring construction
pub mod reproduction;
/// Run driver
pub mod simulation;
/// Pond snapshots and run history
pub mod snapshot;
/// Population statistics and histograms
pub mod stats;

pub use config::{MatingPreference, SimConfig};
pub use error::{Result, SimError};
pub use pond::{update_pond, GenerationOutcome};
pub use simulation::{simulate_pond, Simulation};
pub use snapshot::{clone_pond, History};
