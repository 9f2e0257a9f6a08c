//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every section has defaults, so a partial file only
//! overrides what it names.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [run]
//! generations = 1000
//! time_step = 1.0
//! seed = 0
//!
//! [pond]
//! initial_population = 200
//! food_batch = 5
//! food_frequency = 5
//!
//! [behavior]
//! view_range = 300.0
//! mating_preference = "similar_segments"
//!
//! [metabolism]
//! energy_loss_factor = 0.0005
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// How a well-fed swimbot picks among the eligible mates in view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatingPreference {
    /// Uniformly random candidate.
    #[default]
    Random,
    /// Most expressed segments.
    MostSegments,
    /// Fewest expressed segments.
    FewestSegments,
    /// Highest translational speed.
    Fastest,
    /// Closest segment count to one's own.
    SimilarSegments,
    /// Closest main segment length to one's own.
    SimilarMainSegment,
}

impl MatingPreference {
    pub const ALL: [MatingPreference; 6] = [
        MatingPreference::Random,
        MatingPreference::MostSegments,
        MatingPreference::FewestSegments,
        MatingPreference::Fastest,
        MatingPreference::SimilarSegments,
        MatingPreference::SimilarMainSegment,
    ];

    /// Numeric code (0-5) used on the command line.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            MatingPreference::Random => 0,
            MatingPreference::MostSegments => 1,
            MatingPreference::FewestSegments => 2,
            MatingPreference::Fastest => 3,
            MatingPreference::SimilarSegments => 4,
            MatingPreference::SimilarMainSegment => 5,
        }
    }
}

impl TryFrom<u8> for MatingPreference {
    type Error = anyhow::Error;

    fn try_from(code: u8) -> anyhow::Result<Self> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Mating preference must be in 0..=5, got {}", code))
    }
}

impl fmt::Display for MatingPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatingPreference::Random => "random",
            MatingPreference::MostSegments => "most_segments",
            MatingPreference::FewestSegments => "fewest_segments",
            MatingPreference::Fastest => "fastest",
            MatingPreference::SimilarSegments => "similar_segments",
            MatingPreference::SimilarMainSegment => "similar_main_segment",
        };
        f.write_str(name)
    }
}

/// Run-level parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub generations: usize,
    /// Time elapsed per generation; scales every position update.
    pub time_step: f64,
    pub seed: u64,
    /// Log a population summary every this many generations.
    pub log_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            generations: 1000,
            time_step: 1.0,
            seed: 0,
            log_interval: 100,
        }
    }
}

/// Arena and population layout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PondConfig {
    pub width: f64,
    pub initial_population: usize,
    pub initial_food: usize,
    pub initial_energy: f64,
    /// Distance from the walls kept free when placing the first generation.
    pub spawn_margin: f64,
    /// Distance from the walls kept free when dropping food.
    pub food_margin: f64,
    /// Pellets added per replenishment.
    pub food_batch: usize,
    /// Replenish when the generation index is a multiple of this.
    pub food_frequency: u64,
}

impl Default for PondConfig {
    fn default() -> Self {
        Self {
            width: 6000.0,
            initial_population: 200,
            initial_food: 400,
            initial_energy: 75.0,
            spawn_margin: 1000.0,
            food_margin: 500.0,
            food_batch: 5,
            food_frequency: 5,
        }
    }
}

/// Goal selection and mating rules.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BehaviorConfig {
    pub view_range: f64,
    pub proximity: f64,
    pub hunger_threshold: f64,
    pub mating_preference: MatingPreference,
    /// Require both partners to target each other before they can mate.
    pub mutual_mating: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            view_range: 300.0,
            proximity: 10.0,
            hunger_threshold: 50.0,
            mating_preference: MatingPreference::Random,
            mutual_mating: true,
        }
    }
}

/// Energy and lifespan.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MetabolismConfig {
    pub food_energy: f64,
    pub maximum_age: f64,
    pub segment_mass: f64,
    /// Drag coefficient: energy lost per tick is `factor * speed^2 * mass`.
    pub energy_loss_factor: f64,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            food_energy: 50.0,
            maximum_age: 1000.0,
            segment_mass: 10.0,
            energy_loss_factor: 0.0005,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SimConfig {
    pub run: RunConfig,
    pub pond: PondConfig,
    pub behavior: BehaviorConfig,
    pub metabolism: MetabolismConfig,
}

impl SimConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.run.time_step.is_finite() && self.run.time_step > 0.0,
            "Time step must be positive"
        );
        anyhow::ensure!(self.run.log_interval > 0, "Log interval must be positive");

        anyhow::ensure!(
            self.pond.width.is_finite() && self.pond.width > 0.0,
            "Pond width must be positive"
        );
        anyhow::ensure!(
            self.pond.spawn_margin >= 0.0 && 2.0 * self.pond.spawn_margin < self.pond.width,
            "Spawn margin must leave room inside the pond"
        );
        anyhow::ensure!(
            self.pond.food_margin >= 0.0 && 2.0 * self.pond.food_margin < self.pond.width,
            "Food margin must leave room inside the pond"
        );
        anyhow::ensure!(
            self.pond.initial_population <= 100_000,
            "Initial population too large (max 100000)"
        );
        anyhow::ensure!(
            self.pond.initial_energy > 0.0,
            "Initial energy must be positive"
        );
        anyhow::ensure!(
            self.pond.food_frequency > 0,
            "Food frequency must be positive"
        );

        anyhow::ensure!(
            self.behavior.view_range >= 0.0,
            "View range must be non-negative"
        );
        anyhow::ensure!(
            self.behavior.proximity >= 0.0,
            "Proximity must be non-negative"
        );

        anyhow::ensure!(
            self.metabolism.food_energy >= 0.0,
            "Food energy must be non-negative"
        );
        anyhow::ensure!(
            self.metabolism.maximum_age > 0.0,
            "Maximum age must be positive"
        );
        anyhow::ensure!(
            self.metabolism.segment_mass > 0.0,
            "Segment mass must be positive"
        );
        anyhow::ensure!(
            self.metabolism.energy_loss_factor >= 0.0,
            "Energy loss factor must be non-negative"
        );

        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file, falling back to defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Hash of every parameter that influences the trajectory of a run.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(self.run.seed.to_le_bytes());
        hasher.update(self.run.time_step.to_le_bytes());
        hasher.update(format!("{:?}", self.pond).as_bytes());
        hasher.update(format!("{:?}", self.behavior).as_bytes());
        hasher.update(format!("{:?}", self.metabolism).as_bytes());
        hex::encode(hasher.finalize())
    }
}
