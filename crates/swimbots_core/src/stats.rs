//! Population statistics for a single generation.

use serde::{Deserialize, Serialize};
use swimbots_data::{Pond, Swimbot};

/// Summary of one generation's living population.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub population: usize,
    pub food_count: usize,
    pub avg_energy: f64,
    pub avg_age: f64,
    pub avg_segments: f64,
    pub avg_translational_movement: f64,
    pub avg_angular_movement: f64,
    pub avg_main_segment_length: f64,
    /// Longest family record, a rough proxy for reproductive success.
    pub max_family_size: usize,
}

impl PopulationStats {
    #[must_use]
    pub fn from_pond(pond: &Pond) -> Self {
        let mut stats = Self {
            food_count: pond.food_count(),
            ..Default::default()
        };

        for (_, bot) in pond.live_swimbots() {
            stats.population += 1;
            stats.avg_energy += bot.energy;
            stats.avg_age += bot.age;
            stats.avg_segments += bot.num_segments() as f64;
            stats.avg_translational_movement += bot.common_gene.translational_movement;
            stats.avg_angular_movement += bot.common_gene.angular_movement;
            stats.avg_main_segment_length += bot.main_segment_length();
            stats.max_family_size = stats.max_family_size.max(bot.family.len());
        }

        if stats.population > 0 {
            let n = stats.population as f64;
            stats.avg_energy /= n;
            stats.avg_age /= n;
            stats.avg_segments /= n;
            stats.avg_translational_movement /= n;
            stats.avg_angular_movement /= n;
            stats.avg_main_segment_length /= n;
        }
        stats
    }
}

/// Fixed-width histogram over `[min, min + bin_width * bins.len())`.
///
/// Values outside the range are counted in `outliers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub min: f64,
    pub bin_width: f64,
    pub bins: Vec<usize>,
    pub outliers: usize,
}

impl Histogram {
    #[must_use]
    pub fn new(min: f64, bin_width: f64, bin_count: usize) -> Self {
        Self {
            min,
            bin_width,
            bins: vec![0; bin_count],
            outliers: 0,
        }
    }

    pub fn add(&mut self, value: f64) {
        let offset = (value - self.min) / self.bin_width;
        if offset >= 0.0 && (offset as usize) < self.bins.len() {
            self.bins[offset as usize] += 1;
        } else {
            self.outliers += 1;
        }
    }

    /// Builds a histogram from one value per live swimbot.
    pub fn of_pond<F>(pond: &Pond, min: f64, bin_width: f64, bin_count: usize, value: F) -> Self
    where
        F: Fn(&Swimbot) -> f64,
    {
        let mut histogram = Self::new(min, bin_width, bin_count);
        for (_, bot) in pond.live_swimbots() {
            histogram.add(value(bot));
        }
        histogram
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.bins.iter().sum::<usize>() + self.outliers
    }

    /// Lower edge of bin `index`.
    #[must_use]
    pub fn bin_start(&self, index: usize) -> f64 {
        self.min + self.bin_width * index as f64
    }
}

/// Energy in bins of 5 over `[0, 100)`.
#[must_use]
pub fn energy_histogram(pond: &Pond) -> Histogram {
    Histogram::of_pond(pond, 0.0, 5.0, 20, |bot| bot.energy)
}

/// One bin per expressed segment count, 2 through 8.
#[must_use]
pub fn segment_histogram(pond: &Pond) -> Histogram {
    Histogram::of_pond(pond, 2.0, 1.0, 7, |bot| bot.num_segments() as f64)
}
