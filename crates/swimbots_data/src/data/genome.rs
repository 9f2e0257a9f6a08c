use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};

/// Number of traits carried by every segment gene.
pub const TRAIT_COUNT: usize = 6;
/// Number of segment gene slots every swimbot carries, expressed or not.
pub const SEGMENT_SLOTS: usize = 8;

const RED: usize = 0;
const GREEN: usize = 1;
const BLUE: usize = 2;
const ANGLE_TO_PARENT: usize = 3;
const LENGTH: usize = 4;
const WIDTH: usize = 5;

/// Whole-body genes shared by every segment of a swimbot.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Default,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct CommonGene {
    /// Maximum heading change per tick, in radians.
    pub angular_movement: f64,
    /// Swimming speed, in distance per tick.
    pub translational_movement: f64,
    /// Number of expressed segments (2..=8 for generated genomes).
    pub num_segments: usize,
}

/// Positional trait vector for one body segment.
///
/// Layout: red, green, blue, angle to parent, length, width. The order is
/// load-bearing because crossover splits the vector at a position.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Default,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct SegmentGene {
    pub traits: [f64; TRAIT_COUNT],
}

impl SegmentGene {
    #[must_use]
    pub fn new(traits: [f64; TRAIT_COUNT]) -> Self {
        Self { traits }
    }

    #[must_use]
    pub fn red(&self) -> f64 {
        self.traits[RED]
    }

    #[must_use]
    pub fn green(&self) -> f64 {
        self.traits[GREEN]
    }

    #[must_use]
    pub fn blue(&self) -> f64 {
        self.traits[BLUE]
    }

    /// Angle relative to the parent segment, in radians.
    #[must_use]
    pub fn angle_to_parent(&self) -> f64 {
        self.traits[ANGLE_TO_PARENT]
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.traits[LENGTH]
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.traits[WIDTH]
    }

    pub fn set_angle_to_parent(&mut self, angle: f64) {
        self.traits[ANGLE_TO_PARENT] = angle;
    }

    pub fn set_length(&mut self, length: f64) {
        self.traits[LENGTH] = length;
    }
}

impl From<[f64; TRAIT_COUNT]> for SegmentGene {
    fn from(traits: [f64; TRAIT_COUNT]) -> Self {
        Self { traits }
    }
}
