use super::body::Body;
use super::genome::{CommonGene, SegmentGene, SEGMENT_SLOTS};
use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};

/// Ordered pair used for positions, velocities and accelerations.
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
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[must_use]
    pub fn distance_to(&self, other: &Vec2) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[must_use]
    pub fn midpoint(&self, other: &Vec2) -> Vec2 {
        Vec2::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}

/// What a swimbot is currently swimming towards.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[archive(check_bytes)]
pub enum Goal {
    /// Nothing within view; the swimbot drifts and bounces off the walls.
    #[default]
    NoGoal,
    /// Food at this index of the pond's food list.
    Food(usize),
    /// Potential mate at this index of the pond's swimbot list.
    Mate(usize),
}

impl Goal {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Goal::NoGoal)
    }

    #[must_use]
    pub fn mate(&self) -> Option<usize> {
        match self {
            Goal::Mate(index) => Some(*index),
            _ => None,
        }
    }

    #[must_use]
    pub fn food(&self) -> Option<usize> {
        match self {
            Goal::Food(index) => Some(*index),
            _ => None,
        }
    }
}

/// A food pellet.
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
pub struct Food {
    pub position: Vec2,
}

impl Food {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Vec2::new(x, y),
        }
    }
}

/// A single agent of the pond.
#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct Swimbot {
    pub goal: Goal,
    /// Ticks survived.
    pub age: f64,
    /// Can drop below zero before the swimbot is culled.
    pub energy: f64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub mass: f64,
    /// Pond indices of parents, self and children. Only used to refuse related mates.
    pub family: Vec<usize>,
    pub common_gene: CommonGene,
    pub segment_genes: [SegmentGene; SEGMENT_SLOTS],
    pub body: Body,
}

impl Swimbot {
    #[must_use]
    pub fn is_related_to(&self, index: usize) -> bool {
        self.family.contains(&index)
    }

    #[must_use]
    pub fn distance_to(&self, point: &Vec2) -> f64 {
        self.position.distance_to(point)
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Length gene of the main (root) segment.
    #[must_use]
    pub fn main_segment_length(&self) -> f64 {
        self.segment_genes[0].length()
    }

    #[must_use]
    pub fn num_segments(&self) -> usize {
        self.common_gene.num_segments
    }
}
