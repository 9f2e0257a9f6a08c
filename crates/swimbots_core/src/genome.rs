//! Random genome generation.

use rand::Rng;
use std::f64::consts::PI;
use swimbots_data::{CommonGene, SegmentGene, SEGMENT_SLOTS};

pub const MAX_ANGULAR_MOVEMENT: f64 = PI / 4.0;
pub const MAX_TRANSLATIONAL_MOVEMENT: f64 = 10.0;
pub const MIN_SEGMENTS: usize = 2;
pub const MAX_SEGMENTS: usize = SEGMENT_SLOTS;
pub const MIN_SEGMENT_LENGTH: f64 = 5.0;
pub const SEGMENT_LENGTH_SPAN: f64 = 15.0;
pub const MIN_SEGMENT_WIDTH: f64 = 0.3;
pub const SEGMENT_WIDTH_SPAN: f64 = 3.7;

/// Full heritable genome of a swimbot.
pub type Genome = (CommonGene, [SegmentGene; SEGMENT_SLOTS]);

/// Draws a fresh genome.
///
/// Draw order: angular movement, translational movement, segment count, then
/// for every slot red, green, blue, angle to parent, length, width.
pub fn random_genome<R: Rng>(rng: &mut R) -> Genome {
    let common = CommonGene {
        angular_movement: rng.gen::<f64>() * MAX_ANGULAR_MOVEMENT,
        translational_movement: rng.gen::<f64>() * MAX_TRANSLATIONAL_MOVEMENT,
        num_segments: rng.gen_range(0..=(MAX_SEGMENTS - MIN_SEGMENTS)) + MIN_SEGMENTS,
    };

    let mut genes = [SegmentGene::default(); SEGMENT_SLOTS];
    for gene in genes.iter_mut() {
        *gene = random_segment_gene(rng);
    }
    (common, genes)
}

/// Draws one segment gene slot.
pub fn random_segment_gene<R: Rng>(rng: &mut R) -> SegmentGene {
    let red = rng.gen_range(0..256u32) as f64;
    let green = rng.gen_range(0..256u32) as f64;
    let blue = rng.gen_range(0..256u32) as f64;
    let angle_to_parent = rng.gen::<f64>() * PI - PI / 2.0;
    let length = rng.gen::<f64>() * SEGMENT_LENGTH_SPAN + MIN_SEGMENT_LENGTH;
    let width = rng.gen::<f64>() * SEGMENT_WIDTH_SPAN + MIN_SEGMENT_WIDTH;
    SegmentGene::new([red, green, blue, angle_to_parent, length, width])
}
