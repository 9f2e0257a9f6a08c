//! Sexual reproduction: genome crossover and offspring construction.

use crate::body::build_body;
use crate::config::SimConfig;
use crate::error::Result;
use crate::genome::Genome;
use rand::Rng;
use swimbots_data::{
    CommonGene, Goal, Pond, SegmentGene, Swimbot, Vec2, SEGMENT_SLOTS, TRAIT_COUNT,
};

/// Single-point crossover of two segment genes.
///
/// Traits before `crosspoint` come from `a`, the rest from `b`.
#[must_use]
pub fn crossover(a: &SegmentGene, b: &SegmentGene, crosspoint: usize) -> SegmentGene {
    let split = crosspoint.min(TRAIT_COUNT);
    let mut traits = b.traits;
    traits[..split].copy_from_slice(&a.traits[..split]);
    SegmentGene::new(traits)
}

fn pick<T: Copy, R: Rng>(a: T, b: T, rng: &mut R) -> T {
    if rng.gen_range(0..2) == 0 {
        a
    } else {
        b
    }
}

/// Child genome of two parents.
///
/// Each common trait is inherited whole from a parent chosen by its own coin
/// flip (angular movement, translational movement, segment count, in that
/// order). Every segment slot, expressed or latent, is crossed over at its own
/// random point.
pub fn offspring_genome<R: Rng>(a: &Swimbot, b: &Swimbot, rng: &mut R) -> Genome {
    let common = CommonGene {
        angular_movement: pick(
            a.common_gene.angular_movement,
            b.common_gene.angular_movement,
            rng,
        ),
        translational_movement: pick(
            a.common_gene.translational_movement,
            b.common_gene.translational_movement,
            rng,
        ),
        num_segments: pick(a.common_gene.num_segments, b.common_gene.num_segments, rng),
    };

    let mut genes = [SegmentGene::default(); SEGMENT_SLOTS];
    for (slot, gene) in genes.iter_mut().enumerate() {
        let crosspoint = rng.gen_range(0..TRAIT_COUNT);
        *gene = crossover(&a.segment_genes[slot], &b.segment_genes[slot], crosspoint);
    }
    (common, genes)
}

/// Builds a newborn from two parents. Family records are left to [`mate`].
pub fn spawn_child<R: Rng>(
    a: &Swimbot,
    b: &Swimbot,
    energy: f64,
    config: &SimConfig,
    rng: &mut R,
) -> Result<Swimbot> {
    let position = a.position.midpoint(&b.position);
    let (common_gene, segment_genes) = offspring_genome(a, b, rng);

    let speed = common_gene.translational_movement;
    let vx = (rng.gen::<f64>() - 0.5) * speed;
    let vy = (rng.gen::<f64>() - 0.5) * speed;
    let velocity = Vec2::new(vx, vy);

    let body = build_body(position, &velocity, &common_gene, &segment_genes, rng)?;

    Ok(Swimbot {
        goal: Goal::NoGoal,
        age: 0.0,
        energy,
        position,
        velocity,
        acceleration: Vec2::default(),
        mass: config.metabolism.segment_mass * common_gene.num_segments as f64,
        family: Vec::new(),
        common_gene,
        segment_genes,
        body,
    })
}

/// Mates the swimbots at `first` and `second`, appending their child to `pond`.
///
/// Both parents give up half their energy and the child receives the sum.
/// Returns the child's index, or `None` if either parent slot is empty.
pub fn mate<R: Rng>(
    pond: &mut Pond,
    first: usize,
    second: usize,
    config: &SimConfig,
    rng: &mut R,
) -> Result<Option<usize>> {
    let child_index = pond.swimbots.len();

    let child = {
        let (Some(a), Some(b)) = (pond.swimbot(first), pond.swimbot(second)) else {
            return Ok(None);
        };
        let energy = a.energy / 2.0 + b.energy / 2.0;
        let mut child = spawn_child(a, b, energy, config, rng)?;
        child.family.extend([first, second, child_index]);
        child
    };

    for parent in [first, second] {
        if let Some(bot) = pond.swimbot_mut(parent) {
            bot.energy *= 0.5;
            bot.family.push(child_index);
        }
    }

    pond.push_swimbot(child);
    Ok(Some(child_index))
}
