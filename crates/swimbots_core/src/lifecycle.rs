//! Population initialisation and death.

use crate::body::build_body;
use crate::config::SimConfig;
use crate::error::Result;
use crate::genome::random_genome;
use rand::Rng;
use std::f64::consts::PI;
use swimbots_data::{Food, Goal, Pond, Swimbot, Vec2};

/// Integer grid coordinate in `[margin, width - margin)`.
pub(crate) fn grid_coordinate<R: Rng>(width: f64, margin: f64, rng: &mut R) -> f64 {
    let span = (width - 2.0 * margin).max(1.0) as u64;
    margin + rng.gen_range(0..span) as f64
}

/// Draws one founder swimbot. `index` becomes its only family entry.
///
/// Draw order: x, y, genome, heading, then the body's random walk.
pub fn random_swimbot<R: Rng>(index: usize, config: &SimConfig, rng: &mut R) -> Result<Swimbot> {
    let width = config.pond.width;
    let margin = config.pond.spawn_margin;
    let x = grid_coordinate(width, margin, rng);
    let y = grid_coordinate(width, margin, rng);
    let position = Vec2::new(x, y);

    let (common_gene, segment_genes) = random_genome(rng);
    let heading = rng.gen::<f64>() * 2.0 * PI;
    let speed = common_gene.translational_movement;
    let velocity = Vec2::new(speed * heading.cos(), speed * heading.sin());

    let body = build_body(position, &velocity, &common_gene, &segment_genes, rng)?;

    Ok(Swimbot {
        goal: Goal::NoGoal,
        age: 0.0,
        energy: config.pond.initial_energy,
        position,
        velocity,
        acceleration: Vec2::default(),
        mass: config.metabolism.segment_mass * common_gene.num_segments as f64,
        family: vec![index],
        common_gene,
        segment_genes,
        body,
    })
}

/// Drops a food pellet inside the food margin.
pub fn random_food<R: Rng>(config: &SimConfig, rng: &mut R) -> Food {
    let x = grid_coordinate(config.pond.width, config.pond.food_margin, rng);
    let y = grid_coordinate(config.pond.width, config.pond.food_margin, rng);
    Food::new(x, y)
}

/// Generation zero: every founder first, then the initial food.
pub fn initialize_pond<R: Rng>(config: &SimConfig, rng: &mut R) -> Result<Pond> {
    let mut pond = Pond::new(config.pond.width);
    pond.swimbots.reserve(config.pond.initial_population);
    pond.food.reserve(config.pond.initial_food);

    for index in 0..config.pond.initial_population {
        let bot = random_swimbot(index, config, rng)?;
        pond.push_swimbot(bot);
    }
    for _ in 0..config.pond.initial_food {
        pond.push_food(random_food(config, rng));
    }

    tracing::debug!(
        swimbots = pond.live_count(),
        food = pond.food_count(),
        "Pond initialized"
    );
    Ok(pond)
}

/// Out of energy or too old.
#[must_use]
pub fn is_expired(bot: &Swimbot, maximum_age: f64) -> bool {
    bot.energy <= 0.0 || bot.age >= maximum_age
}
