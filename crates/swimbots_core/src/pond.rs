//! Population stepper: produces generation N+1 from generation N.
//!
//! The prior snapshot is never mutated. Goals and steering read target
//! positions from it, while eating and mating use the post-motion state of the
//! new snapshot.

use crate::config::SimConfig;
use crate::error::Result;
use crate::goal::update_goal;
use crate::lifecycle::{is_expired, random_food};
use crate::metrics::GenerationEvents;
use crate::motion::{advance, steer};
use crate::reproduction::mate;
use crate::snapshot::clone_pond;
use rand::Rng;
use swimbots_data::{Goal, Pond};

/// A freshly stepped generation and what happened during it.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    pub pond: Pond,
    pub events: GenerationEvents,
}

/// Advances `prior` by one generation.
///
/// `generation` is the index of the generation being produced and decides
/// whether food is replenished.
pub fn update_pond<R: Rng>(
    prior: &Pond,
    generation: u64,
    config: &SimConfig,
    rng: &mut R,
) -> Result<GenerationOutcome> {
    let mut pond = clone_pond(prior);
    let mut events = GenerationEvents::default();

    for index in 0..pond.swimbots.len() {
        let Some(bot) = pond.swimbot_mut(index) else {
            continue;
        };

        update_goal(bot, index, prior, &config.behavior, rng);
        steer(bot, prior, config.metabolism.energy_loss_factor)
            .map_err(|e| e.at(index, generation))?;
        advance(bot, config.run.time_step).map_err(|e| e.at(index, generation))?;
        bot.age += 1.0;

        if is_expired(bot, config.metabolism.maximum_age) {
            pond.kill(index);
            events.deaths += 1;
        }
    }

    let (meals, births) =
        eat_or_mate(&mut pond, config, rng).map_err(|e| e.at(usize::MAX, generation))?;
    events.meals = meals;
    events.births = births;
    events.food_added = replenish_food(&mut pond, generation, config, rng);

    Ok(GenerationOutcome { pond, events })
}

/// Feeds swimbots that reached their food and mates pairs that reached each other.
///
/// Only the swimbots present when the phase starts are visited, and each one
/// mates at most once. Returns `(meals, births)`.
pub fn eat_or_mate<R: Rng>(
    pond: &mut Pond,
    config: &SimConfig,
    rng: &mut R,
) -> Result<(usize, usize)> {
    let proximity = config.behavior.proximity;
    let existing = pond.swimbots.len();
    let mut mated = vec![false; existing];
    let mut meals = 0;
    let mut births = 0;

    for index in 0..existing {
        let Some(bot) = pond.swimbot(index) else {
            continue;
        };

        let goal = bot.goal;
        match goal {
            Goal::NoGoal => {}
            Goal::Mate(partner) => {
                if mated[index] || mated.get(partner).copied().unwrap_or(true) {
                    continue;
                }
                let Some(other) = pond.swimbot(partner) else {
                    continue;
                };
                if bot.distance_to(&other.position) > proximity {
                    continue;
                }
                if config.behavior.mutual_mating && other.goal != Goal::Mate(index) {
                    continue;
                }
                if mate(pond, index, partner, config, rng)?.is_some() {
                    mated[index] = true;
                    mated[partner] = true;
                    births += 1;
                }
            }
            Goal::Food(pellet) => {
                let reached = pond
                    .food_at(pellet)
                    .is_some_and(|food| bot.distance_to(&food.position) <= proximity);
                if reached {
                    pond.consume_food(pellet);
                    if let Some(bot) = pond.swimbot_mut(index) {
                        bot.energy += config.metabolism.food_energy;
                    }
                    meals += 1;
                }
            }
        }
    }

    Ok((meals, births))
}

/// Drops a new batch of food on generations that are a multiple of the food
/// frequency. Returns the number of pellets added.
///
/// A frequency of 0 never replenishes.
pub fn replenish_food<R: Rng>(
    pond: &mut Pond,
    generation: u64,
    config: &SimConfig,
    rng: &mut R,
) -> usize {
    if generation.checked_rem(config.pond.food_frequency) != Some(0) {
        return 0;
    }
    for _ in 0..config.pond.food_batch {
        pond.push_food(random_food(config, rng));
    }
    config.pond.food_batch
}
