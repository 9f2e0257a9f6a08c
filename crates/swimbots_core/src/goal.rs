//! Goal selection with hysteresis.
//!
//! A swimbot keeps pursuing its goal until it stops matching its hunger state,
//! disappears, or drifts out of view. Targets are always read from the prior
//! generation, so the order in which swimbots are updated within a tick does
//! not change what they see.
//!
//! Candidates are scanned in ascending pond index and ties keep the lowest
//! index.

use crate::config::{BehaviorConfig, MatingPreference};
use rand::Rng;
use swimbots_data::{Goal, Pond, Swimbot};

/// Whether the current goal has to be replaced this tick.
#[must_use]
pub fn needs_new_goal(bot: &Swimbot, prior: &Pond, behavior: &BehaviorConfig) -> bool {
    let hungry = bot.energy < behavior.hunger_threshold;
    match bot.goal {
        Goal::NoGoal => true,
        Goal::Mate(index) => {
            hungry
                || prior
                    .swimbot(index)
                    .map_or(true, |mate| bot.distance_to(&mate.position) > behavior.view_range)
        }
        Goal::Food(index) => {
            !hungry
                || prior
                    .food_at(index)
                    .map_or(true, |food| bot.distance_to(&food.position) > behavior.view_range)
        }
    }
}

/// Re-evaluates the goal of the swimbot stored at `self_index`.
///
/// Returns `true` when a new goal was computed.
pub fn update_goal<R: Rng>(
    bot: &mut Swimbot,
    self_index: usize,
    prior: &Pond,
    behavior: &BehaviorConfig,
    rng: &mut R,
) -> bool {
    if !needs_new_goal(bot, prior, behavior) {
        return false;
    }
    bot.goal = find_new_goal(bot, self_index, prior, behavior, rng);
    true
}

/// Picks a fresh goal: the nearest food when hungry, otherwise a mate.
pub fn find_new_goal<R: Rng>(
    bot: &Swimbot,
    self_index: usize,
    prior: &Pond,
    behavior: &BehaviorConfig,
    rng: &mut R,
) -> Goal {
    if bot.energy < behavior.hunger_threshold {
        nearest_food(bot, prior, behavior.view_range).map_or(Goal::NoGoal, Goal::Food)
    } else {
        let candidates = mate_candidates(bot, self_index, prior, behavior.view_range);
        choose_mate(bot, &candidates, prior, behavior.mating_preference, rng)
            .map_or(Goal::NoGoal, Goal::Mate)
    }
}

/// Closest uneaten food strictly inside `view_range`.
#[must_use]
pub fn nearest_food(bot: &Swimbot, pond: &Pond, view_range: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, food) in pond.live_food() {
        let dist = bot.distance_to(&food.position);
        if dist < view_range && best.map_or(true, |(_, shortest)| dist < shortest) {
            best = Some((index, dist));
        }
    }
    best.map(|(index, _)| index)
}

/// Live, unrelated swimbots within `view_range`, ascending by index.
#[must_use]
pub fn mate_candidates(
    bot: &Swimbot,
    self_index: usize,
    pond: &Pond,
    view_range: f64,
) -> Vec<usize> {
    pond.live_swimbots()
        .filter(|(index, other)| {
            *index != self_index
                && !bot.is_related_to(*index)
                && bot.distance_to(&other.position) <= view_range
        })
        .map(|(index, _)| index)
        .collect()
}

/// Applies the mating preference to a candidate list.
///
/// Only [`MatingPreference::Random`] draws from `rng`, and only when the list
/// is not empty.
pub fn choose_mate<R: Rng>(
    bot: &Swimbot,
    candidates: &[usize],
    pond: &Pond,
    preference: MatingPreference,
    rng: &mut R,
) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }

    let live = candidates
        .iter()
        .filter_map(|&index| pond.swimbot(index).map(|other| (index, other)));

    match preference {
        MatingPreference::Random => Some(candidates[rng.gen_range(0..candidates.len())]),
        MatingPreference::MostSegments => first_max_by(live, |other| other.num_segments() as f64),
        MatingPreference::FewestSegments => {
            first_max_by(live, |other| -(other.num_segments() as f64))
        }
        MatingPreference::Fastest => {
            first_max_by(live, |other| other.common_gene.translational_movement)
        }
        MatingPreference::SimilarSegments => first_max_by(live, |other| {
            -(other.num_segments() as f64 - bot.num_segments() as f64).abs()
        }),
        MatingPreference::SimilarMainSegment => first_max_by(live, |other| {
            -(other.main_segment_length() - bot.main_segment_length()).abs()
        }),
    }
}

/// Index of the first candidate with the highest score.
fn first_max_by<'a, I, F>(candidates: I, score: F) -> Option<usize>
where
    I: Iterator<Item = (usize, &'a Swimbot)>,
    F: Fn(&Swimbot) -> f64,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, other) in candidates {
        let value = score(other);
        if best.map_or(true, |(_, top)| value > top) {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}
