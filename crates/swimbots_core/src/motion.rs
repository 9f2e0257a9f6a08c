//! Steering, drag and integration.

use crate::body::reposition_body;
use crate::error::{Result, SimError};
use swimbots_data::{Goal, Pond, Swimbot, Vec2};

/// Position of the current goal in `prior`, if it still exists.
#[must_use]
pub fn goal_position(goal: &Goal, prior: &Pond) -> Option<Vec2> {
    match *goal {
        Goal::NoGoal => None,
        Goal::Food(index) => prior.food_at(index).map(|f| f.position),
        Goal::Mate(index) => prior.swimbot(index).map(|s| s.position),
    }
}

/// Heading after turning from `current` towards `desired` by at most `max_turn`.
#[must_use]
pub fn clamp_turn(current: f64, desired: f64, max_turn: f64) -> f64 {
    let delta = desired - current;
    if delta.abs() > max_turn {
        if delta <= 0.0 {
            current - max_turn
        } else {
            current + max_turn
        }
    } else {
        desired
    }
}

/// Elastic reflection off the four walls of a square pond.
pub fn bounce_off_walls(bot: &mut Swimbot, width: f64) {
    if bot.position.x >= width || bot.position.x <= 0.0 {
        bot.velocity.x = -bot.velocity.x;
    }
    if bot.position.y >= width || bot.position.y <= 0.0 {
        bot.velocity.y = -bot.velocity.y;
    }
}

/// Energy spent swimming one tick: `factor * speed^2 * mass`.
#[must_use]
pub fn drag_cost(velocity: &Vec2, mass: f64, energy_loss_factor: f64) -> f64 {
    let speed = velocity.length();
    energy_loss_factor * speed * speed * mass
}

/// Updates velocity and energy from the goal, reading targets from `prior`.
///
/// Headings are unsigned angles from `acos`; the sign of the vertical
/// velocity follows the sign of the vertical offset to the target. A
/// swimbot without a reachable goal keeps its velocity and bounces off the
/// walls.
pub fn steer(bot: &mut Swimbot, prior: &Pond, energy_loss_factor: f64) -> Result<()> {
    match goal_position(&bot.goal, prior) {
        Some(target) => {
            let dx = target.x - bot.position.x;
            let dy = target.y - bot.position.y;
            let distance = bot.distance_to(&target);
            let speed = bot.common_gene.translational_movement;

            let current = (bot.velocity.x / speed).clamp(-1.0, 1.0).acos();
            if current.is_nan() {
                return Err(SimError::non_finite("current heading"));
            }
            let desired = if distance > 0.0 {
                (dx / distance).clamp(-1.0, 1.0).acos()
            } else {
                current
            };
            if desired.is_nan() {
                return Err(SimError::non_finite("desired heading"));
            }

            let heading = clamp_turn(current, desired, bot.common_gene.angular_movement);
            if let Some(root) = bot.body.root_mut() {
                root.angle = heading;
            }

            bot.velocity.x = speed * heading.cos();
            bot.velocity.y = if dy < 0.0 {
                -speed * heading.sin()
            } else {
                speed * heading.sin()
            };
        }
        None => bounce_off_walls(bot, prior.width),
    }

    bot.energy -= drag_cost(&bot.velocity, bot.mass, energy_loss_factor);
    Ok(())
}

/// Moves the swimbot one time step and drags its body along.
pub fn advance(bot: &mut Swimbot, time_step: f64) -> Result<()> {
    bot.position.x += bot.velocity.x * time_step;
    bot.position.y += bot.velocity.y * time_step;
    if bot.position.is_nan() {
        return Err(SimError::non_finite("position"));
    }

    if let Some(root) = bot.body.root_mut() {
        root.position = bot.position;
    }
    reposition_body(&mut bot.body, &bot.segment_genes)
}
