use super::entity::{Food, Swimbot};
use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};

/// One generation of the world.
///
/// Both collections are append-only within a generation. A `None` slot is a
/// dead swimbot or an eaten pellet; its index stays reserved so that goals and
/// family records keep pointing at the right entry.
#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct Pond {
    /// Side length of the square arena, origin at (0, 0).
    pub width: f64,
    pub swimbots: Vec<Option<Swimbot>>,
    pub food: Vec<Option<Food>>,
}

impl Pond {
    #[must_use]
    pub fn new(width: f64) -> Self {
        Self {
            width,
            swimbots: Vec::new(),
            food: Vec::new(),
        }
    }

    /// Swimbot at `index`, `None` for dead or out-of-range slots.
    #[must_use]
    pub fn swimbot(&self, index: usize) -> Option<&Swimbot> {
        self.swimbots.get(index).and_then(Option::as_ref)
    }

    pub fn swimbot_mut(&mut self, index: usize) -> Option<&mut Swimbot> {
        self.swimbots.get_mut(index).and_then(Option::as_mut)
    }

    #[must_use]
    pub fn food_at(&self, index: usize) -> Option<&Food> {
        self.food.get(index).and_then(Option::as_ref)
    }

    /// Live swimbots with their indices, ascending.
    pub fn live_swimbots(&self) -> impl Iterator<Item = (usize, &Swimbot)> {
        self.swimbots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|bot| (i, bot)))
    }

    /// Uneaten food with its indices, ascending.
    pub fn live_food(&self) -> impl Iterator<Item = (usize, &Food)> {
        self.food
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|food| (i, food)))
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.swimbots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn food_count(&self) -> usize {
        self.food.iter().filter(|slot| slot.is_some()).count()
    }

    /// Appends a swimbot and returns its index.
    pub fn push_swimbot(&mut self, bot: Swimbot) -> usize {
        self.swimbots.push(Some(bot));
        self.swimbots.len() - 1
    }

    /// Appends a food pellet and returns its index.
    pub fn push_food(&mut self, food: Food) -> usize {
        self.food.push(Some(food));
        self.food.len() - 1
    }

    /// Empties a swimbot slot, returning the previous occupant.
    pub fn kill(&mut self, index: usize) -> Option<Swimbot> {
        self.swimbots.get_mut(index).and_then(Option::take)
    }

    /// Empties a food slot, returning the pellet if it was still there.
    pub fn consume_food(&mut self, index: usize) -> Option<Food> {
        self.food.get_mut(index).and_then(Option::take)
    }
}
