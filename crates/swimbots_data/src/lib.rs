//! Core data structures for the Swimbots simulation.
//!
//! Everything here is plain owned data: a [`Pond`] owns its swimbots and food,
//! a [`Swimbot`] owns its genome and its [`Body`] arena. Cloning any of these
//! types yields a value that shares nothing with the original.

pub mod data;

pub use data::body::{Body, Segment};
pub use data::entity::{Food, Goal, Swimbot, Vec2};
pub use data::genome::{CommonGene, SegmentGene, SEGMENT_SLOTS, TRAIT_COUNT};
pub use data::pond::Pond;
