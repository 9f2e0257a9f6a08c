//! Core data structures for the Swimbots simulation.

pub mod body;
pub mod entity;
pub mod genome;
pub mod pond;
