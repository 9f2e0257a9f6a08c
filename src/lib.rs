//! Swimbots: a generational evolution simulation of segmented swimmers.
//!
//! This crate ties the workspace together for the binaries and the
//! integration tests.

pub use swimbots_core as engine;
pub use swimbots_data as data;
pub use swimbots_io as io;

pub use swimbots_core::{
    clone_pond, simulate_pond, update_pond, History, MatingPreference, SimConfig, SimError,
    Simulation,
};
pub use swimbots_data::{Body, Food, Goal, Pond, Segment, Swimbot, Vec2};
