//! Advent of Code puzzle solutions with automatic registration
//!
//! Each day lives in its own module under [`days`] and registers itself with
//! `#[derive(AutoRegisterSolution)]`. Linking this crate is enough for
//! `SolutionRegistryBuilder::register_all_plugins` to find them.
//!
//! Sample fixtures for every day are stored next to the real input in the
//! workspace `data/Day NN/` folders.

pub mod days;

