//! Core types and definitions for the SKIRMISH combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, configuration, input, snapshot views, events, and constants.
//! It has no dependency on the ECS runtime or any RNG.

pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod geom;
pub mod input;
pub mod state;
pub mod types;
