//! Combat AI for SKIRMISH.
//!
//! Implements target selection, hostile and allied behavior arbitration,
//! and the boss escalation controller. Pure functions over plain data,
//! no ECS dependency.

pub mod boss;
pub mod decision;
pub mod targeting;

pub use skirmish_core as core;

#[cfg(test)]
mod tests;
