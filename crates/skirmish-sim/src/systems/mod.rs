//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for
//! read-only). They do not own state — all state lives in components or
//! is threaded through by the engine.

pub mod ai;
pub mod boss;
pub mod cleanup;
pub mod collision;
pub mod firing;
pub mod movement;
pub mod reconcile;
pub mod shield;
pub mod snapshot;
