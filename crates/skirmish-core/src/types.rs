//! Simulation time.

use serde::{Deserialize, Serialize};

use crate::constants::TICK_RATE;

/// Monotonic simulation clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Completed ticks since the engine was created.
    pub tick: u64,
    /// Elapsed simulated seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs = self.tick as f64 / TICK_RATE as f64;
    }
}
