//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one
//! integration step of `1 / simulation_frequency` seconds:
//!
//!   elapsed_secs = tick / simulation_frequency
//!
//! Decisions (high-level actions forwarded to the ego craft) happen at the
//! slower `policy_frequency`, so one decision step spans
//! `simulation_frequency / policy_frequency` ticks.

use std::fmt;

use crate::error::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Built in code by the application (or deserialised by it with the `serde`
/// feature) and passed to the space builder and episode loop.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Integration steps per simulated second.  Default: 15.
    pub simulation_frequency: u32,

    /// Decisions per simulated second.  Must divide `simulation_frequency`
    /// evenly.  Default: 1.
    pub policy_frequency: u32,

    /// Episode length in decision steps.  Default: 40.
    pub duration: u64,

    /// Number of background craft created around the ego craft.  Default: 2.
    pub craft_count: usize,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Keep per-craft trajectory history for rendering.
    pub record_history: bool,

    /// Radius used when building a simplified view around the ego craft.
    pub perception_distance: f64,

    /// Reward applied when the ego craft crashes.
    pub collision_reward: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            simulation_frequency: 15,
            policy_frequency:     1,
            duration:             40,
            craft_count:          2,
            seed:                 0,
            record_history:       false,
            perception_distance:  6.0,
            collision_reward:     -100.0,
        }
    }
}

impl SimConfig {
    /// Integration step length in seconds.
    #[inline]
    pub fn dt(&self) -> f64 {
        1.0 / self.simulation_frequency as f64
    }

    /// Ticks per decision step.
    #[inline]
    pub fn steps_per_decision(&self) -> u64 {
        (self.simulation_frequency / self.policy_frequency.max(1)) as u64
    }

    /// Reject configurations the episode loop cannot run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.simulation_frequency == 0 {
            return Err(CoreError::Config("simulation_frequency must be positive".into()));
        }
        if self.policy_frequency == 0 || self.policy_frequency > self.simulation_frequency {
            return Err(CoreError::Config(format!(
                "policy_frequency {} must be in 1..={}",
                self.policy_frequency, self.simulation_frequency
            )));
        }
        if !self.simulation_frequency.is_multiple_of(self.policy_frequency) {
            return Err(CoreError::Config(format!(
                "policy_frequency {} does not divide simulation_frequency {}",
                self.policy_frequency, self.simulation_frequency
            )));
        }
        if !(self.perception_distance.is_finite() && self.perception_distance > 0.0) {
            return Err(CoreError::Config("perception_distance must be positive".into()));
        }
        Ok(())
    }
}
