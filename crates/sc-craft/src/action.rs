//! Low-level actuation and high-level intents.

use std::fmt;

/// The actuation applied during integration.
///
/// `steering` is the front-wheel angle of the single-track model in radians;
/// `acceleration` is along the heading in m/s².
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub steering:     f64,
    pub acceleration: f64,
}

impl Action {
    /// No steering, no acceleration.
    pub const IDLE: Action = Action { steering: 0.0, acceleration: 0.0 };

    #[inline]
    pub fn new(steering: f64, acceleration: f64) -> Self {
        Self { steering, acceleration }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.steering.is_finite() && self.acceleration.is_finite()
    }
}

/// A discrete decision forwarded to a guided craft.
///
/// `Faster`/`Slower` move the velocity setpoint; `Left`/`Right` move the
/// lateral track setpoint and only have an effect on a craft following a
/// [`Route`][crate::Route].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HighLevelAction {
    Left,
    Idle,
    Right,
    Faster,
    Slower,
}

impl HighLevelAction {
    pub const ALL: [HighLevelAction; 5] = [
        HighLevelAction::Left,
        HighLevelAction::Idle,
        HighLevelAction::Right,
        HighLevelAction::Faster,
        HighLevelAction::Slower,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HighLevelAction::Left   => "LEFT",
            HighLevelAction::Idle   => "IDLE",
            HighLevelAction::Right  => "RIGHT",
            HighLevelAction::Faster => "FASTER",
            HighLevelAction::Slower => "SLOWER",
        }
    }
}

impl fmt::Display for HighLevelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
