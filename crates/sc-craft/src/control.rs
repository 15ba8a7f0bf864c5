//! Cascaded guidance: velocity setpoint → acceleration, heading (and
//! optionally route track) setpoint → steering.
//!
//! # Loops
//!
//! ```text
//! acceleration = KP_A · (target_velocity − velocity)
//!
//! heading_ref  = target_heading                                (free flight)
//!              | route_heading(s + v·PURSUIT_TAU)
//!                + asin(clip(−KP_LATERAL · d / not_zero(v), ±1))  (on a route)
//! steering     = clip(KP_HEADING · wrap_to_pi(heading_ref − heading), ±MAX_STEERING_ANGLE)
//! ```
//!
//! `d` is the lateral distance from the assigned track; the asin term is
//! clipped to `±MAX_HEADING_COMMAND` so a craft far off its track turns in
//! at a bounded angle rather than perpendicular.  With neither a route nor
//! a target heading the craft holds its current heading.

use std::f64::consts::{FRAC_PI_3, FRAC_PI_4};

use log::debug;
use sc_core::{not_zero, wrap_to_pi};

use crate::action::{Action, HighLevelAction};
use crate::history::KinematicState;
use crate::route::Route;

/// Setpoints and optional route for a guided craft.
#[derive(Clone, Debug)]
pub struct Guidance {
    pub target_velocity: f64,
    target_heading:      Option<f64>,
    route:               Option<Route>,
    track:               usize,
}

impl Guidance {
    /// Velocity loop time constant, seconds.
    pub const TAU_A: f64 = 0.6;
    /// Heading loop time constant, seconds.
    pub const TAU_DS: f64 = 0.2;
    /// Look-ahead time for route heading.
    pub const PURSUIT_TAU: f64 = 1.5 * Self::TAU_DS;
    pub const KP_A: f64 = 1.0 / Self::TAU_A;
    pub const KP_HEADING: f64 = 1.0 / Self::TAU_DS;
    pub const KP_LATERAL: f64 = 2.0;
    pub const MAX_STEERING_ANGLE: f64 = FRAC_PI_3;
    pub const MAX_HEADING_COMMAND: f64 = FRAC_PI_4;
    /// Setpoint change per `Faster`/`Slower` intent, m/s.
    pub const DELTA_VELOCITY: f64 = 5.0;

    pub fn new(target_velocity: f64) -> Self {
        Self { target_velocity, target_heading: None, route: None, track: 0 }
    }

    pub fn with_target_heading(mut self, heading: f64) -> Self {
        self.target_heading = Some(heading);
        self
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.route = Some(route);
        self.track = 0;
        self
    }

    /// Start on `track`, clamped to the route's track count.
    pub fn on_track(mut self, track: usize) -> Self {
        let max = self.route.as_ref().map_or(0, |r| r.track_count() - 1);
        self.track = track.min(max);
        self
    }

    pub fn target_heading(&self) -> Option<f64> {
        self.target_heading
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn track(&self) -> usize {
        self.track
    }

    /// Update setpoints from a high-level intent.
    ///
    /// `Left`/`Right` are ignored without a route, at the outermost track,
    /// or when the neighbouring track is not reachable from `state`.
    pub fn apply(&mut self, intent: HighLevelAction, state: &KinematicState) {
        match intent {
            HighLevelAction::Faster => self.target_velocity += Self::DELTA_VELOCITY,
            HighLevelAction::Slower => self.target_velocity -= Self::DELTA_VELOCITY,
            HighLevelAction::Idle => {}
            HighLevelAction::Left | HighLevelAction::Right => {
                let Some(route) = &self.route else {
                    debug!("{intent} ignored: no route");
                    return;
                };
                let target = if intent == HighLevelAction::Left {
                    self.track.saturating_sub(1)
                } else {
                    (self.track + 1).min(route.track_count() - 1)
                };
                if target != self.track && route.is_reachable(state.position, target) {
                    self.track = target;
                } else {
                    debug!("{intent} ignored: track {target} not reachable from track {}", self.track);
                }
            }
        }
    }

    /// Proportional velocity loop.
    pub fn velocity_control(&self, velocity: f64) -> f64 {
        Self::KP_A * (self.target_velocity - velocity)
    }

    /// The heading the steering loop tracks, if any.
    pub fn heading_reference(&self, state: &KinematicState) -> Option<f64> {
        let Some(route) = &self.route else {
            return self.target_heading;
        };
        let coords = route.local_coordinates(state.position);
        let lateral_error = coords.lateral - route.track_offset(self.track);
        let future_heading =
            route.heading_at(coords.longitudinal + state.velocity * Self::PURSUIT_TAU);

        let lateral_velocity_command = -Self::KP_LATERAL * lateral_error;
        let heading_command = (lateral_velocity_command / not_zero(state.velocity))
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-Self::MAX_HEADING_COMMAND, Self::MAX_HEADING_COMMAND);
        Some(future_heading + heading_command)
    }

    /// Proportional heading loop, saturated to the steering limit.
    pub fn steering_control(&self, state: &KinematicState) -> f64 {
        let Some(reference) = self.heading_reference(state) else {
            return 0.0;
        };
        (Self::KP_HEADING * wrap_to_pi(reference - state.heading))
            .clamp(-Self::MAX_STEERING_ANGLE, Self::MAX_STEERING_ANGLE)
    }

    /// Actuation for the current state.
    pub fn actuation(&self, state: &KinematicState) -> Action {
        Action {
            steering:     self.steering_control(state),
            acceleration: self.velocity_control(state.velocity),
        }
    }
}
