//! The simulated craft: kinematic state, pending actuation, crash flag.
//!
//! # Integration
//!
//! [`Craft::step`] is a forward-Euler single-track model:
//!
//! ```text
//! position += velocity · (cos h, sin h) · dt
//! heading  += velocity · tan(steering) / length · dt
//! velocity += acceleration · dt
//! ```
//!
//! Acceleration is clamped beforehand so the new velocity stays within
//! `±MAX_VELOCITY`; the velocity is clamped once more afterwards to absorb
//! rounding.  A crashed craft ignores its queued action and brakes with
//! `acceleration = −velocity`.

use log::trace;
use sc_core::{CraftId, Footprint, Vec2};

use crate::action::{Action, HighLevelAction};
use crate::collision;
use crate::control::Guidance;
use crate::error::{CraftError, CraftResult};
use crate::history::{History, KinematicState};

// ── CraftKind ─────────────────────────────────────────────────────────────────

/// The closed set of craft behaviours.
///
/// Only [`Craft::act`] branches on the kind; integration and collision are
/// identical for every variant.
#[derive(Clone, Debug)]
pub enum CraftKind {
    /// Keeps whatever actuation was last queued with [`Craft::set_action`].
    Plain,
    /// Stationary; never actuates.
    Obstacle,
    /// Guided craft driven by forwarded intents (the ego).
    Controlled(Guidance),
    /// Guided background craft; normally receives only `Idle`.
    Autonomous(Guidance),
}

impl CraftKind {
    pub fn guidance(&self) -> Option<&Guidance> {
        match self {
            CraftKind::Controlled(g) | CraftKind::Autonomous(g) => Some(g),
            CraftKind::Plain | CraftKind::Obstacle => None,
        }
    }

    pub fn guidance_mut(&mut self) -> Option<&mut Guidance> {
        match self {
            CraftKind::Controlled(g) | CraftKind::Autonomous(g) => Some(g),
            CraftKind::Plain | CraftKind::Obstacle => None,
        }
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self, CraftKind::Obstacle)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CraftKind::Plain         => "plain",
            CraftKind::Obstacle      => "obstacle",
            CraftKind::Controlled(_) => "controlled",
            CraftKind::Autonomous(_) => "autonomous",
        }
    }
}

// ── Craft ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Craft {
    id:                 CraftId,
    kind:               CraftKind,
    state:              KinematicState,
    action:             Action,
    crashed:            bool,
    length:             f64,
    width:              f64,
    collisions_enabled: bool,
    history:            History,
}

impl Craft {
    /// Speed limit, m/s.
    pub const MAX_VELOCITY: f64 = 70.0;
    /// Default footprint length, metres.
    pub const LENGTH: f64 = 9.0;
    /// Default footprint width, metres.
    pub const WIDTH: f64 = 4.0;
    /// Range random craft draw their initial velocity from.
    pub const DEFAULT_VELOCITIES: [f64; 2] = [50.0, 60.0];
    /// Footprints are shrunk by this factor before the triangle test.
    pub const COLLISION_SCALE: f64 = 0.9;

    fn with_kind(kind: CraftKind, position: Vec2, heading: f64, velocity: f64) -> Self {
        Self {
            id: CraftId::UNASSIGNED,
            kind,
            state: KinematicState::new(position, heading, velocity),
            action: Action::IDLE,
            crashed: false,
            length: Self::LENGTH,
            width: Self::WIDTH,
            collisions_enabled: true,
            history: History::default(),
        }
    }

    /// A plain craft with default dimensions.
    pub fn new(position: Vec2, heading: f64, velocity: f64) -> Self {
        Self::with_kind(CraftKind::Plain, position, heading, velocity)
    }

    /// A stationary square obstacle.
    pub fn obstacle(position: Vec2, heading: f64) -> Self {
        let mut craft = Self::with_kind(CraftKind::Obstacle, position, heading, 0.0);
        craft.length = Self::WIDTH;
        craft
    }

    pub fn controlled(position: Vec2, heading: f64, velocity: f64, guidance: Guidance) -> Self {
        Self::with_kind(CraftKind::Controlled(guidance), position, heading, velocity)
    }

    pub fn autonomous(position: Vec2, heading: f64, velocity: f64, guidance: Guidance) -> Self {
        Self::with_kind(CraftKind::Autonomous(guidance), position, heading, velocity)
    }

    /// A fresh craft with `other`'s kind, dimensions and kinematic state.
    ///
    /// The copy is unassigned, uncrashed, idle and has an empty history.
    pub fn create_from(other: &Craft) -> Self {
        Self {
            id: CraftId::UNASSIGNED,
            kind: other.kind.clone(),
            state: other.state,
            action: Action::IDLE,
            crashed: false,
            length: other.length,
            width: other.width,
            collisions_enabled: other.collisions_enabled,
            history: History::new(other.history.capacity()),
        }
    }

    /// Override the footprint dimensions.  Obstacles stay square.
    pub fn with_dimensions(mut self, length: f64, width: f64) -> CraftResult<Self> {
        let length = if self.kind.is_obstacle() { width } else { length };
        if !(length.is_finite() && length > 0.0 && width.is_finite() && width > 0.0) {
            return Err(CraftError::InvalidDimensions { length, width });
        }
        self.length = length;
        self.width = width;
        Ok(self)
    }

    /// Attach the handle the owning space knows this craft by.
    pub fn with_id(mut self, id: CraftId) -> Self {
        self.id = id;
        self
    }

    /// Check dimensions and state before the craft joins a space.
    pub fn validate(&self) -> CraftResult<()> {
        if !(self.length.is_finite() && self.length > 0.0 && self.width.is_finite() && self.width > 0.0)
        {
            return Err(CraftError::InvalidDimensions { length: self.length, width: self.width });
        }
        if !self.state.is_finite() {
            return Err(CraftError::NonFiniteState(self.id));
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline] pub fn id(&self) -> CraftId { self.id }
    #[inline] pub fn kind(&self) -> &CraftKind { &self.kind }
    #[inline] pub fn state(&self) -> &KinematicState { &self.state }
    #[inline] pub fn position(&self) -> Vec2 { self.state.position }
    #[inline] pub fn heading(&self) -> f64 { self.state.heading }
    #[inline] pub fn velocity(&self) -> f64 { self.state.velocity }
    #[inline] pub fn direction(&self) -> Vec2 { self.state.direction() }
    #[inline] pub fn action(&self) -> Action { self.action }
    #[inline] pub fn is_crashed(&self) -> bool { self.crashed }
    #[inline] pub fn length(&self) -> f64 { self.length }
    #[inline] pub fn width(&self) -> f64 { self.width }
    #[inline] pub fn history(&self) -> &History { &self.history }
    #[inline] pub fn collisions_enabled(&self) -> bool { self.collisions_enabled }

    pub fn set_collisions_enabled(&mut self, enabled: bool) {
        self.collisions_enabled = enabled;
    }

    pub fn guidance(&self) -> Option<&Guidance> {
        self.kind.guidance()
    }

    pub fn guidance_mut(&mut self) -> Option<&mut Guidance> {
        self.kind.guidance_mut()
    }

    /// The collision footprint at the current state.
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.state.position, self.length, self.width, self.state.heading)
    }

    // ── Decision ──────────────────────────────────────────────────────────

    /// Queue actuation for the next [`step`](Self::step).
    pub fn set_action(&mut self, action: Action) -> CraftResult<()> {
        if !action.is_finite() {
            return Err(CraftError::NonFiniteAction {
                steering:     action.steering,
                acceleration: action.acceleration,
            });
        }
        if self.kind.is_obstacle() {
            return Err(CraftError::ObstacleActuation(self.id));
        }
        self.action = action;
        Ok(())
    }

    /// Run the decision procedure.
    ///
    /// Guided craft apply `intent` (if any) to their setpoints and recompute
    /// actuation.  Plain craft and obstacles keep their queued action.
    pub fn act(&mut self, intent: Option<HighLevelAction>) -> CraftResult<()> {
        let state = self.state;
        let action = match &mut self.kind {
            CraftKind::Plain | CraftKind::Obstacle => return Ok(()),
            CraftKind::Controlled(guidance) | CraftKind::Autonomous(guidance) => {
                if let Some(intent) = intent {
                    guidance.apply(intent, &state);
                }
                guidance.actuation(&state)
            }
        };
        self.set_action(action)
    }

    // ── Integration ───────────────────────────────────────────────────────

    /// Advance the kinematic state by `dt` seconds.
    ///
    /// The state is left untouched when an error is returned.
    pub fn step(&mut self, dt: f64, record_history: bool) -> CraftResult<()> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(CraftError::InvalidTimeStep(dt));
        }
        if self.crashed {
            self.action = Action { steering: 0.0, acceleration: -self.state.velocity };
        }
        if !self.action.is_finite() {
            return Err(CraftError::NonFiniteAction {
                steering:     self.action.steering,
                acceleration: self.action.acceleration,
            });
        }

        let max = Self::MAX_VELOCITY;
        let KinematicState { position, heading, velocity } = self.state;
        let acceleration = self.action.acceleration.clamp((-max - velocity) / dt, (max - velocity) / dt);

        let next = KinematicState {
            position: position + self.state.velocity_vector() * dt,
            heading:  heading + velocity * self.action.steering.tan() / self.length * dt,
            velocity: (velocity + acceleration * dt).clamp(-max, max),
        };
        if !next.is_finite() {
            return Err(CraftError::NonFiniteState(self.id));
        }

        self.action.acceleration = acceleration;
        self.state = next;
        if record_history {
            self.history.push(next);
        }
        trace!("{} stepped to {} (v={:.3})", self.id, next.position, next.velocity);
        Ok(())
    }

    // ── Collision ─────────────────────────────────────────────────────────

    /// See [`collision::check_collision`].
    pub fn check_collision(&mut self, other: &mut Craft) -> CraftResult<bool> {
        collision::check_collision(self, other)
    }

    /// Set the post-impact velocity and latch the crash flag.
    pub(crate) fn crash_with_velocity(&mut self, velocity: f64) {
        self.state.velocity = velocity;
        self.crashed = true;
    }
}
