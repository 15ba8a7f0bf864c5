//! Kinematic state snapshots and the bounded trajectory history.
//!
//! # Layout
//!
//! `History` is a fixed-capacity ring: slots are appended until `capacity`
//! is reached, then overwritten oldest-first.  `next` always points at the
//! slot the following push will write, so the newest entry sits just behind
//! it.  Iteration walks backwards from there, yielding most recent first.

use sc_core::Vec2;

/// Position, heading and velocity of a craft at one instant.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicState {
    pub position: Vec2,
    pub heading:  f64,
    pub velocity: f64,
}

impl KinematicState {
    #[inline]
    pub fn new(position: Vec2, heading: f64, velocity: f64) -> Self {
        Self { position, heading, velocity }
    }

    /// Unit vector along the heading.
    #[inline]
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.heading)
    }

    /// Velocity as a planar vector.
    #[inline]
    pub fn velocity_vector(&self) -> Vec2 {
        self.direction() * self.velocity
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.heading.is_finite() && self.velocity.is_finite()
    }
}

/// Fixed-capacity ring of recent [`KinematicState`]s, most recent first.
#[derive(Clone, Debug)]
pub struct History {
    slots:    Vec<KinematicState>,
    next:     usize,
    capacity: usize,
}

impl History {
    /// Default number of snapshots kept per craft.
    pub const DEFAULT_CAPACITY: usize = 30;

    pub fn new(capacity: usize) -> Self {
        Self { slots: Vec::with_capacity(capacity), next: 0, capacity }
    }

    /// Record `state` as the most recent entry, evicting the oldest once full.
    pub fn push(&mut self, state: KinematicState) {
        if self.capacity == 0 {
            return;
        }
        if self.slots.len() < self.capacity {
            self.slots.push(state);
        } else {
            self.slots[self.next] = state;
        }
        self.next = (self.next + 1) % self.capacity;
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&KinematicState> {
        self.iter().next()
    }

    /// Entries from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &KinematicState> + '_ {
        let len = self.slots.len();
        (0..len).map(move |i| &self.slots[(self.next + 2 * len - 1 - i) % len])
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.next = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
