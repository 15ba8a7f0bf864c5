//! Fluent builder for constructing a [`Space`].

use std::f64::consts::PI;

use log::info;
use sc_core::{SimConfig, SimRng, Vec2};
use sc_craft::{Craft, Guidance};

use crate::{Space, SpaceError, SpaceResult};

/// Fluent builder for [`Space`].
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                               |
/// |----------------------|---------------------------------------|
/// | `.craft(c)`          | No hand-placed craft                  |
/// | `.random_craft(n)`   | No random craft                       |
/// | `.area(side)`        | [`SpaceBuilder::DEFAULT_AREA`] metres |
///
/// Hand-placed craft are added first, in call order; random craft follow.
///
/// # Example
///
/// ```rust,ignore
/// let space = SpaceBuilder::new(config)
///     .craft(Craft::controlled(Vec2::ZERO, 0.0, 55.0, Guidance::new(55.0)))
///     .random_craft(3)
///     .build()?;
/// ```
pub struct SpaceBuilder {
    config: SimConfig,
    craft:  Vec<Craft>,
    random: usize,
    area:   f64,
}

impl SpaceBuilder {
    /// Side of the square random craft are placed in, centred on the origin.
    pub const DEFAULT_AREA: f64 = 200.0;

    /// Placement draws per random craft before giving up.
    const MAX_PLACEMENT_ATTEMPTS: usize = 1_000;

    pub fn new(config: SimConfig) -> Self {
        Self { config, craft: Vec::new(), random: 0, area: Self::DEFAULT_AREA }
    }

    /// Add a hand-placed craft.
    pub fn craft(mut self, craft: Craft) -> Self {
        self.craft.push(craft);
        self
    }

    /// Add `n` autonomous craft at random positions and headings, with
    /// velocities drawn from [`Craft::DEFAULT_VELOCITIES`].
    pub fn random_craft(mut self, n: usize) -> Self {
        self.random += n;
        self
    }

    /// Side length of the square random craft are placed in.
    pub fn area(mut self, side: f64) -> Self {
        self.area = side;
        self
    }

    /// Validate the configuration, place all craft, and return the space.
    pub fn build(self) -> SpaceResult<Space> {
        self.config.validate()?;
        if !(self.area.is_finite() && self.area > 0.0) {
            return Err(SpaceError::Config(format!("area {} must be positive", self.area)));
        }

        let mut space = Space::new(SimRng::new(self.config.seed));
        space.record_history = self.config.record_history;

        for craft in self.craft {
            space.add(craft)?;
        }

        let half = self.area / 2.0;
        let [low, high] = Craft::DEFAULT_VELOCITIES;
        for n in 0..self.random {
            let position = place(&mut space, half).ok_or_else(|| {
                SpaceError::Config(format!(
                    "could not place random craft {} of {} in a {}m area",
                    n + 1,
                    self.random,
                    self.area
                ))
            })?;
            let rng = space.rng_mut();
            let heading = rng.gen_range(-PI..PI);
            let velocity = rng.gen_range(low..=high);
            space.add(Craft::autonomous(position, heading, velocity, Guidance::new(velocity)))?;
        }

        info!(
            "space built: {} craft ({} random), seed {}",
            space.len(),
            self.random,
            self.config.seed
        );
        Ok(space)
    }
}

/// Draw a position at least one craft length from every existing craft.
fn place(space: &mut Space, half: f64) -> Option<Vec2> {
    for _ in 0..SpaceBuilder::MAX_PLACEMENT_ATTEMPTS {
        let rng = space.rng_mut();
        let candidate = Vec2::new(rng.gen_range(-half..=half), rng.gen_range(-half..=half));
        if space.iter().all(|c| c.position().distance(candidate) >= Craft::LENGTH) {
            return Some(candidate);
        }
    }
    None
}
