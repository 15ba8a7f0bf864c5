//! `sc-space` — the space aggregate and its tick loop.
//!
//! # Tick
//!
//! ```text
//! tick(dt):
//!   ① Act      — every craft runs its decision procedure, insertion order.
//!   ② Step     — every craft integrates by dt (parallel with `parallel`).
//!   ③ Collide  — every unordered pair (i, j), i < j, checked exactly once,
//!                in insertion order.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the integration phase on Rayon's thread pool.     |
//! | `fx-hash`  | FxHash for the `CraftId` → index map.                  |
//! | `serde`    | Propagates serde derives from `sc-core` and `sc-craft`.|
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sc_core::SimConfig;
//! use sc_space::{NoopObserver, SpaceBuilder};
//!
//! let config = SimConfig::default();
//! let mut space = SpaceBuilder::new(config.clone())
//!     .random_craft(config.craft_count)
//!     .build()?;
//! space.run_ticks(150, config.dt(), &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod proximity;
pub mod space;

#[cfg(test)]
mod tests;

pub use builder::SpaceBuilder;
pub use error::{SpaceError, SpaceResult};
pub use observer::{NoopObserver, SpaceObserver};
pub use proximity::ProximityIndex;
pub use space::{Collision, Space};
