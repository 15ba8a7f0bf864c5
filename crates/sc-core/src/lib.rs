//! `sc-core` — foundational types for the spacecraft simulation engine.
//!
//! This crate is a dependency of every other `sc-*` crate.  It intentionally
//! has no `sc-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `CraftId`                                                  |
//! | [`geo`]         | `Vec2`, `not_zero`, `wrap_to_pi`, `EPSILON`                |
//! | [`triangle`]    | `Footprint`, `Triangle`, `tri_tri_2d`, `triangles_intersect` |
//! | [`time`]        | `Tick`, `SimConfig`                                        |
//! | [`rng`]         | `SimRng` (seeded, cloneable)                               |
//! | [`error`]       | `CoreError`, `GeometryError`, result aliases               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod triangle;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult, GeometryError, GeometryResult};
pub use geo::{EPSILON, Vec2, not_zero, wrap_to_pi};
pub use ids::CraftId;
pub use rng::SimRng;
pub use time::{SimConfig, Tick};
pub use triangle::{Footprint, IntersectOptions, Triangle, tri_tri_2d, triangles_intersect};
