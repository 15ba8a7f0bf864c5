//! `sc-craft` — the simulated craft and everything that moves it.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`action`]    | `Action` (steering/acceleration), `HighLevelAction` intents      |
//! | [`history`]   | `KinematicState`, fixed-capacity `History` ring                  |
//! | [`craft`]     | `Craft`, `CraftKind` — kinematic integration and decision step   |
//! | [`control`]   | `Guidance` — cascaded velocity/heading/lateral controller        |
//! | [`route`]     | `Route` — waypoint polyline with parallel tracks                 |
//! | [`collision`] | `check_collision` — footprint overlap and crash response         |
//! | [`error`]     | `CraftError`, `CraftResult<T>`                                   |
//!
//! # Design notes
//!
//! Every craft shares one integration path ([`Craft::step`]) and one
//! collision path ([`check_collision`]).  The closed [`CraftKind`] set only
//! changes the decision step ([`Craft::act`]): plain craft keep whatever
//! actuation was queued, obstacles never actuate, and controlled or
//! autonomous craft derive actuation from their [`Guidance`] every call.

pub mod action;
pub mod collision;
pub mod control;
pub mod craft;
pub mod error;
pub mod history;
pub mod route;


pub use action::{Action, HighLevelAction};
pub use collision::check_collision;
pub use control::Guidance;
pub use craft::{Craft, CraftKind};
pub use error::{CraftError, CraftResult};
pub use history::{History, KinematicState};
pub use route::{Route, RouteCoordinates};
