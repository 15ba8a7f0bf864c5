//! Space observer trait for progress reporting and data collection.

use sc_core::{CraftId, Tick};

use crate::Space;

/// Callbacks invoked by [`Space::run_ticks`][crate::Space::run_ticks] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — crash reporter
///
/// ```rust,ignore
/// struct CrashReporter;
///
/// impl SpaceObserver for CrashReporter {
///     fn on_collision(&mut self, tick: Tick, a: CraftId, b: CraftId) {
///         println!("{tick}: {a} hit {b}");
///     }
/// }
/// ```
pub trait SpaceObserver {
    /// Called at the very start of each tick, before the act phase.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per pair that collided during the tick, in pair order.
    fn on_collision(&mut self, _tick: Tick, _a: CraftId, _b: CraftId) {}

    /// Called at the end of each tick with the number of crashed craft.
    fn on_tick_end(&mut self, _tick: Tick, _crashed: usize) {}

    /// Called after every tick with read-only access to the whole space.
    fn on_snapshot(&mut self, _tick: Tick, _space: &Space) {}

    /// Called once after the final tick completes.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`SpaceObserver`] that does nothing.
pub struct NoopObserver;

impl SpaceObserver for NoopObserver {}
