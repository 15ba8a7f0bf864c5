//! Plain data row types written by output backends.

/// One craft's state at the end of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CraftSnapshotRow {
    pub craft_id:     u32,
    pub tick:         u64,
    /// `"plain"`, `"controlled"` or `"autonomous"`.  Obstacles are not
    /// written.
    pub kind:         &'static str,
    pub x:            f64,
    pub y:            f64,
    pub heading:      f64,
    pub velocity:     f64,
    pub steering:     f64,
    pub acceleration: f64,
    pub crashed:      bool,
}

/// Summary statistics for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    /// Simulated seconds at the end of the tick.
    pub time_secs:     f64,
    /// Craft crashed so far (monotonic).
    pub crashed_craft: u64,
    /// Collisions that happened during this tick.
    pub collisions:    u64,
}
