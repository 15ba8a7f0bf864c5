//! Pairwise collision detection and response.

use std::cmp::Ordering;

use log::debug;
use sc_core::triangles_intersect;

use crate::craft::Craft;
use crate::error::CraftResult;

/// Test `a` against `b` and, on contact, crash both.
///
/// Skipped when either craft has collisions disabled, either is already
/// crashed, or both carry the same assigned id.  A centre-distance
/// pre-filter against the longer of the two lengths runs before the
/// triangle test on footprints shrunk by [`Craft::COLLISION_SCALE`] and
/// centred on `a`.
///
/// On contact both craft take the velocity with the smaller magnitude
/// (the lower signed value on an exact tie) and are marked crashed.
/// Returns whether a collision happened.
pub fn check_collision(a: &mut Craft, b: &mut Craft) -> CraftResult<bool> {
    if !a.collisions_enabled() || !b.collisions_enabled() || a.is_crashed() || b.is_crashed() {
        return Ok(false);
    }
    if a.id().is_assigned() && a.id() == b.id() {
        return Ok(false);
    }
    if a.position().distance(b.position()) > a.length().max(b.length()) {
        return Ok(false);
    }

    // Tested relative to `a` so far-out craft keep full precision.
    let origin = -a.position();
    let fa = a.footprint().scaled(Craft::COLLISION_SCALE).translated(origin);
    let fb = b.footprint().scaled(Craft::COLLISION_SCALE).translated(origin);
    if !triangles_intersect(&fa, &fb)? {
        return Ok(false);
    }

    let velocity = settle_velocity(a.velocity(), b.velocity());
    a.crash_with_velocity(velocity);
    b.crash_with_velocity(velocity);
    debug!("{} and {} collided, both now at v={velocity:.3}", a.id(), b.id());
    Ok(true)
}

pub(crate) fn settle_velocity(va: f64, vb: f64) -> f64 {
    match va.abs().partial_cmp(&vb.abs()) {
        Some(Ordering::Less) => va,
        Some(Ordering::Greater) => vb,
        _ => va.min(vb),
    }
}
