//! Waypoint polylines with parallel tracks.
//!
//! A [`Route`] is a centerline through two or more waypoints.  Track `i`
//! runs parallel to it at lateral offset `-i · track_spacing`, so track 0 is
//! the centerline and higher indices lie to the right of travel.  Guided
//! craft follow one track; `Left`/`Right` intents move between neighbours.

use sc_core::Vec2;

use crate::error::{CraftError, CraftResult};

/// Position of a point relative to a [`Route`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RouteCoordinates {
    /// Arc length along the centerline.  May fall outside `[0, length]` when
    /// the point projects past either end.
    pub longitudinal: f64,
    /// Signed distance from the centerline, positive to the left of travel.
    pub lateral: f64,
    /// Index of the segment the point was projected onto.
    pub segment: usize,
}

#[derive(Clone, Debug)]
pub struct Route {
    waypoints:     Vec<Vec2>,
    /// `cumulative[i]` is the arc length at `waypoints[i]`.
    cumulative:    Vec<f64>,
    track_count:   usize,
    track_spacing: f64,
}

impl Route {
    pub const DEFAULT_TRACK_SPACING: f64 = 4.0;

    /// A single-track route through `waypoints`.
    ///
    /// # Errors
    ///
    /// Fewer than two waypoints, a non-finite waypoint, or two consecutive
    /// coincident waypoints.
    pub fn new(waypoints: Vec<Vec2>) -> CraftResult<Self> {
        if waypoints.len() < 2 {
            return Err(CraftError::InvalidRoute(format!(
                "need at least 2 waypoints, got {}",
                waypoints.len()
            )));
        }
        if let Some(bad) = waypoints.iter().find(|w| !w.is_finite()) {
            return Err(CraftError::InvalidRoute(format!("non-finite waypoint {bad}")));
        }

        let mut cumulative = Vec::with_capacity(waypoints.len());
        let mut total = 0.0;
        cumulative.push(total);
        for pair in waypoints.windows(2) {
            let len = pair[0].distance(pair[1]);
            if len <= 0.0 {
                return Err(CraftError::InvalidRoute(format!(
                    "coincident consecutive waypoints at {}",
                    pair[0]
                )));
            }
            total += len;
            cumulative.push(total);
        }

        Ok(Self {
            waypoints,
            cumulative,
            track_count: 1,
            track_spacing: Self::DEFAULT_TRACK_SPACING,
        })
    }

    /// Straight route from `start` heading `heading` for `length` metres.
    pub fn straight(start: Vec2, heading: f64, length: f64) -> CraftResult<Self> {
        Self::new(vec![start, start + Vec2::from_angle(heading) * length])
    }

    /// Give the route `count` parallel tracks `spacing` metres apart.
    pub fn with_tracks(mut self, count: usize, spacing: f64) -> CraftResult<Self> {
        if count == 0 || !(spacing.is_finite() && spacing > 0.0) {
            return Err(CraftError::InvalidRoute(format!(
                "track count {count} / spacing {spacing} must be positive"
            )));
        }
        self.track_count = count;
        self.track_spacing = spacing;
        Ok(self)
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn track_count(&self) -> usize {
        self.track_count
    }

    pub fn track_spacing(&self) -> f64 {
        self.track_spacing
    }

    /// Total centerline length.
    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Lateral offset of `track` from the centerline.
    pub fn track_offset(&self, track: usize) -> f64 {
        -(track as f64) * self.track_spacing
    }

    /// Project `point` onto the nearest centerline segment.
    pub fn local_coordinates(&self, point: Vec2) -> RouteCoordinates {
        let mut best = RouteCoordinates { longitudinal: 0.0, lateral: 0.0, segment: 0 };
        let mut best_dist = f64::INFINITY;

        for (i, pair) in self.waypoints.windows(2).enumerate() {
            let (a, b) = (pair[0], pair[1]);
            let seg_len = self.cumulative[i + 1] - self.cumulative[i];
            let u = (b - a) * (1.0 / seg_len);
            let rel = point - a;
            let along = rel.dot(u);
            let closest = a + u * along.clamp(0.0, seg_len);
            let dist = point.distance_squared(closest);
            if dist < best_dist {
                best_dist = dist;
                best = RouteCoordinates {
                    longitudinal: self.cumulative[i] + along,
                    lateral:      u.cross(rel),
                    segment:      i,
                };
            }
        }
        best
    }

    /// Heading of the centerline at arc length `s`, clamped to the route ends.
    pub fn heading_at(&self, s: f64) -> f64 {
        let last = self.waypoints.len() - 2;
        let segment = self.cumulative[1..]
            .iter()
            .position(|&end| s < end)
            .unwrap_or(last)
            .min(last);
        (self.waypoints[segment + 1] - self.waypoints[segment]).angle()
    }

    /// Whether a craft at `point` can reasonably move onto `track`: within
    /// two track spacings laterally and alongside the route.
    pub fn is_reachable(&self, point: Vec2, track: usize) -> bool {
        if track >= self.track_count {
            return false;
        }
        let coords = self.local_coordinates(point);
        (coords.lateral - self.track_offset(track)).abs() <= 2.0 * self.track_spacing
            && (0.0..=self.length()).contains(&coords.longitudinal)
    }
}
