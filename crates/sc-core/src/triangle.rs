//! Oriented isoceles footprints and the 2-D triangle overlap test.
//!
//! # Footprint geometry
//!
//! A craft of length `L` and width `W` centred at `c` with heading `h` is
//! approximated by the isoceles triangle
//!
//! ```text
//!   apex  = c + (2/3)·L·u
//!   left  = c - (1/3)·L·u + (W/2)·n
//!   right = c - (1/3)·L·u - (W/2)·n
//! ```
//!
//! where `u` is the unit heading vector and `n` its left-hand normal.  `c` is
//! therefore the triangle's centroid, and the vertex order above is
//! counter-clockwise for any positive `L` and `W`.
//!
//! # Overlap test
//!
//! Separating-edge test over the six edges of both triangles.  For each edge
//! of one triangle, if every vertex of the other lies on the outer side of
//! that edge, the triangles are disjoint.  If no such edge exists they
//! overlap.  The predicate runs the same twelve determinant checks whichever
//! triangle comes first, so it is symmetric.

use crate::error::{GeometryError, GeometryResult};
use crate::geo::Vec2;

// ── Triangle ──────────────────────────────────────────────────────────────────

/// Three vertices in the plane.  No winding is assumed until
/// [`Triangle::normalized`] has been applied.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle(pub [Vec2; 3]);

impl Triangle {
    #[inline]
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self([a, b, c])
    }

    /// Twice the signed area: positive for counter-clockwise winding.
    ///
    /// Equal to `det [[ax ay 1] [bx by 1] [cx cy 1]]`.
    #[inline]
    pub fn signed_area2(&self) -> f64 {
        let [a, b, c] = self.0;
        orient(a, b, c)
    }

    /// Return the triangle with counter-clockwise winding.
    ///
    /// A clockwise triangle has its last two vertices swapped when
    /// `allow_reversed` is set and is rejected otherwise.  Zero-area and
    /// non-finite triangles are always rejected.
    pub fn normalized(self, allow_reversed: bool) -> GeometryResult<Triangle> {
        if !self.0.iter().all(|v| v.is_finite()) {
            return Err(GeometryError::NonFiniteVertex);
        }
        let area2 = self.signed_area2();
        if area2 == 0.0 {
            return Err(GeometryError::DegenerateTriangle);
        }
        if area2 > 0.0 {
            return Ok(self);
        }
        if !allow_reversed {
            return Err(GeometryError::ReversedWinding(area2 * 0.5));
        }
        let [a, b, c] = self.0;
        Ok(Triangle([a, c, b]))
    }

    /// The three directed edges of a counter-clockwise triangle, in the
    /// order `(0,1)`, `(2,0)`, `(1,2)`.
    #[inline]
    fn edges(&self) -> [(Vec2, Vec2); 3] {
        let [a, b, c] = self.0;
        [(a, b), (c, a), (b, c)]
    }
}

/// `det [[ax ay 1] [bx by 1] [px py 1]]`: positive when `p` is left of `a→b`.
#[inline]
fn orient(a: Vec2, b: Vec2, p: Vec2) -> f64 {
    (b - a).cross(p - a)
}

// ── Options ───────────────────────────────────────────────────────────────────

/// Tuning for [`tri_tri_2d`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntersectOptions {
    /// Tolerance on the edge determinant.
    pub eps: f64,
    /// Repair clockwise input instead of rejecting it.
    pub allow_reversed: bool,
    /// Treat points exactly on an edge as colliding.
    pub on_boundary: bool,
}

impl Default for IntersectOptions {
    fn default() -> Self {
        Self { eps: 0.0, allow_reversed: false, on_boundary: true }
    }
}

// ── Overlap test ──────────────────────────────────────────────────────────────

/// `true` if triangles `t1` and `t2` overlap.
///
/// # Errors
///
/// [`GeometryError`] if either triangle is degenerate, non-finite, or
/// clockwise while `opts.allow_reversed` is `false`.
pub fn tri_tri_2d(t1: &Triangle, t2: &Triangle, opts: IntersectOptions) -> GeometryResult<bool> {
    let t1 = t1.normalized(opts.allow_reversed)?;
    let t2 = t2.normalized(opts.allow_reversed)?;
    Ok(!separated_by_edge_of(&t1, &t2, opts) && !separated_by_edge_of(&t2, &t1, opts))
}

/// Does some edge of `edges_of` have every vertex of `points_of` outside it?
fn separated_by_edge_of(edges_of: &Triangle, points_of: &Triangle, opts: IntersectOptions) -> bool {
    let outside = |d: f64| {
        if opts.on_boundary { d < opts.eps } else { d <= opts.eps }
    };
    edges_of.edges().iter().any(|&(a, b)| {
        points_of.0.iter().all(|&p| outside(orient(a, b, p)))
    })
}

// ── Footprint ─────────────────────────────────────────────────────────────────

/// An oriented craft outline: `(center, length, width, heading)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    pub center:  Vec2,
    pub length:  f64,
    pub width:   f64,
    pub heading: f64,
}

impl Footprint {
    #[inline]
    pub fn new(center: Vec2, length: f64, width: f64, heading: f64) -> Self {
        Self { center, length, width, heading }
    }

    /// The same footprint with length and width multiplied by `factor`.
    #[inline]
    pub fn scaled(self, factor: f64) -> Self {
        Self { length: self.length * factor, width: self.width * factor, ..self }
    }

    /// The same footprint with its center moved by `offset`.
    #[inline]
    pub fn translated(self, offset: Vec2) -> Self {
        Self { center: self.center + offset, ..self }
    }

    /// The isoceles bounding triangle, apex in the heading direction.
    pub fn triangle(&self) -> Triangle {
        let u = Vec2::from_angle(self.heading);
        let n = u.perp();
        let apex = self.center + u * (2.0 / 3.0 * self.length);
        let rear = self.center - u * (self.length / 3.0);
        let half_w = n * (self.width * 0.5);
        Triangle::new(apex, rear + half_w, rear - half_w)
    }

    /// Radius of the smallest centroid-centred circle enclosing the triangle.
    pub fn bounding_radius(&self) -> f64 {
        let apex = 2.0 / 3.0 * self.length;
        let corner = (self.length / 3.0).hypot(self.width * 0.5);
        apex.max(corner)
    }
}

/// `true` if two footprints overlap.
///
/// Footprints are counter-clockwise by construction; a mirrored one (from a
/// negative dimension) is repaired rather than rejected.  Boundary contact
/// counts as overlap.
pub fn triangles_intersect(a: &Footprint, b: &Footprint) -> GeometryResult<bool> {
    let opts = IntersectOptions { allow_reversed: true, ..IntersectOptions::default() };
    tri_tri_2d(&a.triangle(), &b.triangle(), opts)
}
