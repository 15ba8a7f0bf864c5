//! Planar vector type and scalar/angle helpers.
//!
//! Everything is `f64`: velocities saturate at an exact cap and headings are
//! accumulated over thousands of small steps, so single precision drifts
//! visibly within one episode.

use std::f64::consts::{PI, TAU};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Magnitude floor used by [`not_zero`].
pub const EPSILON: f64 = 0.1;

/// Return `x` unless it is within `EPSILON` of zero, in which case return
/// `±EPSILON` with the sign of `x`.  Zero itself maps to `-EPSILON`.
///
/// Used as a divisor guard wherever a speed appears in a denominator.
#[inline]
pub fn not_zero(x: f64) -> f64 {
    if x.abs() > EPSILON {
        x
    } else if x > 0.0 {
        EPSILON
    } else {
        -EPSILON
    }
}

/// Wrap an angle to `(-π, π]`.
///
/// Computed as `((x + π) mod 2π) - π` with Euclidean modulo so negative
/// inputs wrap the same way positive ones do.  The one value that formula
/// maps to `-π` is folded onto `+π`.
#[inline]
pub fn wrap_to_pi(x: f64) -> f64 {
    let wrapped = (x + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

// ── Vec2 ──────────────────────────────────────────────────────────────────────

/// A point or displacement in the simulation plane, in metres.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians from +x).
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self { x: c, y: s }
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 3-D cross product; positive when `other` lies
    /// counter-clockwise of `self`.
    #[inline]
    pub fn cross(self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// The vector rotated a quarter turn counter-clockwise.
    #[inline]
    pub fn perp(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        (other - self).length()
    }

    #[inline]
    pub fn distance_squared(self, other: Vec2) -> f64 {
        (other - self).length_squared()
    }

    /// Heading of this vector, in `(-π, π]`.
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl From<[f64; 2]> for Vec2 {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Vec2::new(x, y)
    }
}

impl From<Vec2> for [f64; 2] {
    #[inline]
    fn from(v: Vec2) -> Self {
        [v.x, v.y]
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
