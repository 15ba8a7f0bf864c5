//! Core error types.
//!
//! Sub-crates define their own error enums and wrap these via `#[from]`
//! variants, so a geometry failure deep in a collision check surfaces at the
//! space level without manual mapping.

use thiserror::Error;

/// Rejected triangle input for [`tri_tri_2d`][crate::tri_tri_2d].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("triangle has clockwise winding (signed area {0})")]
    ReversedWinding(f64),

    #[error("triangle is degenerate (zero area)")]
    DegenerateTriangle,

    #[error("triangle vertex is not finite")]
    NonFiniteVertex,
}

/// The top-level error type for `sc-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

pub type GeometryResult<T> = Result<T, GeometryError>;

/// Shorthand result type for `sc-core`.
pub type CoreResult<T> = Result<T, CoreError>;
