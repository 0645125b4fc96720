//! **pixpath-core** — geometry primitives shared by the pixpath search problems.
//!
//! [`Point`] addresses pixels as `(x, y)`, [`GridPos`] addresses weighted grid
//! tiles as `(row, col)`, and [`Range`] is the half-open rectangle both
//! problem variants use for bounds checks.

pub mod geom;

pub use geom::{GridPos, Point, Range};
