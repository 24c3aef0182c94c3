// #![deny(warnings)]
#![deny(clippy::cast_lossless)]
#![doc(test(no_crate_inject))]
//! Exact planar geometry.
//!
//! Every predicate in this crate is evaluated over [`Number`], an arbitrary
//! precision rational. Orientation and in-circle signs are therefore never
//! approximated, and constructed points (circumcenters, clip intersections)
//! are exact as well.
//!
//! ```rust
//! # use planar_geom::data::Point;
//! # use planar_geom::algorithms::voronoi;
//! let sites = vec![Point::from([0, 0]), Point::from([6, 0]), Point::from([2, 4])];
//! let diagram = voronoi(&sites);
//! assert_eq!(diagram.vertices.len(), 1);
//! assert_eq!(diagram.edges.iter().filter(|e| e.is_unbounded()).count(), 3);
//! ```
use num_rational::BigRational;
use num_traits::float::FloatCore;

pub mod algorithms;
pub mod data;
mod orientation;

pub use orientation::{in_circumcircle, Orientation};

/// Coordinate type used throughout the crate.
pub type Number = BigRational;

/// Every way an input can violate a geometric precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
  #[error("insufficient vertices")]
  InsufficientVertices,
  /// An operation on pairs of points got fewer than two points.
  #[error("at least two points are required")]
  InsufficientPoints,
  #[error("self intersections")]
  SelfIntersections,
  #[error("polygon is already closed")]
  PolygonClosed,
  #[error("polygon is not closed")]
  PolygonOpen,
  /// The polygon turns both left and right, or has no area at all.
  #[error("convex violation")]
  ConvexViolation,
  #[error("clockwise violation")]
  ClockWiseViolation,
  #[error("two or more points are colinear and no valid solution exists")]
  CoLinearViolation,
  #[error("lines are parallel")]
  ParallelLines,
  #[error("coordinate is NaN or infinite")]
  NonFiniteCoordinate,
  #[error("site lies outside the clip polygon")]
  SiteOutsideClip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
  #[error("invalid geometry: {0}")]
  InvalidGeometry(#[from] Violation),
}

impl Error {
  pub fn violation(&self) -> Violation {
    match self {
      Error::InvalidGeometry(violation) => *violation,
    }
  }
}

pub(crate) fn float_to_rational(f: impl FloatCore) -> Result<Number, Error> {
  BigRational::from_float(f).ok_or(Error::InvalidGeometry(Violation::NonFiniteCoordinate))
}

pub(crate) fn rational_to_f64(n: &Number) -> f64 {
  use num_traits::ToPrimitive;
  n.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
pub mod testing;

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;

  #[test]
  fn float_conversion_is_exact() {
    let n = float_to_rational(0.1_f64).unwrap();
    assert_ne!(n, BigRational::new(1.into(), 10.into()));
    assert_eq!(rational_to_f64(&n), 0.1);
  }

  #[test]
  fn non_finite_floats_are_rejected() {
    assert_eq!(
      float_to_rational(f64::NAN).err(),
      Some(Error::InvalidGeometry(Violation::NonFiniteCoordinate))
    );
    assert_eq!(
      float_to_rational(f64::INFINITY).map_err(|e| e.violation()),
      Err(Violation::NonFiniteCoordinate)
    );
  }

  #[test]
  fn error_display() {
    let err: Error = Violation::PolygonOpen.into();
    assert_eq!(err.to_string(), "invalid geometry: polygon is not closed");
  }
}
