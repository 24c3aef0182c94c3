use tracing::debug;

use crate::data::{Point, Polygon};
use crate::Error;

pub mod brute_force;
pub mod gift_wrapping;
pub mod graham_scan;
pub mod monotone_chain;
pub mod quickhull;

/// Anything that maps a point set to its convex hull.
///
/// Implemented for every `Fn(&[Point]) -> Polygon`, which includes all the
/// `convex_hull` functions in the submodules.
///
/// ```rust
/// # use planar_geom::algorithms::convex_hull::{quickhull, ConvexHull};
/// # use planar_geom::data::Point;
/// let pts = vec![Point::from([0, 0]), Point::from([2, 0]), Point::from([1, 3])];
/// let hull = quickhull::convex_hull.convex_hull(&pts);
/// assert_eq!(hull.size(), 3);
/// ```
pub trait ConvexHull {
  fn convex_hull(&self, points: &[Point]) -> Polygon;
}

impl<F> ConvexHull for F
where
  F: Fn(&[Point]) -> Polygon,
{
  fn convex_hull(&self, points: &[Point]) -> Polygon {
    self(points)
  }
}

/// Selects one of the interchangeable hull algorithms. Every variant returns
/// exactly the same polygon for the same input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HullAlgorithm {
  /// $O(n \log n)$ sweep over the sorted points.
  #[default]
  MonotoneChain,
  /// $O(n \log n)$ angular scan around the lowest point.
  GrahamScan,
  /// Divide and conquer on the farthest point from a dividing line.
  QuickHull,
  /// $O(nh)$ for `h` hull vertices.
  GiftWrapping,
  /// $O(n^3)$. Only useful as a reference.
  BruteForce,
}

impl HullAlgorithm {
  pub const ALL: [HullAlgorithm; 5] = [
    HullAlgorithm::MonotoneChain,
    HullAlgorithm::GrahamScan,
    HullAlgorithm::QuickHull,
    HullAlgorithm::GiftWrapping,
    HullAlgorithm::BruteForce,
  ];

  pub fn as_fn(self) -> fn(&[Point]) -> Polygon {
    match self {
      HullAlgorithm::MonotoneChain => monotone_chain::convex_hull,
      HullAlgorithm::GrahamScan => graham_scan::convex_hull,
      HullAlgorithm::QuickHull => quickhull::convex_hull,
      HullAlgorithm::GiftWrapping => gift_wrapping::convex_hull,
      HullAlgorithm::BruteForce => brute_force::convex_hull,
    }
  }

  pub fn hull(self, points: &[Point]) -> Polygon {
    debug!(algorithm = ?self, points = points.len(), "convex hull");
    self.as_fn().convex_hull(points)
  }
}

/// Convex hull of the vertices of a closed polygon.
///
/// # Errors
///
/// [`Violation::PolygonOpen`](crate::Violation::PolygonOpen) if the polygon
/// has not been closed.
pub fn hull_of_polygon(poly: &Polygon) -> Result<Polygon, Error> {
  poly.require_closed()?;
  Ok(HullAlgorithm::default().hull(poly.as_slice()))
}

// Lexicographically sorted, without repeats.
pub(crate) fn distinct_sorted(points: &[Point]) -> Vec<Point> {
  let mut pts = points.to_vec();
  pts.sort_unstable();
  pts.dedup();
  pts
}

// Hulls of fewer than three distinct points or of colinear points are
// degenerate: the distinct points themselves, or the two extremes.
// Expects the output of `distinct_sorted`.
pub(crate) fn degenerate_hull(pts: &[Point]) -> Option<Polygon> {
  match pts {
    [] | [_] | [_, _] => Some(finish(pts.to_vec())),
    [first, .., last] => {
      if pts.iter().all(|pt| first.orientation(last, pt).is_colinear()) {
        Some(finish(vec![first.clone(), last.clone()]))
      } else {
        None
      }
    }
  }
}

// Rotate a counter-clockwise ring so that it starts at its lowest vertex
// (minimum y, then minimum x) and seal it.
pub(crate) fn finish(mut ring: Vec<Point>) -> Polygon {
  let start = ring
    .iter()
    .enumerate()
    .min_by(|(_, a), (_, b)| (a.y_coord(), a.x_coord()).cmp(&(b.y_coord(), b.x_coord())))
    .map(|(idx, _)| idx)
    .unwrap_or(0);
  ring.rotate_left(start);
  Polygon::new_closed_unchecked(ring)
}
