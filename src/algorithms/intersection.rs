//! Intersections of half-planes and of convex polygons.
use num_traits::Zero;
use tracing::debug;

use crate::algorithms::convex_hull::{degenerate_hull, distinct_sorted, finish};
use crate::data::{prune_ring, HalfPlane, Point, Polygon, Vector};
use crate::{Error, Number};

/// The half-planes bounded by the edges of a convex polygon, one per edge,
/// each holding the polygon on its left. Either winding is accepted.
///
/// # Errors
///
/// - [`Violation::PolygonOpen`](crate::Violation::PolygonOpen) if the polygon
///   is open.
/// - [`Violation::ConvexViolation`](crate::Violation::ConvexViolation) if it is
///   not convex or has no area.
pub fn half_planes_of(poly: &Polygon) -> Result<Vec<HalfPlane>, Error> {
  Ok(ring_half_planes(&poly.ccw_convex_ring()?))
}

fn ring_half_planes(ring: &[Point]) -> Vec<HalfPlane> {
  let n = ring.len();
  (0..n)
    .map(|i| HalfPlane::left_of(&ring[i], &ring[(i + 1) % n]))
    .collect()
}

// A clipped ring is convex but may carry repeats or have collapsed onto a
// segment or a point. Collapsed rings become their extreme points, the way a
// degenerate hull does.
fn seal(ring: Vec<Point>) -> Polygon {
  match degenerate_hull(&distinct_sorted(&ring)) {
    Some(poly) => poly,
    None => finish(prune_ring(ring)),
  }
}

// True if some direction `v != 0` points into (or along) every half-plane, in
// which case a non-empty intersection is unbounded. The cone of such
// directions is bounded by boundary directions, so only those are tried.
fn has_recession_direction(planes: &[HalfPlane]) -> bool {
  let candidates = planes
    .iter()
    .map(|hp| &hp.boundary.direction)
    .filter(|d| !(d.0[0].is_zero() && d.0[1].is_zero()))
    .flat_map(|d| vec![d.clone(), -d.clone()]);
  let mut any = false;
  for v in candidates {
    any = true;
    if planes.iter().all(|hp| hp.boundary.direction.cross(&v) >= Number::zero()) {
      return true;
    }
  }
  // Only degenerate half-planes: the whole plane.
  !any
}

/// Intersection of closed half-planes.
///
/// A bounded intersection comes back as a closed counter-clockwise polygon
/// starting at its lowest vertex, without repeated or colinear vertices. An
/// intersection that is a segment or a single point comes back as a closed
/// polygon of two or one vertices. Inconsistent constraints and unbounded
/// intersections both give the empty polygon.
///
/// Runs in $O(n^2)$: the search box is sized from every pair of boundary
/// lines.
///
/// ```rust
/// # use planar_geom::algorithms::half_plane_intersection;
/// # use planar_geom::data::{HalfPlane, Point};
/// let p = |x: i64, y: i64| Point::from([x, y]);
/// let mut planes = vec![
///   HalfPlane::left_of(&p(0, 0), &p(1, 0)), // y >= 0
///   HalfPlane::left_of(&p(0, 2), &p(0, 1)), // x >= 0
/// ];
/// assert!(half_plane_intersection(&planes).is_empty());
/// planes.push(HalfPlane::left_of(&p(2, 0), &p(0, 2))); // x + y <= 2
/// let triangle = half_plane_intersection(&planes);
/// assert_eq!(triangle.as_slice(), &[p(0, 0), p(2, 0), p(0, 2)]);
/// ```
pub fn half_plane_intersection(planes: &[HalfPlane]) -> Polygon {
  if has_recession_direction(planes) {
    debug!(planes = planes.len(), "half-plane intersection: unbounded");
    return finish(vec![]);
  }

  // Every vertex of a bounded intersection is a crossing of two boundaries.
  let mut crossings = Vec::new();
  for (i, a) in planes.iter().enumerate() {
    for b in planes[i + 1..].iter() {
      if let Ok(pt) = a.boundary.intersection(&b.boundary) {
        crossings.push(pt);
      }
    }
  }
  let (lo, hi) = match bounds(&crossings) {
    Some(bounds) => bounds,
    None => return finish(vec![]),
  };
  let margin = Vector::from([1, 1]);
  let (lo, hi) = (&lo - &margin, &hi + &margin);
  let search_box = vec![
    lo.clone(),
    Point::new([hi[0].clone(), lo[1].clone()]),
    hi.clone(),
    Point::new([lo[0].clone(), hi[1].clone()]),
  ];

  let ring = planes
    .iter()
    .fold(search_box, |ring, hp| hp.clip(&ring));
  let result = seal(ring);
  debug!(
    planes = planes.len(),
    vertices = result.size(),
    "half-plane intersection"
  );
  result
}

// Lower-left and upper-right corners of the bounding box.
fn bounds(pts: &[Point]) -> Option<(Point, Point)> {
  let first = pts.first()?;
  let (mut lo, mut hi) = (first.array.clone(), first.array.clone());
  for pt in pts.iter() {
    for axis in 0..2 {
      if pt[axis] < lo[axis] {
        lo[axis] = pt[axis].clone();
      }
      if pt[axis] > hi[axis] {
        hi[axis] = pt[axis].clone();
      }
    }
  }
  Some((Point::new(lo), Point::new(hi)))
}

/// Intersection of two convex polygons of either winding.
///
/// The result has the same shape as [`half_plane_intersection`]: a closed
/// counter-clockwise polygon, two vertices when the inputs only share an edge
/// or part of one, one vertex when they touch at a corner, and empty when
/// they are disjoint.
///
/// # Errors
///
/// - [`Violation::PolygonOpen`](crate::Violation::PolygonOpen) if either
///   polygon is open.
/// - [`Violation::ConvexViolation`](crate::Violation::ConvexViolation) if
///   either polygon is not convex or has no area.
pub fn convex_polygon_intersection(a: &Polygon, b: &Polygon) -> Result<Polygon, Error> {
  let ring_a = a.ccw_convex_ring()?;
  let ring_b = b.ccw_convex_ring()?;
  let ring = ring_half_planes(&ring_b)
    .iter()
    .fold(ring_a, |ring, hp| hp.clip(&ring));
  let result = seal(ring);
  debug!(vertices = result.size(), "convex polygon intersection");
  Ok(result)
}
