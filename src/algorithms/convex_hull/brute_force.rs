use std::collections::BTreeMap;

use super::{degenerate_hull, distinct_sorted, finish};
use crate::data::{Point, Polygon};
use crate::Orientation;

/// $O(n^3)$ Convex hull of a set of points.
///
/// An ordered pair `(p, q)` is a hull edge iff no point lies to the right of
/// `p -> q` and every point on the line lies between `p` and `q`. The edges are
/// then chained into a ring. Meant as a reference for the faster algorithms.
pub fn convex_hull(points: &[Point]) -> Polygon {
  let pts = distinct_sorted(points);
  if let Some(hull) = degenerate_hull(&pts) {
    return hull;
  }

  let mut next: BTreeMap<&Point, &Point> = BTreeMap::new();
  for p in pts.iter() {
    for q in pts.iter() {
      if p == q {
        continue;
      }
      let is_edge = pts.iter().all(|r| match p.orientation(q, r) {
        Orientation::CounterClockWise => true,
        Orientation::ClockWise => false,
        Orientation::CoLinear => r.is_between(p, q),
      });
      if is_edge {
        next.insert(p, q);
      }
    }
  }

  let start = match next.keys().next() {
    Some(&start) => start,
    None => return finish(pts),
  };
  let mut hull = vec![start.clone()];
  let mut cursor = start;
  while let Some(&succ) = next.get(cursor) {
    if succ == start || hull.len() > next.len() {
      break;
    }
    hull.push(succ.clone());
    cursor = succ;
  }
  finish(hull)
}
