use num_traits::Zero;

use super::{degenerate_hull, distinct_sorted, finish};
use crate::data::{Point, Polygon};
use crate::Number;

// https://en.wikipedia.org/wiki/Quickhull

/// Convex hull of a set of points by divide and conquer.
///
/// The leftmost and rightmost points split the set in two. On each side the
/// point farthest from the dividing line is a hull vertex. Points inside the
/// triangle it forms are discarded and the two outer remainders are handled
/// recursively.
///
/// # Time complexity
/// $O(n \log n)$ expected, $O(n^2)$ worst case.
///
/// # Examples
///
/// ```rust
/// # use planar_geom::algorithms::convex_hull::quickhull::convex_hull;
/// # use planar_geom::data::Point;
/// let pts = vec![
///   Point::from([0, 0]),
///   Point::from([5, 1]),
///   Point::from([10, 0]),
///   Point::from([5, 8]),
///   Point::from([5, -8]),
/// ];
/// assert_eq!(convex_hull(&pts).size(), 4);
/// ```
pub fn convex_hull(points: &[Point]) -> Polygon {
  let pts = distinct_sorted(points);
  if let Some(hull) = degenerate_hull(&pts) {
    return hull;
  }
  let (leftmost, rightmost) = match (pts.first(), pts.last()) {
    (Some(l), Some(r)) => (l, r),
    _ => return finish(pts),
  };

  let all: Vec<&Point> = pts.iter().collect();
  let below = right_of(&all, leftmost, rightmost);
  let above = right_of(&all, rightmost, leftmost);

  let mut hull = vec![leftmost.clone()];
  find_hull(&below, leftmost, rightmost, &mut hull);
  hull.push(rightmost.clone());
  find_hull(&above, rightmost, leftmost, &mut hull);
  finish(hull)
}

// Twice the signed area of the triangle p, q, x. Negative when x is to the
// right of p->q.
fn cross(p: &Point, q: &Point, x: &Point) -> Number {
  (q - p).cross(&(x - p))
}

fn right_of<'a>(pts: &[&'a Point], p: &Point, q: &Point) -> Vec<&'a Point> {
  pts
    .iter()
    .copied()
    .filter(|x| p.orientation(q, x).is_cw())
    .collect()
}

// Push the hull vertices strictly between p and q in counter-clockwise
// order. Every point in `pts` is strictly to the right of p->q.
fn find_hull(pts: &[&Point], p: &Point, q: &Point, hull: &mut Vec<Point>) {
  // Of equally distant points take the one farthest from p. It is an
  // extreme of the points on that parallel line.
  let farthest = pts.iter().copied().max_by(|a, b| {
    let da = -cross(p, q, a);
    let db = -cross(p, q, b);
    da.cmp(&db).then_with(|| p.cmp_distance_to(a, b))
  });
  let c = match farthest {
    Some(c) => c,
    None => return,
  };
  debug_assert!(cross(p, q, c) < Number::zero());
  let outside_pc = right_of(pts, p, c);
  let outside_cq = right_of(pts, c, q);
  find_hull(&outside_pc, p, c, hull);
  hull.push(c.clone());
  find_hull(&outside_cq, c, q, hull);
}
