use super::{degenerate_hull, distinct_sorted, finish};
use crate::data::{Point, Polygon};

// https://en.wikibooks.org/wiki/Algorithm_Implementation/Geometry/Convex_hull/Monotone_chain

/// $O(n \log n)$ Convex hull of a set of points.
///
/// Andrew's monotone chain: sort the points lexicographically, then build the
/// lower and upper chains with a stack, popping every vertex that does not make
/// a strict left turn.
///
/// # Properties
/// * No points from the input set will be outside the returned polygon.
/// * All vertices in the returned polygon are from the input set.
/// * The polygon is closed, counter-clockwise, starts at its lowest vertex and
///   has no colinear vertices.
/// * Fewer than three distinct points, or only colinear points, give a closed
///   polygon of the distinct points or of the two extremes.
///
/// # Examples
///
/// ```rust
/// # use planar_geom::algorithms::convex_hull::monotone_chain::convex_hull;
/// # use planar_geom::data::Point;
/// let empty_set: Vec<Point> = vec![];
/// assert_eq!(convex_hull(&empty_set).size(), 0);
///
/// let dups = vec![Point::from([0, 0]); 3];
/// assert_eq!(convex_hull(&dups).size(), 1);
///
/// let square = vec![
///   Point::from([2, 2]),
///   Point::from([0, 0]),
///   Point::from([1, 1]),
///   Point::from([0, 2]),
///   Point::from([2, 0]),
/// ];
/// let hull = convex_hull(&square);
/// assert_eq!(hull.size(), 4);
/// assert_eq!(hull.vertex(0), Some(&Point::from([0, 0])));
/// ```
pub fn convex_hull(points: &[Point]) -> Polygon {
  let pts = distinct_sorted(points);
  if let Some(hull) = degenerate_hull(&pts) {
    return hull;
  }

  let mut lower: Vec<&Point> = Vec::with_capacity(pts.len());
  for pt in pts.iter() {
    pop_non_left_turns(&mut lower, pt);
    lower.push(pt);
  }
  let mut upper: Vec<&Point> = Vec::with_capacity(pts.len());
  for pt in pts.iter().rev() {
    pop_non_left_turns(&mut upper, pt);
    upper.push(pt);
  }

  // The last point of each chain is the first point of the other.
  lower.pop();
  upper.pop();
  finish(lower.into_iter().chain(upper).cloned().collect())
}

fn pop_non_left_turns(chain: &mut Vec<&Point>, pt: &Point) {
  while let [.., a, b] = chain.as_slice() {
    if a.orientation(b, pt).is_ccw() {
      break;
    }
    chain.pop();
  }
}
