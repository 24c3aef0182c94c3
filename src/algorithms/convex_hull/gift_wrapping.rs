use std::cmp::Ordering;

use super::{degenerate_hull, distinct_sorted, finish};
use crate::data::{Point, Polygon};
use crate::Orientation;

// https://en.wikipedia.org/wiki/Gift_wrapping_algorithm

// Properties:
//    No panics.
//    No points are outside the resulting convex polygon.
/// Convex hull of a set of points.
///
/// [Gift Wrapping][wiki] algorithm for finding the smallest convex polygon which
/// contains all the given points.
///
/// # Properties
/// * No points from the input set will be outside the returned polygon.
/// * All vertices in the returned polygon are from the input set.
///
/// # Time complexity
/// $O(nh)$ as h is the number of points on the convex hull
///
/// # Examples
///
/// ```rust
/// # use planar_geom::algorithms::convex_hull::gift_wrapping::convex_hull;
/// # use planar_geom::data::Point;
/// let pts = vec![Point::from([0, 0]), Point::from([4, 0]), Point::from([0, 4]), Point::from([1, 1])];
/// assert_eq!(convex_hull(&pts).size(), 3);
/// ```
///
/// [wiki]: https://en.wikipedia.org/wiki/Gift_wrapping_algorithm
pub fn convex_hull(points: &[Point]) -> Polygon {
  let pts = distinct_sorted(points);
  if let Some(hull) = degenerate_hull(&pts) {
    return hull;
  }
  let n = pts.len();
  let lowest = match lowest_point_index(&pts) {
    Some(idx) => idx,
    None => return finish(pts),
  };

  let mut hull: Vec<Point> = Vec::with_capacity(n);
  let mut p = lowest;

  // Each step adds a distinct hull vertex, so n steps always suffice.
  for _ in 0..n {
    hull.push(pts[p].clone());
    let mut q = (p + 1) % n;

    for i in 0..n {
      let orientation = pts[p].orientation(&pts[i], &pts[q]);
      // Of colinear candidates, take the farthest so no colinear vertices are kept.
      if orientation == Orientation::CounterClockWise
        || (orientation == Orientation::CoLinear
          && pts[p].cmp_distance_to(&pts[i], &pts[q]) == Ordering::Greater)
      {
        q = i;
      }
    }

    p = q;
    if p == lowest {
      break;
    }
  }

  finish(hull)
}

// Finds the index of the lowest point
// O(n)
fn lowest_point_index(pts: &[Point]) -> Option<usize> {
  pts
    .iter()
    .enumerate()
    .min_by(|(_, a), (_, b)| (a.y_coord(), a.x_coord()).cmp(&(b.y_coord(), b.x_coord())))
    .map(|(index, _)| index)
}
