use super::{degenerate_hull, distinct_sorted, finish};
use crate::data::{Point, Polygon};
use crate::Orientation;

// https://en.wikipedia.org/wiki/Graham_scan

/// $O(n \log n)$ Convex hull of a set of points.
///
/// [Graham scan][wiki] algorithm for finding the smallest convex polygon which
/// contains all the given points.
///
/// # Properties
/// * No points from the input set will be outside the returned polygon.
/// * All vertices in the returned polygon are from the input set.
///
/// # Examples
///
/// ```rust
/// # use planar_geom::algorithms::convex_hull::graham_scan::convex_hull;
/// # use planar_geom::data::Point;
/// let pair = [Point::from([0, 0]), Point::from([5, 5])];
/// let dups: Vec<Point> = pair.iter().cycle().take(6).cloned().collect();
/// assert_eq!(convex_hull(&dups).size(), 2);
/// ```
///
/// [wiki]: https://en.wikipedia.org/wiki/Graham_scan
pub fn convex_hull(points: &[Point]) -> Polygon {
  let mut pts = distinct_sorted(points);
  if let Some(hull) = degenerate_hull(&pts) {
    return hull;
  }

  let smallest = match smallest_point(&pts) {
    Some(pt) => pt,
    None => return finish(pts),
  };
  pts.sort_unstable_by(|a, b| {
    smallest
      .ccw_cmp_around(a, b)
      .then_with(|| smallest.cmp_distance_to(a, b))
  });
  // The smallest point sorts first: it is at distance zero from itself.
  debug_assert_eq!(pts[0], smallest);

  let mut write_idx = 1;
  let mut read_idx = 2;
  // Drop points that are co-linear with our origin.
  {
    let origin = pts[write_idx - 1].clone();
    while read_idx < pts.len() {
      let p2 = &pts[write_idx];
      if origin.orientation(p2, &pts[read_idx]) == Orientation::CoLinear {
        pts.swap(read_idx, write_idx);
        read_idx += 1;
      } else {
        break;
      }
    }
  }
  // Filter out points until all consecutive points are oriented counter-clockwise.
  while read_idx < pts.len() {
    let p1 = &pts[read_idx];
    let p2 = &pts[write_idx];
    let p3 = &pts[write_idx - 1];
    match p3.orientation(p2, p1) {
      Orientation::CounterClockWise => {
        pts.swap(read_idx, write_idx + 1);
        read_idx += 1;
        write_idx += 1;
      }
      Orientation::ClockWise | Orientation::CoLinear => {
        write_idx -= 1;
      }
    }
  }
  pts.truncate(write_idx + 1);
  finish(pts)
}

// Lowest point, ties broken by the smallest x coordinate.
// O(n)
fn smallest_point(pts: &[Point]) -> Option<Point> {
  pts
    .iter()
    .min_by(|a, b| (a.y_coord(), a.x_coord()).cmp(&(b.y_coord(), b.x_coord())))
    .cloned()
}
