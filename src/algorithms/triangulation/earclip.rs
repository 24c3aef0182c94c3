use num_traits::{Signed, Zero};
use tracing::debug;

use crate::data::{Point, PointLocation, Polygon, TriangleView};
use crate::{Error, Orientation, Violation};

/// Triangulate a closed simple polygon by cutting ears.
///
/// Returns `n - 2` counter-clockwise triangles as indices into the polygon's
/// vertex order, regardless of how the polygon is wound. Colinear vertices are
/// kept and appear in the output like any other vertex.
///
/// ```rust
/// # use planar_geom::algorithms::triangulation::earclip::triangulate_polygon;
/// # use planar_geom::data::{Point, Polygon};
/// let poly = Polygon::from_points(vec![
///   Point::from([0, 0]),
///   Point::from([2, 0]),
///   Point::from([2, 2]),
///   Point::from([0, 2]),
/// ])?;
/// assert_eq!(triangulate_polygon(&poly)?.len(), 2);
/// # Ok::<(), planar_geom::Error>(())
/// ```
///
/// # Errors
///
/// - [`Violation::PolygonOpen`] if the polygon is open.
/// - [`Violation::InsufficientVertices`] with fewer than three vertices.
/// - [`Violation::CoLinearViolation`] if the polygon has no area.
pub fn triangulate_polygon(poly: &Polygon) -> Result<Vec<[usize; 3]>, Error> {
  poly.require_closed()?;
  let n = poly.size();
  if n < 3 {
    return Err(Violation::InsufficientVertices.into());
  }
  let area = poly.signed_area_2x();
  if area.is_zero() {
    return Err(Violation::CoLinearViolation.into());
  }
  // Walk the ring counter-clockwise.
  let order: Vec<usize> = if area.is_positive() {
    (0..n).collect()
  } else {
    (0..n).rev().collect()
  };
  let trigs = triangulate_list(poly.as_slice(), &order)?;
  debug!(vertices = n, triangles = trigs.len(), "earclip");
  Ok(trigs)
}

// Vertices in `order` form a counter-clockwise simple ring. Scans forward from
// the last cut for the next ear; a full lap without finding one means the
// ring was not simple.
fn triangulate_list(points: &[Point], order: &[usize]) -> Result<Vec<[usize; 3]>, Error> {
  let mut len = order.len();
  let mut vertices = List::new(len);
  let mut trigs = Vec::with_capacity(len - 2);
  let mut focus = 0;
  let mut misses = 0;
  while len > 3 {
    let prev = vertices.prev(focus);
    let next = vertices.next(focus);
    if is_ear(points, order, &vertices, prev, focus, next) {
      trigs.push([order[prev], order[focus], order[next]]);
      vertices.delete(focus);
      len -= 1;
      misses = 0;
      focus = prev;
    } else {
      misses += 1;
      if misses > len {
        return Err(Violation::SelfIntersections.into());
      }
      focus = next;
    }
  }
  let prev = vertices.prev(focus);
  let next = vertices.next(focus);
  trigs.push([order[prev], order[focus], order[next]]);
  Ok(trigs)
}

fn is_ear(
  points: &[Point],
  order: &[usize],
  vertices: &List,
  a: usize,
  b: usize,
  c: usize,
) -> bool {
  let get_point = |key: usize| &points[order[key]];
  let trig = TriangleView::new_unchecked([get_point(a), get_point(b), get_point(c)]);
  if trig.orientation() == Orientation::CounterClockWise {
    let mut focus = vertices.next(c);
    while focus != a {
      if trig.locate(get_point(focus)) != PointLocation::Outside {
        return false;
      }
      focus = vertices.next(focus);
    }
    true
  } else {
    false
  }
}

///////////////////////////////////////////////////////////////////////////////
// Circular linked list over `0..size` that supports deletions.

struct List {
  prev: Vec<usize>,
  next: Vec<usize>,
}

impl List {
  fn new(size: usize) -> List {
    let mut prev = vec![0; size];
    let mut next = vec![0; size];
    for i in 0..size {
      prev[(i + 1) % size] = i;
      next[i] = (i + 1) % size;
    }
    List { prev, next }
  }

  fn prev(&self, vertex: usize) -> usize {
    self.prev[vertex]
  }

  fn next(&self, vertex: usize) -> usize {
    self.next[vertex]
  }

  fn delete(&mut self, vertex: usize) {
    let prev = self.prev[vertex];
    let next = self.next[vertex];
    self.next[prev] = next;
    self.prev[next] = prev;
  }
}

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;
  use crate::algorithms::convex_hull::HullAlgorithm;
  use crate::testing::*;
  use crate::Number;

  use claims::{assert_err, assert_ok};
  use proptest::prelude::*;
  use test_strategy::proptest;

  fn poly(coords: &[(i64, i64)]) -> Polygon {
    Polygon::from_points(coords.iter().map(|&c| Point::from(c))).unwrap()
  }

  fn check(p: &Polygon) -> Result<(), TestCaseError> {
    let trigs = triangulate_polygon(p).map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(trigs.len(), p.size() - 2);
    let mut area = Number::zero();
    for &[a, b, c] in trigs.iter() {
      let trig = TriangleView::new_unchecked([&p.vertices[a], &p.vertices[b], &p.vertices[c]]);
      prop_assert!(trig.orientation().is_ccw());
      area += trig.signed_area_2x();
    }
    prop_assert_eq!(area, p.signed_area_2x().abs());
    Ok(())
  }

  #[test]
  fn basic_1() {
    check(&poly(&[(0, 0), (1, 0), (1, 1)])).unwrap();
  }

  #[test]
  fn basic_2() {
    // Colinear runs are merged by add_vertex, so build the ring directly.
    let p = Polygon::new_closed_unchecked(
      [(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (1, 1)]
        .iter()
        .map(|&c| Point::from(c))
        .collect(),
    );
    check(&p).unwrap();
  }

  #[test]
  fn clockwise() {
    let p = poly(&[(0, 0), (0, 3), (3, 3), (3, 0)]);
    assert!(p.orientation().is_cw());
    check(&p).unwrap();
  }

  #[test]
  fn concave() {
    check(&poly(&[(0, 0), (6, 0), (3, 2), (6, 6), (0, 6)])).unwrap();
    // Comb with three teeth.
    check(&poly(&[
      (0, 0),
      (7, 0),
      (7, 3),
      (6, 3),
      (5, 1),
      (4, 3),
      (3, 1),
      (2, 3),
      (1, 1),
      (0, 3),
    ]))
    .unwrap();
  }

  #[test]
  fn errors() {
    let mut open = Polygon::new();
    open.add_vertex(Point::from([0, 0])).unwrap();
    open.add_vertex(Point::from([1, 0])).unwrap();
    open.add_vertex(Point::from([1, 1])).unwrap();
    let err = assert_err!(triangulate_polygon(&open));
    assert_eq!(err.violation(), Violation::PolygonOpen);

    let tiny = Polygon::new_closed_unchecked(vec![Point::from([0, 0]), Point::from([1, 0])]);
    let err = assert_err!(triangulate_polygon(&tiny));
    assert_eq!(err.violation(), Violation::InsufficientVertices);

    let flat = Polygon::new_closed_unchecked(vec![
      Point::from([0, 0]),
      Point::from([1, 0]),
      Point::from([2, 0]),
    ]);
    let err = assert_err!(triangulate_polygon(&flat));
    assert_eq!(err.violation(), Violation::CoLinearViolation);
  }

  #[test]
  fn indices_follow_authored_order() {
    let p = poly(&[(0, 0), (0, 2), (2, 2), (2, 0)]);
    let trigs = assert_ok!(triangulate_polygon(&p));
    let mut used: Vec<usize> = trigs.iter().flatten().copied().collect();
    used.sort_unstable();
    used.dedup();
    assert_eq!(used, vec![0, 1, 2, 3]);
  }

  #[proptest]
  fn convex_hulls(#[strategy(any_grid_points(3..30))] points: Vec<Point>) {
    let hull = HullAlgorithm::default().hull(&points);
    if hull.size() >= 3 {
      check(&hull)?;
      let mut reversed = hull.clone();
      reversed.vertices.reverse();
      check(&reversed)?;
    }
  }

  #[proptest]
  fn star_shaped(#[strategy(any_star_polygon(8..40))] p: Polygon) {
    prop_assert!(p.orientation().is_ccw());
    check(&p)?;
    let mut reversed = p.clone();
    reversed.vertices.reverse();
    check(&reversed)?;
  }
}
