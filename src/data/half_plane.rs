use super::{Line, Point, PointLocation, Segment};
use crate::Orientation;

/// Closed half-plane to the left of a directed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HalfPlane {
  pub boundary: Line,
}

impl HalfPlane {
  pub fn new(boundary: Line) -> HalfPlane {
    HalfPlane { boundary }
  }

  /// Points on or to the left of the line from `a` through `b`.
  pub fn left_of(a: &Point, b: &Point) -> HalfPlane {
    HalfPlane::new(Line::new_through(a.clone(), b))
  }

  /// Points at least as close to `site` as to `other`.
  ///
  /// ```rust
  /// # use planar_geom::data::{HalfPlane, Point};
  /// let hp = HalfPlane::closer_to(&Point::from([0, 0]), &Point::from([4, 0]));
  /// assert!(hp.contains(&Point::from([2, 7])));
  /// assert!(!hp.contains(&Point::from([3, 0])));
  /// ```
  pub fn closer_to(site: &Point, other: &Point) -> HalfPlane {
    HalfPlane::new(Segment::new(site.clone(), other.clone()).perpendicular_bisector())
  }

  fn side(&self, pt: &Point) -> Orientation {
    Orientation::along_vector(&self.boundary.origin, &self.boundary.direction, pt)
  }

  pub fn contains(&self, pt: &Point) -> bool {
    !self.side(pt).is_cw()
  }

  pub fn locate(&self, pt: &Point) -> PointLocation {
    match self.side(pt) {
      Orientation::CounterClockWise => PointLocation::Inside,
      Orientation::CoLinear => PointLocation::OnBoundary,
      Orientation::ClockWise => PointLocation::Outside,
    }
  }

  /// Clip a convex ring against the half-plane.
  ///
  /// Vertices on the boundary line are kept and an intersection vertex is
  /// added only where an edge strictly crosses the line, so the output may
  /// contain repeated or colinear vertices. See [`prune_ring`].
  pub fn clip(&self, ring: &[Point]) -> Vec<Point> {
    let n = ring.len();
    let mut clipped = Vec::with_capacity(n + 1);
    for i in 0..n {
      let current = &ring[i];
      let next = &ring[(i + 1) % n];

      let current_side = self.side(current);
      let next_side = self.side(next);

      if !current_side.is_cw() {
        clipped.push(current.clone());
      }

      if current_side == next_side.reverse() && !current_side.is_colinear() {
        let edge = Line::new_through(current.clone(), next);
        if let Ok(crossing) = self.boundary.intersection(&edge) {
          clipped.push(crossing);
        }
      }
    }
    clipped
  }
}

/// Drop repeated vertices and vertices that do not turn, treating the ring as
/// closed. Rings that collapse to fewer than three vertices come back with
/// only their distinct points.
pub(crate) fn prune_ring(ring: Vec<Point>) -> Vec<Point> {
  let mut ring = ring;
  ring.dedup();
  while ring.len() > 1 && ring.first() == ring.last() {
    ring.pop();
  }
  let mut changed = true;
  while changed && ring.len() >= 3 {
    changed = false;
    let n = ring.len();
    for i in 0..n {
      let prev = &ring[(i + n - 1) % n];
      let next = &ring[(i + 1) % n];
      if prev.orientation(&ring[i], next).is_colinear() {
        ring.remove(i);
        changed = true;
        break;
      }
    }
  }
  ring
}

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;
  use crate::testing::*;

  use proptest::prelude::*;
  use test_strategy::proptest;

  fn square() -> Vec<Point> {
    vec![
      Point::from([0, 0]),
      Point::from([4, 0]),
      Point::from([4, 4]),
      Point::from([0, 4]),
    ]
  }

  #[test]
  fn clip_square_in_half() {
    let hp = HalfPlane::closer_to(&Point::from([1, 1]), &Point::from([3, 1]));
    let clipped = prune_ring(hp.clip(&square()));
    assert_eq!(
      clipped,
      vec![
        Point::from([0, 0]),
        Point::from([2, 0]),
        Point::from([2, 4]),
        Point::from([0, 4]),
      ]
    );
  }

  #[test]
  fn clip_through_vertex() {
    // The boundary passes through two opposite corners.
    let hp = HalfPlane::left_of(&Point::from([0, 0]), &Point::from([4, 4]));
    let clipped = prune_ring(hp.clip(&square()));
    assert_eq!(
      clipped,
      vec![Point::from([0, 0]), Point::from([4, 4]), Point::from([0, 4])]
    );
  }

  #[test]
  fn clip_everything() {
    let hp = HalfPlane::left_of(&Point::from([0, 10]), &Point::from([1, 10]));
    assert!(hp.clip(&square()).is_empty());
  }

  #[test]
  fn clip_nothing() {
    let hp = HalfPlane::left_of(&Point::from([0, 10]), &Point::from([-1, 10]));
    assert_eq!(hp.clip(&square()), square());
  }

  #[test]
  fn prune_drops_duplicates_and_colinear() {
    let ring = vec![
      Point::from([0, 0]),
      Point::from([0, 0]),
      Point::from([2, 0]),
      Point::from([4, 0]),
      Point::from([4, 4]),
      Point::from([0, 0]),
    ];
    assert_eq!(
      prune_ring(ring),
      vec![Point::from([0, 0]), Point::from([4, 0]), Point::from([4, 4])]
    );
  }

  #[test]
  fn locate_bisector() {
    let hp = HalfPlane::closer_to(&Point::from([0, 0]), &Point::from([2, 2]));
    assert_eq!(hp.locate(&Point::from([0, 0])), PointLocation::Inside);
    assert_eq!(hp.locate(&Point::from([2, 0])), PointLocation::OnBoundary);
    assert_eq!(hp.locate(&Point::from([2, 2])), PointLocation::Outside);
  }

  #[proptest]
  fn clipped_points_are_inside(
    #[strategy(any_grid_point())] a: Point,
    #[strategy(any_grid_point())] b: Point,
  ) {
    prop_assume!(a != b);
    let hp = HalfPlane::closer_to(&a, &b);
    for pt in hp.clip(&square()) {
      prop_assert!(hp.contains(&pt));
    }
  }
}
