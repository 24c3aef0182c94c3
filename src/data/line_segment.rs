use num_traits::{Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

use super::{Point, Vector};
use crate::{rational_to_f64, Error, Number, Violation};

///////////////////////////////////////////////////////////////////////////////
// Line

/// Infinite line through `origin` along `direction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
  pub origin: Point,
  pub direction: Vector,
}

impl Line {
  pub fn new(origin: Point, direction: Vector) -> Line {
    Line { origin, direction }
  }

  pub fn new_through(origin: Point, through: &Point) -> Line {
    let direction = through - &origin;
    Line { origin, direction }
  }

  /// Point where two lines meet.
  ///
  /// # Errors
  ///
  /// [`Violation::ParallelLines`] if the directions are parallel (or either
  /// direction is zero).
  pub fn intersection(&self, other: &Line) -> Result<Point, Error> {
    let denom = self.direction.cross(&other.direction);
    if denom.is_zero() {
      return Err(Violation::ParallelLines.into());
    }
    let offset = &other.origin - &self.origin;
    let t = offset.cross(&other.direction) / denom;
    Ok(&self.origin + &(&self.direction * &t))
  }
}

///////////////////////////////////////////////////////////////////////////////
// Octant

/// Compass direction of a segment, from the signs of its x and y extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Octant {
  N,
  NE,
  E,
  SE,
  S,
  SW,
  W,
  NW,
}

///////////////////////////////////////////////////////////////////////////////
// Segment

/// Closed, directed line segment from `src` to `tgt`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
  pub src: Point,
  pub tgt: Point,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ISegment {
  Crossing,         // Segments touch but are not parallel.
  Overlap(Segment), // Segments touch and are colinear. Ordered min to max.
}

impl Segment {
  pub fn new(src: Point, tgt: Point) -> Segment {
    Segment { src, tgt }
  }

  pub fn direction(&self) -> Vector {
    &self.tgt - &self.src
  }

  pub fn is_degenerate(&self) -> bool {
    self.src == self.tgt
  }

  #[must_use]
  pub fn reverse(&self) -> Segment {
    Segment::new(self.tgt.clone(), self.src.clone())
  }

  pub fn midpoint(&self) -> Point {
    let two = Number::from_integer(2.into());
    Point::new([
      (&self.src[0] + &self.tgt[0]) / &two,
      (&self.src[1] + &self.tgt[1]) / &two,
    ])
  }

  /// Line of points equidistant from `src` and `tgt`, directed so that `src`
  /// is on its left.
  pub fn perpendicular_bisector(&self) -> Line {
    Line::new(self.midpoint(), self.direction().perp())
  }

  pub fn supporting_line(&self) -> Line {
    Line::new(self.src.clone(), self.direction())
  }

  /// True if `pt` lies on the closed segment.
  pub fn contains(&self, pt: &Point) -> bool {
    pt.is_between(&self.src, &self.tgt)
  }

  pub fn is_colinear_with(&self, pt: &Point) -> bool {
    self.src.orientation(&self.tgt, pt).is_colinear()
  }

  pub fn is_parallel_with(&self, other: &Segment) -> bool {
    self.direction().cross(&other.direction()).is_zero()
  }

  fn min_max(&self) -> (&Point, &Point) {
    if self.src <= self.tgt {
      (&self.src, &self.tgt)
    } else {
      (&self.tgt, &self.src)
    }
  }

  /// Classify the shared points of two closed segments.
  pub fn intersect(&self, other: &Segment) -> Option<ISegment> {
    let (a1, a2) = self.min_max();
    let (b1, b2) = other.min_max();
    let l1_to_b1 = a1.orientation(a2, b1);
    let l1_to_b2 = a1.orientation(a2, b2);
    let l2_to_a1 = b1.orientation(b2, a1);
    let l2_to_a2 = b1.orientation(b2, a2);
    if l1_to_b1.is_colinear() && l1_to_b2.is_colinear() && l2_to_a1.is_colinear() {
      // Colinear points are ordered lexicographically along their line.
      let c_min = a1.max(b1);
      let c_max = a2.min(b2);
      match c_min.cmp(c_max) {
        Ordering::Greater => None,
        _ => Some(ISegment::Overlap(Segment::new(c_min.clone(), c_max.clone()))),
      }
    } else if (l1_to_b1.is_colinear() && b1.is_between(a1, a2))
      || (l1_to_b2.is_colinear() && b2.is_between(a1, a2))
      || (l2_to_a1.is_colinear() && a1.is_between(b1, b2))
      || (l2_to_a2.is_colinear() && a2.is_between(b1, b2))
    {
      Some(ISegment::Crossing)
    } else if l1_to_b1 == l1_to_b2.reverse() && l2_to_a1 == l2_to_a2.reverse() {
      Some(ISegment::Crossing)
    } else {
      None
    }
  }

  pub fn intersects(&self, other: &Segment) -> bool {
    self.intersect(other).is_some()
  }

  /// True if the segments cross at a single point interior to both.
  pub fn intersects_properly(&self, other: &Segment) -> bool {
    let l1_to_b1 = self.src.orientation(&self.tgt, &other.src);
    let l1_to_b2 = self.src.orientation(&self.tgt, &other.tgt);
    let l2_to_a1 = other.src.orientation(&other.tgt, &self.src);
    let l2_to_a2 = other.src.orientation(&other.tgt, &self.tgt);
    !l1_to_b1.is_colinear()
      && !l2_to_a1.is_colinear()
      && l1_to_b1 == l1_to_b2.reverse()
      && l2_to_a1 == l2_to_a2.reverse()
  }

  /// Point where the supporting lines of the two segments meet. The point
  /// need not lie on either segment.
  ///
  /// # Errors
  ///
  /// [`Violation::ParallelLines`] if the segments are parallel.
  pub fn intersection_point(&self, other: &Segment) -> Result<Point, Error> {
    self.supporting_line().intersection(&other.supporting_line())
  }

  /// Compass direction from `src` to `tgt`. `None` for a degenerate segment.
  pub fn sense(&self) -> Option<Octant> {
    let d = self.direction();
    let sign = |n: &Number| {
      if n.is_zero() {
        Ordering::Equal
      } else if n.is_positive() {
        Ordering::Greater
      } else {
        Ordering::Less
      }
    };
    use Ordering::*;
    match (sign(&d[0]), sign(&d[1])) {
      (Equal, Equal) => None,
      (Equal, Greater) => Some(Octant::N),
      (Greater, Greater) => Some(Octant::NE),
      (Greater, Equal) => Some(Octant::E),
      (Greater, Less) => Some(Octant::SE),
      (Equal, Less) => Some(Octant::S),
      (Less, Less) => Some(Octant::SW),
      (Less, Equal) => Some(Octant::W),
      (Less, Greater) => Some(Octant::NW),
    }
  }

  pub fn leftmost(&self) -> &Point {
    if self.src.x_coord() <= self.tgt.x_coord() {
      &self.src
    } else {
      &self.tgt
    }
  }

  pub fn rightmost(&self) -> &Point {
    if self.src.x_coord() >= self.tgt.x_coord() {
      &self.src
    } else {
      &self.tgt
    }
  }

  pub fn lowest(&self) -> &Point {
    if self.src.y_coord() <= self.tgt.y_coord() {
      &self.src
    } else {
      &self.tgt
    }
  }

  pub fn highest(&self) -> &Point {
    if self.src.y_coord() >= self.tgt.y_coord() {
      &self.src
    } else {
      &self.tgt
    }
  }

  /// Foot of the perpendicular from `pt` onto the supporting line.
  pub fn project(&self, pt: &Point) -> Point {
    let d = self.direction();
    let len = d.squared_magnitude();
    if len.is_zero() {
      return self.src.clone();
    }
    let t = (pt - &self.src).dot(&d) / len;
    &self.src + &(&d * &t)
  }

  /// Length rounded to the nearest `f64`. For reporting only.
  pub fn length_f64(&self) -> f64 {
    rational_to_f64(&self.src.squared_distance(&self.tgt)).sqrt()
  }
}

impl From<Range<Point>> for Segment {
  fn from(range: Range<Point>) -> Segment {
    Segment::new(range.start, range.end)
  }
}

impl From<Range<(i64, i64)>> for Segment {
  fn from(range: Range<(i64, i64)>) -> Segment {
    Segment::new(range.start.into(), range.end.into())
  }
}

impl fmt::Display for Segment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} -> {}", self.src, self.tgt)
  }
}

///////////////////////////////////////////////////////////////////////////////
// Tests

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;
  use crate::testing::*;
  use ISegment::*;

  use claims::{assert_err, assert_none, assert_ok};
  use proptest::prelude::*;
  use test_strategy::proptest;

  #[proptest]
  fn flip_intersects_prop(
    #[strategy(any_grid_point())] a: Point,
    #[strategy(any_grid_point())] b: Point,
    #[strategy(any_grid_point())] c: Point,
    #[strategy(any_grid_point())] d: Point,
  ) {
    let l1 = Segment::new(a, b);
    let l2 = Segment::new(c, d);
    prop_assert_eq!(l1.intersect(&l2), l2.intersect(&l1));
    prop_assert_eq!(l1.intersect(&l2), l1.reverse().intersect(&l2));
  }

  #[proptest]
  fn proper_crossings_intersect(
    #[strategy(any_grid_point())] a: Point,
    #[strategy(any_grid_point())] b: Point,
    #[strategy(any_grid_point())] c: Point,
    #[strategy(any_grid_point())] d: Point,
  ) {
    let l1 = Segment::new(a, b);
    let l2 = Segment::new(c, d);
    if l1.intersects_properly(&l2) {
      prop_assert_eq!(l1.intersect(&l2), Some(Crossing));
      let pt = l1.intersection_point(&l2).unwrap();
      prop_assert!(l1.contains(&pt));
      prop_assert!(l2.contains(&pt));
    }
  }

  #[proptest]
  fn bisector_is_equidistant(
    #[strategy(any_grid_point())] a: Point,
    #[strategy(any_grid_point())] b: Point,
  ) {
    let line = Segment::new(a.clone(), b.clone()).perpendicular_bisector();
    let other = &line.origin + &line.direction;
    prop_assert_eq!(other.squared_distance(&a), other.squared_distance(&b));
  }

  //             P6
  //
  // P7      P5
  //
  // P4  P2
  //
  // P1  P3
  //
  fn pts() -> [Point; 7] {
    [
      Point::from([0, 0]),
      Point::from([1, 1]),
      Point::from([1, 0]),
      Point::from([0, 1]),
      Point::from([2, 2]),
      Point::from([3, 3]),
      Point::from([0, 2]),
    ]
  }

  #[test]
  fn line_crossing() {
    let [p1, p2, p3, p4, ..] = pts();
    assert_eq!(Segment::from(p1..p2).intersect(&Segment::from(p3..p4)), Some(Crossing))
  }

  #[test]
  fn line_not_crossing() {
    let [p1, p2, p3, p4, ..] = pts();
    assert_eq!(Segment::from(p1..p3).intersect(&Segment::from(p2..p4)), None)
  }

  #[test]
  fn endpoints_touch() {
    let [p1, p2, p3, ..] = pts();
    assert_eq!(Segment::from(p1..p2.clone()).intersect(&Segment::from(p2..p3)), Some(Crossing))
  }

  #[test]
  fn endpoints_overlap() {
    let [p1, p2, _, _, p5, ..] = pts();
    assert_eq!(
      Segment::from(p1..p2.clone()).intersect(&Segment::from(p2.clone()..p5)),
      Some(Overlap(Segment::from(p2.clone()..p2)))
    )
  }

  #[test]
  fn edges_overlap() {
    let [p1, p2, _, _, p5, p6, _] = pts();
    assert_eq!(
      Segment::from(p1..p5.clone()).intersect(&Segment::from(p6..p2.clone())),
      Some(Overlap(Segment::from(p2..p5)))
    )
  }

  #[test]
  fn edge_touch() {
    let [p1, p2, _, p4, _, _, p7] = pts();
    assert_eq!(Segment::from(p1..p7).intersect(&Segment::from(p4..p2)), Some(Crossing))
  }

  #[test]
  fn colinear_disjoint() {
    let l1 = Segment::from((0, 0)..(1, 0));
    let l2 = Segment::from((2, 0)..(3, 0));
    assert_eq!(l1.intersect(&l2), None);
    assert!(l1.is_parallel_with(&l2));
  }

  #[test]
  fn unit_7() {
    let l1 = Segment::from((0, 0)..(0, 1));
    let l2 = Segment::from((1, 2)..(2, 1));
    assert_eq!(l1.intersect(&l2), None)
  }

  #[test]
  fn proper_crossing() {
    let s1 = Segment::from((0, 0)..(2, 2));
    let s2 = Segment::from((0, 2)..(2, 0));
    let s3 = Segment::from((1, 1)..(3, 0));
    assert!(s1.intersects_properly(&s2));
    assert!(!s1.intersects_properly(&s3));
    assert!(s1.intersects(&s3));
    assert_eq!(assert_ok!(s1.intersection_point(&s2)), Point::from([1, 1]));
  }

  #[test]
  fn parallel_intersection_point() {
    let s1 = Segment::from((0, 0)..(1, 1));
    let s2 = Segment::from((0, 1)..(1, 2));
    let err = assert_err!(s1.intersection_point(&s2));
    assert_eq!(err.violation(), Violation::ParallelLines);
  }

  #[test]
  fn senses() {
    let sense = |a: (i64, i64), b: (i64, i64)| Segment::from(a..b).sense();
    assert_eq!(sense((0, 0), (1, 0)), Some(Octant::E));
    assert_eq!(sense((1, 0), (0, 0)), Some(Octant::W));
    assert_eq!(sense((0, 0), (0, 1)), Some(Octant::N));
    assert_eq!(sense((0, 1), (0, 0)), Some(Octant::S));
    assert_eq!(sense((0, 0), (1, 1)), Some(Octant::NE));
    assert_eq!(sense((1, 1), (0, 0)), Some(Octant::SW));
    assert_eq!(sense((1, 0), (0, 1)), Some(Octant::NW));
    assert_eq!(sense((0, 1), (1, 0)), Some(Octant::SE));
    assert_none!(sense((3, 3), (3, 3)));
  }

  #[test]
  fn midpoint_and_projection() {
    let s = Segment::from((0, 0)..(2, 0));
    assert_eq!(s.midpoint(), Point::from([1, 0]));
    assert_eq!(s.project(&Point::from([1, 1])), Point::from([1, 0]));
    assert_eq!(s.length_f64(), 2.0);
    let s = Segment::from((0, 0)..(1, 1));
    assert_eq!(
      s.midpoint(),
      Point::new([Number::new(1.into(), 2.into()), Number::new(1.into(), 2.into())])
    );
  }

  #[test]
  fn extremes() {
    let s = Segment::from((3, -1)..(1, 4));
    assert_eq!(s.leftmost(), &Point::from([1, 4]));
    assert_eq!(s.rightmost(), &Point::from([3, -1]));
    assert_eq!(s.lowest(), &Point::from([3, -1]));
    assert_eq!(s.highest(), &Point::from([1, 4]));
  }

  #[test]
  fn contains_endpoints() {
    let s = Segment::from((0, 0)..(4, 2));
    assert!(s.contains(&Point::from([0, 0])));
    assert!(s.contains(&Point::from([2, 1])));
    assert!(!s.contains(&Point::from([6, 3])));
    assert!(s.is_colinear_with(&Point::from([6, 3])));
  }
}
