use claims::debug_assert_ok;
use num_traits::*;

use super::{Point, PointLocation};
use crate::{rational_to_f64, Error, Number, Orientation, Violation};

/// Borrowed triangle. Constructed with [`TriangleView::new`] the vertices
/// must be in counter-clockwise order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleView<'a>([&'a Point; 3]);

impl<'a> TriangleView<'a> {
  // O(1)
  pub fn new(pts: [&'a Point; 3]) -> TriangleView<'a> {
    let triangle = TriangleView(pts);
    debug_assert_ok!(triangle.validate());
    triangle
  }

  pub fn new_unchecked(pts: [&'a Point; 3]) -> TriangleView<'a> {
    TriangleView(pts)
  }

  pub fn points(&self) -> [&'a Point; 3] {
    self.0
  }

  // O(1)
  pub fn validate(&self) -> Result<(), Error> {
    match self.orientation() {
      Orientation::CounterClockWise => Ok(()),
      Orientation::ClockWise => Err(Violation::ClockWiseViolation.into()),
      Orientation::CoLinear => Err(Violation::CoLinearViolation.into()),
    }
  }

  pub fn orientation(&self) -> Orientation {
    let [a, b, c] = self.0;
    a.orientation(b, c)
  }

  // O(1)
  pub fn locate(&self, pt: &Point) -> PointLocation {
    use Orientation::*;
    debug_assert_ok!(self.validate());
    let [a, b, c] = self.0;
    let ab = a.orientation(b, pt);
    let bc = b.orientation(c, pt);
    let ca = c.orientation(a, pt);
    if ab == ClockWise || bc == ClockWise || ca == ClockWise {
      PointLocation::Outside
    } else if ab == CoLinear || bc == CoLinear || ca == CoLinear {
      PointLocation::OnBoundary
    } else {
      PointLocation::Inside
    }
  }

  /// Where `pt` lies relative to the circle through the three vertices.
  pub fn locate_circumcircle(&self, pt: &Point) -> PointLocation {
    let [a, b, c] = self.0;
    crate::in_circumcircle(a, b, c, pt)
  }

  pub fn signed_area_2x(&self) -> Number {
    let [a, b, c] = self.0;
    (b - a).cross(&(c - a))
  }

  pub fn signed_area(&self) -> Number {
    self.signed_area_2x() / Number::from_integer(2.into())
  }

  /// Center of the circumscribed circle. `None` for colinear vertices.
  pub fn circumcenter(&self) -> Option<Point> {
    let [a, b, c] = self.0;
    let ab = b - a;
    let ac = c - a;
    let d = ab.cross(&ac) * Number::from_integer(2.into());
    if d.is_zero() {
      return None;
    }
    let ab2 = ab.squared_magnitude();
    let ac2 = ac.squared_magnitude();
    let ux = (&ac[1] * &ab2 - &ab[1] * &ac2) / &d;
    let uy = (&ab[0] * &ac2 - &ac[0] * &ab2) / &d;
    Some(Point::new([&a[0] + ux, &a[1] + uy]))
  }

  pub fn squared_circumradius(&self) -> Option<Number> {
    let center = self.circumcenter()?;
    Some(center.squared_distance(self.0[0]))
  }

  /// For reporting only.
  pub fn circumradius_f64(&self) -> Option<f64> {
    self
      .squared_circumradius()
      .map(|r2| rational_to_f64(&r2).sqrt())
  }
}
