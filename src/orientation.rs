use num_bigint::BigInt;
use num_traits::Num;
use std::cmp::Ordering;

use crate::data::{PointLocation, Vector};
use crate::Number;

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
pub enum Orientation {
  CounterClockWise,
  ClockWise,
  CoLinear,
}
use Orientation::*;

// Integer coordinates are evaluated on their numerators: `BigInt` arithmetic
// skips the gcd that every `BigRational` operation pays for.
fn numerators<const N: usize>(pts: [&[Number; 2]; N]) -> Option<[[BigInt; 2]; N]> {
  if pts.iter().all(|q| q[0].is_integer() && q[1].is_integer()) {
    Some(pts.map(|q| [q[0].numer().clone(), q[1].numer().clone()]))
  } else {
    None
  }
}

fn slopes<T: Num + Clone>(p: &[T; 2], q: &[T; 2], r: &[T; 2]) -> (T, T) {
  let slope1 = (r[1].clone() - q[1].clone()) * (q[0].clone() - p[0].clone());
  let slope2 = (q[1].clone() - p[1].clone()) * (r[0].clone() - q[0].clone());
  (slope1, slope2)
}

// Sign of (q - p) x (r - p), compared without any division.
fn cmp_slope(p: &[Number; 2], q: &[Number; 2], r: &[Number; 2]) -> Ordering {
  match numerators([p, q, r]) {
    Some([p, q, r]) => {
      let (slope1, slope2) = slopes(&p, &q, &r);
      slope1.cmp(&slope2)
    }
    None => {
      let (slope1, slope2) = slopes(p, q, r);
      slope1.cmp(&slope2)
    }
  }
}

impl Orientation {
  /// Determine the direction you have to turn if you walk from `p1`
  /// to `p2` to `p3`.
  ///
  /// The sign is computed exactly; it is never approximated.
  ///
  /// # Examples
  ///
  /// ```rust
  /// # use planar_geom::data::Point;
  /// # use planar_geom::Orientation;
  /// let p1 = Point::from([0, 0]);
  /// let p2 = Point::from([0, 1]); // One unit above p1.
  /// // (0,0) -> (0,1) -> (0,2) == Orientation::CoLinear
  /// assert!(Orientation::new(&p1, &p2, &Point::from([0, 2])).is_colinear());
  /// // (0,0) -> (0,1) -> (-1,2) == Orientation::CounterClockWise
  /// assert!(Orientation::new(&p1, &p2, &Point::from([-1, 2])).is_ccw());
  /// // (0,0) -> (0,1) -> (1,2) == Orientation::ClockWise
  /// assert!(Orientation::new(&p1, &p2, &Point::from([1, 2])).is_cw());
  /// ```
  pub fn new(p1: &[Number; 2], p2: &[Number; 2], p3: &[Number; 2]) -> Orientation {
    match cmp_slope(p1, p2, p3) {
      Ordering::Less => ClockWise,
      Ordering::Equal => CoLinear,
      Ordering::Greater => CounterClockWise,
    }
  }

  /// Locate `p2` in relation to the line determined by the point `p1` and the direction
  /// vector.
  ///
  /// This function is identical to [`Orientation::new`]`(p1, p1+v, p2)`.
  pub fn along_vector(p1: &[Number; 2], vector: &Vector, p2: &[Number; 2]) -> Orientation {
    let through = [&p1[0] + &vector.0[0], &p1[1] + &vector.0[1]];
    Orientation::new(p1, &through, p2)
  }

  /// Like [`Orientation::along_vector`] but with the vector rotated by 90 degrees
  /// counter-clockwise.
  pub fn along_perp_vector(p1: &[Number; 2], vector: &Vector, p2: &[Number; 2]) -> Orientation {
    let through = [&p1[0] - &vector.0[1], &p1[1] + &vector.0[0]];
    Orientation::new(p1, &through, p2)
  }

  pub fn is_colinear(self) -> bool {
    matches!(self, CoLinear)
  }

  pub fn is_ccw(self) -> bool {
    matches!(self, CounterClockWise)
  }

  pub fn is_cw(self) -> bool {
    matches!(self, ClockWise)
  }

  #[must_use]
  pub fn reverse(self) -> Orientation {
    match self {
      CounterClockWise => ClockWise,
      ClockWise => CounterClockWise,
      CoLinear => CoLinear,
    }
  }

  /// Compare the angles of `p2` and `p3` around `p1`, measured counter-clockwise
  /// starting from `vector`.
  pub fn ccw_cmp_around_with(
    vector: &Vector,
    p1: &[Number; 2],
    p2: &[Number; 2],
    p3: &[Number; 2],
  ) -> Ordering {
    let aq = Orientation::along_vector(p1, vector, p2);
    let ar = Orientation::along_vector(p1, vector, p3);
    let on_zero = |d: &[Number; 2]| match Orientation::along_perp_vector(p1, vector, d) {
      CounterClockWise => false,
      ClockWise => true,
      CoLinear => true,
    };
    let cmp = || match Orientation::new(p1, p2, p3) {
      CounterClockWise => Ordering::Less,
      ClockWise => Ordering::Greater,
      CoLinear => Ordering::Equal,
    };
    match (aq, ar) {
      // Easy cases: Q and R are on either side of the line p->z:
      (CounterClockWise, ClockWise) => Ordering::Less,
      (ClockWise, CounterClockWise) => Ordering::Greater,
      // A CoLinear point may be in front of p->z (0 degree angle) or behind
      // it (180 degree angle). If the other point is clockwise, it must have an
      // angle greater than 180 degrees and must therefore be greater than the
      // colinear point.
      (CoLinear, ClockWise) => Ordering::Less,
      (ClockWise, CoLinear) => Ordering::Greater,

      // if Q and R are on the same side of P->Z then the most clockwise point
      // will have the smallest angle.
      (CounterClockWise, CounterClockWise) => cmp(),
      (ClockWise, ClockWise) => cmp(),

      // CoLinear points have an angle of either 0 degrees or 180 degrees. on_zero
      // can distinguish these two cases:
      //    on_zero(p) => 0 degrees.
      //   !on_zero(p) => 180 degrees.
      (CounterClockWise, CoLinear) => {
        if on_zero(p3) {
          Ordering::Greater // angle(r) = 0 & 0 < angle(q) < 180. Thus: Q > R
        } else {
          Ordering::Less // angle(r) = 180 & 0 < angle(q) < 180. Thus: Q < R
        }
      }
      (CoLinear, CounterClockWise) => {
        if on_zero(p2) {
          Ordering::Less
        } else {
          Ordering::Greater
        }
      }
      (CoLinear, CoLinear) => match (on_zero(p2), on_zero(p3)) {
        (true, true) => Ordering::Equal,
        (false, false) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
      },
    }
  }
}

fn det2<T: Num + Clone>(a: &T, b: &T, c: &T, d: &T) -> T {
  a.clone() * d.clone() - b.clone() * c.clone()
}

// Sign of the lifted determinant of `a`, `b`, `c` translated so `p` is the
// origin. Positive when `p` is inside the circle of a counter-clockwise
// `a`, `b`, `c`.
fn lifted_sign<T: Num + Clone + Ord>(a: &[T; 2], b: &[T; 2], c: &[T; 2], p: &[T; 2]) -> Ordering {
  let lift = |q: &[T; 2]| {
    let dx = q[0].clone() - p[0].clone();
    let dy = q[1].clone() - p[1].clone();
    let dd = dx.clone() * dx.clone() + dy.clone() * dy.clone();
    (dx, dy, dd)
  };
  let (adx, ady, add) = lift(a);
  let (bdx, bdy, bdd) = lift(b);
  let (cdx, cdy, cdd) = lift(c);
  let det = adx * det2(&bdy, &bdd, &cdy, &cdd) - ady * det2(&bdx, &bdd, &cdx, &cdd)
    + add * det2(&bdx, &bdy, &cdx, &cdy);
  det.cmp(&T::zero())
}

/// Locate `p` relative to the circle through `a`, `b` and `c`.
///
/// The answer comes from the sign of the lifted 3x3 determinant and does not
/// depend on the winding of `a`, `b`, `c`. Three colinear points have no
/// circumcircle and every `p` is reported as [`PointLocation::Outside`].
///
/// ```rust
/// # use planar_geom::data::{Point, PointLocation};
/// # use planar_geom::in_circumcircle;
/// let a = Point::from([0, 0]);
/// let b = Point::from([2, 0]);
/// let c = Point::from([0, 2]);
/// assert_eq!(in_circumcircle(&a, &b, &c, &Point::from([1, 1])), PointLocation::Inside);
/// assert_eq!(in_circumcircle(&a, &b, &c, &Point::from([2, 2])), PointLocation::OnBoundary);
/// assert_eq!(in_circumcircle(&a, &b, &c, &Point::from([3, 3])), PointLocation::Outside);
/// ```
pub fn in_circumcircle(
  a: &[Number; 2],
  b: &[Number; 2],
  c: &[Number; 2],
  p: &[Number; 2],
) -> PointLocation {
  let orient = Orientation::new(a, b, c);
  if orient.is_colinear() {
    return PointLocation::Outside;
  }
  let sign = match numerators([a, b, c, p]) {
    Some([a, b, c, p]) => lifted_sign(&a, &b, &c, &p),
    None => lifted_sign(a, b, c, p),
  };
  let sign = if orient.is_cw() { sign.reverse() } else { sign };
  match sign {
    Ordering::Greater => PointLocation::Inside,
    Ordering::Equal => PointLocation::OnBoundary,
    Ordering::Less => PointLocation::Outside,
  }
}
