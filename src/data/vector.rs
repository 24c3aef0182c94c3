use array_init::array_init;
use num_bigint::BigInt;
use num_traits::Zero;
use std::cmp::Ordering;
use std::ops::{Add, Index, Mul, Neg, Sub};

use crate::{Number, Orientation};

/// Displacement between two points. Used for ray directions and edge normals.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vector(pub [Number; 2]);

impl Vector {
  /// Rotate by 90 degrees counter-clockwise.
  #[must_use]
  pub fn perp(&self) -> Vector {
    Vector([-&self.0[1], self.0[0].clone()])
  }

  pub fn dot(&self, rhs: &Vector) -> Number {
    &self.0[0] * &rhs.0[0] + &self.0[1] * &rhs.0[1]
  }

  /// z-component of the cross product. Positive if `rhs` is counter-clockwise
  /// from `self`.
  pub fn cross(&self, rhs: &Vector) -> Number {
    &self.0[0] * &rhs.0[1] - &self.0[1] * &rhs.0[0]
  }

  pub fn squared_magnitude(&self) -> Number {
    self.dot(self)
  }

  pub fn is_zero(&self) -> bool {
    self.0.iter().all(Zero::is_zero)
  }

  /// Compare `p` and `q` by counter-clockwise angle starting from `self`.
  pub fn ccw_cmp_around(&self, p: &Vector, q: &Vector) -> Ordering {
    let origin = [Number::zero(), Number::zero()];
    Orientation::ccw_cmp_around_with(self, &origin, &p.0, &q.0)
  }
}

impl Index<usize> for Vector {
  type Output = Number;
  fn index(&self, index: usize) -> &Number {
    self.0.index(index)
  }
}

impl From<[i64; 2]> for Vector {
  fn from(array: [i64; 2]) -> Vector {
    Vector(array_init(|i| Number::from_integer(BigInt::from(array[i]))))
  }
}

impl<'a, 'b> Add<&'a Vector> for &'b Vector {
  type Output = Vector;
  fn add(self, other: &'a Vector) -> Vector {
    Vector(array_init(|i| &self.0[i] + &other.0[i]))
  }
}

impl<'a, 'b> Sub<&'a Vector> for &'b Vector {
  type Output = Vector;
  fn sub(self, other: &'a Vector) -> Vector {
    Vector(array_init(|i| &self.0[i] - &other.0[i]))
  }
}

impl<'a> Mul<&'a Number> for &'a Vector {
  type Output = Vector;
  fn mul(self, scalar: &'a Number) -> Vector {
    Vector(array_init(|i| &self.0[i] * scalar))
  }
}

impl Neg for Vector {
  type Output = Self;
  fn neg(self) -> Self {
    let [x, y] = self.0;
    Vector([-x, -y])
  }
}

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;

  #[test]
  fn perp_is_ccw() {
    let v = Vector::from([3, 1]);
    let w = v.perp();
    assert_eq!(w, Vector::from([-1, 3]));
    assert!(v.cross(&w) > Number::zero());
    assert!(v.dot(&w).is_zero());
  }

  #[test]
  fn arithmetic() {
    let v = Vector::from([1, 2]);
    let w = Vector::from([3, -4]);
    assert_eq!(&v + &w, Vector::from([4, -2]));
    assert_eq!(&v - &w, Vector::from([-2, 6]));
    assert_eq!(-v.clone(), Vector::from([-1, -2]));
    assert_eq!(&v * &Number::from_integer(3.into()), Vector::from([3, 6]));
    assert_eq!(w.squared_magnitude(), Number::from_integer(25.into()));
    assert!(Vector::from([0, 0]).is_zero());
  }

  #[test]
  fn sort_by_angle() {
    let x_axis = Vector::from([1, 0]);
    let mut dirs = vec![
      Vector::from([0, -1]),
      Vector::from([-1, 0]),
      Vector::from([1, 1]),
      Vector::from([2, 0]),
    ];
    dirs.sort_by(|a, b| x_axis.ccw_cmp_around(a, b));
    assert_eq!(
      dirs,
      vec![
        Vector::from([2, 0]),
        Vector::from([1, 1]),
        Vector::from([-1, 0]),
        Vector::from([0, -1]),
      ]
    );
  }
}
