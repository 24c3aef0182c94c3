use array_init::{array_init, try_array_init};
use num_bigint::BigInt;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::ops::Deref;
use std::ops::Index;

use super::Vector;
use crate::{float_to_rational, rational_to_f64, Error, Number, Orientation};

/// A point in the plane with exact rational coordinates.
///
/// Points are ordered lexicographically: first by x, then by y.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
  pub array: [Number; 2],
}

// Random sampling on a bounded integer grid.
impl Distribution<Point> for Standard {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
    Point {
      array: array_init(|_| Number::from_integer(BigInt::from(rng.gen::<i32>()))),
    }
  }
}

impl Point {
  pub const fn new(array: [Number; 2]) -> Point {
    Point { array }
  }

  /// Exact conversion from binary floating point coordinates.
  ///
  /// # Errors
  ///
  /// Fails with [`Violation::NonFiniteCoordinate`](crate::Violation::NonFiniteCoordinate)
  /// if either coordinate is NaN or infinite.
  pub fn try_from_f64(x: f64, y: f64) -> Result<Point, Error> {
    Point::try_from([x, y])
  }

  /// Nearest floating point approximation. For reporting only.
  pub fn to_f64(&self) -> [f64; 2] {
    array_init(|i| rational_to_f64(&self.array[i]))
  }

  pub fn x_coord(&self) -> &Number {
    &self.array[0]
  }

  pub fn y_coord(&self) -> &Number {
    &self.array[1]
  }

  pub fn orientation(&self, q: &Point, r: &Point) -> Orientation {
    Orientation::new(&self.array, &q.array, &r.array)
  }

  pub fn squared_distance(&self, rhs: &Point) -> Number {
    let dx = &self.array[0] - &rhs.array[0];
    let dy = &self.array[1] - &rhs.array[1];
    &dx * &dx + &dy * &dy
  }

  /// Euclidean distance, rounded to the nearest `f64`.
  pub fn distance_f64(&self, rhs: &Point) -> f64 {
    rational_to_f64(&self.squared_distance(rhs)).sqrt()
  }

  pub fn cmp_distance_to(&self, p: &Point, q: &Point) -> Ordering {
    self.squared_distance(p).cmp(&self.squared_distance(q))
  }

  /// Compare `p` and `q` by the counter-clockwise angle they make with the
  /// positive x-axis around `self`.
  pub fn ccw_cmp_around(&self, p: &Point, q: &Point) -> Ordering {
    self.ccw_cmp_around_with(&Vector::from([1, 0]), p, q)
  }

  pub fn ccw_cmp_around_with(&self, z: &Vector, p: &Point, q: &Point) -> Ordering {
    Orientation::ccw_cmp_around_with(z, &self.array, &p.array, &q.array)
  }

  /// True if `self` lies on the closed segment from `a` to `b`.
  pub fn is_between(&self, a: &Point, b: &Point) -> bool {
    a.orientation(b, self).is_colinear()
      && (a.x_coord().min(b.x_coord())..=a.x_coord().max(b.x_coord())).contains(&self.x_coord())
      && (a.y_coord().min(b.y_coord())..=a.y_coord().max(b.y_coord())).contains(&self.y_coord())
  }
}

impl Index<usize> for Point {
  type Output = Number;
  fn index(&self, key: usize) -> &Number {
    self.array.index(key)
  }
}

impl Deref for Point {
  type Target = [Number; 2];
  fn deref(&self) -> &[Number; 2] {
    &self.array
  }
}

impl From<[i64; 2]> for Point {
  fn from(array: [i64; 2]) -> Point {
    Point {
      array: array_init(|i| Number::from_integer(BigInt::from(array[i]))),
    }
  }
}

impl From<(i64, i64)> for Point {
  fn from(point: (i64, i64)) -> Point {
    Point::from([point.0, point.1])
  }
}

impl TryFrom<[f64; 2]> for Point {
  type Error = Error;
  fn try_from(array: [f64; 2]) -> Result<Point, Error> {
    Ok(Point {
      array: try_array_init(|i| float_to_rational(array[i]))?,
    })
  }
}

impl From<Vector> for Point {
  fn from(vector: Vector) -> Point {
    Point { array: vector.0 }
  }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.array[0], self.array[1])
  }
}

mod add;
mod sub;
