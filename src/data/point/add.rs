use array_init::array_init;
use std::ops::Add;

use super::Point;
use super::Vector;

// point + vector = point
impl<'a, 'b> Add<&'a Vector> for &'b Point {
  type Output = Point;

  fn add(self: &'b Point, other: &'a Vector) -> Self::Output {
    Point::new(array_init(|i| &self.array[i] + &other.0[i]))
  }
}

impl Add<Vector> for Point {
  type Output = Point;

  fn add(self: Point, other: Vector) -> Self::Output {
    Add::add(&self, &other)
  }
}
