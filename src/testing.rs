// Strategies for property tests.
//
// Coordinates are drawn from small integer grids so that generated inputs are
// full of the degeneracies that break inexact geometry: repeated points,
// colinear triples and cocircular quadruples.
use crate::data::{Point, Polygon};

use proptest::collection::{vec, SizeRange};
use proptest::prelude::*;
use proptest::sample::subsequence;
use std::cmp::Ordering;

pub const GRID: i64 = 8;

/// A point with both coordinates in `-GRID..=GRID`.
pub fn any_grid_point() -> impl Strategy<Value = Point> {
  (-GRID..=GRID, -GRID..=GRID).prop_map(Point::from)
}

/// A point from a much wider range. Mostly in general position.
pub fn any_point() -> impl Strategy<Value = Point> {
  (-100_000i64..=100_000, -100_000i64..=100_000).prop_map(Point::from)
}

pub fn any_grid_points(size: impl Into<SizeRange>) -> impl Strategy<Value = Vec<Point>> {
  vec(any_grid_point(), size)
}

pub fn any_points(size: impl Into<SizeRange>) -> impl Strategy<Value = Vec<Point>> {
  vec(any_point(), size)
}

/// The twelve integer points on the circle of radius 5 around the origin.
pub fn circle_points() -> Vec<Point> {
  let coords: [(i64, i64); 12] = [
    (5, 0),
    (4, 3),
    (3, 4),
    (0, 5),
    (-3, 4),
    (-4, 3),
    (-5, 0),
    (-4, -3),
    (-3, -4),
    (0, -5),
    (3, -4),
    (4, -3),
  ];
  coords.iter().map(|&c| Point::from(c)).collect()
}

/// Three or more cocircular points, shuffled.
pub fn any_cocircular_points() -> impl Strategy<Value = Vec<Point>> {
  subsequence(circle_points(), 3..=12).prop_shuffle()
}

/// A point set together with a permutation of it.
pub fn any_grid_points_shuffled(
  size: impl Into<SizeRange>,
) -> impl Strategy<Value = (Vec<Point>, Vec<Point>)> {
  any_grid_points(size).prop_flat_map(|pts| {
    let original = pts.clone();
    Just(pts)
      .prop_shuffle()
      .prop_map(move |shuffled| (original.clone(), shuffled))
  })
}

/// A simple counter-clockwise polygon that is star-shaped around the origin.
///
/// Grid points are sorted by angle, one point is kept per direction, and the
/// sample is rejected unless every pair of neighbours turns left around the
/// origin.
pub fn any_star_polygon(size: impl Into<SizeRange>) -> impl Strategy<Value = Polygon> {
  any_grid_points(size).prop_filter_map("origin is not strictly inside", |mut pts| {
    let origin = Point::from([0, 0]);
    pts.retain(|p| *p != origin);
    pts.sort_by(|a, b| origin.ccw_cmp_around(a, b));
    pts.dedup_by(|a, b| origin.ccw_cmp_around(a, b) == Ordering::Equal);
    let n = pts.len();
    if n < 3 || (0..n).any(|i| !origin.orientation(&pts[i], &pts[(i + 1) % n]).is_ccw()) {
      return None;
    }
    Polygon::from_points(pts).ok()
  })
}

/// Axis aligned box from `(-r, -r)` to `(r, r)`, wound either way.
pub fn clip_box(r: i64, ccw: bool) -> Polygon {
  let mut corners = vec![
    Point::from([-r, -r]),
    Point::from([r, -r]),
    Point::from([r, r]),
    Point::from([-r, r]),
  ];
  if !ccw {
    corners.reverse();
  }
  Polygon::new_closed_unchecked(corners)
}
