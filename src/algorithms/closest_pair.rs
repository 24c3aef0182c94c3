// https://en.wikipedia.org/wiki/Closest_pair_of_points_problem
use tracing::debug;

use crate::data::{Point, Segment};
use crate::{Error, Number, Violation};

/// Two input points at minimum distance, with `first <= second`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosestPair {
  pub first: Point,
  pub second: Point,
  pub distance_squared: Number,
}

impl ClosestPair {
  fn new(a: &Point, b: &Point) -> ClosestPair {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    ClosestPair {
      first: first.clone(),
      second: second.clone(),
      distance_squared: a.squared_distance(b),
    }
  }

  /// Euclidean distance, rounded to the nearest `f64`.
  pub fn distance_f64(&self) -> f64 {
    self.first.distance_f64(&self.second)
  }

  pub fn segment(&self) -> Segment {
    Segment::new(self.first.clone(), self.second.clone())
  }
}

/// Closest pair of points by divide and conquer, $O(n \log^2 n)$.
///
/// Distances are compared squared and exactly. Repeated points are a pair at
/// distance zero. When several pairs share the minimum distance, any one of
/// them may be returned.
///
/// ```rust
/// # use planar_geom::algorithms::closest_pair;
/// # use planar_geom::data::Point;
/// # use planar_geom::Number;
/// let points = vec![
///   Point::from([0, 0]),
///   Point::from([10, 10]),
///   Point::from([2, 1]),
///   Point::from([6, 6]),
/// ];
/// let pair = closest_pair(&points)?;
/// assert_eq!(pair.first, Point::from([0, 0]));
/// assert_eq!(pair.second, Point::from([2, 1]));
/// assert_eq!(pair.distance_squared, Number::from_integer(5.into()));
/// # Ok::<(), planar_geom::Error>(())
/// ```
///
/// # Errors
///
/// [`Violation::InsufficientPoints`] if fewer than two points are given.
pub fn closest_pair(points: &[Point]) -> Result<ClosestPair, Error> {
  if points.len() < 2 {
    return Err(Violation::InsufficientPoints.into());
  }
  let mut pts = points.to_vec();
  pts.sort_unstable();
  // Sorting puts repeated points next to each other.
  let best = match pts.windows(2).find(|w| w[0] == w[1]) {
    Some(w) => ClosestPair::new(&w[0], &w[1]),
    None => split(&pts),
  };
  debug!(points = points.len(), distance_squared = %best.distance_squared, "closest pair");
  Ok(best)
}

/// The closest pair as a segment. Degenerate when the input repeats a point.
///
/// # Errors
///
/// [`Violation::InsufficientPoints`] if fewer than two points are given.
pub fn closest_segment(points: &[Point]) -> Result<Segment, Error> {
  closest_pair(points).map(|pair| pair.segment())
}

// `pts` is sorted and holds at least two points.
fn split(pts: &[Point]) -> ClosestPair {
  if pts.len() <= 3 {
    return brute_force(pts);
  }
  let mid = pts.len() / 2;
  let left = split(&pts[..mid]);
  let right = split(&pts[mid..]);
  let mut best = if right.distance_squared < left.distance_squared {
    right
  } else {
    left
  };

  let divider = pts[mid].x_coord();
  let mut strip: Vec<&Point> = pts
    .iter()
    .filter(|pt| {
      let dx = pt.x_coord() - divider;
      &dx * &dx < best.distance_squared
    })
    .collect();
  strip.sort_by(|a, b| a.y_coord().cmp(b.y_coord()));
  for (i, a) in strip.iter().enumerate() {
    for b in strip[i + 1..].iter() {
      let dy = b.y_coord() - a.y_coord();
      if &dy * &dy >= best.distance_squared {
        break;
      }
      if a.squared_distance(b) < best.distance_squared {
        best = ClosestPair::new(a, b);
      }
    }
  }
  best
}

fn brute_force(pts: &[Point]) -> ClosestPair {
  let mut best = ClosestPair::new(&pts[0], &pts[1]);
  for (i, a) in pts.iter().enumerate() {
    for b in pts[i + 1..].iter() {
      if a.squared_distance(b) < best.distance_squared {
        best = ClosestPair::new(a, b);
      }
    }
  }
  best
}
