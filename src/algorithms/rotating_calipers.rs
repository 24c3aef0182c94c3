// https://en.wikipedia.org/wiki/Rotating_calipers
use tracing::debug;

use crate::data::{Point, Polygon, Segment};
use crate::{Error, Number, Violation};

/// Two vertices at maximum distance, with `first <= second`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diameter {
  pub first: Point,
  pub second: Point,
  pub distance_squared: Number,
}

impl Diameter {
  fn new(a: &Point, b: &Point) -> Diameter {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    Diameter {
      first: first.clone(),
      second: second.clone(),
      distance_squared: a.squared_distance(b),
    }
  }

  pub fn distance_f64(&self) -> f64 {
    self.first.distance_f64(&self.second)
  }
}

/// The narrowest strip holding a convex polygon. One side of the strip runs
/// along `edge`; the other touches `opposite`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Width {
  pub edge: Segment,
  pub opposite: Point,
  pub width_squared: Number,
}

impl Width {
  pub fn width_f64(&self) -> f64 {
    crate::rational_to_f64(&self.width_squared).sqrt()
  }
}

// Twice the signed area of `a`, `b`, `c`.
fn area2(a: &Point, b: &Point, c: &Point) -> Number {
  (b - a).cross(&(c - a))
}

// Closed hulls of one or two points are accepted as they are; larger rings
// must be convex.
fn convex_ring(poly: &Polygon) -> Result<Vec<Point>, Error> {
  poly.require_closed()?;
  match poly.size() {
    0 => Err(Violation::InsufficientVertices.into()),
    1 | 2 => Ok(poly.as_slice().to_vec()),
    _ => poly.ccw_convex_ring(),
  }
}

// Visit every antipodal vertex pair of a strictly convex counter-clockwise
// ring. `visit(i, j)` is called once per edge `i -> i + 1` with `j` the vertex
// farthest from that edge's line.
fn antipodal(ring: &[Point], mut visit: impl FnMut(usize, usize)) {
  let n = ring.len();
  let mut j = 1;
  for i in 0..n {
    let i1 = (i + 1) % n;
    while area2(&ring[i], &ring[i1], &ring[(j + 1) % n]) > area2(&ring[i], &ring[i1], &ring[j]) {
      j = (j + 1) % n;
    }
    visit(i, j);
  }
}

/// Farthest pair of vertices of a convex polygon, in linear time.
///
/// Closed polygons of one or two vertices, as returned for degenerate hulls,
/// are accepted.
///
/// ```rust
/// # use planar_geom::algorithms::diameter;
/// # use planar_geom::data::{Point, Polygon};
/// let square = Polygon::from_points(vec![
///   Point::from([0, 0]),
///   Point::from([4, 0]),
///   Point::from([4, 4]),
///   Point::from([0, 4]),
/// ])?;
/// let d = diameter(&square)?;
/// assert_eq!(d.distance_f64(), 32f64.sqrt());
/// # Ok::<(), planar_geom::Error>(())
/// ```
///
/// # Errors
///
/// - [`Violation::PolygonOpen`] if the polygon is open.
/// - [`Violation::InsufficientVertices`] if it has no vertices.
/// - [`Violation::ConvexViolation`] if it is not convex.
pub fn diameter(poly: &Polygon) -> Result<Diameter, Error> {
  let ring = convex_ring(poly)?;
  let n = ring.len();
  let mut best = Diameter::new(&ring[0], &ring[n - 1]);
  if n >= 3 {
    antipodal(&ring, |i, j| {
      let (i1, j1) = ((i + 1) % n, (j + 1) % n);
      // With an edge parallel to `i -> i + 1`, `j + 1` is antipodal as well.
      for &(a, b) in [(i, j), (i1, j), (i, j1), (i1, j1)].iter() {
        if ring[a].squared_distance(&ring[b]) > best.distance_squared {
          best = Diameter::new(&ring[a], &ring[b]);
        }
      }
    });
  }
  debug!(vertices = n, distance_squared = %best.distance_squared, "diameter");
  Ok(best)
}

/// Minimum width of a convex polygon, in linear time.
///
/// The squared width is exact: for the edge `e` and opposite vertex `v` it is
/// `cross(e, v - e.src)^2 / |e|^2`. One and two vertex hulls have width zero.
///
/// # Errors
///
/// - [`Violation::PolygonOpen`] if the polygon is open.
/// - [`Violation::InsufficientVertices`] if it has no vertices.
/// - [`Violation::ConvexViolation`] if it is not convex.
pub fn minimum_width(poly: &Polygon) -> Result<Width, Error> {
  let ring = convex_ring(poly)?;
  let n = ring.len();
  let mut best = Width {
    edge: Segment::new(ring[0].clone(), ring[n - 1].clone()),
    opposite: ring[0].clone(),
    width_squared: Number::from_integer(0.into()),
  };
  if n >= 3 {
    let mut narrowest: Option<Width> = None;
    antipodal(&ring, |i, j| {
      let edge = Segment::new(ring[i].clone(), ring[(i + 1) % n].clone());
      let height = area2(&edge.src, &edge.tgt, &ring[j]);
      let length = edge.src.squared_distance(&edge.tgt);
      let width_squared = &height * &height / length;
      if narrowest.as_ref().map_or(true, |w| width_squared < w.width_squared) {
        narrowest = Some(Width {
          edge,
          opposite: ring[j].clone(),
          width_squared,
        });
      }
    });
    if let Some(width) = narrowest {
      best = width;
    }
  }
  debug!(vertices = n, width_squared = %best.width_squared, "minimum width");
  Ok(best)
}
