use num_traits::*;
use std::cmp::Ordering;
use tracing::trace;

use crate::data::{prune_ring, Point, PointLocation, Segment};
use crate::{Error, Number, Orientation, Violation};

mod iter;
pub use iter::*;

/// Ordered sequence of vertices with an explicit open/closed state.
///
/// Vertices are added one at a time with [`Polygon::add_vertex`] and the
/// boundary is sealed with [`Polygon::close`]. Both operations reject inputs
/// that would make the boundary self-intersect, so a closed polygon is always
/// simple. The winding is kept exactly as authored.
///
/// ```rust
/// # use planar_geom::data::{Point, Polygon};
/// # use planar_geom::Orientation;
/// let mut poly = Polygon::new();
/// poly.add_vertex(Point::from([0, 0]))?;
/// poly.add_vertex(Point::from([0, 4]))?;
/// poly.add_vertex(Point::from([4, 4]))?;
/// poly.close()?;
/// assert!(poly.is_closed());
/// assert_eq!(poly.orientation(), Orientation::ClockWise);
/// # Ok::<(), planar_geom::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polygon {
  pub(crate) vertices: Vec<Point>,
  pub(crate) closed: bool,
}

impl Polygon {
  pub fn new() -> Polygon {
    Polygon::default()
  }

  /// Closed polygon from a vertex ring that is already known to be valid.
  /// Degenerate rings (fewer than three vertices) are allowed; they are how
  /// hulls of tiny inputs are represented.
  pub(crate) fn new_closed_unchecked(vertices: Vec<Point>) -> Polygon {
    Polygon {
      vertices,
      closed: true,
    }
  }

  /// Add every point in order and close the result.
  pub fn from_points<I>(points: I) -> Result<Polygon, Error>
  where
    I: IntoIterator<Item = Point>,
  {
    let mut poly = Polygon::new();
    for pt in points {
      poly.add_vertex(pt)?;
    }
    poly.close()?;
    Ok(poly)
  }

  /// Append a vertex to an open polygon.
  ///
  /// A vertex equal to the current last vertex is ignored. A vertex that
  /// continues the last edge in the same direction replaces the last vertex.
  ///
  /// # Errors
  ///
  /// - [`Violation::PolygonClosed`] if the polygon has been closed.
  /// - [`Violation::SelfIntersections`] if the new edge doubles back over the
  ///   last edge or touches any earlier edge.
  pub fn add_vertex(&mut self, pt: Point) -> Result<(), Error> {
    if self.closed {
      return Err(Violation::PolygonClosed.into());
    }
    let n = self.vertices.len();
    if self.vertices.last() == Some(&pt) {
      return Ok(());
    }
    if n >= 2 {
      let a = &self.vertices[n - 2];
      let b = &self.vertices[n - 1];
      if a.orientation(b, &pt).is_colinear() {
        if !b.is_between(a, &pt) {
          return Err(Violation::SelfIntersections.into());
        }
        trace!(vertex = %pt, "extending colinear edge");
        self.check_new_edge(n - 2, &pt)?;
        self.vertices[n - 1] = pt;
        return Ok(());
      }
    }
    if n >= 1 {
      self.check_new_edge(n - 1, &pt)?;
    }
    self.vertices.push(pt);
    Ok(())
  }

  // The edge from vertex `from` to `pt` must not touch any edge of the chain
  // except the one ending at `from`.
  fn check_new_edge(&self, from: usize, pt: &Point) -> Result<(), Error> {
    let new_edge = Segment::new(self.vertices[from].clone(), pt.clone());
    for i in 0..from.saturating_sub(1) {
      let edge = Segment::new(self.vertices[i].clone(), self.vertices[i + 1].clone());
      if edge.intersects(&new_edge) {
        return Err(Violation::SelfIntersections.into());
      }
    }
    Ok(())
  }

  /// Seal the boundary.
  ///
  /// # Errors
  ///
  /// - [`Violation::PolygonClosed`] if the polygon is already closed.
  /// - [`Violation::InsufficientVertices`] with fewer than three vertices.
  /// - [`Violation::SelfIntersections`] if two non-adjacent edges touch or two
  ///   adjacent edges overlap.
  pub fn close(&mut self) -> Result<(), Error> {
    if self.closed {
      return Err(Violation::PolygonClosed.into());
    }
    if self.vertices.len() < 3 {
      return Err(Violation::InsufficientVertices.into());
    }
    self.validate_ring()?;
    self.closed = true;
    Ok(())
  }

  // Pairwise test over the closed ring.
  fn validate_ring(&self) -> Result<(), Error> {
    let n = self.vertices.len();
    let edges: Vec<Segment> = self.ring_edges().map(Segment::from).collect();
    for i in 0..n {
      // Adjacent edges share a vertex and may only meet there.
      let prev = &self.vertices[(i + n - 1) % n];
      let this = &self.vertices[i];
      let next = &self.vertices[(i + 1) % n];
      if prev.orientation(this, next).is_colinear() && !this.is_between(prev, next) {
        return Err(Violation::SelfIntersections.into());
      }
      for j in i + 2..n {
        if i == 0 && j == n - 1 {
          continue;
        }
        if edges[i].intersects(&edges[j]) {
          return Err(Violation::SelfIntersections.into());
        }
      }
    }
    Ok(())
  }

  pub fn is_closed(&self) -> bool {
    self.closed
  }

  pub(crate) fn require_closed(&self) -> Result<(), Error> {
    if self.closed {
      Ok(())
    } else {
      Err(Violation::PolygonOpen.into())
    }
  }

  /// The vertex ring of a convex polygon, counter-clockwise and without
  /// repeated or colinear vertices.
  ///
  /// # Errors
  ///
  /// - [`Violation::PolygonOpen`] if the polygon has not been closed.
  /// - [`Violation::ConvexViolation`] if it is not convex or has no area.
  pub(crate) fn ccw_convex_ring(&self) -> Result<Vec<Point>, Error> {
    self.require_closed()?;
    if !self.is_convex() {
      return Err(Violation::ConvexViolation.into());
    }
    let mut ring = self.vertices.clone();
    if self.orientation().is_cw() {
      ring.reverse();
    }
    Ok(prune_ring(ring))
  }

  pub fn size(&self) -> usize {
    self.vertices.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  pub fn vertex(&self, idx: usize) -> Option<&Point> {
    self.vertices.get(idx)
  }

  pub fn as_slice(&self) -> &[Point] {
    &self.vertices
  }

  /// Vertices in boundary order. Every call starts again from the first
  /// vertex.
  pub fn iter(&self) -> Iter<'_> {
    Iter {
      iter: self.vertices.iter(),
    }
  }

  /// Boundary edges. Open polygons yield only the edges of their chain.
  pub fn iter_edges(&self) -> EdgeIter<'_> {
    let n = self.vertices.len();
    let count = if self.closed { n } else { n.saturating_sub(1) };
    EdgeIter {
      vertices: &self.vertices,
      index: 0,
      count,
    }
  }

  fn ring_edges(&self) -> EdgeIter<'_> {
    EdgeIter {
      vertices: &self.vertices,
      index: 0,
      count: self.vertices.len(),
    }
  }

  /// Twice the signed area of the vertex ring. Positive for counter-clockwise
  /// rings.
  pub fn signed_area_2x(&self) -> Number {
    self
      .ring_edges()
      .map(|edge| {
        let p = edge.src;
        let q = edge.dst;
        &p.array[0] * &q.array[1] - &q.array[0] * &p.array[1]
      })
      .fold(Number::zero(), |acc, x| acc + x)
  }

  /// Winding of the vertex ring. Rings without area are [`Orientation::CoLinear`].
  pub fn orientation(&self) -> Orientation {
    match self.signed_area_2x().cmp(&Number::zero()) {
      Ordering::Greater => Orientation::CounterClockWise,
      Ordering::Less => Orientation::ClockWise,
      Ordering::Equal => Orientation::CoLinear,
    }
  }

  /// True for closed polygons with area whose every turn goes the same way.
  /// Colinear vertices are permitted.
  pub fn is_convex(&self) -> bool {
    let winding = self.orientation();
    if !self.closed || winding.is_colinear() {
      return false;
    }
    let n = self.vertices.len();
    (0..n).all(|i| {
      let turn = self.vertices[i].orientation(
        &self.vertices[(i + 1) % n],
        &self.vertices[(i + 2) % n],
      );
      turn != winding.reverse()
    })
  }

  /// Locate a point relative to a closed polygon by an exact crossing count.
  ///
  /// # Errors
  ///
  /// [`Violation::PolygonOpen`] if the polygon has not been closed.
  pub fn locate(&self, pt: &Point) -> Result<PointLocation, Error> {
    self.require_closed()?;
    let mut inside = false;
    for edge in self.ring_edges() {
      let (a, b) = (edge.src, edge.dst);
      if pt.is_between(a, b) {
        return Ok(PointLocation::OnBoundary);
      }
      let upward = a.y_coord() <= pt.y_coord() && pt.y_coord() < b.y_coord();
      let downward = b.y_coord() <= pt.y_coord() && pt.y_coord() < a.y_coord();
      let side = a.orientation(b, pt);
      if (upward && side.is_ccw()) || (downward && side.is_cw()) {
        inside = !inside;
      }
    }
    Ok(if inside {
      PointLocation::Inside
    } else {
      PointLocation::Outside
    })
  }

  /// Minimum y, ties broken by minimum x.
  pub fn lowest(&self) -> Option<&Point> {
    self
      .vertices
      .iter()
      .min_by(|a, b| (a.y_coord(), a.x_coord()).cmp(&(b.y_coord(), b.x_coord())))
  }

  /// Maximum y, ties broken by maximum x.
  pub fn highest(&self) -> Option<&Point> {
    self
      .vertices
      .iter()
      .max_by(|a, b| (a.y_coord(), a.x_coord()).cmp(&(b.y_coord(), b.x_coord())))
  }

  /// Minimum x, ties broken by minimum y.
  pub fn leftmost(&self) -> Option<&Point> {
    self.vertices.iter().min()
  }

  /// Maximum x, ties broken by maximum y.
  pub fn rightmost(&self) -> Option<&Point> {
    self.vertices.iter().max()
  }
}

impl<'a> IntoIterator for &'a Polygon {
  type Item = &'a Point;
  type IntoIter = Iter<'a>;
  fn into_iter(self) -> Iter<'a> {
    self.iter()
  }
}
