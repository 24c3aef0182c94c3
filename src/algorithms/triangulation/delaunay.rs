// https://en.wikipedia.org/wiki/Bowyer%E2%80%93Watson_algorithm
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

use crate::algorithms::convex_hull::distinct_sorted;
use crate::data::{Point, PointLocation, TriangleView};
use crate::{in_circumcircle, Error};

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct VertIdx(pub usize);
impl std::fmt::Debug for VertIdx {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    if self.is_ghost() {
      write!(fmt, "v∞")
    } else {
      write!(fmt, "v{}", self.0)
    }
  }
}

/// The vertex at infinity. Triangles that use it close off the outside of
/// the convex hull.
const GHOST: VertIdx = VertIdx(usize::MAX);

impl VertIdx {
  pub fn is_ghost(&self) -> bool {
    *self == GHOST
  }
}

// Vertices in counter-clockwise order. For a ghost triangle `[u, v, GHOST]`
// the outside of the hull is to the left of `u -> v`.
type Tri = [VertIdx; 3];

fn is_ghost_tri(t: &Tri) -> bool {
  t[2].is_ghost()
}

fn directed_edges(t: &Tri) -> [(VertIdx, VertIdx); 3] {
  [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])]
}

// Rotate a new triangle so that a ghost vertex, if any, comes last.
fn normalize(t: Tri) -> Tri {
  let [a, b, c] = t;
  if a.is_ghost() {
    [b, c, a]
  } else if b.is_ghost() {
    [c, a, b]
  } else {
    t
  }
}

/// Delaunay triangulation of a point set.
///
/// `sites` holds the distinct input points in lexicographic order (by x,
/// then y). Each triangle is a counter-clockwise triple of indices into
/// `sites`, rotated so the smallest index comes first, and the triangle list is
/// sorted. The result is therefore a pure function of the input point set: the
/// order of the input does not matter.
///
/// ```rust
/// # use planar_geom::algorithms::triangulation::delaunay::triangulate;
/// # use planar_geom::data::Point;
/// let square = vec![
///   Point::from([0, 0]),
///   Point::from([4, 0]),
///   Point::from([4, 4]),
///   Point::from([0, 4]),
/// ];
/// let delaunay = triangulate(&square);
/// assert_eq!(delaunay.sites[1], Point::from([0, 4]));
/// assert_eq!(delaunay.triangles, vec![[0, 2, 1], [1, 2, 3]]);
/// assert!(delaunay.is_delaunay());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delaunay {
  pub sites: Vec<Point>,
  pub triangles: Vec<[usize; 3]>,
}

impl Delaunay {
  /// Same as [`triangulate`].
  pub fn new(points: &[Point]) -> Delaunay {
    triangulate(points)
  }

  /// Triangulate floating point input. The coordinates are converted exactly.
  ///
  /// # Errors
  ///
  /// [`Violation::NonFiniteCoordinate`](crate::Violation::NonFiniteCoordinate)
  /// if any coordinate is NaN or infinite.
  pub fn from_f64(points: &[[f64; 2]]) -> Result<Delaunay, Error> {
    let points = points
      .iter()
      .map(|&[x, y]| Point::try_from_f64(x, y))
      .collect::<Result<Vec<Point>, Error>>()?;
    Ok(triangulate(&points))
  }

  pub fn triangle(&self, idx: usize) -> Option<TriangleView<'_>> {
    let [a, b, c] = *self.triangles.get(idx)?;
    Some(TriangleView::new([
      &self.sites[a],
      &self.sites[b],
      &self.sites[c],
    ]))
  }

  /// Directed hull edges with the triangulation on their left, in the order
  /// of the triangle list.
  pub fn hull_edges(&self) -> Vec<(usize, usize)> {
    let edges: HashSet<(usize, usize)> = self
      .triangles
      .iter()
      .flat_map(|&[a, b, c]| vec![(a, b), (b, c), (c, a)])
      .collect();
    self
      .triangles
      .iter()
      .flat_map(|&[a, b, c]| vec![(a, b), (b, c), (c, a)])
      .filter(|&(a, b)| !edges.contains(&(b, a)))
      .collect()
  }

  /// Undirected edges `(min, max)`, sorted and without repeats.
  pub fn edges(&self) -> Vec<(usize, usize)> {
    let mut edges: Vec<(usize, usize)> = self
      .triangles
      .iter()
      .flat_map(|&[a, b, c]| vec![(a, b), (b, c), (c, a)])
      .map(|(a, b)| (a.min(b), a.max(b)))
      .collect();
    edges.sort_unstable();
    edges.dedup();
    edges
  }

  /// $O(n t)$ check that every triangle is counter-clockwise and that no site
  /// lies strictly inside any circumcircle.
  pub fn is_delaunay(&self) -> bool {
    self.triangles.iter().all(|&[a, b, c]| {
      let (pa, pb, pc) = (&self.sites[a], &self.sites[b], &self.sites[c]);
      pa.orientation(pb, pc).is_ccw()
        && self
          .sites
          .iter()
          .all(|p| in_circumcircle(pa, pb, pc, p) != PointLocation::Inside)
    })
  }

  /// $O(t)$ version of [`Delaunay::is_delaunay`]: every triangle is
  /// counter-clockwise, no directed edge repeats, and across every interior
  /// edge the opposite corner is not strictly inside the circumcircle. For a
  /// triangulation of the convex hull this local condition implies the global
  /// one.
  pub fn is_locally_delaunay(&self) -> bool {
    let mut opposite: HashMap<(usize, usize), usize> = HashMap::new();
    for &[a, b, c] in self.triangles.iter() {
      if !self.sites[a].orientation(&self.sites[b], &self.sites[c]).is_ccw() {
        return false;
      }
      for &(u, v, w) in [(a, b, c), (b, c, a), (c, a, b)].iter() {
        if opposite.insert((u, v), w).is_some() {
          return false;
        }
      }
    }
    opposite.iter().all(|(&(u, v), &w)| match opposite.get(&(v, u)) {
      Some(&x) => {
        in_circumcircle(&self.sites[u], &self.sites[v], &self.sites[w], &self.sites[x])
          != PointLocation::Inside
      }
      None => true,
    })
  }
}

/// Bowyer–Watson triangulation.
///
/// Repeated points are merged. Fewer than three distinct points, or only
/// colinear points, give an empty triangle list. Sites are inserted in
/// lexicographic order; with cocircular sites this fixed order is what
/// decides between the equally valid diagonals.
pub fn triangulate(points: &[Point]) -> Delaunay {
  let sites = distinct_sorted(points);
  debug!(points = points.len(), sites = sites.len(), "delaunay: start");
  let triangles = BowyerWatson::run(&sites);
  debug!(triangles = triangles.len(), "delaunay: done");
  Delaunay { sites, triangles }
}

type TriIdx = usize;

struct BowyerWatson<'a> {
  sites: &'a [Point],
  triangles: Vec<Tri>,
  alive: Vec<bool>,
  // Directed edge to the live triangle that owns it.
  edges: HashMap<(VertIdx, VertIdx), TriIdx>,
}

impl<'a> BowyerWatson<'a> {
  fn run(sites: &'a [Point]) -> Vec<[usize; 3]> {
    let n = sites.len();
    if n < 3 {
      return vec![];
    }
    let apex = match (2..n).find(|&k| !sites[0].orientation(&sites[1], &sites[k]).is_colinear()) {
      Some(k) => k,
      None => return vec![],
    };
    let mut bw = BowyerWatson::new(sites, [VertIdx(0), VertIdx(1), VertIdx(apex)]);
    // Site k - 1 is always on the hull when site k arrives: either it is the
    // lexicographic maximum so far, or it ends the colinear run before `apex`.
    for k in (2..n).filter(|&k| k != apex) {
      bw.insert(VertIdx(k), VertIdx(k - 1));
    }
    bw.check_invariant("finished");
    bw.finish()
  }

  fn new(sites: &'a [Point], seed: Tri) -> Self {
    let [a, b, c] = seed;
    let [a, b, c] = if sites[a.0].orientation(&sites[b.0], &sites[c.0]).is_ccw() {
      [a, b, c]
    } else {
      [a, c, b]
    };
    let mut bw = BowyerWatson {
      sites,
      triangles: Vec::with_capacity(2 * sites.len() + 2),
      alive: Vec::with_capacity(2 * sites.len() + 2),
      edges: HashMap::with_capacity(6 * sites.len()),
    };
    for t in [[a, b, c], [b, a, GHOST], [c, b, GHOST], [a, c, GHOST]].iter() {
      bw.push(*t);
    }
    bw
  }

  fn vert(&self, idx: VertIdx) -> &'a Point {
    &self.sites[idx.0]
  }

  fn push(&mut self, t: Tri) {
    let idx = self.triangles.len();
    for edge in directed_edges(&t).iter() {
      let prev = self.edges.insert(*edge, idx);
      debug_assert!(prev.is_none(), "edge {:?} used twice", edge);
    }
    self.triangles.push(t);
    self.alive.push(true);
  }

  fn kill(&mut self, idx: TriIdx) {
    self.alive[idx] = false;
    for edge in directed_edges(&self.triangles[idx]).iter() {
      self.edges.remove(edge);
    }
  }

  fn in_conflict(&self, t: &Tri, p: &Point) -> bool {
    let [a, b, c] = *t;
    if is_ghost_tri(t) {
      let (u, v) = (self.vert(a), self.vert(b));
      match u.orientation(v, p) {
        crate::Orientation::CounterClockWise => true,
        crate::Orientation::ClockWise => false,
        crate::Orientation::CoLinear => p.is_between(u, v) && p != u && p != v,
      }
    } else {
      in_circumcircle(self.vert(a), self.vert(b), self.vert(c), p) == PointLocation::Inside
    }
  }

  // A triangle whose circumcircle (or outer half-plane) holds `p`. The ghost
  // triangles around the hull vertex `anchor` are tried first.
  fn first_conflict(&self, anchor: VertIdx, p: &Point) -> Option<TriIdx> {
    let near = [(anchor, GHOST), (GHOST, anchor)];
    near
      .iter()
      .filter_map(|edge| self.edges.get(edge).copied())
      .find(|&t| self.in_conflict(&self.triangles[t], p))
      .or_else(|| {
        trace!(?anchor, "delaunay: anchor missed, scanning");
        (0..self.triangles.len()).find(|&t| self.alive[t] && self.in_conflict(&self.triangles[t], p))
      })
  }

  fn insert(&mut self, idx: VertIdx, anchor: VertIdx) {
    let p = self.vert(idx);
    let start = match self.first_conflict(anchor, p) {
      Some(t) => t,
      None => {
        debug_assert!(false, "no triangle conflicts with {:?}", idx);
        return;
      }
    };

    // The conflicting triangles form a connected cavity; grow it across
    // shared edges.
    let mut cavity: HashSet<TriIdx> = HashSet::new();
    cavity.insert(start);
    let mut stack = vec![start];
    while let Some(t) = stack.pop() {
      for &(a, b) in directed_edges(&self.triangles[t]).iter() {
        if let Some(&n) = self.edges.get(&(b, a)) {
          if !cavity.contains(&n) && self.in_conflict(&self.triangles[n], p) {
            cavity.insert(n);
            stack.push(n);
          }
        }
      }
    }

    let boundary: Vec<(VertIdx, VertIdx)> = cavity
      .iter()
      .flat_map(|&t| directed_edges(&self.triangles[t]))
      .filter(|&(a, b)| {
        self
          .edges
          .get(&(b, a))
          .map_or(true, |n| !cavity.contains(n))
      })
      .collect();
    trace!(site = ?idx, removed = cavity.len(), cavity = boundary.len(), "delaunay: insert");

    for &t in cavity.iter() {
      self.kill(t);
    }
    let first_new = self.triangles.len();
    for (a, b) in boundary {
      self.push(normalize([a, b, idx]));
    }
    self.check_star(first_new);
  }

  #[allow(unused)]
  #[cfg(not(debug_assertions))]
  fn check_star(&self, first_new: TriIdx) {}

  // The triangles fanned around a new site are counter-clockwise and every
  // one of their edges has a twin.
  #[cfg(debug_assertions)]
  fn check_star(&self, first_new: TriIdx) {
    for t in self.triangles[first_new..].iter() {
      for &(a, b) in directed_edges(t).iter() {
        assert!(self.edges.contains_key(&(b, a)), "invariant violated: no twin for {:?}", (a, b));
      }
      if !is_ghost_tri(t) {
        let [a, b, c] = *t;
        assert!(
          self.vert(a).orientation(self.vert(b), self.vert(c)).is_ccw(),
          "invariant violated: {:?} is not ccw",
          t
        );
      }
    }
  }

  #[allow(unused)]
  #[cfg(not(debug_assertions))]
  fn check_invariant(&self, msg: &str) {}

  // Every directed edge is used once and its twin exists: the triangles tile
  // the plane. Finite triangles are counter-clockwise.
  #[cfg(debug_assertions)]
  fn check_invariant(&self, msg: &str) {
    let mut edges = HashSet::new();
    for (i, t) in self.live() {
      for edge in directed_edges(t).iter() {
        assert!(edges.insert(*edge), "invariant violated: {}, {:?}", msg, t);
        assert_eq!(self.edges.get(edge), Some(&i), "invariant violated: {}, stale edge map", msg);
      }
      if !is_ghost_tri(t) {
        let [a, b, c] = *t;
        assert!(
          self.vert(a).orientation(self.vert(b), self.vert(c)).is_ccw(),
          "invariant violated: {}, {:?} is not ccw",
          msg,
          t
        );
      }
    }
    assert_eq!(edges.len(), self.edges.len(), "invariant violated: {}, edge map size", msg);
    for &(a, b) in edges.iter() {
      assert!(edges.contains(&(b, a)), "invariant violated: {}, no twin for {:?}", msg, (a, b));
    }
  }

  fn live(&self) -> impl Iterator<Item = (TriIdx, &Tri)> + '_ {
    self
      .triangles
      .iter()
      .enumerate()
      .filter(move |(i, _)| self.alive[*i])
  }

  fn finish(self) -> Vec<[usize; 3]> {
    let mut triangles: Vec<[usize; 3]> = self
      .live()
      .map(|(_, t)| t)
      .filter(|t| !is_ghost_tri(t))
      .map(|&[a, b, c]| {
        let t = [a.0, b.0, c.0];
        let min = (0..3).min_by_key(|&i| t[i]).unwrap_or(0);
        [t[min], t[(min + 1) % 3], t[(min + 2) % 3]]
      })
      .collect();
    triangles.sort_unstable();
    triangles
  }
}

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;
  use crate::testing::*;

  use claims::{assert_err, assert_ok};
  use proptest::prelude::*;
  use test_strategy::proptest;

  fn pts(coords: &[(i64, i64)]) -> Vec<Point> {
    coords.iter().map(|&c| Point::from(c)).collect()
  }

  #[test]
  fn single_triangle() {
    let d = triangulate(&pts(&[(0, 0), (6, 0), (2, 4)]));
    assert_eq!(d.sites, pts(&[(0, 0), (2, 4), (6, 0)]));
    assert_eq!(d.triangles, vec![[0, 2, 1]]);
    assert!(d.triangle(0).unwrap().orientation().is_ccw());
    assert!(d.triangle(1).is_none());
  }

  #[test]
  fn square() {
    let d = triangulate(&pts(&[(0, 0), (4, 0), (4, 4), (0, 4)]));
    assert_eq!(d.triangles.len(), 2);
    assert_eq!(d.edges().len(), 5);
    assert_eq!(d.hull_edges().len(), 4);
    assert!(d.is_delaunay());
  }

  #[test]
  fn colinear() {
    let d = triangulate(&pts(&[(0, 0), (1, 1), (2, 2), (3, 3)]));
    assert_eq!(d.sites.len(), 4);
    assert!(d.triangles.is_empty());
    assert!(d.edges().is_empty());
  }

  #[test]
  fn too_few() {
    assert!(triangulate(&[]).triangles.is_empty());
    assert!(triangulate(&pts(&[(1, 1), (1, 1), (2, 1)])).triangles.is_empty());
    assert_eq!(triangulate(&pts(&[(1, 1), (1, 1), (2, 1)])).sites.len(), 2);
  }

  #[test]
  fn unit_square_orders() {
    let a = triangulate(&pts(&[(0, 0), (1, 0), (1, 1), (0, 1)]));
    let b = triangulate(&pts(&[(1, 1), (0, 1), (1, 0), (0, 0)]));
    assert_eq!(a, b);
    assert_eq!(a.triangles.len(), 2);
  }

  #[test]
  fn colinear_then_apex() {
    // The first three sorted sites are colinear.
    let d = triangulate(&pts(&[(0, 0), (0, 1), (0, 2), (0, 3), (5, 1)]));
    assert_eq!(d.triangles.len(), 3);
    assert!(d.is_delaunay());
    assert_eq!(d.hull_edges().len(), 5);
  }

  #[test]
  fn point_on_hull_edge() {
    let d = triangulate(&pts(&[(0, 0), (4, 0), (0, 4), (2, 0)]));
    assert_eq!(d.triangles.len(), 2);
    assert!(d.is_delaunay());
  }

  #[test]
  fn from_f64() {
    let d = assert_ok!(Delaunay::from_f64(&[[0.0, 0.0], [1.5, 0.0], [0.0, 0.5]]));
    assert_eq!(d.triangles.len(), 1);
    let err = assert_err!(Delaunay::from_f64(&[[0.0, f64::INFINITY]]));
    assert_eq!(err.violation(), crate::Violation::NonFiniteCoordinate);
  }

  #[test]
  fn local_check_rejects_flipped_diagonal() {
    // A kite: the short diagonal (2,-1)-(2,1) is the Delaunay one.
    let d = triangulate(&pts(&[(0, 0), (4, 0), (2, 1), (2, -1)]));
    assert!(d.is_locally_delaunay());
    assert_eq!(d.triangles, vec![[0, 1, 2], [1, 3, 2]]);
    let flipped = Delaunay {
      sites: d.sites.clone(),
      triangles: vec![[0, 1, 3], [0, 3, 2]],
    };
    assert!(!flipped.is_delaunay());
    assert!(!flipped.is_locally_delaunay());
    let clockwise = Delaunay {
      sites: d.sites.clone(),
      triangles: vec![[0, 2, 1]],
    };
    assert!(!clockwise.is_locally_delaunay());
  }

  // Many sites on one vertical line before the first apex: each one is
  // inserted off the end of a colinear hull run.
  #[test]
  fn long_colinear_run() {
    let mut input: Vec<Point> = (0..40).map(|i| Point::from([0, i])).collect();
    input.push(Point::from([3, 7]));
    input.push(Point::from([5, 30]));
    let d = triangulate(&input);
    assert!(d.is_delaunay());
    assert_eq!(d.triangles.len(), 2 * d.sites.len() - 2 - d.hull_edges().len());
  }

  #[proptest]
  fn delaunay_property(#[strategy(any_grid_points(0..30))] points: Vec<Point>) {
    let d = triangulate(&points);
    prop_assert!(d.is_delaunay());
    prop_assert!(d.is_locally_delaunay());
    for pt in points.iter() {
      prop_assert!(d.sites.contains(pt));
    }
  }

  // Triangles tile the convex hull: their areas add up to the hull area.
  #[proptest]
  fn covers_hull(#[strategy(any_grid_points(0..30))] points: Vec<Point>) {
    use crate::algorithms::convex_hull::HullAlgorithm;
    use crate::Number;
    use num_traits::Zero;
    let d = triangulate(&points);
    let hull = HullAlgorithm::default().hull(&points);
    let area = (0..d.triangles.len())
      .filter_map(|i| d.triangle(i))
      .fold(Number::zero(), |acc, t| acc + t.signed_area_2x());
    if hull.size() >= 3 {
      prop_assert_eq!(area, hull.signed_area_2x());
    } else {
      prop_assert!(d.triangles.is_empty());
    }
  }

  #[proptest]
  fn order_independent(
    #[strategy(any_grid_points_shuffled(0..25))] input: (Vec<Point>, Vec<Point>),
  ) {
    let (original, shuffled) = input;
    prop_assert_eq!(triangulate(&original), triangulate(&shuffled));
  }

  #[proptest]
  fn cocircular(#[strategy(any_cocircular_points())] points: Vec<Point>) {
    let d = triangulate(&points);
    prop_assert!(d.is_delaunay());
    // Points in convex position: n - 2 triangles.
    prop_assert_eq!(d.triangles.len(), d.sites.len() - 2);
    let mut sorted = points.clone();
    sorted.sort();
    prop_assert_eq!(triangulate(&sorted), d);
  }

  // Euler: t = 2n - 2 - h for points not all colinear, counting every
  // site on the hull boundary.
  #[proptest]
  fn euler_count(#[strategy(any_points(3..40))] points: Vec<Point>) {
    let d = triangulate(&points);
    if !d.triangles.is_empty() {
      let h = d.hull_edges().len();
      prop_assert_eq!(d.triangles.len(), 2 * d.sites.len() - 2 - h);
    }
  }
}
