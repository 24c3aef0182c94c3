//! Voronoi diagrams as the dual of a Delaunay triangulation.
use std::collections::HashMap;
use tracing::debug;

use crate::algorithms::triangulation::delaunay::{triangulate, Delaunay};
use crate::data::{Point, TriangleView, Vector};

mod clip;
pub use clip::*;

/// Geometry of a Voronoi edge. Vertex indices point into
/// [`Voronoi::vertices`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeKind {
  /// Between the circumcenters of the two triangles that share a Delaunay
  /// edge. The endpoints coincide when the four sites are cocircular.
  Segment { src: usize, tgt: usize },
  /// From the circumcenter of a hull triangle, away from the triangulation.
  Ray { src: usize, direction: Vector },
}

/// The part of the bisector of `site_u` and `site_v` where both sites are
/// nearest. `site_u < site_v`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoronoiEdge {
  pub site_u: usize,
  pub site_v: usize,
  pub kind: EdgeKind,
}

impl VoronoiEdge {
  pub fn is_unbounded(&self) -> bool {
    matches!(self.kind, EdgeKind::Ray { .. })
  }
}

/// Region of the plane nearest to one site.
///
/// `vertices` and `edges` are listed counter-clockwise around the site. In an
/// unbounded cell the first and last edges are rays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoronoiCell {
  pub site: usize,
  pub vertices: Vec<usize>,
  pub edges: Vec<usize>,
  pub bounded: bool,
}

/// Voronoi diagram of a point set.
///
/// `sites` are the Delaunay sites: distinct and in lexicographic order.
/// `vertices[t]` is the circumcenter of Delaunay triangle `t`, and there is
/// one edge per Delaunay edge, sorted by `(site_u, site_v)`. `cells[i]`
/// belongs to `sites[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Voronoi {
  pub sites: Vec<Point>,
  pub vertices: Vec<Point>,
  pub edges: Vec<VoronoiEdge>,
  pub cells: Vec<VoronoiCell>,
}

/// Triangulate `points` and take the dual.
pub fn voronoi(points: &[Point]) -> Voronoi {
  Voronoi::from_delaunay(&triangulate(points))
}

impl From<&Delaunay> for Voronoi {
  fn from(delaunay: &Delaunay) -> Voronoi {
    Voronoi::from_delaunay(delaunay)
  }
}

impl Voronoi {
  /// Dual of a triangulation built by
  /// [`triangulate`](crate::algorithms::triangulation::triangulate).
  pub fn from_delaunay(delaunay: &Delaunay) -> Voronoi {
    let Delaunay { sites, triangles } = delaunay;

    // Directed edge to the triangle that has it in counter-clockwise order.
    let mut owner: HashMap<(usize, usize), usize> = HashMap::with_capacity(triangles.len() * 3);
    for (t, &[a, b, c]) in triangles.iter().enumerate() {
      owner.insert((a, b), t);
      owner.insert((b, c), t);
      owner.insert((c, a), t);
    }

    let vertices: Vec<Point> = triangles
      .iter()
      .map(|&[a, b, c]| {
        let trig = TriangleView::new_unchecked([&sites[a], &sites[b], &sites[c]]);
        debug_assert!(trig.orientation().is_ccw());
        // Colinear corners have no circumcenter. Triangulations never
        // contain them; fall back to the first corner for hand-built input.
        trig.circumcenter().unwrap_or_else(|| sites[a].clone())
      })
      .collect();

    let mut edges = Vec::new();
    let mut edge_index: HashMap<(usize, usize), usize> = HashMap::new();
    for (u, v) in delaunay.edges() {
      let kind = match (owner.get(&(u, v)), owner.get(&(v, u))) {
        (Some(&left), Some(&right)) => EdgeKind::Segment {
          src: left,
          tgt: right,
        },
        (Some(&t), None) => EdgeKind::Ray {
          src: t,
          direction: outward(&sites[u], &sites[v]),
        },
        (None, Some(&t)) => EdgeKind::Ray {
          src: t,
          direction: outward(&sites[v], &sites[u]),
        },
        (None, None) => continue,
      };
      edge_index.insert((u, v), edges.len());
      edges.push(VoronoiEdge {
        site_u: u,
        site_v: v,
        kind,
      });
    }

    let cells = (0..sites.len())
      .map(|site| cell_around(site, triangles, &owner, &edge_index))
      .collect();

    debug!(
      sites = sites.len(),
      vertices = vertices.len(),
      edges = edges.len(),
      "voronoi"
    );
    Voronoi {
      sites: sites.clone(),
      vertices,
      edges,
      cells,
    }
  }

  pub fn vertex(&self, idx: usize) -> Option<&Point> {
    self.vertices.get(idx)
  }

  /// Sites whose cells share an edge with the cell of `site`.
  pub fn neighbours(&self, site: usize) -> Vec<usize> {
    self
      .edges
      .iter()
      .filter_map(|edge| {
        if edge.site_u == site {
          Some(edge.site_v)
        } else if edge.site_v == site {
          Some(edge.site_u)
        } else {
          None
        }
      })
      .collect()
  }
}

// Right-hand normal of the hull edge `a -> b`. The triangulation lies to the
// left of every hull edge, so this points out of it.
fn outward(a: &Point, b: &Point) -> Vector {
  let d = b - a;
  -d.perp()
}

fn undirected(a: usize, b: usize) -> (usize, usize) {
  (a.min(b), a.max(b))
}

// Walk the triangles around `site` counter-clockwise. Triangle `[site, x, y]`
// is followed by the owner of `(site, y)`. On the hull the walk starts at the
// triangle whose edge `(site, x)` has no twin.
fn cell_around(
  site: usize,
  triangles: &[[usize; 3]],
  owner: &HashMap<(usize, usize), usize>,
  edge_index: &HashMap<(usize, usize), usize>,
) -> VoronoiCell {
  // Incident triangles as (triangle, x, y) with [site, x, y] ccw.
  let fan: HashMap<usize, (usize, usize)> = triangles
    .iter()
    .enumerate()
    .filter_map(|(t, &[a, b, c])| {
      if a == site {
        Some((t, (b, c)))
      } else if b == site {
        Some((t, (c, a)))
      } else if c == site {
        Some((t, (a, b)))
      } else {
        None
      }
    })
    .collect();

  let first = fan
    .iter()
    .filter(|&(_, &(x, _))| !owner.contains_key(&(x, site)))
    .map(|(&t, _)| t)
    .min()
    .or_else(|| fan.keys().copied().min());
  let mut cell = VoronoiCell {
    site,
    vertices: Vec::new(),
    edges: Vec::new(),
    bounded: false,
  };
  let mut focus = match first {
    Some(t) => t,
    None => return cell,
  };

  for _ in 0..fan.len() {
    let (x, y) = fan[&focus];
    cell.vertices.push(focus);
    if let Some(&e) = edge_index.get(&undirected(site, x)) {
      cell.edges.push(e);
    }
    match owner.get(&(site, y)) {
      Some(&next) if next == cell.vertices[0] => {
        cell.bounded = true;
        break;
      }
      Some(&next) => focus = next,
      None => {
        if let Some(&e) = edge_index.get(&undirected(site, y)) {
          cell.edges.push(e);
        }
        break;
      }
    }
  }
  cell
}
