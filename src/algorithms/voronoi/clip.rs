use tracing::{debug, trace};

use super::Voronoi;
use crate::algorithms::convex_hull::finish;
use crate::data::{prune_ring, HalfPlane, Point, PointLocation, Polygon};
use crate::{Error, Violation};

/// A bounded Voronoi cell together with the site that generated it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClippedCell {
  pub site_index: usize,
  pub site: Point,
  pub polygon: Polygon,
}

/// Intersect every cell with a convex clip polygon of either winding.
///
/// Returns one closed counter-clockwise polygon per site, in site order, each
/// containing its site. Output polygons have no repeated or colinear
/// vertices and start at their lowest vertex.
///
/// A site strictly inside `clip` is strictly inside its cell. A site on the
/// boundary of `clip` is accepted too; its cell then has the site on its
/// boundary rather than in its interior.
///
/// ```rust
/// # use planar_geom::algorithms::voronoi::{clipped_cells, voronoi};
/// # use planar_geom::data::{Point, Polygon};
/// let diagram = voronoi(&[Point::from([-2, 0]), Point::from([2, 0])]);
/// let clip = Polygon::from_points(vec![
///   Point::from([-4, -4]),
///   Point::from([4, -4]),
///   Point::from([4, 4]),
///   Point::from([-4, 4]),
/// ])?;
/// let cells = clipped_cells(&diagram, &clip)?;
/// assert_eq!(
///   cells[0].as_slice(),
///   &[
///     Point::from([-4, -4]),
///     Point::from([0, -4]),
///     Point::from([0, 4]),
///     Point::from([-4, 4]),
///   ]
/// );
/// # Ok::<(), planar_geom::Error>(())
/// ```
///
/// # Errors
///
/// - [`Violation::PolygonOpen`] if `clip` is open.
/// - [`Violation::ConvexViolation`] if `clip` is not convex or has no area.
/// - [`Violation::SiteOutsideClip`] if a site lies outside `clip`. Sites on
///   the boundary of `clip` are not an error.
pub fn clipped_cells(diagram: &Voronoi, clip: &Polygon) -> Result<Vec<Polygon>, Error> {
  Ok(
    clipped_cells_indexed(diagram, clip)?
      .into_iter()
      .map(|cell| cell.polygon)
      .collect(),
  )
}

/// Same as [`clipped_cells`] but each polygon is tagged with its site.
pub fn clipped_cells_indexed(diagram: &Voronoi, clip: &Polygon) -> Result<Vec<ClippedCell>, Error> {
  let ring = clip.ccw_convex_ring()?;
  for site in diagram.sites.iter() {
    if clip.locate(site)? == PointLocation::Outside {
      return Err(Violation::SiteOutsideClip.into());
    }
  }

  let n = diagram.sites.len();
  let mut neighbours: Vec<Vec<usize>> = vec![Vec::new(); n];
  for edge in diagram.edges.iter() {
    neighbours[edge.site_u].push(edge.site_v);
    neighbours[edge.site_v].push(edge.site_u);
  }
  // Without edges (fewer than three sites, or colinear sites) every other
  // site is a potential neighbour.
  if diagram.edges.is_empty() {
    for (i, list) in neighbours.iter_mut().enumerate() {
      list.extend((0..n).filter(|&j| j != i));
    }
  }

  let cells = diagram
    .sites
    .iter()
    .enumerate()
    .map(|(site_index, site)| {
      let cell = neighbours[site_index]
        .iter()
        .fold(ring.clone(), |cell, &other| {
          HalfPlane::closer_to(site, &diagram.sites[other]).clip(&cell)
        });
      let cell = prune_ring(cell);
      trace!(site = site_index, vertices = cell.len(), "clipped cell");
      debug_assert!(cell.len() >= 3);
      ClippedCell {
        site_index,
        site: site.clone(),
        polygon: finish(cell),
      }
    })
    .collect::<Vec<_>>();
  debug!(cells = cells.len(), clip = ring.len(), "clipped voronoi cells");
  Ok(cells)
}

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;
  use crate::algorithms::voronoi::voronoi;
  use crate::testing::*;
  use crate::Number;

  use claims::{assert_err, assert_ok};
  use num_traits::{Signed, Zero};
  use proptest::prelude::*;
  use test_strategy::proptest;

  fn pts(coords: &[(i64, i64)]) -> Vec<Point> {
    coords.iter().map(|&c| Point::from(c)).collect()
  }

  fn check_cells(diagram: &Voronoi, clip: &Polygon, cells: &[ClippedCell]) -> Result<(), TestCaseError> {
    prop_assert_eq!(cells.len(), diagram.sites.len());
    let mut total = Number::zero();
    for (i, cell) in cells.iter().enumerate() {
      prop_assert_eq!(cell.site_index, i);
      prop_assert_eq!(&cell.site, &diagram.sites[i]);
      let poly = &cell.polygon;
      prop_assert!(poly.is_closed());
      prop_assert!(poly.size() >= 3);
      prop_assert!(poly.orientation().is_ccw());
      prop_assert!(poly.is_convex());
      let in_clip = clip.locate(&cell.site).unwrap();
      let in_cell = poly.locate(&cell.site).unwrap();
      match in_clip {
        PointLocation::Inside => prop_assert_eq!(in_cell, PointLocation::Inside),
        _ => prop_assert_eq!(in_cell, PointLocation::OnBoundary),
      }
      // Every vertex is at least as close to its own site as to any other.
      for vertex in poly.iter() {
        let own = vertex.squared_distance(&cell.site);
        for other in diagram.sites.iter() {
          prop_assert!(own <= vertex.squared_distance(other));
        }
      }
      total += poly.signed_area_2x();
    }
    // The cells tile the clip region.
    prop_assert_eq!(total, clip.signed_area_2x().abs());
    Ok(())
  }

  #[test]
  fn single_site() {
    let v = voronoi(&pts(&[(1, 1)]));
    let cells = assert_ok!(clipped_cells(&v, &clip_box(5, false)));
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].as_slice(), clip_box(5, true).as_slice());
  }

  #[test]
  fn box_either_winding() {
    let v = voronoi(&pts(&[(0, 0), (5, 0), (6, 3), (0, 4), (2, 2)]));
    for &ccw in [true, false].iter() {
      let clip = clip_box(10, ccw);
      let cells = assert_ok!(clipped_cells_indexed(&v, &clip));
      check_cells(&v, &clip, &cells).unwrap();
    }
  }

  #[test]
  fn colinear_sites() {
    let v = voronoi(&pts(&[(-4, 0), (0, 0), (4, 0)]));
    let cells = assert_ok!(clipped_cells(&v, &clip_box(6, true)));
    assert_eq!(
      cells[1].as_slice(),
      pts(&[(-2, -6), (2, -6), (2, 6), (-2, 6)]).as_slice()
    );
  }

  #[test]
  fn errors() {
    let v = voronoi(&pts(&[(0, 0), (5, 0), (6, 3), (0, 4), (2, 2)]));

    let concave = Polygon::from_points(pts(&[(0, 0), (6, 0), (3, 2), (6, 6), (0, 6)])).unwrap();
    let err = assert_err!(clipped_cells(&v, &concave));
    assert_eq!(err.violation(), Violation::ConvexViolation);

    let mut open = Polygon::new();
    for pt in pts(&[(-10, -10), (10, -10), (10, 10)]) {
      open.add_vertex(pt).unwrap();
    }
    let err = assert_err!(clipped_cells(&v, &open));
    assert_eq!(err.violation(), Violation::PolygonOpen);

    let small = clip_box(3, true);
    let err = assert_err!(clipped_cells_indexed(&v, &small));
    assert_eq!(err.violation(), Violation::SiteOutsideClip);
  }

  #[test]
  fn site_on_clip_boundary() {
    let v = voronoi(&pts(&[(-5, -5), (5, 5)]));
    let cells = assert_ok!(clipped_cells_indexed(&v, &clip_box(5, true)));
    check_cells(&v, &clip_box(5, true), &cells).unwrap();
    assert_eq!(cells[0].polygon.size(), 3);
    assert_eq!(
      cells[0].polygon.locate(&cells[0].site).unwrap(),
      PointLocation::OnBoundary
    );
  }

  #[proptest]
  fn cells_tile_clip(
    #[strategy(any_grid_points(1..20))] points: Vec<Point>,
    ccw: bool,
  ) {
    let v = voronoi(&points);
    let clip = clip_box(GRID + 1, ccw);
    let cells = clipped_cells_indexed(&v, &clip).map_err(|e| TestCaseError::fail(e.to_string()))?;
    check_cells(&v, &clip, &cells)?;
  }
}
