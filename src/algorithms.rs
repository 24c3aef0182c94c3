pub mod closest_pair;
pub mod convex_hull;
pub mod intersection;
pub mod rotating_calipers;
pub mod triangulation;
pub mod voronoi;

#[doc(inline)]
pub use closest_pair::{closest_pair, closest_segment, ClosestPair};

#[doc(inline)]
pub use convex_hull::monotone_chain::convex_hull;

#[doc(inline)]
pub use convex_hull::{ConvexHull, HullAlgorithm};

#[doc(inline)]
pub use intersection::{convex_polygon_intersection, half_plane_intersection, half_planes_of};

#[doc(inline)]
pub use rotating_calipers::{diameter, minimum_width, Diameter, Width};

#[doc(inline)]
pub use triangulation::{triangulate, triangulate_polygon, Delaunay};

#[doc(inline)]
pub use voronoi::{clipped_cells, clipped_cells_indexed, voronoi, ClippedCell, Voronoi};
