//! Triangulations of point sets and of simple polygons.
pub mod delaunay;
pub mod earclip;

pub use delaunay::{triangulate, Delaunay};
pub use earclip::triangulate_polygon;
