mod half_plane;
mod line_segment;
pub(crate) mod point;
pub mod polygon;
mod triangle;
mod vector;

pub use half_plane::*;
pub use line_segment::*;
pub use triangle::*;

#[doc(inline)]
pub use crate::data::polygon::{EdgeIter, Iter, Polygon};
pub use point::Point;
pub use vector::Vector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PointLocation {
  Inside,
  OnBoundary,
  Outside,
}
