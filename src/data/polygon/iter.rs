use crate::data::{Point, Segment};

/// Forward iterator over the vertices of a polygon in boundary order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
  pub(crate) iter: std::slice::Iter<'a, Point>,
}

impl<'a> Iterator for Iter<'a> {
  type Item = &'a Point;
  fn next(&mut self) -> Option<&'a Point> {
    self.iter.next()
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.iter.size_hint()
  }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> DoubleEndedIterator for Iter<'a> {
  fn next_back(&mut self) -> Option<&'a Point> {
    self.iter.next_back()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectedEdge<'a> {
  pub src: &'a Point,
  pub dst: &'a Point,
}

impl DirectedEdge<'_> {
  pub fn to_segment(&self) -> Segment {
    Segment::new(self.src.clone(), self.dst.clone())
  }
}

impl<'a> From<DirectedEdge<'a>> for Segment {
  fn from(edge: DirectedEdge<'a>) -> Segment {
    edge.to_segment()
  }
}

/// Iterator over the edges of a polygon. A closed polygon also yields the
/// edge from its last vertex back to its first.
#[derive(Debug, Clone)]
pub struct EdgeIter<'a> {
  pub(crate) vertices: &'a [Point],
  pub(crate) index: usize,
  pub(crate) count: usize,
}

impl<'a> Iterator for EdgeIter<'a> {
  type Item = DirectedEdge<'a>;
  fn next(&mut self) -> Option<Self::Item> {
    if self.index >= self.count {
      return None;
    }
    let n = self.vertices.len();
    let edge = DirectedEdge {
      src: &self.vertices[self.index],
      dst: &self.vertices[(self.index + 1) % n],
    };
    self.index += 1;
    Some(edge)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let len = self.count - self.index;
    (len, Some(len))
  }
}

impl ExactSizeIterator for EdgeIter<'_> {}
