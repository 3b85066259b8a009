//! Typed points and vectors, analytic shapes, and helpers around the [`geo`] kernel.
//!
//! All curve and footprint arithmetic is done on typed [`P2`] / [`V2`] in [`SiteSpace`];
//! conversion to [`geo`] types happens only at the boundary with the geometry kernel.

use {
  euclid::{Point2D, Vector2D},
  geo::{Area, BooleanOps, Coord, LineString, MultiPolygon, Polygon, Rect},
  itertools::Itertools
};

pub mod shapes;
pub use shapes::*;


/// Site coordinate basis, in site units (typically meters).
#[derive(Debug, Copy, Clone)]
pub struct SiteSpace;

pub type P2 = Point2D<f64, SiteSpace>;
pub type V2 = Vector2D<f64, SiteSpace>;

/// Signed distance function
pub trait SDF {
  fn sdf(&self, point: P2) -> f64;
}

#[inline]
pub fn to_coord(point: P2) -> Coord<f64> {
  Coord { x: point.x, y: point.y }
}

#[inline]
pub fn from_coord(coord: Coord<f64>) -> P2 {
  P2::new(coord.x, coord.y)
}

pub fn to_geo_point(point: P2) -> geo::Point<f64> {
  geo::Point::from(to_coord(point))
}

/// Closed polygon through `points`, without holes.
pub fn polygon(points: impl IntoIterator<Item = P2>) -> Polygon<f64> {
  Polygon::new(
    points.into_iter().map(to_coord).collect::<LineString<f64>>(),
    vec![]
  )
}

/// Distinct ring vertices, in ring order, without the closing coordinate.
pub fn ring_vertices(ring: &LineString<f64>) -> Vec<P2> {
  let mut vertices: Vec<P2> = ring.coords()
    .map(|&c| from_coord(c))
    .dedup()
    .collect();
  if vertices.len() > 1 && vertices.first() == vertices.last() {
    vertices.pop();
  }
  vertices
}

pub fn multi(polygon: Polygon<f64>) -> MultiPolygon<f64> {
  MultiPolygon::new(vec![polygon])
}

/// Enumerate the pieces of a multi-piece result, dropping degenerate ones.
pub fn pieces(geometry: MultiPolygon<f64>) -> Vec<Polygon<f64>> {
  geometry.0.into_iter()
    .filter(|piece| piece.unsigned_area() > 0.0)
    .collect()
}

/// Axis-aligned rectangle grown by `margin` on every side.
pub fn grow(rect: Rect<f64>, margin: f64) -> Rect<f64> {
  let delta = Coord { x: margin, y: margin };
  Rect::new(rect.min() - delta, rect.max() + delta)
}

/// Area of `a ∩ b`.
pub fn overlap_area(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> f64 {
  a.intersection(b).unsigned_area()
}
