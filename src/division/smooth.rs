use {
  crate::geometry::{self, from_coord, P2},
  geo::{Geometry, LineString, Polygon},
};

/// Curve used to round a corner `a → b → c`, with `b` the corner vertex.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CornerCurve {
  /// Quadratic Bézier with `b` as control point.
  Bezier,
  /// Quadratic through `b` at `t = 1/2`.
  Interpolating
}

impl CornerCurve {
  pub fn sample(self, a: P2, b: P2, c: P2, t: f64) -> P2 {
    let bezier = |a: f64, b: f64, c: f64| (1.0 - t).powi(2) * a + 2.0 * t * (1.0 - t) * b + t.powi(2) * c;
    let lift = |a: f64, b: f64, c: f64| match self {
      CornerCurve::Bezier => 0.0,
      CornerCurve::Interpolating => 4.0 * (0.25 - (t - 0.5).powi(2)) * (-0.25 * a + 0.5 * b - 0.25 * c)
    };
    P2::new(
      bezier(a.x, b.x, c.x) + lift(a.x, b.x, c.x),
      bezier(a.y, b.y, c.y) + lift(a.y, b.y, c.y),
    )
  }
}

#[derive(Copy, Clone, Debug)]
pub struct SmoothConfig {
  /// Blend length along each edge adjacent to a corner, capped at half the shorter edge.
  pub min_length: f64,
  /// Treat the ring's closing coordinate as a duplicate of the first vertex.
  pub drop_closing_vertex: bool,
  /// Points per corner curve.
  pub samples: usize,
  pub curve: CornerCurve
}

impl Default for SmoothConfig {
  fn default() -> Self {
    Self {
      min_length: 20.0,
      drop_closing_vertex: true,
      samples: 8,
      curve: CornerCurve::Bezier
    }}}

/// Fraction of the shorter adjacent edge consumed by the blend at a corner.
pub fn blend_rate(prev: P2, vertex: P2, next: P2, min_length: f64) -> f64 {
  let shortest = next.distance_to(vertex).min(prev.distance_to(vertex));
  (min_length / shortest).min(0.5)
}

/// Curve points replacing the corner at `vertex`, from the start point on the incoming
/// edge towards the end point on the outgoing edge (end excluded).
pub fn corner(prev: P2, vertex: P2, next: P2, config: &SmoothConfig) -> impl Iterator<Item = P2> {
  let rate = blend_rate(prev, vertex, next, config.min_length);
  let start = vertex.lerp(prev, rate);
  let end = vertex.lerp(next, rate);
  let (samples, curve) = (config.samples, config.curve);
  (0..samples).map(move |i| curve.sample(start, vertex, end, i as f64 / samples as f64))
}

/// Replace every corner of the exterior ring with a blended curve. Holes are kept as is.
pub fn smooth_polygon(polygon: &Polygon<f64>, config: &SmoothConfig) -> Polygon<f64> {
  let mut vertices: Vec<P2> = polygon.exterior().coords()
    .map(|&c| from_coord(c))
    .collect();
  if config.drop_closing_vertex {
    vertices.pop();
  }
  let n = vertices.len();
  if n < 3 {
    return polygon.clone();
  }

  let ring: LineString<f64> = (0..n)
    .flat_map(|i| corner(vertices[(n + i - 1) % n], vertices[i], vertices[(i + 1) % n], config))
    .map(geometry::to_coord)
    .collect();
  Polygon::new(ring, polygon.interiors().to_vec())
}

/// [`smooth_polygon`] on polygons; any other geometry passes through unchanged.
pub fn smooth_geometry(geometry: Geometry<f64>, config: &SmoothConfig) -> Geometry<f64> {
  match geometry {
    Geometry::Polygon(polygon) => Geometry::Polygon(smooth_polygon(&polygon, config)),
    other => other
  }
}
