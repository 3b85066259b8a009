use {
  crate::geometry::{self, from_coord, grow, multi, P2},
  anyhow::{ensure, Context, Result},
  geo::{Area, BooleanOps, BoundingRect, Buffer, MultiPolygon, Polygon, Rect, Validation},
};

/// The outer boundary within which everything is generated.
///
/// Construction validates the polygon, so every algorithm downstream can assume a simple,
/// non-degenerate ring.
#[derive(Debug, Clone)]
pub struct Site {
  polygon: Polygon<f64>,
  area: f64,
  envelope: Rect<f64>
}

impl Site {
  pub fn new(polygon: Polygon<f64>) -> Result<Self> {
    let vertices = geometry::ring_vertices(polygon.exterior());
    ensure!(
      vertices.len() >= 3,
      "site boundary needs at least 3 distinct vertices, got {}", vertices.len()
    );
    ensure!(
      polygon.interiors().is_empty(),
      "site must be a simple polygon without holes, got {} interior rings", polygon.interiors().len()
    );
    ensure!(
      vertices.iter().all(|p| p.x.is_finite() && p.y.is_finite()),
      "site boundary contains non-finite coordinates"
    );
    ensure!(polygon.is_valid(), "site polygon is not valid (self-intersecting or degenerate ring)");

    let area = polygon.unsigned_area();
    ensure!(area > 0.0, "site has zero area");
    let envelope = polygon.bounding_rect()
      .context("site has no bounding rectangle")?;

    Ok(Self { polygon, area, envelope })
  }

  pub fn polygon(&self) -> &Polygon<f64> {
    &self.polygon
  }

  pub fn area(&self) -> f64 {
    self.area
  }

  pub fn envelope(&self) -> Rect<f64> {
    self.envelope
  }

  /// Boundary edges in ring order.
  pub fn edges(&self) -> impl Iterator<Item = (P2, P2)> + '_ {
    self.polygon.exterior()
      .lines()
      .map(|line| (from_coord(line.start), from_coord(line.end)))
  }

  /// Everything between the site and its envelope grown by `margin`.
  pub fn outside(&self, margin: f64) -> MultiPolygon<f64> {
    multi(grow(self.envelope, margin).to_polygon())
      .xor(&multi(self.polygon.clone()))
  }

  /// The non-buildable region between the site and its envelope, eroded by `erosion`.
  ///
  /// Empty for sites that fill their envelope.
  pub fn outer_margin(&self, erosion: f64) -> MultiPolygon<f64> {
    multi(self.envelope.to_polygon())
      .xor(&multi(self.polygon.clone()))
      .buffer(-erosion)
  }

  /// The site eroded by `clearance`.
  pub fn interior(&self, clearance: f64) -> MultiPolygon<f64> {
    self.polygon.buffer(-clearance)
  }
}

impl TryFrom<Polygon<f64>> for Site {
  type Error = anyhow::Error;

  fn try_from(polygon: Polygon<f64>) -> Result<Self> {
    Self::new(polygon)
  }
}
