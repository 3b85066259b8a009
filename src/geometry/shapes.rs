use {
  super::{polygon, SiteSpace, SDF, P2, V2},
  euclid::{Angle, Rotation2D},
  geo::Polygon,
  std::f64::consts::TAU
};

/// Disk with an analytic distance; turned into a polygon only when it enters a
/// boolean operation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Disk {
  pub center: P2,
  pub radius: f64
}

impl Disk {
  pub fn new(center: P2, radius: f64) -> Self {
    Self { center, radius }
  }

  /// Distance from `point` to the disk, 0 inside.
  pub fn distance(&self, point: P2) -> f64 {
    self.sdf(point).max(0.0)
  }

  pub fn to_polygon(&self, segments: usize) -> Polygon<f64> {
    polygon((0..segments).map(|i| {
      let theta = TAU * i as f64 / segments as f64;
      self.center + V2::new(theta.cos(), theta.sin()) * self.radius
    }))
  }
}

impl SDF for Disk {
  fn sdf(&self, point: P2) -> f64 {
    (point - self.center).length() - self.radius
  }
}

/// Rectangle of `length` along its orientation and `width` across it,
/// rotated around its center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Footprint {
  pub center: P2,
  pub length: f64,
  pub width: f64,
  pub angle: Angle<f64>
}

impl Footprint {
  pub fn new(center: P2, length: f64, width: f64, angle: Angle<f64>) -> Self {
    Self { center, length, width, angle }
  }

  /// Same center and orientation, other dimensions.
  pub fn resized(&self, length: f64, width: f64) -> Self {
    Self { length, width, ..*self }
  }

  pub fn corners(&self) -> [P2; 4] {
    let rotation: Rotation2D<f64, SiteSpace, SiteSpace> = Rotation2D::new(self.angle);
    let (hl, hw) = (self.length / 2.0, self.width / 2.0);
    [
      V2::new(hl, -hw),
      V2::new(hl, hw),
      V2::new(-hl, hw),
      V2::new(-hl, -hw),
    ].map(|v| self.center + rotation.transform_vector(v))
  }

  pub fn to_polygon(&self) -> Polygon<f64> {
    polygon(self.corners())
  }
}
