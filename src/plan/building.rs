use {
  super::PlanConfig,
  crate::geometry::{self, Disk, Footprint, P2},
  euclid::Angle,
  geo::{unary_union, BooleanOps, MultiPolygon, Polygon}
};

/// Building footprint centered at `center`, its length along `angle`.
pub fn building(config: &PlanConfig, center: P2, angle: Angle<f64>) -> Footprint {
  Footprint::new(center, config.building_length, config.building_width, angle)
}

/// Region shaded by `building`, excluding the building itself.
///
/// Union of the footprint stretched by `shadow_extension` along its length and the
/// footprint widened to `2 × shadow_h`, plus clearance disks at the corners when
/// configured.
pub fn shadow(config: &PlanConfig, building: &Footprint) -> MultiPolygon<f64> {
  let long = building.resized(building.length + config.shadow_extension, building.width);
  let tall = building.resized(building.length, 2.0 * config.shadow_h);

  let mut parts: Vec<Polygon<f64>> = vec![long.to_polygon(), tall.to_polygon()];
  if let Some(radius) = config.corner_clearance {
    parts.extend(building.corners().iter()
      .map(|&corner| Disk::new(corner, radius).to_polygon(config.disk_segments)));
  }

  unary_union(&parts)
    .xor(&geometry::multi(building.to_polygon()))
}
