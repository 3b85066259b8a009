use {
  super::collection::Collection,
  crate::geometry::{to_coord, P2},
  geo::{Intersects, Line, MultiPolygon},
  itertools::Itertools
};

/// Straight segment between the centers of two collection disks.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Road {
  /// Indices into the collection.
  pub from: usize,
  pub to: usize,
  pub start: P2,
  pub end: P2
}

impl Road {
  pub fn length(&self) -> f64 {
    self.start.distance_to(self.end)
  }

  pub fn line(&self) -> Line<f64> {
    Line::new(to_coord(self.start), to_coord(self.end))
  }
}

/// Proximity graph over the collection: every pair of disks closer than `max_distance`,
/// unless the connecting segment crosses `margin`.
///
/// No connectivity is guaranteed.
pub fn build_roads(collection: &Collection, margin: &MultiPolygon<f64>, max_distance: f64) -> Vec<Road> {
  collection.disks().iter()
    .enumerate()
    .tuple_combinations()
    .filter(|((_, a), (_, b))| a.center.distance_to(b.center) < max_distance)
    .map(|((from, a), (to, b))| Road { from, to, start: a.center, end: b.center })
    .filter(|road| !road.line().intersects(margin))
    .collect()
}
