use {
  crate::{
    geometry::{Disk, P2},
    site::Site
  },
};

#[derive(Copy, Clone, Debug)]
pub struct EntranceConfig {
  /// Target number of entrances.
  pub count: usize,
  pub radius: f64,
  /// Minimum distance between entrance midpoints, `sqrt(site area) / 2` when unset.
  pub separation: Option<f64>
}

impl Default for EntranceConfig {
  fn default() -> Self {
    Self {
      count: 2,
      radius: 25.0,
      separation: None
    }}}

/// Entrance zones on the longest boundary edges.
///
/// Edges are scanned longest first; an edge midpoint is accepted when it is at least
/// `separation` away from every accepted one. Returns fewer than `count` zones when the
/// separation cannot be satisfied.
pub fn locate_entrances(site: &Site, config: &EntranceConfig) -> Vec<Disk> {
  let separation = config.separation
    .unwrap_or_else(|| site.area().sqrt() / 2.0);

  let mut edges: Vec<(P2, P2)> = site.edges().collect();
  // stable: equal edges keep ring order
  edges.sort_by(|(a0, a1), (b0, b1)| b0.distance_to(*b1).total_cmp(&a0.distance_to(*a1)));

  edges.into_iter()
    .map(|(start, end)| start.lerp(end, 0.5))
    .fold(Vec::with_capacity(config.count), |mut accepted: Vec<P2>, midpoint| {
      if accepted.len() < config.count
        && accepted.iter().all(|other| other.distance_to(midpoint) >= separation) {
        accepted.push(midpoint);
      }
      accepted
    })
    .into_iter()
    .map(|midpoint| Disk::new(midpoint, config.radius))
    .collect()
}
