use {
  super::DivisionConfig,
  crate::{
    geometry::{self, Disk, P2},
    site::Site
  },
  geo::{Area, BooleanOps, Contains},
  itertools::iproduct,
  rand::Rng
};

/// Tangency-packed disks anchoring the circulation network: entrance seeds first,
/// then grown disks in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Collection {
  disks: Vec<Disk>,
  seeds: usize
}

impl Collection {
  pub fn seeded(seeds: &[Disk]) -> Self {
    Self {
      disks: seeds.to_vec(),
      seeds: seeds.len()
    }
  }

  pub fn disks(&self) -> &[Disk] {
    &self.disks
  }

  pub fn seeds(&self) -> &[Disk] {
    &self.disks[..self.seeds]
  }

  pub fn grown(&self) -> &[Disk] {
    &self.disks[self.seeds..]
  }

  pub fn len(&self) -> usize {
    self.disks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.disks.is_empty()
  }

  fn push(&mut self, disk: Disk) {
    self.disks.push(disk)
  }

  /// Distance to the nearest disk, 0 inside any of them and infinite without disks.
  pub fn distance(&self, point: P2) -> f64 {
    self.disks.iter()
      .map(|disk| disk.distance(point))
      .fold(f64::INFINITY, f64::min)
  }

  /// Share of the site covered by the disks, summed per disk.
  pub fn coverage(&self, site: &Site, segments: usize) -> f64 {
    let site_polygon = geometry::multi(site.polygon().clone());
    self.disks.iter()
      .map(|disk| geometry::multi(disk.to_polygon(segments))
        .intersection(&site_polygon)
        .unsigned_area())
      .sum::<f64>() / site.area()
  }
}


/// `density × density` lattice over the site envelope, restricted to points farther than
/// `clearance` from the boundary.
pub fn candidate_points(site: &Site, density: usize, clearance: f64) -> Vec<P2> {
  let envelope = site.envelope();
  let (min, size) = (envelope.min(), envelope.max() - envelope.min());
  let interior = site.interior(clearance);
  let step = |i: usize| i as f64 / density as f64;

  iproduct!(0..density, 0..density)
    .map(|(j, i)| P2::new(min.x + size.x * step(i), min.y + size.y * step(j)))
    .filter(|&p| interior.contains(&geometry::to_geo_point(p)))
    .collect()
}

/// Stochastic circle packing seeded by `seeds`.
///
/// Each iteration draws a random candidate `p` and its distance `d` to the collection:
/// - empty collection: a disk of random radius in `[min_r, max_r]` is placed at `p`;
/// - `d < min_r`: `p` is dropped;
/// - `d > max_r`: `p` stays in the pool for a later iteration;
/// - otherwise a disk of radius `d + tangency_overlap` is placed at `p`.
///
/// Stops after `max_iterations` draws or when the pool is exhausted.
pub fn grow_collection<R: Rng + ?Sized>(
  site: &Site,
  seeds: &[Disk],
  config: &DivisionConfig,
  rng: &mut R
) -> Collection {
  let mut candidates = candidate_points(site, config.density, config.clearance);
  let mut collection = Collection::seeded(seeds);

  for iteration in 0..config.max_iterations {
    if candidates.is_empty() {
      log::trace!("candidate pool exhausted after {} iterations", iteration);
      break;
    }
    let index = rng.gen_range(0..candidates.len());
    let point = candidates[index];

    if collection.is_empty() {
      let radius = rng.gen_range(config.min_r..=config.max_r);
      log::trace!("#{}: first disk at {:?}, r = {:.2}", iteration, point, radius);
      collection.push(Disk::new(point, radius));
      candidates.swap_remove(index);
      continue;
    }

    let distance = collection.distance(point);
    if distance < config.min_r {
      log::trace!("#{}: dropped {:?}, {:.2} from the collection", iteration, point, distance);
      candidates.swap_remove(index);
    } else if distance > config.max_r {
      log::trace!("#{}: deferred {:?}, {:.2} from the collection", iteration, point, distance);
    } else {
      let radius = distance + config.tangency_overlap;
      log::trace!("#{}: grown disk at {:?}, r = {:.2}", iteration, point, radius);
      collection.push(Disk::new(point, radius));
      candidates.swap_remove(index);
    }
  }

  log::trace!(
    "collection: {} seeds, {} grown, {} candidates left",
    collection.seeds, collection.grown().len(), candidates.len()
  );
  collection
}
