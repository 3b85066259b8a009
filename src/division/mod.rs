//! Carving circulation out of a site and searching for a balanced, connected subdivision.
//!
//! One attempt runs, in order:
//! [`locate_entrances`] → [`grow_collection`] → [`build_roads`] → [`synthesize`]
//! (which smooths every lot with [`smooth_polygon`]).
//! [`DivisionSearch`] repeats attempts under fresh randomness and keeps the connected
//! result with the smallest lot area ratio.

use {
  crate::{
    geometry::{self, Disk},
    site::Site,
    profile
  },
  anyhow::{ensure, Result},
  geo::{unary_union, Area, BooleanOps, Buffer, LineString, MultiPolygon, Polygon},
  rand::Rng
};

pub mod entrance;
pub mod collection;
pub mod roads;
pub mod smooth;

pub use {
  entrance::{locate_entrances, EntranceConfig},
  collection::{grow_collection, Collection},
  roads::{build_roads, Road},
  smooth::{smooth_polygon, CornerCurve, SmoothConfig}
};

#[derive(Clone, Debug)]
pub struct DivisionConfig {
  /// Smallest grown disk radius, also the minimum separation of a candidate point.
  pub min_r: f64,
  pub max_r: f64,
  /// Candidate lattice is `density × density` over the site envelope.
  pub density: usize,
  /// Polygon resolution of disks entering boolean operations.
  pub disk_segments: usize,
  pub entrance: EntranceConfig,
  /// Candidates closer than this to the boundary are discarded.
  pub clearance: f64,
  /// Draw cap of the collection builder.
  pub max_iterations: usize,
  /// Grown disks reach this far past the tangency point.
  pub tangency_overlap: f64,
  /// Longest road, `2 × max_r` when unset.
  pub max_road_distance: Option<f64>,
  pub road_half_width: f64,
  /// Erosion of the region between site and envelope that roads may not cross.
  pub margin_erosion: f64,
  pub smoothing: SmoothConfig,
  /// Attempt budget, derived from the site area when unset.
  pub max_attempts: Option<usize>
}

impl Default for DivisionConfig {
  fn default() -> Self {
    Self {
      min_r: 60.0,
      max_r: 80.0,
      density: 20,
      disk_segments: 32,
      entrance: EntranceConfig::default(),
      clearance: 15.0,
      max_iterations: 200,
      tangency_overlap: 1.0,
      max_road_distance: None,
      road_half_width: 4.0,
      margin_erosion: 5.0,
      smoothing: SmoothConfig::default(),
      max_attempts: None
    }}}

impl DivisionConfig {
  pub fn validate(&self) -> Result<()> {
    ensure!(self.min_r > 0.0, "min_r must be positive, got {}", self.min_r);
    ensure!(self.min_r <= self.max_r, "min_r ({}) exceeds max_r ({})", self.min_r, self.max_r);
    ensure!(self.density > 0, "candidate density must be positive");
    ensure!(self.disk_segments >= 3, "disks need at least 3 segments, got {}", self.disk_segments);
    ensure!(self.road_half_width > 0.0, "road half width must be positive, got {}", self.road_half_width);
    ensure!(self.smoothing.samples > 0, "corner curves need at least one sample");
    ensure!(self.entrance.radius > 0.0, "entrance radius must be positive, got {}", self.entrance.radius);
    Ok(())
  }

  pub fn road_distance(&self) -> f64 {
    self.max_road_distance.unwrap_or(2.0 * self.max_r)
  }

  pub fn attempts_for(&self, site: &Site) -> usize {
    self.max_attempts.unwrap_or_else(|| attempt_budget(site.area()))
  }
}

/// Retry cap by site area.
pub fn attempt_budget(area: f64) -> usize {
  match area {
    a if a < 10_000.0 => 5,
    a if a < 50_000.0 => 10,
    a if a < 100_000.0 => 15,
    _ => 25
  }
}

/// Buildable lots, smallest first, and the circulation footprint they were cut by.
#[derive(Clone, Debug)]
pub struct Division {
  pub lots: Vec<Polygon<f64>>,
  pub circulation: MultiPolygon<f64>
}

impl Division {
  /// `max(lot area) / min(lot area)`, infinite without lots.
  pub fn area_ratio(&self) -> f64 {
    let areas = self.lots.iter().map(|lot| lot.unsigned_area());
    let (min, max) = areas.fold((f64::INFINITY, 0.0f64), |(min, max), a| (min.min(a), max.max(a)));
    if self.lots.is_empty() || min <= 0.0 {
      f64::INFINITY
    } else {
      max / min
    }
  }

  /// Whether the circulation footprint is a single piece.
  pub fn is_connected(&self) -> bool {
    self.circulation.0.len() == 1
  }
}

/// Union of buffered roads and entrance zones.
pub fn circulation_footprint(roads: &[Road], entrances: &[Disk], config: &DivisionConfig) -> MultiPolygon<f64> {
  let parts: Vec<Polygon<f64>> = roads.iter()
    .flat_map(|road| LineString::from(road.line()).buffer(config.road_half_width).0)
    .chain(entrances.iter().map(|disk| disk.to_polygon(config.disk_segments)))
    .collect();
  unary_union(&parts)
}

/// Site minus circulation, split into lots sorted by area and smoothed.
pub fn synthesize(site: &Site, roads: &[Road], entrances: &[Disk], config: &DivisionConfig) -> Division {
  let circulation = circulation_footprint(roads, entrances, config);
  let residual = geometry::multi(site.polygon().clone())
    .difference(&circulation);

  let mut lots = geometry::pieces(residual);
  lots.sort_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()));
  let lots = lots.iter()
    .map(|lot| smooth_polygon(lot, &config.smoothing))
    .collect();

  Division { lots, circulation }
}

/// Outcome of one generation attempt.
#[derive(Clone, Debug)]
pub struct Attempt {
  pub index: usize,
  pub collection: Collection,
  pub roads: Vec<Road>,
  pub division: Division,
  pub area_ratio: f64,
  pub connected: bool
}

/// Constrained multi-start search: connectivity of the circulation is a hard filter,
/// lot area balance the objective.
pub struct DivisionSearch<'a> {
  site: &'a Site,
  config: DivisionConfig,
  entrances: Vec<Disk>,
  margin: MultiPolygon<f64>
}

impl <'a> DivisionSearch<'a> {
  pub fn new(site: &'a Site, config: DivisionConfig) -> Result<Self> {
    config.validate()?;
    let entrances = locate_entrances(site, &config.entrance);
    let margin = site.outer_margin(config.margin_erosion);
    Ok(Self { site, config, entrances, margin })
  }

  pub fn config(&self) -> &DivisionConfig {
    &self.config
  }

  pub fn entrances(&self) -> &[Disk] {
    &self.entrances
  }

  pub fn max_attempts(&self) -> usize {
    self.config.attempts_for(self.site)
  }

  pub fn attempt<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Attempt {
    let collection = grow_collection(self.site, &self.entrances, &self.config, rng);
    let roads = build_roads(&collection, &self.margin, self.config.road_distance());
    let division = synthesize(self.site, &roads, &self.entrances, &self.config);
    let area_ratio = division.area_ratio();
    let connected = division.is_connected();

    log::debug!(
      "attempt #{}: {} disks (coverage {:.2}), {} roads, {} lots, {} circulation pieces, area ratio {:.3}",
      index,
      collection.len(),
      collection.coverage(self.site, self.config.disk_segments),
      roads.len(),
      division.lots.len(),
      division.circulation.0.len(),
      area_ratio
    );
    Attempt { index, collection, roads, division, area_ratio, connected }
  }

  /// Lazily evaluated attempts, up to the attempt budget.
  pub fn attempts<'s, R: Rng + ?Sized>(&'s self, rng: &'s mut R) -> Attempts<'s, 'a, R> {
    Attempts {
      search: self,
      rng,
      next: 0,
      budget: self.max_attempts()
    }
  }

  /// Best connected division, `None` when no attempt produced a connected circulation.
  pub fn search<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Division> {
    let best = profile!("division search", self.attempts(rng)
      .fold(None, |best: Option<Attempt>, attempt| {
        let best_ratio = best.as_ref().map_or(f64::INFINITY, |b| b.area_ratio);
        if attempt.connected && attempt.area_ratio < best_ratio {
          Some(attempt)
        } else {
          best
        }
      }));

    match best {
      Some(attempt) => {
        log::info!(
          "accepted attempt #{}: {} lots, area ratio {:.3}",
          attempt.index, attempt.division.lots.len(), attempt.area_ratio
        );
        Some(attempt.division)
      },
      None => {
        log::info!("no connected division in {} attempts", self.max_attempts());
        None
      }
    }
  }
}

pub struct Attempts<'s, 'a, R: ?Sized> {
  search: &'s DivisionSearch<'a>,
  rng: &'s mut R,
  next: usize,
  budget: usize
}

impl <'s, 'a, R: Rng + ?Sized> Iterator for Attempts<'s, 'a, R> {
  type Item = Attempt;

  fn next(&mut self) -> Option<Attempt> {
    (self.next < self.budget).then(|| {
      let attempt = self.search.attempt(self.next, self.rng);
      self.next += 1;
      attempt
    })
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let left = self.budget - self.next;
    (left, Some(left))
  }
}
