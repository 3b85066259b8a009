//! Shadow-aware greedy building placement over an accepted [`Division`].
//!
//! Lots are eroded into bands, one pass per offset of [`PlanConfig::erosion_passes`].
//! Candidate footprints are laid along each band's boundary; a candidate is kept when its
//! footprint stays clear of every shadow cast so far (and of everything outside the site
//! and the circulation), and its own shadow stays clear of every building placed so far.

use {
  crate::{
    division::Division,
    geometry::{self, from_coord, Footprint, P2},
    site::Site,
    profile
  },
  anyhow::{ensure, Result},
  euclid::Angle,
  geo::{BooleanOps, Buffer, Intersects, MultiPolygon, Polygon},
  rand::{seq::SliceRandom, Rng, SeedableRng},
  rand_pcg::Pcg64,
  rayon::prelude::*
};

pub mod building;
#[cfg(test)] mod tests;

#[derive(Clone, Debug)]
pub struct PlanConfig {
  pub plan_count: usize,
  pub building_length: f64,
  pub building_width: f64,
  /// Fixed building orientation; when unset buildings follow the band edge.
  pub orientation: Option<Angle<f64>>,
  pub shadow_h: f64,
  /// Extra shadow length beyond both building ends, in total.
  pub shadow_extension: f64,
  /// Radius of clearance disks at the building corners.
  pub corner_clearance: Option<f64>,
  /// Inward lot offsets, applied in order.
  pub erosion_passes: Vec<f64>,
  /// Edge length per candidate slot.
  pub slot_spacing: f64,
  /// Growth of the site envelope when excluding the outside of the site.
  pub envelope_margin: f64,
  pub disk_segments: usize
}

impl Default for PlanConfig {
  fn default() -> Self {
    Self {
      plan_count: 10,
      building_length: 32.0,
      building_width: 16.0,
      orientation: None,
      shadow_h: 80.0,
      shadow_extension: 26.0,
      corner_clearance: None,
      erosion_passes: vec![-10.0, -20.0],
      slot_spacing: 3.0,
      envelope_margin: 1.0,
      disk_segments: 32
    }}}

impl PlanConfig {
  pub fn validate(&self) -> Result<()> {
    ensure!(
      self.building_length > 0.0 && self.building_width > 0.0,
      "building dimensions must be positive, got {} × {}", self.building_length, self.building_width
    );
    ensure!(self.shadow_h >= 0.0, "shadow height must not be negative, got {}", self.shadow_h);
    ensure!(self.slot_spacing > 0.0, "slot spacing must be positive, got {}", self.slot_spacing);
    ensure!(self.envelope_margin > 0.0, "envelope margin must be positive, got {}", self.envelope_margin);
    ensure!(
      self.corner_clearance.is_none() || self.disk_segments >= 3,
      "corner clearance disks need at least 3 segments, got {}", self.disk_segments
    );
    Ok(())
  }
}

/// One plan variant. A plan without buildings is valid.
#[derive(Clone, Debug)]
pub struct Plan {
  /// Buildings in placement order.
  pub buildings: Vec<Footprint>,
  /// Union of `buildings`.
  pub footprint: MultiPolygon<f64>,
  /// Shadow region: outside of the site, circulation, and every cast shadow.
  pub shadows: MultiPolygon<f64>
}

impl Plan {
  fn seeded(shadows: MultiPolygon<f64>) -> Self {
    Self {
      buildings: vec![],
      footprint: MultiPolygon::new(vec![]),
      shadows
    }
  }

  pub fn len(&self) -> usize {
    self.buildings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buildings.is_empty()
  }

  fn with_building(self, building: Footprint, footprint: Polygon<f64>, shadow: MultiPolygon<f64>) -> Self {
    let Self { mut buildings, footprint: union, shadows } = self;
    buildings.push(building);
    Self {
      buildings,
      footprint: union.union(&geometry::multi(footprint)),
      shadows: shadows.union(&shadow)
    }
  }
}

pub struct PlanSynthesizer<'a> {
  site: &'a Site,
  division: &'a Division,
  config: PlanConfig
}

impl <'a> PlanSynthesizer<'a> {
  pub fn new(site: &'a Site, division: &'a Division, config: PlanConfig) -> Result<Self> {
    config.validate()?;
    Ok(Self { site, division, config })
  }

  pub fn config(&self) -> &PlanConfig {
    &self.config
  }

  /// Pre-excluded region: everything outside the site, plus the circulation.
  pub fn initial_shadows(&self) -> MultiPolygon<f64> {
    self.site.outside(self.config.envelope_margin)
      .union(&self.division.circulation)
  }

  /// Every lot eroded by `offset`, split into pieces; empty results are dropped.
  pub fn bands(&self, offset: f64) -> Vec<Polygon<f64>> {
    self.division.lots.iter()
      .flat_map(|lot| geometry::pieces(lot.buffer(offset)))
      .collect()
  }

  /// Build one plan.
  pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> Plan {
    let plan = self.config.erosion_passes.iter()
      .fold(Plan::seeded(self.initial_shadows()), |plan, &offset| {
        let mut bands = self.bands(offset);
        bands.shuffle(rng);
        let before = plan.len();
        let plan = bands.iter()
          .fold(plan, |plan, band| self.place_in_band(plan, band, rng));
        log::debug!(
          "erosion pass {}: {} bands, {} buildings placed",
          offset, bands.len(), plan.len() - before
        );
        plan
      });
    log::debug!("plan: {} buildings", plan.len());
    plan
  }

  /// Build `plan_count` independent plans, one generator per plan seeded from `rng`.
  pub fn plans<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Plan> {
    let seeds: Vec<u64> = (0..self.config.plan_count)
      .map(|_| rng.gen())
      .collect();
    profile!("plans", seeds.into_par_iter()
      .map(|seed| self.plan(&mut Pcg64::seed_from_u64(seed)))
      .collect())
  }

  /// Walk the band boundary once from a random vertex, trying evenly spaced slots on
  /// every edge in random rotation.
  fn place_in_band<R: Rng + ?Sized>(&self, plan: Plan, band: &Polygon<f64>, rng: &mut R) -> Plan {
    let edges: Vec<(P2, P2)> = band.exterior()
      .lines()
      .map(|line| (from_coord(line.start), from_coord(line.end)))
      .collect();
    if edges.is_empty() {
      return plan;
    }
    let start = rng.gen_range(0..edges.len());

    edges.iter()
      .cycle()
      .skip(start)
      .take(edges.len())
      .fold(plan, |mut plan, &(a, b)| {
        let angle = self.config.orientation
          .unwrap_or_else(|| (b - a).angle_from_x_axis());
        let slots = (a.distance_to(b) / self.config.slot_spacing).floor() as usize;
        for j in 0..slots {
          let offset = rng.gen_range(0..slots);
          let center = a.lerp(b, ((j + offset) % slots) as f64 / slots as f64);
          plan = self.try_place(plan, center, angle);
        }
        plan
      })
  }

  fn try_place(&self, plan: Plan, center: P2, angle: Angle<f64>) -> Plan {
    let candidate = building::building(&self.config, center, angle);
    let footprint = candidate.to_polygon();
    // cheap rejection before the shadow is built
    if plan.shadows.intersects(&footprint) {
      return plan;
    }
    let shadow = building::shadow(&self.config, &candidate);
    if plan.footprint.intersects(&shadow) {
      return plan;
    }
    plan.with_building(candidate, footprint, shadow)
  }
}
