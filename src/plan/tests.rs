use {
  super::*,
  crate::{
    division::{synthesize, DivisionConfig, Road},
    geometry::{multi, overlap_area, polygon, Footprint}
  },
  geo::{Area, Contains}
};

fn square(side: f64) -> Polygon<f64> {
  polygon([
    P2::new(0.0, 0.0),
    P2::new(side, 0.0),
    P2::new(side, side),
    P2::new(0.0, side),
  ])
}

fn single_lot(side: f64) -> (Site, Division) {
  let site = Site::new(square(side)).unwrap();
  let division = Division {
    lots: vec![square(side)],
    circulation: MultiPolygon::new(vec![])
  };
  (site, division)
}

/// 300 × 300 site cut into four lots by a cross of roads.
fn crossroads() -> (Site, Division) {
  let site = Site::new(square(300.0)).unwrap();
  let roads = [
    Road { from: 0, to: 1, start: P2::new(150.0, -20.0), end: P2::new(150.0, 320.0) },
    Road { from: 2, to: 3, start: P2::new(-20.0, 150.0), end: P2::new(320.0, 150.0) },
  ];
  let division = synthesize(&site, &roads, &[], &DivisionConfig::default());
  (site, division)
}

fn footprints(plan: &Plan) -> Vec<Polygon<f64>> {
  plan.buildings.iter().map(Footprint::to_polygon).collect()
}

#[test] fn shadow_wedge() {
  let config = PlanConfig::default();
  let footprint = building::building(&config, P2::new(0.0, 0.0), Angle::zero());
  let shadow = building::shadow(&config, &footprint);

  // (58 × 16) ∪ (32 × 160), minus the 32 × 16 footprint
  let expected = 58.0 * 16.0 + 32.0 * 160.0 - 32.0 * 16.0 - 32.0 * 16.0;
  assert!((shadow.unsigned_area() - expected).abs() < 1e-6, "{}", shadow.unsigned_area());
  assert!(!shadow.contains(&geo::Point::new(0.0, 0.0)));
  assert!(shadow.contains(&geo::Point::new(20.0, 0.0)));
  assert!(shadow.contains(&geo::Point::new(0.0, 70.0)));
  assert!(overlap_area(&shadow, &multi(footprint.to_polygon())) < 1e-9);
}

#[test] fn corner_clearance_grows_the_shadow() {
  let plain = PlanConfig::default();
  let cleared = PlanConfig { corner_clearance: Some(6.0), ..Default::default() };
  let footprint = building::building(&plain, P2::new(0.0, 0.0), Angle::frac_pi_4());
  let a = building::shadow(&plain, &footprint).unsigned_area();
  let b = building::shadow(&cleared, &footprint).unsigned_area();
  assert!(b > a);
}

#[test] fn lot_smaller_than_a_building() {
  let mut rng = rand_pcg::Pcg64::seed_from_u64(0);
  for side in [15.0, 30.0] {
    let (site, division) = single_lot(side);
    let synthesizer = PlanSynthesizer::new(&site, &division, PlanConfig::default()).unwrap();
    let plan = synthesizer.plan(&mut rng);
    assert!(plan.is_empty());
    assert!(plan.footprint.0.is_empty());
  }
}

#[test] fn empty_bands_are_skipped() {
  let (site, division) = single_lot(15.0);
  let synthesizer = PlanSynthesizer::new(&site, &division, PlanConfig::default()).unwrap();
  assert!(synthesizer.bands(-10.0).is_empty());
  assert_eq!(synthesizer.bands(-2.0).len(), 1);
}

#[test] fn shadows_start_outside_the_site() {
  let (site, division) = crossroads();
  let synthesizer = PlanSynthesizer::new(&site, &division, PlanConfig::default()).unwrap();
  let shadows = synthesizer.initial_shadows();

  let ring = 302.0 * 302.0 - 300.0 * 300.0;
  let inside = overlap_area(&shadows, &multi(site.polygon().clone()));
  // road ends reach past the grown envelope
  assert!(shadows.unsigned_area() - inside >= ring - 1.0);
  // both roads, 8 wide, sharing the crossing
  assert!((inside - (2.0 * 8.0 * 300.0 - 64.0)).abs() < 1.0, "{}", inside);
  assert!(shadows.contains(&geo::Point::new(150.0, 75.0)));
  assert!(!shadows.contains(&geo::Point::new(75.0, 75.0)));
}

#[test] fn buildings_never_collide() {
  let (site, division) = crossroads();
  let config = PlanConfig { plan_count: 1, ..Default::default() };
  let synthesizer = PlanSynthesizer::new(&site, &division, config).unwrap();
  let outside = synthesizer.initial_shadows();

  for seed in 0..3 {
    let plan = synthesizer.plan(&mut rand_pcg::Pcg64::seed_from_u64(seed));
    assert!(!plan.is_empty(), "seed {}: no building placed", seed);
    let polygons = footprints(&plan);
    assert!((plan.footprint.unsigned_area() - 512.0 * plan.len() as f64).abs() < 1e-3);

    for (i, a) in polygons.iter().enumerate() {
      assert!(overlap_area(&multi(a.clone()), &outside) < 1e-6);
      for (j, b) in polygons.iter().enumerate().skip(i + 1) {
        assert!(overlap_area(&multi(a.clone()), &multi(b.clone())) < 1e-6, "{} overlaps {}", i, j);
        // later buildings stay out of earlier shadows
        let shadow = building::shadow(synthesizer.config(), &plan.buildings[i]);
        assert!(overlap_area(&shadow, &multi(b.clone())) < 1e-6, "{} in shadow of {}", j, i);
      }
    }
  }
}

#[test] fn fixed_orientation() {
  let (site, division) = crossroads();
  let angle = Angle::degrees(30.0);
  let config = PlanConfig { orientation: Some(angle), ..Default::default() };
  let synthesizer = PlanSynthesizer::new(&site, &division, config).unwrap();
  let plan = synthesizer.plan(&mut rand_pcg::Pcg64::seed_from_u64(5));
  assert!(plan.buildings.iter().all(|b| b.angle == angle));
}

#[test] fn plans_are_independent_and_reproducible() {
  let (site, division) = crossroads();
  let config = PlanConfig { plan_count: 3, ..Default::default() };
  let synthesizer = PlanSynthesizer::new(&site, &division, config).unwrap();

  let run = |seed| synthesizer.plans(&mut rand_pcg::Pcg64::seed_from_u64(seed));
  let (a, b) = (run(1), run(1));
  assert_eq!(a.len(), 3);
  for (a, b) in a.iter().zip(&b) {
    assert_eq!(a.buildings, b.buildings);
  }
}

#[test] fn invalid_building() {
  let (site, division) = single_lot(100.0);
  let config = PlanConfig { building_width: 0.0, ..Default::default() };
  assert!(PlanSynthesizer::new(&site, &division, config).is_err());
}
