//! This is a library for procedural subdivision of a polygonal site into buildable lots,
//! and for packing building footprints into them.
//!
//! It is split into two main stages: [`division`] carves a circulation network (roads and
//! entrances) out of the site and keeps the residual lots, and [`plan`] greedily places
//! buildings and their cast shadows into those lots, producing an ensemble of variants.
//! Geometry is delegated to the [`geo`] crate.
//!
//! # Basic usage
//! ```no_run
//! # use {
//! #   site_subdivision::{
//! #     division::{DivisionConfig, DivisionSearch},
//! #     plan::{PlanConfig, PlanSynthesizer},
//! #     site::Site
//! #   },
//! #   anyhow::Result,
//! #   geo::polygon,
//! #   rand::prelude::*
//! # };
//! # fn main() -> Result<()> {
//! let site = Site::new(polygon![
//!   (x: 0.0, y: 0.0),
//!   (x: 300.0, y: 0.0),
//!   (x: 300.0, y: 300.0),
//!   (x: 0.0, y: 300.0),
//! ])?;
//! // All randomness is drawn from the generator passed in; fix the seed to reproduce a run.
//! let mut rng = rand_pcg::Pcg64::seed_from_u64(0);
//!
//! /**
//!   * Repeat the generation several times (the budget depends on the site area),
//!   * and keep the attempt whose circulation is connected and whose lots are best
//!   * balanced in area.
//!   **/
//! let search = DivisionSearch::new(&site, DivisionConfig::default())?;
//! let division = match search.search(&mut rng) {
//!   Some(division) => division,
//!   None => anyhow::bail!("no connected division, retry with a larger budget")
//! };
//!
//! // Ten independent building layouts over the same lots.
//! let plans = PlanSynthesizer::new(&site, &division, PlanConfig::default())?
//!   .plans(&mut rng);
//! for plan in &plans {
//!   println!("{} buildings", plan.len());
//! }
//! #   Ok(())
//! # }
//! ```
//!
//! # Pipeline
//! Each division attempt runs, leaf-first:
//! - [`locate_entrances`](division::locate_entrances): disks on the midpoints of the longest
//!   boundary edges;
//! - [`grow_collection`](division::grow_collection): stochastic circle packing seeded by the
//!   entrances, every new disk tangent to its nearest neighbour;
//! - [`build_roads`](division::build_roads): segments between close disk centers that stay
//!   inside the site;
//! - [`synthesize`](division::synthesize): the site minus buffered roads and entrances,
//!   split into lots and smoothed by [`smooth_polygon`](division::smooth_polygon).
//!
//! [`DivisionSearch`](division::DivisionSearch) is a fold over attempts. Attempts are also
//! available lazily through [`DivisionSearch::attempts`](division::DivisionSearch::attempts).
//!
//! Plans are independent of each other; [`PlanSynthesizer::plans`](plan::PlanSynthesizer::plans)
//! draws one seed per plan from the caller's generator and evaluates them in parallel, so the
//! result only depends on that generator.
//!
//! The library logs through the [`log`] facade and never installs a logger.

pub mod geometry;
pub mod site;
pub mod division;
pub mod plan;
mod util;
