//! Soil behaviour type zoning of cone penetration tests (Robertson, 2010)
//! and detection of soft layers with a low cone resistance.
//!
//! ```no_run
//! use std::path::Path;
//! use cpt_zoning::{LayerOptions, LayersProbe, ZonesProbe};
//!
//! # fn main() -> anyhow::Result<()> {
//! let probes = cpt_zoning::data::loader::load_file(Path::new("probes.json"))?;
//! for probe in &probes {
//!     let zones = ZonesProbe::new(probe)?;
//!     let clay = LayersProbe::new(probe, LayerOptions::in_zone(3))?;
//!     println!("{zones}: {:?}", clay.thickest().map(|l| l.bounds()));
//! }
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod data;
pub mod error;
pub mod layers;
pub mod segment;
pub mod zones;

pub use classify::{classify, friction_ratio, sbt, sbt_index, zone_number};
pub use data::model::{Measurement, Probe, ProbeList, ProbeRecord, Quantity};
pub use error::{CptError, Result};
pub use layers::{LayerOptions, LayersProbe};
pub use segment::{cmp_thickness, thickest, Layer, Segment, Zone};
pub use zones::ZonesProbe;
