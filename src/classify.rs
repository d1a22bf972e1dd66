//! Soil behaviour type classification after Robertson (2010).
//!
//! All functions are pure. Inputs outside the physical domain (qc <= 0,
//! Rf <= 0) are not guarded: IEEE-754 arithmetic produces infinities or NaN
//! and every comparison against NaN is false, so such points fall through the
//! classification ladder to whichever rung first accepts them.

use crate::data::model::{Measurement, Quantity};
use crate::error::{CptError, Result};

/// Atmospheric pressure (kPa) used to normalise the cone resistance.
pub const ATM_PRESSURE_KPA: f64 = 100.0;

/// Zone assigned to points that cannot be classified.
pub const ZONE_UNKNOWN: u8 = 0;

/// Soil behaviour type labels indexed by zone number.
pub static SOIL_BEHAVIOUR_TYPES: [&str; 10] = [
    "Unknown",
    "Sensitive Fine-Grained",
    "Organic Soils",
    "Clays",
    "Silt Mixtures",
    "Sand Mixtures",
    "Sands",
    "Gravelly to Dense Sand",
    "Stiff Sand to Clayed Sand",
    "Stiff Fine-Grained",
];

/// Friction ratio Rf in percent. Both `qc` and `fs` must be present.
pub fn friction_ratio(measurement: &Measurement) -> Result<f64> {
    let qc = measurement.qc.ok_or(CptError::MissingData(Quantity::Qc))?;
    let fs = measurement.fs.ok_or(CptError::MissingData(Quantity::Fs))?;
    let qc_kpa = 1000.0 * qc;
    Ok(fs * 100.0 / qc_kpa)
}

/// Non-normalised soil behaviour type index.
pub fn sbt_index(rf: f64, qc: f64) -> f64 {
    let qc_kpa = 1000.0 * qc;
    let a = 3.47 - (qc_kpa / ATM_PRESSURE_KPA).log10();
    let b = 1.22 + rf.log10();
    (a * a + b * b).sqrt()
}

/// Zone number (1..=9) of the updated Robertson chart.
///
/// The rungs are tested top to bottom and the first match wins.
pub fn zone_number(rf: f64, qc: f64, sbt_index: f64) -> u8 {
    let qn = 1000.0 * qc / ATM_PRESSURE_KPA;
    let x = rf - 0.9;
    let threshold = 1.0 / (0.006 * x - 0.004 * x.powi(2) - 0.005);

    if rf > 4.5 && qn >= threshold {
        9
    } else if rf > 1.5 && rf <= 4.5 && qn >= threshold {
        8
    } else if qn < 12.0 * (-1.4 * rf).exp() {
        1
    } else if sbt_index > 3.6 {
        2
    } else if sbt_index > 2.95 {
        3
    } else if sbt_index > 2.6 {
        4
    } else if sbt_index > 2.05 {
        5
    } else if sbt_index > 1.31 {
        6
    } else {
        7
    }
}

/// Label of a zone number.
pub fn sbt(zone_number: i64) -> Result<&'static str> {
    usize::try_from(zone_number)
        .ok()
        .and_then(|i| SOIL_BEHAVIOUR_TYPES.get(i))
        .copied()
        .ok_or(CptError::OutOfRange(zone_number))
}

/// Classify one measurement. Fails with `MissingData` when qc or fs is absent.
pub fn classify(measurement: &Measurement) -> Result<u8> {
    let rf = friction_ratio(measurement)?;
    // friction_ratio succeeded, so qc is present
    let qc = measurement.qc.unwrap_or(f64::NAN);
    Ok(zone_number(rf, qc, sbt_index(rf, qc)))
}

/// Zone of one measurement, [`ZONE_UNKNOWN`] when it cannot be classified.
pub fn point_zone(measurement: &Measurement) -> u8 {
    classify(measurement).unwrap_or(ZONE_UNKNOWN)
}
