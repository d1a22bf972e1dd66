#![allow(dead_code)]

use std::path::PathBuf;

use cpt_zoning::data::loader::load_file;
use cpt_zoning::{Measurement, Probe, ProbeList};

pub const TOLERANCE: f64 = 1e-7;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{name}.json"))
}

pub fn load_probes(name: &str) -> ProbeList {
    let _ = env_logger::builder().is_test(true).try_init();
    load_file(&fixture(name)).expect("fixture should load")
}

/// The first probe of a fixture.
pub fn first_probe(name: &str) -> Probe {
    load_probes(name)
        .get(0)
        .cloned()
        .expect("fixture holds at least one probe")
}

pub fn first_measurement(name: &str) -> Measurement {
    first_probe(name).measurements()[0]
}

#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}
