mod common;

use common::{assert_close, first_measurement, first_probe, load_probes};
use cpt_zoning::{classify, friction_ratio, sbt, sbt_index, zone_number, ZonesProbe};

fn first_point_zone(fixture: &str) -> u8 {
    let m = first_measurement(fixture);
    let rf = friction_ratio(&m).unwrap();
    let qc = m.qc.unwrap();
    zone_number(rf, qc, sbt_index(rf, qc))
}

#[test]
fn friction_ratio_of_silt_mixture() {
    let m = first_measurement("zone_4");
    assert_close(friction_ratio(&m).unwrap(), 1.3636363636363635);
}

#[test]
fn sbt_index_of_silt_mixture() {
    let m = first_measurement("zone_4");
    let rf = friction_ratio(&m).unwrap();
    assert_close(sbt_index(rf, m.qc.unwrap()), 2.8659110243323247);
}

#[test]
fn zone_numbers_and_labels() {
    let cases = [
        ("zone_4", 4, "Silt Mixtures"),
        ("zone_5", 5, "Sand Mixtures"),
        ("zone_6", 6, "Sands"),
        ("zone_8", 8, "Stiff Sand to Clayed Sand"),
        ("zone_9", 9, "Stiff Fine-Grained"),
    ];
    for (fixture, expected_zone, expected_type) in cases {
        let zone = first_point_zone(fixture);
        assert_eq!(zone, expected_zone, "{fixture}");
        assert_eq!(sbt(i64::from(zone)).unwrap(), expected_type);
    }
}

#[test]
fn unknown_probe_is_one_zone() {
    let zones = ZonesProbe::new(&first_probe("zone_0")).unwrap();

    assert_eq!(zones.len(), 1);
    let zone = &zones.zones()[0];
    assert_eq!(zone.number(), 0);
    assert_eq!(zone.label(), "Unknown");
    assert_close(zone.top(), 14.935);
    assert_close(zone.bottom(), 15.035);
    assert!(zones.soil_behaviour_types().is_empty());
}

#[test]
fn zone_opened_at_the_last_reading_is_mirrored() {
    let zones = ZonesProbe::new(&first_probe("classify_zone_8_7")).unwrap();

    let numbers: Vec<u8> = zones.iter().map(|z| z.number()).collect();
    assert_eq!(numbers, vec![8, 7]);
    assert_close(zones.zones()[0].top(), 11.995);
    assert_close(zones.zones()[0].bottom(), 12.155);
    assert_close(zones.zones()[1].top(), 12.155);
    assert_close(zones.zones()[1].bottom(), 12.165);
}

#[test]
fn zones_are_contiguous_and_cover_every_probe() {
    for probe in &load_probes("layers_probe") {
        let zones = ZonesProbe::new(probe).unwrap();
        assert!(!zones.is_empty());

        for pair in zones.zones().windows(2) {
            assert_eq!(pair[0].bottom(), pair[1].top(), "probe {}", probe.number());
            assert_ne!(pair[0].number(), pair[1].number());
        }

        let first = probe.measurements().first().unwrap();
        let last = probe.measurements().last().unwrap();
        assert!(zones.zones()[0].top() < first.depth);
        assert!(zones.zones().last().unwrap().bottom() > last.depth);
    }
}

#[test]
fn every_reading_lies_in_a_zone_of_its_own_class() {
    let probes = load_probes("layers_probe");
    let probe = probes.get(1).unwrap();
    let zones = ZonesProbe::new(probe).unwrap();

    for m in probe.measurements() {
        let zone = zones
            .iter()
            .find(|z| z.top() <= m.depth && m.depth < z.bottom())
            .expect("reading inside the zoned range");
        assert_eq!(zone.number(), classify(m).unwrap_or(0), "depth {}", m.depth);
    }
}

#[test]
fn zoning_is_repeatable() {
    let probe = first_probe("layers_probe");
    let once = ZonesProbe::new(&probe).unwrap();
    let twice = ZonesProbe::new(&probe).unwrap();

    let key = |z: &ZonesProbe| -> Vec<(u8, f64, f64)> {
        z.iter().map(|z| (z.number(), z.top(), z.bottom())).collect()
    };
    assert_eq!(key(&once), key(&twice));
}

#[test]
fn soil_behaviour_types_of_a_layered_probe() {
    let probes = load_probes("layers_probe");
    let zones = ZonesProbe::new(probes.get(1).unwrap()).unwrap();

    let labels: Vec<&str> = zones.soil_behaviour_types().into_iter().collect();
    assert_eq!(labels, vec!["Clays", "Sand Mixtures", "Sands"]);
}
