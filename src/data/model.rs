use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CptError, Result};

// ---------------------------------------------------------------------------
// Quantity – the three measured columns of a probe
// ---------------------------------------------------------------------------

/// A measured quantity, named after its field in the DOV records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    Depth,
    Qc,
    Fs,
}

impl Quantity {
    pub const ALL: [Quantity; 3] = [Quantity::Depth, Quantity::Qc, Quantity::Fs];

    /// Field name used in the source records.
    pub fn field_name(self) -> &'static str {
        match self {
            Quantity::Depth => "diepte",
            Quantity::Qc => "qc",
            Quantity::Fs => "fs",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Quantity::Depth => "m",
            Quantity::Qc => "MPa",
            Quantity::Fs => "kPa",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.field_name(), self.unit())
    }
}

// ---------------------------------------------------------------------------
// Measurement – one reading of the cone
// ---------------------------------------------------------------------------

/// A single reading at `depth`. Cone resistance `qc` and sleeve friction `fs`
/// are absent when the instrument did not record them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Depth below the surface (m).
    pub depth: f64,
    /// Cone resistance (MPa).
    pub qc: Option<f64>,
    /// Sleeve friction (kPa).
    pub fs: Option<f64>,
}

impl Measurement {
    pub fn new(depth: f64, qc: Option<f64>, fs: Option<f64>) -> Self {
        Self { depth, qc, fs }
    }

    /// Value of `quantity`, `None` when absent.
    pub fn get(&self, quantity: Quantity) -> Option<f64> {
        match quantity {
            Quantity::Depth => Some(self.depth),
            Quantity::Qc => self.qc,
            Quantity::Fs => self.fs,
        }
    }
}

// ---------------------------------------------------------------------------
// ProbeRecord – one row of the source file
// ---------------------------------------------------------------------------

/// A raw record as exported by Databank Ondergrond Vlaanderen: every field
/// except the probe number may be null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeRecord {
    #[serde(rename = "sondeernummer", alias = "probe_number")]
    pub probe_number: String,
    #[serde(rename = "diepte", alias = "depth")]
    pub depth: Option<f64>,
    pub qc: Option<f64>,
    pub fs: Option<f64>,
}

impl ProbeRecord {
    pub fn get(&self, quantity: Quantity) -> Option<f64> {
        match quantity {
            Quantity::Depth => self.depth,
            Quantity::Qc => self.qc,
            Quantity::Fs => self.fs,
        }
    }

    /// The measurement carried by this record, `None` without a depth.
    pub fn measurement(&self) -> Option<Measurement> {
        self.depth.map(|depth| Measurement::new(depth, self.qc, self.fs))
    }
}

// ---------------------------------------------------------------------------
// Probe – one borehole
// ---------------------------------------------------------------------------

/// The measurements of one probe together with its identification number.
#[derive(Debug, Clone)]
pub struct Probe {
    number: String,
    measurements: Vec<Measurement>,
}

impl Probe {
    /// Create a probe; the measurements are stably sorted by depth.
    pub fn new(number: impl Into<String>, mut measurements: Vec<Measurement>) -> Self {
        measurements.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        Self {
            number: number.into(),
            measurements,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ProbeList – all probes of a loaded file
// ---------------------------------------------------------------------------

/// Probes in the order in which their numbers first appear in the records.
#[derive(Debug, Clone, Default)]
pub struct ProbeList {
    probes: Vec<Probe>,
    index: HashMap<String, usize>,
}

impl ProbeList {
    /// Group the records per probe number and sort each probe by depth.
    /// Records without a depth are skipped.
    pub fn from_records(records: impl IntoIterator<Item = ProbeRecord>) -> Self {
        let mut grouped: Vec<(String, Vec<Measurement>)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in records {
            let Some(measurement) = record.measurement() else {
                continue;
            };
            let slot = match index.get(&record.probe_number) {
                Some(&slot) => slot,
                None => {
                    index.insert(record.probe_number.clone(), grouped.len());
                    grouped.push((record.probe_number, Vec::new()));
                    grouped.len() - 1
                }
            };
            grouped[slot].1.push(measurement);
        }

        let probes = grouped
            .into_iter()
            .map(|(number, measurements)| Probe::new(number, measurements))
            .collect();
        ProbeList { probes, index }
    }

    /// Add a probe. Fails if a probe with the same number is already listed.
    pub fn append(&mut self, probe: Probe) -> Result<()> {
        if self.index.contains_key(probe.number()) {
            return Err(CptError::DuplicateProbe(probe.number().to_string()));
        }
        self.index.insert(probe.number().to_string(), self.probes.len());
        self.probes.push(probe);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Probe> {
        self.probes.get(index)
    }

    pub fn by_number(&self, number: &str) -> Option<&Probe> {
        self.index.get(number).map(|&i| &self.probes[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Probe> {
        self.probes.iter()
    }

    pub fn numbers(&self) -> Vec<&str> {
        self.probes.iter().map(Probe::number).collect()
    }

    /// Total number of measurements over all probes.
    pub fn measurement_count(&self) -> usize {
        self.probes.iter().map(Probe::len).sum()
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

impl<'a> IntoIterator for &'a ProbeList {
    type Item = &'a Probe;
    type IntoIter = std::slice::Iter<'a, Probe>;

    fn into_iter(self) -> Self::IntoIter {
        self.probes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(number: &str, depth: Option<f64>) -> ProbeRecord {
        ProbeRecord {
            probe_number: number.to_string(),
            depth,
            qc: Some(1.0),
            fs: Some(10.0),
        }
    }

    #[test]
    fn groups_in_first_appearance_order_and_sorts_by_depth() {
        let list = ProbeList::from_records(vec![
            record("B", Some(2.0)),
            record("A", Some(1.5)),
            record("B", Some(1.0)),
            record("A", None),
            record("A", Some(0.5)),
        ]);

        assert_eq!(list.numbers(), vec!["B", "A"]);
        let depths: Vec<f64> = list
            .by_number("A")
            .unwrap()
            .measurements()
            .iter()
            .map(|m| m.depth)
            .collect();
        assert_eq!(depths, vec![0.5, 1.5]);
        assert_eq!(list.measurement_count(), 4);
    }

    #[test]
    fn sort_is_stable_for_equal_depths() {
        let probe = Probe::new(
            "P",
            vec![
                Measurement::new(1.0, Some(3.0), None),
                Measurement::new(0.5, None, None),
                Measurement::new(1.0, Some(4.0), None),
            ],
        );
        let qcs: Vec<Option<f64>> = probe.measurements().iter().map(|m| m.qc).collect();
        assert_eq!(qcs, vec![None, Some(3.0), Some(4.0)]);
    }

    #[test]
    fn append_rejects_duplicate_numbers() {
        let mut list = ProbeList::from_records(vec![record("A", Some(1.0))]);
        let err = list.append(Probe::new("A", Vec::new())).unwrap_err();
        assert_eq!(err, CptError::DuplicateProbe("A".to_string()));

        list.append(Probe::new("C", Vec::new())).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).unwrap().number(), "C");
    }
}
