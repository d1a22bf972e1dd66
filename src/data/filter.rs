use super::model::{ProbeRecord, Quantity};

// ---------------------------------------------------------------------------
// Record cleaning: drop rows whose field is unavailable
// ---------------------------------------------------------------------------

/// Number of records for which `quantity` is null.
pub fn count_missing(records: &[ProbeRecord], quantity: Quantity) -> usize {
    records
        .iter()
        .filter(|rec| rec.get(quantity).is_none())
        .count()
}

/// Remove every record for which `quantity` is null.
///
/// The relative order of the remaining records is preserved, so a later
/// stable sort on depth keeps the order of equal-depth readings.
pub fn drop_missing(mut records: Vec<ProbeRecord>, quantity: Quantity) -> Vec<ProbeRecord> {
    let before = records.len();
    records.retain(|rec| rec.get(quantity).is_some());

    let removed = before - records.len();
    if removed > 0 {
        log::info!(
            "Removed {removed} records of which the field '{}' is unavailable",
            quantity.field_name()
        );
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(depth: Option<f64>, qc: Option<f64>) -> ProbeRecord {
        ProbeRecord {
            probe_number: "P1".to_string(),
            depth,
            qc,
            fs: None,
        }
    }

    #[test]
    fn drops_only_the_requested_field() {
        let records = vec![
            record(Some(1.0), None),
            record(None, Some(2.0)),
            record(Some(2.0), Some(1.0)),
        ];
        assert_eq!(count_missing(&records, Quantity::Depth), 1);
        assert_eq!(count_missing(&records, Quantity::Fs), 3);

        let kept = drop_missing(records, Quantity::Depth);
        let depths: Vec<Option<f64>> = kept.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn nothing_to_drop_keeps_everything() {
        let records = vec![record(Some(1.0), Some(1.0))];
        assert_eq!(drop_missing(records.clone(), Quantity::Qc), records);
    }
}
