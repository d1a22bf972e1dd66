use std::collections::BTreeSet;
use std::fmt;

use crate::classify::{point_zone, ZONE_UNKNOWN};
use crate::data::model::{Measurement, Probe};
use crate::error::Result;
use crate::segment::Zone;

// ---------------------------------------------------------------------------
// ZonesProbe – soil behaviour type zoning of one probe
// ---------------------------------------------------------------------------

/// The zones of a probe: contiguous, non-overlapping and ordered by depth,
/// spanning the whole measured range.
#[derive(Debug, Clone)]
pub struct ZonesProbe {
    number: String,
    zones: Vec<Zone>,
}

impl ZonesProbe {
    /// Classify every measurement of `probe` and merge equal neighbours into
    /// zones. An invalid zone boundary aborts the pass.
    pub fn new(probe: &Probe) -> Result<Self> {
        let zones = find_zones(probe.measurements())?;
        log::debug!(
            "probe {}: {} measurements in {} zones",
            probe.number(),
            probe.len(),
            zones.len()
        );
        Ok(Self {
            number: probe.number().to_string(),
            zones,
        })
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Zone> {
        self.zones.iter()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Soil behaviour types occurring in the probe, without "Unknown".
    pub fn soil_behaviour_types(&self) -> BTreeSet<&'static str> {
        self.zones
            .iter()
            .filter(|zone| zone.number() != ZONE_UNKNOWN)
            .map(Zone::label)
            .collect()
    }
}

impl<'a> IntoIterator for &'a ZonesProbe {
    type Item = &'a Zone;
    type IntoIter = std::slice::Iter<'a, Zone>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.iter()
    }
}

impl fmt::Display for ZonesProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Probe number: {}, number of zone layers: {}",
            self.number,
            self.zones.len()
        )
    }
}

/// Single pass over depth-sorted measurements.
///
/// `end_zone` holds the previous depth, except in an iteration that closed a
/// zone, where it holds the new boundary until the iteration ends.
fn find_zones(measurements: &[Measurement]) -> Result<Vec<Zone>> {
    let n = measurements.len();
    let mut zones = Vec::new();
    let mut current_zone = ZONE_UNKNOWN;
    let mut start_zone = 0.0;
    let mut end_zone = 0.0;

    for (i, m) in measurements.iter().enumerate() {
        let zone_nr = point_zone(m);

        if i == 0 {
            current_zone = zone_nr;
            start_zone = m.depth;
        } else if i == 1 {
            // extend the first zone half a sample spacing above the first reading
            start_zone -= 0.5 * (m.depth - start_zone);
        }

        if zone_nr != current_zone {
            end_zone = 0.5 * (end_zone + m.depth);
            zones.push(Zone::new(current_zone, start_zone, end_zone)?);
            current_zone = zone_nr;
            start_zone = end_zone;
        }

        if i + 1 == n {
            // a zone opened at this very point has no extent yet: mirror it
            // around the last reading
            end_zone = if start_zone == end_zone {
                2.0 * m.depth - start_zone
            } else {
                m.depth + 0.5 * (m.depth - end_zone)
            };
            zones.push(Zone::new(current_zone, start_zone, end_zone)?);
        }

        end_zone = m.depth;
    }

    Ok(zones)
}
