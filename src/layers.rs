use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{classify, SOIL_BEHAVIOUR_TYPES, ZONE_UNKNOWN};
use crate::data::model::{Measurement, Probe, Quantity};
use crate::error::{CptError, Result};
use crate::segment::{thickest, Layer};

/// Default upper bound (MPa, exclusive) of the cone resistance in a layer.
pub const DEFAULT_QC_MAX: f64 = 2.0;

// ---------------------------------------------------------------------------
// LayerOptions – what counts as a layer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerOptions {
    /// Soil behaviour type every point of a layer must have; 0 accepts any.
    pub zone_number: u8,
    /// Points of a layer have `qc < qc_max` (MPa).
    pub qc_max: f64,
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            zone_number: ZONE_UNKNOWN,
            qc_max: DEFAULT_QC_MAX,
        }
    }
}

impl LayerOptions {
    /// Layers of any soil type below `qc_max`.
    pub fn with_qc_max(qc_max: f64) -> Self {
        Self {
            qc_max,
            ..Self::default()
        }
    }

    /// Layers restricted to one zone, with the default threshold.
    pub fn in_zone(zone_number: u8) -> Self {
        Self {
            zone_number,
            ..Self::default()
        }
    }

    /// Whether `m` belongs to the target zone. Unclassifiable points only
    /// belong when no zone is targeted.
    fn accepts_zone(&self, m: &Measurement) -> bool {
        if self.zone_number == ZONE_UNKNOWN {
            return true;
        }
        classify(m).is_ok_and(|zone| zone == self.zone_number)
    }

    /// Whether `m` passes the cone resistance threshold; a null qc never does.
    fn accepts_qc(&self, m: &Measurement) -> bool {
        m.qc.is_some_and(|qc| qc < self.qc_max)
    }
}

// ---------------------------------------------------------------------------
// LayersProbe – soft layers of one probe
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LayersProbe {
    number: String,
    options: LayerOptions,
    layers: Vec<Layer>,
}

impl LayersProbe {
    /// Find the maximal depth intervals of `probe` in which every point has
    /// `qc < qc_max` and, when a zone is targeted, lies in that zone.
    pub fn new(probe: &Probe, options: LayerOptions) -> Result<Self> {
        if usize::from(options.zone_number) >= SOIL_BEHAVIOUR_TYPES.len() {
            return Err(CptError::OutOfRange(i64::from(options.zone_number)));
        }

        let layers = find_layers(probe.measurements(), &options)?;
        log::debug!(
            "probe {}: {} layers with qc < {} {} (zone {})",
            probe.number(),
            layers.len(),
            options.qc_max,
            Quantity::Qc.unit(),
            options.zone_number
        );
        Ok(Self {
            number: probe.number().to_string(),
            options,
            layers,
        })
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn options(&self) -> &LayerOptions {
        &self.options
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// The thickest layer; the shallowest wins among equally thick layers.
    pub fn thickest(&self) -> Option<&Layer> {
        thickest(&self.layers)
    }
}

impl<'a> IntoIterator for &'a LayersProbe {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}

impl fmt::Display for LayersProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Probe number: {}, number of layers: {} (qc < {} {})",
            self.number,
            self.layers.len(),
            self.options.qc_max,
            Quantity::Qc.unit()
        )
    }
}

fn find_layers(measurements: &[Measurement], options: &LayerOptions) -> Result<Vec<Layer>> {
    let n = measurements.len();
    let mut layers = Vec::new();
    let mut in_layer = false;
    let mut start_layer = 0.0;
    let mut end_layer = 0.0;

    for (i, m) in measurements.iter().enumerate() {
        if i == 1 && in_layer {
            start_layer = end_layer - 0.5 * (m.depth - end_layer);
        }

        let accepted = options.accepts_qc(m) && options.accepts_zone(m);
        if accepted && !in_layer {
            in_layer = true;
            start_layer = 0.5 * (end_layer + m.depth);
        } else if !accepted && in_layer {
            in_layer = false;
            end_layer = 0.5 * (end_layer + m.depth);
            layers.push(Layer::new(start_layer, end_layer)?);
        }

        if i + 1 == n && in_layer {
            end_layer = m.depth + 0.5 * (m.depth - end_layer);
            layers.push(Layer::new(start_layer, end_layer)?);
        }

        end_layer = m.depth;
    }

    Ok(layers)
}
