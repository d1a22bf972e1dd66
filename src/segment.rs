use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::classify::SOIL_BEHAVIOUR_TYPES;
use crate::data::model::Quantity;
use crate::error::{CptError, Result};

// ---------------------------------------------------------------------------
// Segment – a depth interval
// ---------------------------------------------------------------------------

/// A vertical slice of soil from `top` down to `bottom`.
///
/// Segments have no `PartialEq`/`PartialOrd`; rank them by thickness with
/// [`cmp_thickness`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Segment {
    top: f64,
    bottom: f64,
}

/// A segment where the cone resistance stays below a threshold.
pub type Layer = Segment;

impl Segment {
    /// Fails with `InvalidSegment` unless `0 <= top <= bottom`.
    pub fn new(top: f64, bottom: f64) -> Result<Self> {
        if !(top >= 0.0 && bottom >= top) {
            return Err(CptError::InvalidSegment { top, bottom });
        }
        Ok(Self { top, bottom })
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn thickness(&self) -> f64 {
        self.bottom - self.top
    }

    /// `(top, bottom)`, for positional comparisons.
    pub fn bounds(&self) -> (f64, f64) {
        (self.top, self.bottom)
    }

    /// Whether `depth` lies within `[top, bottom]`.
    pub fn contains(&self, depth: f64) -> bool {
        self.top <= depth && depth <= self.bottom
    }

    /// Whether the two segments share more than a boundary.
    pub fn overlaps(&self, other: &Segment) -> bool {
        self.top < other.bottom && other.top < self.bottom
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = Quantity::Depth.unit();
        write!(
            f,
            "Layer starts at a depth of {:.3} {unit} and ends at {:.3} {unit}",
            self.top, self.bottom
        )
    }
}

/// Order two segments by thickness, ignoring where they lie.
pub fn cmp_thickness(a: &Segment, b: &Segment) -> Ordering {
    a.thickness().total_cmp(&b.thickness())
}

/// The thickest segment; the first one wins among equally thick segments.
pub fn thickest<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> Option<&'a Segment> {
    segments.into_iter().fold(None, |best, seg| match best {
        Some(b) if cmp_thickness(seg, b) != Ordering::Greater => Some(b),
        _ => Some(seg),
    })
}

// ---------------------------------------------------------------------------
// Zone – a segment of one soil behaviour type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Zone {
    number: u8,
    #[serde(flatten)]
    segment: Segment,
}

impl Zone {
    /// Fails with `OutOfRange` for a zone number above 9 and with
    /// `InvalidSegment` for invalid bounds.
    pub fn new(number: u8, top: f64, bottom: f64) -> Result<Self> {
        if usize::from(number) >= SOIL_BEHAVIOUR_TYPES.len() {
            return Err(CptError::OutOfRange(i64::from(number)));
        }
        Ok(Self {
            number,
            segment: Segment::new(top, bottom)?,
        })
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    /// Soil behaviour type of this zone.
    pub fn label(&self) -> &'static str {
        SOIL_BEHAVIOUR_TYPES[usize::from(self.number)]
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    pub fn top(&self) -> f64 {
        self.segment.top
    }

    pub fn bottom(&self) -> f64 {
        self.segment.bottom
    }

    pub fn thickness(&self) -> f64 {
        self.segment.thickness()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = Quantity::Depth.unit();
        write!(
            f,
            "Zone {} starts at a depth of {:.3} {unit} and ends at {:.3} {unit}",
            self.number,
            self.top(),
            self.bottom()
        )
    }
}
