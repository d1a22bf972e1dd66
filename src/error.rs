use thiserror::Error;

use crate::data::model::Quantity;

pub type Result<T, E = CptError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CptError {
    /// A segment must satisfy `0 <= top <= bottom`.
    #[error("Invalid segment: top {top} and bottom {bottom} require 0 <= top <= bottom")]
    InvalidSegment { top: f64, bottom: f64 },

    #[error("Missing data: {} is unavailable", .0.field_name())]
    MissingData(Quantity),

    #[error("Zone number {0} is out of range 0..=9")]
    OutOfRange(i64),

    #[error("Probe with number {0} had already been added to the list")]
    DuplicateProbe(String),
}

impl CptError {
    /// Missing data is folded into the classification; everything else aborts a pass.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CptError::MissingData(_))
    }
}
