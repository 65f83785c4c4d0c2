//! Display-ready view of a measurement session.

#[cfg(test)]
#[path = "readout_test.rs"]
mod readout_test;

use serde::Serialize;

use crate::classify::Bucket;
use crate::session::{MeasurementSession, Phase};

/// Placeholder shown for values that do not exist yet.
pub const NOT_AVAILABLE: &str = "N/A";

/// Snapshot of everything the host shows next to the image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readout {
    pub phase: Phase,
    pub points: usize,
    pub distances: [Option<f64>; 2],
    pub ratio: Option<f64>,
    pub bucket: Bucket,
    pub label: &'static str,
    pub color: &'static str,
}

impl Readout {
    #[must_use]
    pub fn from_session(session: &MeasurementSession) -> Self {
        let bucket = session.classification().unwrap_or(Bucket::NoData);
        let display = bucket.display();
        Self {
            phase: session.phase(),
            points: session.points().len(),
            distances: [session.distance(0), session.distance(1)],
            ratio: session.ratio(),
            bucket,
            label: display.label,
            color: display.color,
        }
    }

    /// Distance `index` as `"240.00 px"`, or `"N/A"`.
    #[must_use]
    pub fn distance_label(&self, index: usize) -> String {
        self.distances
            .get(index)
            .copied()
            .flatten()
            .map_or_else(|| NOT_AVAILABLE.to_owned(), format_distance)
    }

    /// Ratio as `"1.333"`, or `"N/A"`.
    #[must_use]
    pub fn ratio_label(&self) -> String {
        self.ratio.map_or_else(|| NOT_AVAILABLE.to_owned(), format_ratio)
    }
}

/// Two decimals with a pixel unit.
#[must_use]
pub fn format_distance(d: f64) -> String {
    format!("{d:.2} px")
}

/// Three decimals, unitless.
#[must_use]
pub fn format_ratio(r: f64) -> String {
    format!("{r:.3}")
}
