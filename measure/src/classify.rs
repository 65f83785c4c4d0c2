//! Ratio classification against the golden ratio.
//!
//! Two policies exist: the golden-proximity policy (the default) buckets by
//! distance from [`GOLDEN_RATIO`], and the absolute-threshold policy buckets by
//! the raw ratio. Both are plain data evaluated by a single routine,
//! [`Policy::classify`], so either can be selected at configuration time.

#[cfg(test)]
#[path = "classify_test.rs"]
mod classify_test;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::consts::{
    ABSOLUTE_ELEVATED, ABSOLUTE_EXTREME, ABSOLUTE_HIGH, ABSOLUTE_MODERATE, GOLDEN_RATIO, PROXIMITY_EXCELLENT,
    PROXIMITY_FAIR, PROXIMITY_GOOD, PROXIMITY_POOR,
};

/// Slack applied to band bounds so values that are exactly on a bound in decimal
/// (e.g. `1.718 - 1.618`) land on the inclusive side despite binary rounding.
pub const BOUNDARY_EPSILON: f64 = 1e-9;

/// Discrete classification label. Drives the host's color indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// No ratio to classify.
    NoData,
    // Golden-proximity policy.
    Excellent,
    Good,
    Fair,
    Poor,
    Bad,
    // Absolute-threshold policy.
    Extreme,
    High,
    Elevated,
    Moderate,
    Neutral,
}

/// Label and color token for a bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BucketDisplay {
    pub label: &'static str,
    pub color: &'static str,
}

impl Bucket {
    #[must_use]
    pub fn display(self) -> BucketDisplay {
        match self {
            Self::NoData => BucketDisplay { label: "N/A", color: "#e5e7eb" },
            Self::Excellent => BucketDisplay { label: "Excellent", color: "#22c55e" },
            Self::Good => BucketDisplay { label: "Good", color: "#84cc16" },
            Self::Fair => BucketDisplay { label: "Fair", color: "#eab308" },
            Self::Poor => BucketDisplay { label: "Poor", color: "#f97316" },
            Self::Bad => BucketDisplay { label: "Bad", color: "#ef4444" },
            Self::Extreme => BucketDisplay { label: "Extreme", color: "#ef4444" },
            Self::High => BucketDisplay { label: "High", color: "#f97316" },
            Self::Elevated => BucketDisplay { label: "Elevated", color: "#eab308" },
            Self::Moderate => BucketDisplay { label: "Moderate", color: "#22c55e" },
            Self::Neutral => BucketDisplay { label: "Neutral", color: "#e5e7eb" },
        }
    }
}

/// The quantity a policy compares against its bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// The ratio itself.
    Ratio,
    /// `|ratio - GOLDEN_RATIO|`.
    DistanceFromGolden,
}

impl Metric {
    fn score(self, ratio: f64) -> f64 {
        match self {
            Self::Ratio => ratio,
            Self::DistanceFromGolden => (ratio - GOLDEN_RATIO).abs(),
        }
    }
}

/// Comparison a band applies between the score and its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    Gt,
    Ge,
    Le,
}

/// One classification band. Bands are checked in order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub cmp: Cmp,
    pub bound: f64,
    pub bucket: Bucket,
}

impl Band {
    fn matches(&self, score: f64) -> bool {
        match self.cmp {
            Cmp::Gt => score > self.bound + BOUNDARY_EPSILON,
            Cmp::Ge => score >= self.bound - BOUNDARY_EPSILON,
            Cmp::Le => score <= self.bound + BOUNDARY_EPSILON,
        }
    }
}

const PROXIMITY_BANDS: &[Band] = &[
    Band { cmp: Cmp::Le, bound: PROXIMITY_EXCELLENT, bucket: Bucket::Excellent },
    Band { cmp: Cmp::Le, bound: PROXIMITY_GOOD, bucket: Bucket::Good },
    Band { cmp: Cmp::Le, bound: PROXIMITY_FAIR, bucket: Bucket::Fair },
    Band { cmp: Cmp::Le, bound: PROXIMITY_POOR, bucket: Bucket::Poor },
];

const ABSOLUTE_BANDS: &[Band] = &[
    Band { cmp: Cmp::Gt, bound: ABSOLUTE_EXTREME, bucket: Bucket::Extreme },
    Band { cmp: Cmp::Ge, bound: ABSOLUTE_HIGH, bucket: Bucket::High },
    Band { cmp: Cmp::Ge, bound: ABSOLUTE_ELEVATED, bucket: Bucket::Elevated },
    Band { cmp: Cmp::Ge, bound: ABSOLUTE_MODERATE, bucket: Bucket::Moderate },
];

/// Named policy selector used by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    /// Distance from the golden ratio.
    #[default]
    Proximity,
    /// Raw ratio thresholds.
    Absolute,
}

impl PolicyKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Proximity => "proximity",
            Self::Absolute => "absolute",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`PolicyKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown classification policy '{0}' (expected 'proximity' or 'absolute')")]
pub struct UnknownPolicy(pub String);

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "proximity" | "golden" => Ok(Self::Proximity),
            "absolute" | "threshold" => Ok(Self::Absolute),
            other => Err(UnknownPolicy(other.to_owned())),
        }
    }
}

/// A classification policy: which metric to score, the ordered bands, and the
/// bucket used when no band matches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Policy {
    pub kind: PolicyKind,
    pub metric: Metric,
    pub bands: &'static [Band],
    pub fallback: Bucket,
}

impl Default for Policy {
    fn default() -> Self {
        Self::golden_proximity()
    }
}

impl Policy {
    #[must_use]
    pub fn golden_proximity() -> Self {
        Self {
            kind: PolicyKind::Proximity,
            metric: Metric::DistanceFromGolden,
            bands: PROXIMITY_BANDS,
            fallback: Bucket::Bad,
        }
    }

    #[must_use]
    pub fn absolute_threshold() -> Self {
        Self {
            kind: PolicyKind::Absolute,
            metric: Metric::Ratio,
            bands: ABSOLUTE_BANDS,
            fallback: Bucket::Neutral,
        }
    }

    #[must_use]
    pub fn for_kind(kind: PolicyKind) -> Self {
        match kind {
            PolicyKind::Proximity => Self::golden_proximity(),
            PolicyKind::Absolute => Self::absolute_threshold(),
        }
    }

    /// Classify a ratio. Absent or non-finite ratios are [`Bucket::NoData`].
    #[must_use]
    pub fn classify(&self, ratio: Option<f64>) -> Bucket {
        let Some(ratio) = ratio.filter(|r| r.is_finite()) else {
            return Bucket::NoData;
        };
        let score = self.metric.score(ratio);
        self.bands
            .iter()
            .find(|band| band.matches(score))
            .map_or(self.fallback, |band| band.bucket)
    }
}

/// Classify with the default (golden-proximity) policy.
#[must_use]
pub fn classify(ratio: Option<f64>) -> Bucket {
    Policy::default().classify(ratio)
}
