//! Point-capture state machine: four points, two distances, one ratio.
//!
//! Points are stored image-relative. Each distance is converted to draw-rect
//! pixels at the moment its pair completes and is never recomputed afterwards,
//! so later clicks or surface resizes cannot disturb an already-reported value.
//!
//! ```text
//! Empty ─► OneMarked ─► FirstPairComplete ─► ThreePts ─► FullComplete
//!   ▲                                                        │
//!   └──────────────────────── reset_points ◄─────────────────┘
//! ```

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::Serialize;

use crate::classify::{Bucket, Policy};
use crate::consts::MAX_POINTS;
use crate::error::MeasureError;
use crate::mapper::{DrawRect, RelPoint};

/// Where the session is in the capture sequence, derived from the point count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No points placed.
    Empty,
    /// P1 placed.
    OneMarked,
    /// P1 and P2 placed; the first distance is fixed.
    FirstPairComplete,
    /// P3 placed.
    ThreePts,
    /// All four points placed. Only a reset leaves this phase.
    FullComplete,
}

impl Phase {
    fn from_count(count: usize) -> Self {
        match count {
            0 => Self::Empty,
            1 => Self::OneMarked,
            2 => Self::FirstPairComplete,
            3 => Self::ThreePts,
            _ => Self::FullComplete,
        }
    }
}

/// Progress signal emitted for each accepted point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// 0 -> 1: the second point is needed.
    FirstPointRecorded,
    /// 1 -> 2: P1-P2 distance recorded.
    FirstDistanceRecorded,
    /// 2 -> 3: the fourth point is needed.
    NeedFourthPoint,
    /// 3 -> 4: P3-P4 distance recorded and the ratio is available.
    RatioAvailable,
    /// 3 -> 4 with a zero-length segment: distances recorded, ratio undefined.
    RatioUnavailable,
}

impl Signal {
    /// Human-readable status line for the host.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::FirstPointRecorded => "Click a second point to measure the first distance.",
            Self::FirstDistanceRecorded => "First distance (P1-P2) recorded. Click the next two points.",
            Self::NeedFourthPoint => "Click a fourth point to measure the second distance.",
            Self::RatioAvailable => "Second distance (P3-P4) recorded. Check the ratio.",
            Self::RatioUnavailable => "Second distance (P3-P4) recorded, but a distance is zero so no ratio exists.",
        }
    }
}

/// Ratio of the longer to the shorter distance, always `>= 1`.
///
/// `None` when either distance is zero, negative, or not finite.
#[must_use]
pub fn ratio_of(d0: f64, d1: f64) -> Option<f64> {
    let usable = |d: f64| d.is_finite() && d > 0.0;
    if !usable(d0) || !usable(d1) {
        return None;
    }
    Some(d0.max(d1) / d0.min(d1))
}

/// Euclidean distance between two relative points, in draw-rect pixels.
#[must_use]
pub fn pixel_distance(a: RelPoint, b: RelPoint, rect: &DrawRect) -> f64 {
    let dx = (b.rel_x - a.rel_x) * rect.width;
    let dy = (b.rel_y - a.rel_y) * rect.height;
    dx.hypot(dy)
}

/// In-progress measurement for the currently loaded image.
#[derive(Debug, Clone)]
pub struct MeasurementSession {
    policy: Policy,
    points: Vec<RelPoint>,
    distances: Vec<f64>,
    ratio: Option<f64>,
    classification: Option<Bucket>,
}

impl Default for MeasurementSession {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

impl MeasurementSession {
    #[must_use]
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            points: Vec::with_capacity(MAX_POINTS),
            distances: Vec::with_capacity(2),
            ratio: None,
            classification: None,
        }
    }

    /// Append a point, deriving distances and the ratio when a pair completes.
    ///
    /// `rect` is the draw rectangle currently on screen; it only scales the
    /// distance of a pair completed by this call.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::SessionFull`] without mutating anything when four
    /// points are already placed.
    pub fn add_point(&mut self, rel: RelPoint, rect: &DrawRect) -> Result<Signal, MeasureError> {
        if self.is_full() {
            return Err(MeasureError::SessionFull);
        }
        self.points.push(rel);

        let signal = match self.points.len() {
            1 => Signal::FirstPointRecorded,
            2 => {
                let d0 = pixel_distance(self.points[0], self.points[1], rect);
                self.distances.push(d0);
                Signal::FirstDistanceRecorded
            }
            3 => Signal::NeedFourthPoint,
            _ => {
                let d1 = pixel_distance(self.points[2], self.points[3], rect);
                self.distances.push(d1);
                self.ratio = ratio_of(self.distances[0], d1);
                self.classification = self.ratio.map(|r| self.policy.classify(Some(r)));
                if self.ratio.is_some() { Signal::RatioAvailable } else { Signal::RatioUnavailable }
            }
        };

        tracing::debug!(
            count = self.points.len(),
            rel_x = rel.rel_x,
            rel_y = rel.rel_y,
            ?signal,
            "point recorded"
        );
        Ok(signal)
    }

    /// Clear points, distances, ratio, and classification.
    pub fn reset_points(&mut self) {
        self.points.clear();
        self.distances.clear();
        self.ratio = None;
        self.classification = None;
    }

    // --- Queries ---

    #[must_use]
    pub fn phase(&self) -> Phase {
        Phase::from_count(self.points.len())
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.points.len() >= MAX_POINTS
    }

    #[must_use]
    pub fn points(&self) -> &[RelPoint] {
        &self.points
    }

    #[must_use]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Distance `index` (0 = P1-P2, 1 = P3-P4), if recorded.
    #[must_use]
    pub fn distance(&self, index: usize) -> Option<f64> {
        self.distances.get(index).copied()
    }

    #[must_use]
    pub fn ratio(&self) -> Option<f64> {
        self.ratio
    }

    #[must_use]
    pub fn classification(&self) -> Option<Bucket> {
        self.classification
    }

    #[must_use]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// The ratio, or why there is none.
    ///
    /// # Errors
    ///
    /// [`MeasureError::Incomplete`] before both distances exist,
    /// [`MeasureError::DegenerateDistance`] when one of them is zero.
    pub fn check_ratio(&self) -> Result<f64, MeasureError> {
        if self.distances.len() < 2 {
            return Err(MeasureError::Incomplete);
        }
        self.ratio.ok_or(MeasureError::DegenerateDistance)
    }
}
