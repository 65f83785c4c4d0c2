//! Shared numeric constants for the measure crate.

// ── Classification ──────────────────────────────────────────────

/// The golden ratio as used by the meter (three significant decimals).
pub const GOLDEN_RATIO: f64 = 1.618;

/// Proximity policy: `|ratio - GOLDEN_RATIO|` at or below this is excellent.
pub const PROXIMITY_EXCELLENT: f64 = 0.1;
/// Proximity policy: good band upper bound.
pub const PROXIMITY_GOOD: f64 = 0.2;
/// Proximity policy: fair band upper bound.
pub const PROXIMITY_FAIR: f64 = 0.3;
/// Proximity policy: poor band upper bound. Anything further away is bad.
pub const PROXIMITY_POOR: f64 = 0.5;

/// Absolute policy: ratios strictly above this are extreme.
pub const ABSOLUTE_EXTREME: f64 = 3.0;
/// Absolute policy: high band lower bound (inclusive).
pub const ABSOLUTE_HIGH: f64 = 2.0;
/// Absolute policy: elevated band lower bound (inclusive).
pub const ABSOLUTE_ELEVATED: f64 = 1.75;
/// Absolute policy: moderate band lower bound (inclusive). Below is neutral.
pub const ABSOLUTE_MODERATE: f64 = 1.5;

// ── Surface ─────────────────────────────────────────────────────

/// Placeholder surface width used before an image is loaded and after a full reset.
pub const DEFAULT_SURFACE_W: f64 = 600.0;
/// Placeholder surface height used before an image is loaded and after a full reset.
pub const DEFAULT_SURFACE_H: f64 = 400.0;

/// Share of the viewport width a freshly loaded image may occupy.
pub const SURFACE_MAX_WIDTH_FRACTION: f64 = 0.8;
/// Share of the viewport height a freshly loaded image may occupy.
pub const SURFACE_MAX_HEIGHT_FRACTION: f64 = 0.6;

// ── Session ─────────────────────────────────────────────────────

/// Number of reference points in a complete measurement (two segments).
pub const MAX_POINTS: usize = 4;
