//! Rejection taxonomy for measurement operations.
//!
//! Every variant is recoverable by user action (another click, a reset, or a
//! new image). None of them leave the engine in a partially-updated state.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Error returned by mapping, session, and engine operations.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MeasureError {
    /// The pointer resolved outside the image's draw rectangle.
    #[error("point ({x:.1}, {y:.1}) is outside the image bounds")]
    OutOfBounds { x: f64, y: f64 },
    /// All four points are already placed.
    #[error("all four points are placed; reset to measure again")]
    SessionFull,
    /// A completed segment has zero length, so no ratio can be formed.
    #[error("a measured distance is zero; the ratio is undefined")]
    DegenerateDistance,
    /// Fewer than two distances are available.
    #[error("both distances are required before a ratio exists")]
    Incomplete,
    /// A point or measurement operation was attempted with no image loaded.
    #[error("load an image or take a photo first")]
    MissingImage,
    /// Image or surface dimensions were zero, negative, or not finite.
    #[error("invalid dimensions {width} x {height}")]
    InvalidDimensions { width: f64, height: f64 },
    /// A snapshot was requested while no capture stream is active.
    #[error("no camera capture is active")]
    NoActiveCapture,
    /// A snapshot was requested before the capture produced a usable frame.
    #[error("the camera has not produced a frame yet; try again shortly")]
    CaptureNotReady,
}

impl MeasureError {
    /// Stable machine-readable code for hosts that map rejections to UI states.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "out_of_bounds",
            Self::SessionFull => "session_full",
            Self::DegenerateDistance => "degenerate_distance",
            Self::Incomplete => "incomplete",
            Self::MissingImage => "missing_image",
            Self::InvalidDimensions { .. } => "invalid_dimensions",
            Self::NoActiveCapture => "no_active_capture",
            Self::CaptureNotReady => "capture_not_ready",
        }
    }
}
