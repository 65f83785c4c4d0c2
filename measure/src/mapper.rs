//! Coordinate mapping between the display surface and the loaded image.
//!
//! Three coordinate spaces are involved:
//!
//! - **logical**: where pointer events arrive (CSS pixels on the web, window
//!   points on desktop).
//! - **backing**: the surface's internal pixel buffer. It differs from logical
//!   on high-density displays or when the element is rendered at a size other
//!   than its buffer.
//! - **image-relative**: fractions of the draw rectangle, the sub-region of the
//!   backing buffer covered by the scaled-to-fit image. These are what the
//!   session stores, so captured points survive surface resizes untouched.

#[cfg(test)]
#[path = "mapper_test.rs"]
mod mapper_test;

use serde::Serialize;

use crate::consts::{SURFACE_MAX_HEIGHT_FRACTION, SURFACE_MAX_WIDTH_FRACTION};
use crate::error::MeasureError;

/// A point in logical or backing surface space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point normalized to the draw rectangle; both components lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelPoint {
    pub rel_x: f64,
    pub rel_y: f64,
}

impl RelPoint {
    /// Build a relative point, clamping each component into `[0, 1]`.
    #[must_use]
    pub fn new(rel_x: f64, rel_y: f64) -> Self {
        Self { rel_x: rel_x.clamp(0.0, 1.0), rel_y: rel_y.clamp(0.0, 1.0) }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Whether `width` x `height` can back an image or surface: both finite and positive.
#[must_use]
pub fn valid_dimensions(width: f64, height: f64) -> bool {
    is_positive(width) && is_positive(height)
}

fn check_dimensions(width: f64, height: f64) -> Result<(), MeasureError> {
    if valid_dimensions(width, height) {
        Ok(())
    } else {
        Err(MeasureError::InvalidDimensions { width, height })
    }
}

/// Natural pixel dimensions of the loaded raster. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImageMetrics {
    natural_width: f64,
    natural_height: f64,
}

impl ImageMetrics {
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidDimensions`] unless both sides are finite and positive.
    pub fn new(natural_width: f64, natural_height: f64) -> Result<Self, MeasureError> {
        check_dimensions(natural_width, natural_height)?;
        Ok(Self { natural_width, natural_height })
    }

    #[must_use]
    pub fn natural_width(&self) -> f64 {
        self.natural_width
    }

    #[must_use]
    pub fn natural_height(&self) -> f64 {
        self.natural_height
    }

    /// Width over height.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.natural_width / self.natural_height
    }
}

/// Logical and backing dimensions of the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfaceSize {
    pub logical_w: f64,
    pub logical_h: f64,
    pub backing_w: f64,
    pub backing_h: f64,
}

impl SurfaceSize {
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidDimensions`] if any side is not finite and positive.
    pub fn new(logical_w: f64, logical_h: f64, backing_w: f64, backing_h: f64) -> Result<Self, MeasureError> {
        check_dimensions(logical_w, logical_h)?;
        check_dimensions(backing_w, backing_h)?;
        Ok(Self { logical_w, logical_h, backing_w, backing_h })
    }

    /// A surface whose backing buffer matches its logical size.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidDimensions`] for non-positive sizes.
    pub fn uniform(width: f64, height: f64) -> Result<Self, MeasureError> {
        Self::new(width, height, width, height)
    }

    /// A surface whose backing buffer is the logical size times `dpr`.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidDimensions`] for non-positive sizes or ratio.
    pub fn with_dpr(width: f64, height: f64, dpr: f64) -> Result<Self, MeasureError> {
        Self::new(width, height, width * dpr, height * dpr)
    }

    /// Logical-to-backing scale factors `(sx, sy)`.
    #[must_use]
    pub fn scale(&self) -> (f64, f64) {
        (self.backing_w / self.logical_w, self.backing_h / self.logical_h)
    }
}

/// The rectangle, in backing pixels, covered by the scaled-to-fit image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawRect {
    pub offset_x: f64,
    pub offset_y: f64,
    pub width: f64,
    pub height: f64,
}

impl DrawRect {
    /// Inclusive containment test on all four edges.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.offset_x
            && pt.x <= self.offset_x + self.width
            && pt.y >= self.offset_y
            && pt.y <= self.offset_y + self.height
    }
}

/// Fit the image into a `surface_w` x `surface_h` area without cropping or distortion,
/// centering it on the axis with leftover space.
#[must_use]
pub fn compute_draw_rect(surface_w: f64, surface_h: f64, metrics: &ImageMetrics) -> DrawRect {
    let aspect = metrics.aspect();
    let mut width = surface_w;
    let mut height = surface_w / aspect;
    if height > surface_h {
        height = surface_h;
        width = surface_h * aspect;
    }
    DrawRect {
        offset_x: (surface_w - width) / 2.0,
        offset_y: (surface_h - height) / 2.0,
        width,
        height,
    }
}

/// Convert a logical pointer position into a draw-rect-relative point.
///
/// # Errors
///
/// Returns [`MeasureError::OutOfBounds`] (carrying the backing-space position)
/// when the pointer lands outside the draw rectangle.
pub fn to_image_relative(pointer: Point, surface: &SurfaceSize, rect: &DrawRect) -> Result<RelPoint, MeasureError> {
    let (sx, sy) = surface.scale();
    let scaled = Point::new(pointer.x * sx, pointer.y * sy);
    if !rect.contains(scaled) {
        return Err(MeasureError::OutOfBounds { x: scaled.x, y: scaled.y });
    }
    Ok(RelPoint::new(
        (scaled.x - rect.offset_x) / rect.width,
        (scaled.y - rect.offset_y) / rect.height,
    ))
}

/// Inverse of the normalization step: relative point to backing pixels.
#[must_use]
pub fn to_surface_pixel(rel: RelPoint, rect: &DrawRect) -> Point {
    Point::new(rect.offset_x + rel.rel_x * rect.width, rect.offset_y + rel.rel_y * rect.height)
}

/// Suggest a surface size for a freshly loaded image inside a `viewport_w` x `viewport_h`
/// window.
///
/// The image never grows past its natural size and may take at most
/// [`SURFACE_MAX_WIDTH_FRACTION`] of the viewport width and
/// [`SURFACE_MAX_HEIGHT_FRACTION`] of its height.
#[must_use]
pub fn fit_surface(metrics: &ImageMetrics, viewport_w: f64, viewport_h: f64) -> (f64, f64) {
    let max_w = metrics.natural_width.min(viewport_w * SURFACE_MAX_WIDTH_FRACTION);
    let max_h = metrics.natural_height.min(viewport_h * SURFACE_MAX_HEIGHT_FRACTION);

    let mut width = max_w;
    let mut height = width / metrics.aspect();
    if height > max_h {
        height = max_h;
        width = height * metrics.aspect();
    }
    (width, height)
}
