//! Overlay primitives for the host renderer.
//!
//! The renderer paints; this module only decides what goes where. Positions are
//! in backing pixels so they can be drawn directly into the surface buffer.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use serde::Serialize;

use crate::mapper::{DrawRect, Point, to_surface_pixel};
use crate::session::MeasurementSession;

/// Marker dot color.
pub const MARKER_COLOR: &str = "#ff0000";
/// Marker label color.
pub const LABEL_COLOR: &str = "#000000";
/// P1-P2 segment color.
pub const FIRST_SEGMENT_COLOR: &str = "#0000ff";
/// P3-P4 segment color.
pub const SECOND_SEGMENT_COLOR: &str = "#008000";

/// Marker dot radius in backing pixels.
pub const MARKER_RADIUS_PX: f64 = 5.0;
/// Label offset from the marker center, in backing pixels (right, up).
pub const LABEL_OFFSET_PX: f64 = 8.0;
/// Segment stroke width in backing pixels.
pub const SEGMENT_WIDTH_PX: f64 = 2.0;

/// One thing to paint over the image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlayItem {
    Marker {
        at: Point,
        radius: f64,
        color: &'static str,
        label: String,
        label_at: Point,
        label_color: &'static str,
    },
    Segment {
        from: Point,
        to: Point,
        width: f64,
        color: &'static str,
    },
}

/// Build the overlay for `session` on the current draw rectangle.
///
/// Segments come first so markers are painted on top of them.
#[must_use]
pub fn overlay(session: &MeasurementSession, rect: &DrawRect) -> Vec<OverlayItem> {
    let pixels = session
        .points()
        .iter()
        .map(|p| to_surface_pixel(*p, rect))
        .collect::<Vec<_>>();

    let mut items = Vec::with_capacity(pixels.len() + 2);
    for (pair, color) in pixels.chunks_exact(2).zip([FIRST_SEGMENT_COLOR, SECOND_SEGMENT_COLOR]) {
        items.push(OverlayItem::Segment { from: pair[0], to: pair[1], width: SEGMENT_WIDTH_PX, color });
    }
    for (index, at) in pixels.iter().enumerate() {
        items.push(OverlayItem::Marker {
            at: *at,
            radius: MARKER_RADIUS_PX,
            color: MARKER_COLOR,
            label: format!("P{}", index + 1),
            label_at: Point::new(at.x + LABEL_OFFSET_PX, at.y - LABEL_OFFSET_PX),
            label_color: LABEL_COLOR,
        });
    }
    items
}
