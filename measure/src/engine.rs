use serde::Serialize;

use crate::classify::Policy;
use crate::consts::{DEFAULT_SURFACE_H, DEFAULT_SURFACE_W};
use crate::error::MeasureError;
use crate::mapper::{
    DrawRect, ImageMetrics, Point, SurfaceSize, compute_draw_rect, fit_surface, to_image_relative, valid_dimensions,
};
use crate::overlay::{OverlayItem, overlay};
use crate::readout::Readout;
use crate::session::{MeasurementSession, Signal};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Opaque token the host uses to find its decoded raster. The engine never looks inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RasterHandle(pub u64);

/// Where a loaded image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// File picker / decoded upload.
    Upload,
    /// Snapshot from a live camera capture.
    Camera,
}

/// The image currently under measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadedImage {
    pub metrics: ImageMetrics,
    pub raster: RasterHandle,
    pub source: ImageSource,
}

/// Camera capture lifecycle. The stream itself lives in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// No stream is open.
    #[default]
    Idle,
    /// A stream is open; `frame_ready` once it has delivered a frame with real dimensions.
    Streaming { frame_ready: bool },
}

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A new image replaced the previous one and the session was restarted.
    ImageLoaded { width: f64, height: f64, source: ImageSource },
    /// The host should resize the display surface to this logical size.
    SuggestSurface { width: f64, height: f64 },
    /// A point was accepted.
    Status(Signal),
    /// An event was rejected; no state changed.
    Rejected(MeasureError),
    /// Points, distances, and ratio were cleared.
    Cleared,
    /// The host should open its camera stream.
    CaptureStarted,
    /// The capture delivered a usable frame; snapshots are now possible.
    CaptureReady,
    /// The host should grab the current frame and hand it back via `on_image_ready`.
    SnapshotRequested,
    /// The host should close its camera stream.
    CaptureStopped,
    /// The overlay or image changed and should be repainted.
    RenderNeeded,
}

/// Engine state for one display surface.
///
/// All handlers run synchronously on the host's event thread. Async work such as
/// decoding or camera permission happens in the host, which reports back through
/// [`EngineCore::on_image_ready`] exactly once per raster.
#[derive(Debug, Clone)]
pub struct EngineCore {
    policy: Policy,
    surface: SurfaceSize,
    image: Option<LoadedImage>,
    draw_rect: Option<DrawRect>,
    session: MeasurementSession,
    capture: CaptureState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Whether pointer events come from a touch screen. Informational for the host;
    /// mouse and touch share the same [`EngineCore::on_pointer_down`] path.
    pub touch_input: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

fn placeholder_surface() -> SurfaceSize {
    SurfaceSize {
        logical_w: DEFAULT_SURFACE_W,
        logical_h: DEFAULT_SURFACE_H,
        backing_w: DEFAULT_SURFACE_W,
        backing_h: DEFAULT_SURFACE_H,
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            surface: placeholder_surface(),
            image: None,
            draw_rect: None,
            session: MeasurementSession::new(policy),
            capture: CaptureState::Idle,
            viewport_width: DEFAULT_SURFACE_W,
            viewport_height: DEFAULT_SURFACE_H,
            touch_input: false,
        }
    }

    /// Set the window size used to suggest a surface for newly loaded images.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    fn recompute_draw_rect(&mut self) {
        self.draw_rect = self
            .image
            .map(|img| compute_draw_rect(self.surface.backing_w, self.surface.backing_h, &img.metrics));
    }

    fn stop_capture_into(&mut self, actions: &mut Vec<Action>) {
        if matches!(self.capture, CaptureState::Streaming { .. }) {
            self.capture = CaptureState::Idle;
            actions.push(Action::CaptureStopped);
        }
    }

    // --- Collaborator inputs ---

    /// A raster finished loading. Replaces the image and starts a fresh session.
    ///
    /// Uploads also suggest a surface sized to the viewport; camera snapshots do not.
    pub fn on_image_ready(&mut self, width: f64, height: f64, raster: RasterHandle, source: ImageSource) -> Vec<Action> {
        let metrics = match ImageMetrics::new(width, height) {
            Ok(m) => m,
            Err(err) => {
                tracing::warn!(width, height, error = %err, "image rejected");
                return vec![Action::Rejected(err)];
            }
        };

        let mut actions = Vec::new();
        self.stop_capture_into(&mut actions);
        self.image = Some(LoadedImage { metrics, raster, source });
        self.session = MeasurementSession::new(self.policy);
        self.recompute_draw_rect();

        tracing::info!(width, height, ?source, "image loaded");
        actions.push(Action::ImageLoaded { width, height, source });
        // Snapshots keep the surface the capture was shown on.
        if source == ImageSource::Upload {
            let (suggest_w, suggest_h) = fit_surface(&metrics, self.viewport_width, self.viewport_height);
            actions.push(Action::SuggestSurface { width: suggest_w, height: suggest_h });
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// The display surface changed size. Captured points are untouched.
    pub fn on_surface_resize(&mut self, logical_w: f64, logical_h: f64, backing_w: f64, backing_h: f64) -> Vec<Action> {
        match SurfaceSize::new(logical_w, logical_h, backing_w, backing_h) {
            Ok(surface) => {
                self.surface = surface;
                self.recompute_draw_rect();
                vec![Action::RenderNeeded]
            }
            Err(err) => {
                tracing::warn!(logical_w, logical_h, backing_w, backing_h, "surface resize rejected");
                vec![Action::Rejected(err)]
            }
        }
    }

    /// A pointer (mouse or touch) went down at a logical surface position.
    pub fn on_pointer_down(&mut self, logical: Point) -> Vec<Action> {
        match self.capture_point(logical) {
            Ok(signal) => vec![Action::Status(signal), Action::RenderNeeded],
            Err(err) => {
                tracing::debug!(x = logical.x, y = logical.y, code = err.code(), "pointer rejected");
                vec![Action::Rejected(err)]
            }
        }
    }

    /// Map a logical position and feed it to the session.
    ///
    /// # Errors
    ///
    /// [`MeasureError::MissingImage`] before any mapping, then
    /// [`MeasureError::OutOfBounds`] or [`MeasureError::SessionFull`].
    pub fn capture_point(&mut self, logical: Point) -> Result<Signal, MeasureError> {
        let (Some(_), Some(rect)) = (self.image, self.draw_rect) else {
            return Err(MeasureError::MissingImage);
        };
        let rel = to_image_relative(logical, &self.surface, &rect)?;
        self.session.add_point(rel, &rect)
    }

    // --- Resets ---

    /// Clear the measurement, keeping the image.
    pub fn reset_points(&mut self) -> Vec<Action> {
        self.session.reset_points();
        tracing::info!("points reset");
        vec![Action::Cleared, Action::RenderNeeded]
    }

    /// Drop the image and any capture and restore the placeholder surface.
    pub fn reset_all(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.stop_capture_into(&mut actions);
        self.image = None;
        self.session = MeasurementSession::new(self.policy);
        self.surface = placeholder_surface();
        self.recompute_draw_rect();
        tracing::info!("engine reset");
        actions.push(Action::Cleared);
        actions.push(Action::SuggestSurface { width: DEFAULT_SURFACE_W, height: DEFAULT_SURFACE_H });
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Capture lifecycle ---

    /// Open a capture. The previous image and measurement are discarded.
    pub fn start_capture(&mut self) -> Vec<Action> {
        self.image = None;
        self.session = MeasurementSession::new(self.policy);
        self.recompute_draw_rect();
        self.capture = CaptureState::Streaming { frame_ready: false };
        tracing::info!("capture started");
        vec![Action::CaptureStarted, Action::Cleared, Action::RenderNeeded]
    }

    /// The capture delivered a frame of `width` x `height`. Only a frame that could
    /// become an image (finite, positive size) makes the capture ready.
    pub fn on_capture_frame(&mut self, width: f64, height: f64) -> Vec<Action> {
        match self.capture {
            CaptureState::Idle => vec![Action::Rejected(MeasureError::NoActiveCapture)],
            CaptureState::Streaming { frame_ready: true } => Vec::new(),
            CaptureState::Streaming { frame_ready: false } => {
                if valid_dimensions(width, height) {
                    self.capture = CaptureState::Streaming { frame_ready: true };
                    tracing::debug!(width, height, "capture ready");
                    vec![Action::CaptureReady]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Whether a snapshot can be taken right now.
    ///
    /// # Errors
    ///
    /// [`MeasureError::NoActiveCapture`] or [`MeasureError::CaptureNotReady`].
    pub fn snapshot_readiness(&self) -> Result<(), MeasureError> {
        match self.capture {
            CaptureState::Idle => Err(MeasureError::NoActiveCapture),
            CaptureState::Streaming { frame_ready: false } => Err(MeasureError::CaptureNotReady),
            CaptureState::Streaming { frame_ready: true } => Ok(()),
        }
    }

    /// Ask the host to snapshot the capture. The resulting raster comes back
    /// through [`EngineCore::on_image_ready`] with [`ImageSource::Camera`].
    pub fn request_snapshot(&mut self) -> Vec<Action> {
        match self.snapshot_readiness() {
            Ok(()) => vec![Action::SnapshotRequested],
            Err(err) => vec![Action::Rejected(err)],
        }
    }

    /// Close the capture, if any.
    pub fn stop_capture(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.stop_capture_into(&mut actions);
        actions
    }

    // --- Queries ---

    #[must_use]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    #[must_use]
    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    #[must_use]
    pub fn draw_rect(&self) -> Option<DrawRect> {
        self.draw_rect
    }

    #[must_use]
    pub fn session(&self) -> &MeasurementSession {
        &self.session
    }

    #[must_use]
    pub fn capture(&self) -> CaptureState {
        self.capture
    }

    #[must_use]
    pub fn readout(&self) -> Readout {
        Readout::from_session(&self.session)
    }

    /// Overlay primitives for the current draw rectangle; empty without an image.
    #[must_use]
    pub fn overlay(&self) -> Vec<OverlayItem> {
        self.draw_rect.map_or_else(Vec::new, |rect| overlay(&self.session, &rect))
    }
}
