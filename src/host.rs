//! Terminal host: the collaborator side of the engine.
//!
//! The engine asks for things through [`Action`]s; a browser host would resize a
//! canvas or grab a video frame. Here a suggested surface is applied at the
//! configured device pixel ratio and a snapshot turns the last capture frame into
//! a camera raster. Everything else is reported back to the caller as-is.

use std::path::PathBuf;

use serde::Serialize;

use measure::classify::Policy;
use measure::engine::{Action, EngineCore, ImageSource};
use measure::error::MeasureError;
use measure::mapper::{DrawRect, Point, SurfaceSize, valid_dimensions};
use measure::overlay::OverlayItem;
use measure::readout::Readout;

use crate::config::MeterConfig;
use crate::raster::{RasterError, RasterOrigin, RasterStore};
use crate::script::ScriptEvent;

#[derive(Debug)]
pub struct Host {
    engine: EngineCore,
    rasters: RasterStore,
    dpr: f64,
    last_frame: Option<(f64, f64)>,
}

impl Host {
    #[must_use]
    pub fn new(config: &MeterConfig) -> Self {
        let mut engine = EngineCore::new(Policy::for_kind(config.policy));
        engine.set_viewport(config.viewport.0, config.viewport.1);
        Self { engine, rasters: RasterStore::new(), dpr: config.dpr, last_frame: None }
    }

    #[must_use]
    pub fn engine(&self) -> &EngineCore {
        &self.engine
    }

    /// Feed one event to the engine and carry out whatever it asks of the host.
    ///
    /// The returned actions include the follow-ups (resize after a surface
    /// suggestion, image load after a snapshot) in the order they happened.
    ///
    /// # Errors
    ///
    /// [`RasterError`] when a `load` event names an unreadable image.
    pub fn apply(&mut self, event: &ScriptEvent) -> Result<Vec<Action>, RasterError> {
        let actions = match event {
            ScriptEvent::Viewport { width, height } => {
                self.engine.set_viewport(*width, *height);
                Vec::new()
            }
            ScriptEvent::Image { width, height } => {
                let raster = self.rasters.synthetic(*width, *height);
                self.engine.on_image_ready(raster.width, raster.height, raster.handle, ImageSource::Upload)
            }
            ScriptEvent::Load { path } => {
                let raster = self.rasters.load(path)?;
                self.engine.on_image_ready(raster.width, raster.height, raster.handle, ImageSource::Upload)
            }
            ScriptEvent::Resize { logical_w, logical_h, backing } => {
                let (backing_w, backing_h) = backing.unwrap_or((logical_w * self.dpr, logical_h * self.dpr));
                self.engine.on_surface_resize(*logical_w, *logical_h, backing_w, backing_h)
            }
            ScriptEvent::Click { x, y } => self.engine.on_pointer_down(Point::new(*x, *y)),
            ScriptEvent::Touch(on) => {
                self.engine.touch_input = *on;
                Vec::new()
            }
            ScriptEvent::Reset => self.engine.reset_points(),
            ScriptEvent::ResetAll => self.engine.reset_all(),
            ScriptEvent::CaptureStart => {
                self.last_frame = None;
                self.engine.start_capture()
            }
            ScriptEvent::CaptureFrame { width, height } => {
                if valid_dimensions(*width, *height) {
                    self.last_frame = Some((*width, *height));
                }
                self.engine.on_capture_frame(*width, *height)
            }
            ScriptEvent::Snapshot => self.engine.request_snapshot(),
            ScriptEvent::CaptureStop => self.engine.stop_capture(),
        };
        let actions = self.follow(actions);
        self.rasters.retain_only(self.engine.image().map(|img| img.raster));
        Ok(actions)
    }

    fn follow(&mut self, actions: Vec<Action>) -> Vec<Action> {
        let mut out = Vec::with_capacity(actions.len());
        for action in actions {
            let next = match action {
                Action::SuggestSurface { width, height } => {
                    self.engine.on_surface_resize(width, height, width * self.dpr, height * self.dpr)
                }
                Action::SnapshotRequested => self.snapshot(),
                _ => Vec::new(),
            };
            out.push(action);
            let followed = self.follow(next);
            out.extend(followed);
        }
        out
    }

    /// Turn the last capture frame into a camera image. The frame is kept until
    /// the engine accepts it, so a failed snapshot can be retried.
    fn snapshot(&mut self) -> Vec<Action> {
        let Some((width, height)) = self.last_frame else {
            tracing::warn!("snapshot requested without a captured frame");
            return vec![Action::Rejected(MeasureError::CaptureNotReady)];
        };
        let raster = self.rasters.synthetic(width, height);
        let actions = self.engine.on_image_ready(width, height, raster.handle, ImageSource::Camera);
        if self.engine.image().is_some_and(|img| img.raster == raster.handle) {
            self.last_frame = None;
        }
        actions
    }

    #[must_use]
    pub fn report(&self) -> Report {
        Report {
            policy: self.engine.policy().kind.as_str(),
            image: self.engine.image().map(|img| ImageReport {
                width: img.metrics.natural_width(),
                height: img.metrics.natural_height(),
                source: img.source,
                file: self.rasters.get(img.raster).and_then(|raster| match &raster.origin {
                    RasterOrigin::File(path) => Some(path.clone()),
                    RasterOrigin::Synthetic => None,
                }),
            }),
            surface: self.engine.surface(),
            draw_rect: self.engine.draw_rect(),
            readout: self.engine.readout(),
            overlay: self.engine.overlay(),
            touch_input: self.engine.touch_input,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageReport {
    pub width: f64,
    pub height: f64,
    pub source: ImageSource,
    /// Decoded file, if the raster came from one.
    pub file: Option<PathBuf>,
}

/// Final state printed by `--json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub policy: &'static str,
    pub image: Option<ImageReport>,
    pub surface: SurfaceSize,
    pub draw_rect: Option<DrawRect>,
    pub readout: Readout,
    pub overlay: Vec<OverlayItem>,
    /// Whether pointer events were reported as touches.
    pub touch_input: bool,
}

/// One status line per action.
#[must_use]
pub fn format_action(action: &Action) -> String {
    match action {
        Action::ImageLoaded { width, height, source } => {
            let source = match source {
                ImageSource::Upload => "upload",
                ImageSource::Camera => "camera",
            };
            format!("image loaded: {width}x{height} ({source})")
        }
        Action::SuggestSurface { width, height } => format!("surface: {width:.2}x{height:.2}"),
        Action::Status(signal) => signal.message().to_owned(),
        Action::Rejected(err) => format!("rejected [{}]: {err}", err.code()),
        Action::Cleared => "cleared".to_owned(),
        Action::CaptureStarted => "capture started".to_owned(),
        Action::CaptureReady => "capture ready".to_owned(),
        Action::SnapshotRequested => "snapshot requested".to_owned(),
        Action::CaptureStopped => "capture stopped".to_owned(),
        Action::RenderNeeded => "render".to_owned(),
    }
}

/// Human-readable readout block.
#[must_use]
pub fn format_readout(readout: &Readout) -> String {
    format!(
        "points: {}/4\nP1-P2: {}\nP3-P4: {}\nratio: {}\nclass: {} ({})",
        readout.points,
        readout.distance_label(0),
        readout.distance_label(1),
        readout.ratio_label(),
        readout.label,
        readout.color,
    )
}

#[cfg(test)]
#[path = "host_test.rs"]
mod tests;
