//! Raster acquisition for the terminal host.
//!
//! The engine only ever sees a [`RasterHandle`] and natural dimensions. This store
//! owns where each raster came from so a handle can be traced back to its file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use measure::engine::RasterHandle;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("cannot read image header of {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Where a registered raster came from.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterOrigin {
    /// A decoded image file.
    File(PathBuf),
    /// Dimensions only, e.g. from a script or a camera frame.
    Synthetic,
}

/// A raster the host has registered with the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub handle: RasterHandle,
    pub width: f64,
    pub height: f64,
    pub origin: RasterOrigin,
}

#[derive(Debug, Default)]
pub struct RasterStore {
    next_id: u64,
    rasters: HashMap<RasterHandle, Raster>,
}

impl RasterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read only the header of `path` and register its natural size.
    ///
    /// # Errors
    ///
    /// [`RasterError::Decode`] if the file is missing or not a supported format.
    pub fn load(&mut self, path: &Path) -> Result<Raster, RasterError> {
        let (width, height) = image::image_dimensions(path)
            .map_err(|source| RasterError::Decode { path: path.to_path_buf(), source })?;
        tracing::debug!(path = %path.display(), width, height, "raster header decoded");
        Ok(self.register(f64::from(width), f64::from(height), RasterOrigin::File(path.to_path_buf())))
    }

    /// Register a raster known only by its dimensions.
    pub fn synthetic(&mut self, width: f64, height: f64) -> Raster {
        self.register(width, height, RasterOrigin::Synthetic)
    }

    fn register(&mut self, width: f64, height: f64, origin: RasterOrigin) -> Raster {
        self.next_id += 1;
        let raster = Raster { handle: RasterHandle(self.next_id), width, height, origin };
        self.rasters.insert(raster.handle, raster.clone());
        tracing::debug!(handle = raster.handle.0, total = self.rasters.len(), "raster registered");
        raster
    }

    /// Forget every raster except `current`, the one the engine is showing.
    pub fn retain_only(&mut self, current: Option<RasterHandle>) {
        let before = self.rasters.len();
        self.rasters.retain(|handle, _| Some(*handle) == current);
        let released = before - self.rasters.len();
        if released > 0 {
            tracing::debug!(released, "rasters released");
        }
    }

    #[must_use]
    pub fn get(&self, handle: RasterHandle) -> Option<&Raster> {
        self.rasters.get(&handle)
    }
}

#[cfg(test)]
#[path = "raster_test.rs"]
mod tests;
