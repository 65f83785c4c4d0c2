//! Measurement engine for the golden-ratio meter.
//!
//! This crate owns the part of the meter with real invariants: translating
//! pointer events on a resized, letterboxed display surface into
//! image-relative coordinates, accumulating up to four reference points into
//! two segment lengths, and classifying the ratio of those lengths against the
//! golden ratio. It performs no I/O. Decoding rasters, driving a camera, and
//! painting pixels belong to the host, which feeds events into
//! [`engine::EngineCore`] and consumes the resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction layer: image/surface/pointer events and capture lifecycle |
//! | [`mapper`] | Draw-rectangle fitting and surface <-> image-relative conversions |
//! | [`session`] | Four-point capture state machine, distances, and ratio |
//! | [`classify`] | Ratio classification policies and color tokens |
//! | [`readout`] | Formatted distances/ratio for display |
//! | [`overlay`] | Marker and segment primitives for the host renderer |
//! | [`error`] | Recoverable rejection taxonomy |
//! | [`consts`] | Shared numeric constants (golden ratio, thresholds, surface defaults) |

pub mod classify;
pub mod consts;
pub mod engine;
pub mod error;
pub mod mapper;
pub mod overlay;
pub mod readout;
pub mod session;
