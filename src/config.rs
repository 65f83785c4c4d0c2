//! Host configuration assembled from CLI flags and environment variables.

use measure::classify::PolicyKind;

pub const DEFAULT_VIEWPORT: &str = "1280x800";
pub const DEFAULT_DPR: f64 = 1.0;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error(transparent)]
    Policy(#[from] measure::classify::UnknownPolicy),
    #[error("invalid size '{0}' (expected WIDTHxHEIGHT, e.g. 1280x800)")]
    Size(String),
    #[error("invalid point '{0}' (expected X,Y)")]
    Point(String),
    #[error("invalid device pixel ratio {0} (must be positive)")]
    Dpr(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterConfig {
    pub policy: PolicyKind,
    pub viewport: (f64, f64),
    pub dpr: f64,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self { policy: PolicyKind::default(), viewport: (1280.0, 800.0), dpr: DEFAULT_DPR }
    }
}

impl MeterConfig {
    /// Build typed config from raw flag values.
    ///
    /// Sources, each falling back to the environment through clap:
    /// - `--policy` / `GOLDMETER_POLICY`: `proximity` (default) or `absolute`
    /// - `--viewport` / `GOLDMETER_VIEWPORT`: window size used to size the surface, default 1280x800
    /// - `--dpr` / `GOLDMETER_DPR`: backing pixels per logical pixel, default 1.0
    pub fn from_parts(policy: &str, viewport: &str, dpr: f64) -> Result<Self, ConfigError> {
        let policy = policy.parse::<PolicyKind>()?;
        let viewport = parse_size(viewport)?;
        if !(dpr.is_finite() && dpr > 0.0) {
            return Err(ConfigError::Dpr(dpr));
        }
        Ok(Self { policy, viewport, dpr })
    }
}

/// Parse `WIDTHxHEIGHT` (also accepts `X` and `*` as separators).
pub fn parse_size(raw: &str) -> Result<(f64, f64), ConfigError> {
    let err = || ConfigError::Size(raw.to_owned());
    let (w, h) = raw
        .trim()
        .split_once(['x', 'X', '*'])
        .ok_or_else(err)?;
    let w = w.trim().parse::<f64>().map_err(|_| err())?;
    let h = h.trim().parse::<f64>().map_err(|_| err())?;
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(err());
    }
    Ok((w, h))
}

/// Parse `X,Y` in logical surface pixels.
pub fn parse_point(raw: &str) -> Result<(f64, f64), ConfigError> {
    let err = || ConfigError::Point(raw.to_owned());
    let (x, y) = raw.trim().split_once(',').ok_or_else(err)?;
    let x = x.trim().parse::<f64>().map_err(|_| err())?;
    let y = y.trim().parse::<f64>().map_err(|_| err())?;
    if !(x.is_finite() && y.is_finite()) {
        return Err(err());
    }
    Ok((x, y))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
