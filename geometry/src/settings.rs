use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Behavior choices for the ambiguous corners of the plane algorithms.
///
/// ```toml
/// plane_fallback = "distinct_diagonals"
/// polygon_hit = "triangulated"
/// axis_rotation = "rigid"
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub plane_fallback: PlaneFallback,
    pub polygon_hit: PolygonHit,
    pub axis_rotation: AxisRotation,
}

/// Substitute rays used by plane-plane intersection when one of the plane's own support rays is
/// parallel to the other plane.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneFallback {
    /// `support0 + support1` for both missing points.
    #[default]
    SharedDiagonal,
    /// `support0 + support1` for the first, `support0 - support1` for the second missing point.
    DistinctDiagonals,
}

/// Hit test of areas bounded by three or more points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolygonHit {
    /// Never hit.
    #[default]
    Stub,
    /// Fan triangulation from the first boundary point with a barycentric test per triangle.
    Triangulated,
}

/// Sine term of the rotation of a point `o + l * s + v` around a line `o + k * s`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisRotation {
    /// `(v × s) * sin(θ)`. Rigid only for unit supports, longer supports stretch the sine term.
    #[default]
    Support,
    /// `(v × s / |s|) * sin(θ)`. Rigid for any support length.
    Rigid,
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Parsing geometry settings")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Reading geometry settings from {}", path.display()))?;
        Self::from_toml_str(&text)
    }
}
