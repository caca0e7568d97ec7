//! Data model for one analysis run.
//!
//! A **fix** is one timestamped GPS sample from the moving train; an **asset**
//! is a stationary wayside point of interest (OHE mast, signal, ...). The
//! matcher associates each asset with its nearest fix, valid only inside the
//! caller-supplied distance threshold.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One GPS sample from the track dataset.
///
/// Immutable once ingested. Owned by the [`GridIndex`](crate::GridIndex) for
/// the lifetime of an analysis run; the timestamp is an opaque passthrough
/// string, never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackFix {
    /// 0-based ingestion order, stable across the run. Doubles as the
    /// deterministic tie-break key among equidistant candidates.
    pub seq: u32,
    /// Latitude in WGS84 decimal degrees.
    pub lat: f64,
    /// Longitude in WGS84 decimal degrees.
    pub lon: f64,
    /// Logging time as recorded in the source, passed through verbatim.
    pub timestamp: String,
    /// Reported speed in km/h; `None` when the source field was absent or
    /// non-numeric.
    pub speed_kmph: Option<f64>,
}

/// Category of a wayside asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Overhead equipment structure (mast / portal).
    Ohe,
    /// Lineside signal.
    Signal,
    /// Level crossing gate.
    LevelCrossing,
    /// Neutral section of the overhead supply.
    NeutralSection,
}

impl AssetKind {
    /// Stable lowercase token used in reports and CLI input.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Ohe => "ohe",
            AssetKind::Signal => "signal",
            AssetKind::LevelCrossing => "level_crossing",
            AssetKind::NeutralSection => "neutral_section",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    /// Case-insensitive; accepts a few common aliases seen in source files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ohe" | "mast" | "structure" => Ok(AssetKind::Ohe),
            "signal" => Ok(AssetKind::Signal),
            "level_crossing" | "lc" | "crossing" => Ok(AssetKind::LevelCrossing),
            "neutral_section" | "ns" => Ok(AssetKind::NeutralSection),
            other => Err(format!("unknown asset kind: {other:?}")),
        }
    }
}

/// A stationary point to be matched against the track.
///
/// Read-only input to the matcher. Coordinates may be non-finite when the
/// source row failed numeric parsing; such assets are emitted as explicitly
/// unmatched rather than dropped, so one result exists per input asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub kind: AssetKind,
    pub lat: f64,
    pub lon: f64,
}

impl Asset {
    /// Whether both coordinates are finite numbers.
    pub fn has_valid_coords(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Outcome of matching one asset, created exactly once per asset in input
/// order and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub asset_name: String,
    pub asset_kind: AssetKind,
    pub lat: f64,
    pub lon: f64,
    /// Timestamp of the matched fix; empty string when unmatched.
    pub matched_timestamp: String,
    /// Speed of the matched fix; `None` when unmatched or when the fix
    /// itself carried no numeric speed.
    pub speed_kmph: Option<f64>,
    pub matched: bool,
    /// Great-circle distance to the matched fix, rounded to the nearest
    /// whole meter. Display field only; the matcher compares unrounded
    /// distances. `None` when unmatched.
    pub distance_m: Option<f64>,
}

impl MatchResult {
    /// An explicitly-unmatched record for the given asset.
    pub fn unmatched(asset: &Asset) -> Self {
        MatchResult {
            asset_name: asset.name.clone(),
            asset_kind: asset.kind,
            lat: asset.lat,
            lon: asset.lon,
            matched_timestamp: String::new(),
            speed_kmph: None,
            matched: false,
            distance_m: None,
        }
    }
}

/// Aggregate statistics over one result sequence.
///
/// Recomputable from the [`MatchResult`] slice; carries no independent state.
/// Speed statistics cover only matched results with a numeric speed and are
/// all zero when no such result exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_assets: usize,
    pub matched_count: usize,
    pub matched_per_kind: HashMap<AssetKind, usize>,
    /// matched / total × 100; zero when `total_assets` is zero.
    pub match_rate_pct: f64,
    pub avg_speed_kmph: f64,
    pub max_speed_kmph: f64,
    pub min_speed_kmph: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_kind_round_trips_through_str() {
        for kind in [
            AssetKind::Ohe,
            AssetKind::Signal,
            AssetKind::LevelCrossing,
            AssetKind::NeutralSection,
        ] {
            assert_eq!(kind.as_str().parse::<AssetKind>().unwrap(), kind);
        }
    }

    #[test]
    fn asset_kind_parsing_is_case_insensitive() {
        assert_eq!("OHE".parse::<AssetKind>().unwrap(), AssetKind::Ohe);
        assert_eq!(" Signal ".parse::<AssetKind>().unwrap(), AssetKind::Signal);
        assert!("bridge".parse::<AssetKind>().is_err());
    }

    #[test]
    fn nan_coordinates_are_invalid() {
        let asset = Asset {
            name: "S-101".into(),
            kind: AssetKind::Ohe,
            lat: f64::NAN,
            lon: 77.2,
        };
        assert!(!asset.has_valid_coords());
    }

    #[test]
    fn unmatched_record_carries_no_match_fields() {
        let asset = Asset {
            name: "S-101".into(),
            kind: AssetKind::Signal,
            lat: 28.6,
            lon: 77.2,
        };
        let r = MatchResult::unmatched(&asset);
        assert!(!r.matched);
        assert!(r.matched_timestamp.is_empty());
        assert!(r.speed_kmph.is_none());
        assert!(r.distance_m.is_none());
    }
}
