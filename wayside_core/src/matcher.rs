//! Nearest-fix matching of wayside assets against an indexed track.
//!
//! One logical unit of work per analysis: build one [`GridIndex`] from one
//! track, then evaluate every asset against it. The index is read-only after
//! construction and each asset's match is independent, so the asset loop runs
//! on the rayon pool; the order-preserving collect keeps the "one result per
//! asset, in input order" invariant intact.

use crate::error::CoreError;
use crate::geodesy::haversine_m;
use crate::grid::GridIndex;
use crate::summary::summarize;
use crate::types::{Asset, MatchResult, Summary, TrackFix};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

/// Matching configuration.
#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    /// Maximum distance in meters for a fix to count as a match.
    pub max_distance_m: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { max_distance_m: 50.0 }
    }
}

impl MatchConfig {
    fn validate(&self) -> Result<(), CoreError> {
        if !self.max_distance_m.is_finite() || self.max_distance_m <= 0.0 {
            return Err(CoreError::InvalidThreshold(self.max_distance_m));
        }
        Ok(())
    }
}

/// The full output of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// One entry per input asset, in input order.
    pub results: Vec<MatchResult>,
    pub summary: Summary,
}

/// Match every asset against the indexed track.
///
/// Guarantees `results.len() == assets.len()` with input order preserved.
/// Assets with non-finite coordinates are emitted as explicitly unmatched
/// records; no asset can abort the batch. An empty index yields all-unmatched
/// results and zeroed speed statistics.
pub fn match_assets(
    index: &GridIndex,
    assets: &[Asset],
    config: &MatchConfig,
) -> Result<AnalysisReport, CoreError> {
    config.validate()?;

    let results: Vec<MatchResult> = assets
        .par_iter()
        .map(|asset| match_one(index, asset, config.max_distance_m))
        .collect();

    let summary = summarize(&results);
    debug!(
        total = summary.total_assets,
        matched = summary.matched_count,
        "asset matching complete"
    );

    Ok(AnalysisReport { results, summary })
}

/// Evaluate one asset against the index.
fn match_one(index: &GridIndex, asset: &Asset, max_distance_m: f64) -> MatchResult {
    if !asset.has_valid_coords() {
        warn!(asset = %asset.name, "non-finite coordinates, emitting unmatched record");
        return MatchResult::unmatched(asset);
    }

    match nearest_fix(index, asset.lat, asset.lon) {
        Some((fix, distance)) if distance <= max_distance_m => MatchResult {
            asset_name: asset.name.clone(),
            asset_kind: asset.kind,
            lat: asset.lat,
            lon: asset.lon,
            matched_timestamp: fix.timestamp.clone(),
            speed_kmph: fix.speed_kmph,
            matched: true,
            // Rounded for display only; the unrounded value above already
            // decided the threshold comparison and the candidate ranking.
            distance_m: Some(distance.round()),
        },
        _ => MatchResult::unmatched(asset),
    }
}

/// Nearest candidate in the 3×3 neighborhood, with its unrounded distance.
///
/// Ties at identical distance go to the lowest sequence index, so the winner
/// does not depend on bucket iteration order.
fn nearest_fix(index: &GridIndex, lat: f64, lon: f64) -> Option<(&TrackFix, f64)> {
    let mut best: Option<(&TrackFix, f64)> = None;
    for fix in index.query(lat, lon) {
        let d = haversine_m(lat, lon, fix.lat, fix.lon);
        let better = match best {
            None => true,
            Some((best_fix, best_d)) => d < best_d || (d == best_d && fix.seq < best_fix.seq),
        };
        if better {
            best = Some((fix, d));
        }
    }
    best
}
