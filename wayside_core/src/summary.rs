//! Aggregate statistics over a result sequence.
//!
//! A single fold over the immutable [`MatchResult`] slice; no running
//! counters shared between call sites. Speed statistics cover only matched
//! results that carry a numeric speed.

use crate::types::{AssetKind, MatchResult, Summary};
use std::collections::HashMap;

/// Fold a result sequence into a [`Summary`].
///
/// When no matched result has a numeric speed, all three speed figures are
/// zero rather than the ±∞ the accumulators start from. The match rate is
/// zero (not NaN) for an empty asset set.
pub fn summarize(results: &[MatchResult]) -> Summary {
    let total_assets = results.len();

    let mut matched_count = 0usize;
    let mut matched_per_kind: HashMap<AssetKind, usize> = HashMap::new();
    let mut speed_sum = 0.0f64;
    let mut speed_samples = 0usize;
    let mut max_speed = f64::NEG_INFINITY;
    let mut min_speed = f64::INFINITY;

    for result in results {
        if !result.matched {
            continue;
        }
        matched_count += 1;
        *matched_per_kind.entry(result.asset_kind).or_insert(0) += 1;
        if let Some(speed) = result.speed_kmph {
            speed_sum += speed;
            speed_samples += 1;
            max_speed = max_speed.max(speed);
            min_speed = min_speed.min(speed);
        }
    }

    let match_rate_pct = if total_assets > 0 {
        matched_count as f64 / total_assets as f64 * 100.0
    } else {
        0.0
    };

    let (avg_speed_kmph, max_speed_kmph, min_speed_kmph) = if speed_samples > 0 {
        (speed_sum / speed_samples as f64, max_speed, min_speed)
    } else {
        (0.0, 0.0, 0.0)
    };

    Summary {
        total_assets,
        matched_count,
        matched_per_kind,
        match_rate_pct,
        avg_speed_kmph,
        max_speed_kmph,
        min_speed_kmph,
    }
}
