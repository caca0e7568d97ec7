//! Report sink: renders a result sequence without altering order or values.

use std::io::Write;
use wayside_core::{MatchResult, Summary};

/// Write the result sequence as CSV, one row per asset in input order.
///
/// Unmatched rows carry empty match fields rather than being omitted, so the
/// output row count always equals the input asset count.
pub fn write_results_csv<W: Write>(out: W, results: &[MatchResult]) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "asset_id",
        "kind",
        "latitude",
        "longitude",
        "matched",
        "matched_speed_kmph",
        "closest_distance_m",
        "matched_time",
    ])?;
    for r in results {
        let lat = format_coord(r.lat);
        let lon = format_coord(r.lon);
        let speed = r.speed_kmph.map(|s| s.to_string()).unwrap_or_default();
        let distance = r.distance_m.map(|d| format!("{d:.0}")).unwrap_or_default();
        writer.write_record([
            r.asset_name.as_str(),
            r.asset_kind.as_str(),
            lat.as_str(),
            lon.as_str(),
            if r.matched { "true" } else { "false" },
            speed.as_str(),
            distance.as_str(),
            r.matched_timestamp.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Non-finite coordinates (unparsable source rows) render as empty cells.
fn format_coord(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}

/// Human-readable summary block for stdout.
pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    out.push_str(&format!("total assets     : {}\n", summary.total_assets));
    out.push_str(&format!("matched          : {}\n", summary.matched_count));
    out.push_str(&format!("match rate       : {:.1}%\n", summary.match_rate_pct));
    out.push_str(&format!("avg speed (kmph) : {:.2}\n", summary.avg_speed_kmph));
    out.push_str(&format!("max speed (kmph) : {:.2}\n", summary.max_speed_kmph));
    out.push_str(&format!("min speed (kmph) : {:.2}\n", summary.min_speed_kmph));
    let mut kinds: Vec<_> = summary.matched_per_kind.iter().collect();
    kinds.sort_by_key(|(kind, _)| kind.as_str());
    for (kind, count) in kinds {
        out.push_str(&format!("matched {:<9}: {}\n", kind.as_str(), count));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayside_core::{summarize, AssetKind};

    fn sample_results() -> Vec<MatchResult> {
        vec![
            MatchResult {
                asset_name: "S-1".into(),
                asset_kind: AssetKind::Ohe,
                lat: 28.6001,
                lon: 77.2001,
                matched_timestamp: "2024-01-01 10:00:00".into(),
                speed_kmph: Some(62.5),
                matched: true,
                distance_m: Some(12.0),
            },
            MatchResult {
                asset_name: "S-2".into(),
                asset_kind: AssetKind::Signal,
                lat: f64::NAN,
                lon: 77.3,
                matched_timestamp: String::new(),
                speed_kmph: None,
                matched: false,
                distance_m: None,
            },
        ]
    }

    #[test]
    fn csv_has_one_row_per_result_in_order() {
        let mut buf = Vec::new();
        write_results_csv(&mut buf, &sample_results()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("S-1,ohe,28.6001,77.2001,true,62.5,12,"));
        assert!(lines[2].starts_with("S-2,signal,,77.3,false,,,"));
    }

    #[test]
    fn summary_block_lists_per_kind_counts() {
        let summary = summarize(&sample_results());
        let text = render_summary(&summary);
        assert!(text.contains("total assets     : 2"));
        assert!(text.contains("matched ohe      : 1"));
        assert!(text.contains("match rate       : 50.0%"));
    }
}
