//! CSV readers producing typed rows.
//!
//! Row-error policy (applied uniformly, never fatal):
//! - **Track** rows with unparsable coordinates are dropped before indexing;
//!   an unparsable speed only nulls the speed field.
//! - **Asset** rows are always kept, one per input row; unparsable
//!   coordinates become `NaN` so the matcher emits an explicitly-unmatched
//!   record for them.

use crate::columns::{AssetColumns, TrackColumns};
use crate::error::TabularError;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};
use wayside_core::{Asset, AssetKind, TrackFix};

fn csv_reader<R: Read>(source: R) -> csv::Reader<R> {
    ReaderBuilder::new().flexible(true).from_reader(source)
}

fn field<'a>(record: &'a StringRecord, idx: usize) -> &'a str {
    record.get(idx).unwrap_or("").trim()
}

fn parse_f64(record: &StringRecord, idx: usize) -> Option<f64> {
    field(record, idx).parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read the track dataset into fixes, in file order.
///
/// Fails only on input errors: unreadable CSV, unresolvable latitude /
/// longitude / time columns, or zero usable rows.
pub fn read_track<R: Read>(source: R) -> Result<Vec<TrackFix>, TabularError> {
    let mut reader = csv_reader(source);
    let columns = TrackColumns::resolve(reader.headers()?)?;

    let mut fixes = Vec::new();
    let mut dropped = 0usize;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let (lat, lon) = match (parse_f64(&record, columns.lat), parse_f64(&record, columns.lon)) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                warn!(row = row + 1, "track row has unparsable coordinates, dropping");
                dropped += 1;
                continue;
            }
        };
        let speed_kmph = columns.speed.and_then(|idx| parse_f64(&record, idx));
        fixes.push(TrackFix {
            seq: fixes.len() as u32,
            lat,
            lon,
            timestamp: field(&record, columns.time).to_string(),
            speed_kmph,
        });
    }

    if fixes.is_empty() {
        return Err(TabularError::EmptyDataset { dataset: "track" });
    }
    info!(rows = fixes.len(), dropped, "track dataset loaded");
    Ok(fixes)
}

/// Read the asset dataset, one asset per input row, in file order.
pub fn read_assets<R: Read>(source: R) -> Result<Vec<Asset>, TabularError> {
    let mut reader = csv_reader(source);
    let columns = AssetColumns::resolve(reader.headers()?)?;

    let mut assets = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let lat = parse_f64(&record, columns.lat).unwrap_or(f64::NAN);
        let lon = parse_f64(&record, columns.lon).unwrap_or(f64::NAN);
        if lat.is_nan() || lon.is_nan() {
            warn!(row = row + 1, "asset row has unparsable coordinates, will report unmatched");
        }
        let kind = columns
            .kind
            .and_then(|idx| match field(&record, idx).parse::<AssetKind>() {
                Ok(kind) => Some(kind),
                Err(err) => {
                    debug!(row = row + 1, %err, "defaulting asset kind to ohe");
                    None
                }
            })
            .unwrap_or(AssetKind::Ohe);
        assets.push(Asset {
            name: field(&record, columns.name).to_string(),
            kind,
            lat,
            lon,
        });
    }

    if assets.is_empty() {
        return Err(TabularError::EmptyDataset { dataset: "asset" });
    }
    info!(rows = assets.len(), "asset dataset loaded");
    Ok(assets)
}

/// Open and read a track CSV from disk.
pub fn read_track_file<P: AsRef<Path>>(path: P) -> Result<Vec<TrackFix>, TabularError> {
    read_track(File::open(path)?)
}

/// Open and read an asset CSV from disk.
pub fn read_assets_file<P: AsRef<Path>>(path: P) -> Result<Vec<Asset>, TabularError> {
    read_assets(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_track_rows_with_sequence_indices() {
        let csv = "device_id,logging_time,latitude,longitude,speed\n\
                   D1,2024-01-01 10:00:00,28.6001,77.2001,62.5\n\
                   D1,2024-01-01 10:00:05,28.6002,77.2002,63.0\n";
        let fixes = read_track(csv.as_bytes()).unwrap();
        assert_eq!(fixes.len(), 2);
        assert_eq!(fixes[0].seq, 0);
        assert_eq!(fixes[1].seq, 1);
        assert_eq!(fixes[0].timestamp, "2024-01-01 10:00:00");
        assert_eq!(fixes[0].speed_kmph, Some(62.5));
    }

    #[test]
    fn drops_track_rows_with_bad_coordinates_and_renumbers() {
        let csv = "logging_time,latitude,longitude,speed\n\
                   T1,28.6001,77.2001,60\n\
                   T2,abc,77.2002,61\n\
                   T3,28.6003,77.2003,62\n";
        let fixes = read_track(csv.as_bytes()).unwrap();
        assert_eq!(fixes.len(), 2);
        assert_eq!(fixes[1].seq, 1);
        assert_eq!(fixes[1].timestamp, "T3");
    }

    #[test]
    fn bad_speed_keeps_the_row_with_null_speed() {
        let csv = "logging_time,latitude,longitude,speed\n\
                   T1,28.6001,77.2001,n/a\n";
        let fixes = read_track(csv.as_bytes()).unwrap();
        assert_eq!(fixes.len(), 1);
        assert!(fixes[0].speed_kmph.is_none());
    }

    #[test]
    fn all_rows_unusable_is_an_empty_dataset() {
        let csv = "logging_time,latitude,longitude\nT1,abc,def\n";
        let err = read_track(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, TabularError::EmptyDataset { dataset: "track" }));
    }

    #[test]
    fn missing_latitude_column_is_descriptive() {
        let csv = "logging_time,longitude,speed\nT1,77.2,60\n";
        let err = read_track(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn asset_rows_with_bad_coordinates_are_kept_as_nan() {
        let csv = "structure_id,latitude,longitude\n\
                   S-1,28.6001,77.2001\n\
                   S-2,abc,77.2002\n";
        let assets = read_assets(csv.as_bytes()).unwrap();
        assert_eq!(assets.len(), 2);
        assert!(assets[0].has_valid_coords());
        assert!(!assets[1].has_valid_coords());
        assert_eq!(assets[1].name, "S-2");
    }

    #[test]
    fn asset_kind_column_resolves_with_default() {
        let csv = "structure_id,latitude,longitude,type\n\
                   S-1,28.6,77.2,Signal\n\
                   S-2,28.7,77.3,whatever\n";
        let assets = read_assets(csv.as_bytes()).unwrap();
        assert_eq!(assets[0].kind, AssetKind::Signal);
        assert_eq!(assets[1].kind, AssetKind::Ohe);
    }

    #[test]
    fn empty_asset_file_is_an_input_error() {
        let csv = "structure_id,latitude,longitude\n";
        let err = read_assets(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, TabularError::EmptyDataset { dataset: "asset" }));
    }
}
