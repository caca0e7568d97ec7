//! Column alias resolution.
//!
//! Source files arrive with inconsistent headers ("Latitude", "lat",
//! "LONGITUDE ", ...). Resolution is case-insensitive and whitespace-trimmed
//! against a fixed alias list per logical field; the first header matching
//! any alias wins.

use crate::error::TabularError;
use csv::StringRecord;

pub const LAT_ALIASES: &[&str] = &["latitude", "lat"];
pub const LON_ALIASES: &[&str] = &["longitude", "lon", "lng", "long"];
pub const TIME_ALIASES: &[&str] = &["logging_time", "timestamp", "time", "logged_at"];
pub const SPEED_ALIASES: &[&str] = &["speed", "speed_kmph", "speed_kph"];
pub const NAME_ALIASES: &[&str] = &["structure_id", "asset_id", "name", "id"];
pub const KIND_ALIASES: &[&str] = &["kind", "type", "category", "asset_type"];

/// Index of the first header matching any alias, or `None`.
pub fn resolve(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim();
        aliases.iter().any(|a| h.eq_ignore_ascii_case(a))
    })
}

fn require(
    headers: &StringRecord,
    aliases: &'static [&str],
    dataset: &'static str,
    column: &'static str,
) -> Result<usize, TabularError> {
    resolve(headers, aliases).ok_or_else(|| TabularError::MissingColumn {
        dataset,
        column,
        aliases: aliases.join(", "),
    })
}

/// Resolved field positions for the track dataset.
#[derive(Debug, Clone, Copy)]
pub struct TrackColumns {
    pub lat: usize,
    pub lon: usize,
    pub time: usize,
    /// Speed is optional in the source; rows without it still index.
    pub speed: Option<usize>,
}

impl TrackColumns {
    pub fn resolve(headers: &StringRecord) -> Result<Self, TabularError> {
        Ok(TrackColumns {
            lat: require(headers, LAT_ALIASES, "track", "latitude")?,
            lon: require(headers, LON_ALIASES, "track", "longitude")?,
            time: require(headers, TIME_ALIASES, "track", "logging_time")?,
            speed: resolve(headers, SPEED_ALIASES),
        })
    }
}

/// Resolved field positions for the asset dataset.
#[derive(Debug, Clone, Copy)]
pub struct AssetColumns {
    pub name: usize,
    pub lat: usize,
    pub lon: usize,
    /// Absent in single-category sources; every row defaults to OHE then.
    pub kind: Option<usize>,
}

impl AssetColumns {
    pub fn resolve(headers: &StringRecord) -> Result<Self, TabularError> {
        Ok(AssetColumns {
            name: require(headers, NAME_ALIASES, "asset", "structure_id")?,
            lat: require(headers, LAT_ALIASES, "asset", "latitude")?,
            lon: require(headers, LON_ALIASES, "asset", "longitude")?,
            kind: resolve(headers, KIND_ALIASES),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn resolution_ignores_case_and_whitespace() {
        let h = headers(&["Device_ID", " Logging_Time", "LATITUDE ", "Longitude", "Speed"]);
        let cols = TrackColumns::resolve(&h).unwrap();
        assert_eq!(cols.lat, 2);
        assert_eq!(cols.lon, 3);
        assert_eq!(cols.time, 1);
        assert_eq!(cols.speed, Some(4));
    }

    #[test]
    fn short_aliases_resolve() {
        let h = headers(&["id", "lat", "lng"]);
        let cols = AssetColumns::resolve(&h).unwrap();
        assert_eq!(cols.name, 0);
        assert_eq!(cols.lat, 1);
        assert_eq!(cols.lon, 2);
        assert!(cols.kind.is_none());
    }

    #[test]
    fn missing_longitude_names_the_column_and_aliases() {
        let h = headers(&["structure_id", "latitude"]);
        let err = AssetColumns::resolve(&h).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("longitude"), "{msg}");
        assert!(msg.contains("lng"), "{msg}");
    }

    #[test]
    fn speed_is_optional_for_track() {
        let h = headers(&["logging_time", "latitude", "longitude"]);
        let cols = TrackColumns::resolve(&h).unwrap();
        assert!(cols.speed.is_none());
    }
}
