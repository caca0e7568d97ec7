//! Great-circle distance on the WGS84 sphere.
//!
//! Single-formula module: haversine with a spherical Earth of radius
//! 6,371,000 m. Good to ~0.5% against the ellipsoid, which is far below the
//! matching thresholds this crate works with (tens of meters).

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two lat/lon pairs in decimal
/// degrees.
///
/// Symmetric up to floating-point rounding and exactly zero for coincident
/// points. Always finite and non-negative for finite inputs; callers filter
/// non-finite coordinates before calling.
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}
