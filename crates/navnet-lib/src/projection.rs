//! Geographic to planar coordinate projection.
//!
//! Places arrive as decimal-degree latitude/longitude pairs. Distance queries
//! work on planar coordinates produced by a transverse Mercator projection
//! pinned to a single UTM zone, so every place in a network shares one grid
//! and Euclidean distances between them are meaningful.
//!
//! The constants deliberately mirror the single-precision literals of the
//! USGS Bulletin 1532 formulation that the regression fixtures were produced
//! with. Changing any of them (including the truncated value of pi) shifts
//! results in the last few digits.

use serde::Serialize;

const PI: f64 = 3.14159265;
const DEG2RAD: f64 = PI / 180.0;

/// WGS-84 semi-major axis in metres.
const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
/// Squared eccentricity, stored as the single-precision value used by the fixtures.
const ECC_SQUARED: f64 = 0.006_694_38_f32 as f64;
/// Central meridian scale factor.
const SCALE_FACTOR: f64 = 0.9996_f32 as f64;

const FALSE_EASTING: f64 = 500_000.0;
const SOUTHERN_NORTHING_OFFSET: f64 = 10_000_000.0;

/// The projection never derives the zone from the input longitude.
pub const ZONE_NUMBER: i32 = 30;

/// Planar coordinate in metres. `x` carries the northing and `y` the easting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    /// Squared Euclidean distance to another point.
    pub fn squared_distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point in metres.
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.squared_distance_to(other).sqrt()
    }
}

/// Normalise a longitude into `[-180, 180)` using truncating division.
fn normalize_longitude(longitude: f64) -> f64 {
    let shifted = longitude + 180.0;
    shifted - (shifted / 360.0).trunc() * 360.0 - 180.0
}

/// Project a latitude/longitude pair (decimal degrees) onto the zone 30 grid.
pub fn project(latitude: f64, longitude: f64) -> PlanarPoint {
    let long_temp = normalize_longitude(longitude);

    let lat_rad = latitude * DEG2RAD;
    let long_rad = long_temp * DEG2RAD;

    let long_origin = f64::from((ZONE_NUMBER - 1) * 6 - 180 + 3);
    let long_origin_rad = long_origin * DEG2RAD;

    let a = SEMI_MAJOR_AXIS;
    let e2 = ECC_SQUARED;
    let k0 = SCALE_FACTOR;
    let ecc_prime_squared = e2 / (1.0 - e2);

    let sin_lat = lat_rad.sin();
    let tan_lat = lat_rad.tan();
    let cos_lat = lat_rad.cos();

    let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let t = tan_lat * tan_lat;
    let c = ecc_prime_squared * cos_lat * cos_lat;
    let big_a = cos_lat * (long_rad - long_origin_rad);

    let m = a
        * ((1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2 * e2 * e2 / 256.0) * lat_rad
            - (3.0 * e2 / 8.0 + 3.0 * e2 * e2 / 32.0 + 45.0 * e2 * e2 * e2 / 1024.0)
                * (2.0 * lat_rad).sin()
            + (15.0 * e2 * e2 / 256.0 + 45.0 * e2 * e2 * e2 / 1024.0) * (4.0 * lat_rad).sin()
            - (35.0 * e2 * e2 * e2 / 3072.0) * (6.0 * lat_rad).sin());

    let easting = k0
        * n
        * (big_a
            + (1.0 - t + c) * big_a * big_a * big_a / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ecc_prime_squared)
                * big_a
                * big_a
                * big_a
                * big_a
                * big_a
                / 120.0)
        + FALSE_EASTING;

    let mut northing = k0
        * (m + n
            * tan_lat
            * (big_a * big_a / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * big_a * big_a * big_a * big_a / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ecc_prime_squared)
                    * big_a
                    * big_a
                    * big_a
                    * big_a
                    * big_a
                    * big_a
                    / 720.0));

    if latitude < 0.0 {
        northing += SOUTHERN_NORTHING_OFFSET;
    }

    PlanarPoint {
        x: northing,
        y: easting,
    }
}

/// Planar distance in kilometres between two geographic points.
pub fn arc_length_km(start_lat: f64, start_lon: f64, end_lat: f64, end_lon: f64) -> f64 {
    let start = project(start_lat, start_lon);
    let end = project(end_lat, end_lon);
    start.distance_to(&end) * 0.001
}
