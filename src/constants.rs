use std::f64::consts::PI;

// Semi-major axis a
pub(crate) const WGS84_A: f64 = 6_378_137.;
// Flattening
#[allow(clippy::unreadable_literal)]
pub(crate) const WGS84_F: f64 = 1.0 / 298.257223563;

pub(crate) const CGCS2000_A: f64 = 6_378_137.;
#[allow(clippy::unreadable_literal)]
pub(crate) const CGCS2000_F: f64 = 1.0 / 298.257222101;

/// Width of a Gauss-Krüger zone in degrees
pub(crate) const ZONE_WIDTH: i32 = 6;
/// Added to every easting so values stay positive within a zone
pub(crate) const FALSE_EASTING: f64 = 500_000.;
/// Zones of longitudes -180° and 180°
pub(crate) const MIN_ZONE: i32 = -29;
pub(crate) const MAX_ZONE: i32 = 31;
/// Zone number sits above this digit in the legacy composite easting
pub(crate) const ZONE_PREFIX: i64 = 1_000_000;

/// 1e-4 arc second, in radians
pub(crate) const FOOTPOINT_TOLERANCE: f64 = PI / (180. * 3600. * 10_000.);
pub(crate) const MAX_FOOTPOINT_ITERATIONS: usize = 50;

/// Nudge applied before truncating degrees and minutes of a packed angle
pub(crate) const PACKED_EPS: f64 = 1e-4;
