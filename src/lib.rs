#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::many_single_char_names,
    clippy::similar_names
)]

//! Conversion between geodetic latitude/longitude and Gauss-Krüger plane
//! coordinates on the WGS84 and CGCS2000 ellipsoids.
//!
//! The typed API works on [`GeodeticPosition`] and [`PlanePosition`] through a
//! [`GaussKruger`] projection. The free functions [`geodetic_to_plane`] and
//! [`plane_to_geodetic`] keep the historic tuple interface, where the zone
//! number is written in front of the easting digits.
//!
//! ```
//! use gausskruger::{GaussKruger, GeodeticPosition};
//!
//! let projection = GaussKruger::named("wgs84").unwrap();
//! let coord = GeodeticPosition::create(23.16036069, 113.33990695).unwrap();
//!
//! let plane = coord.to_plane(&projection).unwrap();
//! assert_eq!(plane.zone(), 19);
//!
//! let back = plane.to_geodetic(&projection).unwrap();
//! assert!((back.latitude() - coord.latitude()).abs() < 1e-7);
//! assert!((back.longitude() - coord.longitude()).abs() < 1e-7);
//! ```

use thiserror::Error;

pub mod angle;
pub mod ellipsoid;
pub mod geodetic;
pub mod plane;

pub use angle::{
    packed_decimal_to_decimal_degrees, radians_to_packed_decimal, spaced_dms_to_radians, PackedAngle,
};
pub use ellipsoid::{ellipsoid_parameters, Ellipsoid};
pub use geodetic::GeodeticPosition;
pub use plane::{central_meridian, zone_of, PlanePosition};
pub use projections::gauss_kruger::GaussKruger;

pub mod projections {
    pub mod gauss_kruger;
}

pub(crate) mod constants;
pub(crate) mod utility;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Coordinate parameters are not valid: {0}")]
    InvalidCoord(String),
    #[error("No such ellipsoid: {0}")]
    UnknownEllipsoid(String),
    #[error("Ellipsoid parameters are not valid: {0}")]
    InvalidEllipsoid(String),
    #[error("Could not parse angle: {0}")]
    Parse(String),
    #[error("Footpoint latitude did not converge after {iterations} iterations for northing {northing}")]
    Convergence {
        iterations: usize,
        northing: f64,
    },
}

pub trait ParseCoord {
    fn parse_coord(value: &str) -> Result<Self, Error>
    where Self: Sized;
}

pub fn from_str<S, T>(value: S) -> Result<T, Error>
where
    S: AsRef<str>,
    T: ParseCoord
{
    T::parse_coord(value.as_ref())
}

/// Anything that can be read as an angle in decimal degrees. Text is parsed
/// as a plain decimal number, not as packed `D.MMSS`.
pub trait AsDegrees {
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the value is text that isn't a number.
    fn as_degrees(&self) -> Result<f64, Error>;
}

impl AsDegrees for f64 {
    fn as_degrees(&self) -> Result<f64, Error> {
        Ok(*self)
    }
}

impl AsDegrees for str {
    fn as_degrees(&self) -> Result<f64, Error> {
        self.trim()
            .parse()
            .map_err(|_| Error::Parse(format!("{self:?} is not a decimal degree value")))
    }
}

impl AsDegrees for String {
    fn as_degrees(&self) -> Result<f64, Error> {
        self.as_str().as_degrees()
    }
}

impl<T: AsDegrees + ?Sized> AsDegrees for &T {
    fn as_degrees(&self) -> Result<f64, Error> {
        (**self).as_degrees()
    }
}

/// Projects a decimal-degree latitude/longitude onto the Gauss-Krüger plane.
///
/// Returns `(x, y)` where `x` is the northing and `y` the easting with the
/// zone number written in front of its digits, e.g. zone 19 and easting
/// `739655.2016` become `19739655.2016`.
///
/// # Errors
///
/// Returns [`Error::Parse`] if latitude or longitude is not a number,
/// [`Error::UnknownEllipsoid`] for an unsupported ellipsoid name and
/// [`Error::InvalidCoord`] for a latitude outside [-90, 90] or a longitude
/// outside [-180, 180].
///
/// # Usage
///
/// ```
/// let (x, y) = gausskruger::geodetic_to_plane("23.16036069", "113.33990695", "wgs84").unwrap();
///
/// assert!((x - 2_564_222.174_656).abs() < 1e-3);
/// assert!((y - 19_739_655.201_641).abs() < 1e-3);
/// ```
pub fn geodetic_to_plane<T: AsDegrees>(latitude: T, longitude: T, ellipsoid: &str) -> Result<(f64, f64), Error> {
    let projection = GaussKruger::named(ellipsoid)?;
    let plane = projection.forward(latitude.as_degrees()?, longitude.as_degrees()?)?;

    Ok((plane.northing(), plane.legacy_easting()?))
}

/// Inverse of [`geodetic_to_plane`]: takes the zone-prefixed easting `y` and
/// the northing `x` and returns `(latitude, longitude)` in decimal degrees.
///
/// # Errors
///
/// Returns [`Error::UnknownEllipsoid`] for an unsupported ellipsoid name,
/// [`Error::InvalidCoord`] for non-finite input or an unknown zone prefix and
/// [`Error::Convergence`] if
/// the footpoint latitude can't be solved.
///
/// # Usage
///
/// ```
/// let (lat, lon) = gausskruger::plane_to_geodetic(19_739_655.201_641_243, 2_564_222.174_656_386, "wgs84").unwrap();
///
/// assert!((lat - 23.16036069).abs() < 1e-7);
/// assert!((lon - 113.33990695).abs() < 1e-7);
/// ```
pub fn plane_to_geodetic(y: f64, x: f64, ellipsoid: &str) -> Result<(f64, f64), Error> {
    let projection = GaussKruger::named(ellipsoid)?;
    let coord = PlanePosition::from_legacy(y, x)?.to_geodetic(&projection)?;

    Ok((coord.latitude(), coord.longitude()))
}

/// Same as [`plane_to_geodetic`], but routes the result through the packed
/// `D.MMSSssss` encoding the way older tooling did: the longitude difference
/// is packed first and the central meridian is added to the packed value.
/// Only useful to reproduce previously stored results. The packed sum is not
/// a valid angle west of the central meridian.
///
/// # Errors
///
/// Same as [`plane_to_geodetic`], plus [`Error::Parse`] when a packed
/// intermediate has fewer than two fractional digits.
pub fn plane_to_geodetic_legacy(y: f64, x: f64, ellipsoid: &str) -> Result<(f64, f64), Error> {
    let projection = GaussKruger::named(ellipsoid)?;
    let plane = PlanePosition::from_legacy(y, x)?;
    let (lat, dlon) = projection.inverse_radians(&plane)?;

    let lat = radians_to_packed_decimal(lat);
    let lon = radians_to_packed_decimal(dlon) + plane.central_meridian();

    Ok((packed_decimal_to_decimal_degrees(lat)?, packed_decimal_to_decimal_degrees(lon)?))
}

trait ThisOrThat {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T;
}

impl ThisOrThat for bool {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T {
        if *self { r#true } else { r#false }
    }
}
