use std::fmt::Display;

use crate::{
    angle::PackedAngle, plane::{zone_of, PlanePosition}, projections::gauss_kruger::GaussKruger, Error, ParseCoord,
};

/// Representation of a latitude/longitude point in decimal degrees on the
/// projection's ellipsoid. Can be converted to/from [`PlanePosition`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeodeticPosition {
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    pub(crate) latitude: f64,
    #[cfg_attr(feature = "serde", serde(alias = "lon"))]
    pub(crate) longitude: f64,
}

impl GeodeticPosition {
    /// Internal-only constructor that doesn't check the bounds of lat/lon
    pub(crate) fn new(lat: f64, lon: f64) -> GeodeticPosition {
        Self {
            latitude: lat,
            longitude: lon,
        }
    }

    /// Tries to create a latitude/longitude point from a lat/lon pair. First checks if the
    /// values are valid:
    /// * Latitude must be in range [-90,90]
    /// * Longitude must be in range [-180,180]
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if either latitude or longitude are invalid.
    ///
    /// # Usage
    ///
    /// ```
    /// use gausskruger::GeodeticPosition;
    ///
    /// let coord = GeodeticPosition::create(23.16036069, 113.33990695).unwrap();
    ///
    /// assert_eq!(coord.latitude(), 23.16036069);
    /// assert_eq!(coord.longitude(), 113.33990695);
    ///
    /// assert!(GeodeticPosition::create(100.0, 0.0).is_err());
    /// assert!(GeodeticPosition::create(0.0, -200.0).is_err());
    /// assert!(GeodeticPosition::create(f64::NAN, 0.0).is_err());
    /// ```
    pub fn create(lat: f64, lon: f64) -> Result<GeodeticPosition, Error> {
        if !(-90_f64..=90_f64).contains(&lat) {
            Err(Error::InvalidCoord(format!("Latitude {lat} outside of valid range [-90, 90].")))
        } else if !(-180_f64..=180_f64).contains(&lon) {
            Err(Error::InvalidCoord(format!("Longitude {lon} outside of valid range [-180, 180].")))
        } else {
            Ok(GeodeticPosition::new(lat, lon))
        }
    }

    /// Returns the latitude in decimal degrees.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in decimal degrees.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns the 6° zone the point projects into.
    ///
    /// ```
    /// use gausskruger::GeodeticPosition;
    ///
    /// let coord = GeodeticPosition::create(23.16036069, 113.33990695).unwrap();
    /// assert_eq!(coord.zone(), 19);
    /// ```
    pub fn zone(&self) -> i32 {
        zone_of(self.longitude)
    }

    /// Latitude and longitude in packed `D.MMSSssss` form, for display.
    ///
    /// ```
    /// use gausskruger::GeodeticPosition;
    ///
    /// let coord = GeodeticPosition::create(23.276666666666667, -113.5).unwrap();
    /// let (lat, lon) = coord.to_packed();
    ///
    /// assert!((lat.value() - 23.1636).abs() < 1e-8);
    /// assert!((lon.value() + 113.3).abs() < 1e-8);
    /// ```
    pub fn to_packed(&self) -> (PackedAngle, PackedAngle) {
        (
            PackedAngle::from_radians(self.latitude.to_radians()),
            PackedAngle::from_radians(self.longitude.to_radians()),
        )
    }

    /// Converts from [`PlanePosition`] to [`GeodeticPosition`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convergence`] if the footpoint latitude can't be solved.
    pub fn from_plane(value: &PlanePosition, projection: &GaussKruger) -> Result<GeodeticPosition, Error> {
        value.to_geodetic(projection)
    }

    /// Converts from [`GeodeticPosition`] to [`PlanePosition`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if the point is not finite.
    ///
    /// # Usage
    ///
    /// ```
    /// use gausskruger::{GaussKruger, GeodeticPosition};
    ///
    /// let projection = GaussKruger::named("wgs84").unwrap();
    /// let coord = GeodeticPosition::create(23.16036069, 113.33990695).unwrap();
    ///
    /// let converted = coord.to_plane(&projection).unwrap();
    ///
    /// assert_eq!(converted.zone(), 19);
    /// assert!((converted.easting() - 739_655.201_641).abs() < 1e-3);
    /// assert!((converted.northing() - 2_564_222.174_656).abs() < 1e-3);
    /// ```
    pub fn to_plane(&self, projection: &GaussKruger) -> Result<PlanePosition, Error> {
        PlanePosition::from_geodetic(self, projection)
    }
}

impl ParseCoord for GeodeticPosition {
    /// Reads `"lat lon"` or `"lat,lon"` in decimal degrees.
    fn parse_coord(value: &str) -> Result<Self, Error> {
        let mut pieces = value
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|piece| !piece.is_empty());

        let (Some(lat), Some(lon), None) = (pieces.next(), pieces.next(), pieces.next()) else {
            return Err(Error::InvalidCoord(format!("Expected \"lat lon\", got {value:?}")));
        };

        let parse = |text: &str| {
            text.parse::<f64>()
                .map_err(|_| Error::InvalidCoord(format!("{text:?} in {value:?} is not a number")))
        };

        GeodeticPosition::create(parse(lat)?, parse(lon)?)
    }
}

impl Display for GeodeticPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let lat = buf.format(self.latitude);
        let mut buf = ryu::Buffer::new();
        let lon = buf.format(self.longitude);
        write!(
            f,
            "{lat} {lon}",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_coord() {
        let coord: GeodeticPosition = crate::from_str("23.16036069 113.33990695").unwrap();
        assert_eq!(coord, GeodeticPosition::new(23.160_360_69, 113.339_906_95));

        let coord: GeodeticPosition = crate::from_str(" 23.16036069, 113.33990695 ").unwrap();
        assert_eq!(coord.to_string(), "23.16036069 113.33990695");

        assert!(crate::from_str::<_, GeodeticPosition>("23.16036069").is_err());
        assert!(crate::from_str::<_, GeodeticPosition>("23.1 113.3 4").is_err());
        assert!(crate::from_str::<_, GeodeticPosition>("north east").is_err());
        assert!(crate::from_str::<_, GeodeticPosition>("95 113.3").is_err());
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(GeodeticPosition::create(90., 180.).is_ok());
        assert!(GeodeticPosition::create(-90., -180.).is_ok());
        assert!(GeodeticPosition::create(0., f64::INFINITY).is_err());
    }
}
