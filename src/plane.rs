use num::Integer;

use crate::{
    constants::{FALSE_EASTING, MAX_ZONE, MIN_ZONE, ZONE_PREFIX, ZONE_WIDTH},
    geodetic::GeodeticPosition,
    projections::gauss_kruger::GaussKruger,
    Error, ParseCoord, ThisOrThat,
};

/// Representation of a Gauss-Krüger plane coordinate in a 6° zone.
/// The easting includes the 500 km false easting; the northing is measured
/// from the equator without a false northing, so it is negative south of it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanePosition {
    pub(crate) zone: i32,
    #[cfg_attr(feature = "serde", serde(alias = "y"))]
    pub(crate) easting: f64,
    #[cfg_attr(feature = "serde", serde(alias = "x"))]
    pub(crate) northing: f64,
}

impl PlanePosition {
    /// Internal-only constructor that doesn't check the coordinate
    pub(crate) fn new(zone: i32, easting: f64, northing: f64) -> PlanePosition {
        Self {
            zone,
            easting,
            northing,
        }
    }

    /// Tries to create a plane coordinate from its zone, easting (with false
    /// easting) and northing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if easting or northing is not finite.
    ///
    /// # Usage
    ///
    /// ```
    /// use gausskruger::PlanePosition;
    ///
    /// let coord = PlanePosition::create(19, 739_655.2016, 2_564_222.1747).unwrap();
    ///
    /// assert_eq!(coord.zone(), 19);
    /// assert_eq!(coord.central_meridian(), 111.0);
    ///
    /// assert!(PlanePosition::create(19, f64::NAN, 2_564_222.1747).is_err());
    /// ```
    pub fn create(zone: i32, easting: f64, northing: f64) -> Result<PlanePosition, Error> {
        if !easting.is_finite() || !northing.is_finite() {
            return Err(Error::InvalidCoord(format!("Plane coordinate ({easting}, {northing}) is not finite")));
        }

        Ok(PlanePosition::new(zone, easting, northing))
    }

    /// Returns the zone number.
    #[inline]
    pub fn zone(&self) -> i32 {
        self.zone
    }

    /// Returns the easting, false easting included.
    #[inline]
    pub fn easting(&self) -> f64 {
        self.easting
    }

    /// Returns the northing.
    #[inline]
    pub fn northing(&self) -> f64 {
        self.northing
    }

    /// Longitude of the zone's central meridian in degrees.
    pub fn central_meridian(&self) -> f64 {
        central_meridian(self.zone)
    }

    /// Easting relative to the central meridian.
    pub(crate) fn easting_offset(&self) -> f64 {
        self.easting - FALSE_EASTING
    }

    /// Easting in the historic composite form: the zone number's digits
    /// written in front of the easting's shortest decimal form, then read back
    /// as a number.
    ///
    /// This is text concatenation, not arithmetic. An easting below 100 km or
    /// a negative one doesn't round trip through [`PlanePosition::from_legacy`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the concatenated text is not a number.
    ///
    /// # Usage
    ///
    /// ```
    /// use gausskruger::PlanePosition;
    ///
    /// let coord = PlanePosition::create(19, 739_655.2016, 2_564_222.1747).unwrap();
    /// assert_eq!(coord.legacy_easting().unwrap(), 19_739_655.2016);
    /// ```
    pub fn legacy_easting(&self) -> Result<f64, Error> {
        let mut buf = ryu::Buffer::new();
        let text = format!("{}{}", self.zone, buf.format(self.easting));

        text.parse()
            .map_err(|_| Error::Parse(format!("Zone-prefixed easting {text:?} is not a number")))
    }

    /// Splits a zone-prefixed easting `y` (see [`PlanePosition::legacy_easting`])
    /// back into zone and easting. The zone is everything above the millions,
    /// carrying the sign of `y`, so zones west of Greenwich decode too.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if either value is not finite or the
    /// zone is not one of the zones covering [-180°, 180°].
    ///
    /// # Usage
    ///
    /// ```
    /// use gausskruger::PlanePosition;
    ///
    /// let coord = PlanePosition::from_legacy(19_739_655.2016, 2_564_222.1747).unwrap();
    ///
    /// assert_eq!(coord.zone(), 19);
    /// assert!((coord.easting() - 739_655.2016).abs() < 1e-6);
    ///
    /// let coord = PlanePosition::from_legacy(-16_403_511.2519, 3_320_534.4365).unwrap();
    ///
    /// assert_eq!(coord.zone(), -16);
    /// assert!((coord.easting() - 403_511.2519).abs() < 1e-6);
    /// ```
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_legacy(y: f64, x: f64) -> Result<PlanePosition, Error> {
        if !y.is_finite() || !x.is_finite() {
            return Err(Error::InvalidCoord(format!("Plane coordinate ({y}, {x}) is not finite")));
        }

        // The prefix is text, so a minus sign belongs to the zone only
        let prefix = ZONE_PREFIX as f64;
        let magnitude = (y.abs() / prefix).trunc();
        let zone = y.is_sign_negative().ternary(-1, 1) * magnitude as i32;
        if !(MIN_ZONE..=MAX_ZONE).contains(&zone) {
            return Err(Error::InvalidCoord(format!("Zone {zone} of easting {y} is out of range")));
        }
        let easting = y.abs() - magnitude * prefix;

        Ok(PlanePosition::new(zone, easting, x))
    }

    /// Projects a geodetic position into its zone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if the position is not finite.
    pub fn from_geodetic(value: &GeodeticPosition, projection: &GaussKruger) -> Result<PlanePosition, Error> {
        projection.forward(value.latitude, value.longitude)
    }

    /// Converts back to a geodetic position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convergence`] if the footpoint latitude can't be
    /// solved, which only happens for degenerate input.
    ///
    /// # Usage
    ///
    /// ```
    /// use gausskruger::{GaussKruger, PlanePosition};
    ///
    /// let projection = GaussKruger::default();
    /// let coord = PlanePosition::create(19, 739_655.201_641, 2_564_222.174_656).unwrap();
    ///
    /// let converted = coord.to_geodetic(&projection).unwrap();
    ///
    /// assert!((converted.latitude() - 23.16036069).abs() < 1e-7);
    /// assert!((converted.longitude() - 113.33990695).abs() < 1e-7);
    /// ```
    pub fn to_geodetic(&self, projection: &GaussKruger) -> Result<GeodeticPosition, Error> {
        projection.inverse(self)
    }
}

/// Zone number of a longitude in degrees, `floor(lon / 6) + 1`. Boundaries
/// belong to the zone east of them.
///
/// ```
/// use gausskruger::zone_of;
///
/// assert_eq!(zone_of(113.33990695), 19);
/// assert_eq!(zone_of(114.0), 20);
/// assert_eq!(zone_of(-0.5), 0);
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn zone_of(lon: f64) -> i32 {
    // floor(floor(x) / 6) == floor(x / 6)
    Integer::div_floor(&(lon.floor() as i32), &ZONE_WIDTH) + 1
}

/// Longitude of a zone's central meridian in degrees.
pub fn central_meridian(zone: i32) -> f64 {
    f64::from(ZONE_WIDTH) * f64::from(zone) - f64::from(ZONE_WIDTH) / 2.
}

impl ParseCoord for PlanePosition {
    /// Reads `"zone easting northing"`.
    fn parse_coord(value: &str) -> Result<Self, Error> {
        let pieces = value.split_whitespace().collect::<Vec<_>>();
        let &[zone, easting, northing] = pieces.as_slice() else {
            return Err(Error::InvalidCoord(format!("Expected \"zone easting northing\", got {value:?}")));
        };

        let zone = zone
            .parse::<i32>()
            .map_err(|_| Error::InvalidCoord(format!("Zone {zone:?} is not an integer")))?;
        let parse = |text: &str| {
            text.parse::<f64>()
                .map_err(|_| Error::InvalidCoord(format!("{text:?} in {value:?} is not a number")))
        };

        PlanePosition::create(zone, parse(easting)?, parse(northing)?)
    }
}

impl std::fmt::Display for PlanePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let easting = buf.format(self.easting);
        let mut buf = ryu::Buffer::new();
        let northing = buf.format(self.northing);
        write!(
            f,
            "{} {easting} {northing}",
            self.zone,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_encoding_is_textual() {
        let coord = PlanePosition::new(19, 739_655.201_641_244, 2_564_222.174_656_36);
        assert_eq!(coord.legacy_easting().unwrap(), 19_739_655.201_641_244);

        // A zero-padded easting loses its padding
        let coord = PlanePosition::new(3, 12_345.5, 0.);
        assert_eq!(coord.legacy_easting().unwrap(), 312_345.5);

        let coord = PlanePosition::new(3, -12.5, 0.);
        assert!(matches!(coord.legacy_easting(), Err(Error::Parse(_))));
    }

    #[test]
    fn legacy_round_trip() {
        let coord = PlanePosition::new(20, 441_271.016_384_017, 8_875_487.922_905_397);
        let decoded = PlanePosition::from_legacy(coord.legacy_easting().unwrap(), coord.northing()).unwrap();

        assert_eq!(decoded.zone(), 20);
        assert!((decoded.easting() - coord.easting()).abs() < 1e-6);
        assert_eq!(decoded.northing(), coord.northing());
    }

    #[test]
    fn legacy_rejects_non_finite() {
        assert!(PlanePosition::from_legacy(f64::NAN, 0.).is_err());
        assert!(PlanePosition::from_legacy(19_500_000., f64::INFINITY).is_err());
    }

    #[test]
    fn legacy_round_trip_west_of_greenwich() {
        for zone in [-29, -16, -1, 0, 1, 31] {
            let coord = PlanePosition::new(zone, 403_511.251_9, 3_320_534.436_5);
            let decoded = PlanePosition::from_legacy(coord.legacy_easting().unwrap(), coord.northing()).unwrap();

            assert_eq!(decoded.zone(), zone);
            assert!((decoded.easting() - coord.easting()).abs() < 1e-6, "zone {zone}");
        }
    }

    #[test]
    fn legacy_rejects_unknown_zones() {
        assert!(matches!(PlanePosition::from_legacy(1e15, 0.), Err(Error::InvalidCoord(_))));
        assert!(matches!(PlanePosition::from_legacy(-1e15, 0.), Err(Error::InvalidCoord(_))));
        assert!(matches!(PlanePosition::from_legacy(32_500_000., 0.), Err(Error::InvalidCoord(_))));
        assert!(matches!(PlanePosition::from_legacy(-30_500_000., 0.), Err(Error::InvalidCoord(_))));
        assert!(PlanePosition::from_legacy(31_500_000., 0.).is_ok());
        assert!(PlanePosition::from_legacy(-29_500_000., 0.).is_ok());
    }

    #[test]
    fn central_meridian_of_any_zone() {
        assert_eq!(central_meridian(i32::MAX), 6. * f64::from(i32::MAX) - 3.);
        assert_eq!(central_meridian(i32::MIN), 6. * f64::from(i32::MIN) - 3.);
        assert_eq!(central_meridian(-16), -99.);
    }

    #[test]
    fn zones_cover_every_longitude() {
        for tenth in -1800..1800 {
            let lon = f64::from(tenth) / 10.;
            let zone = zone_of(lon);
            let lon0 = central_meridian(zone);

            assert!(f64::from(6 * zone - 6) <= lon && lon < f64::from(6 * zone), "lon={lon} zone={zone}");
            assert!((lon - lon0).abs() <= 3., "lon={lon} lon0={lon0}");
        }

        assert_eq!(zone_of(-180.), -29);
        assert_eq!(zone_of(180.), 31);
        assert_eq!(zone_of(108.), 19);
        assert_eq!(zone_of(107.999_999), 18);
    }

    #[test]
    fn parse_and_display() {
        let coord: PlanePosition = crate::from_str("19 739655.2016 2564222.1747").unwrap();

        assert_eq!(coord, PlanePosition::new(19, 739_655.2016, 2_564_222.1747));
        assert_eq!(coord.to_string(), "19 739655.2016 2564222.1747");

        assert!(crate::from_str::<_, PlanePosition>("19 739655.2016").is_err());
        assert!(crate::from_str::<_, PlanePosition>("19.5 739655.2016 2564222.1747").is_err());
    }
}
