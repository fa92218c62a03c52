use std::{collections::HashMap, fmt::Display, str::FromStr};

use lazy_static::lazy_static;

use crate::{constants::{CGCS2000_A, CGCS2000_F, WGS84_A, WGS84_F}, Error};

lazy_static! {
    // Add new named ellipsoids here, keyed by the name callers pass in.
    static ref ELLIPSOIDS: HashMap<&'static str, Ellipsoid> = [
        Ellipsoid::known("wgs84", WGS84_A, WGS84_F),
        Ellipsoid::known("CGCS2000", CGCS2000_A, CGCS2000_F),
    ]
    .into_iter()
    .map(|ell| (ell.name, ell))
    .collect();
}

/// Reference ellipsoid defined by its semi-major axis `a` (meters) and
/// flattening `f`. The semi-minor axis and both eccentricities are derived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    name: &'static str,
    a: f64,
    f: f64,
}

impl Ellipsoid {
    const fn known(name: &'static str, a: f64, f: f64) -> Ellipsoid {
        Self { name, a, f }
    }

    /// Looks up one of the supported ellipsoids: `"wgs84"` or `"CGCS2000"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEllipsoid`] for any other name.
    ///
    /// # Usage
    ///
    /// ```
    /// use gausskruger::Ellipsoid;
    ///
    /// let wgs84 = Ellipsoid::named("wgs84").unwrap();
    /// assert_eq!(wgs84.a(), 6_378_137.0);
    ///
    /// assert!(Ellipsoid::named("unknown").is_err());
    /// ```
    pub fn named(name: &str) -> Result<Ellipsoid, Error> {
        ELLIPSOIDS
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownEllipsoid(name.to_string()))
    }

    /// Builds an unnamed ellipsoid from its semi-major axis and flattening.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEllipsoid`] unless `a > 0` and `0 < f < 1`.
    pub fn new(a: f64, f: f64) -> Result<Ellipsoid, Error> {
        if !(a.is_finite() && a > 0.) {
            Err(Error::InvalidEllipsoid(format!("Semi-major axis {a} must be positive")))
        } else if !(f > 0. && f < 1.) {
            Err(Error::InvalidEllipsoid(format!("Flattening {f} outside of range (0, 1)")))
        } else {
            Ok(Self::known("", a, f))
        }
    }

    /// Name of the ellipsoid, empty for one built with [`Ellipsoid::new`].
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Semi-major axis in meters
    #[inline]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Flattening
    #[inline]
    pub fn f(&self) -> f64 {
        self.f
    }

    /// Semi-minor axis `b = a(1 - f)`
    #[inline]
    pub fn b(&self) -> f64 {
        self.a * (1. - self.f)
    }

    /// First eccentricity squared `e² = 2f - f²`
    #[inline]
    pub fn e2(&self) -> f64 {
        2. * self.f - self.f.powi(2)
    }

    /// Second eccentricity squared `e'² = (a² - b²) / b²`
    #[inline]
    pub fn ep2(&self) -> f64 {
        let b = self.b();
        (self.a.powi(2) - b.powi(2)) / b.powi(2)
    }

    /// Returns `(a, f, b, e2, e2')`.
    pub fn parameters(&self) -> (f64, f64, f64, f64, f64) {
        (self.a, self.f, self.b(), self.e2(), self.ep2())
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::known("wgs84", WGS84_A, WGS84_F)
    }
}

impl FromStr for Ellipsoid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::named(s)
    }
}

impl Display for Ellipsoid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name.is_empty() {
            let mut buf = ryu::Buffer::new();
            let a = buf.format(self.a);
            let mut buf = ryu::Buffer::new();
            let inv_f = buf.format(1. / self.f);
            write!(f, "a={a} 1/f={inv_f}")
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Returns `(a, f, b, e2, e2')` of a named ellipsoid.
///
/// # Errors
///
/// Returns [`Error::UnknownEllipsoid`] if `name` isn't `"wgs84"` or `"CGCS2000"`.
///
/// # Usage
///
/// ```
/// let (a, f, b, e2, ep2) = gausskruger::ellipsoid_parameters("wgs84").unwrap();
///
/// assert_eq!(a, 6_378_137.0);
/// assert_eq!(f, 1.0 / 298.257223563);
/// assert!(b < a);
/// assert!(ep2 > e2);
/// ```
pub fn ellipsoid_parameters(name: &str) -> Result<(f64, f64, f64, f64, f64), Error> {
    Ellipsoid::named(name).map(|ell| ell.parameters())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn wgs84_parameters() {
        let (a, f, b, e2, ep2) = ellipsoid_parameters("wgs84").unwrap();

        assert_eq!(a, 6_378_137.0);
        assert_eq!(f, 1.0 / 298.257_223_563);
        assert_relative_eq!(b, 6_356_752.314_245, epsilon = 1e-6);
        assert_relative_eq!(e2, 0.006_694_379_990_14, epsilon = 1e-14);
        assert_relative_eq!(ep2, 0.006_739_496_742_28, epsilon = 1e-14);
    }

    #[test]
    fn cgcs2000_differs_only_in_flattening() {
        let wgs84 = Ellipsoid::named("wgs84").unwrap();
        let cgcs = Ellipsoid::named("CGCS2000").unwrap();

        assert_eq!(wgs84.a(), cgcs.a());
        assert_eq!(cgcs.f(), 1.0 / 298.257_222_101);
        assert!((wgs84.b() - cgcs.b()).abs() < 1e-3);
        assert_eq!(cgcs.to_string(), "CGCS2000");
    }

    #[test]
    fn derived_values_are_consistent() {
        let ell = Ellipsoid::new(6_378_388.0, 1.0 / 297.0).unwrap();

        assert_eq!(ell.b(), ell.a() * (1. - ell.f()));
        assert_relative_eq!(ell.ep2(), ell.e2() / (1. - ell.e2()), epsilon = 1e-15);
        assert_eq!(ell.name(), "");
    }

    #[test]
    fn unknown_names_fail() {
        assert!(matches!(Ellipsoid::named("unknown"), Err(Error::UnknownEllipsoid(name)) if name == "unknown"));
        // Keys are exact
        assert!(Ellipsoid::named("WGS84").is_err());
        assert!("cgcs2000".parse::<Ellipsoid>().is_err());
    }

    #[test]
    fn invalid_parameters_fail() {
        assert!(Ellipsoid::new(-1.0, 0.003).is_err());
        assert!(Ellipsoid::new(6_378_137.0, 0.0).is_err());
        assert!(Ellipsoid::new(6_378_137.0, 1.0).is_err());
        assert!(Ellipsoid::new(f64::NAN, 0.003).is_err());
        assert!(Ellipsoid::new(6_378_137.0, f64::NAN).is_err());
    }

    #[test]
    fn default_is_wgs84() {
        assert_eq!(Ellipsoid::default(), Ellipsoid::named("wgs84").unwrap());
    }
}
