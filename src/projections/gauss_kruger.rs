use tracing::{debug, trace};

use crate::{
    constants::{FALSE_EASTING, FOOTPOINT_TOLERANCE, MAX_FOOTPOINT_ITERATIONS},
    ellipsoid::Ellipsoid,
    geodetic::GeodeticPosition,
    plane::{central_meridian, zone_of, PlanePosition},
    utility::integrate,
    Error,
};

// Absolute tolerance of the meridian arc quadrature, in meters
const ARC_TOLERANCE: f64 = 1e-9;

/// Gauss-Krüger projection in 6° zones on a given ellipsoid.
#[derive(Clone, Copy, Debug)]
pub struct GaussKruger {
    ellipsoid: Ellipsoid,
    // Meridian arc inversion coefficients a0, a2, a4, a6, a8
    arc: [f64; 5],
}

impl GaussKruger {
    pub fn new(ellipsoid: Ellipsoid) -> GaussKruger {
        let a = ellipsoid.a();
        let e2 = ellipsoid.e2();

        let m0 = a * (1. - e2);
        let m2 = 3. / 2. * e2 * m0;
        let m4 = 5. / 4. * e2 * m2;
        let m6 = 7. / 6. * e2 * m4;
        let m8 = 9. / 8. * e2 * m6;

        let arc = [
            m0 + m2 / 2. + 3. * m4 / 8. + 5. * m6 / 16. + 35. * m8 / 128.,
            m2 / 2. + m4 / 2. + 15. * m6 / 32. + 7. * m8 / 16.,
            m4 / 8. + 3. * m6 / 16. + 7. * m8 / 32.,
            m6 / 32. + m8 / 16.,
            m8 / 128.,
        ];

        Self { ellipsoid, arc }
    }

    /// Projection on one of the named ellipsoids, see [`Ellipsoid::named`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEllipsoid`] for an unsupported name.
    pub fn named(name: &str) -> Result<GaussKruger, Error> {
        Ellipsoid::named(name).map(Self::new)
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Length of the meridian from the equator to `lat` (radians), negative
    /// south of the equator.
    ///
    /// ```
    /// use gausskruger::GaussKruger;
    ///
    /// let projection = GaussKruger::default();
    ///
    /// assert_eq!(projection.meridian_arc(0.0), 0.0);
    /// assert!((projection.meridian_arc(std::f64::consts::FRAC_PI_2) - 10_001_965.729).abs() < 1e-3);
    /// ```
    pub fn meridian_arc(&self, lat: f64) -> f64 {
        let a = self.ellipsoid.a();
        let e2 = self.ellipsoid.e2();

        integrate(
            |phi| a * (1. - e2) / (1. - e2 * phi.sin().powi(2)).powf(1.5),
            0.,
            lat,
            ARC_TOLERANCE,
        )
    }

    /// Latitude (radians) whose meridian arc is `x`, solved by fixed-point
    /// iteration from `x / a0`. One more step is taken once successive values
    /// agree to 1e-4 arc seconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convergence`] if that doesn't happen within 50
    /// iterations, e.g. for a NaN northing.
    pub fn footpoint_latitude(&self, x: f64) -> Result<f64, Error> {
        self.footpoint_iterations(x).map(|(lat, _)| lat)
    }

    /// One fixed-point step of the footpoint latitude for northing `x`.
    fn footpoint_step(&self, x: f64, lat: f64) -> f64 {
        let [a0, a2, a4, a6, a8] = self.arc;

        (x + a2 / 2. * (2. * lat).sin()
            - a4 / 4. * (4. * lat).sin()
            + a6 / 6. * (6. * lat).sin()
            - a8 / 8. * (8. * lat).sin())
            / a0
    }

    /// Footpoint latitude along with the number of steps taken.
    pub(crate) fn footpoint_iterations(&self, x: f64) -> Result<(f64, usize), Error> {
        let mut lat = x / self.arc[0];
        let mut converged = false;

        for iteration in 1..=MAX_FOOTPOINT_ITERATIONS {
            let next = self.footpoint_step(x, lat);
            let delta = (next - lat).abs();
            lat = next;
            trace!(iteration, lat, delta, "footpoint step");

            if converged {
                return Ok((lat, iteration));
            }
            converged = delta < FOOTPOINT_TOLERANCE;
        }

        Err(Error::Convergence {
            iterations: MAX_FOOTPOINT_ITERATIONS,
            northing: x,
        })
    }

    /// Projects a latitude/longitude in decimal degrees into its zone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if latitude is outside [-90, 90] or
    /// longitude outside [-180, 180], NaN included.
    pub fn forward(&self, lat: f64, lon: f64) -> Result<PlanePosition, Error> {
        GeodeticPosition::create(lat, lon)?;

        let zone = zone_of(lon);
        debug!(lat, lon, zone, ellipsoid = %self.ellipsoid, "geodetic to plane");

        let l = (lon - central_meridian(zone)).to_radians();
        let lat = lat.to_radians();

        let ep2 = self.ellipsoid.ep2();
        let (sin, cos) = lat.sin_cos();
        let n = self.ellipsoid.a() / (1. - self.ellipsoid.e2() * sin.powi(2)).sqrt();
        let t = lat.tan();
        let t2 = t.powi(2);
        let t4 = t.powi(4);
        let niu2 = ep2 * cos.powi(2);

        let x = self.meridian_arc(lat)
            + n / 2. * sin * cos * l.powi(2)
            + n / 24. * sin * cos.powi(3) * (5. - t2 + 9. * niu2 + 4. * niu2.powi(2)) * l.powi(4)
            + n / 720. * sin * cos.powi(5) * (61. - 58. * t2 + t4) * l.powi(6);

        let y = n * cos * l
            + n / 6. * cos.powi(3) * (1. - t2 + niu2) * l.powi(3)
            + n / 120. * cos.powi(5) * (5. - 18. * t2 + t4 + 14. * niu2 - 58. * t2 * niu2) * l.powi(5);

        Ok(PlanePosition::new(zone, y + FALSE_EASTING, x))
    }

    /// Latitude and longitude difference from the central meridian, both in
    /// radians.
    pub(crate) fn inverse_radians(&self, value: &PlanePosition) -> Result<(f64, f64), Error> {
        let x = value.northing;
        let y = value.easting_offset();
        debug!(zone = value.zone, x, y, ellipsoid = %self.ellipsoid, "plane to geodetic");

        let lat = self.footpoint_latitude(x)?;

        let a = self.ellipsoid.a();
        let e2 = self.ellipsoid.e2();
        let (sin, cos) = lat.sin_cos();
        let w = 1. - e2 * sin.powi(2);
        let m = a * (1. - e2) / w.powf(1.5);
        let n = a / w.sqrt();
        let t = lat.tan();
        let t2 = t.powi(2);
        let t4 = t.powi(4);
        let niu2 = self.ellipsoid.ep2() * cos.powi(2);

        let lat = lat
            - t / (2. * m * n) * y.powi(2)
            + t / (24. * m * n.powi(3)) * (5. + 3. * t2 + niu2 - 9. * niu2 * t2) * y.powi(4)
            - t / (720. * m * n.powi(5)) * (61. + 90. * t2 + 45. * t4) * y.powi(6);

        let l = y / (n * cos)
            - y.powi(3) / (6. * n.powi(3) * cos) * (1. + 2. * t2 + niu2)
            + y.powi(5) / (120. * n.powi(5) * cos) * (5. + 28. * t2 + 6. * niu2 + 24. * t4 + 8. * t2 * niu2);

        Ok((lat, l))
    }

    /// Converts a plane coordinate back to decimal degrees.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convergence`] if the footpoint latitude can't be solved.
    pub fn inverse(&self, value: &PlanePosition) -> Result<GeodeticPosition, Error> {
        let (lat, l) = self.inverse_radians(value)?;

        Ok(GeodeticPosition::new(
            lat.to_degrees(),
            value.central_meridian() + l.to_degrees(),
        ))
    }
}

impl Default for GaussKruger {
    fn default() -> Self {
        Self::new(Ellipsoid::default())
    }
}
