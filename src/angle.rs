//! Angle encodings used around the projection: spaced `"D M S"` text and the
//! packed `D.MMSSssss` decimal, where the integer part holds whole degrees and
//! the fractional digits hold two digits of minutes, two digits of whole
//! seconds, then the fraction of a second.
//!
//! A packed value is **not** decimal degrees: `23.1636` is 23°16'36", or
//! about `23.2767` degrees.

use std::{f64::consts::PI, fmt::Display, str::FromStr};

use crate::{constants::PACKED_EPS, utility::dms, Error, ThisOrThat};

/// Parses space separated degrees, minutes and seconds into radians.
///
/// A leading minus sign on the degrees negates the whole angle.
///
/// # Errors
///
/// Returns [`Error::Parse`] unless there are exactly three numeric components.
///
/// # Usage
///
/// ```
/// use gausskruger::spaced_dms_to_radians;
///
/// let rad = spaced_dms_to_radians("23 16 36").unwrap();
/// assert!((rad.to_degrees() - 23.276_666_666).abs() < 1e-9);
///
/// assert!(spaced_dms_to_radians("23 16").is_err());
/// assert!(spaced_dms_to_radians("23 16 abc").is_err());
/// ```
pub fn spaced_dms_to_radians(text: &str) -> Result<f64, Error> {
    let tokens = text.split_whitespace().collect::<Vec<_>>();
    let &[deg, min, sec] = tokens.as_slice() else {
        return Err(Error::Parse(format!("Expected \"D M S\", got {text:?}")));
    };

    let parse = |token: &str| {
        token
            .parse::<f64>()
            .map_err(|_| Error::Parse(format!("{token:?} in {text:?} is not a number")))
    };

    let magnitude = parse(deg)?.abs() + parse(min)? / dms::DM + parse(sec)? / dms::DS;
    let sign = deg.starts_with('-').ternary(-1., 1.);

    Ok(sign * (magnitude / 180. * PI))
}

/// Converts a signed angle in radians to its packed `D.MMSSssss` value.
///
/// ```
/// use gausskruger::radians_to_packed_decimal;
///
/// let packed = radians_to_packed_decimal(23.276_666_666_666_667_f64.to_radians());
/// assert!((packed - 23.1636).abs() < 1e-4);
/// ```
pub fn radians_to_packed_decimal(radians: f64) -> f64 {
    PackedAngle::from_radians(radians).value()
}

/// Reads a packed `D.MMSSssss` value and returns decimal degrees.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the value is not finite or its shortest
/// decimal form has fewer than two fractional digits. Trailing zeros don't
/// survive in a float, so `23.1` (23°10') is rejected; use
/// [`PackedAngle::to_decimal_degrees`] when the angle is already decoded.
///
/// # Usage
///
/// ```
/// use gausskruger::packed_decimal_to_decimal_degrees;
///
/// let deg = packed_decimal_to_decimal_degrees(23.1636).unwrap();
/// assert!((deg - 23.276_666_666).abs() < 1e-9);
///
/// assert!(packed_decimal_to_decimal_degrees(23.0).is_err());
/// ```
pub fn packed_decimal_to_decimal_degrees(value: f64) -> Result<f64, Error> {
    if !value.is_finite() {
        return Err(Error::Parse(format!("Packed angle {value} is not finite")));
    }

    value
        .to_string()
        .parse::<PackedAngle>()
        .map(|angle| angle.to_decimal_degrees())
}

/// Degrees, minutes and seconds of an angle as split for the packed
/// `D.MMSSssss` representation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackedAngle {
    pub(crate) negative: bool,
    pub(crate) degrees: u32,
    pub(crate) minutes: u32,
    pub(crate) seconds: f64,
}

impl PackedAngle {
    /// Splits the magnitude of `radians` into whole degrees, whole minutes
    /// and seconds. Degrees and minutes get a `1e-4` nudge before truncation
    /// so that e.g. 59.9999999" carries into the next minute; the seconds left
    /// over after such a carry are clamped to zero.
    ///
    /// ```
    /// use gausskruger::PackedAngle;
    ///
    /// let angle = PackedAngle::from_radians(-(23.0_f64 + 16. / 60. + 36. / 3600.).to_radians());
    /// assert!(angle.is_negative());
    /// assert_eq!(angle.degrees(), 23);
    /// assert_eq!(angle.minutes(), 16);
    /// assert!((angle.seconds() - 36.).abs() < 1e-6);
    /// ```
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_radians(radians: f64) -> PackedAngle {
        let negative = radians < 0.;
        let total = radians.abs() * 180. / PI * dms::DS;

        let degrees = (total / dms::DS + PACKED_EPS).trunc();
        let minutes = ((total - degrees * dms::DS) / dms::MS + PACKED_EPS).trunc();
        let mut seconds = total - degrees * dms::DS - minutes * dms::MS;
        if seconds < 0. {
            seconds = 0.;
        }

        Self {
            negative,
            degrees: degrees as u32,
            minutes: minutes as u32,
            seconds,
        }
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub fn degrees(&self) -> u32 {
        self.degrees
    }

    #[inline]
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    #[inline]
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    fn sign(&self) -> f64 {
        self.negative.ternary(-1., 1.)
    }

    /// The packed `D.MMSSssss` value.
    pub fn value(&self) -> f64 {
        self.sign() * (f64::from(self.degrees) + f64::from(self.minutes) / 100. + self.seconds / 10_000.)
    }

    /// The angle in decimal degrees.
    pub fn to_decimal_degrees(&self) -> f64 {
        self.sign() * (f64::from(self.degrees) + f64::from(self.minutes) / dms::DM + self.seconds / dms::DS)
    }
}

impl FromStr for PackedAngle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (deg, frac) = body
            .split_once('.')
            .ok_or_else(|| Error::Parse(format!("Packed angle {s:?} has no fractional part")))?;

        if frac.len() < 2 {
            return Err(Error::Parse(format!("Packed angle {s:?} needs at least two minute digits")));
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Parse(format!("Encountered a non-digit in {s:?}")));
        }

        let degrees = deg
            .parse::<u32>()
            .map_err(|_| Error::Parse(format!("Degrees {deg:?} of {s:?} are not a whole number")))?;

        let (min, sec) = frac.split_at(2);
        let (whole, rest) = sec.split_at(sec.len().min(2));
        let seconds = match (whole, rest) {
            ("", _) => Ok(0.),
            (whole, "") => whole.parse::<f64>(),
            (whole, rest) => format!("{whole}.{rest}").parse::<f64>(),
        }
        .map_err(|_| Error::Parse(format!("Seconds of {s:?} are not a number")))?;

        Ok(Self {
            negative,
            degrees,
            // Two ASCII digits always parse
            minutes: min.parse().unwrap_or_default(),
            seconds,
        })
    }
}

impl Display for PackedAngle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        write!(f, "{}", buf.format(self.value()))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn spaced_dms() {
        let rad = spaced_dms_to_radians("113 20 23.665").unwrap();
        assert_abs_diff_eq!(rad.to_degrees(), 113. + 20. / 60. + 23.665 / 3600., epsilon = 1e-12);

        let rad = spaced_dms_to_radians("  -23   16 36 ").unwrap();
        assert_abs_diff_eq!(rad.to_degrees(), -(23. + 16. / 60. + 36. / 3600.), epsilon = 1e-12);

        assert_eq!(spaced_dms_to_radians("0 0 0").unwrap(), 0.);
    }

    #[test]
    fn spaced_dms_rejects_malformed() {
        assert!(matches!(spaced_dms_to_radians(""), Err(Error::Parse(_))));
        assert!(matches!(spaced_dms_to_radians("23 16 36 1"), Err(Error::Parse(_))));
        assert!(matches!(spaced_dms_to_radians("23° 16' 36\""), Err(Error::Parse(_))));
    }

    #[test]
    fn packed_round_trip() {
        let deg = packed_decimal_to_decimal_degrees(23.1636).unwrap();
        assert_abs_diff_eq!(deg, 23.276_666_666_666_667, epsilon = 1e-12);

        let packed = radians_to_packed_decimal(deg.to_radians());
        assert_abs_diff_eq!(packed, 23.1636, epsilon = 1e-4);
    }

    #[test]
    fn fractional_seconds() {
        let angle = "23.093729848400002".parse::<PackedAngle>().unwrap();

        assert_eq!(angle.degrees(), 23);
        assert_eq!(angle.minutes(), 9);
        assert_abs_diff_eq!(angle.seconds(), 37.298_484_000_02, epsilon = 1e-9);
        assert_abs_diff_eq!(angle.to_decimal_degrees(), 23.160_360_69, epsilon = 1e-9);
    }

    #[test]
    fn short_seconds() {
        // One seconds digit is read as whole seconds
        let angle = "12.345".parse::<PackedAngle>().unwrap();
        assert_eq!(angle.minutes(), 34);
        assert_eq!(angle.seconds(), 5.);

        let angle = "12.34".parse::<PackedAngle>().unwrap();
        assert_eq!(angle.seconds(), 0.);
    }

    #[test]
    fn packed_needs_two_minute_digits() {
        assert!(matches!("45.3".parse::<PackedAngle>(), Err(Error::Parse(_))));
        assert!(matches!("45".parse::<PackedAngle>(), Err(Error::Parse(_))));
        assert!(matches!("45.3a12".parse::<PackedAngle>(), Err(Error::Parse(_))));
        assert!(matches!(".3012".parse::<PackedAngle>(), Err(Error::Parse(_))));
        assert!(packed_decimal_to_decimal_degrees(45.3).is_err());
        assert!(packed_decimal_to_decimal_degrees(f64::NAN).is_err());
    }

    #[test]
    fn sign_is_kept() {
        let rad = (45.0_f64 + 30. / 60.).to_radians();
        assert_eq!(radians_to_packed_decimal(-rad), -radians_to_packed_decimal(rad));

        let deg = packed_decimal_to_decimal_degrees(-23.1636).unwrap();
        assert_abs_diff_eq!(deg, -23.276_666_666_666_667, epsilon = 1e-12);
    }

    #[test]
    fn seconds_carry_into_next_degree() {
        let rad = (10.0_f64 + 59. / 60. + 59.999_99 / 3600.).to_radians();
        let angle = PackedAngle::from_radians(rad);

        assert_eq!(angle.degrees(), 11);
        assert_eq!(angle.minutes(), 0);
        assert_eq!(angle.seconds(), 0.);
        assert_eq!(angle.value(), 11.);
    }

    #[test]
    fn display_prints_packed_value() {
        let angle = "-0.3000".parse::<PackedAngle>().unwrap();
        assert!(angle.is_negative());
        assert_eq!(angle.to_string(), "-0.3");
    }
}
