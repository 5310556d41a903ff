//! Validators for free-form transit inputs.
//!
//! These run before anything reaches the upstream API. Identifier formats are
//! deliberately not checked: the upstream service is the source of truth for
//! which stop and trip ids exist.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Latitude range accepted by [`parse_coordinates`].
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Longitude range accepted by [`parse_coordinates`].
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Reasons a coordinate string can be rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("expected \"<latitude>,<longitude>\", got \"{0}\"")]
    Format(String),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Parse a `"<lat>,<lon>"` pair such as `"52.5200,13.4050"`.
///
/// Each component may carry a leading `-` and surrounding whitespace.
pub fn parse_coordinates(input: &str) -> Result<(f64, f64), CoordinateError> {
    let (lat, lon) = input
        .split_once(',')
        .ok_or_else(|| CoordinateError::Format(input.to_string()))?;

    let latitude = parse_component(lat)?;
    let longitude = parse_component(lon)?;

    if !(LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&latitude) {
        return Err(CoordinateError::LatitudeOutOfRange(latitude));
    }
    if !(LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&longitude) {
        return Err(CoordinateError::LongitudeOutOfRange(longitude));
    }

    Ok((latitude, longitude))
}

/// A position that already passed [`parse_coordinates`].
///
/// Deserializes from the `"<lat>,<lon>"` string form.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl TryFrom<String> for Coordinates {
    type Error = CoordinateError;

    fn try_from(input: String) -> Result<Self, Self::Error> {
        let (latitude, longitude) = parse_coordinates(&input)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Accept only plain decimal notation: optional `-`, digits, optional fraction.
///
/// `f64::from_str` alone would also take `inf`, `NaN`, `1e3` and a leading `+`.
fn parse_component(raw: &str) -> Result<f64, CoordinateError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    let well_formed = all_digits(int_part) && frac_part.is_none_or(all_digits);
    if !well_formed {
        return Err(CoordinateError::NotANumber(trimmed.to_string()));
    }

    trimmed
        .parse::<f64>()
        .map_err(|_| CoordinateError::NotANumber(trimmed.to_string()))
}

/// Check a stop or trip identifier before it is placed in a request path.
///
/// Rejects blank ids and the dot segments `.` and `..`, which a URL path
/// would collapse into a different endpoint.
pub fn validate_identifier(id: &str) -> Result<(), &'static str> {
    if id.trim().is_empty() {
        Err("must not be empty")
    } else if is_dot_segment(id) {
        Err("must not be '.' or '..'")
    } else {
        Ok(())
    }
}

/// `.` and `..` are path navigation, not names.
pub fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}
