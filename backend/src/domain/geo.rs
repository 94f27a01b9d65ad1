//! Geographic primitives: validated coordinates and great-circle distance.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Mean Earth radius in kilometres, as used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated WGS84 coordinate pair.
///
/// Latitude is constrained to [-90, 90] and longitude to [-180, 180];
/// construction fails outside those ranges, so any `Coordinates` value in
/// the system is usable without re-checking.
///
/// # Examples
/// ```
/// use backend::domain::Coordinates;
///
/// let delhi = Coordinates::new(28.6139, 77.2090).expect("in range");
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// assert_eq!(delhi.lat(), 28.6139);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "CoordinatesDto", into = "CoordinatesDto")]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

/// Range violations raised when constructing [`Coordinates`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinatesError {
    /// Latitude outside [-90, 90], or not a finite number.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude outside [-180, 180], or not a finite number.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl Coordinates {
    /// Construct a coordinate pair, validating both ranges.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinatesError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinatesError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinatesError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
struct CoordinatesDto {
    lat: f64,
    lng: f64,
}

impl From<Coordinates> for CoordinatesDto {
    fn from(value: Coordinates) -> Self {
        Self {
            lat: value.lat,
            lng: value.lng,
        }
    }
}

impl TryFrom<CoordinatesDto> for Coordinates {
    type Error = CoordinatesError;

    fn try_from(value: CoordinatesDto) -> Result<Self, Self::Error> {
        Coordinates::new(value.lat, value.lng)
    }
}

/// Great-circle distance between two points in kilometres (haversine).
///
/// The square-root argument is clamped to [0, 1]: for antipodal points the
/// floating-point sum can overshoot 1.0 and `asin` would return NaN.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_KM * c
}
