//! Great-circle geometry over WGS84 latitude/longitude pairs.

use serde::{Deserialize, Serialize};

use crate::error::SitingError;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, SitingError> {
        let coordinates = Self {
            latitude,
            longitude,
        };
        coordinates.validate()?;
        Ok(coordinates)
    }

    /// Range check; out-of-range values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), SitingError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(SitingError::invalid(
                "latitude",
                format!("{} outside [-90, 90]", self.latitude),
            ));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(SitingError::invalid(
                "longitude",
                format!("{} outside [-180, 180]", self.longitude),
            ));
        }
        Ok(())
    }

    /// Shift by degree deltas. The result is validated, so a shift past a pole or the
    /// antimeridian is an error.
    pub fn offset(&self, delta_lat: f64, delta_lng: f64) -> Result<Self, SitingError> {
        Self::new(self.latitude + delta_lat, self.longitude + delta_lng)
    }
}

/// Haversine distance in meters.
pub fn distance_meters(a: Coordinates, b: Coordinates) -> Result<f64, SitingError> {
    a.validate()?;
    b.validate()?;

    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().min(1.0).asin();

    Ok(EARTH_RADIUS_M * c)
}

pub fn distance_km(a: Coordinates, b: Coordinates) -> Result<f64, SitingError> {
    distance_meters(a, b).map(|meters| meters / 1000.0)
}

/// Arithmetic mean of the coordinates. Adequate for parcels a few hundred meters apart.
pub fn midpoint(points: &[Coordinates]) -> Option<Coordinates> {
    if points.is_empty() {
        return None;
    }
    let count = points.len() as f64;
    let latitude = points.iter().map(|point| point.latitude).sum::<f64>() / count;
    let longitude = points.iter().map(|point| point.longitude).sum::<f64>() / count;
    Some(Coordinates {
        latitude,
        longitude,
    })
}
