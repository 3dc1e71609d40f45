use crate::ephemeris::types::{BodyPosition, GeoLocation, HousePositions, HouseSystem, PositionSet};
use crate::points::{Point, BODIES};
use crate::zodiac::normalize_degrees;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while obtaining ephemeris data. All of them abort
/// the chart computation.
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Ephemeris provider unavailable: {message}")]
    Unavailable { message: String },
    #[error("Ephemeris provider returned no position for {}", .point.id())]
    MissingPoint { point: Point },
    #[error("Ephemeris provider returned a non-finite {field} for {}: {value}", .point.id())]
    InvalidValue {
        point: Point,
        field: &'static str,
        value: f64,
    },
    #[error("Failed to calculate position for {point_id} at {datetime}: {message}")]
    CalculationFailed {
        point_id: String,
        datetime: DateTime<Utc>,
        message: String,
    },
    #[error("House system {requested} requested but provider holds {available}")]
    HouseSystemMismatch {
        requested: HouseSystem,
        available: HouseSystem,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("Invalid house cusps: {message}")]
    InvalidCusps { message: String },
    #[error("Failed to read ephemeris snapshot: {0}")]
    Snapshot(String),
}

/// Source of raw astronomical data. Implementations are injected into the
/// chart calculator per computation.
pub trait EphemerisProvider {
    /// Longitude, latitude and speed of every tracked body at `instant`.
    fn positions(&self, instant: DateTime<Utc>) -> Result<Vec<BodyPosition>, EphemerisError>;

    /// House cusps and angles; only called when the birth time is known.
    fn houses(
        &self,
        instant: DateTime<Utc>,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HousePositions, EphemerisError>;
}

/// Check a raw provider response and turn it into a complete [`PositionSet`].
///
/// The South Node is derived from the North Node when the provider omits it.
/// Angles in the response are ignored; they come from the house call.
pub fn validate_positions(raw: Vec<BodyPosition>) -> Result<PositionSet, EphemerisError> {
    let mut bodies: BTreeMap<Point, BodyPosition> = BTreeMap::new();
    for body in raw {
        if body.point.is_angle() {
            log::debug!("Ignoring angle {} in position response", body.point.id());
            continue;
        }
        for (field, value) in [("longitude", body.lon), ("latitude", body.lat), ("speed", body.speed_lon)] {
            if !value.is_finite() {
                return Err(EphemerisError::InvalidValue {
                    point: body.point,
                    field,
                    value,
                });
            }
        }
        if bodies.contains_key(&body.point) {
            log::warn!("Duplicate position for {}; keeping the first", body.point.id());
            continue;
        }
        bodies.insert(
            body.point,
            BodyPosition {
                lon: normalize_degrees(body.lon),
                ..body
            },
        );
    }

    if !bodies.contains_key(&Point::SouthNode) {
        if let Some(north) = bodies.get(&Point::NorthNode).copied() {
            bodies.insert(
                Point::SouthNode,
                BodyPosition {
                    point: Point::SouthNode,
                    lon: normalize_degrees(north.lon + 180.0),
                    lat: -north.lat,
                    speed_lon: north.speed_lon,
                },
            );
        }
    }

    if let Some(missing) = BODIES.iter().find(|p| !bodies.contains_key(p)) {
        return Err(EphemerisError::MissingPoint { point: *missing });
    }

    Ok(PositionSet { bodies })
}

/// Check that 12 cusps are finite and walk the circle exactly once.
pub fn validate_houses(houses: &HousePositions) -> Result<(), EphemerisError> {
    let angle_values = [houses.angles.asc, houses.angles.mc, houses.angles.dc, houses.angles.ic];
    if let Some(bad) = houses.cusps.iter().chain(angle_values.iter()).find(|v| !v.is_finite()) {
        return Err(EphemerisError::InvalidCusps {
            message: format!("non-finite value {}", bad),
        });
    }
    let total: f64 = (0..12)
        .map(|i| (houses.cusps[(i + 1) % 12] - houses.cusps[i]).rem_euclid(360.0))
        .sum();
    if (total - 360.0).abs() > 1e-6 {
        return Err(EphemerisError::InvalidCusps {
            message: format!("cusp arcs cover {:.6} degrees instead of 360", total),
        });
    }
    Ok(())
}

/// A recorded provider response, replayed for any instant.
///
/// Used for fixtures and for replaying responses captured from a live
/// ephemeris.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedEphemeris {
    pub positions: Vec<BodyPosition>,
    #[serde(default)]
    pub houses: Option<HousePositions>,
}

impl FixedEphemeris {
    pub fn new(positions: Vec<BodyPosition>, houses: Option<HousePositions>) -> Self {
        Self { positions, houses }
    }

    pub fn from_json(json: &str) -> Result<Self, EphemerisError> {
        serde_json::from_str(json).map_err(|e| EphemerisError::Snapshot(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, EphemerisError> {
        let text = fs::read_to_string(path).map_err(|e| EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&text)
    }
}

impl EphemerisProvider for FixedEphemeris {
    fn positions(&self, _instant: DateTime<Utc>) -> Result<Vec<BodyPosition>, EphemerisError> {
        Ok(self.positions.clone())
    }

    fn houses(
        &self,
        _instant: DateTime<Utc>,
        _location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HousePositions, EphemerisError> {
        let houses = self.houses.as_ref().ok_or_else(|| EphemerisError::Unavailable {
            message: "snapshot holds no house data".to_string(),
        })?;
        if houses.system != system {
            return Err(EphemerisError::HouseSystemMismatch {
                requested: system,
                available: houses.system,
            });
        }
        Ok(houses.clone())
    }
}
