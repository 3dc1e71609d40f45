//! Projection of raw ecliptic longitudes onto a sign table.

use crate::ephemeris::{Angles, BodyPosition, PositionSet};
use crate::points::{Point, ANGLES};
use crate::zodiac::decans::{decan_for, Decan};
use crate::zodiac::tables::{normalize_degrees, sign_table, Sign, ZodiacSystem};
use serde::Serialize;

/// Sign, degree and progress of a longitude within one table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignPosition {
    pub sign: Sign,
    pub sign_index: usize,
    /// Degrees from the start of the sign
    pub degree: f64,
    /// Progress through the sign in percent of that sign's own width
    pub percent: f64,
}

/// A point projected through one sign table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointPlacement {
    pub point: Point,
    pub longitude: f64,
    pub latitude: f64,
    pub speed: f64,
    pub retrograde: bool,
    pub sign: Sign,
    pub sign_index: usize,
    pub degree: f64,
    pub percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decan: Option<Decan>,
}

/// Placements of every projected point under one table, in point order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemPlacements {
    pub system: ZodiacSystem,
    pub placements: Vec<PointPlacement>,
}

impl SystemPlacements {
    pub fn get(&self, point: Point) -> Option<&PointPlacement> {
        self.placements.iter().find(|p| p.point == point)
    }
}

/// Project a longitude onto the given table.
pub fn project_longitude(system: ZodiacSystem, longitude: f64) -> SignPosition {
    let lon = normalize_degrees(longitude);
    let table = sign_table(system);
    let (sign_index, def) = table.locate(lon);
    let degree = match system {
        ZodiacSystem::Tropical => lon - sign_index as f64 * 30.0,
        ZodiacSystem::Constellational => def.offset(lon),
    };
    SignPosition {
        sign: def.sign,
        sign_index,
        degree,
        percent: degree / def.width() * 100.0,
    }
}

/// Retrograde iff the speed is negative beyond the stationary threshold.
pub fn is_retrograde(speed: f64, stationary_threshold: f64) -> bool {
    speed < -stationary_threshold.abs()
}

/// Stateless projector carrying the configured stationary threshold.
#[derive(Debug, Clone, Copy)]
pub struct ZodiacProjector {
    stationary_threshold: f64,
}

impl ZodiacProjector {
    pub fn new(stationary_threshold: f64) -> Self {
        Self {
            stationary_threshold: stationary_threshold.abs(),
        }
    }

    pub fn project(
        &self,
        system: ZodiacSystem,
        point: Point,
        longitude: f64,
        latitude: f64,
        speed: f64,
    ) -> PointPlacement {
        let lon = normalize_degrees(longitude);
        let pos = project_longitude(system, lon);
        let decan = match system {
            ZodiacSystem::Tropical => decan_for(pos.sign, pos.degree),
            ZodiacSystem::Constellational => None,
        };
        PointPlacement {
            point,
            longitude: lon,
            latitude,
            speed,
            retrograde: is_retrograde(speed, self.stationary_threshold),
            sign: pos.sign,
            sign_index: pos.sign_index,
            degree: pos.degree,
            percent: pos.percent,
            decan,
        }
    }

    pub fn project_body(&self, system: ZodiacSystem, body: &BodyPosition) -> PointPlacement {
        self.project(system, body.point, body.lon, body.lat, body.speed_lon)
    }

    /// Project every body of the set, in point order.
    pub fn project_bodies(&self, system: ZodiacSystem, positions: &PositionSet) -> SystemPlacements {
        SystemPlacements {
            system,
            placements: positions
                .iter()
                .map(|body| self.project_body(system, body))
                .collect(),
        }
    }

    /// Project the four chart angles; angles never move, so speed is zero.
    pub fn project_angles(&self, system: ZodiacSystem, angles: &Angles) -> Vec<PointPlacement> {
        ANGLES
            .iter()
            .filter_map(|point| {
                angles
                    .get(*point)
                    .map(|lon| self.project(system, *point, lon, 0.0, 0.0))
            })
            .collect()
    }
}
