#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use urania::birth::{BirthRecord, LocationError, LocationResolver, ResolvedLocation};
use urania::ephemeris::{Angles, BodyPosition, FixedEphemeris, GeoLocation, HousePositions, HouseSystem};
use urania::Point;

pub fn body(point: Point, lon: f64, speed_lon: f64) -> BodyPosition {
    BodyPosition {
        point,
        lon,
        lat: 0.0,
        speed_lon,
    }
}

/// Sun, Mercury, Venus and Uranus share tropical Sagittarius but fall into
/// three different constellations. Sun, Moon and Mars form a grand trine
/// with Neptune as the kite's tail. The South Node is left for derivation.
pub fn sample_positions() -> Vec<BodyPosition> {
    vec![
        body(Point::Sun, 250.0, 1.0),
        body(Point::Moon, 130.0, 13.2),
        body(Point::Mercury, 245.0, 1.2),
        body(Point::Venus, 252.0, 1.1),
        body(Point::Mars, 10.0, 0.6),
        body(Point::Jupiter, 55.0, -0.1),
        body(Point::Saturn, 200.0, 0.08),
        body(Point::Uranus, 268.0, 0.05),
        body(Point::Neptune, 310.0, 0.03),
        body(Point::Pluto, 220.0, 0.02),
        body(Point::NorthNode, 100.0, -0.05),
        body(Point::Chiron, 80.0, 0.01),
    ]
}

pub const SAMPLE_CUSPS: [f64; 12] = [
    200.0, 228.0, 258.0, 290.0, 322.0, 352.0, 20.0, 48.0, 78.0, 110.0, 142.0, 172.0,
];

pub fn sample_houses() -> HousePositions {
    HousePositions {
        system: HouseSystem::Placidus,
        cusps: SAMPLE_CUSPS,
        angles: Angles::from_asc_mc(200.0, 110.0),
    }
}

pub fn sample_ephemeris() -> FixedEphemeris {
    FixedEphemeris::new(sample_positions(), Some(sample_houses()))
}

pub fn timed_record() -> BirthRecord {
    BirthRecord::new(
        "Sample",
        NaiveDate::from_ymd_opt(1987, 11, 29).unwrap(),
        NaiveTime::from_hms_opt(14, 30, 0),
        "London",
        true,
    )
}

pub fn untimed_record() -> BirthRecord {
    BirthRecord::new(
        "Sample",
        NaiveDate::from_ymd_opt(1987, 11, 29).unwrap(),
        None,
        "London",
        false,
    )
}

/// Resolves every query to the same place.
pub struct FixedResolver(pub ResolvedLocation);

impl FixedResolver {
    pub fn new(lat: f64, lon: f64, utc_offset_minutes: i32) -> Self {
        Self(ResolvedLocation {
            label: "Fixed".to_string(),
            location: GeoLocation { lat, lon },
            timezone: "Fixed".to_string(),
            utc_offset_minutes,
        })
    }
}

impl LocationResolver for FixedResolver {
    fn resolve(&self, _query: &str) -> Result<ResolvedLocation, LocationError> {
        Ok(self.0.clone())
    }
}

/// Always fails, as an offline geocoder would.
pub struct UnreachableResolver;

impl LocationResolver for UnreachableResolver {
    fn resolve(&self, _query: &str) -> Result<ResolvedLocation, LocationError> {
        Err(LocationError::Unavailable {
            message: "geocoder offline".to_string(),
        })
    }
}
