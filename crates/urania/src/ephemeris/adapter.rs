use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{Angles, BodyPosition, GeoLocation, HousePositions, HouseSystem};
use crate::points::Point;
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::env;
use std::path::PathBuf;
use swisseph::swe::{calc_ut, houses_ex, julday, set_ephe_path};

// Swiss Ephemeris body codes. The South Node is derived from the true node.
const BODY_CODES: &[(Point, i32)] = &[
    (Point::Sun, 0),
    (Point::Moon, 1),
    (Point::Mercury, 2),
    (Point::Venus, 3),
    (Point::Mars, 4),
    (Point::Jupiter, 5),
    (Point::Saturn, 6),
    (Point::Uranus, 7),
    (Point::Neptune, 8),
    (Point::Pluto, 9),
    (Point::NorthNode, 11), // TRUE_NODE
    (Point::Chiron, 15),
];

// FLG_SWIEPH | FLG_SPEED
const CALC_FLAGS: i32 = 2 | 256;

/// Ephemeris provider backed by the Swiss Ephemeris data files.
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Point the Swiss Ephemeris library at `ephemeris_path`, falling back
    /// to `SWISS_EPHEMERIS_PATH` and then `/usr/local/share/swisseph`.
    ///
    /// The library keeps the data path as process-wide state, so the last
    /// adapter created decides which files every adapter reads.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.is_dir() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Swiss Ephemeris data directory not found".to_string(),
            });
        }
        set_ephe_path(&path.to_string_lossy());

        Ok(Self {
            ephemeris_path: path,
        })
    }

    /// Directory handed to the library.
    pub fn ephemeris_path(&self) -> &PathBuf {
        &self.ephemeris_path
    }

    fn calc_body(
        &self,
        point: Point,
        code: i32,
        jd: f64,
        instant: DateTime<Utc>,
    ) -> Result<BodyPosition, EphemerisError> {
        let result = calc_ut(jd, code as u32, CALC_FLAGS as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                point_id: point.id().to_string(),
                datetime: instant,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        Ok(BodyPosition {
            point,
            lon: out[0] % 360.0,
            lat: out[1],
            speed_lon: out[3],
        })
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn positions(&self, instant: DateTime<Utc>) -> Result<Vec<BodyPosition>, EphemerisError> {
        let jd = datetime_to_julian_day(instant);
        BODY_CODES
            .iter()
            .map(|(point, code)| self.calc_body(*point, *code, jd, instant))
            .collect()
    }

    fn houses(
        &self,
        instant: DateTime<Utc>,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HousePositions, EphemerisError> {
        use swisseph::{AscMc, Cusp};

        let jd = datetime_to_julian_day(instant);
        let (c, a) = houses_ex(jd, CALC_FLAGS, location.lat, location.lon, system.code() as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if cusp_values.iter().any(|c| !c.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("{} cusps undefined at latitude {}", system, location.lat),
            });
        }

        Ok(HousePositions {
            system,
            cusps: cusp_values.map(|c| c % 360.0),
            angles: Angles::from_asc_mc(ascmc.ascendant, ascmc.mc),
        })
    }
}

/// Convert UTC datetime to Julian Day
fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour_decimal =
        dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0;
    // GREG_CAL = 1
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, 1)
}
