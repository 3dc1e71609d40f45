//! Birth records and their resolution into a UTC instant and coordinates.

use crate::ephemeris::GeoLocation;
use crate::settings::ChartConfig;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest UTC offset any real timezone uses.
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BirthDataError {
    #[error("Invalid date '{value}': expected YYYY-MM-DD ({message})")]
    InvalidDate { value: String, message: String },
    #[error("Invalid time '{value}': expected HH:MM or HH:MM:SS")]
    InvalidTime { value: String },
    #[error("Date {date} cannot be converted to a UTC instant")]
    OutOfRange { date: NaiveDate },
}

/// Soft failure of a [`LocationResolver`]; never aborts a chart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("Location not found: {query}")]
    NotFound { query: String },
    #[error("Location resolver unavailable: {message}")]
    Unavailable { message: String },
}

/// Raw, unvalidated birth data as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BirthInput {
    #[serde(default)]
    pub name: String,
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: String,
    /// Defaults to whether `time` was given.
    #[serde(default)]
    pub time_known: Option<bool>,
}

/// A validated birth record. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthRecord {
    name: String,
    date: NaiveDate,
    time: Option<NaiveTime>,
    location: String,
    time_known: bool,
}

impl BirthRecord {
    /// The time only counts as known when it is both flagged and present.
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        time: Option<NaiveTime>,
        location: impl Into<String>,
        time_known: bool,
    ) -> Self {
        Self {
            name: name.into(),
            date,
            time,
            location: location.into(),
            time_known: time_known && time.is_some(),
        }
    }

    pub fn parse(input: &BirthInput) -> Result<Self, BirthDataError> {
        let date_text = input.date.trim();
        let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT).map_err(|e| {
            BirthDataError::InvalidDate {
                value: input.date.clone(),
                message: e.to_string(),
            }
        })?;
        let time = match input.time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(parse_time(text)?),
        };
        Ok(Self::new(
            input.name.clone(),
            date,
            time,
            input.location.clone(),
            input.time_known.unwrap_or(true),
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn time_known(&self) -> bool {
        self.time_known
    }
}

fn parse_time(text: &str) -> Result<NaiveTime, BirthDataError> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
        .ok_or_else(|| BirthDataError::InvalidTime {
            value: text.to_string(),
        })
}

/// A place resolved to coordinates and a fixed UTC offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub label: String,
    #[serde(flatten)]
    pub location: GeoLocation,
    pub timezone: String,
    pub utc_offset_minutes: i32,
}

/// Turns free-text locations into coordinates. Injected per computation.
pub trait LocationResolver {
    fn resolve(&self, query: &str) -> Result<ResolvedLocation, LocationError>;
}

/// Everything downstream stages need to know about the birth moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedContext {
    /// UTC moment used for the ephemeris. Taken at the configured neutral
    /// time when the birth time is unknown.
    pub instant: DateTime<Utc>,
    pub local_date: NaiveDate,
    /// Local clock time; absent when the birth time is unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_time: Option<NaiveTime>,
    pub location: ResolvedLocation,
    pub time_known: bool,
    pub location_degraded: bool,
}

/// Resolve a birth record into a UTC instant and coordinates.
///
/// An unknown time becomes the configured neutral time. A failed or
/// implausible location resolution falls back to the configured location
/// and marks the context as degraded.
pub fn resolve_context(
    record: &BirthRecord,
    resolver: &dyn LocationResolver,
    config: &ChartConfig,
) -> Result<ResolvedContext, BirthDataError> {
    let (location, location_degraded) = match resolver.resolve(record.location()) {
        Ok(resolved) if resolved.utc_offset_minutes.abs() <= MAX_UTC_OFFSET_MINUTES => {
            (resolved, false)
        }
        Ok(resolved) => {
            log::warn!(
                "Location '{}' resolved with implausible UTC offset {} min; using fallback {}",
                record.location(),
                resolved.utc_offset_minutes,
                config.fallback_location.label
            );
            (config.fallback_location.clone(), true)
        }
        Err(e) => {
            log::warn!(
                "{}; using fallback location {}",
                e,
                config.fallback_location.label
            );
            (config.fallback_location.clone(), true)
        }
    };

    let local_time = record.time().filter(|_| record.time_known());
    let local = record
        .date()
        .and_time(local_time.unwrap_or(config.neutral_time));
    let utc = local
        .checked_sub_signed(Duration::minutes(i64::from(location.utc_offset_minutes)))
        .ok_or(BirthDataError::OutOfRange {
            date: record.date(),
        })?;

    log::debug!(
        "Resolved context: {} local {} at {} (time_known={}, degraded={})",
        record.date(),
        local.time(),
        location.label,
        record.time_known(),
        location_degraded
    );

    Ok(ResolvedContext {
        instant: DateTime::<Utc>::from_naive_utc_and_offset(utc, Utc),
        local_date: record.date(),
        local_time,
        location,
        time_known: record.time_known(),
        location_degraded,
    })
}

struct City {
    names: &'static [&'static str],
    lat: f64,
    lon: f64,
    timezone: &'static str,
    utc_offset_minutes: i32,
}

// Standard (non-daylight) offsets.
const CITIES: &[City] = &[
    City { names: &["london", "london, uk"], lat: 51.5074, lon: -0.1278, timezone: "Europe/London", utc_offset_minutes: 0 },
    City { names: &["greenwich"], lat: 51.4779, lon: 0.0, timezone: "Europe/London", utc_offset_minutes: 0 },
    City { names: &["paris", "paris, france"], lat: 48.8566, lon: 2.3522, timezone: "Europe/Paris", utc_offset_minutes: 60 },
    City { names: &["berlin", "berlin, germany"], lat: 52.5200, lon: 13.4050, timezone: "Europe/Berlin", utc_offset_minutes: 60 },
    City { names: &["madrid", "madrid, spain"], lat: 40.4168, lon: -3.7038, timezone: "Europe/Madrid", utc_offset_minutes: 60 },
    City { names: &["rome", "rome, italy"], lat: 41.9028, lon: 12.4964, timezone: "Europe/Rome", utc_offset_minutes: 60 },
    City { names: &["moscow", "moscow, russia"], lat: 55.7558, lon: 37.6173, timezone: "Europe/Moscow", utc_offset_minutes: 180 },
    City { names: &["new york", "new york, ny", "nyc"], lat: 40.7128, lon: -74.0060, timezone: "America/New_York", utc_offset_minutes: -300 },
    City { names: &["los angeles", "los angeles, ca"], lat: 34.0522, lon: -118.2437, timezone: "America/Los_Angeles", utc_offset_minutes: -480 },
    City { names: &["chicago", "chicago, il"], lat: 41.8781, lon: -87.6298, timezone: "America/Chicago", utc_offset_minutes: -360 },
    City { names: &["sao paulo", "são paulo"], lat: -23.5505, lon: -46.6333, timezone: "America/Sao_Paulo", utc_offset_minutes: -180 },
    City { names: &["mexico city"], lat: 19.4326, lon: -99.1332, timezone: "America/Mexico_City", utc_offset_minutes: -360 },
    City { names: &["tokyo", "tokyo, japan"], lat: 35.6762, lon: 139.6503, timezone: "Asia/Tokyo", utc_offset_minutes: 540 },
    City { names: &["beijing", "beijing, china"], lat: 39.9042, lon: 116.4074, timezone: "Asia/Shanghai", utc_offset_minutes: 480 },
    City { names: &["mumbai", "mumbai, india"], lat: 19.0760, lon: 72.8777, timezone: "Asia/Kolkata", utc_offset_minutes: 330 },
    City { names: &["sydney", "sydney, australia"], lat: -33.8688, lon: 151.2093, timezone: "Australia/Sydney", utc_offset_minutes: 600 },
    City { names: &["cairo", "cairo, egypt"], lat: 30.0444, lon: 31.2357, timezone: "Africa/Cairo", utc_offset_minutes: 120 },
];

lazy_static::lazy_static! {
    static ref COORDINATES_RE: regex::Regex = regex::Regex::new(
        r"^\s*([+-]?\d{1,2}(?:\.\d+)?)\s*,\s*([+-]?\d{1,3}(?:\.\d+)?)\s*$"
    ).expect("coordinate pattern is valid");
}

/// Offline resolver: a small built-in city table plus literal
/// `"lat, lon"` coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticGazetteer;

impl StaticGazetteer {
    pub fn new() -> Self {
        Self
    }

    fn parse_coordinates(query: &str) -> Option<ResolvedLocation> {
        let caps = COORDINATES_RE.captures(query)?;
        let lat: f64 = caps.get(1)?.as_str().parse().ok()?;
        let lon: f64 = caps.get(2)?.as_str().parse().ok()?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        // Nautical time zone for the meridian
        let utc_offset_minutes = (lon / 15.0).round() as i32 * 60;
        Some(ResolvedLocation {
            label: format!("{:.4}, {:.4}", lat, lon),
            location: GeoLocation { lat, lon },
            timezone: format!("UTC{:+03}:00", utc_offset_minutes / 60),
            utc_offset_minutes,
        })
    }
}

impl LocationResolver for StaticGazetteer {
    fn resolve(&self, query: &str) -> Result<ResolvedLocation, LocationError> {
        if let Some(resolved) = Self::parse_coordinates(query) {
            return Ok(resolved);
        }
        let key = query.trim().to_lowercase();
        CITIES
            .iter()
            .find(|city| city.names.iter().any(|n| *n == key))
            .map(|city| ResolvedLocation {
                label: city.names[0].to_string(),
                location: GeoLocation {
                    lat: city.lat,
                    lon: city.lon,
                },
                timezone: city.timezone.to_string(),
                utc_offset_minutes: city.utc_offset_minutes,
            })
            .ok_or_else(|| LocationError::NotFound {
                query: query.to_string(),
            })
    }
}
