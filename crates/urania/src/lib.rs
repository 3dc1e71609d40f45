//! Natal chart computation.
//!
//! Birth data goes in, a [`ChartResult`] comes out: placements under a
//! tropical and a constellational sign table, houses when the birth time is
//! known, aspects, aspect patterns, dominance, numerology and a
//! calendar-zodiac tag. Ephemeris data and location lookup are injected
//! through [`EphemerisProvider`] and [`LocationResolver`].

pub mod analysis;
pub mod aspects;
pub mod birth;
pub mod calendar_zodiac;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod numerology;
pub mod patterns;
pub mod points;
pub mod rulers;
pub mod settings;
pub mod zodiac;

pub use birth::{
    BirthDataError, BirthInput, BirthRecord, LocationError, LocationResolver, ResolvedContext,
    ResolvedLocation, StaticGazetteer,
};
pub use chart::{ChartCalculator, ChartCore, ChartResult, HouseData, TimedChart, UntimedChart};
pub use ephemeris::{EphemerisError, EphemerisProvider, FixedEphemeris};
pub use error::ChartError;
pub use points::Point;
pub use settings::{ChartConfig, ConfigError};
pub use zodiac::{Sign, ZodiacSystem};

#[cfg(feature = "swisseph")]
pub use ephemeris::SwissEphemerisAdapter;
