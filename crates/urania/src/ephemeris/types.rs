use crate::points::Point;
use crate::zodiac::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Position of one body as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub point: Point,
    /// Longitude in degrees (0-360)
    pub lon: f64,
    /// Latitude in degrees
    #[serde(default)]
    pub lat: f64,
    /// Speed in longitude (degrees per day)
    pub speed_lon: f64,
}

/// House cusp algorithm requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    WholeSign,
    Koch,
    Equal,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

impl HouseSystem {
    /// Single-byte identifier used by the Swiss Ephemeris.
    pub const fn code(self) -> u8 {
        match self {
            Self::Placidus => b'P',
            Self::WholeSign => b'W',
            Self::Koch => b'K',
            Self::Equal => b'E',
            Self::Regiomontanus => b'R',
            Self::Campanus => b'C',
            Self::Alcabitius => b'A',
            Self::Morinus => b'M',
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::Placidus => "placidus",
            Self::WholeSign => "whole_sign",
            Self::Koch => "koch",
            Self::Equal => "equal",
            Self::Regiomontanus => "regiomontanus",
            Self::Campanus => "campanus",
            Self::Alcabitius => "alcabitius",
            Self::Morinus => "morinus",
        }
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The four chart angles in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angles {
    pub asc: f64,
    pub mc: f64,
    pub dc: f64,
    pub ic: f64,
}

impl Angles {
    /// Derive the descendant and imum coeli from the ascendant and midheaven.
    pub fn from_asc_mc(asc: f64, mc: f64) -> Self {
        Self {
            asc: normalize_degrees(asc),
            mc: normalize_degrees(mc),
            dc: normalize_degrees(asc + 180.0),
            ic: normalize_degrees(mc + 180.0),
        }
    }

    pub fn get(&self, point: Point) -> Option<f64> {
        match point {
            Point::Ascendant => Some(self.asc),
            Point::Midheaven => Some(self.mc),
            Point::Descendant => Some(self.dc),
            Point::ImumCoeli => Some(self.ic),
            _ => None,
        }
    }
}

/// House system positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousePositions {
    #[serde(default)]
    pub system: HouseSystem,
    /// House cusps 1..12 in zodiacal order
    pub cusps: [f64; 12],
    pub angles: Angles,
}

/// Validated body positions for one instant, keyed in point order.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSet {
    pub bodies: BTreeMap<Point, BodyPosition>,
}

impl PositionSet {
    pub fn get(&self, point: Point) -> Option<&BodyPosition> {
        self.bodies.get(&point)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BodyPosition> {
        self.bodies.values()
    }
}
