//! Static sign tables.
//!
//! Table A is the tropical zodiac: 12 signs of exactly 30° anchored at the
//! vernal equinox. Table B is the constellational zodiac: 13 signs whose
//! boundaries follow the IAU constellation borders along the ecliptic
//! (J2000 frame), including Ophiuchus between Scorpio and Sagittarius.
//! Table B boundaries are applied to the same ecliptic longitudes as
//! Table A; no ayanamsa is subtracted.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

pub const ALL_ELEMENTS: [Element; 4] = [Element::Fire, Element::Earth, Element::Air, Element::Water];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

pub const ALL_MODALITIES: [Modality; 3] = [Modality::Cardinal, Modality::Fixed, Modality::Mutable];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Ophiuchus,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Ophiuchus => "Ophiuchus",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    pub const fn element(self) -> Element {
        match self {
            Self::Aries | Self::Leo | Self::Sagittarius => Element::Fire,
            Self::Taurus | Self::Virgo | Self::Capricorn => Element::Earth,
            Self::Gemini | Self::Libra | Self::Aquarius => Element::Air,
            Self::Cancer | Self::Scorpio | Self::Ophiuchus | Self::Pisces => Element::Water,
        }
    }

    pub const fn modality(self) -> Modality {
        match self {
            Self::Aries | Self::Cancer | Self::Libra | Self::Capricorn => Modality::Cardinal,
            Self::Taurus | Self::Leo | Self::Scorpio | Self::Ophiuchus | Self::Aquarius => {
                Modality::Fixed
            }
            Self::Gemini | Self::Virgo | Self::Sagittarius | Self::Pisces => Modality::Mutable,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which sign table a placement was projected through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZodiacSystem {
    /// Table A: 12 equal signs.
    Tropical,
    /// Table B: 13 unequal signs.
    Constellational,
}

pub const ALL_SYSTEMS: [ZodiacSystem; 2] = [ZodiacSystem::Tropical, ZodiacSystem::Constellational];

/// A sign sector `[start, end)` on the ecliptic. `end < start` means the
/// sector wraps through 0°.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignDefinition {
    pub sign: Sign,
    pub start: f64,
    pub end: f64,
}

impl SignDefinition {
    pub fn width(&self) -> f64 {
        let w = (self.end - self.start).rem_euclid(360.0);
        if w == 0.0 {
            360.0
        } else {
            w
        }
    }

    pub fn contains(&self, longitude: f64) -> bool {
        arc_contains(self.start, self.end, longitude)
    }

    /// Degrees travelled from the sign's start to `longitude`.
    pub fn offset(&self, longitude: f64) -> f64 {
        (longitude - self.start).rem_euclid(360.0)
    }
}

#[derive(Debug, Clone)]
pub struct SignTable {
    pub system: ZodiacSystem,
    pub signs: Vec<SignDefinition>,
}

impl SignTable {
    /// Index and definition of the sign containing `longitude`.
    pub fn locate(&self, longitude: f64) -> (usize, &SignDefinition) {
        let lon = normalize_degrees(longitude);
        if self.system == ZodiacSystem::Tropical {
            let index = ((lon / 30.0).floor() as usize).min(11);
            return (index, &self.signs[index]);
        }
        // Every longitude lies in exactly one sector; the fallback is unreachable
        // for a well-formed table.
        self.signs
            .iter()
            .enumerate()
            .find(|(_, def)| def.contains(lon))
            .unwrap_or((0, &self.signs[0]))
    }

    pub fn definition(&self, sign: Sign) -> Option<&SignDefinition> {
        self.signs.iter().find(|d| d.sign == sign)
    }

    pub fn total_width(&self) -> f64 {
        self.signs.iter().map(SignDefinition::width).sum()
    }
}

const TROPICAL_ORDER: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

// Ecliptic longitudes where the Sun crosses into each constellation (J2000).
const CONSTELLATION_BOUNDARIES: [(Sign, f64); 13] = [
    (Sign::Aries, 28.687),
    (Sign::Taurus, 53.417),
    (Sign::Gemini, 90.140),
    (Sign::Cancer, 117.988),
    (Sign::Leo, 138.038),
    (Sign::Virgo, 173.851),
    (Sign::Libra, 217.810),
    (Sign::Scorpio, 241.047),
    (Sign::Ophiuchus, 247.638),
    (Sign::Sagittarius, 266.238),
    (Sign::Capricorn, 299.656),
    (Sign::Aquarius, 327.488),
    (Sign::Pisces, 351.650),
];

fn build_tropical_table() -> SignTable {
    let signs = TROPICAL_ORDER
        .iter()
        .enumerate()
        .map(|(idx, sign)| SignDefinition {
            sign: *sign,
            start: idx as f64 * 30.0,
            end: (idx + 1) as f64 * 30.0,
        })
        .collect();
    SignTable {
        system: ZodiacSystem::Tropical,
        signs,
    }
}

fn build_constellational_table() -> SignTable {
    let n = CONSTELLATION_BOUNDARIES.len();
    let signs = (0..n)
        .map(|idx| {
            let (sign, start) = CONSTELLATION_BOUNDARIES[idx];
            let (_, end) = CONSTELLATION_BOUNDARIES[(idx + 1) % n];
            SignDefinition { sign, start, end }
        })
        .collect();
    SignTable {
        system: ZodiacSystem::Constellational,
        signs,
    }
}

lazy_static::lazy_static! {
    static ref TROPICAL_TABLE: SignTable = build_tropical_table();
    static ref CONSTELLATIONAL_TABLE: SignTable = build_constellational_table();
}

pub fn sign_table(system: ZodiacSystem) -> &'static SignTable {
    match system {
        ZodiacSystem::Tropical => &TROPICAL_TABLE,
        ZodiacSystem::Constellational => &CONSTELLATIONAL_TABLE,
    }
}

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let mut normalized = value % 360.0;
    if normalized < 0.0 {
        normalized += 360.0;
    }
    // -1e-20 + 360.0 rounds to 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Whether `longitude` lies on the forward arc `[start, end)`, wrapping through 0°.
pub fn arc_contains(start: f64, end: f64, longitude: f64) -> bool {
    let lon = normalize_degrees(longitude);
    let start = normalize_degrees(start);
    let end = normalize_degrees(end);
    if start < end {
        lon >= start && lon < end
    } else if start > end {
        lon >= start || lon < end
    } else {
        false
    }
}

/// Smallest angle between two longitudes, in [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let diff = (normalize_degrees(lon1) - normalize_degrees(lon2)).abs();
    diff.min(360.0 - diff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-1e-20), 0.0);
    }

    #[test]
    fn test_arc_contains_wraps() {
        assert!(arc_contains(350.0, 10.0, 355.0));
        assert!(arc_contains(350.0, 10.0, 5.0));
        assert!(!arc_contains(350.0, 10.0, 10.0));
        assert!(arc_contains(350.0, 10.0, 350.0));
        assert!(!arc_contains(10.0, 10.0, 10.0));
    }

    #[test]
    fn test_constellational_pisces_wraps() {
        let table = sign_table(ZodiacSystem::Constellational);
        let (_, def) = table.locate(5.0);
        assert_eq!(def.sign, Sign::Pisces);
        let (_, def) = table.locate(355.0);
        assert_eq!(def.sign, Sign::Pisces);
        let (idx, def) = table.locate(250.0);
        assert_eq!(def.sign, Sign::Ophiuchus);
        assert_eq!(idx, 8);
    }

    #[test]
    fn test_ophiuchus_metadata() {
        assert_eq!(Sign::Ophiuchus.element(), Element::Water);
        assert_eq!(Sign::Ophiuchus.modality(), Modality::Fixed);
    }
}
