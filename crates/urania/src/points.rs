//! Tracked chart points.
//!
//! The declaration order of [`Point`] is the global point order: it drives
//! aspect tie-breaks, pattern participant ordering and dominance tie-breaks.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Point {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
    Chiron,
    #[serde(rename = "asc")]
    Ascendant,
    #[serde(rename = "mc")]
    Midheaven,
    #[serde(rename = "dc")]
    Descendant,
    #[serde(rename = "ic")]
    ImumCoeli,
}

/// Bodies reported by the ephemeris provider, in point order.
pub const BODIES: [Point; 13] = [
    Point::Sun,
    Point::Moon,
    Point::Mercury,
    Point::Venus,
    Point::Mars,
    Point::Jupiter,
    Point::Saturn,
    Point::Uranus,
    Point::Neptune,
    Point::Pluto,
    Point::NorthNode,
    Point::SouthNode,
    Point::Chiron,
];

/// The four chart angles, only available with a known birth time.
pub const ANGLES: [Point; 4] = [
    Point::Ascendant,
    Point::Midheaven,
    Point::Descendant,
    Point::ImumCoeli,
];

impl Point {
    /// Stable lowercase identifier, matching the serde representation.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::Mercury => "mercury",
            Self::Venus => "venus",
            Self::Mars => "mars",
            Self::Jupiter => "jupiter",
            Self::Saturn => "saturn",
            Self::Uranus => "uranus",
            Self::Neptune => "neptune",
            Self::Pluto => "pluto",
            Self::NorthNode => "north_node",
            Self::SouthNode => "south_node",
            Self::Chiron => "chiron",
            Self::Ascendant => "asc",
            Self::Midheaven => "mc",
            Self::Descendant => "dc",
            Self::ImumCoeli => "ic",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
            Self::NorthNode => "North Node",
            Self::SouthNode => "South Node",
            Self::Chiron => "Chiron",
            Self::Ascendant => "Ascendant",
            Self::Midheaven => "Midheaven",
            Self::Descendant => "Descendant",
            Self::ImumCoeli => "Imum Coeli",
        }
    }

    /// Parse an identifier such as `"north_node"` or `"asc"` (case-insensitive).
    pub fn from_id(id: &str) -> Option<Point> {
        let id = id.trim().to_lowercase();
        BODIES
            .iter()
            .chain(ANGLES.iter())
            .copied()
            .find(|p| p.id() == id)
    }

    pub const fn is_angle(self) -> bool {
        matches!(
            self,
            Self::Ascendant | Self::Midheaven | Self::Descendant | Self::ImumCoeli
        )
    }

    /// The point that is opposite this one by construction, if any.
    pub const fn axis_partner(self) -> Option<Point> {
        match self {
            Self::NorthNode => Some(Self::SouthNode),
            Self::SouthNode => Some(Self::NorthNode),
            Self::Ascendant => Some(Self::Descendant),
            Self::Descendant => Some(Self::Ascendant),
            Self::Midheaven => Some(Self::ImumCoeli),
            Self::ImumCoeli => Some(Self::Midheaven),
            _ => None,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id_round_trips_every_point() {
        for point in BODIES.iter().chain(ANGLES.iter()) {
            assert_eq!(Point::from_id(point.id()), Some(*point));
        }
        assert_eq!(Point::from_id("  ASC "), Some(Point::Ascendant));
        assert_eq!(Point::from_id("vulcan"), None);
    }

    #[test]
    fn test_axis_partners_are_symmetric() {
        for point in BODIES.iter().chain(ANGLES.iter()) {
            if let Some(partner) = point.axis_partner() {
                assert_eq!(partner.axis_partner(), Some(*point));
            }
        }
    }

    #[test]
    fn test_serde_ids_match() {
        let json = serde_json::to_string(&Point::NorthNode).unwrap();
        assert_eq!(json, "\"north_node\"");
        let json = serde_json::to_string(&Point::Descendant).unwrap();
        assert_eq!(json, "\"dc\"");
    }
}
