//! Sign rulers.
//!
//! Maps signs of either table to their planetary rulers (traditional and
//! modern) and resolves the chart ruler and per-house rulers.

use crate::points::Point;
use crate::zodiac::{sign_table, PointPlacement, Sign, ZodiacSystem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rulership {
    Traditional,
    #[default]
    Modern,
}

/// Get sign ruler.
pub fn sign_ruler(sign: Sign, rulership: Rulership) -> Point {
    match sign {
        Sign::Aries => Point::Mars,
        Sign::Taurus => Point::Venus,
        Sign::Gemini => Point::Mercury,
        Sign::Cancer => Point::Moon,
        Sign::Leo => Point::Sun,
        Sign::Virgo => Point::Mercury,
        Sign::Libra => Point::Venus,
        Sign::Scorpio => match rulership {
            Rulership::Modern => Point::Pluto,
            Rulership::Traditional => Point::Mars,
        },
        Sign::Ophiuchus => Point::Chiron,
        Sign::Sagittarius => Point::Jupiter,
        Sign::Capricorn => Point::Saturn,
        Sign::Aquarius => match rulership {
            Rulership::Modern => Point::Uranus,
            Rulership::Traditional => Point::Saturn,
        },
        Sign::Pisces => match rulership {
            Rulership::Modern => Point::Neptune,
            Rulership::Traditional => Point::Jupiter,
        },
    }
}

/// Where a ruling point itself sits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RulerPlacement {
    pub ruler: Point,
    pub sign: Sign,
    pub degree: f64,
    pub house: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseRuler {
    pub house: u8,
    pub cusp_sign: Sign,
    #[serde(flatten)]
    pub ruler: RulerPlacement,
}

/// Resolve the ruler of each house from the sign on its cusp.
///
/// `cusps` holds the 12 cusp longitudes, `placements` the projected bodies of
/// the same table and `house_of` the house assignment of each point.
pub fn resolve_house_rulers(
    system: ZodiacSystem,
    cusps: &[f64; 12],
    placements: &[PointPlacement],
    house_of: impl Fn(Point) -> Option<u8>,
    rulership: Rulership,
) -> Vec<HouseRuler> {
    let table = sign_table(system);
    let mut rulers = Vec::with_capacity(12);
    for (idx, cusp) in cusps.iter().enumerate() {
        let (_, def) = table.locate(*cusp);
        let ruler = sign_ruler(def.sign, rulership);
        let placement = placements.iter().find(|p| p.point == ruler);
        let house = house_of(ruler);
        match (placement, house) {
            (Some(placement), Some(house)) => rulers.push(HouseRuler {
                house: idx as u8 + 1,
                cusp_sign: def.sign,
                ruler: RulerPlacement {
                    ruler,
                    sign: placement.sign,
                    degree: placement.degree,
                    house,
                },
            }),
            _ => log::warn!(
                "Ruler {} of house {} has no placement; skipping",
                ruler.id(),
                idx + 1
            ),
        }
    }
    rulers
}

/// The chart ruler is the ruler of house 1.
pub fn chart_ruler(house_rulers: &[HouseRuler]) -> Option<RulerPlacement> {
    house_rulers
        .iter()
        .find(|r| r.house == 1)
        .map(|r| r.ruler.clone())
}
