//! House assignment and house/sign grid reconciliation.
//!
//! Houses come from the provider as 12 cusp longitudes in zodiacal order.
//! House `n` is the forward arc from cusp `n` to cusp `n + 1`, wrapping at
//! 360°. Because house and sign grids are independent, a single house may
//! span several signs of either table.

use crate::ephemeris::{HousePositions, HouseSystem};
use crate::points::Point;
use crate::rulers::{chart_ruler, resolve_house_rulers, HouseRuler, RulerPlacement, Rulership};
use crate::zodiac::{
    arc_contains, normalize_degrees, project_longitude, sign_table, PointPlacement, Sign,
    ZodiacProjector, ZodiacSystem,
};
use serde::Serialize;

const SEGMENT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseCusp {
    pub house: u8,
    pub longitude: f64,
    pub sign: Sign,
    pub degree: f64,
}

/// Part of a house arc lying in one sign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignSegment {
    pub sign: Sign,
    pub start: f64,
    pub end: f64,
    pub span: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseSignDistribution {
    pub house: u8,
    pub start: f64,
    pub end: f64,
    pub segments: Vec<SignSegment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointHouse {
    pub point: Point,
    pub house: u8,
}

/// Everything house-related for one sign table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemHouses {
    pub system: ZodiacSystem,
    pub cusps: Vec<HouseCusp>,
    pub angles: Vec<PointPlacement>,
    pub house_rulers: Vec<HouseRuler>,
    pub chart_ruler: Option<RulerPlacement>,
    pub sign_distribution: Vec<HouseSignDistribution>,
}

/// House (1-12) whose arc contains `longitude`.
pub fn house_of(cusps: &[f64; 12], longitude: f64) -> u8 {
    let lon = normalize_degrees(longitude);
    for i in 0..12 {
        if arc_contains(cusps[i], cusps[(i + 1) % 12], lon) {
            return i as u8 + 1;
        }
    }
    // Rounding at a cusp: take the cusp most recently passed
    let (idx, _) = cusps
        .iter()
        .enumerate()
        .map(|(i, c)| (i, (lon - c).rem_euclid(360.0)))
        .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best });
    idx as u8 + 1
}

/// Assign every placement to a house.
pub fn assign_houses(cusps: &[f64; 12], placements: &[PointPlacement]) -> Vec<PointHouse> {
    let mut houses: Vec<PointHouse> = placements
        .iter()
        .map(|p| PointHouse {
            point: p.point,
            house: house_of(cusps, p.longitude),
        })
        .collect();
    houses.sort_by_key(|h| h.point);
    houses
}

pub fn house_cusps(system: ZodiacSystem, cusps: &[f64; 12]) -> Vec<HouseCusp> {
    cusps
        .iter()
        .enumerate()
        .map(|(idx, lon)| {
            let pos = project_longitude(system, *lon);
            HouseCusp {
                house: idx as u8 + 1,
                longitude: normalize_degrees(*lon),
                sign: pos.sign,
                degree: pos.degree,
            }
        })
        .collect()
}

/// Ordered sign segments covering the forward arc `[start, end)`.
pub fn sign_segments(system: ZodiacSystem, start: f64, end: f64) -> Vec<SignSegment> {
    let table = sign_table(system);
    let start = normalize_degrees(start);
    let mut remaining = (normalize_degrees(end) - start).rem_euclid(360.0);
    let (mut idx, _) = table.locate(start);
    let mut cursor = start;
    let mut segments = Vec::new();

    // A house never spans more than the whole table plus one partial sign
    for _ in 0..=table.signs.len() {
        if remaining <= SEGMENT_EPSILON {
            break;
        }
        let def = &table.signs[idx];
        let to_sign_end = (def.end - cursor).rem_euclid(360.0);
        let (span, seg_end) = if to_sign_end <= remaining {
            (to_sign_end, def.end)
        } else {
            (remaining, normalize_degrees(cursor + remaining))
        };
        if span > SEGMENT_EPSILON {
            segments.push(SignSegment {
                sign: def.sign,
                start: cursor,
                end: normalize_degrees(seg_end),
                span,
            });
        }
        remaining -= span;
        cursor = normalize_degrees(seg_end);
        idx = (idx + 1) % table.signs.len();
    }
    segments
}

pub fn house_sign_distribution(
    system: ZodiacSystem,
    cusps: &[f64; 12],
) -> Vec<HouseSignDistribution> {
    (0..12)
        .map(|i| {
            let start = normalize_degrees(cusps[i]);
            let end = normalize_degrees(cusps[(i + 1) % 12]);
            HouseSignDistribution {
                house: i as u8 + 1,
                start,
                end,
                segments: sign_segments(system, start, end),
            }
        })
        .collect()
}

/// Builds the per-table house data from validated provider houses.
pub struct HouseAssembler<'a> {
    houses: &'a HousePositions,
    projector: ZodiacProjector,
    rulership: Rulership,
}

impl<'a> HouseAssembler<'a> {
    pub fn new(houses: &'a HousePositions, projector: ZodiacProjector, rulership: Rulership) -> Self {
        Self {
            houses,
            projector,
            rulership,
        }
    }

    pub fn house_system(&self) -> HouseSystem {
        self.houses.system
    }

    pub fn angle_placements(&self, system: ZodiacSystem) -> Vec<PointPlacement> {
        self.projector.project_angles(system, &self.houses.angles)
    }

    pub fn point_houses(&self, placements: &[PointPlacement]) -> Vec<PointHouse> {
        assign_houses(&self.houses.cusps, placements)
    }

    /// `placements` are the bodies projected through `system`.
    pub fn assemble(
        &self,
        system: ZodiacSystem,
        placements: &[PointPlacement],
        point_houses: &[PointHouse],
    ) -> SystemHouses {
        let cusps = &self.houses.cusps;
        let house_rulers = resolve_house_rulers(
            system,
            cusps,
            placements,
            |point| {
                point_houses
                    .iter()
                    .find(|h| h.point == point)
                    .map(|h| h.house)
            },
            self.rulership,
        );
        let chart_ruler = chart_ruler(&house_rulers);
        log::debug!(
            "Assembled {} houses for {:?} table",
            house_rulers.len(),
            system
        );
        SystemHouses {
            system,
            cusps: house_cusps(system, cusps),
            angles: self.angle_placements(system),
            house_rulers,
            chart_ruler,
            sign_distribution: house_sign_distribution(system, cusps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equal_cusps(start: f64) -> [f64; 12] {
        let mut cusps = [0.0; 12];
        for (i, c) in cusps.iter_mut().enumerate() {
            *c = normalize_degrees(start + i as f64 * 30.0);
        }
        cusps
    }

    #[test]
    fn test_house_of_wraps() {
        let cusps = equal_cusps(345.0);
        assert_eq!(house_of(&cusps, 350.0), 1);
        assert_eq!(house_of(&cusps, 10.0), 1);
        assert_eq!(house_of(&cusps, 15.0), 2);
        assert_eq!(house_of(&cusps, 344.9), 12);
    }

    #[test]
    fn test_segments_clip_to_house() {
        let segments = sign_segments(ZodiacSystem::Tropical, 25.0, 65.0);
        let signs: Vec<Sign> = segments.iter().map(|s| s.sign).collect();
        assert_eq!(signs, vec![Sign::Aries, Sign::Taurus, Sign::Gemini]);
        assert!((segments[0].span - 5.0).abs() < 1e-9);
        assert!((segments[1].span - 30.0).abs() < 1e-9);
        assert!((segments[2].start - 60.0).abs() < 1e-9);
        assert!((segments[2].end - 65.0).abs() < 1e-9);
    }

    #[test]
    fn test_segments_across_zero() {
        let segments = sign_segments(ZodiacSystem::Constellational, 340.0, 40.0);
        let signs: Vec<Sign> = segments.iter().map(|s| s.sign).collect();
        assert_eq!(signs, vec![Sign::Aquarius, Sign::Pisces, Sign::Aries]);
        let total: f64 = segments.iter().map(|s| s.span).sum();
        assert!((total - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_covers_circle() {
        for system in crate::zodiac::ALL_SYSTEMS {
            let dist = house_sign_distribution(system, &equal_cusps(17.3));
            let total: f64 = dist
                .iter()
                .flat_map(|h| h.segments.iter())
                .map(|s| s.span)
                .sum();
            assert!((total - 360.0).abs() < 1e-6);
        }
    }
}
