//! Dominance analysis: weighted tallies of sign, element, modality and ruler.

use crate::points::{Point, BODIES};
use crate::rulers::{sign_ruler, Rulership};
use crate::settings::PointWeights;
use crate::zodiac::{
    sign_table, Element, Modality, PointPlacement, Sign, ZodiacSystem, ALL_ELEMENTS,
    ALL_MODALITIES,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tally<T> {
    pub key: T,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DominanceSummary {
    pub system: ZodiacSystem,
    pub dominant_sign: Sign,
    pub dominant_element: Element,
    pub dominant_modality: Modality,
    pub dominant_planet: Point,
    pub signs: Vec<Tally<Sign>>,
    pub elements: Vec<Tally<Element>>,
    pub modalities: Vec<Tally<Modality>>,
    pub planets: Vec<Tally<Point>>,
}

/// Buckets in fixed candidate order; the first highest bucket wins ties.
fn tally<T: Copy + PartialEq>(
    candidates: impl IntoIterator<Item = T>,
    entries: &[(T, f64)],
) -> Vec<Tally<T>> {
    candidates
        .into_iter()
        .map(|key| Tally {
            key,
            score: entries
                .iter()
                .filter(|(k, _)| *k == key)
                .map(|(_, w)| w)
                .sum(),
        })
        .collect()
}

fn dominant<T: Copy>(tallies: &[Tally<T>]) -> Option<T> {
    let mut best: Option<&Tally<T>> = None;
    for t in tallies {
        match best {
            Some(b) if t.score <= b.score => {}
            _ => best = Some(t),
        }
    }
    best.map(|t| t.key)
}

/// Tally `placements` (one table's bodies and, when known, angles).
///
/// Returns `None` only when there is nothing to tally.
pub fn analyze_dominance(
    system: ZodiacSystem,
    placements: &[PointPlacement],
    weights: &PointWeights,
    rulership: Rulership,
) -> Option<DominanceSummary> {
    if placements.is_empty() {
        return None;
    }
    let weighted: Vec<(&PointPlacement, f64)> = placements
        .iter()
        .map(|p| (p, weights.weight(p.point)))
        .collect();

    let sign_entries: Vec<(Sign, f64)> = weighted.iter().map(|(p, w)| (p.sign, *w)).collect();
    let element_entries: Vec<(Element, f64)> = weighted
        .iter()
        .map(|(p, w)| (p.sign.element(), *w))
        .collect();
    let modality_entries: Vec<(Modality, f64)> = weighted
        .iter()
        .map(|(p, w)| (p.sign.modality(), *w))
        .collect();
    let ruler_entries: Vec<(Point, f64)> = weighted
        .iter()
        .map(|(p, w)| (sign_ruler(p.sign, rulership), *w))
        .collect();

    let signs = tally(sign_table(system).signs.iter().map(|d| d.sign), &sign_entries);
    let elements = tally(ALL_ELEMENTS, &element_entries);
    let modalities = tally(ALL_MODALITIES, &modality_entries);
    let planets = tally(BODIES, &ruler_entries);

    Some(DominanceSummary {
        system,
        dominant_sign: dominant(&signs)?,
        dominant_element: dominant(&elements)?,
        dominant_modality: dominant(&modalities)?,
        dominant_planet: dominant(&planets)?,
        signs,
        elements,
        modalities,
        planets,
    })
}
