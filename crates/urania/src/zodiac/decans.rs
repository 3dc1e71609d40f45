//! Tropical decans.
//!
//! Each 30° sign is divided into 3 decans of 10°. The decan ruler rotates
//! through the traditional rulers of the signs sharing the sign's element,
//! starting with the sign itself.

use crate::points::Point;
use crate::rulers::{sign_ruler, Rulership};
use crate::zodiac::tables::{Element, Sign};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decan {
    /// 1, 2 or 3
    pub index: u8,
    pub ruler: Point,
}

const FIRE: [Sign; 3] = [Sign::Aries, Sign::Leo, Sign::Sagittarius];
const EARTH: [Sign; 3] = [Sign::Taurus, Sign::Virgo, Sign::Capricorn];
const AIR: [Sign; 3] = [Sign::Gemini, Sign::Libra, Sign::Aquarius];
const WATER: [Sign; 3] = [Sign::Cancer, Sign::Scorpio, Sign::Pisces];

fn element_group(element: Element) -> &'static [Sign; 3] {
    match element {
        Element::Fire => &FIRE,
        Element::Earth => &EARTH,
        Element::Air => &AIR,
        Element::Water => &WATER,
    }
}

/// Given degree in sign (0–29.999...), returns decan index 1, 2, or 3.
pub fn decan_index(degree_in_sign: f64) -> u8 {
    if degree_in_sign < 10.0 {
        1
    } else if degree_in_sign < 20.0 {
        2
    } else {
        3
    }
}

/// Decan of a tropical sign. `None` for Ophiuchus, which has no tropical sector.
pub fn decan_for(sign: Sign, degree_in_sign: f64) -> Option<Decan> {
    let group = element_group(sign.element());
    let group_index = group.iter().position(|s| *s == sign)?;
    let index = decan_index(degree_in_sign);
    let ruler_sign = group[(group_index + index as usize - 1) % group.len()];
    Some(Decan {
        index,
        ruler: sign_ruler(ruler_sign, Rulership::Traditional),
    })
}
