//! Sexagenary calendar-zodiac tag.
//!
//! The cycle year begins at Lichun, taken as a fixed 4 February cutoff.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const NEW_YEAR_MONTH: u32 = 2;
pub const NEW_YEAR_DAY: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Animal {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

const ANIMALS: [Animal; 12] = [
    Animal::Rat,
    Animal::Ox,
    Animal::Tiger,
    Animal::Rabbit,
    Animal::Dragon,
    Animal::Snake,
    Animal::Horse,
    Animal::Goat,
    Animal::Monkey,
    Animal::Rooster,
    Animal::Dog,
    Animal::Pig,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleElement {
    Metal,
    Water,
    Wood,
    Fire,
    Earth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarZodiacProfile {
    pub cycle_year: i32,
    pub animal: Animal,
    pub element: CycleElement,
    pub polarity: Polarity,
}

/// Cycle year of `date`; dates before the cutoff belong to the previous year.
pub fn cycle_year(date: NaiveDate) -> i32 {
    if (date.month(), date.day()) < (NEW_YEAR_MONTH, NEW_YEAR_DAY) {
        date.year() - 1
    } else {
        date.year()
    }
}

pub fn calendar_zodiac(date: NaiveDate) -> CalendarZodiacProfile {
    let year = cycle_year(date);
    let animal = ANIMALS[(year - 4).rem_euclid(12) as usize];
    let element = match year.rem_euclid(10) {
        0 | 1 => CycleElement::Metal,
        2 | 3 => CycleElement::Water,
        4 | 5 => CycleElement::Wood,
        6 | 7 => CycleElement::Fire,
        _ => CycleElement::Earth,
    };
    let polarity = if year.rem_euclid(2) == 0 {
        Polarity::Yang
    } else {
        Polarity::Yin
    };
    CalendarZodiacProfile {
        cycle_year: year,
        animal,
        element,
        polarity,
    }
}
