use chrono::NaiveDate;
use urania::calendar_zodiac::{calendar_zodiac, Animal, CycleElement, Polarity};
use urania::numerology::{day_number, life_path_number, NumerologyProfile};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_life_path_keeps_master_number() {
    // 1+9+8+7+1+1+2+9 = 38, 3+8 = 11
    assert_eq!(life_path_number(date(1987, 11, 29)), 11);
}

#[test]
fn test_day_number_keeps_master_number() {
    assert_eq!(day_number(29), 11);
    assert_eq!(day_number(22), 22);
    assert_eq!(day_number(28), 1);
    assert_eq!(day_number(9), 9);
}

#[test]
fn test_life_path_reduces_fully() {
    // 1+9+9+0+0+5+1+5 = 30 -> 3
    assert_eq!(life_path_number(date(1990, 5, 15)), 3);
    // 2+0+2+4+1+2+3+1 = 15 -> 6
    assert_eq!(life_path_number(date(2024, 12, 31)), 6);
}

#[test]
fn test_profile() {
    let profile = NumerologyProfile::from_date(date(1987, 11, 29));
    assert_eq!(profile.life_path, 11);
    assert_eq!(profile.day_number, 11);
}

#[test]
fn test_calendar_zodiac_cycle() {
    let profile = calendar_zodiac(date(1987, 11, 29));
    assert_eq!(profile.cycle_year, 1987);
    assert_eq!(profile.animal, Animal::Rabbit);
    assert_eq!(profile.element, CycleElement::Fire);
    assert_eq!(profile.polarity, Polarity::Yin);

    let profile = calendar_zodiac(date(2020, 6, 1));
    assert_eq!(profile.animal, Animal::Rat);
    assert_eq!(profile.element, CycleElement::Metal);
    assert_eq!(profile.polarity, Polarity::Yang);
}

#[test]
fn test_calendar_zodiac_uses_february_cutoff() {
    let before = calendar_zodiac(date(1988, 2, 3));
    assert_eq!(before.cycle_year, 1987);
    assert_eq!(before.animal, Animal::Rabbit);

    let after = calendar_zodiac(date(1988, 2, 4));
    assert_eq!(after.cycle_year, 1988);
    assert_eq!(after.animal, Animal::Dragon);
    assert_eq!(after.element, CycleElement::Earth);
}
