use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumerologyProfile {
    pub life_path: u32,
    pub day_number: u32,
}

impl NumerologyProfile {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            life_path: life_path_number(date),
            day_number: day_number(date.day()),
        }
    }
}

fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Reduce to a single digit, stopping at any master number on the way.
pub fn reduce(mut n: u32) -> u32 {
    while n > 9 && !MASTER_NUMBERS.contains(&n) {
        n = digit_sum(n);
    }
    n
}

/// Sum of every digit of the date (year, month and day), reduced.
pub fn life_path_number(date: NaiveDate) -> u32 {
    let total = digit_sum(date.year().unsigned_abs()) + digit_sum(date.month()) + digit_sum(date.day());
    reduce(total)
}

pub fn day_number(day: u32) -> u32 {
    reduce(day)
}
