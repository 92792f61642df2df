use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use crate::models::{CourseEntry, GpaResult, Letter};
use crate::utils::courses::CourseList;

// Looks up the point value of a grade symbol on the fixed A-F scale.
pub fn grade_points(symbol: &str) -> Option<f64> {
    symbol.parse::<Letter>().ok().map(Letter::points)
}

// Rounds the exact binary value of `value` to two places, ties away from zero.
fn round2(value: f64) -> f64 {
    match Decimal::from_f64_retain(value) {
        Some(exact) => exact
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(f64::NAN),
        None => value,
    }
}

/// Credit-weighted mean of the grade points of `entries`.
///
/// Malformed rows are not rejected. Blank or non-numeric credits turn the
/// credit total into `NaN`, which fails the `> 0` check and gives
/// `GpaResult::NoResult`. An unknown grade symbol turns the point total into
/// `NaN` and the result becomes `GpaResult::Value(NaN)`.
pub fn calculate_entries(entries: &[CourseEntry]) -> GpaResult {
    let mut total_credits = 0.0;
    let mut total_points = 0.0;

    for entry in entries {
        let credits = entry.credit_value();
        total_credits += credits;
        total_points += grade_points(&entry.grade).unwrap_or(f64::NAN) * credits;
    }

    debug!("Totals: {} points over {} credits", total_points, total_credits);

    if total_credits > 0.0 {
        GpaResult::Value(round2(total_points / total_credits))
    } else {
        GpaResult::NoResult
    }
}

pub fn calculate_gpa(courses: &CourseList) -> GpaResult {
    calculate_entries(courses.entries())
}
