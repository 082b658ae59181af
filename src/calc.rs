use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Grade::A),
            "B" => Some(Grade::B),
            "C" => Some(Grade::C),
            "D" => Some(Grade::D),
            "F" => Some(Grade::F),
            _ => None,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percentage floors, highest first. Each floor is inclusive; anything below
/// the last floor is an F.
pub const GRADE_FLOORS: [(f64, Grade); 4] = [
    (90.0, Grade::A),
    (80.0, Grade::B),
    (70.0, Grade::C),
    (60.0, Grade::D),
];

/// Round half up: `floor(x + 0.5)`.
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Raw (unrounded) percentage, or `None` when `max_score` cannot anchor one.
pub fn raw_percentage(score: f64, max_score: f64) -> Option<f64> {
    if !score.is_finite() || !max_score.is_finite() || max_score <= 0.0 {
        return None;
    }
    Some(score / max_score * 100.0)
}

/// Rounded percentage. `None` when the result does not fit an `i64`.
pub fn percentage(score: f64, max_score: f64) -> Option<i64> {
    let rounded = (raw_percentage(score, max_score)? + 0.5).floor();
    // i64::MAX as f64 is 2^63, one past the largest i64.
    if rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return None;
    }
    Some(rounded as i64)
}

pub fn grade_for_percentage(pct: f64) -> Grade {
    GRADE_FLOORS
        .iter()
        .find(|(floor, _)| pct >= *floor)
        .map(|(_, g)| *g)
        .unwrap_or(Grade::F)
}

/// Letter grade for a score out of `max_score`. Grading uses the unrounded
/// percentage, so 89.6/100 is still a B.
pub fn grade(score: f64, max_score: f64) -> Option<Grade> {
    raw_percentage(score, max_score).map(grade_for_percentage)
}

/// Mean of integer percentages rounded half up; 0 for an empty input.
pub fn mean_rounded<I>(values: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    let mut sum: i128 = 0;
    let mut count: i128 = 0;
    for v in values {
        sum += i128::from(v);
        count += 1;
    }
    if count == 0 {
        return 0;
    }
    round_half_up(sum as f64 / count as f64)
}

/// Parse a numeric form field. Blank or non-numeric text yields `None`.
pub fn parse_score_text(raw: &str) -> Option<f64> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}
