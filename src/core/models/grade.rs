//! Letter grade ↔ grade point mapping

use std::fmt;
use std::str::FromStr;

/// Highest grade point value a course can carry
pub const MAX_GPA: f64 = 4.0;

/// Letter grades in declaration order; ties resolve toward the earlier letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterGrade {
    /// 4.0 points
    A,
    /// 3.0 points
    B,
    /// 2.0 points
    C,
    /// 1.0 points
    D,
    /// 0.0 points
    F,
}

impl LetterGrade {
    /// All letters in declaration order
    pub const ALL: [Self; 5] = [Self::A, Self::B, Self::C, Self::D, Self::F];

    /// Grade points for this letter
    #[must_use]
    pub const fn points(self) -> f64 {
        match self {
            Self::A => 4.0,
            Self::B => 3.0,
            Self::C => 2.0,
            Self::D => 1.0,
            Self::F => 0.0,
        }
    }

    /// Letter closest to a stored grade point value
    ///
    /// A value of exactly 0 (or any non-finite value) is the ungraded state and
    /// yields `None` rather than `F`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn nearest(gpa: f64) -> Option<Self> {
        if !gpa.is_finite() || gpa == 0.0 {
            return None;
        }
        let mut best = Self::ALL[0];
        let mut best_distance = (best.points() - gpa).abs();
        for letter in &Self::ALL[1..] {
            let distance = (letter.points() - gpa).abs();
            if distance < best_distance {
                best = *letter;
                best_distance = distance;
            }
        }
        Some(best)
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(letter)
    }
}

impl FromStr for LetterGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "F" => Ok(Self::F),
            _ => Err(format!("Unknown letter grade: '{s}'")),
        }
    }
}

/// Grade points for a letter selector value; empty means ungraded (0.0)
#[must_use]
pub fn points_for_selection(selection: &str) -> Option<f64> {
    if selection.trim().is_empty() {
        return Some(0.0);
    }
    selection.parse::<LetterGrade>().ok().map(LetterGrade::points)
}

/// Letter selector value for a stored GPA; empty string means ungraded
#[must_use]
pub fn selection_for_points(gpa: f64) -> String {
    LetterGrade::nearest(gpa).map_or_else(String::new, |letter| letter.to_string())
}

/// Parse user-entered grade points, rejecting anything outside [0.0, 4.0]
#[must_use]
pub fn parse_grade_points(input: &str) -> Option<f64> {
    let value = input.trim().parse::<f64>().ok()?;
    (0.0..=MAX_GPA).contains(&value).then_some(value)
}

/// Format a GPA for display with two decimals
#[must_use]
pub fn format_gpa(gpa: f64) -> String {
    format!("{gpa:.2}")
}
