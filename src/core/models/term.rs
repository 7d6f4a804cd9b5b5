//! Academic terms and semester tokens

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four academic terms, declared in academic-year order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    /// Winter session (rank 0)
    Winter,
    /// Spring semester (rank 1)
    Spring,
    /// Summer session (rank 2)
    Summer,
    /// Fall semester (rank 3)
    Fall,
}

impl Term {
    /// All terms in academic-year order
    pub const ALL: [Self; 4] = [Self::Winter, Self::Spring, Self::Summer, Self::Fall];

    /// Position of the term within an academic year (Winter=0 .. Fall=3)
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Winter => 0,
            Self::Spring => 1,
            Self::Summer => 2,
            Self::Fall => 3,
        }
    }

    /// Capitalized display name (e.g., "Fall")
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Term {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "winter" => Ok(Self::Winter),
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "fall" => Ok(Self::Fall),
            _ => Err(format!("Unknown term: '{s}'")),
        }
    }
}

/// Build the grouping key for a term and year (e.g., `fall2024`)
#[must_use]
pub fn semester_id(term: Term, year: i32) -> String {
    format!("{}{year}", term.name().to_ascii_lowercase())
}

/// Parse a combined semester token such as `fall2024` or `Spring2025`
///
/// The token is a term name immediately followed by a four-digit year.
///
/// # Errors
/// Returns a message describing why the token is not a valid semester
pub fn parse_semester_token(token: &str) -> Result<(Term, i32), String> {
    let lowered = token.trim().to_ascii_lowercase();
    let split = lowered
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| format!("Semester '{token}' is missing a year"))?;
    let (term_part, year_part) = lowered.split_at(split);

    let term = term_part
        .parse::<Term>()
        .map_err(|_| format!("Semester '{token}' does not start with a term name"))?;

    if year_part.len() != 4 || !year_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("Semester '{token}' must end with a four-digit year"));
    }
    let year = year_part
        .parse::<i32>()
        .map_err(|e| format!("Semester '{token}' has an invalid year: {e}"))?;

    Ok((term, year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_follows_academic_year() {
        let ranks: Vec<u8> = Term::ALL.iter().map(|t| t.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert!(Term::Winter < Term::Fall);
    }

    #[test]
    fn test_semester_id_lowercases_term() {
        assert_eq!(semester_id(Term::Fall, 2024), "fall2024");
        assert_eq!(semester_id(Term::Winter, 2031), "winter2031");
    }

    #[test]
    fn test_parse_semester_token() {
        assert_eq!(parse_semester_token("fall2024"), Ok((Term::Fall, 2024)));
        assert_eq!(parse_semester_token("Spring2025"), Ok((Term::Spring, 2025)));
        assert_eq!(parse_semester_token(" summer2026 "), Ok((Term::Summer, 2026)));
    }

    #[test]
    fn test_parse_semester_token_rejects_malformed() {
        assert!(parse_semester_token("fall").is_err());
        assert!(parse_semester_token("2024").is_err());
        assert!(parse_semester_token("autumn2024").is_err());
        assert!(parse_semester_token("fall24").is_err());
        assert!(parse_semester_token("fall2024x").is_err());
    }

    #[test]
    fn test_term_from_str_case_insensitive() {
        assert_eq!("FALL".parse::<Term>(), Ok(Term::Fall));
        assert_eq!("winter".parse::<Term>(), Ok(Term::Winter));
        assert!("Autumn".parse::<Term>().is_err());
    }
}
