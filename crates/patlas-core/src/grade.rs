//! Five-level relevance grading for analyzed patents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PatlasError;

/// Competitive/legal relevance of a patent to the portfolio owner.
///
/// S and A are the core grades: both mark a direct conflict with practiced
/// (S) or planned (A) technology and require a response. B and C are
/// reference grades. X means no monitoring is needed, and a record with no
/// grade at all reads as X everywhere grades are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    X,
}

impl Grade {
    /// Every grade, in severity order.
    pub const ALL: [Grade; 5] = [Grade::S, Grade::A, Grade::B, Grade::C, Grade::X];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::X => "X",
        }
    }

    /// Core grades demand a response: a non-infringement argument (S) or a
    /// design-around (A).
    pub fn is_core(&self) -> bool {
        matches!(self, Self::S | Self::A)
    }

    /// What the grade means for monitoring work.
    pub fn description(&self) -> &'static str {
        match self {
            Self::S => "core: conflicts with practiced technology, non-infringement argument required",
            Self::A => "core: conflicts with planned technology, design-around required",
            Self::B => "reference for new idea generation",
            Self::C => "general reference within the field",
            Self::X => "unclassified, no monitoring required",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = PatlasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "S" | "s" => Ok(Self::S),
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            "X" | "x" => Ok(Self::X),
            other => Err(PatlasError::InvalidGrade(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_grades() {
        assert!(Grade::S.is_core());
        assert!(Grade::A.is_core());
        assert!(!Grade::B.is_core());
        assert!(!Grade::C.is_core());
        assert!(!Grade::X.is_core());
    }

    #[test]
    fn parse_accepts_both_cases() {
        assert_eq!("S".parse::<Grade>().unwrap(), Grade::S);
        assert_eq!("x".parse::<Grade>().unwrap(), Grade::X);
        assert_eq!(" b ".parse::<Grade>().unwrap(), Grade::B);
    }

    #[test]
    fn parse_rejects_out_of_enum_values() {
        let err = "D".parse::<Grade>().unwrap_err();
        assert!(matches!(err, PatlasError::InvalidGrade(v) if v == "D"));
        assert!("".parse::<Grade>().is_err());
        assert!("SA".parse::<Grade>().is_err());
    }

    #[test]
    fn severity_order() {
        assert!(Grade::S < Grade::A);
        assert!(Grade::A < Grade::B);
        assert!(Grade::C < Grade::X);
    }

    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&Grade::S).unwrap();
        assert_eq!(json, "\"S\"");
        let back: Grade = serde_json::from_str("\"X\"").unwrap();
        assert_eq!(back, Grade::X);
    }
}
