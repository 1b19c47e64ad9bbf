//! Category code parsing for the two-axis classification scheme.
//!
//! Codes follow the source system's convention: an axis digit (`1` =
//! technology field, `2` = implementation type) followed by one uppercase
//! letter for a major category ("1A") or two for a minor ("1AA", whose
//! major is "1A").
//!
//! Unlike provision-number schemes that need a normalised sort key, these
//! codes already sort lexicographically into taxonomy order: a major sorts
//! directly before its minors ("1A" < "1AA" < "1AB" < "1B"), and axis 1
//! sorts before axis 2. Plain string ordering is therefore used throughout.

use crate::error::{PatlasError, Result};
use crate::taxonomy::Axis;

/// Parsed form of a category code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeParts {
    pub axis: Axis,
    pub major: char,
    /// Second letter of a minor code; `None` for majors.
    pub minor: Option<char>,
}

impl CodeParts {
    pub fn is_major(&self) -> bool {
        self.minor.is_none()
    }
}

/// Parse a category code, failing with `UnknownCategory` on malformed input.
pub fn parse(code: &str) -> Result<CodeParts> {
    let malformed = || PatlasError::UnknownCategory(code.to_string());

    let bytes = code.as_bytes();
    let axis = match bytes.first() {
        Some(b'1') => Axis::TechnologyField,
        Some(b'2') => Axis::ImplementationType,
        _ => return Err(malformed()),
    };

    match bytes[1..] {
        [major] if major.is_ascii_uppercase() => Ok(CodeParts {
            axis,
            major: major as char,
            minor: None,
        }),
        [major, minor] if major.is_ascii_uppercase() && minor.is_ascii_uppercase() => {
            Ok(CodeParts {
                axis,
                major: major as char,
                minor: Some(minor as char),
            })
        }
        _ => Err(malformed()),
    }
}

/// Axis a code belongs to.
pub fn axis_of(code: &str) -> Result<Axis> {
    parse(code).map(|parts| parts.axis)
}

/// True when the code names a major category.
pub fn is_major(code: &str) -> bool {
    parse(code).map(|parts| parts.is_major()).unwrap_or(false)
}

/// Major category a minor code belongs to ("1AA" → "1A"); `None` for majors.
pub fn parent_code(code: &str) -> Option<String> {
    match parse(code) {
        Ok(parts) if !parts.is_major() => Some(code[..2].to_string()),
        _ => None,
    }
}
