//! Field rules applied on both sides of the network hop.
//!
//! Only the rules live here. The client and the server each run their own
//! check over them and phrase the outcome for their own audience.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::Field;

// U+FEFF is not Unicode `White_Space` but browsers treat it as blank.
const EMAIL_PATTERN: &str = r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$";

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Absent, not a string, or whitespace only.
    Missing,
    InvalidEmail,
}

fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Strips leading and trailing whitespace, byte order marks included.
pub fn trim_input(value: &str) -> &str {
    value.trim_matches(is_space)
}

pub fn is_blank(value: &str) -> bool {
    trim_input(value).is_empty()
}

/// `local@domain.tld` check on the trimmed value.
pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(trim_input(value))
}

/// Applies every rule for `field` to `value`; `None` means the field passes.
pub fn check_field(field: Field, value: Option<&str>) -> Option<Violation> {
    let value = match value {
        Some(value) if !is_blank(value) => value,
        _ => return Some(Violation::Missing),
    };
    if field == Field::Email && !is_valid_email(value) {
        return Some(Violation::InvalidEmail);
    }
    None
}

/// Fields, in declared order, that are absent or blank.
pub fn missing_fields<'a>(lookup: impl Fn(Field) -> Option<&'a str>) -> Vec<Field> {
    Field::ALL
        .into_iter()
        .filter(|field| check_field(*field, lookup(*field)) == Some(Violation::Missing))
        .collect()
}
