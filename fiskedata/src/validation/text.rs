//! Whitelist and numeric-string validators

use once_cell::sync::Lazy;
use regex::Regex;

static TEXT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9 .,?!/]+$").unwrap());

static PASSWORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[a-zA-Z0-9 .,?!@#$%^&*()_+\-=:\[\]{};'"\\|<>/~`]+$"#).unwrap()
});

static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").unwrap());

static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());

/// Free text: ASCII letters, digits, space and `.,?!/`
pub fn validate_text(input: &str) -> bool {
    TEXT_PATTERN.is_match(input)
}

/// Passwords: the text whitelist plus common punctuation and symbols
pub fn validate_password(input: &str) -> bool {
    PASSWORD_PATTERN.is_match(input)
}

/// Decimal number with optional sign and optional fractional part
pub fn validate_number(input: &str) -> bool {
    NUMBER_PATTERN.is_match(input)
}

/// Whole number with optional sign (leading zeroes allowed)
pub fn validate_integer(input: &str) -> bool {
    INTEGER_PATTERN.is_match(input)
}
