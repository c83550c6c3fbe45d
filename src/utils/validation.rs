// src/utils/validation.rs

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// Course execution acronyms: letters, digits and dashes, e.g. "ES-2023".
static ACRONYM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*$").expect("valid acronym regex"));

/// Rejects strings made only of whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("must_not_be_blank"));
    }
    Ok(())
}

pub fn validate_acronym(value: &str) -> Result<(), ValidationError> {
    if !ACRONYM_RE.is_match(value) {
        return Err(ValidationError::new("invalid_acronym"));
    }
    Ok(())
}
