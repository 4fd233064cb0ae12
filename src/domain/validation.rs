//! Pure input helpers shared by the profile forms. None of these touch
//! the network; authoritative normalization happens server-side.

use crate::domain::errors::DomainError;

/// A full name needs at least a first and a last name.
pub fn validate_full_name(input: &str) -> Result<(), DomainError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidData("Full name is required".to_string()));
    }

    let tokens = trimmed.split_whitespace().count();
    if tokens < 2 {
        return Err(DomainError::InvalidData(
            "Enter both a first and last name".to_string(),
        ));
    }

    Ok(())
}

/// Trim and lowercase only; the server owns any further canonicalization.
pub fn normalize_email_input(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Initials shown on the fallback avatar badge when no picture is set.
pub fn display_initials(display_name: &str) -> String {
    display_name
        .split_whitespace()
        .take(2)
        .filter_map(|token| token.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}
