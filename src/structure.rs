use crate::validation::{ErrorKind, ValidationError};

pub const MIN_IBAN_LENGTH: usize = 15;
pub const MAX_IBAN_LENGTH: usize = 34;

pub fn check_structure(iban: &str) -> Result<(), ValidationError> {
    if iban.is_empty() {
        return Err(ValidationError::new(
            ErrorKind::Required,
            "IBAN is required",
        ));
    }

    let len = iban.chars().count();
    if len < MIN_IBAN_LENGTH {
        return Err(ValidationError::new(
            ErrorKind::TooShort,
            format!("IBAN is too short (minimum {} characters)", MIN_IBAN_LENGTH),
        ));
    }
    if len > MAX_IBAN_LENGTH {
        return Err(ValidationError::new(
            ErrorKind::TooLong,
            format!("IBAN is too long (maximum {} characters)", MAX_IBAN_LENGTH),
        ));
    }

    if !iban
        .chars()
        .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit())
    {
        return Err(ValidationError::new(
            ErrorKind::InvalidCharacters,
            "IBAN contains invalid characters",
        ));
    }

    Ok(())
}
