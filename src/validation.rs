use crate::bank::{BankLookup, BankRecord};
use crate::checksum::check_iban;
use crate::extract::extract_fields;
use crate::normalize::normalize_iban;
use crate::structure::check_structure;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    Required,
    TooShort,
    TooLong,
    InvalidCharacters,
    UnsupportedCountry,
    InvalidChecksum,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 6] = [
        ErrorKind::Required,
        ErrorKind::TooShort,
        ErrorKind::TooLong,
        ErrorKind::InvalidCharacters,
        ErrorKind::UnsupportedCountry,
        ErrorKind::InvalidChecksum,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Required => "REQUIRED",
            ErrorKind::TooShort => "TOO_SHORT",
            ErrorKind::TooLong => "TOO_LONG",
            ErrorKind::InvalidCharacters => "INVALID_CHARACTERS",
            ErrorKind::UnsupportedCountry => "UNSUPPORTED_COUNTRY",
            ErrorKind::InvalidChecksum => "INVALID_CHECKSUM",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub detail: String,
}

impl ValidationError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidIban {
    pub iban: String,
    pub country_code: String,
    pub check_digits: String,
    pub bank_code: String,
    pub account_number: String,
    pub bank: Option<BankRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid(ValidIban),
    Invalid(ValidationError),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            ValidationOutcome::Invalid(err) => Some(err.kind),
            ValidationOutcome::Valid(_) => None,
        }
    }

    pub fn to_response(&self) -> ValidationResponse {
        match self {
            ValidationOutcome::Valid(valid) => ValidationResponse {
                valid: true,
                iban: Some(valid.iban.clone()),
                country_code: Some(valid.country_code.clone()),
                check_digits: Some(valid.check_digits.clone()),
                bank_code: Some(valid.bank_code.clone()),
                account_number: Some(valid.account_number.clone()),
                bank: valid.bank.clone(),
                ..ValidationResponse::default()
            },
            ValidationOutcome::Invalid(err) => ValidationResponse {
                valid: false,
                error_kind: Some(err.kind.as_str()),
                error_message: Some(err.detail.clone()),
                ..ValidationResponse::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_digits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<BankRecord>,
}

#[derive(Clone, Copy, Default)]
pub struct Validator<'a> {
    banks: Option<&'a dyn BankLookup>,
}

impl<'a> Validator<'a> {
    pub fn new() -> Self {
        Self { banks: None }
    }

    pub fn with_banks(banks: &'a dyn BankLookup) -> Self {
        Self { banks: Some(banks) }
    }

    pub fn validate(&self, input: Option<&str>) -> ValidationOutcome {
        match self.run(input) {
            Ok(valid) => ValidationOutcome::Valid(valid),
            Err(err) => {
                log::debug!("IBAN rejected: {}", err);
                ValidationOutcome::Invalid(err)
            }
        }
    }

    fn run(&self, input: Option<&str>) -> Result<ValidIban, ValidationError> {
        let raw = match input {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Err(ValidationError::new(ErrorKind::Required, "IBAN is required")),
        };

        let iban = normalize_iban(raw);
        check_structure(&iban)?;
        check_iban(&iban)?;

        let fields = extract_fields(&iban);
        let bank = self.lookup(&fields.bank_code, &fields.country_code);

        Ok(ValidIban {
            iban,
            country_code: fields.country_code,
            check_digits: fields.check_digits,
            bank_code: fields.bank_code,
            account_number: fields.account_number,
            bank,
        })
    }

    fn lookup(&self, bank_code: &str, country_code: &str) -> Option<BankRecord> {
        let banks = self.banks?;
        match banks.find(bank_code, country_code) {
            Ok(found) => found,
            Err(err) => {
                log::warn!(
                    "Bank lookup failed for {} / {}: {}",
                    country_code,
                    bank_code,
                    err
                );
                None
            }
        }
    }
}

/// Validates without a bank registry.
pub fn validate(input: Option<&str>) -> ValidationOutcome {
    Validator::new().validate(input)
}
