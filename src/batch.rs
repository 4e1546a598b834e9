use crate::validation::{ErrorKind, ValidationOutcome, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
struct BatchInput {
    #[serde(default)]
    iban: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchRow {
    pub iban_input: String,
    pub valid: bool,
    pub error_kind: String,
    pub error_message: String,
    pub iban: String,
    pub country_code: String,
    pub check_digits: String,
    pub bank_code: String,
    pub account_number: String,
    pub bank_name: String,
    pub bank_bic: String,
}

impl BatchRow {
    fn from_outcome(input: &str, outcome: &ValidationOutcome) -> Self {
        match outcome {
            ValidationOutcome::Valid(valid) => {
                let (bank_name, bank_bic) = match &valid.bank {
                    Some(bank) => (bank.name.clone(), bank.bic.clone()),
                    None => (String::new(), String::new()),
                };
                Self {
                    iban_input: input.to_string(),
                    valid: true,
                    iban: valid.iban.clone(),
                    country_code: valid.country_code.clone(),
                    check_digits: valid.check_digits.clone(),
                    bank_code: valid.bank_code.clone(),
                    account_number: valid.account_number.clone(),
                    bank_name,
                    bank_bic,
                    ..Self::default()
                }
            }
            ValidationOutcome::Invalid(err) => Self {
                iban_input: input.to_string(),
                valid: false,
                error_kind: err.kind.as_str().to_string(),
                error_message: err.detail.clone(),
                ..Self::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub with_bank: usize,
    pub by_error: BTreeMap<ErrorKind, usize>,
}

impl BatchSummary {
    fn record(&mut self, outcome: &ValidationOutcome) {
        self.total += 1;
        match outcome {
            ValidationOutcome::Valid(valid) => {
                self.valid += 1;
                if valid.bank.is_some() {
                    self.with_bank += 1;
                }
            }
            ValidationOutcome::Invalid(err) => {
                self.invalid += 1;
                *self.by_error.entry(err.kind).or_insert(0) += 1;
            }
        }
    }
}

pub fn validate_csv(
    input: &Path,
    output: &Path,
    validator: &Validator<'_>,
) -> Result<BatchSummary, String> {
    let mut reader = csv::Reader::from_path(input).map_err(|err| err.to_string())?;
    let headers = reader.headers().map_err(|err| err.to_string())?;
    if !headers.iter().any(|header| header == "iban") {
        return Err(format!("{} has no iban column", input.display()));
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|err| err.to_string())?;
        }
    }
    let mut writer = csv::Writer::from_path(output).map_err(|err| err.to_string())?;
    let mut summary = BatchSummary::default();

    for result in reader.deserialize() {
        let row: BatchInput = result.map_err(|err| err.to_string())?;
        let outcome = validator.validate(row.iban.as_deref());
        summary.record(&outcome);
        let out = BatchRow::from_outcome(row.iban.as_deref().unwrap_or_default(), &outcome);
        writer.serialize(out).map_err(|err| err.to_string())?;
    }
    writer.flush().map_err(|err| err.to_string())?;

    log::debug!(
        "Batch {}: total={} valid={} invalid={}",
        input.display(),
        summary.total,
        summary.valid,
        summary.invalid
    );
    Ok(summary)
}
