use serde::{Deserialize, Serialize};
use std::path::Path;

pub const BANK_NAME_MIN_LENGTH: usize = 2;
pub const BANK_NAME_MAX_LENGTH: usize = 200;
pub const BIC_MIN_LENGTH: usize = 8;
pub const BIC_MAX_LENGTH: usize = 11;
pub const BANK_CODE_MIN_LENGTH: usize = 4;
pub const BANK_CODE_MAX_LENGTH: usize = 20;
pub const COUNTRY_CODE_LENGTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankRecord {
    pub name: String,
    pub bic: String,
    pub bank_code: String,
    pub country_code: String,
}

impl BankRecord {
    pub fn new(name: &str, bic: &str, bank_code: &str, country_code: &str) -> Self {
        Self {
            name: name.to_string(),
            bic: bic.to_string(),
            bank_code: bank_code.to_string(),
            country_code: country_code.to_string(),
        }
    }

    pub fn check(&self) -> Result<(), String> {
        check_length("name", &self.name, BANK_NAME_MIN_LENGTH, BANK_NAME_MAX_LENGTH)?;
        check_length("bic", &self.bic, BIC_MIN_LENGTH, BIC_MAX_LENGTH)?;
        check_length(
            "bankCode",
            &self.bank_code,
            BANK_CODE_MIN_LENGTH,
            BANK_CODE_MAX_LENGTH,
        )?;
        check_length(
            "countryCode",
            &self.country_code,
            COUNTRY_CODE_LENGTH,
            COUNTRY_CODE_LENGTH,
        )
    }
}

fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    let len = value.chars().count();
    if len < min || len > max {
        if min == max {
            return Err(format!("{} must be exactly {} characters", field, min));
        }
        return Err(format!(
            "{} must be between {} and {} characters",
            field, min, max
        ));
    }
    Ok(())
}

/// Read-only bank lookup used while validating. An `Err` means the source
/// could not be queried; callers treat it like a miss.
pub trait BankLookup {
    fn find(&self, bank_code: &str, country_code: &str) -> Result<Option<BankRecord>, String>;
}

#[derive(Debug, Clone, Default)]
pub struct BankRegistry {
    records: Vec<BankRecord>,
}

impl BankRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for record in default_banks() {
            if let Err(err) = registry.insert(record) {
                log::warn!("Skipping seed bank: {}", err);
            }
        }
        registry
    }

    pub fn insert(&mut self, record: BankRecord) -> Result<(), String> {
        record.check()?;
        if self.find_by_bic(&record.bic).is_some() {
            return Err(format!("BIC {} already exists", record.bic));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn load_csv(&mut self, path: &Path) -> Result<usize, String> {
        let mut reader = csv::Reader::from_path(path).map_err(|err| err.to_string())?;
        let mut added = 0usize;
        for (idx, result) in reader.deserialize().enumerate() {
            let record: BankRecord = result.map_err(|err| err.to_string())?;
            self.insert(record)
                .map_err(|err| format!("{} row {}: {}", path.display(), idx + 1, err))?;
            added += 1;
        }
        log::debug!("Loaded {} bank(s) from {}", added, path.display());
        Ok(added)
    }

    pub fn find_by_bic(&self, bic: &str) -> Option<&BankRecord> {
        self.records
            .iter()
            .find(|record| record.bic.eq_ignore_ascii_case(bic))
    }

    pub fn by_country(&self, country_code: &str) -> Vec<&BankRecord> {
        self.records
            .iter()
            .filter(|record| record.country_code.eq_ignore_ascii_case(country_code))
            .collect()
    }

    pub fn search_by_name(&self, needle: &str) -> Vec<&BankRecord> {
        let needle = needle.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn all(&self) -> &[BankRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl BankLookup for BankRegistry {
    fn find(&self, bank_code: &str, country_code: &str) -> Result<Option<BankRecord>, String> {
        Ok(self
            .records
            .iter()
            .find(|record| record.bank_code == bank_code && record.country_code == country_code)
            .cloned())
    }
}

pub fn default_banks() -> Vec<BankRecord> {
    vec![
        BankRecord::new("Deutsche Bank AG", "DEUTDEFFXXX", "10070000", "DE"),
        BankRecord::new("Commerzbank AG", "COBADEFFXXX", "37040044", "DE"),
        BankRecord::new("DZ Bank AG", "GENODEFFXXX", "50060400", "DE"),
        BankRecord::new("Sparkasse KölnBonn", "COLSDE33XXX", "37050299", "DE"),
        BankRecord::new("Postbank", "PBNKDEFFXXX", "10010010", "DE"),
        BankRecord::new("ING-DiBa", "INGDDEFFXXX", "50010517", "DE"),
        BankRecord::new("Barclays Bank", "BARCGB22XXX", "202053", "GB"),
        BankRecord::new("HSBC Bank", "MIDLGB22XXX", "400530", "GB"),
        BankRecord::new("Lloyds Bank", "LOYDGB21XXX", "309634", "GB"),
        BankRecord::new("NatWest Bank", "NWBKGB2LXXX", "601613", "GB"),
        BankRecord::new("BNP Paribas", "BNPAFRPPXXX", "20041", "FR"),
        BankRecord::new("Crédit Agricole", "AGRIFRPPXXX", "12006", "FR"),
        BankRecord::new("Société Générale", "SOGEFRPPXXX", "30003", "FR"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_seeded() {
        let registry = BankRegistry::with_defaults();
        assert_eq!(registry.len(), default_banks().len());
        assert_eq!(registry.by_country("DE").len(), 6);
        assert_eq!(registry.by_country("gb").len(), 4);
    }

    #[test]
    fn find_matches_code_and_country() {
        let registry = BankRegistry::with_defaults();
        let bank = registry.find("37040044", "DE").unwrap().unwrap();
        assert_eq!(bank.name, "Commerzbank AG");
        assert_eq!(registry.find("37040044", "AT"), Ok(None));
        assert_eq!(registry.find("99999999", "DE"), Ok(None));
    }

    #[test]
    fn duplicate_bic_is_rejected() {
        let mut registry = BankRegistry::with_defaults();
        let err = registry
            .insert(BankRecord::new("Copy", "cobadeffxxx", "12345678", "DE"))
            .unwrap_err();
        assert!(err.contains("already exists"));
    }

    #[test]
    fn record_checks() {
        assert!(BankRecord::new("Bank", "ABCDEFGH", "1234", "DE").check().is_ok());
        assert!(BankRecord::new("B", "ABCDEFGH", "1234", "DE").check().is_err());
        assert!(BankRecord::new("Bank", "ABC", "1234", "DE").check().is_err());
        assert!(BankRecord::new("Bank", "ABCDEFGH", "12", "DE").check().is_err());
        assert!(BankRecord::new("Bank", "ABCDEFGH", "1234", "DEU").check().is_err());
        assert!(BankRecord::new("  ", "ABCDEFGH", "1234", "DE").check().is_err());
    }

    #[test]
    fn search_is_case_insensitive() {
        let registry = BankRegistry::with_defaults();
        let found = registry.search_by_name("bank ag");
        let names: Vec<&str> = found.iter().map(|record| record.name.as_str()).collect();
        assert_eq!(names, vec!["Deutsche Bank AG", "Commerzbank AG", "DZ Bank AG"]);
        assert!(registry.search_by_name("nothing here").is_empty());
    }

    #[test]
    fn loads_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,bic,bankCode,countryCode").unwrap();
        writeln!(file, "Erste Bank,GIBAATWWXXX,20111,AT").unwrap();
        writeln!(file, "UBS Switzerland,UBSWCHZH80A,00230,CH").unwrap();
        file.flush().unwrap();

        let mut registry = BankRegistry::new();
        assert_eq!(registry.load_csv(file.path()), Ok(2));
        assert_eq!(
            registry.find("20111", "AT").unwrap().map(|bank| bank.bic),
            Some("GIBAATWWXXX".to_string())
        );
    }

    #[test]
    fn csv_row_errors_name_the_row() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,bic,bankCode,countryCode").unwrap();
        writeln!(file, "Erste Bank,GIBAATWWXXX,20111,AT").unwrap();
        writeln!(file, "Erste Again,GIBAATWWXXX,20112,AT").unwrap();
        file.flush().unwrap();

        let mut registry = BankRegistry::new();
        let err = registry.load_csv(file.path()).unwrap_err();
        assert!(err.contains("row 2"), "{err}");
    }
}
