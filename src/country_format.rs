// Offsets into the full IBAN, 0-based and end-exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryFormat {
    pub code: &'static str,
    pub bank_code_start: usize,
    pub bank_code_end: usize,
    pub account_number_start: usize,
}

impl CountryFormat {
    const fn new(
        code: &'static str,
        bank_code_start: usize,
        bank_code_end: usize,
        account_number_start: usize,
    ) -> Self {
        Self {
            code,
            bank_code_start,
            bank_code_end,
            account_number_start,
        }
    }

    pub fn bank_code_len(&self) -> usize {
        self.bank_code_end.saturating_sub(self.bank_code_start)
    }
}

pub const DEFAULT_FORMAT: CountryFormat = CountryFormat::new("DEFAULT", 4, 8, 8);

// GB only covers the 4-letter bank code and the first two sort code digits.
// The full UK bank identifier would end at offset 14.
pub const COUNTRY_FORMATS: &[CountryFormat] = &[
    CountryFormat::new("DE", 4, 12, 12),
    CountryFormat::new("AT", 4, 9, 9),
    CountryFormat::new("CH", 4, 9, 9),
    CountryFormat::new("GB", 4, 10, 10),
    CountryFormat::new("FR", 4, 9, 9),
    CountryFormat::new("NL", 4, 8, 8),
    CountryFormat::new("BE", 4, 7, 7),
    CountryFormat::new("ES", 4, 12, 12),
    CountryFormat::new("IT", 5, 10, 15),
];

pub fn get_format(country: &str) -> &'static CountryFormat {
    COUNTRY_FORMATS
        .iter()
        .find(|format| format.code == country)
        .unwrap_or(&DEFAULT_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{iban_length, is_recognized_country};

    #[test]
    fn listed_country_is_found() {
        let format = get_format("IT");
        assert_eq!(format.bank_code_start, 5);
        assert_eq!(format.bank_code_end, 10);
        assert_eq!(format.account_number_start, 15);
        assert_ne!(*format, DEFAULT_FORMAT);
    }

    #[test]
    fn unlisted_country_falls_back_to_default() {
        let format = get_format("NO");
        assert_eq!(*format, DEFAULT_FORMAT);
        assert_eq!(
            (format.bank_code_start, format.bank_code_end, format.account_number_start),
            (4, 8, 8)
        );
        assert_eq!(*get_format(""), DEFAULT_FORMAT);
        assert_eq!(*get_format("DEFAULT"), DEFAULT_FORMAT);
    }

    #[test]
    fn layouts_fit_their_country() {
        for format in COUNTRY_FORMATS {
            assert!(is_recognized_country(format.code), "{}", format.code);
            let len = iban_length(format.code).unwrap_or_default();
            assert!(format.bank_code_start >= 4);
            assert!(format.bank_code_start <= format.bank_code_end);
            assert!(format.account_number_start <= len, "{}", format.code);
        }
    }

    #[test]
    fn gb_layout_is_six_characters() {
        assert_eq!(get_format("GB").bank_code_len(), 6);
    }
}
