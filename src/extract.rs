use crate::country_format::{get_format, CountryFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IbanFields {
    pub country_code: String,
    pub check_digits: String,
    pub bank_code: String,
    pub account_number: String,
}

pub fn extract_fields(iban: &str) -> IbanFields {
    let country_code = slice(iban, 0, 2);
    let format = get_format(&country_code);
    extract_with_format(iban, &country_code, format)
}

pub fn extract_with_format(iban: &str, country_code: &str, format: &CountryFormat) -> IbanFields {
    IbanFields {
        country_code: country_code.to_string(),
        check_digits: slice(iban, 2, 4),
        bank_code: slice(iban, format.bank_code_start, format.bank_code_end),
        account_number: iban
            .get(format.account_number_start..)
            .unwrap_or_default()
            .to_string(),
    }
}

// Out-of-range slices yield an empty string.
fn slice(iban: &str, start: usize, end: usize) -> String {
    iban.get(start..end).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country_format::DEFAULT_FORMAT;

    #[test]
    fn german_reference_iban() {
        let fields = extract_fields("DE89370400440532013000");
        assert_eq!(fields.country_code, "DE");
        assert_eq!(fields.check_digits, "89");
        assert_eq!(fields.bank_code, "37040044");
        assert_eq!(fields.account_number, "0532013000");
    }

    #[test]
    fn gb_uses_literal_boundaries() {
        let fields = extract_fields("GB29NWBK60161331926819");
        assert_eq!(fields.bank_code, "NWBK60");
        assert_eq!(fields.account_number, "161331926819");
    }

    #[test]
    fn italy_skips_cin() {
        let fields = extract_fields("IT60X0542811101000000123456");
        assert_eq!(fields.bank_code, "05428");
        assert_eq!(fields.account_number, "000000123456");
    }

    #[test]
    fn unlisted_country_uses_default() {
        let fields = extract_fields("NO9386011117947");
        assert_eq!(fields.country_code, "NO");
        assert_eq!(fields.bank_code, "8601");
        assert_eq!(fields.account_number, "1117947");
    }

    #[test]
    fn short_input_yields_empty_fields() {
        let format = CountryFormat {
            code: "ZZ",
            bank_code_start: 4,
            bank_code_end: 40,
            account_number_start: 50,
        };
        let fields = extract_with_format("DE89370400440532013000", "DE", &format);
        assert_eq!(fields.bank_code, "");
        assert_eq!(fields.account_number, "");

        let fields = extract_with_format("DE8", "DE", &DEFAULT_FORMAT);
        assert_eq!(fields.check_digits, "");
        assert_eq!(fields.bank_code, "");
        assert_eq!(fields.account_number, "");
    }
}
