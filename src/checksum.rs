use crate::reference::{bban_matches, iban_length, is_recognized_country};
use crate::validation::{ErrorKind, ValidationError};

// One decimal digit at a time; letters expand to two digits (A=10 .. Z=35).
pub fn mod97<I>(chars: I) -> Result<u32, String>
where
    I: IntoIterator<Item = char>,
{
    let mut remainder: u32 = 0;
    for ch in chars {
        if let Some(d) = ch.to_digit(10) {
            remainder = (remainder * 10 + d) % 97;
        } else if ch.is_ascii_alphabetic() {
            let val = ch.to_ascii_uppercase() as u32 - 'A' as u32 + 10;
            remainder = (remainder * 10 + val / 10) % 97;
            remainder = (remainder * 10 + val % 10) % 97;
        } else {
            return Err(format!("IBAN contains invalid character '{}'", ch));
        }
    }
    Ok(remainder)
}

pub fn iban_remainder(iban: &str) -> Result<u32, String> {
    if iban.len() < 4 || !iban.is_char_boundary(4) {
        return Err("IBAN is too short".to_string());
    }
    let (head, rest) = iban.split_at(4);
    mod97(rest.chars().chain(head.chars()))
}

pub fn iban_check_digits(country: &str, bban: &str) -> Result<String, String> {
    if country.len() != 2 || !country.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err("IBAN country code must be 2 letters".to_string());
    }
    let remainder = mod97(bban.chars().chain(country.chars()).chain("00".chars()))?;
    let check = 98 - remainder;
    Ok(format!("{:02}", check))
}

// 00, 01 and 99 never come out of iban_check_digits; 99 would alias 02.
fn check_digits_in_range(digits: &str) -> bool {
    digits.len() == 2
        && digits.chars().all(|ch| ch.is_ascii_digit())
        && matches!(digits.parse::<u32>(), Ok(2..=98))
}

pub fn check_iban(iban: &str) -> Result<(), ValidationError> {
    let country = iban.get(0..2).unwrap_or_default();
    if !is_recognized_country(country) {
        return Err(ValidationError::new(
            ErrorKind::UnsupportedCountry,
            format!("Unsupported country code: {}", country),
        ));
    }

    let valid = Some(iban.len()) == iban_length(country)
        && check_digits_in_range(iban.get(2..4).unwrap_or_default())
        && bban_matches(country, iban.get(4..).unwrap_or_default())
        && matches!(iban_remainder(iban), Ok(1));
    if !valid {
        return Err(ValidationError::new(
            ErrorKind::InvalidChecksum,
            "Invalid IBAN (length, format or check digits wrong)",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_ibans_have_remainder_one() {
        for iban in [
            "DE89370400440532013000",
            "GB29NWBK60161331926819",
            "FR1420041010050500013M02606",
            "NL91ABNA0417164300",
            "NO9386011117947",
            "MT84MALT011000012345MTLCAST001S",
        ] {
            assert_eq!(iban_remainder(iban), Ok(1), "{iban}");
            assert!(check_iban(iban).is_ok(), "{iban}");
        }
    }

    #[test]
    fn long_numerals_do_not_overflow() {
        let iban = format!("LC55HEMM{}", "Z".repeat(24));
        assert!(iban_remainder(&iban).is_ok());
    }

    #[test]
    fn check_digits_match_reference() {
        assert_eq!(
            iban_check_digits("DE", "370400440532013000"),
            Ok("89".to_string())
        );
        assert_eq!(
            iban_check_digits("GB", "NWBK60161331926819"),
            Ok("29".to_string())
        );
        assert!(iban_check_digits("D1", "370400440532013000").is_err());
    }

    #[test]
    fn wrong_check_digits_fail() {
        let err = check_iban("DE00370400440532013000").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidChecksum);
    }

    #[test]
    fn check_digit_99_alias_fails() {
        // 99 and 02 leave the same remainder.
        assert_eq!(iban_remainder("DE99370400440000000024"), Ok(1));
        assert_eq!(iban_remainder("DE02370400440000000024"), Ok(1));
        assert!(check_iban("DE02370400440000000024").is_ok());
        assert_eq!(
            check_iban("DE99370400440000000024").unwrap_err().kind,
            ErrorKind::InvalidChecksum
        );
    }

    #[test]
    fn check_digit_range() {
        assert!(check_digits_in_range("02"));
        assert!(check_digits_in_range("98"));
        assert!(!check_digits_in_range("00"));
        assert!(!check_digits_in_range("01"));
        assert!(!check_digits_in_range("99"));
        assert!(!check_digits_in_range("AB"));
        assert!(!check_digits_in_range("+5"));
    }

    #[test]
    fn letters_in_numeric_bban_fail() {
        let bban = "ABCD00440532013000";
        let check = iban_check_digits("DE", bban).unwrap();
        let iban = format!("DE{}{}", check, bban);
        assert_eq!(iban, "DE86ABCD00440532013000");
        assert_eq!(iban_remainder(&iban), Ok(1));
        assert_eq!(check_iban(&iban).unwrap_err().kind, ErrorKind::InvalidChecksum);
    }

    #[test]
    fn wrong_country_length_fails_as_checksum() {
        let bban = "3704004405320130001";
        let check = iban_check_digits("DE", bban).unwrap();
        let iban = format!("DE{}{}", check, bban);
        assert_eq!(iban_remainder(&iban), Ok(1));
        assert_eq!(check_iban(&iban).unwrap_err().kind, ErrorKind::InvalidChecksum);
    }

    #[test]
    fn unknown_country_is_unsupported() {
        let err = check_iban("XX89370400440532013000").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedCountry);
        assert!(err.detail.contains("XX"));
    }

    #[test]
    fn unknown_country_stays_unsupported_with_matching_remainder() {
        let bban = "370400440532013000";
        let check = iban_check_digits("XX", bban).unwrap();
        let iban = format!("XX{}{}", check, bban);
        assert_eq!(iban_remainder(&iban), Ok(1));
        assert_eq!(
            check_iban(&iban).unwrap_err().kind,
            ErrorKind::UnsupportedCountry
        );
    }

    #[test]
    fn single_digit_changes_are_caught() {
        let iban = "DE89370400440532013000";
        for pos in 4..iban.len() {
            let mut bytes = iban.as_bytes().to_vec();
            bytes[pos] = if bytes[pos] == b'9' { b'0' } else { bytes[pos] + 1 };
            let altered = String::from_utf8(bytes).unwrap();
            assert!(check_iban(&altered).is_err(), "{altered}");
        }
    }
}
