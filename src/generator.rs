use crate::checksum::iban_check_digits;
use crate::country_format::get_format;
use crate::reference::{bban_classes, CharClass};
use crate::util::{random_alphanum_upper, random_digits, random_upper_letters};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct GeneratorConfig {
    pub country: String,
    pub count: usize,
    pub bank_code: Option<String>,
}

pub fn generate_ibans(config: &GeneratorConfig, seed: u64) -> Result<Vec<String>, String> {
    let country = config.country.trim().to_uppercase();
    let classes = bban_classes(&country)
        .ok_or_else(|| format!("country {} does not issue IBANs", country))?;

    let bank_code = match config.bank_code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => Some(check_bank_code(&country, &classes, code)?),
        _ => None,
    };

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(config.count);
    for _ in 0..config.count {
        let mut bban = random_bban(&mut rng, &classes);
        if let Some(code) = &bank_code {
            let start = get_format(&country).bank_code_start - 4;
            bban.replace_range(start..start + code.len(), code);
        }
        let check = iban_check_digits(&country, &bban)?;
        out.push(format!("{}{}{}", country, check, bban));
    }
    Ok(out)
}

// The code must fill the country's bank field exactly and match the BBAN
// character classes at those positions.
fn check_bank_code(country: &str, classes: &[CharClass], code: &str) -> Result<String, String> {
    let code = code.to_uppercase();
    let format = get_format(country);
    if code.chars().count() != format.bank_code_len() {
        return Err(format!(
            "bank code {} must be {} characters for {}",
            code,
            format.bank_code_len(),
            country
        ));
    }
    let start = format.bank_code_start - 4;
    let fits = classes
        .get(start..start + format.bank_code_len())
        .map(|slots| {
            code.chars()
                .zip(slots.iter())
                .all(|(ch, class)| class.accepts(ch))
        })
        .unwrap_or(false);
    if !fits {
        return Err(format!(
            "bank code {} does not match the {} account format",
            code, country
        ));
    }
    Ok(code)
}

fn random_bban<R: Rng + ?Sized>(rng: &mut R, classes: &[CharClass]) -> String {
    let mut out = String::with_capacity(classes.len());
    for class in classes {
        let chunk = match class {
            CharClass::Digit => random_digits(rng, 1),
            CharClass::Letter => random_upper_letters(rng, 1),
            CharClass::Alphanumeric => random_alphanum_upper(rng, 1),
        };
        out.push_str(&chunk);
    }
    out
}
