const SPACE: char = ' ';
const HYPHEN: char = '-';

pub fn normalize_iban(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch == SPACE || ch == HYPHEN {
            continue;
        }
        out.push(ch.to_ascii_uppercase());
    }
    out
}
