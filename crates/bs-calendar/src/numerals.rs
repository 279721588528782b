//! Devanagari digit handling.
//!
//! Source data writes BS day numbers in Nepali numerals (`"१५"`) and sometimes
//! leaves stray whitespace around AD day numbers. These helpers normalize both
//! into plain integers.

const NEPALI_DIGITS: [char; 10] = ['०', '१', '२', '३', '४', '५', '६', '७', '८', '९'];

/// Replace every Devanagari digit with its ASCII counterpart. Other characters
/// pass through untouched.
pub fn to_ascii_digits(s: &str) -> String {
    s.chars()
        .map(|ch| match NEPALI_DIGITS.iter().position(|&d| d == ch) {
            Some(i) => char::from(b'0' + i as u8),
            None => ch,
        })
        .collect()
}

/// Render a number in Nepali numerals, e.g. `2080` → `"२०८०"`.
pub fn to_nepali_digits(n: u32) -> String {
    n.to_string()
        .bytes()
        .map(|b| NEPALI_DIGITS[(b - b'0') as usize])
        .collect()
}

/// Parse a day-of-month token written in either numeral system.
///
/// Returns `None` for empty input or anything other than digits.
pub fn parse_number(s: &str) -> Option<u32> {
    let ascii = to_ascii_digits(s.trim());
    if ascii.is_empty() || !ascii.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    ascii.parse().ok()
}
