//! Month and weekday name tables.

use chrono::Weekday;

/// Romanized Bikram Sambat month names, Baishakh (1) through Chaitra (12).
pub const NEPALI_MONTHS: [&str; 12] = [
    "Baishakh", "Jestha", "Ashadh", "Shrawan", "Bhadra", "Ashwin", "Kartik", "Mangsir", "Poush",
    "Magh", "Falgun", "Chaitra",
];

/// Gregorian month names, January (1) through December (12).
pub const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Name of a 1-based BS month, or `None` outside 1..=12.
pub fn nepali_month_name(month: u32) -> Option<&'static str> {
    month_index(month).map(|i| NEPALI_MONTHS[i])
}

/// Name of a 1-based Gregorian month, or `None` outside 1..=12.
pub fn english_month_name(month: u32) -> Option<&'static str> {
    month_index(month).map(|i| ENGLISH_MONTHS[i])
}

/// Map a three-letter English month abbreviation ("Jan", "sep") to 1..=12.
pub fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    let abbrev = abbrev.trim();
    if abbrev.len() != 3 {
        return None;
    }
    ENGLISH_MONTHS
        .iter()
        .position(|name| name[..3].eq_ignore_ascii_case(abbrev))
        .map(|i| i as u32 + 1)
}

/// Full English weekday name, e.g. "Friday".
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn month_index(month: u32) -> Option<usize> {
    (1..=12).contains(&month).then(|| month as usize - 1)
}
