//! Error types for bs-calendar operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error(
        "Data for BS {year}/{month} not found. Available years in data: {}",
        format_years(.available_years)
    )]
    NotFound {
        year: i32,
        month: u32,
        available_years: Vec<i32>,
    },

    #[error(
        "Invalid day {day} for BS {} {year}. This month has {days_in_month} days.",
        month_label(.month)
    )]
    InvalidDay {
        year: i32,
        month: u32,
        day: u32,
        days_in_month: usize,
    },

    #[error(
        "BS date for AD {day}/{month}/{year} not found. Available BS years in loaded data: {}",
        format_years(.available_years)
    )]
    NoReverseMatch {
        year: i32,
        month: u32,
        day: u32,
        available_years: Vec<i32>,
    },

    #[error(
        "Data for BS year {year} not found. Available years in data: {}",
        format_years(.available_years)
    )]
    YearNotFound { year: i32, available_years: Vec<i32> },

    #[error("Malformed month label: {0}")]
    MalformedLabel(String),

    #[error("Malformed day sequence in BS {year}/{month}: {reason}")]
    MalformedDaySequence {
        year: i32,
        month: u32,
        reason: String,
    },

    #[error("Invalid month token: {0}")]
    InvalidMonthToken(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, CalendarError>;

fn month_label(month: &u32) -> &'static str {
    crate::months::nepali_month_name(*month).unwrap_or("?")
}

fn format_years(years: &[i32]) -> String {
    if years.is_empty() {
        return "None loaded".to_string();
    }
    years
        .iter()
        .map(|y| y.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
