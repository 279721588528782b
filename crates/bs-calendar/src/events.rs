//! Per-month event lists (holidays/festivals, marriage and bratabandha dates).
//!
//! Entries are stored as `"<dayToken>_::_<descriptions>"`, where the day token
//! is a Nepali numeral (`"१५"`), a run (`"२-४"`) or `"•"` for notes that apply
//! to the whole month.

use serde::Serialize;

use crate::error::CalendarError;
use crate::numerals::parse_number;

const SEPARATOR: &str = "_::_";
const MONTH_WIDE: &str = "•";

/// Which of the month's event lists an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    HolidayFestival,
    Marriage,
    Bratabandha,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::HolidayFestival,
        EventKind::Marriage,
        EventKind::Bratabandha,
    ];
}

/// The BS days an event entry applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventDays {
    Day(u32),
    /// Inclusive run of days.
    Range(u32, u32),
    MonthWide,
}

impl EventDays {
    pub fn covers(&self, day: u32) -> bool {
        match *self {
            EventDays::Day(d) => d == day,
            EventDays::Range(from, to) => (from..=to).contains(&day),
            EventDays::MonthWide => true,
        }
    }
}

/// One parsed event-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthEvent {
    pub days: EventDays,
    pub descriptions: Vec<String>,
}

impl MonthEvent {
    /// Parse a raw `"<dayToken>_::_<a, b, c>"` entry.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Parse`] if the separator is missing or the day
    /// token is neither a number, a run, nor the month-wide marker.
    pub fn parse(raw: &str) -> Result<Self, CalendarError> {
        let (token, text) = raw
            .split_once(SEPARATOR)
            .ok_or_else(|| CalendarError::Parse(format!("event entry without day token: '{raw}'")))?;
        let days = parse_day_token(token.trim())
            .ok_or_else(|| CalendarError::Parse(format!("unrecognized event day token: '{token}'")))?;
        let descriptions = text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        Ok(Self { days, descriptions })
    }
}

fn parse_day_token(token: &str) -> Option<EventDays> {
    if token == MONTH_WIDE {
        return Some(EventDays::MonthWide);
    }
    if let Some((from, to)) = token.split_once('-') {
        let (from, to) = (parse_number(from)?, parse_number(to)?);
        return (from <= to).then_some(EventDays::Range(from, to));
    }
    parse_number(token).map(EventDays::Day)
}
