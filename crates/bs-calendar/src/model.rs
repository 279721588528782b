//! Calendar data model: days, month metadata, month records and the public
//! date value types.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::events::{EventKind, MonthEvent};
use crate::label::{parse_month_label, AdSpan};
use crate::months::nepali_month_name;

// ── Keys ────────────────────────────────────────────────────────────────────

/// Composite `(year, month)` key of a BS month. Displays as `"2080/1"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidMonthToken(format!("'{s}': expected 'year/month'"));
        let (year, month) = s.split_once('/').ok_or_else(invalid)?;
        let year = year.trim().parse().map_err(|_| invalid())?;
        let month: u32 = month.trim().parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }
}

// ── Days ────────────────────────────────────────────────────────────────────

/// One day within a BS month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// Day of month in Nepali numerals, for display.
    pub nepali_numeral: String,
    /// Day of month as an integer; the lookup key.
    pub nepali_day_number: u32,
    /// Gregorian day of month (1..=31). Which Gregorian month it belongs to is
    /// only known in the context of the whole month, see [`crate::resolver`].
    pub english_day_of_month: u32,
    /// Tithi label, possibly empty.
    pub lunar_day: String,
    /// Festival/event text, possibly empty.
    pub event_text: String,
    pub is_holiday: bool,
    /// 1 = Sunday .. 7 = Saturday.
    pub weekday: u8,
}

impl CalendarDay {
    /// The stored weekday as a [`Weekday`], if it is within 1..=7.
    pub fn chrono_weekday(&self) -> Option<Weekday> {
        match self.weekday {
            1 => Some(Weekday::Sun),
            2 => Some(Weekday::Mon),
            3 => Some(Weekday::Tue),
            4 => Some(Weekday::Wed),
            5 => Some(Weekday::Thu),
            6 => Some(Weekday::Fri),
            7 => Some(Weekday::Sat),
            _ => None,
        }
    }
}

// ── Months ──────────────────────────────────────────────────────────────────

/// How a BS month lines up with the Gregorian calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthMetadata {
    /// Raw label such as `"Apr/May 2023"`.
    pub human_ad_label: String,
    /// Nepali label such as `"बैशाख २०८०"`.
    pub nepali_label: String,
    #[serde(flatten)]
    pub span: AdSpan,
}

impl MonthMetadata {
    /// Build metadata from the two source labels, deriving the AD span.
    pub fn from_labels(
        human_ad_label: impl Into<String>,
        nepali_label: impl Into<String>,
    ) -> Result<Self, CalendarError> {
        let human_ad_label = human_ad_label.into();
        let span = parse_month_label(&human_ad_label)?;
        Ok(Self {
            human_ad_label,
            nepali_label: nepali_label.into(),
            span,
        })
    }
}

/// Everything known about one BS year+month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BsMonthRecord {
    pub bs_year: i32,
    pub bs_month: u32,
    pub metadata: MonthMetadata,
    pub days: Vec<CalendarDay>,
    pub holidays_and_festivals: Vec<String>,
    pub marriage_dates: Vec<String>,
    pub bratabandha_dates: Vec<String>,
}

impl BsMonthRecord {
    pub fn key(&self) -> MonthKey {
        MonthKey::new(self.bs_year, self.bs_month)
    }

    pub fn days_in_month(&self) -> usize {
        self.days.len()
    }

    pub fn month_name(&self) -> &'static str {
        nepali_month_name(self.bs_month).unwrap_or("")
    }

    /// The day whose `nepali_day_number` equals `day`.
    pub fn day(&self, day: u32) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.nepali_day_number == day)
    }

    /// Days flagged as public holidays.
    pub fn holidays(&self) -> impl Iterator<Item = &CalendarDay> + '_ {
        self.days.iter().filter(|d| d.is_holiday)
    }

    /// Parsed entries of one of the month's free-text event lists. Entries that
    /// do not follow the `"<day>_::_<text>"` shape are dropped.
    pub fn events(&self, kind: EventKind) -> Vec<MonthEvent> {
        let list = match kind {
            EventKind::HolidayFestival => &self.holidays_and_festivals,
            EventKind::Marriage => &self.marriage_dates,
            EventKind::Bratabandha => &self.bratabandha_dates,
        };
        list.iter()
            .filter_map(|raw| match MonthEvent::parse(raw) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::debug!(month = %self.key(), error = %e, "skipping event entry");
                    None
                }
            })
            .collect()
    }

    /// Every event from all three lists that applies to BS `day`, including
    /// month-wide notes.
    pub fn events_on(&self, day: u32) -> Vec<(EventKind, MonthEvent)> {
        EventKind::ALL
            .iter()
            .flat_map(|&kind| {
                self.events(kind)
                    .into_iter()
                    .filter(move |e| e.days.covers(day))
                    .map(move |e| (kind, e))
            })
            .collect()
    }
}

// ── Public date values ──────────────────────────────────────────────────────

/// A Bikram Sambat date. `month_name` and `day_of_week` are filled in by the
/// converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NepaliDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<String>,
}

impl NepaliDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            month_name: None,
            day_of_week: None,
        }
    }

    /// The bare `(year, month, day)` triple.
    pub fn ymd(&self) -> (i32, u32, u32) {
        (self.year, self.month, self.day)
    }
}

/// A Gregorian date. `month_name` and `day_of_week` are filled in by the
/// converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GregorianDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<String>,
}

impl GregorianDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            month_name: None,
            day_of_week: None,
        }
    }

    pub fn ymd(&self) -> (i32, u32, u32) {
        (self.year, self.month, self.day)
    }
}
