//! The calendar store: every loaded BS month, keyed by `(year, month)`.
//!
//! A store is built once from a [`CalendarSource`] and is immutable
//! afterwards. Loading never fails as a whole: a unit that cannot be read or
//! normalized is logged and skipped, and a missing source yields an empty
//! store. Partial coverage is the normal state of the data.
//!
//! [`SharedStore`] memoizes a single load for the lifetime of the process.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::config::StoreConfig;
use crate::error::CalendarError;
use crate::model::{BsMonthRecord, MonthKey};
use crate::resolver;
use crate::source::{CalendarSource, SourceUnit};

/// Day counts used by [`CalendarStore::days_in_month`] for years without data.
///
/// Only meant to keep day pickers usable; never used for conversion.
const FALLBACK_DAYS: [(i32, [u32; 12]); 4] = [
    (2076, [31, 32, 31, 32, 31, 30, 29, 30, 29, 30, 29, 30]),
    (2080, [31, 32, 31, 32, 31, 30, 29, 30, 29, 30, 29, 30]),
    (2081, [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 30]),
    (2082, [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 30]),
];

/// Day count for a BS month when no data is loaded for it.
///
/// Uses a small per-year table, then a generic rule: months 2 and 4 have 32
/// days, months 1, 3, 5, 7 and 8 have 31, everything else 30.
pub fn fallback_days_in_month(year: i32, month: u32) -> u32 {
    let known = FALLBACK_DAYS
        .iter()
        .find(|(y, _)| *y == year)
        .and_then(|(_, days)| days.get((month as usize).checked_sub(1)?).copied());
    if let Some(days) = known {
        return days;
    }
    match month {
        2 | 4 => 32,
        1 | 3 | 5 | 7 | 8 => 31,
        _ => 30,
    }
}

/// All loaded month records, in source-loading order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarStore {
    months: IndexMap<MonthKey, BsMonthRecord>,
}

impl CalendarStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every unit `source` offers.
    ///
    /// Units whose month token is not an integer in 1..=12, that cannot be
    /// read, whose label is malformed, or whose day sequence is inconsistent
    /// are skipped with a warning.
    pub fn load(source: &impl CalendarSource) -> Self {
        let units = match source.units() {
            Ok(units) => units,
            Err(e) => {
                tracing::warn!(error = %e, "cannot enumerate calendar source, calendar will be empty");
                return Self::new();
            }
        };

        let mut store = Self::new();
        for unit in &units {
            match load_unit(source, unit) {
                Ok(record) => store.insert(record),
                Err(e) => tracing::warn!(
                    year = unit.year,
                    month = %unit.month_token,
                    error = %e,
                    "skipping calendar month"
                ),
            }
        }
        tracing::debug!(
            months = store.len(),
            units = units.len(),
            years = ?store.years(),
            "calendar store loaded"
        );
        store
    }

    /// Load from the directory named by `config`.
    pub fn load_dir(config: &StoreConfig) -> Self {
        Self::load(&config.source())
    }

    /// Build a store from already-normalized records, in the given order.
    /// Records are inserted as given, without validation.
    pub fn from_records(records: impl IntoIterator<Item = BsMonthRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    fn insert(&mut self, record: BsMonthRecord) {
        let key = record.key();
        if self.months.insert(key, record).is_some() {
            tracing::warn!(month = %key, "duplicate calendar month, keeping the later record");
        }
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Exact lookup of one BS month.
    pub fn month(&self, year: i32, month: u32) -> Option<&BsMonthRecord> {
        self.months.get(&MonthKey::new(year, month))
    }

    /// Lookup by the `"year/month"` string form used by API consumers.
    pub fn month_by_key(&self, key: &str) -> Option<&BsMonthRecord> {
        let key: MonthKey = key.parse().ok()?;
        self.months.get(&key)
    }

    /// Month keys in loading order.
    pub fn keys(&self) -> impl Iterator<Item = MonthKey> + '_ {
        self.months.keys().copied()
    }

    /// Month records in loading order.
    pub fn records(&self) -> impl Iterator<Item = &BsMonthRecord> + '_ {
        self.months.values()
    }

    /// Distinct BS years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.months
            .keys()
            .map(|k| k.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// All loaded months of `year`, ordered Baishakh to Chaitra.
    ///
    /// # Errors
    ///
    /// [`CalendarError::YearNotFound`] if no month of `year` is loaded.
    pub fn year(&self, year: i32) -> Result<Vec<&BsMonthRecord>, CalendarError> {
        let months: Vec<&BsMonthRecord> = (1..=12).filter_map(|m| self.month(year, m)).collect();
        if months.is_empty() {
            return Err(CalendarError::YearNotFound {
                year,
                available_years: self.years(),
            });
        }
        Ok(months)
    }

    /// Number of days in a BS month.
    ///
    /// Exact when the month is loaded; otherwise [`fallback_days_in_month`].
    pub fn days_in_month(&self, year: i32, month: u32) -> u32 {
        match self.month(year, month) {
            Some(record) => record.days.len() as u32,
            None => {
                tracing::debug!(year, month, "no data for month, using fallback day count");
                fallback_days_in_month(year, month)
            }
        }
    }
}

fn load_unit(
    source: &impl CalendarSource,
    unit: &SourceUnit,
) -> Result<BsMonthRecord, CalendarError> {
    let month = parse_month_token(&unit.month_token)?;
    let record = source.read(unit)?.into_record(unit.year, month)?;
    resolver::validate(&record)?;
    Ok(record)
}

fn parse_month_token(token: &str) -> Result<u32, CalendarError> {
    token
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| CalendarError::InvalidMonthToken(format!("'{token}'")))
}

/// A store loaded at most once, on first use.
///
/// Concurrent first callers are serialized: one loads, the rest wait and then
/// see the finished store. Never exposes a partially built store.
#[derive(Debug, Default)]
pub struct SharedStore {
    cell: OnceLock<CalendarStore>,
}

impl SharedStore {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// The store, loading it from `source` if this is the first call.
    pub fn get_or_load(&self, source: &impl CalendarSource) -> &CalendarStore {
        self.cell.get_or_init(|| CalendarStore::load(source))
    }

    /// The store if it has been loaded.
    pub fn get(&self) -> Option<&CalendarStore> {
        self.cell.get()
    }
}
