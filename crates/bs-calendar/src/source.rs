//! Where raw month records come from.
//!
//! The store only needs to enumerate `(year, month-token)` units and read each
//! one; [`CalendarSource`] captures exactly that. [`DirectorySource`] reads the
//! `<data>/<YYYY>/<M>.json` layout written by the scraper, [`MemorySource`]
//! holds records in memory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::model::{BsMonthRecord, CalendarDay, MonthMetadata};
use crate::numerals::parse_number;

// ── Raw records ─────────────────────────────────────────────────────────────

/// Month labels exactly as scraped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMetadata {
    /// e.g. `"Apr/May 2023"`
    pub en: String,
    /// e.g. `"बैशाख २०८०"`
    #[serde(default)]
    pub np: String,
}

/// A number the scraper may have written either as a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(u32),
    Text(String),
}

impl RawNumber {
    fn value(&self) -> Option<u32> {
        match self {
            RawNumber::Number(n) => Some(*n),
            RawNumber::Text(s) => parse_number(s),
        }
    }
}

/// One scraped day cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDay {
    /// BS day in Nepali numerals.
    pub n: String,
    /// BS day in ASCII digits. Older files omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ne: Option<String>,
    /// AD day of month.
    pub e: RawNumber,
    /// Tithi.
    #[serde(default)]
    pub t: String,
    /// Festival text.
    #[serde(default)]
    pub f: String,
    /// Holiday flag.
    #[serde(default)]
    pub h: bool,
    /// Weekday, 1 = Sunday.
    #[serde(default)]
    pub d: u8,
}

/// One scraped month file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMonth {
    pub metadata: RawMetadata,
    pub days: Vec<RawDay>,
    #[serde(default)]
    pub holi_fest: Vec<String>,
    #[serde(default)]
    pub marriage: Vec<String>,
    #[serde(default)]
    pub bratabandha: Vec<String>,
}

impl RawMonth {
    pub fn from_json(json: &str) -> Result<Self, CalendarError> {
        serde_json::from_str(json).map_err(|e| CalendarError::Parse(e.to_string()))
    }

    /// Normalize into a [`BsMonthRecord`] for BS `year`/`month`.
    ///
    /// # Errors
    ///
    /// [`CalendarError::MalformedLabel`] if the month label cannot be parsed;
    /// [`CalendarError::MalformedDaySequence`] if a day number is unreadable.
    pub fn into_record(self, year: i32, month: u32) -> Result<BsMonthRecord, CalendarError> {
        let metadata = MonthMetadata::from_labels(self.metadata.en, self.metadata.np)?;
        let unreadable = |what: &str, raw: &str| CalendarError::MalformedDaySequence {
            year,
            month,
            reason: format!("unreadable {what} '{raw}'"),
        };

        let days = self
            .days
            .into_iter()
            .map(|d| -> Result<CalendarDay, CalendarError> {
                let number_text = d.ne.as_deref().unwrap_or(&d.n);
                let nepali_day_number =
                    parse_number(number_text).ok_or_else(|| unreadable("BS day", number_text))?;
                let english_day_of_month = d
                    .e
                    .value()
                    .filter(|v| (1..=31).contains(v))
                    .ok_or_else(|| unreadable("AD day", &format!("{:?}", d.e)))?;
                Ok(CalendarDay {
                    nepali_numeral: d.n,
                    nepali_day_number,
                    english_day_of_month,
                    lunar_day: d.t,
                    event_text: d.f,
                    is_holiday: d.h,
                    weekday: d.d,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BsMonthRecord {
            bs_year: year,
            bs_month: month,
            metadata,
            days,
            holidays_and_festivals: self.holi_fest,
            marriage_dates: self.marriage,
            bratabandha_dates: self.bratabandha,
        })
    }
}

// ── Sources ─────────────────────────────────────────────────────────────────

/// One enumerable unit of source data: a BS year and the raw month token
/// (file stem, row key, ...). The token is validated by the store, not here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceUnit {
    pub year: i32,
    pub month_token: String,
}

impl SourceUnit {
    pub fn new(year: i32, month_token: impl Into<String>) -> Self {
        Self {
            year,
            month_token: month_token.into(),
        }
    }
}

/// Anything that can list and read raw month records.
pub trait CalendarSource {
    /// List available units. An absent collection is an empty list, not an error.
    fn units(&self) -> Result<Vec<SourceUnit>, CalendarError>;

    /// Read one unit.
    fn read(&self, unit: &SourceUnit) -> Result<RawMonth, CalendarError>;
}

/// Reads `<root>/<YYYY>/<M>.json` files.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn unit_path(&self, unit: &SourceUnit) -> PathBuf {
        self.root
            .join(format!("{:04}", unit.year))
            .join(format!("{}.json", unit.month_token))
    }
}

impl CalendarSource for DirectorySource {
    fn units(&self) -> Result<Vec<SourceUnit>, CalendarError> {
        if !self.root.is_dir() {
            tracing::warn!(
                path = %self.root.display(),
                "data directory not found, calendar will be empty"
            );
            return Ok(Vec::new());
        }

        let mut units = Vec::new();
        for year_dir in read_dir_sorted(&self.root)? {
            let Some(year) = year_dir_name(&year_dir) else {
                continue;
            };
            let month_files = match read_dir_sorted(&year_dir) {
                Ok(files) => files,
                Err(e) => {
                    tracing::warn!(path = %year_dir.display(), error = %e, "skipping year directory");
                    continue;
                }
            };
            units.extend(
                month_files
                    .iter()
                    .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
                    .filter_map(|p| p.file_stem()?.to_str())
                    .map(|stem| SourceUnit::new(year, stem)),
            );
        }
        units.sort_by(|a, b| {
            (a.year, a.month_token.parse::<u32>().ok(), &a.month_token).cmp(&(
                b.year,
                b.month_token.parse::<u32>().ok(),
                &b.month_token,
            ))
        });
        Ok(units)
    }

    fn read(&self, unit: &SourceUnit) -> Result<RawMonth, CalendarError> {
        let path = self.unit_path(unit);
        let text = fs::read_to_string(&path)
            .map_err(|e| CalendarError::Io(format!("{}: {}", path.display(), e)))?;
        RawMonth::from_json(&text)
            .map_err(|e| CalendarError::Parse(format!("{}: {}", path.display(), e)))
    }
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>, CalendarError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| CalendarError::Io(format!("{}: {}", dir.display(), e)))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    paths.sort();
    Ok(paths)
}

/// A four-digit directory name, parsed as a year.
fn year_dir_name(path: &Path) -> Option<i32> {
    if !path.is_dir() {
        return None;
    }
    let name = path.file_name()?.to_str()?;
    if name.len() != 4 || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

/// Raw months held in memory, listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    units: Vec<(SourceUnit, RawMonth)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, year: i32, month_token: impl Into<String>, raw: RawMonth) -> Self {
        self.insert(year, month_token, raw);
        self
    }

    pub fn insert(&mut self, year: i32, month_token: impl Into<String>, raw: RawMonth) {
        self.units.push((SourceUnit::new(year, month_token), raw));
    }
}

impl CalendarSource for MemorySource {
    fn units(&self) -> Result<Vec<SourceUnit>, CalendarError> {
        Ok(self.units.iter().map(|(unit, _)| unit.clone()).collect())
    }

    fn read(&self, unit: &SourceUnit) -> Result<RawMonth, CalendarError> {
        self.units
            .iter()
            .find(|(u, _)| u == unit)
            .map(|(_, raw)| raw.clone())
            .ok_or_else(|| {
                CalendarError::Io(format!(
                    "no record for {}/{}",
                    unit.year, unit.month_token
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAISHAKH_SNIPPET: &str = r#"{
        "metadata": { "en": "Apr/May 2023", "np": "बैशाख २०८०" },
        "days": [
            { "n": "१", "ne": "1", "e": "14", "t": "प्रतिपदा", "f": "नयाँ वर्ष", "h": true, "d": 6 },
            { "n": "२", "e": 15, "t": "द्वितीया", "f": "", "h": false, "d": 7 }
        ],
        "holiFest": ["१_::_नयाँ वर्ष"]
    }"#;

    #[test]
    fn test_raw_month_decodes_scraper_fields() {
        let raw = RawMonth::from_json(BAISHAKH_SNIPPET).unwrap();
        assert_eq!(raw.metadata.en, "Apr/May 2023");
        assert_eq!(raw.days.len(), 2);
        assert_eq!(raw.days[1].e, RawNumber::Number(15));
        assert!(raw.marriage.is_empty());
    }

    #[test]
    fn test_into_record_normalizes_days() {
        let record = RawMonth::from_json(BAISHAKH_SNIPPET)
            .unwrap()
            .into_record(2080, 1)
            .unwrap();
        assert_eq!(record.metadata.span.ad_month_start, 4);
        assert_eq!(record.days[0].nepali_day_number, 1);
        // falls back to the Nepali numeral when `ne` is absent
        assert_eq!(record.days[1].nepali_day_number, 2);
        assert_eq!(record.days[1].english_day_of_month, 15);
        assert_eq!(record.days[0].lunar_day, "प्रतिपदा");
        assert!(record.days[0].is_holiday);
        assert_eq!(record.holidays_and_festivals, vec!["१_::_नयाँ वर्ष"]);
    }

    #[test]
    fn test_into_record_rejects_bad_label() {
        let mut raw = RawMonth::from_json(BAISHAKH_SNIPPET).unwrap();
        raw.metadata.en = "Spring 2023".to_string();
        assert!(matches!(
            raw.into_record(2080, 1),
            Err(CalendarError::MalformedLabel(_))
        ));
    }

    #[test]
    fn test_into_record_rejects_unreadable_ad_day() {
        let mut raw = RawMonth::from_json(BAISHAKH_SNIPPET).unwrap();
        raw.days[0].e = RawNumber::Text("?".to_string());
        assert!(matches!(
            raw.into_record(2080, 1),
            Err(CalendarError::MalformedDaySequence { .. })
        ));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(
            RawMonth::from_json("{ not json"),
            Err(CalendarError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_directory_lists_nothing() {
        let source = DirectorySource::new("/definitely/not/a/real/bs-calendar/dir");
        assert!(source.units().unwrap().is_empty());
    }

    #[test]
    fn test_memory_source_round_trip() {
        let raw = RawMonth::from_json(BAISHAKH_SNIPPET).unwrap();
        let source = MemorySource::new().with(2080, "1", raw.clone());
        let units = source.units().unwrap();
        assert_eq!(units, vec![SourceUnit::new(2080, "1")]);
        assert_eq!(source.read(&units[0]).unwrap(), raw);
        assert!(source.read(&SourceUnit::new(2080, "2")).is_err());
    }
}
