//! BS ⇄ AD date conversion over a loaded [`CalendarStore`].
//!
//! Both directions are pure functions of their input and the store. Every
//! failure (unknown month, day out of range, no matching BS day) comes back as
//! a [`CalendarError`] value carrying enough context to retry: the available
//! years, or the month's real day count.
//!
//! # Functions
//!
//! - [`convert_bs_to_ad`] — month lookup, then the rollover scan
//! - [`convert_ad_to_bs`] — linear scan of every loaded month
//! - [`convert_bs_to_ad_with_events`] / [`convert_ad_to_bs_with_events`] —
//!   the same, plus the BS month's event lists

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::CalendarError;
use crate::model::{BsMonthRecord, GregorianDate, NepaliDate};
use crate::months::{english_month_name, nepali_month_name, weekday_name};
use crate::resolver::{self, AdScan};
use crate::store::CalendarStore;

/// A successful conversion: both sides of the same day, enriched with month
/// and weekday names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    pub bs_date: NepaliDate,
    pub ad_date: GregorianDate,
}

/// Serializable outcome for external consumers: `{bsDate, adDate}` or
/// `{error}`, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConversionResult {
    Ok(Conversion),
    Error { error: String },
}

impl From<Result<Conversion, CalendarError>> for ConversionResult {
    fn from(result: Result<Conversion, CalendarError>) -> Self {
        match result {
            Ok(conversion) => ConversionResult::Ok(conversion),
            Err(e) => ConversionResult::Error {
                error: e.to_string(),
            },
        }
    }
}

/// A conversion together with the event lists of the BS month it landed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionWithEvents {
    pub conversion: Conversion,
    pub bs_month_name: String,
    pub holidays_and_festivals: Vec<String>,
    pub marriage_dates: Vec<String>,
    pub bratabandha_dates: Vec<String>,
}

/// Convert a BS date to its Gregorian equivalent.
///
/// Only `year`, `month` and `day` of the input are read.
///
/// # Errors
///
/// - [`CalendarError::NotFound`] if the BS month is not loaded
/// - [`CalendarError::InvalidDay`] if the month has no such day
/// - [`CalendarError::MalformedDaySequence`] if the month's data resolves to a
///   nonexistent Gregorian date
///
/// # Examples
///
/// ```
/// use bs_calendar::{convert_bs_to_ad, CalendarStore, NepaliDate};
///
/// let store = CalendarStore::new();
/// let err = convert_bs_to_ad(&store, &NepaliDate::new(2080, 1, 1)).unwrap_err();
/// assert!(err.to_string().contains("not found"));
/// ```
pub fn convert_bs_to_ad(
    store: &CalendarStore,
    date: &NepaliDate,
) -> Result<Conversion, CalendarError> {
    let (year, month, day) = date.ymd();
    let record = store
        .month(year, month)
        .ok_or_else(|| CalendarError::NotFound {
            year,
            month,
            available_years: store.years(),
        })?;
    if record.day(day).is_none() {
        return Err(CalendarError::InvalidDay {
            year,
            month,
            day,
            days_in_month: record.days_in_month(),
        });
    }

    let ad = resolver::resolve_day(record, day)?;
    Ok(enrich(record, day, ad))
}

/// Convert a Gregorian date to its BS equivalent.
///
/// Scans every loaded month in store order and returns the first day whose
/// reconstructed Gregorian date matches. BS months never overlap, so real
/// data has at most one match; debug builds keep scanning and log any extra
/// match.
///
/// # Errors
///
/// - [`CalendarError::InvalidDate`] if the input is not a real Gregorian date
/// - [`CalendarError::NoReverseMatch`] if no loaded month contains the date
pub fn convert_ad_to_bs(
    store: &CalendarStore,
    date: &GregorianDate,
) -> Result<Conversion, CalendarError> {
    let (year, month, day) = date.ymd();
    let ad = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        CalendarError::InvalidDate(format!("{year}-{month:02}-{day:02} is not a Gregorian date"))
    })?;

    let mut found: Option<(&BsMonthRecord, u32)> = None;
    for record in store.records() {
        for scanned in AdScan::new(record) {
            if (scanned.ad_year, scanned.ad_month, scanned.ad_day) != (year, month, day) {
                continue;
            }
            let bs_day = scanned.day.nepali_day_number;
            match found {
                None => {
                    found = Some((record, bs_day));
                    if !cfg!(debug_assertions) {
                        return Ok(enrich(record, bs_day, ad));
                    }
                }
                Some((first, first_day)) => tracing::warn!(
                    ad = %ad,
                    first = %format!("{}/{}", first.key(), first_day),
                    extra = %format!("{}/{}", record.key(), bs_day),
                    "AD date matches more than one BS day, keeping the first"
                ),
            }
        }
    }

    match found {
        Some((record, bs_day)) => Ok(enrich(record, bs_day, ad)),
        None => Err(CalendarError::NoReverseMatch {
            year,
            month,
            day,
            available_years: store.years(),
        }),
    }
}

/// [`convert_bs_to_ad`] plus the BS month's event lists.
pub fn convert_bs_to_ad_with_events(
    store: &CalendarStore,
    date: &NepaliDate,
) -> Result<ConversionWithEvents, CalendarError> {
    let conversion = convert_bs_to_ad(store, date)?;
    Ok(attach_events(store, conversion))
}

/// [`convert_ad_to_bs`] plus the BS month's event lists.
pub fn convert_ad_to_bs_with_events(
    store: &CalendarStore,
    date: &GregorianDate,
) -> Result<ConversionWithEvents, CalendarError> {
    let conversion = convert_ad_to_bs(store, date)?;
    Ok(attach_events(store, conversion))
}

fn attach_events(store: &CalendarStore, conversion: Conversion) -> ConversionWithEvents {
    let (year, month) = (conversion.bs_date.year, conversion.bs_date.month);
    let (holidays_and_festivals, marriage_dates, bratabandha_dates) = match store.month(year, month)
    {
        Some(r) => (
            r.holidays_and_festivals.clone(),
            r.marriage_dates.clone(),
            r.bratabandha_dates.clone(),
        ),
        None => Default::default(),
    };
    ConversionWithEvents {
        conversion,
        bs_month_name: nepali_month_name(month).unwrap_or_default().to_string(),
        holidays_and_festivals,
        marriage_dates,
        bratabandha_dates,
    }
}

/// Build the enriched result for BS `day` of `record`, which falls on `ad`.
fn enrich(record: &BsMonthRecord, day: u32, ad: NaiveDate) -> Conversion {
    let day_of_week = weekday_name(ad.weekday()).to_string();
    Conversion {
        bs_date: NepaliDate {
            year: record.bs_year,
            month: record.bs_month,
            day,
            month_name: nepali_month_name(record.bs_month).map(String::from),
            day_of_week: Some(day_of_week.clone()),
        },
        ad_date: GregorianDate {
            year: ad.year(),
            month: ad.month(),
            day: ad.day(),
            month_name: english_month_name(ad.month()).map(String::from),
            day_of_week: Some(day_of_week),
        },
    }
}
