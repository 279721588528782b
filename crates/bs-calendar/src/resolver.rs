//! Reconstruct the Gregorian month and year of each day in a BS month.
//!
//! Source data gives every BS day only a bare Gregorian day-of-month (1..=31).
//! The month's [`AdSpan`](crate::label::AdSpan) says which Gregorian month the
//! BS month starts and ends in; the switch between the two happens where the
//! day-of-month number drops (e.g. `30 → 1`). [`AdScan`] walks the days in
//! order and tracks that rollover.
//!
//! A BS month never touches three Gregorian months, so at most one rollover
//! is taken per scan.

use chrono::NaiveDate;

use crate::error::CalendarError;
use crate::model::{BsMonthRecord, CalendarDay};

/// One day of a scan with its reconstructed Gregorian year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedDay<'a> {
    pub day: &'a CalendarDay,
    pub ad_year: i32,
    pub ad_month: u32,
    pub ad_day: u32,
}

impl ScannedDay<'_> {
    /// The concrete Gregorian date, if the reconstructed triple is real.
    pub fn ad_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.ad_year, self.ad_month, self.ad_day)
    }
}

/// Iterator over a month's days in stored order, tracking the Gregorian
/// month/year rollover.
pub struct AdScan<'a> {
    record: &'a BsMonthRecord,
    next: usize,
    tracked_day: u32,
    tracked_month: u32,
    tracked_year: i32,
}

impl<'a> AdScan<'a> {
    pub fn new(record: &'a BsMonthRecord) -> Self {
        let span = &record.metadata.span;
        Self {
            record,
            next: 0,
            tracked_day: record
                .days
                .first()
                .map(|d| d.english_day_of_month)
                .unwrap_or(0),
            tracked_month: span.ad_month_start,
            tracked_year: span.ad_year_start,
        }
    }
}

impl<'a> Iterator for AdScan<'a> {
    type Item = ScannedDay<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let day = self.record.days.get(self.next)?;
        self.next += 1;

        let span = &self.record.metadata.span;
        let current = day.english_day_of_month;
        if current < self.tracked_day && self.tracked_month == span.ad_month_start {
            self.tracked_month = span.ad_month_end;
            if span.crosses_year() {
                self.tracked_year = span.ad_year_end;
            }
        }
        self.tracked_day = current;

        Some(ScannedDay {
            day,
            ad_year: self.tracked_year,
            ad_month: self.tracked_month,
            ad_day: current,
        })
    }
}

/// Resolve BS day `day` of `record` to its Gregorian date.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDay`] if the month has no such day, or
/// [`CalendarError::MalformedDaySequence`] if the reconstructed date does not
/// exist in the Gregorian calendar.
pub fn resolve_day(record: &BsMonthRecord, day: u32) -> Result<NaiveDate, CalendarError> {
    let scanned = AdScan::new(record)
        .find(|s| s.day.nepali_day_number == day)
        .ok_or(CalendarError::InvalidDay {
            year: record.bs_year,
            month: record.bs_month,
            day,
            days_in_month: record.days_in_month(),
        })?;
    scanned.ad_date().ok_or_else(|| {
        malformed(
            record,
            format!(
                "day {day} resolves to nonexistent AD date {}-{}-{}",
                scanned.ad_year, scanned.ad_month, scanned.ad_day
            ),
        )
    })
}

/// Check that a month's day list is usable for conversion.
///
/// Requirements: day numbers run 1..=n in order, the Gregorian day-of-month
/// decreases at most once and never repeats, and the reconstructed dates are
/// real, consecutive, and end in the label's end month.
///
/// # Errors
///
/// Returns [`CalendarError::MalformedDaySequence`] describing the first
/// violation found.
pub fn validate(record: &BsMonthRecord) -> Result<(), CalendarError> {
    if record.days.is_empty() {
        return Err(malformed(record, "month has no days".to_string()));
    }

    for (i, day) in record.days.iter().enumerate() {
        let expected = i as u32 + 1;
        if day.nepali_day_number != expected {
            return Err(malformed(
                record,
                format!(
                    "day at position {expected} is numbered {}",
                    day.nepali_day_number
                ),
            ));
        }
    }

    let mut drops = 0;
    for pair in record.days.windows(2) {
        let (prev, cur) = (pair[0].english_day_of_month, pair[1].english_day_of_month);
        if cur == prev {
            return Err(malformed(
                record,
                format!(
                    "AD day {cur} repeats at BS day {}",
                    pair[1].nepali_day_number
                ),
            ));
        }
        if cur < prev {
            drops += 1;
            if drops > 1 {
                return Err(malformed(
                    record,
                    format!(
                        "AD day-of-month decreases twice (second at BS day {})",
                        pair[1].nepali_day_number
                    ),
                ));
            }
        }
    }

    let mut prev: Option<NaiveDate> = None;
    let mut last = None;
    for scanned in AdScan::new(record) {
        let Some(date) = scanned.ad_date() else {
            return Err(malformed(
                record,
                format!(
                    "BS day {} resolves to nonexistent AD date {}-{}-{}",
                    scanned.day.nepali_day_number,
                    scanned.ad_year,
                    scanned.ad_month,
                    scanned.ad_day
                ),
            ));
        };
        if let Some(prev) = prev {
            if prev.succ_opt() != Some(date) {
                return Err(malformed(
                    record,
                    format!(
                        "BS day {} resolves to {date}, not the day after {prev}",
                        scanned.day.nepali_day_number
                    ),
                ));
            }
        }
        prev = Some(date);
        last = Some(scanned);
    }

    let span = &record.metadata.span;
    if let Some(last) = last {
        if (last.ad_year, last.ad_month) != (span.ad_year_end, span.ad_month_end) {
            return Err(malformed(
                record,
                format!(
                    "last day falls in AD {}/{}, label ends in {}/{}",
                    last.ad_month, last.ad_year, span.ad_month_end, span.ad_year_end
                ),
            ));
        }
    }

    Ok(())
}

fn malformed(record: &BsMonthRecord, reason: String) -> CalendarError {
    CalendarError::MalformedDaySequence {
        year: record.bs_year,
        month: record.bs_month,
        reason,
    }
}
