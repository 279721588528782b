//! Conversion and store behaviour against the committed BS 2080 fixture data.

use std::path::PathBuf;

use bs_calendar::{
    convert_ad_to_bs, convert_bs_to_ad, CalendarError, CalendarStore, EventKind, GregorianDate,
    NepaliDate, SharedStore, StoreConfig,
};
use chrono::{Datelike, NaiveDate};

fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn store() -> CalendarStore {
    CalendarStore::load_dir(&StoreConfig::new(fixture_dir("data")))
}

fn bs_to_ad(store: &CalendarStore, y: i32, m: u32, d: u32) -> (i32, u32, u32) {
    convert_bs_to_ad(store, &NepaliDate::new(y, m, d))
        .unwrap()
        .ad_date
        .ymd()
}

fn ad_to_bs(store: &CalendarStore, y: i32, m: u32, d: u32) -> (i32, u32, u32) {
    convert_ad_to_bs(store, &GregorianDate::new(y, m, d))
        .unwrap()
        .bs_date
        .ymd()
}

// ── Store ───────────────────────────────────────────────────────────────────

#[test]
fn test_loads_full_year() {
    let s = store();
    assert_eq!(s.len(), 12);
    assert_eq!(s.years(), vec![2080]);
    let months: Vec<u32> = s.year(2080).unwrap().iter().map(|r| r.bs_month).collect();
    assert_eq!(months, (1..=12).collect::<Vec<_>>());
}

#[test]
fn test_day_count_consistency() {
    let s = store();
    for record in s.records() {
        assert_eq!(
            s.days_in_month(record.bs_year, record.bs_month) as usize,
            record.days.len()
        );
        for (i, day) in record.days.iter().enumerate() {
            assert_eq!(day.nepali_day_number, i as u32 + 1);
        }
    }
    assert_eq!(s.days_in_month(2080, 2), 32);
    assert_eq!(s.days_in_month(2080, 10), 29);
}

#[test]
fn test_metadata_spans_from_labels() {
    let s = store();
    let poush = s.month(2080, 9).unwrap();
    assert_eq!(poush.metadata.human_ad_label, "Dec/Jan 2023/24");
    assert_eq!(poush.metadata.nepali_label, "पुस २०८०");
    assert_eq!(poush.metadata.span.ad_year_end, 2024);
    assert_eq!(poush.metadata.span.ad_month_end, 1);
}

#[test]
fn test_load_is_idempotent() {
    let first = store();
    let second = store();
    assert_eq!(
        first.keys().collect::<Vec<_>>(),
        second.keys().collect::<Vec<_>>()
    );
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_shared_load_runs_once() {
    let shared = SharedStore::new();
    let source = StoreConfig::new(fixture_dir("data")).source();

    let seen: Vec<&CalendarStore> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| shared.get_or_load(&source)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(seen.windows(2).all(|w| std::ptr::eq(w[0], w[1])));
    assert_eq!(shared.get().unwrap(), &store());
}

#[test]
fn test_partial_data_skips_bad_files() {
    let s = CalendarStore::load_dir(&StoreConfig::new(fixture_dir("partial")));
    let keys: Vec<String> = s.keys().map(|k| k.to_string()).collect();
    assert_eq!(keys, vec!["2081/1"]);
    assert_eq!(bs_to_ad(&s, 2081, 1, 1), (2024, 4, 13));
}

#[test]
fn test_missing_directory_is_empty_not_error() {
    let s = CalendarStore::load_dir(&StoreConfig::new(fixture_dir("does-not-exist")));
    assert!(s.is_empty());
    let err = convert_bs_to_ad(&s, &NepaliDate::new(2080, 1, 1)).unwrap_err();
    assert!(err.to_string().contains("None loaded"), "got: {err}");
}

// ── Conversion ──────────────────────────────────────────────────────────────

#[test]
fn test_new_year_2080() {
    let s = store();
    let c = convert_bs_to_ad(&s, &NepaliDate::new(2080, 1, 1)).unwrap();
    assert_eq!(c.ad_date.ymd(), (2023, 4, 14));
    assert_eq!(c.ad_date.day_of_week.as_deref(), Some("Friday"));
    assert_eq!(c.bs_date.month_name.as_deref(), Some("Baishakh"));
}

#[test]
fn test_known_dates() {
    let s = store();
    assert_eq!(bs_to_ad(&s, 2080, 7, 7), (2023, 10, 24));
    assert_eq!(bs_to_ad(&s, 2080, 9, 15), (2023, 12, 31));
    assert_eq!(bs_to_ad(&s, 2080, 9, 16), (2024, 1, 1));
    assert_eq!(bs_to_ad(&s, 2080, 11, 17), (2024, 2, 29));
    assert_eq!(bs_to_ad(&s, 2080, 12, 30), (2024, 4, 12));

    assert_eq!(ad_to_bs(&s, 2024, 1, 1), (2080, 9, 16));
    assert_eq!(ad_to_bs(&s, 2024, 2, 29), (2080, 11, 17));
    assert_eq!(ad_to_bs(&s, 2023, 5, 15), (2080, 2, 1));
}

#[test]
fn test_round_trip_every_day() {
    let s = store();
    for record in s.records() {
        for day in &record.days {
            let bs = NepaliDate::new(record.bs_year, record.bs_month, day.nepali_day_number);
            let ad = convert_bs_to_ad(&s, &bs).unwrap().ad_date;
            let back = convert_ad_to_bs(&s, &ad).unwrap().bs_date;
            assert_eq!(back.ymd(), bs.ymd(), "round trip via {:?}", ad.ymd());
        }
    }
}

#[test]
fn test_resolved_dates_are_contiguous_and_match_weekdays() {
    let s = store();
    let mut expected = NaiveDate::from_ymd_opt(2023, 4, 14).unwrap();
    for record in s.year(2080).unwrap() {
        for day in &record.days {
            let (y, m, d) = bs_to_ad(&s, record.bs_year, record.bs_month, day.nepali_day_number);
            let ad = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            assert_eq!(ad, expected);
            assert_eq!(day.chrono_weekday(), Some(ad.weekday()));
            expected = expected.succ_opt().unwrap();
        }
    }
    assert_eq!(expected, NaiveDate::from_ymd_opt(2024, 4, 13).unwrap());
}

#[test]
fn test_missing_month_lists_available_years() {
    let s = store();
    match convert_bs_to_ad(&s, &NepaliDate::new(9999, 1, 1)) {
        Err(CalendarError::NotFound {
            available_years, ..
        }) => assert_eq!(available_years, s.years()),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_out_of_range_day_reports_count() {
    let s = store();
    let err = convert_bs_to_ad(&s, &NepaliDate::new(2080, 6, 31)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid day 31 for BS Ashwin 2080. This month has 30 days."
    );
}

#[test]
fn test_ad_outside_data_has_no_match() {
    let s = store();
    let err = convert_ad_to_bs(&s, &GregorianDate::new(2024, 4, 13)).unwrap_err();
    assert!(matches!(err, CalendarError::NoReverseMatch { .. }));
    assert!(err.to_string().contains("13/4/2024"), "got: {err}");
}

// ── Events ──────────────────────────────────────────────────────────────────

#[test]
fn test_month_events_from_fixture() {
    let s = store();
    let baishakh = s.month(2080, 1).unwrap();

    let new_year = baishakh.events_on(1);
    assert!(new_year
        .iter()
        .any(|(kind, e)| *kind == EventKind::HolidayFestival
            && e.descriptions.contains(&"लोकतन्त्र दिवस".to_string())));

    let eleventh = baishakh.events_on(11);
    assert!(eleventh.iter().any(|(kind, _)| *kind == EventKind::Marriage));

    assert!(baishakh.holidays().any(|d| d.nepali_day_number == 1));
    assert_eq!(baishakh.days[0].event_text, "नयाँ वर्ष");
}
