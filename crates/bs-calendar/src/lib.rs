//! # bs-calendar
//!
//! Bikram Sambat (BS) ⇄ Gregorian (AD) date conversion.
//!
//! The BS calendar has no arithmetic rule: month lengths (29–32 days) change
//! from year to year. Conversion is therefore driven entirely by scraped
//! per-month data, where every BS day carries only a bare AD day-of-month. The
//! AD month and year of each day are reconstructed by scanning for the point
//! where that number rolls over.
//!
//! ## Modules
//!
//! - [`store`] — load and query the per-month records (`CalendarStore`, `SharedStore`)
//! - [`label`] — parse month labels like `"Dec/Jan 2023/24"` into AD spans
//! - [`resolver`] — rollover scan from BS day to AD month/year
//! - [`convert`] — public BS→AD and AD→BS conversion
//! - [`source`] — raw record formats and where they are read from
//! - [`model`] — days, month records and date value types
//! - [`events`] — holiday, marriage and bratabandha list entries
//! - [`months`], [`numerals`] — name tables and Nepali digits
//! - [`config`] — data directory configuration
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use bs_calendar::{convert_ad_to_bs, CalendarStore, GregorianDate, MemorySource, RawMonth};
//!
//! let raw = RawMonth::from_json(r#"{
//!     "metadata": { "en": "Apr 2023", "np": "बैशाख २०८०" },
//!     "days": [
//!         { "n": "१", "e": "14", "d": 6 },
//!         { "n": "२", "e": "15", "d": 7 }
//!     ]
//! }"#).unwrap();
//! let store = CalendarStore::load(&MemorySource::new().with(2080, "1", raw));
//!
//! let result = convert_ad_to_bs(&store, &GregorianDate::new(2023, 4, 15)).unwrap();
//! assert_eq!(result.bs_date.ymd(), (2080, 1, 2));
//! assert_eq!(result.bs_date.day_of_week.as_deref(), Some("Saturday"));
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod events;
pub mod label;
pub mod model;
pub mod months;
pub mod numerals;
pub mod resolver;
pub mod source;
pub mod store;

pub use config::StoreConfig;
pub use convert::{
    convert_ad_to_bs, convert_ad_to_bs_with_events, convert_bs_to_ad,
    convert_bs_to_ad_with_events, Conversion, ConversionResult, ConversionWithEvents,
};
pub use error::CalendarError;
pub use events::{EventDays, EventKind, MonthEvent};
pub use label::{parse_month_label, AdSpan};
pub use model::{BsMonthRecord, CalendarDay, GregorianDate, MonthKey, MonthMetadata, NepaliDate};
pub use source::{CalendarSource, DirectorySource, MemorySource, RawMonth, SourceUnit};
pub use store::{fallback_days_in_month, CalendarStore, SharedStore};
