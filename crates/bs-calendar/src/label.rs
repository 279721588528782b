//! Month label normalization.
//!
//! Each BS month in the source data carries a human-readable label naming the
//! Gregorian months and year(s) it overlaps, e.g. `"Apr/May 2023"` or
//! `"Dec/Jan 2023/24"`. [`parse_month_label`] turns that label into an
//! [`AdSpan`].
//!
//! # Grammar
//!
//! ```text
//! label  := months WS years
//! months := MON [ "/" MON ]
//! years  := YYYY [ "/" ( YYYY | YY ) ]
//! MON    := three-letter English month abbreviation
//! ```
//!
//! Anything else is rejected with [`CalendarError::MalformedLabel`]. No span is
//! ever guessed.

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::months::month_from_abbrev;

/// The Gregorian months a BS month starts and ends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdSpan {
    pub ad_year_start: i32,
    pub ad_month_start: u32,
    pub ad_year_end: i32,
    pub ad_month_end: u32,
}

impl AdSpan {
    /// Whether the span moves into a later Gregorian year.
    pub fn crosses_year(&self) -> bool {
        self.ad_year_end > self.ad_year_start
    }
}

/// Parse a month label such as `"Apr/May 2023"` into its AD span.
///
/// A single printed year with a December→January span ends in the following
/// year. A two-digit second year borrows the century of the first.
///
/// # Errors
///
/// Returns [`CalendarError::MalformedLabel`] naming the label when the shape,
/// month abbreviations or years are not recognized.
///
/// # Examples
///
/// ```
/// use bs_calendar::label::parse_month_label;
///
/// let span = parse_month_label("Dec/Jan 2023").unwrap();
/// assert_eq!((span.ad_month_start, span.ad_year_start), (12, 2023));
/// assert_eq!((span.ad_month_end, span.ad_year_end), (1, 2024));
/// ```
pub fn parse_month_label(label: &str) -> Result<AdSpan, CalendarError> {
    let malformed = |reason: &str| CalendarError::MalformedLabel(format!("'{label}': {reason}"));

    let trimmed = label.trim();
    let (month_part, year_part) = trimmed
        .rsplit_once(char::is_whitespace)
        .ok_or_else(|| malformed("expected '<Mon>[/<Mon>] <Year>[/<Year>]'"))?;

    let (start_name, end_name) = split_pair(month_part.trim())
        .ok_or_else(|| malformed("expected one or two month names"))?;
    let ad_month_start = month_from_abbrev(start_name)
        .ok_or_else(|| malformed(&format!("unknown month '{start_name}'")))?;
    let ad_month_end = month_from_abbrev(end_name)
        .ok_or_else(|| malformed(&format!("unknown month '{end_name}'")))?;

    let (start_year_token, end_year_token) =
        split_pair(year_part).ok_or_else(|| malformed("expected one or two years"))?;
    let ad_year_start =
        parse_full_year(start_year_token).ok_or_else(|| malformed("invalid start year"))?;

    let ad_year_end = if year_part.contains('/') {
        let end = if end_year_token.len() == 2 {
            parse_full_year(&format!("{}{}", &start_year_token[..2], end_year_token))
        } else {
            parse_full_year(end_year_token)
        };
        end.ok_or_else(|| malformed("invalid end year"))?
    } else if ad_month_start == 12 && ad_month_end == 1 {
        ad_year_start + 1
    } else {
        ad_year_start
    };

    if (ad_year_end, ad_month_end) < (ad_year_start, ad_month_start) {
        return Err(malformed("span ends before it starts"));
    }

    Ok(AdSpan {
        ad_year_start,
        ad_month_start,
        ad_year_end,
        ad_month_end,
    })
}

/// Split `"a/b"` into `("a", "b")` and `"a"` into `("a", "a")`.
fn split_pair(s: &str) -> Option<(&str, &str)> {
    let mut parts = s.split('/').map(str::trim);
    let first = parts.next().filter(|p| !p.is_empty())?;
    let second = match parts.next() {
        Some(p) if !p.is_empty() => p,
        Some(_) => return None,
        None => first,
    };
    if parts.next().is_some() {
        return None;
    }
    Some((first, second))
}

fn parse_full_year(token: &str) -> Option<i32> {
    if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn span(ys: i32, ms: u32, ye: i32, me: u32) -> AdSpan {
        AdSpan {
            ad_year_start: ys,
            ad_month_start: ms,
            ad_year_end: ye,
            ad_month_end: me,
        }
    }

    #[test]
    fn test_two_months_single_year() {
        assert_eq!(
            parse_month_label("Apr/May 2023").unwrap(),
            span(2023, 4, 2023, 5)
        );
    }

    #[test]
    fn test_dec_jan_single_year_rolls_end_year() {
        assert_eq!(
            parse_month_label("Dec/Jan 2023").unwrap(),
            span(2023, 12, 2024, 1)
        );
    }

    #[test]
    fn test_dec_jan_explicit_years() {
        assert_eq!(
            parse_month_label("Dec/Jan 2023/2024").unwrap(),
            parse_month_label("Dec/Jan 2023").unwrap()
        );
    }

    #[test]
    fn test_two_digit_end_year_borrows_century() {
        assert_eq!(
            parse_month_label("Dec/Jan 2099/00").unwrap_err().to_string(),
            "Malformed month label: 'Dec/Jan 2099/00': span ends before it starts"
        );
        assert_eq!(
            parse_month_label("Dec/Jan 2023/24").unwrap(),
            span(2023, 12, 2024, 1)
        );
    }

    #[test]
    fn test_single_month_label() {
        assert_eq!(parse_month_label("Jun 2019").unwrap(), span(2019, 6, 2019, 6));
    }

    #[test]
    fn test_surrounding_whitespace_tolerated() {
        assert_eq!(
            parse_month_label("  Jul/Aug   2020 ").unwrap(),
            span(2020, 7, 2020, 8)
        );
    }

    #[test]
    fn test_unknown_month_is_malformed() {
        let err = parse_month_label("Foo/May 2023").unwrap_err();
        assert!(matches!(err, CalendarError::MalformedLabel(_)));
        assert!(err.to_string().contains("Foo/May 2023"), "got: {err}");
    }

    #[test]
    fn test_missing_year_is_malformed() {
        assert!(parse_month_label("Apr/May").is_err());
        assert!(parse_month_label("").is_err());
        assert!(parse_month_label("Apr/May 23").is_err());
        assert!(parse_month_label("Apr/May/Jun 2023").is_err());
        assert!(parse_month_label("Apr/ 2023").is_err());
    }

    #[test]
    fn test_backwards_span_is_malformed() {
        assert!(parse_month_label("May/Apr 2023").is_err());
    }

    proptest! {
        #[test]
        fn prop_adjacent_months_parse(start in 1u32..=12, year in 1900i32..2100) {
            let end = start % 12 + 1;
            let label = format!(
                "{}/{} {}",
                &crate::months::ENGLISH_MONTHS[start as usize - 1][..3],
                &crate::months::ENGLISH_MONTHS[end as usize - 1][..3],
                year
            );
            let parsed = parse_month_label(&label).unwrap();
            prop_assert_eq!(parsed.ad_month_start, start);
            prop_assert_eq!(parsed.ad_month_end, end);
            prop_assert_eq!(parsed.ad_year_start, year);
            prop_assert_eq!(parsed.ad_year_end, if start == 12 { year + 1 } else { year });
        }
    }
}
