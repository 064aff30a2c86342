//! Date field decoding.
//!
//! Turns a raw date string into a [`CalendarDate`]. Three decoders are tried
//! in a fixed order: strict ISO, then European day/month/year, then US
//! month/day/year. Whatever matched, the canonical key is `YYYY-MM-DD`.

use chrono::NaiveDate;
use dayaxis_core::{CalendarDate, Error, Result};
use serde::Serialize;

/// The decoder that accepted a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DateDecoder {
    Iso,
    European,
    Us,
}

// Two-digit year forms come first: `%Y` would happily read "99" as year 99.
// `%b` only reads three-letter names, so full names get their own `%B` forms.
const EUROPEAN_FORMATS: &[&str] = &[
    "%d-%m-%y", "%d-%m-%Y", "%d-%b-%y", "%d-%b-%Y", "%d-%B-%y", "%d-%B-%Y",
];
const EUROPEAN_COMPACT: &[&str] = &["%d%m%y", "%d%m%Y"];
const US_FORMATS: &[&str] = &[
    "%m-%d-%y", "%m-%d-%Y", "%b-%d-%y", "%b-%d-%Y", "%B-%d-%y", "%B-%d-%Y",
];
const US_COMPACT: &[&str] = &["%m%d%y", "%m%d%Y"];

/// Parse a raw date field.
pub fn parse(raw: &str) -> Result<CalendarDate> {
    decode(raw).map(|(date, _)| date)
}

/// Parse a raw date field straight to its canonical key.
pub fn canonical_key(raw: &str) -> Result<String> {
    parse(raw).map(|date| date.key())
}

/// Parse a raw date field, reporting which decoder matched.
pub fn decode(raw: &str) -> Result<(CalendarDate, DateDecoder)> {
    let trimmed = raw.trim();

    if let Some(date) = decode_iso(trimmed) {
        return Ok((date.into(), DateDecoder::Iso));
    }

    let separated = normalize_separators(trimmed);
    if separated.is_empty() {
        return Err(Error::invalid_date(raw));
    }
    let (european, us) = if is_compact(&separated) {
        (EUROPEAN_COMPACT, US_COMPACT)
    } else {
        (EUROPEAN_FORMATS, US_FORMATS)
    };

    if let Some(date) = try_formats(&separated, european) {
        return Ok((date.into(), DateDecoder::European));
    }
    if let Some(date) = try_formats(&separated, us) {
        return Ok((date.into(), DateDecoder::Us));
    }

    Err(Error::invalid_date(raw))
}

/// `YYYY-M-D` with a four-digit year and one- or two-digit month and day.
fn decode_iso(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('-');
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let digits = |p: &str, min: usize, max: usize| {
        (min..=max).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_digit())
    };
    if !(digits(year, 4, 4) && digits(month, 1, 2) && digits(day, 1, 2)) {
        return None;
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Collapse every run of `/ . , -` and whitespace into a single `-`.
fn normalize_separators(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending = false;
    for c in s.chars() {
        if c.is_whitespace() || matches!(c, '/' | '.' | ',' | '-') {
            pending = !out.is_empty();
        } else {
            if pending {
                out.push('-');
                pending = false;
            }
            out.push(c);
        }
    }
    out
}

/// A bare run of six or eight digits, e.g. `010399` or `01031999`.
fn is_compact(s: &str) -> bool {
    matches!(s.len(), 6 | 8) && s.bytes().all(|b| b.is_ascii_digit())
}

fn try_formats(s: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> String {
        canonical_key(raw).unwrap()
    }

    #[test]
    fn test_iso() {
        assert_eq!(decode("2002-08-01").unwrap().1, DateDecoder::Iso);
        assert_eq!(key("2002-08-01"), "2002-08-01");
        assert_eq!(key(" 2002-8-1 "), "2002-08-01");
    }

    #[test]
    fn test_iso_rejects_impossible_date() {
        assert!(parse("2002-02-30").is_err());
    }

    #[test]
    fn test_european_before_us() {
        // Ambiguous numeric forms read day first
        let (date, decoder) = decode("03/01/99").unwrap();
        assert_eq!(decoder, DateDecoder::European);
        assert_eq!(date.key(), "1999-01-03");
        assert_eq!(key("1.8.2002"), "2002-08-01");
        assert_eq!(key("01-Aug-2002"), "2002-08-01");
        assert_eq!(key("1 August 2002"), "2002-08-01");
    }

    #[test]
    fn test_us_fallback() {
        let (date, decoder) = decode("Mar-01-99").unwrap();
        assert_eq!(decoder, DateDecoder::Us);
        assert_eq!(date.key(), "1999-03-01");

        // Day 25 cannot be a month, so only the US decoder accepts it
        let (date, decoder) = decode("12/25/2001").unwrap();
        assert_eq!(decoder, DateDecoder::Us);
        assert_eq!(date.key(), "2001-12-25");

        assert_eq!(key("March 1, 1999"), "1999-03-01");
        assert_eq!(key("MAR 1 1999"), "1999-03-01");
    }

    #[test]
    fn test_full_month_names() {
        let (date, decoder) = decode("1 August 2002").unwrap();
        assert_eq!(decoder, DateDecoder::European);
        assert_eq!(date.key(), "2002-08-01");
        assert_eq!(key("1-august-02"), "2002-08-01");

        let (date, decoder) = decode("March 1, 1999").unwrap();
        assert_eq!(decoder, DateDecoder::Us);
        assert_eq!(date.key(), "1999-03-01");
        assert_eq!(key("December 25 01"), "2001-12-25");
    }

    #[test]
    fn test_compact_digits() {
        assert_eq!(key("010399"), "1999-03-01");
        assert_eq!(key("01031999"), "1999-03-01");
        // 13 is not a month, US reading takes over
        assert_eq!(key("121399"), "1999-12-13");
    }

    #[test]
    fn test_two_digit_year_window() {
        assert_eq!(key("01-08-02"), "2002-08-01");
        assert_eq!(key("01-08-69"), "2069-08-01");
        assert_eq!(key("01-08-70"), "1970-08-01");
    }

    #[test]
    fn test_invalid() {
        for raw in ["", "   ", "Date", "yesterday", "31/31/99", "1999/03/01", "2002-08-01T10:00"] {
            let err = parse(raw).unwrap_err();
            assert!(matches!(err, Error::InvalidDate(_)), "{raw:?} should fail");
        }
    }

    #[test]
    fn test_normalize_separators() {
        assert_eq!(normalize_separators("March 1, 1999"), "March-1-1999");
        assert_eq!(normalize_separators("/01//03/99."), "01-03-99");
    }
}
