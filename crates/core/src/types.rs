//! Core data types for the dayaxis system.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// A calendar day with no time-of-day component.
///
/// Ordering follows chronology, which is also the ordering of [`key`](Self::key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build from year/month/day, `None` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Day of week, 1 = Monday .. 7 = Sunday.
    #[inline]
    pub fn day_of_week(&self) -> u32 {
        self.0.weekday().number_from_monday()
    }

    /// Monday through Friday.
    #[inline]
    pub fn is_weekday(&self) -> bool {
        self.day_of_week() <= 5
    }

    /// The following calendar day, `None` past chrono's supported range.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// Canonical zero-padded `YYYY-MM-DD` key.
    pub fn key(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// One input row as handed over by the fetch collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// Date field, undecoded.
    pub date: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl RawRow {
    /// Create a row carrying only a date.
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Self::default()
        }
    }

    /// Set all four prices.
    pub fn with_bar(mut self, open: f64, high: f64, low: f64, close: f64) -> Self {
        self.open = Some(open);
        self.high = Some(high);
        self.low = Some(low);
        self.close = Some(close);
        self
    }

    /// Set the volume.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// The row's bar, if it carries a complete one.
    pub fn bar(&self) -> Result<Option<PriceBar>> {
        PriceBar::from_parts(self.open, self.high, self.low, self.close)
    }
}

/// Open/high/low/close for one axis point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceBar {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    /// Assemble a bar from optional parts.
    ///
    /// All four absent is `Ok(None)`; some but not all present is
    /// [`Error::IncompleteBar`] naming the missing fields.
    pub fn from_parts(
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        close: Option<f64>,
    ) -> Result<Option<Self>> {
        match (open, high, low, close) {
            (Some(o), Some(h), Some(l), Some(c)) => Ok(Some(Self::new(o, h, l, c))),
            (None, None, None, None) => Ok(None),
            _ => {
                let missing: Vec<&str> = [
                    ("open", open),
                    ("high", high),
                    ("low", low),
                    ("close", close),
                ]
                .iter()
                .filter(|(_, v)| v.is_none())
                .map(|(name, _)| *name)
                .collect();
                Err(Error::incomplete_bar(format!("missing {}", missing.join(", "))))
            }
        }
    }
}

/// Everything known about one calendar day after the pre-pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayData {
    pub bar: Option<PriceBar>,
    pub volume: Option<f64>,
}

impl DayData {
    /// A day counts as having data when it carries a bar or a volume.
    #[inline]
    pub fn has_data(&self) -> bool {
        self.bar.is_some() || self.volume.is_some()
    }
}

/// One kept point on the output axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisPoint {
    pub date: CalendarDate,
    /// Canonical `YYYY-MM-DD` key.
    pub key: String,
    /// Label text, blank for placeholders.
    pub label: String,
    /// Position in the ordered series.
    pub index: usize,
    pub has_data: bool,
    pub bar: Option<PriceBar>,
    pub volume: Option<f64>,
}
