//! Per-date lookups built from raw rows.
//!
//! The pre-pass decodes every row's date and files its bar and volume under
//! the canonical date. Rows whose date cannot be decoded are dropped and
//! counted; partial bars are counted and kept as bar-absent.

use dayaxis_core::{CalendarDate, DayData, PriceBar, RawRow};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::date_normalizer;

/// Statistics about row intake quality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Rows offered to the table.
    pub rows_seen: u64,
    /// A header record was dropped before intake.
    pub header_skipped: bool,
    /// Records with a field count outside 2, 5 or 6.
    pub odd_width: u64,
    /// Rows dropped because no decoder read their date.
    pub invalid_dates: u64,
    /// Rows whose open/high/low/close set was partial.
    pub incomplete_bars: u64,
    /// Rows repeating an already seen date.
    pub duplicate_dates: u64,
    /// Distinct decoded dates.
    pub known_dates: u64,
}

impl IngestStats {
    /// Rows that contributed nothing.
    pub fn dropped_rows(&self) -> u64 {
        self.invalid_dates
    }

    /// Rows that made it past date decoding.
    pub fn accepted_rows(&self) -> u64 {
        self.rows_seen - self.invalid_dates
    }
}

/// Lookups keyed by calendar date: presence count, bar, volume.
#[derive(Debug, Clone, Default)]
pub struct DayTable {
    presence: BTreeMap<CalendarDate, u32>,
    bars: BTreeMap<CalendarDate, PriceBar>,
    volumes: BTreeMap<CalendarDate, f64>,
    stats: IngestStats,
}

impl DayTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rows in any order.
    pub fn from_rows(rows: &[RawRow]) -> Self {
        let mut table = Self::new();
        table.add_rows(rows);
        table
    }

    /// Add a single row. Later rows overwrite the values they carry.
    pub fn add_row(&mut self, row: &RawRow) {
        self.stats.rows_seen += 1;

        let date = match date_normalizer::parse(&row.date) {
            Ok(date) => date,
            Err(e) => {
                self.stats.invalid_dates += 1;
                debug!(raw = %row.date, "Dropping row: {}", e);
                return;
            }
        };

        let seen = self.presence.entry(date).or_insert(0);
        if *seen > 0 {
            self.stats.duplicate_dates += 1;
        } else {
            self.stats.known_dates += 1;
        }
        *seen += 1;

        match row.bar() {
            Ok(Some(bar)) => {
                self.bars.insert(date, bar);
            }
            Ok(None) => {}
            Err(e) => {
                self.stats.incomplete_bars += 1;
                debug!(date = %date, "Treating bar as absent: {}", e);
            }
        }

        if let Some(volume) = row.volume {
            self.volumes.insert(date, volume);
        }
    }

    /// Add multiple rows, warning once if any were dropped.
    pub fn add_rows(&mut self, rows: &[RawRow]) {
        let dropped_before = self.stats.invalid_dates;
        for row in rows {
            self.add_row(row);
        }
        let dropped = self.stats.invalid_dates - dropped_before;
        if dropped > 0 {
            warn!(dropped, total = rows.len(), "Dropped rows with undecodable dates");
        }
    }

    /// Record that a header record was skipped upstream.
    pub fn mark_header_skipped(&mut self) {
        self.stats.header_skipped = true;
    }

    /// Record how many upstream records had an unexpected field count.
    pub fn count_odd_width(&mut self, records: u64) {
        self.stats.odd_width += records;
    }

    /// Earliest known date.
    pub fn first_date(&self) -> Option<CalendarDate> {
        self.presence.keys().next().copied()
    }

    /// Latest known date.
    pub fn last_date(&self) -> Option<CalendarDate> {
        self.presence.keys().next_back().copied()
    }

    /// Number of rows seen for a date.
    pub fn presence(&self, date: &CalendarDate) -> u32 {
        self.presence.get(date).copied().unwrap_or(0)
    }

    /// Data known for one date.
    pub fn day(&self, date: &CalendarDate) -> DayData {
        DayData {
            bar: self.bars.get(date).copied(),
            volume: self.volumes.get(date).copied(),
        }
    }

    /// Every calendar day from the first to the last known date, inclusive.
    pub fn walk(&self) -> impl Iterator<Item = (CalendarDate, DayData)> + '_ {
        let range = self.first_date().zip(self.last_date());
        let first = range.map(|(first, _)| first);
        std::iter::successors(first, move |date| {
            let (_, last) = range?;
            date.succ().filter(|next| *next <= last)
        })
        .map(move |date| (date, self.day(&date)))
    }

    /// No decodable rows were added.
    pub fn is_empty(&self) -> bool {
        self.presence.is_empty()
    }

    /// Intake statistics so far.
    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }
}
