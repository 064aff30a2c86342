//! The day walk.
//!
//! Combines the pre-pass, the per-granularity strategy, labelling and
//! assembly into one synchronous pass that returns a fresh [`ResultIndex`].

use dayaxis_core::{AxisConfig, AxisPoint, Granularity, RawRow, Result};
use dayaxis_ingestion::{parse_records, DayTable};
use tracing::debug;

use crate::{
    labels::LabelBuilder,
    result_index::ResultIndex,
    strategy::{strategy_for, Emission},
};

/// Turns raw rows into an indexed, labelled series.
#[derive(Debug, Clone, Default)]
pub struct Bucketizer {
    config: AxisConfig,
}

impl Bucketizer {
    /// Create a bucketizer, rejecting malformed label locales.
    pub fn new(config: AxisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Default labels for the given granularity.
    pub fn with_granularity(granularity: Granularity) -> Self {
        Self {
            config: AxisConfig::new(granularity),
        }
    }

    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    /// Build the series from rows in any order.
    pub fn run(&self, rows: &[RawRow]) -> ResultIndex {
        self.run_table(&DayTable::from_rows(rows))
    }

    /// Build the series from string field records, dropping a header record.
    pub fn run_records<R, F>(&self, records: &[R]) -> ResultIndex
    where
        R: AsRef<[F]>,
        F: AsRef<str>,
    {
        let parsed = parse_records(records, self.config.compat);
        let mut table = DayTable::from_rows(&parsed.rows);
        if parsed.header_skipped {
            table.mark_header_skipped();
        }
        table.count_odd_width(parsed.odd_width);
        self.run_table(&table)
    }

    /// Build the series from an already populated table.
    pub fn run_table(&self, table: &DayTable) -> ResultIndex {
        let granularity = self.config.granularity;
        let mut strategy = strategy_for(granularity, self.config.compat);
        let mut labels = LabelBuilder::new(&self.config.labels, granularity);
        let mut points = Vec::new();

        let mut emit = |emission: Emission| {
            let data = emission.day;
            let label = if emission.has_data {
                labels.next_label(&emission.date)
            } else {
                String::new()
            };
            points.push(AxisPoint {
                date: emission.date,
                key: emission.date.key(),
                label,
                index: points.len(),
                has_data: emission.has_data,
                bar: data.bar,
                volume: data.volume,
            });
        };

        let mut previous = None;
        for (date, day) in table.walk() {
            if strategy.starts_bucket(previous.as_ref(), &date) {
                if let Some(emission) = strategy.flush_bucket() {
                    emit(emission);
                }
            }
            previous = Some(date);
            if strategy.keeps_day(&date, &day) {
                strategy.add_day(date, day);
            }
        }
        if let Some(emission) = strategy.flush_bucket() {
            emit(emission);
        }

        debug!(
            granularity = %granularity,
            points = points.len(),
            first = ?table.first_date(),
            last = ?table.last_date(),
            "Built axis series"
        );

        ResultIndex::from_points(points, table.stats().clone())
    }
}
