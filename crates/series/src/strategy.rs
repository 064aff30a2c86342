//! Per-granularity walk strategies.
//!
//! The bucketizer walks every calendar day in range and asks a strategy
//! four things: whether the day opens a new bucket, whether the day is kept,
//! to fold the day in, and to flush the finished bucket. Daily granularities
//! use one-day buckets; weeks and months average their weekday members.

use dayaxis_core::{CalendarDate, CompatMode, DayData, Granularity, PriceBar};
use tracing::trace;

/// A finished bucket, ready to become an axis point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emission {
    /// Date the point is filed under.
    pub date: CalendarDate,
    pub day: DayData,
    /// Some member carried a bar or a volume, even if the point drops it.
    pub has_data: bool,
}

/// Walk capability shared by all granularities.
pub trait BucketStrategy {
    /// Whether a walked day takes part in the series.
    fn keeps_day(&self, date: &CalendarDate, day: &DayData) -> bool;

    /// Whether `date` opens a new bucket, closing the one before it.
    fn starts_bucket(&self, previous: Option<&CalendarDate>, date: &CalendarDate) -> bool;

    /// Fold a kept day into the open bucket.
    fn add_day(&mut self, date: CalendarDate, day: DayData);

    /// Close the open bucket. `None` when it never received a day.
    fn flush_bucket(&mut self) -> Option<Emission>;
}

/// Pick the strategy for a granularity.
pub fn strategy_for(granularity: Granularity, compat: CompatMode) -> Box<dyn BucketStrategy> {
    match granularity {
        Granularity::EveryKnownDate => Box::new(DailyStrategy::new(DailyRule::KnownDates)),
        Granularity::AllCalendarDays => Box::new(DailyStrategy::new(DailyRule::AllDays)),
        Granularity::Weekdays => Box::new(DailyStrategy::new(DailyRule::Weekdays)),
        Granularity::Weeks => Box::new(BucketedStrategy::new(Boundary::Week, true)),
        Granularity::Months => {
            Box::new(BucketedStrategy::new(Boundary::Month, compat.monthly_volume))
        }
    }
}

/// Which days a one-day-per-point strategy keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyRule {
    /// Days carrying a bar or a volume.
    KnownDates,
    /// Every day.
    AllDays,
    /// Monday to Friday.
    Weekdays,
}

/// One axis point per kept day, no aggregation.
#[derive(Debug)]
pub struct DailyStrategy {
    rule: DailyRule,
    pending: Option<Emission>,
}

impl DailyStrategy {
    pub fn new(rule: DailyRule) -> Self {
        Self {
            rule,
            pending: None,
        }
    }
}

impl BucketStrategy for DailyStrategy {
    fn keeps_day(&self, date: &CalendarDate, day: &DayData) -> bool {
        match self.rule {
            DailyRule::KnownDates => day.has_data(),
            DailyRule::AllDays => true,
            DailyRule::Weekdays => date.is_weekday(),
        }
    }

    fn starts_bucket(&self, _previous: Option<&CalendarDate>, _date: &CalendarDate) -> bool {
        true
    }

    fn add_day(&mut self, date: CalendarDate, day: DayData) {
        self.pending = Some(Emission {
            date,
            day,
            has_data: day.has_data(),
        });
    }

    fn flush_bucket(&mut self) -> Option<Emission> {
        self.pending.take()
    }
}

/// Where an aggregating strategy cuts its buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Day of week drops (Sunday to Monday).
    Week,
    /// Day of month drops (month end to the 1st).
    Month,
}

impl Boundary {
    fn position(self, date: &CalendarDate) -> u32 {
        match self {
            Boundary::Week => date.day_of_week(),
            Boundary::Month => date.day(),
        }
    }
}

/// Averages weekday members of a week or month into one point.
#[derive(Debug)]
pub struct BucketedStrategy {
    boundary: Boundary,
    average_volume: bool,
    acc: BucketAccumulator,
}

impl BucketedStrategy {
    pub fn new(boundary: Boundary, average_volume: bool) -> Self {
        Self {
            boundary,
            average_volume,
            acc: BucketAccumulator::default(),
        }
    }
}

impl BucketStrategy for BucketedStrategy {
    fn keeps_day(&self, date: &CalendarDate, _day: &DayData) -> bool {
        date.is_weekday()
    }

    fn starts_bucket(&self, previous: Option<&CalendarDate>, date: &CalendarDate) -> bool {
        previous.is_some_and(|prev| self.boundary.position(prev) > self.boundary.position(date))
    }

    fn add_day(&mut self, date: CalendarDate, day: DayData) {
        self.acc.add(date, &day);
    }

    fn flush_bucket(&mut self) -> Option<Emission> {
        std::mem::take(&mut self.acc).finish(self.average_volume)
    }
}

/// Running sums for the bucket being built.
#[derive(Debug, Clone, Default)]
pub struct BucketAccumulator {
    last_date: Option<CalendarDate>,
    members: u32,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    bar_count: u32,
    volume: f64,
    volume_count: u32,
}

impl BucketAccumulator {
    /// Fold in one member day.
    pub fn add(&mut self, date: CalendarDate, day: &DayData) {
        self.last_date = Some(date);
        self.members += 1;

        if let Some(bar) = day.bar {
            self.open += bar.open;
            self.high += bar.high;
            self.low += bar.low;
            self.close += bar.close;
            self.bar_count += 1;
        }
        if let Some(volume) = day.volume {
            self.volume += volume;
            self.volume_count += 1;
        }
    }

    /// Per-field means, filed under the last member date.
    pub fn finish(self, average_volume: bool) -> Option<Emission> {
        let date = self.last_date?;

        let bar = (self.bar_count > 0).then(|| {
            let n = f64::from(self.bar_count);
            PriceBar::new(self.open / n, self.high / n, self.low / n, self.close / n)
        });
        let volume = (average_volume && self.volume_count > 0)
            .then(|| self.volume / f64::from(self.volume_count));

        trace!(
            date = %date,
            members = self.members,
            bars = self.bar_count,
            volumes = self.volume_count,
            "Flushing bucket"
        );

        Some(Emission {
            date,
            day: DayData { bar, volume },
            has_data: self.bar_count > 0 || self.volume_count > 0,
        })
    }

    /// Member days folded in so far.
    pub fn members(&self) -> u32 {
        self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn close_day(close: f64, volume: Option<f64>) -> DayData {
        DayData {
            bar: Some(PriceBar::new(close, close, close, close)),
            volume,
        }
    }

    #[test]
    fn test_accumulator_means() {
        let mut acc = BucketAccumulator::default();
        acc.add(date(2002, 8, 5), &close_day(10.0, Some(100.0)));
        acc.add(date(2002, 8, 6), &close_day(20.0, None));
        acc.add(date(2002, 8, 7), &close_day(30.0, Some(300.0)));
        assert_eq!(acc.members(), 3);

        let emission = acc.finish(true).unwrap();
        assert_eq!(emission.date, date(2002, 8, 7));
        assert_relative_eq!(emission.day.bar.unwrap().close, 20.0);
        // Mean over members that had a volume
        assert_relative_eq!(emission.day.volume.unwrap(), 200.0);
    }

    #[test]
    fn test_accumulator_without_volume_averaging() {
        let mut acc = BucketAccumulator::default();
        acc.add(date(2002, 8, 5), &close_day(10.0, Some(100.0)));
        let emission = acc.finish(false).unwrap();
        assert!(emission.day.bar.is_some());
        assert_eq!(emission.day.volume, None);
    }

    #[test]
    fn test_accumulator_volume_only_keeps_data_flag() {
        let mut acc = BucketAccumulator::default();
        acc.add(date(2002, 8, 1), &DayData { bar: None, volume: Some(50.0) });
        let emission = acc.finish(false).unwrap();
        assert!(!emission.day.has_data());
        assert!(emission.has_data);
    }

    #[test]
    fn test_accumulator_empty_members() {
        let mut acc = BucketAccumulator::default();
        acc.add(date(2002, 8, 5), &DayData::default());
        let emission = acc.finish(true).unwrap();
        assert!(!emission.day.has_data());
        assert!(!emission.has_data);

        assert_eq!(BucketAccumulator::default().finish(true), None);
    }

    #[test]
    fn test_week_boundary() {
        let weeks = BucketedStrategy::new(Boundary::Week, true);
        let sun = date(2002, 8, 4);
        let mon = date(2002, 8, 5);
        let tue = date(2002, 8, 6);
        assert!(weeks.starts_bucket(Some(&sun), &mon));
        assert!(!weeks.starts_bucket(Some(&mon), &tue));
        assert!(!weeks.starts_bucket(None, &mon));
        assert!(!weeks.keeps_day(&sun, &DayData::default()));
    }

    #[test]
    fn test_month_boundary() {
        let months = BucketedStrategy::new(Boundary::Month, false);
        assert!(months.starts_bucket(Some(&date(2002, 7, 31)), &date(2002, 8, 1)));
        assert!(months.starts_bucket(Some(&date(2002, 2, 28)), &date(2002, 3, 1)));
        assert!(!months.starts_bucket(Some(&date(2002, 8, 1)), &date(2002, 8, 2)));
    }

    #[test]
    fn test_flush_resets_bucket() {
        let mut weeks = BucketedStrategy::new(Boundary::Week, true);
        weeks.add_day(date(2002, 8, 5), close_day(10.0, None));
        assert!(weeks.flush_bucket().is_some());
        assert_eq!(weeks.flush_bucket(), None);
    }

    #[test]
    fn test_daily_rules() {
        let sat = date(2002, 8, 3);
        let known = DailyStrategy::new(DailyRule::KnownDates);
        let weekdays = DailyStrategy::new(DailyRule::Weekdays);
        let all = DailyStrategy::new(DailyRule::AllDays);

        assert!(!known.keeps_day(&sat, &DayData::default()));
        assert!(known.keeps_day(&sat, &close_day(1.0, None)));
        assert!(!weekdays.keeps_day(&sat, &close_day(1.0, None)));
        assert!(all.keeps_day(&sat, &DayData::default()));
    }

    #[test]
    fn test_daily_flush_takes_pending() {
        let mut all = DailyStrategy::new(DailyRule::AllDays);
        assert_eq!(all.flush_bucket(), None);
        all.add_day(date(2002, 8, 3), DayData::default());
        assert_eq!(all.flush_bucket().map(|e| e.date), Some(date(2002, 8, 3)));
        assert_eq!(all.flush_bucket(), None);
    }
}
