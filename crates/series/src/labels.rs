//! Axis label text.
//!
//! A label is built from up to four fields in fixed order: weekday name,
//! day number, month name, year. With `changes_only` a field is printed only
//! when it differs from the same field of the previous label.

use dayaxis_core::{CalendarDate, FieldVisibility, Granularity, LabelConfig};

/// The raw field values behind one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelFields {
    pub weekday: u32,
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl From<&CalendarDate> for LabelFields {
    fn from(date: &CalendarDate) -> Self {
        Self {
            weekday: date.day_of_week(),
            day: date.day(),
            month: date.month(),
            year: date.year(),
        }
    }
}

/// Builds labels for one series, remembering the previous label's fields.
#[derive(Debug)]
pub struct LabelBuilder<'a> {
    config: &'a LabelConfig,
    visibility: FieldVisibility,
    previous: Option<LabelFields>,
}

impl<'a> LabelBuilder<'a> {
    pub fn new(config: &'a LabelConfig, granularity: Granularity) -> Self {
        Self {
            config,
            visibility: config.visibility(granularity),
            previous: None,
        }
    }

    /// Label for `date` given the previous label's fields.
    pub fn build(
        &self,
        date: &CalendarDate,
        previous: Option<&LabelFields>,
    ) -> (String, LabelFields) {
        let fields = LabelFields::from(date);
        let vis = self.visibility;
        let unchanged = |same: fn(&LabelFields, &LabelFields) -> bool| {
            previous.is_some_and(|p| same(p, &fields))
        };
        let shows = |enabled: bool, same: fn(&LabelFields, &LabelFields) -> bool| {
            enabled && !(self.config.changes_only && unchanged(same))
        };

        let mut label = String::new();
        if shows(vis.weekday, |a, b| a.weekday == b.weekday) {
            label.push_str(name(&self.config.weekday_names, fields.weekday));
            label.push(' ');
        }
        if shows(vis.day, |a, b| a.day == b.day) {
            label.push_str(&fields.day.to_string());
            label.push(' ');
        }
        if shows(vis.month, |a, b| a.month == b.month) {
            label.push_str(name(&self.config.month_names, fields.month));
            label.push(' ');
        }
        if shows(vis.year, |a, b| a.year == b.year) {
            label.push_str(&fields.year.to_string());
        }
        label.truncate(label.trim_end().len());

        (label, fields)
    }

    /// Label the next point of the series.
    pub fn next_label(&mut self, date: &CalendarDate) -> String {
        let (label, fields) = self.build(date, self.previous.as_ref());
        self.previous = Some(fields);
        label
    }
}

fn name(names: &[String], index: u32) -> &str {
    names.get(index as usize).map(String::as_str).unwrap_or("")
}

/// Width of a label in characters.
pub fn label_width(label: &str) -> usize {
    label.chars().count()
}
