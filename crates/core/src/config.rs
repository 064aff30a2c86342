//! Configuration structures for the dayaxis system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Main configuration for one series build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Axis density policy.
    pub granularity: Granularity,
    /// Label configuration.
    pub labels: LabelConfig,
    /// Compatibility switches for inherited behavior.
    pub compat: CompatMode,
}

impl AxisConfig {
    /// Create a configuration for the given granularity with default labels.
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the locale arrays have the expected shape.
    pub fn validate(&self) -> Result<()> {
        if self.labels.weekday_names.len() != WEEKDAY_NAME_COUNT {
            return Err(Error::config(format!(
                "weekday_names needs {} entries (index 0 unused), got {}",
                WEEKDAY_NAME_COUNT,
                self.labels.weekday_names.len()
            )));
        }
        if self.labels.month_names.len() != MONTH_NAME_COUNT {
            return Err(Error::config(format!(
                "month_names needs {} entries (index 0 unused), got {}",
                MONTH_NAME_COUNT,
                self.labels.month_names.len()
            )));
        }
        Ok(())
    }
}

/// Which calendar days become axis points, and how their data is combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Only dates present in the data.
    #[default]
    EveryKnownDate,
    /// Every calendar day in range, gaps as placeholders.
    AllCalendarDays,
    /// Monday to Friday, gaps as placeholders.
    Weekdays,
    /// One aggregated point per week.
    Weeks,
    /// One aggregated point per month.
    Months,
}

impl Granularity {
    pub const ALL: [Granularity; 5] = [
        Granularity::EveryKnownDate,
        Granularity::AllCalendarDays,
        Granularity::Weekdays,
        Granularity::Weeks,
        Granularity::Months,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::EveryKnownDate => "every_known_date",
            Granularity::AllCalendarDays => "all_calendar_days",
            Granularity::Weekdays => "weekdays",
            Granularity::Weeks => "weeks",
            Granularity::Months => "months",
        }
    }

    /// Default label field visibility: (weekday, day, month, year).
    pub fn default_visibility(self) -> FieldVisibility {
        match self {
            Granularity::EveryKnownDate | Granularity::Weekdays | Granularity::AllCalendarDays => {
                FieldVisibility {
                    weekday: true,
                    day: true,
                    month: true,
                    year: false,
                }
            }
            Granularity::Weeks => FieldVisibility {
                weekday: false,
                day: true,
                month: true,
                year: false,
            },
            Granularity::Months => FieldVisibility {
                weekday: false,
                day: false,
                month: true,
                year: true,
            },
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "every_known_date" | "data" => Ok(Granularity::EveryKnownDate),
            "all_calendar_days" | "days" => Ok(Granularity::AllCalendarDays),
            "weekdays" => Ok(Granularity::Weekdays),
            "weeks" => Ok(Granularity::Weeks),
            "months" => Ok(Granularity::Months),
            other => Err(Error::config(format!("unknown granularity: {other}"))),
        }
    }
}

/// Resolved on/off state of each label field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldVisibility {
    pub weekday: bool,
    pub day: bool,
    pub month: bool,
    pub year: bool,
}

/// Entries in `weekday_names`, index 0 being a filler.
pub const WEEKDAY_NAME_COUNT: usize = 8;
/// Entries in `month_names`, index 0 being a filler.
pub const MONTH_NAME_COUNT: usize = 13;

/// Label configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Elide fields that match the previous label.
    pub changes_only: bool,
    /// Overrides for the per-granularity defaults.
    pub show_weekday: Option<bool>,
    pub show_day: Option<bool>,
    pub show_month: Option<bool>,
    pub show_year: Option<bool>,
    /// Weekday names indexed 1 (Monday) to 7 (Sunday).
    pub weekday_names: Vec<String>,
    /// Month names indexed 1 (January) to 12 (December).
    pub month_names: Vec<String>,
}

impl LabelConfig {
    /// Apply the overrides on top of the granularity defaults.
    pub fn visibility(&self, granularity: Granularity) -> FieldVisibility {
        let defaults = granularity.default_visibility();
        FieldVisibility {
            weekday: self.show_weekday.unwrap_or(defaults.weekday),
            day: self.show_day.unwrap_or(defaults.day),
            month: self.show_month.unwrap_or(defaults.month),
            year: self.show_year.unwrap_or(defaults.year),
        }
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            changes_only: true,
            show_weekday: None,
            show_day: None,
            show_month: None,
            show_year: None,
            weekday_names: ["", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            month_names: [
                "", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov",
                "Dec",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Switches preserving behavior whose intent is unconfirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatMode {
    /// Read a two-field row's second field as volume.
    /// When off, it is read positionally as `open`.
    pub two_field_volume: bool,
    /// Average volume over monthly buckets as weekly buckets do.
    pub monthly_volume: bool,
}

impl Default for CompatMode {
    fn default() -> Self {
        Self {
            two_field_volume: true,
            monthly_volume: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AxisConfig::default();
        assert_eq!(config.granularity, Granularity::EveryKnownDate);
        assert!(config.labels.changes_only);
        assert_eq!(config.labels.weekday_names[1], "Mon");
        assert_eq!(config.labels.month_names[12], "Dec");
        assert!(config.compat.two_field_volume);
        assert!(!config.compat.monthly_volume);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = AxisConfig::from_json(
            r#"{"granularity": "weeks", "labels": {"changes_only": false, "show_year": true}}"#,
        )
        .unwrap();
        assert_eq!(config.granularity, Granularity::Weeks);
        assert!(!config.labels.changes_only);
        assert_eq!(config.labels.show_year, Some(true));
        assert_eq!(config.labels.month_names.len(), MONTH_NAME_COUNT);
        assert_eq!(config.compat, CompatMode::default());
    }

    #[test]
    fn test_from_json_rejects_short_names() {
        let err = AxisConfig::from_json(r#"{"labels": {"month_names": ["", "Jan"]}}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_json_rejects_bad_granularity() {
        let err = AxisConfig::from_json(r#"{"granularity": "hours"}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_granularity_from_str() {
        assert_eq!("data".parse::<Granularity>().unwrap(), Granularity::EveryKnownDate);
        assert_eq!("days".parse::<Granularity>().unwrap(), Granularity::AllCalendarDays);
        assert_eq!(" Weeks ".parse::<Granularity>().unwrap(), Granularity::Weeks);
        for g in Granularity::ALL {
            assert_eq!(g.as_str().parse::<Granularity>().unwrap(), g);
        }
        assert!("hourly".parse::<Granularity>().is_err());
    }

    #[test]
    fn test_visibility_overrides() {
        let mut labels = LabelConfig::default();
        let months = labels.visibility(Granularity::Months);
        assert!(!months.weekday && !months.day && months.month && months.year);

        labels.show_day = Some(true);
        labels.show_year = Some(false);
        let months = labels.visibility(Granularity::Months);
        assert!(months.day);
        assert!(!months.year);

        let weeks = labels.visibility(Granularity::Weeks);
        assert!(!weeks.weekday && weeks.day && weeks.month && !weeks.year);
    }
}
