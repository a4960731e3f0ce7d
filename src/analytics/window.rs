//! Time windows for scoped aggregation.

use chrono::{DateTime, Duration, Utc};
use std::str::FromStr;

/// Reporting window anchored at a caller-supplied `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    Last24Hours,
    #[default]
    Last30Days,
    Last90Days,
    /// No time filter; the lifetime scope.
    AllTime,
}

impl TimeWindow {
    /// Inclusive lower bound for the window, or `None` for [`Self::AllTime`].
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeWindow::Last24Hours => Some(now - Duration::hours(24)),
            TimeWindow::Last30Days => Some(now - Duration::days(30)),
            TimeWindow::Last90Days => Some(now - Duration::days(90)),
            TimeWindow::AllTime => None,
        }
    }

    /// The query-parameter spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Last24Hours => "24hours",
            TimeWindow::Last30Days => "30days",
            TimeWindow::Last90Days => "90days",
            TimeWindow::AllTime => "all",
        }
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24hours" => Ok(TimeWindow::Last24Hours),
            "30days" => Ok(TimeWindow::Last30Days),
            "90days" => Ok(TimeWindow::Last90Days),
            "all" => Ok(TimeWindow::AllTime),
            _ => Err(format!("Invalid time period: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_periods() {
        assert_eq!(
            TimeWindow::from_str("24hours").unwrap(),
            TimeWindow::Last24Hours
        );
        assert_eq!(
            TimeWindow::from_str("30days").unwrap(),
            TimeWindow::Last30Days
        );
        assert_eq!(
            TimeWindow::from_str("90days").unwrap(),
            TimeWindow::Last90Days
        );
        assert_eq!(TimeWindow::from_str("all").unwrap(), TimeWindow::AllTime);
        assert!(TimeWindow::from_str("7days").is_err());
    }

    #[test]
    fn test_cutoff_bounds() {
        let now = "2025-06-30T12:00:00Z".parse().unwrap();
        assert_eq!(
            TimeWindow::Last24Hours.cutoff(now),
            Some("2025-06-29T12:00:00Z".parse().unwrap())
        );
        assert_eq!(
            TimeWindow::Last30Days.cutoff(now),
            Some("2025-05-31T12:00:00Z".parse().unwrap())
        );
        assert!(TimeWindow::AllTime.cutoff(now).is_none());
    }

    #[test]
    fn test_default_is_30_days() {
        assert_eq!(TimeWindow::default(), TimeWindow::Last30Days);
    }
}
