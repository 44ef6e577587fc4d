// Trailing time windows offered by the dashboard
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindow {
    #[default]
    Last7Days,
    Last14Days,
    Last21Days,
    Last30Days,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::Last7Days,
        TimeWindow::Last14Days,
        TimeWindow::Last21Days,
        TimeWindow::Last30Days,
    ];

    pub fn days(&self) -> i64 {
        match self {
            TimeWindow::Last7Days => 7,
            TimeWindow::Last14Days => 14,
            TimeWindow::Last21Days => 21,
            TimeWindow::Last30Days => 30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::Last7Days => "Last 7 Days",
            TimeWindow::Last14Days => "Last 14 Days",
            TimeWindow::Last21Days => "Last 21 Days",
            TimeWindow::Last30Days => "Last 30 Days",
        }
    }

    pub fn from_days(days: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.days() == days)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts either the day count (`"14"`) or the control label (`"Last 14 Days"`).
impl FromStr for TimeWindow {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(days) = trimmed.parse::<i64>() {
            return Self::from_days(days).ok_or_else(|| DashboardError::UnknownWindow(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|w| w.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DashboardError::UnknownWindow(s.to_string()))
    }
}

impl Serialize for TimeWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Configuration stores the window as a bare day count.
impl<'de> Deserialize<'de> for TimeWindow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let days = i64::deserialize(deserializer)?;
        Self::from_days(days)
            .ok_or_else(|| serde::de::Error::custom(format!("unsupported window of {days} days")))
    }
}
