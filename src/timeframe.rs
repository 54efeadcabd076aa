// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Relative timeframes resolved against "now"

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashError;

/// Named relative window offered by the dashboard filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeframeToken {
    #[serde(alias = "pastWeek")]
    PastWeek,
    #[serde(alias = "pastMonth")]
    PastMonth,
    #[serde(rename = "last-3-months", alias = "last3Months")]
    Last3Months,
    #[serde(rename = "last-6-months", alias = "last6Months")]
    Last6Months,
    #[serde(alias = "lastYear")]
    LastYear,
    #[serde(rename = "last-3-years", alias = "last3Years")]
    Last3Years,
}

impl TimeframeToken {
    pub const ALL: [TimeframeToken; 6] = [
        TimeframeToken::PastWeek,
        TimeframeToken::PastMonth,
        TimeframeToken::Last3Months,
        TimeframeToken::Last6Months,
        TimeframeToken::LastYear,
        TimeframeToken::Last3Years,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PastWeek => "past-week",
            Self::PastMonth => "past-month",
            Self::Last3Months => "last-3-months",
            Self::Last6Months => "last-6-months",
            Self::LastYear => "last-year",
            Self::Last3Years => "last-3-years",
        }
    }

    /// Start of the window, `None` only if the calendar arithmetic overflows
    fn start_from(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::PastWeek => now.checked_sub_signed(Duration::days(7)),
            Self::PastMonth => now.checked_sub_months(Months::new(1)),
            Self::Last3Months => now.checked_sub_months(Months::new(3)),
            Self::Last6Months => now.checked_sub_months(Months::new(6)),
            Self::LastYear => now.checked_sub_months(Months::new(12)),
            Self::Last3Years => now.checked_sub_months(Months::new(36)),
        }
    }

    /// Resolve into a concrete `[start, end)` window where `end` is the end of
    /// `now`'s UTC day.
    pub fn resolve(&self, now: DateTime<Utc>) -> TimeWindow {
        let end = end_of_day(now);
        match self.start_from(now) {
            Some(start) => TimeWindow { start, end },
            None => TimeWindow::empty_at(end),
        }
    }
}

impl fmt::Display for TimeframeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeframeToken {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "pastweek" => Ok(Self::PastWeek),
            "pastmonth" => Ok(Self::PastMonth),
            "last3months" => Ok(Self::Last3Months),
            "last6months" => Ok(Self::Last6Months),
            "lastyear" => Ok(Self::LastYear),
            "last3years" => Ok(Self::Last3Years),
            _ => Err(DashError::UnknownTimeframe(s.to_string())),
        }
    }
}

/// Half-open `[start, end)` interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    fn empty_at(at: DateTime<Utc>) -> Self {
        Self { start: at, end: at }
    }

    /// A window whose start is not before its end matches nothing
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        !self.is_empty() && instant >= self.start && instant < self.end
    }

    /// A calendar day is placed at its UTC midnight
    pub fn contains_day(&self, day: NaiveDate) -> bool {
        day.and_hms_opt(0, 0, 0)
            .map(|dt| self.contains(dt.and_utc()))
            .unwrap_or(false)
    }
}

/// First instant of the day after `now`
fn end_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(now)
}
