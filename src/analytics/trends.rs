// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Day-bucketed metric trends
//!
//! The series spans the first to last visit day actually present, one point
//! per day. A metric with nothing to fold on a day is `None` (a gap in the
//! trend line), never zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::metrics::Metric;
use crate::models::VisitRecord;

/// One day of a trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Folded value per metric, `None` for no data
    pub values: BTreeMap<Metric, Option<f64>>,
}

impl TrendPoint {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied().flatten()
    }
}

/// Date-ordered, gap-filled series
pub type TimeSeries = Vec<TrendPoint>;

/// Fold visits into a daily series for the requested metrics.
///
/// Visits whose date does not parse are left out. No visits, or no parseable
/// dates, gives an empty series.
pub fn aggregate<'v, I>(visits: I, metrics: &[Metric]) -> TimeSeries
where
    I: IntoIterator<Item = &'v VisitRecord>,
{
    let mut by_day: BTreeMap<NaiveDate, Vec<&VisitRecord>> = BTreeMap::new();
    for visit in visits {
        match visit.visit_day() {
            Some(day) => by_day.entry(day).or_default().push(visit),
            None => log::debug!("Skipping visit {} with unparseable date", visit.id),
        }
    }

    let (Some(&first), Some(&last)) = (by_day.keys().next(), by_day.keys().next_back()) else {
        return Vec::new();
    };

    let mut series = Vec::with_capacity((last - first).num_days() as usize + 1);
    let mut day = first;
    loop {
        let bucket = by_day.get(&day).map(Vec::as_slice).unwrap_or(&[]);
        let values = metrics
            .iter()
            .map(|metric| {
                let folded = metric.fold(bucket.iter().filter_map(|v| v.metric(metric.key())));
                (*metric, folded)
            })
            .collect();
        series.push(TrendPoint { date: day, values });

        if day >= last {
            break;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    series
}

/// Sum of every non-gap value of `metric` across the series
pub fn series_total(series: &[TrendPoint], metric: Metric) -> f64 {
    series.iter().filter_map(|p| p.value(metric)).sum()
}
