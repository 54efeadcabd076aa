// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Metric catalog
//!
//! Every numeric field a visit report can carry is listed here together with
//! how it rolls up. Requesting a key outside this catalog is a configuration
//! error and is rejected when parsing, never at aggregation time.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::DashError;

/// How a metric is folded across visits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Event counts: plain sum
    Sum,
    /// Percentages: arithmetic mean rounded to 2 decimals
    Average,
}

/// Numeric field on a visit report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ManningPercentage,
    AttritionPercentage,
    NonVendorPercentage,
    ErPercentage,
    CwtCases,
    NewEmployeesTotal,
    NewEmployeesCovered,
    StarEmployeesTotal,
    StarEmployeesCovered,
}

static BY_KEY: Lazy<HashMap<&'static str, Metric>> =
    Lazy::new(|| Metric::ALL.iter().map(|m| (m.key(), *m)).collect());

impl Metric {
    pub const ALL: [Metric; 9] = [
        Metric::ManningPercentage,
        Metric::AttritionPercentage,
        Metric::NonVendorPercentage,
        Metric::ErPercentage,
        Metric::CwtCases,
        Metric::NewEmployeesTotal,
        Metric::NewEmployeesCovered,
        Metric::StarEmployeesTotal,
        Metric::StarEmployeesCovered,
    ];

    /// Field name used in visit records
    pub fn key(&self) -> &'static str {
        match self {
            Self::ManningPercentage => "manning_percentage",
            Self::AttritionPercentage => "attrition_percentage",
            Self::NonVendorPercentage => "non_vendor_percentage",
            Self::ErPercentage => "er_percentage",
            Self::CwtCases => "cwt_cases",
            Self::NewEmployeesTotal => "new_employees_total",
            Self::NewEmployeesCovered => "new_employees_covered",
            Self::StarEmployeesTotal => "star_employees_total",
            Self::StarEmployeesCovered => "star_employees_covered",
        }
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            Self::ManningPercentage
            | Self::AttritionPercentage
            | Self::NonVendorPercentage
            | Self::ErPercentage => MetricKind::Average,
            Self::CwtCases
            | Self::NewEmployeesTotal
            | Self::NewEmployeesCovered
            | Self::StarEmployeesTotal
            | Self::StarEmployeesCovered => MetricKind::Sum,
        }
    }

    /// Chart legend text
    pub fn label(&self) -> &'static str {
        match self {
            Self::ManningPercentage => "Manning %",
            Self::AttritionPercentage => "Attrition %",
            Self::NonVendorPercentage => "Non-Vendor %",
            Self::ErPercentage => "ER %",
            Self::CwtCases => "CWT Cases",
            Self::NewEmployeesTotal => "New Employees",
            Self::NewEmployeesCovered => "New Employees Covered",
            Self::StarEmployeesTotal => "Star Employees",
            Self::StarEmployeesCovered => "Star Employees Covered",
        }
    }

    /// Fold the present values of one bucket. `None` when nothing contributed.
    pub fn fold<I>(&self, values: I) -> Option<f64>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut total = 0.0;
        let mut count = 0usize;
        for value in values {
            total += value;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        match self.kind() {
            MetricKind::Sum => Some(total),
            MetricKind::Average => Some(round2(total / count as f64)),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BY_KEY
            .get(s.trim())
            .copied()
            .ok_or_else(|| DashError::UnknownMetric(s.to_string()))
    }
}

/// Round half away from zero to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
