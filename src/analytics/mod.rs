// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Analytics module
//!
//! Folds filtered visit sets into chart-ready structures.

pub mod categories;
pub mod dashboard;
pub mod distribution;
pub mod qualitative;
pub mod trends;

pub use categories::{
    classify, CategoryBreakdown, CategoryClassifier, DEFAULT_CATEGORY_ORDER, UNCATEGORIZED,
};
pub use dashboard::*;
pub use distribution::{distribute, DistributionEntry};
pub use qualitative::{score, QualitativeScore, Question, ScoreOrder};
pub use trends::{aggregate, series_total, TimeSeries, TrendPoint};
