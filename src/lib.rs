// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! HR dashboard (hrdash) - Library
//!
//! Scoping and aggregation engine for branch visit reports filed across a
//! four-tier HR hierarchy (BHR -> ZHR -> VHR -> CHR).
//!
//! ## Pipeline
//!
//! - **Scope** - a viewer plus a partial selection resolves to the set of
//!   in-scope BHR ids
//! - **Filter** - submitted visits by in-scope authors, optional branch set,
//!   optional timeframe
//! - **Analytics** - day-bucketed metric trends, 0-5 qualitative scores,
//!   branch category rollups and per-node visit distributions
//!
//! ```rust,ignore
//! use hrdash::{DashboardContext, DashboardEngine, Dataset, TimeframeToken, Viewer};
//!
//! let data = Dataset::load_dir("exports".as_ref())?;
//! let ctx = DashboardContext::new(Viewer::Vhr("v-north".into()), chrono::Utc::now())
//!     .with_timeframe(Some(TimeframeToken::Last3Months));
//! let snapshot = DashboardEngine::default().build(&ctx, &data)?;
//! println!("{} visits in scope", snapshot.overview.total_visits);
//! ```
//!
//! Every stage is a pure function of its inputs. Recompute the whole
//! snapshot when any input changes.

pub mod analytics;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod models;
pub mod org;
pub mod scope;
pub mod timeframe;

// Re-export commonly used items
pub use analytics::{
    aggregate, classify, distribute, score, CategoryBreakdown, CategoryClassifier,
    DashboardContext, DashboardEngine, DashboardSnapshot, DistributionEntry, OverviewMetrics,
    QualitativeScore, Question, ScoreOrder, TimeSeries, TrendPoint,
};
pub use config::DashboardConfig;
pub use dataset::Dataset;
pub use error::{DashError, Result};
pub use filter::{filter_visits, VisitFilter};
pub use metrics::{Metric, MetricKind};
pub use models::{Actor, Answer, Branch, Role, VisitRecord, VisitStatus};
pub use org::OrgTree;
pub use scope::{resolve, Scope, ScopeResolver, ScopeSelection, Viewer};
pub use timeframe::{TimeWindow, TimeframeToken};
