// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Dashboard composition
//!
//! One pure pass per input change: resolve scope, filter visits, then fold
//! the filtered set into trends, scores, category rollups and the
//! distribution. The filter state is an explicit [`DashboardContext`] value.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::analytics::categories::{CategoryBreakdown, CategoryClassifier};
use crate::analytics::distribution::{distribute, DistributionEntry};
use crate::analytics::qualitative::{score, QualitativeScore};
use crate::analytics::trends::{aggregate, TimeSeries};
use crate::config::DashboardConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::filter::VisitFilter;
use crate::models::{Role, VisitRecord};
use crate::org::OrgTree;
use crate::scope::{Scope, ScopeResolver, ScopeSelection, Viewer};
use crate::timeframe::{TimeWindow, TimeframeToken};

// ============================================================================
// Dashboard Types
// ============================================================================

/// Everything the user picked, plus the instant timeframes resolve against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardContext {
    pub viewer: Viewer,
    #[serde(default)]
    pub selection: ScopeSelection,
    /// Empty means every branch
    #[serde(default)]
    pub branch_ids: BTreeSet<String>,
    #[serde(default)]
    pub timeframe: Option<TimeframeToken>,
    pub now: DateTime<Utc>,
}

impl DashboardContext {
    pub fn new(viewer: Viewer, now: DateTime<Utc>) -> Self {
        Self {
            viewer,
            selection: ScopeSelection::default(),
            branch_ids: BTreeSet::new(),
            timeframe: None,
            now,
        }
    }

    pub fn with_selection(mut self, selection: ScopeSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_branches<I, S>(mut self, branch_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.branch_ids = branch_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeframe(mut self, timeframe: Option<TimeframeToken>) -> Self {
        self.timeframe = timeframe;
        self
    }

    /// Tier the distribution groups by for this viewer and selection
    pub fn grouping_role(&self) -> Role {
        self.selection.grouping_role(self.viewer.role())
    }
}

/// Headline numbers for the filtered set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewMetrics {
    /// BHRs in scope
    pub scope_size: usize,
    pub total_visits: u64,
    pub branches_visited: u64,
    pub active_authors: u64,
    pub first_visit: Option<NaiveDate>,
    pub last_visit: Option<NaiveDate>,
}

/// Chart-ready output of one dashboard pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub viewer: Viewer,
    pub timeframe: Option<TimeframeToken>,
    pub window: Option<TimeWindow>,
    pub overview: OverviewMetrics,
    pub trends: TimeSeries,
    pub scores: Vec<QualitativeScore>,
    pub categories: CategoryBreakdown,
    pub distribution_role: Role,
    pub distribution: Vec<DistributionEntry>,
}

// ============================================================================
// Dashboard Engine
// ============================================================================

/// Builds dashboards for a fixed configuration
#[derive(Debug, Clone)]
pub struct DashboardEngine {
    config: DashboardConfig,
    classifier: CategoryClassifier,
}

impl DashboardEngine {
    pub fn new(config: DashboardConfig) -> Self {
        let classifier = CategoryClassifier::new(config.category_order.clone());
        Self { config, classifier }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Timeframe in effect: the caller's pick, else the configured default
    pub fn timeframe(&self, ctx: &DashboardContext) -> Option<TimeframeToken> {
        ctx.timeframe.or(self.config.default_timeframe)
    }

    pub fn window(&self, ctx: &DashboardContext) -> Option<TimeWindow> {
        self.timeframe(ctx).map(|t| t.resolve(ctx.now))
    }

    pub fn scope(&self, tree: &OrgTree, ctx: &DashboardContext) -> Scope {
        ScopeResolver::new(tree).resolve(&ctx.viewer, &ctx.selection)
    }

    /// Resolve and filter without aggregating
    pub fn filtered<'d>(
        &self,
        tree: &OrgTree,
        ctx: &DashboardContext,
        data: &'d Dataset,
    ) -> (Scope, Vec<&'d VisitRecord>) {
        let scope = self.scope(tree, ctx);
        let visits =
            VisitFilter::new(&scope, &ctx.branch_ids, self.window(ctx)).apply(&data.visits);
        (scope, visits)
    }

    /// Run the full pipeline. Fails only on a malformed org tree.
    pub fn build(&self, ctx: &DashboardContext, data: &Dataset) -> Result<DashboardSnapshot> {
        let tree = OrgTree::new(&data.actors);
        tree.validate()?;

        let (scope, visits) = self.filtered(&tree, ctx, data);
        log::debug!(
            "Dashboard for {}: {} BHRs in scope, {} of {} submitted visits after filtering",
            ctx.viewer.role(),
            scope.len(),
            visits.len(),
            data.submitted_visits().count()
        );

        let overview = self.calculate_overview(&scope, &visits);
        let trends = aggregate(visits.iter().copied(), &self.config.metrics);
        let scores = score(
            visits.iter().copied(),
            &self.config.questions,
            self.config.score_order,
        );
        let categories =
            self.classifier
                .classify(visits.iter().copied(), &data.branches, &self.config.metrics);
        let distribution_role = ctx.grouping_role();
        let distribution = distribute(visits.iter().copied(), &tree, distribution_role)?;

        Ok(DashboardSnapshot {
            generated_at: ctx.now,
            viewer: ctx.viewer.clone(),
            timeframe: self.timeframe(ctx),
            window: self.window(ctx),
            overview,
            trends,
            scores,
            categories,
            distribution_role,
            distribution,
        })
    }

    fn calculate_overview(&self, scope: &Scope, visits: &[&VisitRecord]) -> OverviewMetrics {
        let branches: HashSet<&str> = visits.iter().map(|v| v.branch_id.as_str()).collect();
        let authors: HashSet<&str> = visits.iter().map(|v| v.author_id.as_str()).collect();
        let days: Vec<NaiveDate> = visits.iter().filter_map(|v| v.visit_day()).collect();

        OverviewMetrics {
            scope_size: scope.len(),
            total_visits: visits.len() as u64,
            branches_visited: branches.len() as u64,
            active_authors: authors.len() as u64,
            first_visit: days.iter().min().copied(),
            last_visit: days.iter().max().copied(),
        }
    }
}

impl Default for DashboardEngine {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metric;
    use crate::models::{Actor, Answer, Branch};
    use chrono::TimeZone;

    fn dataset() -> Dataset {
        Dataset::new(
            vec![
                Actor::new("c1", Role::Chr, None),
                Actor::new("v1", Role::Vhr, Some("c1")),
                Actor::new("z1", Role::Zhr, Some("v1")),
                Actor::new("z2", Role::Zhr, Some("v1")),
                Actor::new("b1", Role::Bhr, Some("z1")),
                Actor::new("b2", Role::Bhr, Some("z2")),
            ],
            vec![Branch::new("br1", Some("Gold")), Branch::new("br2", None)],
            vec![
                VisitRecord::new("v1", "b1", "br1", "2024-05-20")
                    .with_metric("manning_percentage", Some(80.0))
                    .with_answer("employees_safe", Some(Answer::Yes)),
                VisitRecord::new("v2", "b2", "br2", "2024-05-22")
                    .with_metric("manning_percentage", Some(90.0))
                    .with_metric("cwt_cases", Some(2.0)),
                VisitRecord::new("v3", "b2", "br2", "2023-01-01"),
            ],
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generate_dashboard() {
        let engine = DashboardEngine::default();
        let ctx = DashboardContext::new(Viewer::Chr, now())
            .with_timeframe(Some(TimeframeToken::PastMonth));

        let dashboard = engine.build(&ctx, &dataset()).unwrap();

        assert_eq!(dashboard.overview.total_visits, 2);
        assert_eq!(dashboard.overview.scope_size, 2);
        assert_eq!(dashboard.trends.len(), 3);
        assert_eq!(dashboard.trends[0].value(Metric::ManningPercentage), Some(80.0));
        assert_eq!(dashboard.categories.categories, vec!["Gold", "uncategorized"]);
        assert_eq!(dashboard.distribution_role, Role::Vhr);
        assert_eq!(dashboard.distribution[0].count, 2);
    }

    #[test]
    fn test_selection_narrows_every_output() {
        let engine = DashboardEngine::default();
        let ctx = DashboardContext::new(Viewer::Chr, now()).with_selection(ScopeSelection {
            zhr_ids: vec!["z1".into()],
            ..Default::default()
        });

        let dashboard = engine.build(&ctx, &dataset()).unwrap();
        assert_eq!(dashboard.overview.total_visits, 1);
        assert_eq!(dashboard.distribution_role, Role::Bhr);
        assert_eq!(dashboard.distribution[0].actor_id, "b1");
    }

    #[test]
    fn test_configured_default_timeframe_applies() {
        let config = DashboardConfig {
            default_timeframe: Some(TimeframeToken::PastWeek),
            ..Default::default()
        };
        let engine = DashboardEngine::new(config);
        let ctx = DashboardContext::new(Viewer::Chr, now());
        let dashboard = engine.build(&ctx, &dataset()).unwrap();
        assert_eq!(dashboard.timeframe, Some(TimeframeToken::PastWeek));
        assert_eq!(dashboard.overview.total_visits, 0);
        assert!(dashboard.trends.is_empty());
    }

    #[test]
    fn test_cyclic_org_is_rejected() {
        let mut data = dataset();
        data.actors.push(Actor::new("z9", Role::Zhr, Some("b9")));
        data.actors.push(Actor::new("b9", Role::Bhr, Some("z9")));
        let ctx = DashboardContext::new(Viewer::Chr, now());
        assert!(DashboardEngine::default().build(&ctx, &data).is_err());
    }
}
