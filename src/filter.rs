// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Visit filter pipeline
//!
//! Steps run in a fixed order: submitted only, author in scope, branch
//! restriction, time window. Output keeps input order.

use std::collections::BTreeSet;

use crate::models::VisitRecord;
use crate::scope::Scope;
use crate::timeframe::TimeWindow;

/// Filter over a visit collection
#[derive(Debug, Clone, Copy)]
pub struct VisitFilter<'a> {
    scope: &'a Scope,
    /// Empty means every branch
    branch_ids: &'a BTreeSet<String>,
    /// `None` means unbounded
    window: Option<TimeWindow>,
}

impl<'a> VisitFilter<'a> {
    pub fn new(
        scope: &'a Scope,
        branch_ids: &'a BTreeSet<String>,
        window: Option<TimeWindow>,
    ) -> Self {
        Self {
            scope,
            branch_ids,
            window,
        }
    }

    pub fn matches(&self, visit: &VisitRecord) -> bool {
        if !visit.is_submitted() {
            return false;
        }
        if !self.scope.contains(&visit.author_id) {
            return false;
        }
        if !self.branch_ids.is_empty() && !self.branch_ids.contains(&visit.branch_id) {
            return false;
        }
        match &self.window {
            None => true,
            Some(window) => match visit.visit_day() {
                Some(day) => window.contains_day(day),
                None => {
                    log::warn!(
                        "Dropping visit {} with unparseable date {:?}",
                        visit.id,
                        visit.visit_date
                    );
                    false
                }
            },
        }
    }

    pub fn apply<'v, I>(&self, visits: I) -> Vec<&'v VisitRecord>
    where
        I: IntoIterator<Item = &'v VisitRecord>,
    {
        visits.into_iter().filter(|v| self.matches(v)).collect()
    }
}

/// One-shot form of [`VisitFilter::apply`]
pub fn filter_visits<'v, I>(
    visits: I,
    scope: &Scope,
    branch_ids: &BTreeSet<String>,
    window: Option<TimeWindow>,
) -> Vec<&'v VisitRecord>
where
    I: IntoIterator<Item = &'v VisitRecord>,
{
    VisitFilter::new(scope, branch_ids, window).apply(visits)
}
