// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Per-category rollups
//!
//! Visits are joined to their branch's category and folded into one snapshot
//! number per category and metric. Display order is the preferred list first,
//! then other categories alphabetically, then `uncategorized`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::metrics::Metric;
use crate::models::{Branch, VisitRecord};

/// Bucket for visits whose branch has no category
pub const UNCATEGORIZED: &str = "uncategorized";

/// Preferred display order when no configuration overrides it
pub const DEFAULT_CATEGORY_ORDER: [&str; 5] = ["Gold", "Silver", "Bronze", "Platinum", "Diamond"];

/// Category rollup over a filtered visit set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    #[serde(rename = "categoriesInDisplayOrder")]
    pub categories: Vec<String>,
    /// category -> metric -> folded value (`None` when nothing contributed)
    #[serde(rename = "perCategoryMetric")]
    pub metrics: BTreeMap<String, BTreeMap<Metric, Option<f64>>>,
    #[serde(rename = "visitCountByCategory")]
    pub visit_counts: BTreeMap<String, u64>,
}

impl CategoryBreakdown {
    pub fn value(&self, category: &str, metric: Metric) -> Option<f64> {
        self.metrics
            .get(category)
            .and_then(|m| m.get(&metric))
            .copied()
            .flatten()
    }

    pub fn visits(&self, category: &str) -> u64 {
        self.visit_counts.get(category).copied().unwrap_or(0)
    }
}

/// Groups visits by branch category
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    preferred: Vec<String>,
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORY_ORDER.iter().map(|c| c.to_string()).collect())
    }
}

impl CategoryClassifier {
    pub fn new(preferred: Vec<String>) -> Self {
        Self { preferred }
    }

    /// Sort categories into display order
    pub fn order(&self, categories: &mut [String]) {
        let rank = |name: &str| -> usize {
            if name == UNCATEGORIZED {
                return self.preferred.len() + 1;
            }
            self.preferred
                .iter()
                .position(|p| p == name)
                .unwrap_or(self.preferred.len())
        };
        categories.sort_by(|a, b| {
            rank(a.as_str())
                .cmp(&rank(b.as_str()))
                .then_with(|| a.cmp(b))
        });
    }

    pub fn classify<'v, I>(
        &self,
        visits: I,
        branches: &[Branch],
        metrics: &[Metric],
    ) -> CategoryBreakdown
    where
        I: IntoIterator<Item = &'v VisitRecord>,
    {
        let category_of: HashMap<&str, &str> = branches
            .iter()
            .filter_map(|b| {
                b.category
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(|c| (b.id.as_str(), c))
            })
            .collect();

        let mut grouped: BTreeMap<String, Vec<&VisitRecord>> = BTreeMap::new();
        for visit in visits {
            let category = category_of
                .get(visit.branch_id.as_str())
                .copied()
                .unwrap_or(UNCATEGORIZED);
            grouped.entry(category.to_string()).or_default().push(visit);
        }

        let mut categories: Vec<String> = grouped.keys().cloned().collect();
        self.order(&mut categories);

        let mut breakdown = CategoryBreakdown {
            categories,
            ..Default::default()
        };
        for (category, bucket) in grouped {
            let values = metrics
                .iter()
                .map(|metric| {
                    let folded = metric.fold(bucket.iter().filter_map(|v| v.metric(metric.key())));
                    (*metric, folded)
                })
                .collect();
            breakdown
                .visit_counts
                .insert(category.clone(), bucket.len() as u64);
            breakdown.metrics.insert(category, values);
        }
        breakdown
    }
}

/// Classify with the default category order
pub fn classify<'v, I>(visits: I, branches: &[Branch], metrics: &[Metric]) -> CategoryBreakdown
where
    I: IntoIterator<Item = &'v VisitRecord>,
{
    CategoryClassifier::default().classify(visits, branches, metrics)
}
