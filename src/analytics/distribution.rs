// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Visit counts grouped by org node

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;
use crate::models::{Role, VisitRecord};
use crate::org::OrgTree;

/// One slice of a distribution chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionEntry {
    pub actor_id: String,
    pub label: String,
    pub count: u64,
}

/// Count visits per ancestor at `grouping_role`, largest first.
///
/// A visit whose author has no ancestor at that tier is left out rather than
/// attributed elsewhere. Ties are broken by label, then actor id.
pub fn distribute<'v, I>(
    visits: I,
    tree: &OrgTree,
    grouping_role: Role,
) -> Result<Vec<DistributionEntry>>
where
    I: IntoIterator<Item = &'v VisitRecord>,
{
    let mut counts: HashMap<&str, u64> = HashMap::new();
    let mut skipped = 0usize;

    for visit in visits {
        match tree.ancestor_at(&visit.author_id, grouping_role)? {
            Some(ancestor) => *counts.entry(ancestor.id.as_str()).or_insert(0) += 1,
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        log::debug!("{} visits have no {} ancestor", skipped, grouping_role);
    }

    let mut entries: Vec<DistributionEntry> = counts
        .into_iter()
        .filter_map(|(id, count)| {
            tree.get(id).map(|actor| DistributionEntry {
                actor_id: actor.id.clone(),
                label: actor.label().to_string(),
                count,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.label.cmp(&b.label))
            .then_with(|| a.actor_id.cmp(&b.actor_id))
    });
    Ok(entries)
}
