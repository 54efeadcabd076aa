// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! In-memory org tree built from the flat actor list

use std::collections::{HashMap, HashSet};

use crate::error::{DashError, Result};
use crate::models::{Actor, Role};

/// Longest valid reporting chain: BHR -> ZHR -> VHR -> CHR
pub const MAX_TIER_DEPTH: usize = 4;

/// Lookup structure over all actors and their `reports_to` edges
#[derive(Debug, Clone, Default)]
pub struct OrgTree {
    actors: Vec<Actor>,
    index: HashMap<String, usize>,
    /// parent id -> indices of direct reports, in input order
    children: HashMap<String, Vec<usize>>,
}

impl OrgTree {
    /// Build the tree. Duplicate ids keep the first occurrence; edges to
    /// unknown parents are dropped.
    pub fn new(actors: &[Actor]) -> Self {
        let mut kept: Vec<Actor> = Vec::with_capacity(actors.len());
        let mut index = HashMap::with_capacity(actors.len());

        for actor in actors {
            if index.contains_key(&actor.id) {
                log::warn!("Duplicate actor id {}, keeping first occurrence", actor.id);
                continue;
            }
            index.insert(actor.id.clone(), kept.len());
            kept.push(actor.clone());
        }

        let mut children: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, actor) in kept.iter().enumerate() {
            let Some(parent_id) = actor.reports_to.as_deref() else {
                continue;
            };
            match index.get(parent_id) {
                Some(&parent_idx) => {
                    let parent = &kept[parent_idx];
                    if actor.role.parent() != Some(parent.role) {
                        log::warn!(
                            "{} {} reports to {} {}, expected a {}",
                            actor.role,
                            actor.id,
                            parent.role,
                            parent.id,
                            actor.role.parent().map(|r| r.as_str()).unwrap_or("root")
                        );
                    }
                    children.entry(parent_id.to_string()).or_default().push(idx);
                }
                None => {
                    log::warn!("Actor {} reports to unknown actor {}", actor.id, parent_id);
                }
            }
        }

        Self {
            actors: kept,
            index,
            children,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Actor> {
        self.index.get(id).map(|&idx| &self.actors[idx])
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(move |a| a.role == role)
    }

    /// Direct reports of an actor
    pub fn reports_of<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Actor> + 'a {
        self.children
            .get(id)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.actors[idx])
    }

    /// Every actor of `role` reporting directly to one of `parent_ids`
    pub fn reports_with_role<'a, I, S>(&'a self, parent_ids: I, role: Role) -> Vec<&'a Actor>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for parent_id in parent_ids {
            for actor in self.reports_of(parent_id.as_ref()) {
                if actor.role == role && seen.insert(actor.id.as_str()) {
                    found.push(actor);
                }
            }
        }
        found
    }

    /// Walk `reports_to` upward from `id` until an actor of `role` is reached.
    ///
    /// Returns `Ok(None)` when the actor is unknown, the chain dangles, or the
    /// walk passes the target tier without hitting it. A walk that revisits a
    /// node or runs past [`MAX_TIER_DEPTH`] is rejected.
    pub fn ancestor_at(&self, id: &str, role: Role) -> Result<Option<&Actor>> {
        let Some(mut current) = self.get(id) else {
            return Ok(None);
        };
        let mut visited: HashSet<&str> = HashSet::new();

        for _ in 0..MAX_TIER_DEPTH {
            if !visited.insert(current.id.as_str()) {
                return Err(DashError::OrgCycle(current.id.clone()));
            }
            if current.role == role {
                return Ok(Some(current));
            }
            if current.role > role {
                return Ok(None);
            }
            match current.reports_to.as_deref().and_then(|p| self.get(p)) {
                Some(parent) => current = parent,
                None => return Ok(None),
            }
        }

        Err(DashError::OrgCycle(current.id.clone()))
    }

    /// Reject cycles and reporting chains deeper than the four tiers
    pub fn validate(&self) -> Result<()> {
        for actor in &self.actors {
            let mut seen: HashSet<&str> = HashSet::new();
            let mut current = actor;
            loop {
                if !seen.insert(current.id.as_str()) || seen.len() > MAX_TIER_DEPTH {
                    return Err(DashError::OrgCycle(actor.id.clone()));
                }
                match current.reports_to.as_deref().and_then(|p| self.get(p)) {
                    Some(parent) => current = parent,
                    None => break,
                }
            }
        }
        Ok(())
    }
}
