// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Scope resolution
//!
//! Turns a viewer plus a partial selection at any tier into the set of BHR
//! ids whose visits are in scope. The most specific non-empty selection wins:
//! BHR ids over ZHR ids over VHR ids over the viewer's natural scope.
//!
//! An active selection that matches nothing resolves to the empty set. It
//! never widens back to the viewer's natural scope.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{DashError, Result};
use crate::models::{Actor, Role};
use crate::org::OrgTree;

/// Resolved set of in-scope BHR ids
pub type Scope = BTreeSet<String>;

/// Who is looking at the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "id", rename_all = "UPPERCASE")]
pub enum Viewer {
    /// Sees every BHR in the organization
    Chr,
    /// Sees every BHR under any ZHR reporting to this VHR
    Vhr(String),
    /// Sees every BHR reporting to this ZHR
    Zhr(String),
    /// Sees only their own reports
    Bhr(String),
}

impl Viewer {
    /// Build a viewer from a role and an optional actor id.
    ///
    /// Every role except CHR needs the id to anchor its natural scope.
    pub fn new(role: Role, id: Option<&str>) -> Result<Self> {
        let require = |id: Option<&str>| {
            id.map(str::to_string)
                .ok_or_else(|| DashError::MissingViewer(role.to_string()))
        };
        Ok(match role {
            Role::Chr => Self::Chr,
            Role::Vhr => Self::Vhr(require(id)?),
            Role::Zhr => Self::Zhr(require(id)?),
            Role::Bhr => Self::Bhr(require(id)?),
        })
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Chr => Role::Chr,
            Self::Vhr(_) => Role::Vhr,
            Self::Zhr(_) => Role::Zhr,
            Self::Bhr(_) => Role::Bhr,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Chr => None,
            Self::Vhr(id) | Self::Zhr(id) | Self::Bhr(id) => Some(id),
        }
    }
}

/// Ids picked in the dashboard filters, one list per tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeSelection {
    #[serde(default)]
    pub vhr_ids: Vec<String>,
    #[serde(default)]
    pub zhr_ids: Vec<String>,
    #[serde(default)]
    pub bhr_ids: Vec<String>,
}

impl ScopeSelection {
    pub fn is_empty(&self) -> bool {
        self.vhr_ids.is_empty() && self.zhr_ids.is_empty() && self.bhr_ids.is_empty()
    }

    /// Tier of the most specific active selection
    pub fn most_specific(&self) -> Option<Role> {
        if !self.bhr_ids.is_empty() {
            Some(Role::Bhr)
        } else if !self.zhr_ids.is_empty() {
            Some(Role::Zhr)
        } else if !self.vhr_ids.is_empty() {
            Some(Role::Vhr)
        } else {
            None
        }
    }

    /// Tier to group a distribution by: one below the most specific active
    /// selection, or one below the viewer when nothing is selected. BHR is
    /// the floor.
    pub fn grouping_role(&self, viewer_role: Role) -> Role {
        let anchor = self.most_specific().unwrap_or(viewer_role);
        anchor.child().unwrap_or(Role::Bhr)
    }
}

/// Resolves selections against an org tree
pub struct ScopeResolver<'a> {
    tree: &'a OrgTree,
}

impl<'a> ScopeResolver<'a> {
    pub fn new(tree: &'a OrgTree) -> Self {
        Self { tree }
    }

    pub fn resolve(&self, viewer: &Viewer, selection: &ScopeSelection) -> Scope {
        if !selection.bhr_ids.is_empty() {
            return selection
                .bhr_ids
                .iter()
                .filter(|id| {
                    self.tree
                        .get(id)
                        .map(|a| a.role == Role::Bhr)
                        .unwrap_or(false)
                })
                .cloned()
                .collect();
        }
        if !selection.zhr_ids.is_empty() {
            return self.bhrs_under_zhrs(&selection.zhr_ids);
        }
        if !selection.vhr_ids.is_empty() {
            return self.bhrs_under_vhrs(&selection.vhr_ids);
        }
        self.natural_scope(viewer)
    }

    /// Everything the viewer sees with no filter applied
    pub fn natural_scope(&self, viewer: &Viewer) -> Scope {
        match viewer {
            Viewer::Chr => self
                .tree
                .with_role(Role::Bhr)
                .map(|a| a.id.clone())
                .collect(),
            Viewer::Vhr(id) => self.bhrs_under_vhrs(std::slice::from_ref(id)),
            Viewer::Zhr(id) => self.bhrs_under_zhrs(std::slice::from_ref(id)),
            Viewer::Bhr(id) => match self.tree.get(id) {
                Some(actor) if actor.role == Role::Bhr => Scope::from([actor.id.clone()]),
                _ => Scope::new(),
            },
        }
    }

    fn bhrs_under_zhrs(&self, zhr_ids: &[String]) -> Scope {
        self.tree
            .reports_with_role(zhr_ids, Role::Bhr)
            .into_iter()
            .map(|a| a.id.clone())
            .collect()
    }

    fn bhrs_under_vhrs(&self, vhr_ids: &[String]) -> Scope {
        let zhr_ids: Vec<&str> = self
            .tree
            .reports_with_role(vhr_ids, Role::Zhr)
            .into_iter()
            .map(|a| a.id.as_str())
            .collect();
        self.tree
            .reports_with_role(zhr_ids, Role::Bhr)
            .into_iter()
            .map(|a| a.id.clone())
            .collect()
    }
}

/// Resolve scope straight from the flat actor list
pub fn resolve(actors: &[Actor], viewer: &Viewer, selection: &ScopeSelection) -> Scope {
    let tree = OrgTree::new(actors);
    ScopeResolver::new(&tree).resolve(viewer, selection)
}
