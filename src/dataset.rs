// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Raw input collections
//!
//! The engine never fetches data itself. This is the hand-off point: three
//! flat lists, fully loaded, either built in memory or read from a directory
//! of JSON exports (`actors.json`, `branches.json`, `visits.json`).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DashError, Result};
use crate::models::{Actor, Branch, VisitRecord};

pub const ACTORS_FILE: &str = "actors.json";
pub const BRANCHES_FILE: &str = "branches.json";
pub const VISITS_FILE: &str = "visits.json";

/// Everything a dashboard is computed from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub visits: Vec<VisitRecord>,
}

impl Dataset {
    pub fn new(actors: Vec<Actor>, branches: Vec<Branch>, visits: Vec<VisitRecord>) -> Self {
        Self {
            actors,
            branches,
            visits,
        }
    }

    /// Read the three exports from `dir`. A missing branches file is treated
    /// as no branch metadata; actors and visits are required.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(DashError::DatasetNotFound(dir.display().to_string()));
        }

        let actors: Vec<Actor> = read_required(&dir.join(ACTORS_FILE))?;
        let visits: Vec<VisitRecord> = read_required(&dir.join(VISITS_FILE))?;
        let branches_path = dir.join(BRANCHES_FILE);
        let branches: Vec<Branch> = if branches_path.exists() {
            read_required(&branches_path)?
        } else {
            log::warn!("No {} in {}, all visits are uncategorized", BRANCHES_FILE, dir.display());
            Vec::new()
        };

        log::debug!(
            "Loaded {} actors, {} branches, {} visits from {}",
            actors.len(),
            branches.len(),
            visits.len(),
            dir.display()
        );
        Ok(Self::new(actors, branches, visits))
    }

    /// Visits that already left the draft state
    pub fn submitted_visits(&self) -> impl Iterator<Item = &VisitRecord> {
        self.visits.iter().filter(|v| v.is_submitted())
    }
}

fn read_required<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(DashError::DatasetNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, VisitStatus};
    use tempfile::TempDir;

    #[test]
    fn test_load_dir_reads_all_three_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(ACTORS_FILE),
            r#"[{"id": "z1", "role": "ZHR"}, {"id": "b1", "role": "BHR", "reportsTo": "z1"}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join(BRANCHES_FILE),
            r#"[{"id": "br1", "category": "Gold"}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join(VISITS_FILE),
            r#"[{"id": "v1", "authorId": "b1", "branchId": "br1", "visitDate": "2024-01-01", "status": "submitted"},
                {"id": "v2", "authorId": "b1", "branchId": "br1", "visitDate": "2024-01-02", "status": "draft"}]"#,
        )
        .unwrap();

        let data = Dataset::load_dir(dir.path()).unwrap();
        assert_eq!(data.actors.len(), 2);
        assert_eq!(data.actors[1].role, Role::Bhr);
        assert_eq!(data.branches.len(), 1);
        assert_eq!(data.visits[1].status, VisitStatus::Draft);
        assert_eq!(data.submitted_visits().count(), 1);
    }

    #[test]
    fn test_malformed_visit_does_not_drop_the_rest() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(ACTORS_FILE), "[]").unwrap();
        std::fs::write(
            dir.path().join(VISITS_FILE),
            r#"[{"id": "v1", "authorId": "b1", "branchId": "br1", "visitDate": 20240102, "status": "submitted"},
                {"id": "v2", "authorId": "b1", "branchId": "br1", "visitDate": null, "status": "submitted",
                 "numericMetrics": null, "qualitativeAnswers": null},
                {"id": "v3", "authorId": "b1", "branchId": "br1", "visitDate": "2024-01-03", "status": "submitted",
                 "numericMetrics": {"cwt_cases": 4}}]"#,
        )
        .unwrap();

        let data = Dataset::load_dir(dir.path()).unwrap();
        assert_eq!(data.visits.len(), 3);
        assert!(data.visits[0].visit_day().is_none());
        assert!(data.visits[1].visit_day().is_none());
        assert_eq!(data.visits[2].metric("cwt_cases"), Some(4.0));
    }

    #[test]
    fn test_missing_branches_is_allowed() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(ACTORS_FILE), "[]").unwrap();
        std::fs::write(dir.path().join(VISITS_FILE), "[]").unwrap();
        let data = Dataset::load_dir(dir.path()).unwrap();
        assert!(data.branches.is_empty());
    }

    #[test]
    fn test_missing_visits_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(ACTORS_FILE), "[]").unwrap();
        assert!(matches!(
            Dataset::load_dir(dir.path()),
            Err(DashError::DatasetNotFound(_))
        ));
    }

    #[test]
    fn test_missing_dir_is_an_error() {
        let result = Dataset::load_dir(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(DashError::DatasetNotFound(_))));
    }
}
