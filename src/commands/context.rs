// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Shared setup for every report command

use anyhow::{Context, Result};
use chrono::Utc;

use crate::analytics::{DashboardContext, DashboardEngine};
use crate::cli::FilterArgs;
use crate::config::DashboardConfig;
use crate::dataset::Dataset;
use crate::org::OrgTree;
use crate::scope::Viewer;

/// Loaded data plus the immutable filter context built from the flags
pub(crate) struct ReportSession {
    pub data: Dataset,
    pub tree: OrgTree,
    pub engine: DashboardEngine,
    pub ctx: DashboardContext,
}

pub(crate) fn load_config(args: &FilterArgs) -> Result<DashboardConfig> {
    match &args.config {
        Some(path) => DashboardConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(DashboardConfig::load().unwrap_or_else(|e| {
            log::warn!("Using default configuration: {}", e);
            DashboardConfig::default()
        })),
    }
}

pub(crate) fn prepare(args: &FilterArgs) -> Result<ReportSession> {
    let config = load_config(args)?;
    let data = Dataset::load_dir(&args.data)
        .with_context(|| format!("Failed to load dataset from {}", args.data.display()))?;

    let tree = OrgTree::new(&data.actors);
    tree.validate().context("Org hierarchy is malformed")?;
    if tree.is_empty() {
        log::warn!("No actors in {}, every scope is empty", args.data.display());
    } else {
        log::debug!("Org hierarchy holds {} actors", tree.len());
    }

    let viewer = Viewer::new(args.role, args.viewer.as_deref())?;
    let ctx = DashboardContext::new(viewer, Utc::now())
        .with_selection(args.selection())
        .with_branches(args.branch_ids.iter().cloned())
        .with_timeframe(args.timeframe);

    Ok(ReportSession {
        data,
        tree,
        engine: DashboardEngine::new(config),
        ctx,
    })
}

/// Format a folded value; gaps render as `-`
pub(crate) fn format_value(value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) if v.fract() == 0.0 => format!("{:.0}", v),
        Some(v) => format!("{:.2}", v),
    }
}
