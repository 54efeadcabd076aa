// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! CLI argument definitions using clap derive macros

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::metrics::Metric;
use crate::models::Role;
use crate::scope::ScopeSelection;
use crate::timeframe::TimeframeToken;

/// HR dashboard (hrdash) - Scope and aggregate branch visit reports
#[derive(Parser)]
#[command(name = "hrdash")]
#[command(author = "Nervosys")]
#[command(version)]
#[command(about = "Scope and aggregate branch visit reports across the HR hierarchy", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Viewer, selection and data source shared by every report
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Directory containing actors.json, branches.json and visits.json
    #[arg(short, long, env = "HRDASH_DATA", default_value = ".")]
    pub data: PathBuf,

    /// Role of the person viewing the dashboard (BHR, ZHR, VHR, CHR)
    #[arg(short, long, default_value = "CHR")]
    pub role: Role,

    /// Actor id of the viewer (required below CHR)
    #[arg(long)]
    pub viewer: Option<String>,

    /// Restrict to these VHRs (repeatable)
    #[arg(long = "vhr")]
    pub vhr_ids: Vec<String>,

    /// Restrict to these ZHRs (repeatable, overrides --vhr)
    #[arg(long = "zhr")]
    pub zhr_ids: Vec<String>,

    /// Restrict to these BHRs (repeatable, overrides --zhr and --vhr)
    #[arg(long = "bhr")]
    pub bhr_ids: Vec<String>,

    /// Restrict to these branches (repeatable)
    #[arg(long = "branch")]
    pub branch_ids: Vec<String>,

    /// Relative timeframe (past-week, past-month, last-3-months, last-6-months, last-year, last-3-years)
    #[arg(short, long)]
    pub timeframe: Option<TimeframeToken>,

    /// Configuration file (JSON or YAML); defaults to the user config directory
    #[arg(short, long, env = "HRDASH_CONFIG")]
    pub config: Option<PathBuf>,
}

impl FilterArgs {
    pub fn selection(&self) -> ScopeSelection {
        ScopeSelection {
            vhr_ids: self.vhr_ids.clone(),
            zhr_ids: self.zhr_ids.clone(),
            bhr_ids: self.bhr_ids.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    // ============================================================================
    // Scope
    // ============================================================================
    /// List the BHRs in scope for the current selection
    Scope {
        #[command(flatten)]
        filter: FilterArgs,
    },

    // ============================================================================
    // Reports
    // ============================================================================
    /// Day-by-day metric trends
    Trends {
        #[command(flatten)]
        filter: FilterArgs,

        /// Metrics to show (repeatable); defaults to the configured set
        #[arg(short, long = "metric")]
        metrics: Vec<Metric>,
    },

    /// Qualitative 0-5 scores per survey question
    Scores {
        #[command(flatten)]
        filter: FilterArgs,

        /// Highest score first
        #[arg(long)]
        sort_desc: bool,
    },

    /// Metric rollups per branch category
    Categories {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Visit counts per org node one tier below the selection
    #[command(visible_alias = "dist")]
    Distribution {
        #[command(flatten)]
        filter: FilterArgs,

        /// Group by this tier instead of the one implied by the selection
        #[arg(long)]
        group_by: Option<Role>,
    },

    /// Full dashboard: overview, trends, scores, categories and distribution
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    // ============================================================================
    // Catalog
    // ============================================================================
    /// List supported metrics and how they roll up
    Metrics,
}
