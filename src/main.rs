// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! HR dashboard (hrdash) - Main entry point
//!
//! A CLI over the scoping and aggregation engine for branch visit reports.

use anyhow::Result;
use clap::Parser;
use hrdash::cli::{Cli, Commands};
use hrdash::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // ====================================================================
        // Scope
        // ====================================================================
        Commands::Scope { filter } => commands::show_scope(&filter),

        // ====================================================================
        // Reports
        // ====================================================================
        Commands::Trends { filter, metrics } => commands::show_trends(&filter, &metrics),
        Commands::Scores { filter, sort_desc } => commands::show_scores(&filter, sort_desc),
        Commands::Categories { filter } => commands::show_categories(&filter),
        Commands::Distribution { filter, group_by } => {
            commands::show_distribution(&filter, group_by)
        }
        Commands::Dashboard { filter, json } => commands::show_dashboard(&filter, json),

        // ====================================================================
        // Catalog
        // ====================================================================
        Commands::Metrics => commands::list_metrics(),
    }
}
