// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Scope and catalog commands

use anyhow::Result;
use colored::*;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use super::context::prepare;
use crate::cli::FilterArgs;
use crate::metrics::{Metric, MetricKind};

#[derive(Tabled)]
struct ScopeRow {
    #[tabled(rename = "BHR")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Reports To")]
    reports_to: String,
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Rollup")]
    rollup: String,
}

/// List the BHRs the current selection resolves to
pub fn show_scope(args: &FilterArgs) -> Result<()> {
    let session = prepare(args)?;
    let scope = session.engine.scope(&session.tree, &session.ctx);

    println!(
        "\n{} Scope for {} viewer",
        "[*]".blue(),
        session.ctx.viewer.role().to_string().cyan()
    );

    if scope.is_empty() {
        println!("\n{} No BHRs match the current selection", "[!]".yellow());
        return Ok(());
    }

    let rows: Vec<ScopeRow> = scope
        .iter()
        .map(|id| {
            let actor = session.tree.get(id);
            ScopeRow {
                id: id.clone(),
                name: actor.and_then(|a| a.name.clone()).unwrap_or_default(),
                reports_to: actor
                    .and_then(|a| a.reports_to.clone())
                    .unwrap_or_else(|| "-".to_string()),
            }
        })
        .collect();

    let table = Table::new(&rows)
        .with(TableStyle::ascii_rounded())
        .to_string();
    println!("{}", table);
    println!("\nBHRs in scope: {}", rows.len().to_string().yellow());
    Ok(())
}

/// List every supported metric
pub fn list_metrics() -> Result<()> {
    let rows: Vec<MetricRow> = Metric::ALL
        .iter()
        .map(|m| MetricRow {
            key: m.key().to_string(),
            label: m.label().to_string(),
            rollup: match m.kind() {
                MetricKind::Sum => "sum".to_string(),
                MetricKind::Average => "average".to_string(),
            },
        })
        .collect();

    let table = Table::new(&rows)
        .with(TableStyle::ascii_rounded())
        .to_string();
    println!("{}", table);
    Ok(())
}
