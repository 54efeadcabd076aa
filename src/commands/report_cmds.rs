// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Report commands (trends, scores, categories, distribution, dashboard)

use anyhow::Result;
use colored::*;
use tabled::{builder::Builder, settings::Style as TableStyle, Table, Tabled};

use super::context::{format_value, prepare};
use crate::analytics::{
    aggregate, distribute, score, CategoryBreakdown, CategoryClassifier, DashboardSnapshot,
    DistributionEntry, QualitativeScore, ScoreOrder, TrendPoint,
};
use crate::cli::FilterArgs;
use crate::metrics::Metric;
use crate::models::Role;

#[derive(Tabled)]
struct ScoreRow {
    #[tabled(rename = "Question")]
    subject: String,
    #[tabled(rename = "Score (0-5)")]
    score: String,
    #[tabled(rename = "Responses")]
    responses: usize,
}

#[derive(Tabled)]
struct DistributionRow {
    #[tabled(rename = "Id")]
    actor_id: String,
    #[tabled(rename = "Name")]
    label: String,
    #[tabled(rename = "Visits")]
    count: u64,
}

fn print_empty_state() {
    println!("\n{} No visits match the current filters", "[!]".yellow());
}

fn print_trends(series: &[TrendPoint], metrics: &[Metric]) {
    let mut builder = Builder::default();
    let mut header = vec!["Date".to_string()];
    header.extend(metrics.iter().map(|m| m.label().to_string()));
    builder.push_record(header);

    for point in series {
        let mut record = vec![point.date.format("%Y-%m-%d").to_string()];
        record.extend(metrics.iter().map(|m| format_value(point.value(*m))));
        builder.push_record(record);
    }

    let table = builder.build().with(TableStyle::ascii_rounded()).to_string();
    println!("{}", table);
}

fn print_scores(scores: &[QualitativeScore]) {
    let rows: Vec<ScoreRow> = scores
        .iter()
        .map(|s| ScoreRow {
            subject: s.subject.clone(),
            score: format!("{:.2}", s.score),
            responses: s.responses,
        })
        .collect();
    let table = Table::new(&rows)
        .with(TableStyle::ascii_rounded())
        .to_string();
    println!("{}", table);
}

fn print_categories(breakdown: &CategoryBreakdown, metrics: &[Metric]) {
    let mut builder = Builder::default();
    let mut header = vec!["Category".to_string(), "Visits".to_string()];
    header.extend(metrics.iter().map(|m| m.label().to_string()));
    builder.push_record(header);

    for category in &breakdown.categories {
        let mut record = vec![category.clone(), breakdown.visits(category).to_string()];
        record.extend(
            metrics
                .iter()
                .map(|m| format_value(breakdown.value(category, *m))),
        );
        builder.push_record(record);
    }

    let table = builder.build().with(TableStyle::ascii_rounded()).to_string();
    println!("{}", table);
}

fn print_distribution(role: Role, entries: &[DistributionEntry]) {
    println!("\n{} Visits by {}", "[*]".blue(), role.to_string().cyan());
    if entries.is_empty() {
        print_empty_state();
        return;
    }
    let rows: Vec<DistributionRow> = entries
        .iter()
        .map(|e| DistributionRow {
            actor_id: e.actor_id.clone(),
            label: e.label.clone(),
            count: e.count,
        })
        .collect();
    let table = Table::new(&rows)
        .with(TableStyle::ascii_rounded())
        .to_string();
    println!("{}", table);
}

/// Day-by-day metric trends
pub fn show_trends(args: &FilterArgs, metrics: &[Metric]) -> Result<()> {
    let session = prepare(args)?;
    let metrics: Vec<Metric> = if metrics.is_empty() {
        session.engine.config().metrics.clone()
    } else {
        metrics.to_vec()
    };
    let (_, visits) = session
        .engine
        .filtered(&session.tree, &session.ctx, &session.data);

    println!("\n{} Metric trends", "[*]".blue());
    let series = aggregate(visits, &metrics);
    if series.is_empty() {
        print_empty_state();
        return Ok(());
    }
    print_trends(&series, &metrics);
    Ok(())
}

/// Qualitative scores per question
pub fn show_scores(args: &FilterArgs, sort_desc: bool) -> Result<()> {
    let session = prepare(args)?;
    let order = if sort_desc {
        ScoreOrder::Descending
    } else {
        session.engine.config().score_order
    };
    let (_, visits) = session
        .engine
        .filtered(&session.tree, &session.ctx, &session.data);

    println!("\n{} Qualitative scores", "[*]".blue());
    if visits.is_empty() {
        print_empty_state();
        return Ok(());
    }
    let scores = score(visits, &session.engine.config().questions, order);
    print_scores(&scores);
    Ok(())
}

/// Rollups per branch category
pub fn show_categories(args: &FilterArgs) -> Result<()> {
    let session = prepare(args)?;
    let config = session.engine.config();
    let (_, visits) = session
        .engine
        .filtered(&session.tree, &session.ctx, &session.data);

    println!("\n{} Branch categories", "[*]".blue());
    if visits.is_empty() {
        print_empty_state();
        return Ok(());
    }
    let breakdown = CategoryClassifier::new(config.category_order.clone()).classify(
        visits,
        &session.data.branches,
        &config.metrics,
    );
    print_categories(&breakdown, &config.metrics);
    Ok(())
}

/// Visit counts one tier below the selection
pub fn show_distribution(args: &FilterArgs, group_by: Option<Role>) -> Result<()> {
    let session = prepare(args)?;
    let role = group_by.unwrap_or_else(|| session.ctx.grouping_role());
    let (_, visits) = session
        .engine
        .filtered(&session.tree, &session.ctx, &session.data);

    let entries = distribute(visits, &session.tree, role)?;
    print_distribution(role, &entries);
    Ok(())
}

fn print_dashboard(snapshot: &DashboardSnapshot, metrics: &[Metric]) {
    let overview = &snapshot.overview;
    println!(
        "\n{} Dashboard for {} viewer",
        "[*]".blue(),
        snapshot.viewer.role().to_string().cyan()
    );
    println!("{}", "=".repeat(70));
    if let Some(timeframe) = snapshot.timeframe {
        println!("   Timeframe:        {}", timeframe.to_string().cyan());
    }
    println!("   BHRs in scope:    {}", overview.scope_size.to_string().yellow());
    println!("   Visits:           {}", overview.total_visits.to_string().yellow());
    println!("   Branches visited: {}", overview.branches_visited.to_string().yellow());
    println!("   Active BHRs:      {}", overview.active_authors.to_string().yellow());
    if let (Some(first), Some(last)) = (overview.first_visit, overview.last_visit) {
        println!("   Date range:       {} .. {}", first, last);
    }

    if overview.total_visits == 0 {
        print_empty_state();
        return;
    }

    println!("\n{} Metric trends", "[*]".blue());
    print_trends(&snapshot.trends, metrics);
    println!("\n{} Qualitative scores", "[*]".blue());
    print_scores(&snapshot.scores);
    println!("\n{} Branch categories", "[*]".blue());
    print_categories(&snapshot.categories, metrics);
    print_distribution(snapshot.distribution_role, &snapshot.distribution);
}

/// Full dashboard snapshot
pub fn show_dashboard(args: &FilterArgs, json: bool) -> Result<()> {
    let session = prepare(args)?;
    let snapshot = session.engine.build(&session.ctx, &session.data)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_dashboard(&snapshot, &session.engine.config().metrics);
    }
    Ok(())
}
