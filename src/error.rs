// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Error types for hrdash

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Org hierarchy cycle detected at actor: {0}")]
    OrgCycle(String),

    #[error("Unknown metric key: {0}")]
    UnknownMetric(String),

    #[error("Unknown timeframe: {0}")]
    UnknownTimeframe(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("A {0} viewer needs an actor id to resolve its natural scope")]
    MissingViewer(String),

    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, DashError>;
