// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Dashboard configuration
//!
//! Which metrics and questions a dashboard shows, how categories are ordered
//! and which timeframe applies when none is picked. Stored as JSON (or YAML
//! when the file extension says so) under the user config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analytics::categories::DEFAULT_CATEGORY_ORDER;
use crate::analytics::qualitative::{Question, ScoreOrder};
use crate::metrics::Metric;
use crate::timeframe::TimeframeToken;

fn default_metrics() -> Vec<Metric> {
    Metric::ALL.to_vec()
}

fn default_category_order() -> Vec<String> {
    DEFAULT_CATEGORY_ORDER.iter().map(|c| c.to_string()).collect()
}

/// Global dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Metrics to aggregate, in display order
    #[serde(default = "default_metrics")]
    pub metrics: Vec<Metric>,

    /// Qualitative questions, in display order
    #[serde(default = "Question::defaults")]
    pub questions: Vec<Question>,

    /// Preferred category order
    #[serde(default = "default_category_order")]
    pub category_order: Vec<String>,

    /// Timeframe used when the caller does not pick one
    #[serde(default)]
    pub default_timeframe: Option<TimeframeToken>,

    #[serde(default)]
    pub score_order: ScoreOrder,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            metrics: default_metrics(),
            questions: Question::defaults(),
            category_order: default_category_order(),
            default_timeframe: None,
            score_order: ScoreOrder::AsGiven,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the default location
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("hrdash").join("config.json"))
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
