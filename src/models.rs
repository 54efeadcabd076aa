// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Data models for org actors, branches and visit reports

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::DashError;

/// Org hierarchy tier, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Branch HR - files visit reports
    Bhr,
    /// Zonal HR
    Zhr,
    /// Vertical HR
    Vhr,
    /// Chief HR
    Chr,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Bhr, Role::Zhr, Role::Vhr, Role::Chr];

    /// Position in the hierarchy, 0 for BHR up to 3 for CHR
    pub fn tier(&self) -> u8 {
        match self {
            Self::Bhr => 0,
            Self::Zhr => 1,
            Self::Vhr => 2,
            Self::Chr => 3,
        }
    }

    /// The tier a member of this role reports to
    pub fn parent(&self) -> Option<Role> {
        match self {
            Self::Bhr => Some(Self::Zhr),
            Self::Zhr => Some(Self::Vhr),
            Self::Vhr => Some(Self::Chr),
            Self::Chr => None,
        }
    }

    /// The tier that reports to this role
    pub fn child(&self) -> Option<Role> {
        match self {
            Self::Bhr => None,
            Self::Zhr => Some(Self::Bhr),
            Self::Vhr => Some(Self::Zhr),
            Self::Chr => Some(Self::Vhr),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bhr => "BHR",
            Self::Zhr => "ZHR",
            Self::Vhr => "VHR",
            Self::Chr => "CHR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BHR" => Ok(Self::Bhr),
            "ZHR" => Ok(Self::Zhr),
            "VHR" => Ok(Self::Vhr),
            "CHR" => Ok(Self::Chr),
            _ => Err(DashError::UnknownRole(s.to_string())),
        }
    }
}

/// A member of the organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub role: Role,
    /// Id of the actor one tier up, `None` for roots
    #[serde(default, alias = "reports_to")]
    pub reports_to: Option<String>,
    /// Display name, used as a chart label when present
    #[serde(default, alias = "full_name")]
    pub name: Option<String>,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role, reports_to: Option<&str>) -> Self {
        Self {
            id: id.into(),
            role,
            reports_to: reports_to.map(str::to_string),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Chart label: the display name, falling back to the id
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A branch that can be visited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl Branch {
    pub fn new(id: impl Into<String>, category: Option<&str>) -> Self {
        Self {
            id: id.into(),
            category: category.map(str::to_string),
        }
    }
}

/// Visit report lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitStatus {
    Draft,
    Submitted,
}

/// Answer to a yes/no survey question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

/// A branch visit report filed by a BHR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    pub id: String,

    /// BHR who filed the report
    #[serde(alias = "author_id", alias = "user_id")]
    pub author_id: String,

    #[serde(alias = "branch_id")]
    pub branch_id: String,

    /// Raw date as stored; may be malformed. A non-string value is kept as
    /// an empty string so it never parses.
    #[serde(default, alias = "visit_date", deserialize_with = "deserialize_visit_date")]
    pub visit_date: String,

    pub status: VisitStatus,

    /// Numeric fields keyed by metric key, `None` when absent
    #[serde(
        default,
        alias = "numeric_metrics",
        deserialize_with = "deserialize_metrics"
    )]
    pub numeric_metrics: BTreeMap<String, Option<f64>>,

    /// Yes/no fields keyed by question key, `None` when absent
    #[serde(
        default,
        alias = "qualitative_answers",
        deserialize_with = "deserialize_answers"
    )]
    pub qualitative_answers: BTreeMap<String, Option<Answer>>,
}

impl VisitRecord {
    /// Create a submitted visit with no metrics or answers
    pub fn new(
        id: impl Into<String>,
        author_id: impl Into<String>,
        branch_id: impl Into<String>,
        visit_date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author_id: author_id.into(),
            branch_id: branch_id.into(),
            visit_date: visit_date.into(),
            status: VisitStatus::Submitted,
            numeric_metrics: BTreeMap::new(),
            qualitative_answers: BTreeMap::new(),
        }
    }

    pub fn with_status(mut self, status: VisitStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_metric(mut self, key: impl Into<String>, value: Option<f64>) -> Self {
        self.numeric_metrics.insert(key.into(), value);
        self
    }

    pub fn with_answer(mut self, key: impl Into<String>, answer: Option<Answer>) -> Self {
        self.qualitative_answers.insert(key.into(), answer);
        self
    }

    pub fn is_submitted(&self) -> bool {
        self.status == VisitStatus::Submitted
    }

    /// Calendar day of the visit, `None` when the stored date does not parse
    pub fn visit_day(&self) -> Option<NaiveDate> {
        parse_visit_date(&self.visit_date)
    }

    /// Numeric value for a metric; non-finite values count as absent
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.numeric_metrics
            .get(key)
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }

    pub fn answer(&self, key: &str) -> Option<Answer> {
        self.qualitative_answers.get(key).copied().flatten()
    }
}

/// Parse a stored visit date into a calendar day.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (truncated to the UTC day) and
/// naive `YYYY-MM-DDTHH:MM:SS` timestamps.
pub fn parse_visit_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

fn numeric_value(value: &serde_json::Value) -> Option<f64> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn answer_value(value: &serde_json::Value) -> Option<Answer> {
    match value {
        serde_json::Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(Answer::Yes),
            "no" => Some(Answer::No),
            _ => None,
        },
        _ => None,
    }
}

/// Entries of a JSON object; `null` or any other non-object is empty
fn object_entries(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

fn deserialize_visit_date<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}

fn deserialize_metrics<'de, D>(deserializer: D) -> Result<BTreeMap<String, Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = object_entries(serde_json::Value::deserialize(deserializer)?);
    Ok(raw
        .into_iter()
        .map(|(key, value)| {
            let parsed = numeric_value(&value);
            (key, parsed)
        })
        .collect())
}

fn deserialize_answers<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, Option<Answer>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = object_entries(serde_json::Value::deserialize(deserializer)?);
    Ok(raw
        .into_iter()
        .map(|(key, value)| {
            let parsed = answer_value(&value);
            (key, parsed)
        })
        .collect())
}
