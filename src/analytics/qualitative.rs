// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Yes/no survey questions scored on a 0-5 scale

use serde::{Deserialize, Serialize};

use crate::metrics::round2;
use crate::models::{Answer, VisitRecord};

/// Points for a favourable answer
pub const MAX_SCORE: f64 = 5.0;

/// A yes/no question on the visit form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub key: String,
    /// Radar chart axis label; the key is used when absent
    #[serde(default)]
    pub label: Option<String>,
    /// Whether "yes" is the favourable answer
    #[serde(default = "default_true")]
    pub positive_is_yes: bool,
}

fn default_true() -> bool {
    true
}

impl Question {
    pub fn new(key: impl Into<String>, label: impl Into<String>, positive_is_yes: bool) -> Self {
        Self {
            key: key.into(),
            label: Some(label.into()),
            positive_is_yes,
        }
    }

    pub fn subject(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    fn points(&self, answer: Answer) -> f64 {
        let favourable = match answer {
            Answer::Yes => self.positive_is_yes,
            Answer::No => !self.positive_is_yes,
        };
        if favourable {
            MAX_SCORE
        } else {
            0.0
        }
    }

    /// Culture questions asked on every branch visit
    pub fn defaults() -> Vec<Question> {
        vec![
            Question::new("leaders_aligned_with_code", "Leaders Aligned with Code", true),
            Question::new("employees_safe", "Employees Feel Safe", true),
            Question::new("employees_motivated", "Employees Motivated", true),
            Question::new("leaders_abusive_language", "No Abusive Language", false),
            Question::new("employees_comfort_escalation", "Comfort with Escalation", true),
            Question::new("inclusive_culture", "Inclusive Culture", true),
        ]
    }
}

/// Output ordering of the scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreOrder {
    /// Same order as the questions were given
    #[default]
    AsGiven,
    /// Highest score first, ties keep question order
    Descending,
}

/// Score for one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitativeScore {
    pub key: String,
    pub subject: String,
    /// 0 to 5; 0 also when nobody answered
    pub score: f64,
    /// Visits that answered the question
    pub responses: usize,
}

/// Average 0-5 score per question over the answered visits
pub fn score<'v, I>(visits: I, questions: &[Question], order: ScoreOrder) -> Vec<QualitativeScore>
where
    I: IntoIterator<Item = &'v VisitRecord>,
{
    let visits: Vec<&VisitRecord> = visits.into_iter().collect();

    let mut scores: Vec<QualitativeScore> = questions
        .iter()
        .map(|question| {
            let (total, responses) = visits
                .iter()
                .filter_map(|v| v.answer(&question.key))
                .fold((0.0, 0usize), |(total, n), answer| {
                    (total + question.points(answer), n + 1)
                });
            let score = if responses == 0 {
                0.0
            } else {
                round2(total / responses as f64)
            };
            QualitativeScore {
                key: question.key.clone(),
                subject: question.subject().to_string(),
                score,
                responses,
            }
        })
        .collect();

    if order == ScoreOrder::Descending {
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    }
    scores
}
