//! Output contracts of the reasoning engine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Score;

use super::scoring::ScoreTriple;

/// Most missing assumptions reported per analysis.
pub const MAX_MISSING_ASSUMPTIONS: usize = 3;
/// Most improvement suggestions reported per analysis.
pub const MAX_IMPROVEMENTS: usize = 4;
/// Most logical flaws reported per challenge.
pub const MAX_CHALLENGE_FLAWS: usize = 4;
/// Most counter-questions reported per challenge.
pub const MAX_COUNTER_QUESTIONS: usize = 5;
/// Most suggested improvements reported per challenge.
pub const MAX_CHALLENGE_IMPROVEMENTS: usize = 5;
/// Most clarifying questions generated for a decision.
pub const MAX_QUESTIONS: usize = 3;

/// A clarifying question and the user's answer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question: String,
    pub answer: String,
}

impl Answer {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// The external generative-text service.
    Ai,
    /// The deterministic rule-based pipeline.
    Rules,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Ai => "ai",
            Provenance::Rules => "rules",
        }
    }
}

/// A result tagged with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub data: T,
    pub provenance: Provenance,
}

impl<T> Sourced<T> {
    pub fn ai(data: T) -> Self {
        Self {
            data,
            provenance: Provenance::Ai,
        }
    }

    pub fn rules(data: T) -> Self {
        Self {
            data,
            provenance: Provenance::Rules,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            data: f(self.data),
            provenance: self.provenance,
        }
    }
}

/// Evaluation of a user's explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub step_by_step_explanation: String,
    pub simple_summary: String,
    pub logical_strength_score: Score,
    pub clarity_score: Score,
    pub confidence_score: Score,
    pub missing_assumptions: Vec<String>,
    pub improvement_suggestions: Vec<String>,
}

impl AnalysisResult {
    /// Enforces list caps.
    pub fn capped(mut self) -> Self {
        self.missing_assumptions.truncate(MAX_MISSING_ASSUMPTIONS);
        self.improvement_suggestions.truncate(MAX_IMPROVEMENTS);
        self
    }

    pub fn scores(&self) -> ScoreTriple {
        ScoreTriple {
            logical_strength: self.logical_strength_score,
            clarity: self.clarity_score,
            confidence: self.confidence_score,
        }
    }
}

/// Critique produced by "challenge my thinking".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResult {
    pub logical_flaws: Vec<String>,
    pub bias_analysis: String,
    pub counter_questions: Vec<String>,
    pub suggested_improvements: Vec<String>,
}

impl ChallengeResult {
    /// Enforces list caps.
    pub fn capped(mut self) -> Self {
        self.logical_flaws.truncate(MAX_CHALLENGE_FLAWS);
        self.counter_questions.truncate(MAX_COUNTER_QUESTIONS);
        self.suggested_improvements.truncate(MAX_CHALLENGE_IMPROVEMENTS);
        self
    }
}
