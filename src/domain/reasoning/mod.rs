//! Reasoning module - Pure rule-based analysis of decision reasoning.
//!
//! # Components
//!
//! - `category` - Keyword classification into seven decision categories
//! - `bias` - Cognitive bias detection by trigger phrase
//! - `flaws` - Informal fallacy and structural gap detection
//! - `scoring` - Logical strength, clarity and confidence heuristics
//! - `explanation` - Neutral narrative, summary and step-by-step templates
//! - `assessment` - Missing assumptions and improvement suggestions
//! - `questions` - Clarifying questions and challenge counter-questions
//! - `content_filter` - Advisory-language detection for generated text
//! - `rule_engine` - The composed pipeline used when AI output is unavailable
//!
//! All lexicons and templates are `const` tables. Everything here is
//! synchronous and free of I/O; randomness is supplied by the caller.

mod assessment;
mod bias;
mod category;
mod content_filter;
mod explanation;
mod flaws;
mod questions;
mod results;
mod rule_engine;
mod scoring;
mod text;

pub use assessment::{
    assumption_candidates, extract_missing_assumptions, generate_improvements, significant_words,
};
pub use bias::{detect_biases, BiasFinding, BiasPattern, BIAS_PATTERNS};
pub use category::{detect_category, DecisionCategory};
pub use content_filter::{contains_advisory_language, find_advisory_phrase, ADVISORY_PHRASES};
pub use explanation::{
    extract_themes, generate_explanation, generate_step_by_step, generate_summary, openings,
    summaries, CLOSINGS,
};
pub use flaws::{detect_logical_flaws, FlawPattern, FLAW_PATTERNS, MAX_LOGICAL_FLAWS};
pub use questions::{
    category_counter_questions, category_questions, generate_counter_questions,
    generate_questions, GENERIC_QUESTIONS, UNIVERSAL_COUNTER_QUESTIONS,
};
pub use results::{
    AnalysisResult, Answer, ChallengeResult, Provenance, Sourced, MAX_CHALLENGE_FLAWS,
    MAX_CHALLENGE_IMPROVEMENTS, MAX_COUNTER_QUESTIONS, MAX_IMPROVEMENTS,
    MAX_MISSING_ASSUMPTIONS, MAX_QUESTIONS,
};
pub use rule_engine::{bias_analysis, RuleBasedReasoner, CHALLENGE_IMPROVEMENT};
pub use scoring::{calculate_scores, ScoreTriple};
