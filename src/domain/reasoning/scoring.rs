//! Heuristic reasoning scores from lexical and structural signals.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Score;

use super::bias::detect_biases;
use super::text;

/// Starting point for logical strength and clarity.
pub const BASE_SCORE: i32 = 50;

/// Points added or removed per indicator phrase present.
pub const INDICATOR_WEIGHT: i32 = 5;

/// Points removed from logical strength per distinct detected bias.
pub const BIAS_PENALTY: i32 = 8;

/// Band that logical strength and clarity are clamped to.
pub const COMPONENT_BAND: (u8, u8) = (15, 95);

/// Band that confidence is clamped to.
pub const CONFIDENCE_BAND: (u8, u8) = (20, 90);

const LOGICAL_POSITIVE: &[&str] = &[
    "because", "therefore", "thus", "since", "as a result", "consequently", "due to",
    "given that", "considering", "weighing", "analyzed", "evaluated", "compared", "research",
    "data", "evidence", "facts", "statistics",
];

const LOGICAL_NEGATIVE: &[&str] = &[
    "maybe", "probably", "might", "could be", "not sure", "dont know", "guess", "hope", "wish",
    "assume", "whatever", "somehow",
];

const CLARITY_POSITIVE: &[&str] = &[
    "specifically", "precisely", "exactly", "clearly", "firstly", "secondly", "in summary",
    "to conclude", "main reason", "key factor", "primary", "the goal", "objective",
];

const CLARITY_NEGATIVE: &[&str] = &[
    "kind of", "sort of", "like", "stuff", "thing", "whatever", "etc", "and so on", "you know",
    "basically",
];

/// Logical strength, clarity and confidence for one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTriple {
    pub logical_strength: Score,
    pub clarity: Score,
    pub confidence: Score,
}

/// Computes heuristic scores. Pure and deterministic.
pub fn calculate_scores(input: &str) -> ScoreTriple {
    let lower = input.to_lowercase();
    let words = text::word_count(input);
    let sentences = text::sentence_count(input);

    let mut logical = BASE_SCORE;
    let mut clarity = BASE_SCORE;

    logical += INDICATOR_WEIGHT * text::count_present(&lower, LOGICAL_POSITIVE) as i32;
    logical -= INDICATOR_WEIGHT * text::count_present(&lower, LOGICAL_NEGATIVE) as i32;
    clarity += INDICATOR_WEIGHT * text::count_present(&lower, CLARITY_POSITIVE) as i32;
    clarity -= INDICATOR_WEIGHT * text::count_present(&lower, CLARITY_NEGATIVE) as i32;

    // Longer explanations earn up to +15.
    for threshold in [30, 60, 100] {
        if words > threshold {
            logical += 5;
        }
    }
    // Multiple sentences suggest structured thinking.
    for threshold in [2, 4] {
        if sentences > threshold {
            clarity += 5;
        }
    }

    logical -= BIAS_PENALTY * detect_biases(input).len() as i32;

    let logical = Score::clamped(logical, COMPONENT_BAND.0, COMPONENT_BAND.1);
    let clarity = Score::clamped(clarity, COMPONENT_BAND.0, COMPONENT_BAND.1);

    let average = (f64::from(logical.value()) + f64::from(clarity.value())) / 2.0;
    let confidence = Score::from_f64(average * 0.9);
    let confidence = Score::clamped(
        i32::from(confidence.value()),
        CONFIDENCE_BAND.0,
        CONFIDENCE_BAND.1,
    );

    ScoreTriple {
        logical_strength: logical,
        clarity,
        confidence,
    }
}
