//! Cognitive bias detection by trigger phrase.

use serde::{Deserialize, Serialize};

/// A named cognitive bias with the phrases that suggest it.
#[derive(Debug, Clone, Copy)]
pub struct BiasPattern {
    pub name: &'static str,
    pub description: &'static str,
    pub triggers: &'static [&'static str],
}

/// Fixed bias table, in reporting order.
pub const BIAS_PATTERNS: &[BiasPattern] = &[
    BiasPattern {
        name: "Confirmation Bias",
        description: "Tendency to favor information that confirms existing beliefs",
        triggers: &["i knew", "proves that", "obviously", "clearly shows", "as expected", "always"],
    },
    BiasPattern {
        name: "Sunk Cost Fallacy",
        description: "Continuing due to past investment rather than future value",
        triggers: &[
            "already invested",
            "spent so much",
            "come this far",
            "too late to",
            "wasted if",
            "put in so much",
        ],
    },
    BiasPattern {
        name: "Anchoring Bias",
        description: "Over-relying on the first piece of information encountered",
        triggers: &["first impression", "initial", "originally", "started at", "began with"],
    },
    BiasPattern {
        name: "Availability Heuristic",
        description: "Overweighting easily recalled information",
        triggers: &["heard about", "read that", "someone told me", "saw on", "recently"],
    },
    BiasPattern {
        name: "Emotional Reasoning",
        description: "Using emotions as evidence for truth",
        triggers: &["feel like", "gut feeling", "instinct", "heart says", "just know", "sense that"],
    },
    BiasPattern {
        name: "Black-and-White Thinking",
        description: "Seeing situations in extremes without middle ground",
        triggers: &[
            "only option",
            "no choice",
            "must",
            "have to",
            "either",
            "or nothing",
            "all or nothing",
        ],
    },
    BiasPattern {
        name: "Social Proof Bias",
        description: "Following the crowd without independent evaluation",
        triggers: &["everyone", "most people", "others are", "popular", "common", "normal"],
    },
    BiasPattern {
        name: "Optimism Bias",
        description: "Overestimating positive outcomes while underestimating risks",
        triggers: &[
            "will definitely",
            "guaranteed",
            "certainly",
            "no way",
            "impossible to fail",
            "cant go wrong",
        ],
    },
];

/// A detected bias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiasFinding {
    pub name: String,
    pub description: String,
}

impl From<&BiasPattern> for BiasFinding {
    fn from(pattern: &BiasPattern) -> Self {
        Self {
            name: pattern.name.to_string(),
            description: pattern.description.to_string(),
        }
    }
}

/// Returns one finding per bias whose triggers appear in the text.
///
/// Findings follow table order and are unique by name. No cap is applied here.
pub fn detect_biases(text: &str) -> Vec<BiasFinding> {
    let lower = text.to_lowercase();
    BIAS_PATTERNS
        .iter()
        .filter(|pattern| super::text::contains_any(&lower, pattern.triggers))
        .map(BiasFinding::from)
        .collect()
}
