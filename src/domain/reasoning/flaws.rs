//! Informal logical flaw detection: phrase patterns plus structural checks.

use super::text;

/// Maximum number of flaws reported for one text.
pub const MAX_LOGICAL_FLAWS: usize = 4;

/// Word count below which reasoning is flagged as under-elaborated.
pub const MIN_ELABORATION_WORDS: usize = 20;

/// A named informal fallacy with the phrases that suggest it.
#[derive(Debug, Clone, Copy)]
pub struct FlawPattern {
    pub name: &'static str,
    pub explanation: &'static str,
    pub triggers: &'static [&'static str],
}

/// Fixed fallacy table, in reporting order.
pub const FLAW_PATTERNS: &[FlawPattern] = &[
    FlawPattern {
        name: "Hasty Generalization",
        explanation: "A broad conclusion is drawn from limited or absolute claims",
        triggers: &["always", "never", "everyone", "nobody", "all of them", "every time"],
    },
    FlawPattern {
        name: "False Dichotomy",
        explanation: "Only two options are presented when more may exist",
        triggers: &["either", "only two", "only option", "no other choice", "or nothing"],
    },
    FlawPattern {
        name: "Appeal to Emotion",
        explanation: "Feelings are used in place of evidence",
        triggers: &["feel like", "gut", "heart says", "scared", "afraid"],
    },
    FlawPattern {
        name: "Circular Reasoning",
        explanation: "The conclusion is restated as its own justification",
        triggers: &["because it is", "because i said", "it just is", "obviously true"],
    },
    FlawPattern {
        name: "Ad Hominem",
        explanation: "A position is dismissed by attacking the person holding it",
        triggers: &["stupid", "idiot", "what do they know", "they are just"],
    },
    FlawPattern {
        name: "Slippery Slope",
        explanation: "A small step is assumed to lead inevitably to an extreme outcome",
        triggers: &["will lead to", "end up", "next thing", "spiral", "snowball"],
    },
];

/// Flaw reported when the reasoning is too short to follow.
pub const INSUFFICIENT_ELABORATION: &str =
    "Insufficient Elaboration: The reasoning is too brief to show how the conclusion was reached";

/// Flaw reported when no causal connective links reasons to conclusion.
pub const MISSING_CAUSAL_LINKS: &str =
    "Missing Causal Links: No explicit connection is drawn between the reasons given and the conclusion";

/// Returns up to four flaw descriptions, pattern-based first, structural after.
pub fn detect_logical_flaws(input: &str) -> Vec<String> {
    let lower = input.to_lowercase();

    let mut flaws: Vec<String> = FLAW_PATTERNS
        .iter()
        .filter(|pattern| text::contains_any(&lower, pattern.triggers))
        .map(|pattern| format!("{}: {}", pattern.name, pattern.explanation))
        .collect();

    if text::word_count(input) < MIN_ELABORATION_WORDS {
        flaws.push(INSUFFICIENT_ELABORATION.to_string());
    }
    if !text::has_causal_connective(&lower) {
        flaws.push(MISSING_CAUSAL_LINKS.to_string());
    }

    flaws.truncate(MAX_LOGICAL_FLAWS);
    flaws
}
