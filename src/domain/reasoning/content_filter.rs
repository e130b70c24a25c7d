//! Advisory-language filter for generated explanations.
//!
//! Explanations describe why a decision was made; they must not advise,
//! coach or praise.

/// Phrases that mark output as advisory, matched case-insensitively.
pub const ADVISORY_PHRASES: &[&str] = &[
    "you should",
    "next time",
    "try to",
    "consider",
    "i recommend",
    "i suggest",
    "it would be better",
    "you could",
    "you might want to",
    "keep up",
    "great job",
    "well done",
];

/// First advisory phrase found in the text, if any.
pub fn find_advisory_phrase(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    ADVISORY_PHRASES
        .iter()
        .copied()
        .find(|phrase| lower.contains(phrase))
}

/// True when the text contains advisory language.
pub fn contains_advisory_language(text: &str) -> bool {
    find_advisory_phrase(text).is_some()
}
