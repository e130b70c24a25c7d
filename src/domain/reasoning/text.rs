//! Lexical helpers shared by the detectors, scorer and generators.

/// Phrases that mark an explicit causal link between reasons and conclusion.
pub const CAUSAL_CONNECTIVES: &[&str] = &["because", "since", "due to"];

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of non-empty sentences, splitting on runs of `.`, `!` and `?`.
pub fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

/// True when any phrase occurs as a substring of the already lower-cased text.
pub fn contains_any(lower_text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| lower_text.contains(phrase))
}

/// Number of phrases that occur at least once in the already lower-cased text.
pub fn count_present(lower_text: &str, phrases: &[&str]) -> usize {
    phrases
        .iter()
        .filter(|phrase| lower_text.contains(*phrase))
        .count()
}

/// True when the text names an explicit reason ("because", "since", "due to").
pub fn has_causal_connective(lower_text: &str) -> bool {
    contains_any(lower_text, CAUSAL_CONNECTIVES)
}

/// Truncates to at most `max_chars` characters, appending `...` when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Removes a single trailing question mark.
pub fn strip_question_mark(question: &str) -> &str {
    question.strip_suffix('?').unwrap_or(question)
}
