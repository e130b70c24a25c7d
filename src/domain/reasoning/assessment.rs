//! Missing assumptions and improvement suggestions for an explanation.

use super::bias::detect_biases;
use super::category::DecisionCategory;
use super::results::{MAX_IMPROVEMENTS, MAX_MISSING_ASSUMPTIONS};
use super::scoring::ScoreTriple;
use super::text;

/// Scores below this trigger the evidence and structure suggestions.
pub const SUGGESTION_THRESHOLD: u8 = 60;

/// Explanations shorter than this are asked for more detail.
pub const DETAIL_WORD_THRESHOLD: usize = 30;

const ALTERNATIVE_MARKERS: &[&str] = &["alternative", "other option", "considered"];

/// Candidate assumptions a category's decisions commonly leave unstated.
pub fn assumption_candidates(category: DecisionCategory) -> &'static [&'static str] {
    match category {
        DecisionCategory::Career => &[
            "Current job market conditions in your field",
            "Long-term career trajectory implications",
            "Impact on work-life balance",
            "Financial stability during transition period",
            "Skills gap that may need addressing",
        ],
        DecisionCategory::Relationship => &[
            "Long-term compatibility factors",
            "Communication patterns and conflict resolution",
            "Individual growth and personal goals alignment",
            "External pressures (family, social expectations)",
            "Financial and lifestyle compatibility",
        ],
        DecisionCategory::Financial => &[
            "Emergency fund adequacy",
            "Opportunity cost of this investment",
            "Tax implications",
            "Risk tolerance alignment",
            "Long-term financial goals impact",
        ],
        DecisionCategory::Health => &[
            "Second medical opinion consideration",
            "Long-term lifestyle sustainability",
            "Mental health impact",
            "Support system availability",
            "Recovery time and resources needed",
        ],
        DecisionCategory::Education => &[
            "Return on investment for this education path",
            "Alternative learning options",
            "Industry demand for this qualification",
            "Time commitment vs other priorities",
            "Practical application opportunities",
        ],
        DecisionCategory::Lifestyle => &[
            "Long-term sustainability of this choice",
            "Impact on relationships and social connections",
            "Financial implications over time",
            "Reversibility of this decision",
            "Alignment with core values and goals",
        ],
        DecisionCategory::Technology => &[
            "Learning curve and adaptation time",
            "Long-term support and updates",
            "Security and privacy implications",
            "Integration with existing systems",
            "Cost of maintenance and upgrades",
        ],
    }
}

/// Words longer than four characters; the ones that mark an assumption as addressed.
pub fn significant_words(assumption: &str) -> Vec<String> {
    assumption
        .to_lowercase()
        .split(' ')
        .filter(|word| word.chars().count() > 4)
        .map(str::to_string)
        .collect()
}

/// Up to three category assumptions whose significant words the text never mentions.
pub fn extract_missing_assumptions(input: &str, category: DecisionCategory) -> Vec<String> {
    let lower = input.to_lowercase();
    assumption_candidates(category)
        .iter()
        .filter(|candidate| {
            !significant_words(candidate)
                .iter()
                .any(|word| lower.contains(word.as_str()))
        })
        .take(MAX_MISSING_ASSUMPTIONS)
        .map(|candidate| candidate.to_string())
        .collect()
}

/// Rule tree of improvement suggestions, at most four, in evaluation order.
pub fn generate_improvements(input: &str, scores: &ScoreTriple) -> Vec<String> {
    let lower = input.to_lowercase();
    let mut improvements: Vec<&str> = Vec::new();

    if scores.logical_strength.value() < SUGGESTION_THRESHOLD {
        improvements.push("Include specific evidence or data to support your reasoning");
        improvements.push("Explain the cause-and-effect relationship more explicitly");
    }
    if scores.clarity.value() < SUGGESTION_THRESHOLD {
        improvements.push("Structure your explanation with clear steps or points");
        improvements.push("Avoid vague language and be more specific");
    }
    if text::word_count(input) < DETAIL_WORD_THRESHOLD {
        improvements.push("Provide more detail about the factors you considered");
    }
    if !text::has_causal_connective(&lower) {
        improvements.push("Explicitly state the \"why\" behind your decision");
    }
    if !detect_biases(input).is_empty() {
        improvements.push("Consider whether emotional factors are influencing your logic");
        improvements.push("Look for evidence that might contradict your current view");
    }
    if !text::contains_any(&lower, ALTERNATIVE_MARKERS) {
        improvements.push("Document what alternatives you considered and why you rejected them");
    }

    improvements
        .into_iter()
        .take(MAX_IMPROVEMENTS)
        .map(str::to_string)
        .collect()
}
