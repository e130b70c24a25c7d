//! Decision category classification by keyword scoring.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Life-domain tag used to select category-specific templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionCategory {
    Career,
    Relationship,
    Financial,
    Health,
    Education,
    Lifestyle,
    Technology,
}

impl DecisionCategory {
    /// All categories in declaration order. Ties in classification go to the earliest.
    pub const ALL: [DecisionCategory; 7] = [
        DecisionCategory::Career,
        DecisionCategory::Relationship,
        DecisionCategory::Financial,
        DecisionCategory::Health,
        DecisionCategory::Education,
        DecisionCategory::Lifestyle,
        DecisionCategory::Technology,
    ];

    /// Category returned when no keyword matches.
    pub const DEFAULT: DecisionCategory = DecisionCategory::Lifestyle;

    /// Lower-case name as used in templates and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionCategory::Career => "career",
            DecisionCategory::Relationship => "relationship",
            DecisionCategory::Financial => "financial",
            DecisionCategory::Health => "health",
            DecisionCategory::Education => "education",
            DecisionCategory::Lifestyle => "lifestyle",
            DecisionCategory::Technology => "technology",
        }
    }

    /// Trigger substrings for this category.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            DecisionCategory::Career => &[
                "job", "work", "career", "promotion", "salary", "resign", "quit", "hire",
                "interview", "boss", "colleague", "office", "remote", "company", "business",
                "startup", "freelance",
            ],
            DecisionCategory::Relationship => &[
                "relationship", "marry", "marriage", "date", "dating", "partner", "spouse",
                "divorce", "breakup", "love", "friend", "family", "parent", "child", "sibling",
            ],
            DecisionCategory::Financial => &[
                "money", "invest", "investment", "save", "spend", "buy", "purchase", "sell",
                "loan", "debt", "mortgage", "rent", "budget", "stock", "crypto", "retire",
            ],
            DecisionCategory::Health => &[
                "health", "exercise", "diet", "weight", "doctor", "medical", "surgery",
                "therapy", "mental", "sleep", "stress", "medication", "treatment", "hospital",
            ],
            DecisionCategory::Education => &[
                "study", "college", "university", "degree", "course", "learn", "school", "exam",
                "graduate", "major", "student", "teacher", "training",
            ],
            DecisionCategory::Lifestyle => &[
                "move", "relocate", "travel", "hobby", "pet", "home", "apartment", "house",
                "city", "country", "lifestyle", "habit",
            ],
            DecisionCategory::Technology => &[
                "software", "app", "computer", "phone", "device", "technology", "programming",
                "code", "digital", "online", "internet",
            ],
        }
    }
}

impl fmt::Display for DecisionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies free text into a decision category.
///
/// Each keyword present anywhere in the lower-cased text adds one point to its
/// category (presence, not frequency). The strictly highest score wins; ties go
/// to the first-declared category. With no matches the result is `Lifestyle`.
pub fn detect_category(text: &str) -> DecisionCategory {
    let lower = text.to_lowercase();

    let mut best = DecisionCategory::DEFAULT;
    let mut best_score = 0;
    for category in DecisionCategory::ALL {
        let score = super::text::count_present(&lower, category.keywords());
        if score > best_score {
            best = category;
            best_score = score;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn no_keywords_defaults_to_lifestyle() {
        assert_eq!(detect_category("xyz"), DecisionCategory::Lifestyle);
        assert_eq!(detect_category(""), DecisionCategory::Lifestyle);
    }

    #[test]
    fn quitting_job_for_business_is_career() {
        assert_eq!(
            detect_category("I am quitting my job to start a business"),
            DecisionCategory::Career
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(detect_category("My DOCTOR said so"), DecisionCategory::Health);
    }

    #[test]
    fn keyword_frequency_does_not_matter() {
        // "money" three times still scores one point; "exercise" + "diet" score two.
        assert_eq!(
            detect_category("money money money, exercise and diet"),
            DecisionCategory::Health
        );
    }

    #[test]
    fn ties_go_to_first_declared_category() {
        // One career keyword ("boss"), one health keyword ("doctor").
        assert_eq!(detect_category("boss doctor"), DecisionCategory::Career);
        // One financial keyword ("loan"), one technology keyword ("software").
        assert_eq!(detect_category("loan software"), DecisionCategory::Financial);
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&DecisionCategory::Technology).unwrap();
        assert_eq!(json, "\"technology\"");
        assert_eq!(DecisionCategory::Career.to_string(), "career");
    }

    proptest! {
        #[test]
        fn always_returns_a_declared_category(text in ".{0,200}") {
            let category = detect_category(&text);
            prop_assert!(DecisionCategory::ALL.contains(&category));
        }
    }
}
