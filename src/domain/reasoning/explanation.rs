//! Neutral, non-advisory narrative templates.

use rand::Rng;

use super::category::DecisionCategory;
use super::results::Answer;
use super::text;

/// Most themes named in an explanation.
pub const MAX_THEMES: usize = 3;
/// Answers quoted in an explanation.
pub const QUOTED_ANSWERS: usize = 2;
/// Characters kept from an answer quoted in an explanation.
pub const EXPLANATION_EXCERPT_CHARS: usize = 100;
/// Characters kept from an answer quoted in a step-by-step breakdown.
pub const STEP_EXCERPT_CHARS: usize = 80;

const THEME_PATTERNS: &[(&str, &str)] = &[
    ("financial", "financial considerations"),
    ("money", "monetary factors"),
    ("time", "time constraints"),
    ("family", "family dynamics"),
    ("career", "career implications"),
    ("health", "health concerns"),
    ("stress", "stress levels"),
    ("growth", "personal growth"),
    ("opportunity", "opportunity assessment"),
    ("risk", "risk evaluation"),
    ("security", "security needs"),
    ("freedom", "desire for freedom"),
    ("stability", "need for stability"),
    ("passion", "passion and interest"),
    ("values", "personal values"),
];

/// Closing sentences shared by every category.
pub const CLOSINGS: &[&str] = &[
    "This decision represents your current understanding of the situation and available information.",
    "Your reasoning reflects the priorities and constraints you identified at this time.",
    "This conclusion follows from the factors you determined to be most relevant.",
];

/// Opening sentences for a category.
pub fn openings(category: DecisionCategory) -> &'static [&'static str] {
    match category {
        DecisionCategory::Career => &[
            "You made this career decision based on your assessment of professional growth and current circumstances.",
            "This career choice reflects your evaluation of available opportunities and personal priorities.",
        ],
        DecisionCategory::Relationship => &[
            "This relationship decision stems from your understanding of the dynamics involved and your emotional needs.",
            "You reached this conclusion by weighing the relationship factors that matter most to you.",
        ],
        DecisionCategory::Financial => &[
            "This financial decision reflects your analysis of monetary factors and risk tolerance.",
            "You based this choice on your financial situation and future monetary goals.",
        ],
        DecisionCategory::Health => &[
            "This health-related decision comes from your evaluation of wellbeing priorities and available options.",
            "You made this health choice by considering your physical and mental wellness needs.",
        ],
        DecisionCategory::Education => &[
            "This educational decision reflects your assessment of learning goals and career trajectory.",
            "You chose this path based on your evaluation of educational value and future applications.",
        ],
        DecisionCategory::Lifestyle => &[
            "This lifestyle decision reflects your priorities and how you want to structure your daily life.",
            "You made this choice based on what aligns with your vision of how you want to live.",
        ],
        DecisionCategory::Technology => &[
            "This technology decision reflects your assessment of functional needs and practical considerations.",
            "You based this choice on evaluating how this technology fits your requirements and workflow.",
        ],
    }
}

/// One-sentence summaries for a category.
pub fn summaries(category: DecisionCategory) -> &'static [&'static str] {
    match category {
        DecisionCategory::Career => &[
            "This career decision was made after weighing professional growth against current stability.",
            "The choice reflects a balance between career aspirations and practical circumstances.",
        ],
        DecisionCategory::Relationship => &[
            "This relationship decision emerged from evaluating emotional needs and interpersonal dynamics.",
            "The choice reflects priorities around connection, boundaries, and personal wellbeing.",
        ],
        DecisionCategory::Financial => &[
            "This financial decision balances potential returns against acceptable risk levels.",
            "The choice reflects current financial position and future monetary objectives.",
        ],
        DecisionCategory::Health => &[
            "This health decision prioritizes specific wellness goals within current constraints.",
            "The choice reflects a balance between health outcomes and lifestyle sustainability.",
        ],
        DecisionCategory::Education => &[
            "This educational decision weighs learning investment against expected career returns.",
            "The choice reflects goals around skill development and professional advancement.",
        ],
        DecisionCategory::Lifestyle => &[
            "This lifestyle decision reflects personal values and desired quality of life.",
            "The choice balances immediate preferences with longer-term life goals.",
        ],
        DecisionCategory::Technology => &[
            "This technology decision addresses specific functional needs within practical constraints.",
            "The choice reflects requirements for efficiency, capability, and future scalability.",
        ],
    }
}

/// Picks one entry of a non-empty template pool.
pub(crate) fn pick<R: Rng + ?Sized>(pool: &[&'static str], rng: &mut R) -> &'static str {
    pool[rng.gen_range(0..pool.len())]
}

/// Theme phrases whose keyword appears in the text, in table order, at most three.
pub fn extract_themes(input: &str) -> Vec<&'static str> {
    let lower = input.to_lowercase();
    let mut themes: Vec<&'static str> = Vec::new();
    for (keyword, theme) in THEME_PATTERNS {
        if lower.contains(keyword) && !themes.contains(theme) {
            themes.push(theme);
        }
    }
    themes.truncate(MAX_THEMES);
    themes
}

/// Builds a short neutral narrative of why the decision was made.
pub fn generate_explanation<R: Rng + ?Sized>(
    decision_text: &str,
    answers: &[Answer],
    category: DecisionCategory,
    rng: &mut R,
) -> String {
    let mut corpus = decision_text.to_string();
    for answer in answers {
        corpus.push(' ');
        corpus.push_str(&answer.answer);
    }
    let themes = extract_themes(&corpus);

    let mut parts = vec![pick(openings(category), rng).to_string()];

    if !themes.is_empty() {
        parts.push(format!(
            "Key factors in your reasoning include {}.",
            themes.join(", ")
        ));
    }

    if !answers.is_empty() {
        let insights: Vec<String> = answers
            .iter()
            .take(QUOTED_ANSWERS)
            .map(|a| {
                format!(
                    "When asked \"{}\", you indicated: \"{}\"",
                    text::strip_question_mark(&a.question),
                    text::excerpt(&a.answer, EXPLANATION_EXCERPT_CHARS)
                )
            })
            .collect();
        parts.push(insights.join(" "));
    }

    parts.push(pick(CLOSINGS, rng).to_string());
    parts.join("\n\n")
}

/// One randomly chosen summary sentence for the category.
pub fn generate_summary<R: Rng + ?Sized>(
    _decision_text: &str,
    category: DecisionCategory,
    rng: &mut R,
) -> String {
    pick(summaries(category), rng).to_string()
}

/// Numbered breakdown of the reasoning path.
pub fn generate_step_by_step(
    _decision_text: &str,
    answers: &[Answer],
    category: DecisionCategory,
) -> String {
    let mut steps: Vec<String> = Vec::with_capacity(answers.len() + 3);

    steps.push(format!(
        "**Initial Assessment**: You identified a decision point regarding {}-related matters.",
        category
    ));

    if !answers.is_empty() {
        steps.push(format!(
            "**Factor Identification**: You considered {} key factors through self-reflection.",
            answers.len()
        ));
        for answer in answers {
            steps.push(format!(
                "**{}**: Your response indicates: \"{}\"",
                text::strip_question_mark(&answer.question),
                text::excerpt(&answer.answer, STEP_EXCERPT_CHARS)
            ));
        }
    }

    steps.push(
        "**Conclusion Reached**: Based on these factors, you arrived at your stated decision."
            .to_string(),
    );

    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn themes_follow_table_order_and_cap_at_three() {
        let themes = extract_themes("values, risk, money, time and family");
        assert_eq!(
            themes,
            vec!["monetary factors", "time constraints", "family dynamics"]
        );
    }

    #[test]
    fn explanation_opens_and_closes_from_fixed_pools() {
        let text = generate_explanation("Switching jobs", &[], DecisionCategory::Career, &mut rng());
        let parts: Vec<&str> = text.split("\n\n").collect();
        assert!(openings(DecisionCategory::Career).contains(&parts[0]));
        assert!(CLOSINGS.contains(parts.last().unwrap()));
    }

    #[test]
    fn explanation_quotes_at_most_two_answers_and_truncates() {
        let long = "x".repeat(150);
        let answers = vec![
            Answer::new("Why now?", long.clone()),
            Answer::new("What else?", "Nothing"),
            Answer::new("Third?", "Ignored"),
        ];
        let text = generate_explanation("A move", &answers, DecisionCategory::Lifestyle, &mut rng());
        assert!(text.contains(&format!("When asked \"Why now\", you indicated: \"{}...\"", "x".repeat(100))));
        assert!(text.contains("When asked \"What else\", you indicated: \"Nothing\""));
        assert!(!text.contains("Ignored"));
    }

    #[test]
    fn explanation_names_themes_from_answers() {
        let answers = vec![Answer::new("Why?", "It gives me more freedom and stability")];
        let text = generate_explanation("Going freelance", &answers, DecisionCategory::Career, &mut rng());
        assert!(text.contains(
            "Key factors in your reasoning include desire for freedom, need for stability."
        ));
    }

    #[test]
    fn same_seed_gives_same_explanation() {
        let answers = vec![Answer::new("Why?", "Time")];
        let a = generate_explanation("d", &answers, DecisionCategory::Health, &mut rng());
        let b = generate_explanation("d", &answers, DecisionCategory::Health, &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn summary_comes_from_category_pool() {
        for category in DecisionCategory::ALL {
            let summary = generate_summary("anything", category, &mut rng());
            assert!(summaries(category).contains(&summary.as_str()));
        }
    }

    #[test]
    fn step_by_step_without_answers_has_two_steps() {
        let steps = generate_step_by_step("x", &[], DecisionCategory::Education);
        assert_eq!(
            steps,
            "1. **Initial Assessment**: You identified a decision point regarding education-related matters.\n\n\
             2. **Conclusion Reached**: Based on these factors, you arrived at your stated decision."
        );
    }

    #[test]
    fn step_by_step_numbers_sequentially_with_answers() {
        let answers = vec![
            Answer::new("Why?", "Because"),
            Answer::new("How long?", "y".repeat(90)),
        ];
        let steps = generate_step_by_step("x", &answers, DecisionCategory::Career);
        let lines: Vec<&str> = steps.split("\n\n").collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("2. **Factor Identification**: You considered 2 key factors"));
        assert_eq!(lines[2], "3. **Why**: Your response indicates: \"Because\"");
        assert_eq!(
            lines[3],
            format!("4. **How long**: Your response indicates: \"{}...\"", "y".repeat(80))
        );
        assert!(lines[4].starts_with("5. **Conclusion Reached**"));
    }
}
