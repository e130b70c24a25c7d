//! Deterministic rule-based pipeline behind every endpoint.
//!
//! text → category → {biases, flaws} → scores → templates → result.
//! Only template selection consumes randomness, and it is drawn from the
//! caller's `Rng` so a seeded generator reproduces results exactly.

use rand::Rng;

use super::assessment::{extract_missing_assumptions, generate_improvements};
use super::bias::{detect_biases, BiasFinding};
use super::category::detect_category;
use super::explanation::{generate_explanation, generate_step_by_step, generate_summary};
use super::flaws::detect_logical_flaws;
use super::questions::{generate_counter_questions, generate_questions};
use super::results::{AnalysisResult, Answer, ChallengeResult};
use super::scoring::calculate_scores;

/// Suggestion appended to challenge improvements after the shared rule tree.
pub const CHALLENGE_IMPROVEMENT: &str =
    "Test your conclusion against the strongest counter-argument you can construct";

/// Stateless rule-based reasoner.
pub struct RuleBasedReasoner;

impl RuleBasedReasoner {
    /// Scores and explains an answer to a question.
    pub fn analyze<R: Rng + ?Sized>(question: &str, answer: &str, rng: &mut R) -> AnalysisResult {
        let category = detect_category(&format!("{} {}", question, answer));
        let answers = [Answer::new(question, answer)];
        let scores = calculate_scores(answer);

        AnalysisResult {
            step_by_step_explanation: generate_step_by_step(question, &answers, category),
            simple_summary: generate_summary(question, category, rng),
            logical_strength_score: scores.logical_strength,
            clarity_score: scores.clarity,
            confidence_score: scores.confidence,
            missing_assumptions: extract_missing_assumptions(answer, category),
            improvement_suggestions: generate_improvements(answer, &scores),
        }
    }

    /// Surfaces flaws, biases and counter-questions in a line of reasoning.
    pub fn challenge(problem: &str, reasoning: &str, conclusion: &str) -> ChallengeResult {
        let argument = format!("{} {}", reasoning, conclusion);
        let category = detect_category(&format!("{} {}", problem, argument));
        let scores = calculate_scores(&argument);

        let mut suggested_improvements = generate_improvements(&argument, &scores);
        suggested_improvements.push(CHALLENGE_IMPROVEMENT.to_string());

        ChallengeResult {
            logical_flaws: detect_logical_flaws(&argument),
            bias_analysis: bias_analysis(&detect_biases(&argument)),
            counter_questions: generate_counter_questions(reasoning, conclusion, category),
            suggested_improvements,
        }
        .capped()
    }

    /// Up to three clarifying questions about a decision.
    pub fn questions<R: Rng + ?Sized>(decision_text: &str, rng: &mut R) -> Vec<String> {
        generate_questions(decision_text, detect_category(decision_text), rng)
    }

    /// Neutral explanation of why a decision was made.
    pub fn explain<R: Rng + ?Sized>(decision_text: &str, answers: &[Answer], rng: &mut R) -> String {
        let mut corpus = decision_text.to_string();
        for answer in answers {
            corpus.push(' ');
            corpus.push_str(&answer.question);
            corpus.push(' ');
            corpus.push_str(&answer.answer);
        }
        generate_explanation(decision_text, answers, detect_category(&corpus), rng)
    }
}

/// Paragraph describing the detected biases.
pub fn bias_analysis(findings: &[BiasFinding]) -> String {
    if findings.is_empty() {
        return "No strong bias markers were detected in the wording of this reasoning. \
                Subtler influences, such as anchoring on the first option considered or \
                weighting recent events, can still shape a conclusion without showing up \
                in the language used."
            .to_string();
    }

    let names: Vec<&str> = findings.iter().map(|f| f.name.as_str()).collect();
    let details: Vec<String> = findings
        .iter()
        .map(|f| format!("{} ({}).", f.name, f.description.to_lowercase()))
        .collect();

    format!(
        "The wording of this reasoning suggests {} at play: {}. {} \
         Patterns like these can make a conclusion feel more certain than the evidence behind it supports.",
        if findings.len() == 1 { "one bias" } else { "several biases" },
        names.join(", "),
        details.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reasoning::category::DecisionCategory;
    use crate::domain::reasoning::explanation::summaries;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BIASED_ANSWER: &str =
        "I feel like this is definitely the right choice because everyone says so";

    #[test]
    fn analyze_is_reproducible_with_the_same_seed() {
        let a = RuleBasedReasoner::analyze("Why quit?", BIASED_ANSWER, &mut StdRng::seed_from_u64(11));
        let b = RuleBasedReasoner::analyze("Why quit?", BIASED_ANSWER, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn analyze_respects_output_contract() {
        let result = RuleBasedReasoner::analyze(
            "Should I change my job?",
            BIASED_ANSWER,
            &mut StdRng::seed_from_u64(5),
        );
        assert!(result.step_by_step_explanation.starts_with("1. **Initial Assessment**"));
        assert!(result
            .step_by_step_explanation
            .contains("**Should I change my job**: Your response indicates"));
        assert!(summaries(DecisionCategory::Career).contains(&result.simple_summary.as_str()));
        assert!(result.missing_assumptions.len() <= 3);
        assert!(result.improvement_suggestions.len() <= 4);
        assert!((20..=90).contains(&result.confidence_score.value()));
    }

    #[test]
    fn challenge_caps_lists_and_describes_biases() {
        let result = RuleBasedReasoner::challenge(
            "Should I move abroad?",
            "Everyone I know moved and I feel like it is always better",
            "I will definitely move",
        );
        assert!(!result.logical_flaws.is_empty());
        assert!(result.logical_flaws.len() <= 4);
        assert!(result.counter_questions.len() <= 5);
        assert!(result.suggested_improvements.len() <= 5);
        assert!(result.bias_analysis.contains("Social Proof Bias"));
        assert!(result.bias_analysis.contains("Emotional Reasoning"));
    }

    #[test]
    fn challenge_always_includes_counter_argument_suggestion_when_room() {
        let result = RuleBasedReasoner::challenge(
            "Which laptop?",
            "I compared battery data and benchmark statistics because I travel often, \
             and I evaluated the alternative models. Specifically, the primary factor was weight.",
            "I chose the lighter one",
        );
        assert_eq!(
            result.suggested_improvements.last().map(String::as_str),
            Some(CHALLENGE_IMPROVEMENT)
        );
    }

    #[test]
    fn bias_analysis_without_findings_is_neutral() {
        let text = bias_analysis(&[]);
        assert!(text.starts_with("No strong bias markers"));
    }

    #[test]
    fn questions_are_bounded_and_end_with_question_marks() {
        let questions =
            RuleBasedReasoner::questions("I am buying a new phone", &mut StdRng::seed_from_u64(2));
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|q| !q.is_empty() && q.ends_with('?')));
        assert_eq!(
            questions[0],
            "Is this a need or a want, and how do you distinguish them?"
        );
    }

    #[test]
    fn explain_uses_answers_for_category() {
        let answers = vec![Answer::new("What drove it?", "My doctor and my sleep")];
        let text = RuleBasedReasoner::explain("I made a change", &answers, &mut StdRng::seed_from_u64(4));
        assert!(text.contains("When asked \"What drove it\""));
    }
}
