//! Clarifying questions and challenge counter-questions.

use rand::seq::SliceRandom;
use rand::Rng;

use super::category::DecisionCategory;
use super::results::{MAX_COUNTER_QUESTIONS, MAX_QUESTIONS};
use super::text;

/// Questions that apply to any decision.
pub const GENERIC_QUESTIONS: &[&str] = &[
    "What alternatives did you consider before making this choice?",
    "What would need to change for you to reconsider this decision?",
    "Who else is affected by this decision and how?",
    "What is the worst-case scenario if this doesn't work out?",
    "What factors were most important in reaching this conclusion?",
    "How does this align with your long-term goals?",
    "What information would have helped you decide more confidently?",
    "What are you giving up by choosing this path?",
];

/// Action keywords and the questions they add, in table order.
pub const ACTION_QUESTIONS: &[(&str, [&str; 2])] = &[
    (
        "quitting",
        [
            "What is pushing you away vs pulling you toward something new?",
            "What attempts have you made to improve the current situation?",
        ],
    ),
    (
        "starting",
        [
            "What resources do you have in place to begin?",
            "What milestones will indicate you're on the right track?",
        ],
    ),
    (
        "buying",
        [
            "Is this a need or a want, and how do you distinguish them?",
            "What happens if you wait 30 days before deciding?",
        ],
    ),
    (
        "ending",
        [
            "What have you tried to repair or improve before ending?",
            "How will you know this was the right choice in hindsight?",
        ],
    ),
    (
        "changing",
        [
            "What specific outcome are you hoping this change brings?",
            "What hasn't worked about previous attempts to change?",
        ],
    ),
    (
        "accepting",
        [
            "What conditions or boundaries are you setting?",
            "How does this acceptance align with your values?",
        ],
    ),
    (
        "rejecting",
        [
            "What would need to be different for you to accept?",
            "Are there parts of this you could accept while rejecting others?",
        ],
    ),
];

/// Category-specific clarifying questions; the first two are used.
pub fn category_questions(category: DecisionCategory) -> &'static [&'static str] {
    match category {
        DecisionCategory::Career => &[
            "How does this align with where you want to be in 5 years?",
            "What skills or experience will you gain or lose from this choice?",
            "How will this affect your work-life balance?",
            "What financial implications does this have short and long term?",
            "Have you spoken with people who made similar career moves?",
            "What would success look like in this new direction?",
        ],
        DecisionCategory::Relationship => &[
            "How have you communicated your needs in this situation?",
            "What patterns from past relationships might be influencing you?",
            "How does this decision reflect your core values?",
            "What boundaries are you setting or respecting with this choice?",
            "How might this look from the other person's perspective?",
            "What does your support system think about this decision?",
        ],
        DecisionCategory::Financial => &[
            "What is your timeline for seeing returns on this decision?",
            "How does this fit into your overall financial plan?",
            "What is your backup plan if this doesn't work out financially?",
            "Have you consulted with a financial professional about this?",
            "What opportunity costs are you accepting with this choice?",
            "How does this affect your financial security and risk tolerance?",
        ],
        DecisionCategory::Health => &[
            "Have you sought a second opinion on this health decision?",
            "How sustainable is this change in your daily life?",
            "What support systems do you have in place?",
            "How does this impact your mental and emotional wellbeing?",
            "What research have you done on alternatives or outcomes?",
            "How will you measure if this decision is working?",
        ],
        DecisionCategory::Education => &[
            "What specific outcomes do you expect from this educational investment?",
            "How does this credential translate to your career goals?",
            "What is the opportunity cost of time spent on this?",
            "Are there alternative paths to achieve the same goal?",
            "How will you apply what you learn in practice?",
            "What networking or connection opportunities does this provide?",
        ],
        DecisionCategory::Lifestyle => &[
            "How reversible is this decision if you change your mind?",
            "What daily habits will need to change because of this?",
            "How does this fit with the life you want to build?",
            "What are you trading off to make this change?",
            "How have similar changes worked out for you in the past?",
            "What does your ideal outcome look like in 1 year?",
        ],
        DecisionCategory::Technology => &[
            "What problem is this technology specifically solving for you?",
            "How does this integrate with your current systems and workflows?",
            "What is the learning curve and are you prepared for it?",
            "What are the security and privacy implications?",
            "How will this scale as your needs grow?",
            "What happens if this technology becomes obsolete or unsupported?",
        ],
    }
}

/// Counter-questions that challenge reasoning within a category.
pub fn category_counter_questions(category: DecisionCategory) -> [&'static str; 2] {
    match category {
        DecisionCategory::Career => [
            "What would a mentor or advisor say about this reasoning?",
            "How might this decision look from your future self's perspective?",
        ],
        DecisionCategory::Relationship => [
            "How might the other person describe this same situation?",
            "What role does your attachment style play in this analysis?",
        ],
        DecisionCategory::Financial => [
            "What would a financial advisor challenge in this reasoning?",
            "How does this decision perform in different economic scenarios?",
        ],
        DecisionCategory::Health => [
            "What does the medical evidence actually say about this?",
            "Are you weighing short-term comfort over long-term outcomes?",
        ],
        DecisionCategory::Education => [
            "What do successful people in your field say about this path?",
            "Is the credential or the learning more important here?",
        ],
        DecisionCategory::Lifestyle => [
            "How does this align with the person you want to become?",
            "What would you advise a friend in the same situation?",
        ],
        DecisionCategory::Technology => [
            "Are you solving the right problem with this technology?",
            "What would you do if this technology didn't exist?",
        ],
    }
}

/// Closing counter-questions shared by every category.
pub const UNIVERSAL_COUNTER_QUESTIONS: [&str; 2] = [
    "What information are you choosing to ignore or minimize?",
    "How would someone who disagrees with you argue their position?",
];

const ABSOLUTE_MARKERS: &[&str] = &["always", "never", "everyone"];
const CERTAINTY_MARKERS: &[&str] = &["definitely", "certainly", "guaranteed"];
const EMOTION_MARKERS: &[&str] = &["feel", "gut", "instinct"];

/// Appends `question` unless it is already present.
fn push_unique(questions: &mut Vec<String>, question: &str) {
    if !questions.iter().any(|q| q == question) {
        questions.push(question.to_string());
    }
}

/// Up to three distinct clarifying questions for a decision.
///
/// Action-keyword questions come first, then the first two category questions,
/// then shuffled generic questions if fewer than three were collected.
pub fn generate_questions<R: Rng + ?Sized>(
    decision_text: &str,
    category: DecisionCategory,
    rng: &mut R,
) -> Vec<String> {
    let lower = decision_text.to_lowercase();
    let mut questions: Vec<String> = Vec::new();

    for (action, action_questions) in ACTION_QUESTIONS {
        if lower.contains(action) {
            for question in action_questions {
                push_unique(&mut questions, question);
            }
        }
    }

    for question in category_questions(category).iter().take(2) {
        push_unique(&mut questions, question);
    }

    if questions.len() < MAX_QUESTIONS {
        let mut generic: Vec<&str> = GENERIC_QUESTIONS.to_vec();
        generic.shuffle(rng);
        for question in generic {
            if questions.len() >= MAX_QUESTIONS {
                break;
            }
            push_unique(&mut questions, question);
        }
    }

    questions.truncate(MAX_QUESTIONS);
    questions
}

/// Up to five questions that push back on a line of reasoning.
pub fn generate_counter_questions(
    reasoning: &str,
    conclusion: &str,
    category: DecisionCategory,
) -> Vec<String> {
    let combined = format!("{} {}", reasoning, conclusion).to_lowercase();
    let mut questions: Vec<&str> = Vec::new();

    if text::contains_any(&combined, ABSOLUTE_MARKERS) {
        questions.push("Are there any exceptions to this pattern you might be overlooking?");
    }
    if text::contains_any(&combined, CERTAINTY_MARKERS) {
        questions.push("What evidence would convince you that you might be wrong?");
    }
    if text::contains_any(&combined, EMOTION_MARKERS) {
        questions.push("If you removed the emotional component, what does the logic alone suggest?");
    }

    questions.extend(category_counter_questions(category));
    questions.extend(UNIVERSAL_COUNTER_QUESTIONS);

    questions
        .into_iter()
        .take(MAX_COUNTER_QUESTIONS)
        .map(str::to_string)
        .collect()
}
