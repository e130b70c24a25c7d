//! Prompt construction and AI output parsing.
//!
//! Builders produce provider-agnostic `CompletionRequest`s. Parsers accept
//! the raw completion text, tolerate a markdown code fence around JSON, and
//! spot-check field types before building domain results.

use serde_json::{Map, Value};

use super::errors::ReasoningError;
use crate::domain::foundation::Score;
use crate::domain::reasoning::{AnalysisResult, Answer, ChallengeResult, MAX_QUESTIONS};
use crate::ports::{CompletionRequest, MessageRole, Operation, RequestMetadata};

pub const ANALYSIS_TEMPERATURE: f32 = 0.3;
pub const CHALLENGE_TEMPERATURE: f32 = 0.4;
pub const QUESTIONS_TEMPERATURE: f32 = 0.5;
pub const EXPLANATION_TEMPERATURE: f32 = 0.5;

/// Response language for the analysis prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Hindi,
}

impl Language {
    /// `"hi"` selects Hindi; anything else is English.
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some(c) if c.eq_ignore_ascii_case("hi") => Language::Hindi,
            _ => Language::English,
        }
    }

    fn instruction(&self) -> &'static str {
        match self {
            Language::English => "Respond in English language.",
            Language::Hindi => "Respond in Hindi language.",
        }
    }
}

const ANALYSIS_SYSTEM_PROMPT: &str = "You are a reasoning evaluation AI. Your job is to analyze the quality of human reasoning and explanations.

You must respond with a valid JSON object containing these exact fields:
- step_by_step_explanation: A detailed breakdown of the reasoning process (string)
- simple_summary: A 1-2 sentence plain language summary (string)
- logical_strength_score: How logically sound the reasoning is (integer 0-100)
- clarity_score: How clear and understandable the explanation is (integer 0-100)
- confidence_score: Your confidence in this analysis (integer 0-100)
- missing_assumptions: Array of unstated assumptions that could affect the conclusion (array of strings)
- improvement_suggestions: Specific ways to strengthen the reasoning (array of strings)

Be objective and analytical. Do not give advice or motivational language.
Focus on evaluating the QUALITY of reasoning, not whether the decision is right or wrong.
Output ONLY the JSON object, no other text.";

const CHALLENGE_SYSTEM_PROMPT: &str = "You are a critical thinking coach. Your role is to challenge the user's reasoning to help them think more clearly.

Rules:
- Do NOT give the answer or tell them what to conclude
- Do NOT be judgmental or discouraging
- Focus on identifying gaps, biases, and logical flaws
- Ask counter-questions that make them reconsider
- Suggest ways to strengthen their reasoning process

You must respond with a valid JSON object containing:
- logical_flaws: Array of specific logical fallacies or errors in reasoning (array of strings)
- bias_analysis: A paragraph analyzing potential cognitive biases at play (string)
- counter_questions: Thought-provoking questions that challenge their assumptions (array of strings, max 5)
- suggested_improvements: Specific ways to strengthen their reasoning process (array of strings)

Be constructive but rigorous. Output ONLY the JSON object, no other text.";

const QUESTIONS_SYSTEM_PROMPT: &str = "You are a behavioral reasoning assistant.
Your task is to ask short, specific questions to understand why a person made a decision.

Rules:
- Ask a maximum of 3 questions
- No advice
- No encouragement
- No motivational language
- No explanations
- Output ONLY questions, one per line
- Do not number the questions";

const EXPLANATION_SYSTEM_PROMPT: &str = "You explain human decisions clearly and neutrally.

Rules:
- Explain WHY the decision was made
- Use second-person (\"you\")
- 4 to 6 short lines maximum
- No advice
- No suggestions
- No judgment
- No motivational tone
- No \"you should\", \"next time\", \"consider\", \"try to\"
- Simply state the reasoning behind the decision";

pub fn analysis_request(
    question: &str,
    answer: &str,
    language: Language,
    subject: Option<&str>,
) -> CompletionRequest {
    let mut user = format!(
        "{}\n\nQuestion/Decision: \"{}\"\n\nUser's Answer/Reasoning: \"{}\"",
        language.instruction(),
        question,
        answer
    );
    if let Some(subject) = subject.map(str::trim).filter(|s| !s.is_empty()) {
        user.push_str(&format!("\n\nSubject Area: {}", subject));
    }
    user.push_str("\n\nAnalyze the quality of this reasoning and provide your evaluation as JSON.");

    CompletionRequest::new(RequestMetadata::new(Operation::AnalyzeExplanation))
        .with_system_prompt(ANALYSIS_SYSTEM_PROMPT)
        .with_message(MessageRole::User, user)
        .with_temperature(ANALYSIS_TEMPERATURE)
        .with_json_mode()
}

pub fn challenge_request(problem: &str, reasoning: &str, conclusion: &str) -> CompletionRequest {
    let user = format!(
        "Problem Statement: \"{}\"\n\nUser's Reasoning: \"{}\"\n\nUser's Conclusion: \"{}\"\n\n\
         Analyze this thinking process and provide your challenge as JSON.",
        problem, reasoning, conclusion
    );

    CompletionRequest::new(RequestMetadata::new(Operation::ChallengeThinking))
        .with_system_prompt(CHALLENGE_SYSTEM_PROMPT)
        .with_message(MessageRole::User, user)
        .with_temperature(CHALLENGE_TEMPERATURE)
        .with_json_mode()
}

pub fn questions_request(decision_text: &str) -> CompletionRequest {
    let user = format!(
        "Decision: \"{}\"\n\nGenerate 3 short questions to understand why this decision was made.",
        decision_text
    );

    CompletionRequest::new(RequestMetadata::new(Operation::GenerateQuestions))
        .with_system_prompt(QUESTIONS_SYSTEM_PROMPT)
        .with_message(MessageRole::User, user)
        .with_temperature(QUESTIONS_TEMPERATURE)
}

pub fn explanation_request(decision_text: &str, answers: &[Answer]) -> CompletionRequest {
    let formatted: Vec<String> = answers
        .iter()
        .enumerate()
        .map(|(i, a)| format!("Q{n}: \"{}\"\nA{n}: \"{}\"", a.question, a.answer, n = i + 1))
        .collect();

    let mut user = format!("Decision: \"{}\"\n\n", decision_text);
    if !formatted.is_empty() {
        user.push_str(&format!("Answers:\n{}\n\n", formatted.join("\n\n")));
    }
    user.push_str("Explain why this decision was made.");

    CompletionRequest::new(RequestMetadata::new(Operation::GenerateExplanation))
        .with_system_prompt(EXPLANATION_SYSTEM_PROMPT)
        .with_message(MessageRole::User, user)
        .with_temperature(EXPLANATION_TEMPERATURE)
}

/// Removes a surrounding markdown code fence, with or without a `json` tag.
pub fn strip_code_fence(text: &str) -> &str {
    let mut cleaned = text.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}

fn parse_object(text: &str) -> Result<Map<String, Value>, ReasoningError> {
    match serde_json::from_str::<Value>(strip_code_fence(text)) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ReasoningError::malformed("expected a JSON object")),
        Err(e) => Err(ReasoningError::malformed(format!("invalid JSON: {}", e))),
    }
}

fn string_field(map: &Map<String, Value>, field: &str) -> Result<String, ReasoningError> {
    map.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ReasoningError::malformed(format!("{} must be a string", field)))
}

fn score_field(map: &Map<String, Value>, field: &str) -> Result<Score, ReasoningError> {
    map.get(field)
        .and_then(Value::as_f64)
        .map(Score::from_f64)
        .ok_or_else(|| ReasoningError::malformed(format!("{} must be a number", field)))
}

fn string_list_field(map: &Map<String, Value>, field: &str) -> Result<Vec<String>, ReasoningError> {
    let items = map
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| ReasoningError::malformed(format!("{} must be an array", field)))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ReasoningError::malformed(format!("{} must contain strings", field)))
        })
        .collect()
}

/// Parses and spot-checks an analysis payload. Scores are clamped to 0..=100.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, ReasoningError> {
    let map = parse_object(text)?;
    Ok(AnalysisResult {
        step_by_step_explanation: string_field(&map, "step_by_step_explanation")?,
        simple_summary: string_field(&map, "simple_summary")?,
        logical_strength_score: score_field(&map, "logical_strength_score")?,
        clarity_score: score_field(&map, "clarity_score")?,
        confidence_score: score_field(&map, "confidence_score")?,
        missing_assumptions: string_list_field(&map, "missing_assumptions")?,
        improvement_suggestions: string_list_field(&map, "improvement_suggestions")?,
    }
    .capped())
}

/// Parses and spot-checks a challenge payload.
pub fn parse_challenge(text: &str) -> Result<ChallengeResult, ReasoningError> {
    let map = parse_object(text)?;
    Ok(ChallengeResult {
        logical_flaws: string_list_field(&map, "logical_flaws")?,
        bias_analysis: string_field(&map, "bias_analysis")?,
        counter_questions: string_list_field(&map, "counter_questions")?,
        suggested_improvements: string_list_field(&map, "suggested_improvements")?,
    }
    .capped())
}

/// Strips a leading `N.` marker.
fn strip_numbering(line: &str) -> &str {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix('.') {
            return rest.trim_start();
        }
    }
    line
}

/// One question per line; numbering is stripped and only lines ending in
/// `?` are kept, de-duplicated, at most three.
pub fn parse_questions(text: &str) -> Result<Vec<String>, ReasoningError> {
    let mut questions: Vec<String> = Vec::new();
    for line in text.lines() {
        let question = strip_numbering(line.trim()).trim();
        if question.is_empty() || !question.ends_with('?') {
            continue;
        }
        if !questions.iter().any(|q| q == question) {
            questions.push(question.to_string());
        }
        if questions.len() == MAX_QUESTIONS {
            break;
        }
    }

    if questions.is_empty() {
        return Err(ReasoningError::malformed("no questions in AI response"));
    }
    Ok(questions)
}

/// Trimmed explanation text; empty output is malformed.
pub fn parse_explanation(text: &str) -> Result<String, ReasoningError> {
    let explanation = text.trim();
    if explanation.is_empty() {
        return Err(ReasoningError::malformed("empty explanation"));
    }
    Ok(explanation.to_string())
}
