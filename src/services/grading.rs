// src/services/grading.rs

//! Quiz grading.
//!
//! Pure functions over already-loaded questions: no I/O happens here.

use std::collections::HashMap;

use crate::models::{
    quiz::{AnswerValue, Question, QuestionType},
    result::QuestionOutcome,
};

/// Recorded as the student answer of every unanswered question.
pub const NO_ANSWER: &str = "No Answer Provided";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GradingError {
    #[error("Quiz has no questions to grade")]
    EmptyQuiz,

    #[error("Question {question_id} does not have exactly one correct answer")]
    BrokenAnswerKey { question_id: i64 },
}

/// The correct answer of one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKey<'a> {
    Option { id: i64, text: &'a str },
    Text(&'a str),
}

impl AnswerKey<'_> {
    pub fn text(&self) -> &str {
        match self {
            AnswerKey::Option { text, .. } => text,
            AnswerKey::Text(text) => text,
        }
    }
}

/// Outcome of grading one submission against a quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeReport {
    pub question_results: Vec<QuestionOutcome>,
    pub correct_count: usize,
    pub total_questions: usize,
    /// `round(100 * correct_count / total_questions)`.
    pub score: i64,
}

/// Resolves the answer key of a question.
///
/// Single-select questions must flag exactly one option as correct,
/// free-text questions must carry a non-blank canonical answer.
pub fn answer_key(question: &Question) -> Result<AnswerKey<'_>, GradingError> {
    let broken = GradingError::BrokenAnswerKey {
        question_id: question.id,
    };

    match question.question_type {
        QuestionType::Single => {
            let mut correct = question.options.iter().filter(|o| o.is_correct);
            match (correct.next(), correct.next()) {
                (Some(option), None) => Ok(AnswerKey::Option {
                    id: option.id,
                    text: &option.option_text,
                }),
                _ => Err(broken),
            }
        }
        QuestionType::Text => question
            .correct_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .map(AnswerKey::Text)
            .ok_or(broken),
    }
}

/// Case-folds and trims free-text answers before comparison.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// `round(numerator / denominator)`, half rounding up, for non-negative
/// operands and a positive denominator.
pub fn rounded_ratio(numerator: i64, denominator: i64) -> i64 {
    debug_assert!(denominator > 0 && numerator >= 0);
    (2 * numerator + denominator) / (2 * denominator)
}

/// Integer percentage of correct answers.
pub fn score_percentage(correct: usize, total: usize) -> Result<i64, GradingError> {
    if total == 0 {
        return Err(GradingError::EmptyQuiz);
    }
    Ok(rounded_ratio(100 * correct as i64, total as i64))
}

/// Grades a submission.
///
/// Every question of the quiz yields exactly one outcome, in quiz order.
/// Unanswered questions (blank text included) count as wrong; answers to
/// ids that are not part of the quiz are ignored.
pub fn grade(
    questions: &[Question],
    answers: &HashMap<i64, AnswerValue>,
) -> Result<GradeReport, GradingError> {
    if questions.is_empty() {
        return Err(GradingError::EmptyQuiz);
    }

    let mut question_results = Vec::with_capacity(questions.len());

    for question in questions {
        let key = answer_key(question)?;

        let given = answers.get(&question.id).filter(|value| !value.is_blank());
        let (student_answer, is_correct) = match given {
            Some(value) => judge(question, &key, value),
            None => (NO_ANSWER.to_string(), false),
        };

        question_results.push(QuestionOutcome {
            question_id: Some(question.id),
            question_text: question.question_text.clone(),
            correct_answer: key.text().to_string(),
            student_answer,
            is_correct,
        });
    }

    let correct_count = question_results.iter().filter(|r| r.is_correct).count();
    let total_questions = question_results.len();
    let score = score_percentage(correct_count, total_questions)?;

    Ok(GradeReport {
        question_results,
        correct_count,
        total_questions,
        score,
    })
}

/// Returns the recorded answer and its verdict.
fn judge(question: &Question, key: &AnswerKey<'_>, value: &AnswerValue) -> (String, bool) {
    match key {
        AnswerKey::Option { id, .. } => {
            let chosen = value.as_option_id();
            // Record the option label when the id belongs to this question.
            let recorded = chosen
                .and_then(|chosen| question.options.iter().find(|o| o.id == chosen))
                .map(|o| o.option_text.clone())
                .unwrap_or_else(|| value.to_string());
            (recorded, chosen == Some(*id))
        }
        AnswerKey::Text(canonical) => {
            let recorded = value.to_string();
            let is_correct = normalize(&recorded) == normalize(canonical);
            (recorded, is_correct)
        }
    }
}
