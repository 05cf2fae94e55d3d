// src/services/aggregation.rs

//! Statistics derived from stored results. Nothing here is persisted.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    models::{quiz::Quiz, result::QuizResult},
    services::grading::rounded_ratio,
};

/// Score statistics of one quiz across all students.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRollup {
    pub quiz_id: i64,
    pub quiz_name: String,
    pub total_score: i64,
    /// `None` (serialized as `null`) when nobody has submitted yet.
    pub average_score: Option<i64>,
    pub result_count: usize,
}

/// One student's standing on one quiz of a course.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentQuizScore {
    pub quiz_id: i64,
    pub quiz_name: String,
    /// Number of correct answers, 0 when not attempted.
    pub score: i64,
    pub total_questions: i64,
    pub percentage_score: i64,
    pub attempted: bool,
}

/// Rounded mean of the scores, `None` for an empty slice.
pub fn average_score(scores: &[i64]) -> Option<i64> {
    if scores.is_empty() {
        return None;
    }
    let total: i64 = scores.iter().sum();
    Some(rounded_ratio(total, scores.len() as i64))
}

/// `round(100 * correct / total_questions)`, clamped to [0, 100].
/// A quiz without questions is defined as 0%.
pub fn percentage_of(correct: i64, total_questions: i64) -> i64 {
    if total_questions <= 0 || correct <= 0 {
        return 0;
    }
    rounded_ratio(100 * correct, total_questions).min(100)
}

pub fn rollup_quiz(quiz_id: i64, quiz_name: &str, results: &[QuizResult]) -> QuizRollup {
    let scores: Vec<i64> = results.iter().map(|r| r.score).collect();
    QuizRollup {
        quiz_id,
        quiz_name: quiz_name.to_string(),
        total_score: scores.iter().sum(),
        average_score: average_score(&scores),
        result_count: scores.len(),
    }
}

/// Per-quiz rollup for every quiz of a course, in the given quiz order.
/// Quizzes missing from `results_by_quiz` are reported with no results.
pub fn course_rollup(
    quizzes: &[Quiz],
    results_by_quiz: &HashMap<i64, Vec<QuizResult>>,
) -> Vec<QuizRollup> {
    quizzes
        .iter()
        .map(|quiz| {
            let results = results_by_quiz
                .get(&quiz.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            rollup_quiz(quiz.id, &quiz.quiz_name, results)
        })
        .collect()
}

/// A student's percentage on every quiz of a course.
///
/// The percentage is taken against the quiz's current question count.
pub fn student_course_scores(quizzes: &[Quiz], results: &[QuizResult]) -> Vec<StudentQuizScore> {
    let by_quiz: HashMap<i64, &QuizResult> = results.iter().map(|r| (r.quiz_id, r)).collect();

    quizzes
        .iter()
        .map(|quiz| {
            let total_questions = quiz.questions.len() as i64;
            let result = by_quiz.get(&quiz.id);
            let score = result.map(|r| r.correct_count).unwrap_or(0);

            StudentQuizScore {
                quiz_id: quiz.id,
                quiz_name: quiz.quiz_name.clone(),
                score,
                total_questions,
                percentage_score: percentage_of(score, total_questions),
                attempted: result.is_some(),
            }
        })
        .collect()
}
