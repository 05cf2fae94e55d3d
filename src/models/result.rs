// src/models/result.rs

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::quiz::AnswerValue;

/// Represents the 'quiz_results' table in the database.
/// One row per (student, quiz); a new submission replaces the previous one.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: i64,
    pub student_id: i64,
    pub quiz_id: i64,
    /// Integer percentage in [0, 100].
    pub score: i64,
    pub correct_count: i64,
    pub total_questions: i64,
    pub submitted_at: DateTime<Utc>,
}

/// Represents the 'question_outcomes' table: the graded breakdown of a result.
///
/// Texts are snapshots taken at grading time. `question_id` becomes null
/// when the quiz is later edited and the question is replaced.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutcome {
    pub question_id: Option<i64>,
    pub question_text: String,
    pub correct_answer: String,
    pub student_answer: String,
    pub is_correct: bool,
}

/// A result with its per-question breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResultDetail {
    #[serde(flatten)]
    pub result: QuizResult,
    pub outcomes: Vec<QuestionOutcome>,
}

/// Data written by one graded submission.
#[derive(Debug, Clone)]
pub struct NewQuizResult {
    pub student_id: i64,
    pub quiz_id: i64,
    pub score: i64,
    pub correct_count: i64,
    pub total_questions: i64,
    pub outcomes: Vec<QuestionOutcome>,
}

/// DTO for submitting a quiz attempt.
///
/// Fields are optional so that absent values are reported as validation
/// errors instead of body-deserialization failures.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitQuizRequest {
    #[serde(alias = "studentId")]
    pub student_id: Option<i64>,

    /// Key: question id. Value: chosen option id or free text; `null`
    /// leaves the question unanswered.
    pub answers: Option<HashMap<i64, Option<AnswerValue>>>,
}

impl SubmitQuizRequest {
    /// The answers that were actually given: `null` and blank entries
    /// are dropped.
    pub fn given_answers(answers: HashMap<i64, Option<AnswerValue>>) -> HashMap<i64, AnswerValue> {
        answers
            .into_iter()
            .filter_map(|(question_id, value)| {
                value
                    .filter(|value| !value.is_blank())
                    .map(|value| (question_id, value))
            })
            .collect()
    }
}

/// Response of a graded submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub score: i64,
    pub correct_answers: usize,
    pub total_questions: usize,
    pub question_results: Vec<QuestionOutcome>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct StudentResultParams {
    pub student_id: Option<i64>,
}

/// A student's stored result for one quiz, alongside the current answer key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResultView {
    pub score: i64,
    /// Question id -> correct answer text.
    pub correct_answers: BTreeMap<i64, String>,
    pub answers: Vec<QuestionOutcome>,
    pub correct_count: i64,
    pub total_questions: i64,
    pub submitted_at: DateTime<Utc>,
}
