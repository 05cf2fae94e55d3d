// src/models/quiz.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// How a question is answered and graded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// One option out of several is correct.
    #[default]
    Single,
    /// Graded by normalized comparison against a canonical answer.
    Text,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Single => "single",
            QuestionType::Text => "text",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "single" => Some(QuestionType::Single),
            "text" => Some(QuestionType::Text),
            _ => None,
        }
    }
}

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct QuizRow {
    pub id: i64,
    pub module_id: i64,
    pub quiz_name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Represents the 'questions' table in the database.
/// `question_type` is kept as raw text and checked when the quiz is assembled.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub quiz_id: i64,
    pub position: i64,
    pub question_text: String,
    pub question_type: String,
    pub correct_text: Option<String>,
}

/// Represents the 'options' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct OptionRow {
    pub id: i64,
    pub question_id: i64,
    pub position: i64,
    pub option_text: String,
    pub is_correct: bool,
}

/// A quiz together with its ordered questions and options.
#[derive(Debug, Clone, Serialize)]
pub struct Quiz {
    pub id: i64,
    pub module_id: i64,
    pub quiz_name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    pub options: Vec<AnswerOption>,
    /// Canonical answer of a free-text question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOption {
    pub id: i64,
    pub option_text: String,
    pub is_correct: bool,
}

impl From<OptionRow> for AnswerOption {
    fn from(row: OptionRow) -> Self {
        Self {
            id: row.id,
            option_text: row.option_text,
            is_correct: row.is_correct,
        }
    }
}

/// DTO for sending a quiz to a student (no answer key).
#[derive(Debug, Serialize)]
pub struct PublicQuiz {
    pub id: i64,
    pub module_id: i64,
    pub quiz_name: String,
    pub description: Option<String>,
    pub questions: Vec<PublicQuestion>,
}

#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    pub options: Vec<PublicOption>,
}

#[derive(Debug, Serialize)]
pub struct PublicOption {
    pub id: i64,
    pub option_text: String,
}

impl From<&Quiz> for PublicQuiz {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id,
            module_id: quiz.module_id,
            quiz_name: quiz.quiz_name.clone(),
            description: quiz.description.clone(),
            questions: quiz
                .questions
                .iter()
                .map(|q| PublicQuestion {
                    id: q.id,
                    question_text: q.question_text.clone(),
                    question_type: q.question_type,
                    options: q
                        .options
                        .iter()
                        .map(|o| PublicOption {
                            id: o.id,
                            option_text: o.option_text.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// A learner's answer to one question.
///
/// JSON numbers are option ids, JSON strings are free text. A string that
/// holds an integer is still accepted as an option id for single-select
/// questions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    OptionId(i64),
    Text(String),
}

impl AnswerValue {
    /// A blank string is treated as no answer at all.
    pub fn is_blank(&self) -> bool {
        matches!(self, AnswerValue::Text(text) if text.trim().is_empty())
    }

    pub fn as_option_id(&self) -> Option<i64> {
        match self {
            AnswerValue::OptionId(id) => Some(*id),
            AnswerValue::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::OptionId(id) => write!(f, "{}", id),
            AnswerValue::Text(text) => f.write_str(text),
        }
    }
}

/// DTO for creating or replacing a quiz together with its questions.
#[derive(Debug, Deserialize, Validate)]
pub struct QuizPayload {
    #[validate(length(min = 1, max = 200, message = "Quiz name must be between 1 and 200 characters."))]
    pub quiz_name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    /// Required on create, optional on replace (moves the quiz when set).
    #[serde(alias = "moduleId")]
    pub module_id: Option<i64>,

    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<QuestionPayload>,
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = validate_answer_key))]
pub struct QuestionPayload {
    #[serde(alias = "text")]
    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,

    #[serde(default)]
    pub question_type: QuestionType,

    #[serde(default)]
    #[validate(nested)]
    pub options: Vec<OptionPayload>,

    /// Canonical answer, free-text questions only.
    pub correct_answer: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OptionPayload {
    #[serde(alias = "text")]
    #[validate(length(min = 1, max = 500))]
    pub option_text: String,

    #[serde(default, alias = "correct")]
    pub is_correct: bool,
}

/// Single-select: at least two options, exactly one flagged correct.
/// Free-text: no options and a non-blank canonical answer.
fn validate_answer_key(question: &QuestionPayload) -> Result<(), ValidationError> {
    match question.question_type {
        QuestionType::Single => {
            if question.options.len() < 2 {
                return Err(ValidationError::new("single_select_needs_two_options"));
            }
            let correct = question.options.iter().filter(|o| o.is_correct).count();
            if correct != 1 {
                return Err(ValidationError::new("single_select_needs_one_correct_option"));
            }
        }
        QuestionType::Text => {
            if !question.options.is_empty() {
                return Err(ValidationError::new("free_text_takes_no_options"));
            }
            let has_answer = question
                .correct_answer
                .as_deref()
                .is_some_and(|answer| !answer.trim().is_empty());
            if !has_answer {
                return Err(ValidationError::new("free_text_needs_correct_answer"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(text: &str, is_correct: bool) -> OptionPayload {
        OptionPayload {
            option_text: text.to_string(),
            is_correct,
        }
    }

    #[test]
    fn single_select_requires_exactly_one_correct_option() {
        let mut question = QuestionPayload {
            question_text: "2 + 2?".to_string(),
            question_type: QuestionType::Single,
            options: vec![option("3", false), option("4", true), option("5", true)],
            correct_answer: None,
        };
        assert!(question.validate().is_err());

        question.options[2].is_correct = false;
        assert!(question.validate().is_ok());

        question.options[1].is_correct = false;
        assert!(question.validate().is_err());
    }

    #[test]
    fn free_text_requires_canonical_answer_and_no_options() {
        let mut question = QuestionPayload {
            question_text: "Capital of France?".to_string(),
            question_type: QuestionType::Text,
            options: vec![],
            correct_answer: Some("   ".to_string()),
        };
        assert!(question.validate().is_err());

        question.correct_answer = Some("Paris".to_string());
        assert!(question.validate().is_ok());

        question.options.push(option("Paris", true));
        assert!(question.validate().is_err());
    }

    #[test]
    fn answer_values_deserialize_from_numbers_and_strings() {
        let raw = r#"{"1": 7, "2": "Paris", "3": " 12 "}"#;
        let answers: std::collections::HashMap<i64, AnswerValue> = serde_json::from_str(raw).unwrap();

        assert_eq!(answers[&1], AnswerValue::OptionId(7));
        assert_eq!(answers[&2], AnswerValue::Text("Paris".to_string()));
        assert_eq!(answers[&3].as_option_id(), Some(12));
        assert_eq!(answers[&2].as_option_id(), None);
    }

    #[test]
    fn blank_text_is_not_an_answer() {
        assert!(AnswerValue::Text("   ".to_string()).is_blank());
        assert!(AnswerValue::Text(String::new()).is_blank());
        assert!(!AnswerValue::Text("Paris".to_string()).is_blank());
        assert!(!AnswerValue::OptionId(0).is_blank());
    }

    #[test]
    fn quiz_payload_accepts_legacy_field_names() {
        let raw = r#"{
            "quiz_name": "Geography",
            "moduleId": 4,
            "questions": [
                {"text": "Largest ocean?", "options": [{"text": "Pacific", "correct": true}, {"text": "Arctic"}]}
            ]
        }"#;
        let payload: QuizPayload = serde_json::from_str(raw).unwrap();

        assert_eq!(payload.module_id, Some(4));
        assert_eq!(payload.questions[0].question_type, QuestionType::Single);
        assert!(payload.questions[0].options[0].is_correct);
        assert!(payload.validate().is_ok());
    }
}
