// src/repositories/quiz_repository.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::quiz::{
        AnswerOption, OptionRow, Question, QuestionPayload, QuestionRow, QuestionType, Quiz,
        QuizPayload, QuizRow,
    },
};

/// Storage of quizzes as aggregates: a quiz row plus its ordered
/// questions and options.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, module_id: i64, payload: &QuizPayload) -> AppResult<Quiz>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Quiz>>;
    async fn list_by_module(&self, module_id: i64) -> AppResult<Vec<Quiz>>;
    async fn list_by_course(&self, course_id: i64) -> AppResult<Vec<Quiz>>;
    /// Replaces name, description and the whole question set atomically.
    /// Returns `None` when the quiz does not exist.
    async fn replace(&self, id: i64, payload: &QuizPayload) -> AppResult<Option<Quiz>>;
    async fn delete(&self, id: i64) -> AppResult<bool>;
    async fn course_exists(&self, course_id: i64) -> AppResult<bool>;
}

pub struct SqliteQuizRepository {
    pool: SqlitePool,
}

impl SqliteQuizRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Loads questions and options for the given quiz rows and assembles them.
    async fn hydrate(&self, rows: Vec<QuizRow>) -> AppResult<Vec<Quiz>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut query_builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, quiz_id, position, question_text, question_type, correct_text
             FROM questions WHERE quiz_id IN (",
        );
        let mut separated = query_builder.separated(",");
        for row in &rows {
            separated.push_bind(row.id);
        }
        separated.push_unseparated(") ORDER BY quiz_id, position, id");

        let question_rows: Vec<QuestionRow> = query_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        let mut options_by_question: HashMap<i64, Vec<AnswerOption>> = HashMap::new();
        if !question_rows.is_empty() {
            let mut query_builder = QueryBuilder::<Sqlite>::new(
                "SELECT id, question_id, position, option_text, is_correct
                 FROM options WHERE question_id IN (",
            );
            let mut separated = query_builder.separated(",");
            for question in &question_rows {
                separated.push_bind(question.id);
            }
            separated.push_unseparated(") ORDER BY question_id, position, id");

            let option_rows: Vec<OptionRow> = query_builder
                .build_query_as()
                .fetch_all(&self.pool)
                .await?;

            for option in option_rows {
                options_by_question
                    .entry(option.question_id)
                    .or_default()
                    .push(option.into());
            }
        }

        let mut questions_by_quiz: HashMap<i64, Vec<Question>> = HashMap::new();
        for row in question_rows {
            let question_type = QuestionType::parse(&row.question_type).ok_or_else(|| {
                AppError::InternalServerError(format!(
                    "Question {} has unknown type '{}'",
                    row.id, row.question_type
                ))
            })?;
            questions_by_quiz.entry(row.quiz_id).or_default().push(Question {
                id: row.id,
                question_text: row.question_text,
                question_type,
                options: options_by_question.remove(&row.id).unwrap_or_default(),
                correct_text: row.correct_text,
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| Quiz {
                questions: questions_by_quiz.remove(&row.id).unwrap_or_default(),
                id: row.id,
                module_id: row.module_id,
                quiz_name: row.quiz_name,
                description: row.description,
                created_at: row.created_at,
            })
            .collect())
    }

    async fn fetch_one(&self, id: i64) -> AppResult<Option<Quiz>> {
        let row = sqlx::query_as::<_, QuizRow>(
            "SELECT id, module_id, quiz_name, description, created_at FROM quizzes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

/// Inserts the question set of a quiz, keeping the submitted order.
async fn insert_questions(
    tx: &mut Transaction<'_, Sqlite>,
    quiz_id: i64,
    questions: &[QuestionPayload],
) -> AppResult<()> {
    for (position, question) in questions.iter().enumerate() {
        let correct_text = match question.question_type {
            QuestionType::Text => question.correct_answer.as_deref().map(str::trim),
            QuestionType::Single => None,
        };

        let question_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO questions (quiz_id, position, question_text, question_type, correct_text)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(quiz_id)
        .bind(position as i64)
        .bind(&question.question_text)
        .bind(question.question_type.as_str())
        .bind(correct_text)
        .fetch_one(&mut **tx)
        .await?;

        for (option_position, option) in question.options.iter().enumerate() {
            sqlx::query(
                "INSERT INTO options (question_id, position, option_text, is_correct) VALUES (?, ?, ?, ?)",
            )
            .bind(question_id)
            .bind(option_position as i64)
            .bind(&option.option_text)
            .bind(option.is_correct)
            .execute(&mut **tx)
            .await?;
        }
    }
    Ok(())
}

#[async_trait]
impl QuizRepository for SqliteQuizRepository {
    async fn create(&self, module_id: i64, payload: &QuizPayload) -> AppResult<Quiz> {
        let mut tx = self.pool.begin().await?;

        let quiz_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO quizzes (module_id, quiz_name, description, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(module_id)
        .bind(&payload.quiz_name)
        .bind(&payload.description)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_write(e, "Quiz already exists", "Module not found"))?;

        insert_questions(&mut tx, quiz_id, &payload.questions).await?;
        tx.commit().await?;

        tracing::info!(
            quiz_id,
            module_id,
            questions = payload.questions.len(),
            "Quiz created"
        );

        self.fetch_one(quiz_id)
            .await?
            .ok_or_else(|| AppError::InternalServerError(format!("Quiz {} vanished after insert", quiz_id)))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Quiz>> {
        self.fetch_one(id).await
    }

    async fn list_by_module(&self, module_id: i64) -> AppResult<Vec<Quiz>> {
        let rows = sqlx::query_as::<_, QuizRow>(
            r#"
            SELECT id, module_id, quiz_name, description, created_at
            FROM quizzes
            WHERE module_id = ?
            ORDER BY id
            "#,
        )
        .bind(module_id)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    async fn list_by_course(&self, course_id: i64) -> AppResult<Vec<Quiz>> {
        let rows = sqlx::query_as::<_, QuizRow>(
            r#"
            SELECT q.id, q.module_id, q.quiz_name, q.description, q.created_at
            FROM quizzes q
            JOIN modules m ON q.module_id = m.id
            WHERE m.course_id = ?
            ORDER BY m.id, q.id
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    async fn replace(&self, id: i64, payload: &QuizPayload) -> AppResult<Option<Quiz>> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE quizzes
            SET quiz_name = ?, description = ?, module_id = COALESCE(?, module_id)
            WHERE id = ?
            "#,
        )
        .bind(&payload.quiz_name)
        .bind(&payload.description)
        .bind(payload.module_id)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_write(e, "Quiz already exists", "Module not found"))?;

        if updated.rows_affected() == 0 {
            // Dropping the transaction rolls it back.
            return Ok(None);
        }

        // Options cascade with their questions.
        sqlx::query("DELETE FROM questions WHERE quiz_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_questions(&mut tx, id, &payload.questions).await?;
        tx.commit().await?;

        tracing::info!(quiz_id = id, questions = payload.questions.len(), "Quiz replaced");

        self.fetch_one(id).await
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn course_exists(&self, course_id: i64) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE id = ?")
            .bind(course_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }
}
