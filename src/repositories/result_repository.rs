// src/repositories/result_repository.rs

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::result::{NewQuizResult, QuestionOutcome, QuizResult, QuizResultDetail},
};

#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Results belong to students; submissions check the owner first.
    async fn student_exists(&self, student_id: i64) -> AppResult<bool>;
    /// Upserts the result of (student, quiz) and replaces its outcomes.
    async fn save(&self, new_result: &NewQuizResult) -> AppResult<QuizResult>;
    async fn find_for_student(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> AppResult<Option<QuizResultDetail>>;
    async fn list_for_quiz(&self, quiz_id: i64) -> AppResult<Vec<QuizResult>>;
    async fn list_for_student(&self, student_id: i64) -> AppResult<Vec<QuizResult>>;
    async fn list_for_student_in_course(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> AppResult<Vec<QuizResult>>;
}

pub struct SqliteResultRepository {
    pool: SqlitePool,
}

impl SqliteResultRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultRepository for SqliteResultRepository {
    async fn student_exists(&self, student_id: i64) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE id = ?")
            .bind(student_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn save(&self, new_result: &NewQuizResult) -> AppResult<QuizResult> {
        let mut tx = self.pool.begin().await?;

        // Upsert: a retake replaces the previous attempt.
        let saved = sqlx::query_as::<_, QuizResult>(
            r#"
            INSERT INTO quiz_results (student_id, quiz_id, score, correct_count, total_questions, submitted_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (student_id, quiz_id) DO UPDATE SET
                score = excluded.score,
                correct_count = excluded.correct_count,
                total_questions = excluded.total_questions,
                submitted_at = excluded.submitted_at
            RETURNING id, student_id, quiz_id, score, correct_count, total_questions, submitted_at
            "#,
        )
        .bind(new_result.student_id)
        .bind(new_result.quiz_id)
        .bind(new_result.score)
        .bind(new_result.correct_count)
        .bind(new_result.total_questions)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert quiz result: {:?}", e);
            AppError::from_write(e, "Result already exists", "Student or quiz not found")
        })?;

        sqlx::query("DELETE FROM question_outcomes WHERE result_id = ?")
            .bind(saved.id)
            .execute(&mut *tx)
            .await?;

        for outcome in &new_result.outcomes {
            sqlx::query(
                r#"
                INSERT INTO question_outcomes
                    (result_id, question_id, question_text, correct_answer, student_answer, is_correct)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(saved.id)
            .bind(outcome.question_id)
            .bind(&outcome.question_text)
            .bind(&outcome.correct_answer)
            .bind(&outcome.student_answer)
            .bind(outcome.is_correct)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(saved)
    }

    async fn find_for_student(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> AppResult<Option<QuizResultDetail>> {
        let result = sqlx::query_as::<_, QuizResult>(
            r#"
            SELECT id, student_id, quiz_id, score, correct_count, total_questions, submitted_at
            FROM quiz_results
            WHERE quiz_id = ? AND student_id = ?
            "#,
        )
        .bind(quiz_id)
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(result) = result else {
            return Ok(None);
        };

        let outcomes = sqlx::query_as::<_, QuestionOutcome>(
            r#"
            SELECT question_id, question_text, correct_answer, student_answer, is_correct
            FROM question_outcomes
            WHERE result_id = ?
            ORDER BY id
            "#,
        )
        .bind(result.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(QuizResultDetail { result, outcomes }))
    }

    async fn list_for_quiz(&self, quiz_id: i64) -> AppResult<Vec<QuizResult>> {
        let results = sqlx::query_as::<_, QuizResult>(
            r#"
            SELECT id, student_id, quiz_id, score, correct_count, total_questions, submitted_at
            FROM quiz_results
            WHERE quiz_id = ?
            ORDER BY id
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    async fn list_for_student(&self, student_id: i64) -> AppResult<Vec<QuizResult>> {
        let results = sqlx::query_as::<_, QuizResult>(
            r#"
            SELECT id, student_id, quiz_id, score, correct_count, total_questions, submitted_at
            FROM quiz_results
            WHERE student_id = ?
            ORDER BY quiz_id
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    async fn list_for_student_in_course(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> AppResult<Vec<QuizResult>> {
        let results = sqlx::query_as::<_, QuizResult>(
            r#"
            SELECT r.id, r.student_id, r.quiz_id, r.score, r.correct_count, r.total_questions, r.submitted_at
            FROM quiz_results r
            JOIN quizzes q ON r.quiz_id = q.id
            JOIN modules m ON q.module_id = m.id
            WHERE r.student_id = ? AND m.course_id = ?
            ORDER BY r.quiz_id
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }
}
