// src/services/results.rs

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use crate::{
    error::{AppError, AppResult},
    models::{
        quiz::Quiz,
        result::{
            NewQuizResult, QuizResult, StudentResultView, SubmissionReceipt, SubmitQuizRequest,
        },
    },
    repositories::{QuizRepository, ResultRepository},
    services::{
        aggregation::{self, QuizRollup, StudentQuizScore},
        grading::{self, GradingError},
    },
};

/// Grades submissions and serves result statistics on top of the
/// quiz and result repositories.
#[derive(Clone)]
pub struct QuizResultService {
    quizzes: Arc<dyn QuizRepository>,
    results: Arc<dyn ResultRepository>,
}

impl QuizResultService {
    pub fn new(quizzes: Arc<dyn QuizRepository>, results: Arc<dyn ResultRepository>) -> Self {
        Self { quizzes, results }
    }

    async fn load_quiz(&self, quiz_id: i64) -> AppResult<Quiz> {
        self.quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or(AppError::NotFound("Quiz not found".to_string()))
    }

    async fn ensure_student(&self, student_id: i64) -> AppResult<()> {
        if self.results.student_exists(student_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Student not found".to_string()))
        }
    }

    async fn ensure_course(&self, course_id: i64) -> AppResult<()> {
        if self.quizzes.course_exists(course_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Course not found".to_string()))
        }
    }

    /// Grades a submission and stores it as the student's result for the quiz.
    ///
    /// All validation and lookups happen before the single write.
    pub async fn submit(&self, quiz_id: i64, req: SubmitQuizRequest) -> AppResult<SubmissionReceipt> {
        if quiz_id <= 0 {
            return Err(AppError::BadRequest("Invalid quiz id".to_string()));
        }
        let student_id = req
            .student_id
            .ok_or(AppError::BadRequest("student_id is required".to_string()))?;
        let answers = req
            .answers
            .map(SubmitQuizRequest::given_answers)
            .ok_or(AppError::BadRequest("answers are required".to_string()))?;

        let quiz = self.load_quiz(quiz_id).await?;
        self.ensure_student(student_id).await?;

        let report = grading::grade(&quiz.questions, &answers)?;

        let saved = self
            .results
            .save(&NewQuizResult {
                student_id,
                quiz_id,
                score: report.score,
                correct_count: report.correct_count as i64,
                total_questions: report.total_questions as i64,
                outcomes: report.question_results.clone(),
            })
            .await?;

        tracing::info!(
            quiz_id,
            student_id,
            score = saved.score,
            correct = report.correct_count,
            total = report.total_questions,
            "Quiz submission graded"
        );

        Ok(SubmissionReceipt {
            score: report.score,
            correct_answers: report.correct_count,
            total_questions: report.total_questions,
            question_results: report.question_results,
            message: "Quiz submitted successfully".to_string(),
        })
    }

    /// The stored result of one student for one quiz, with the quiz's
    /// current answer key.
    pub async fn student_result(&self, quiz_id: i64, student_id: i64) -> AppResult<StudentResultView> {
        let quiz = self.load_quiz(quiz_id).await?;

        let detail = self
            .results
            .find_for_student(quiz_id, student_id)
            .await?
            .ok_or(AppError::NotFound("No results found for this student".to_string()))?;

        let correct_answers: BTreeMap<i64, String> = quiz
            .questions
            .iter()
            .map(|q| grading::answer_key(q).map(|key| (q.id, key.text().to_string())))
            .collect::<Result<_, GradingError>>()?;

        Ok(StudentResultView {
            score: detail.result.score,
            correct_answers,
            answers: detail.outcomes,
            correct_count: detail.result.correct_count,
            total_questions: detail.result.total_questions,
            submitted_at: detail.result.submitted_at,
        })
    }

    /// Every stored result of a quiz, one per student.
    pub async fn quiz_results(&self, quiz_id: i64) -> AppResult<Vec<QuizResult>> {
        self.load_quiz(quiz_id).await?;
        self.results.list_for_quiz(quiz_id).await
    }

    /// Every stored result of a student, across all quizzes.
    pub async fn student_results(&self, student_id: i64) -> AppResult<Vec<QuizResult>> {
        self.ensure_student(student_id).await?;
        self.results.list_for_student(student_id).await
    }

    /// Average score of one quiz over every submitted result.
    pub async fn quiz_summary(&self, quiz_id: i64) -> AppResult<QuizRollup> {
        let quiz = self.load_quiz(quiz_id).await?;
        let results = self.results.list_for_quiz(quiz_id).await?;

        Ok(aggregation::rollup_quiz(quiz.id, &quiz.quiz_name, &results))
    }

    /// Per-quiz totals and averages for every quiz of a course.
    pub async fn course_results(&self, course_id: i64) -> AppResult<Vec<QuizRollup>> {
        self.ensure_course(course_id).await?;

        let quizzes = self.quizzes.list_by_course(course_id).await?;
        if quizzes.is_empty() {
            return Err(AppError::NotFound("No quizzes found for this course".to_string()));
        }

        let mut results_by_quiz = HashMap::with_capacity(quizzes.len());
        for quiz in &quizzes {
            results_by_quiz.insert(quiz.id, self.results.list_for_quiz(quiz.id).await?);
        }

        Ok(aggregation::course_rollup(&quizzes, &results_by_quiz))
    }

    /// A student's percentage on every quiz of a course.
    pub async fn student_course_scores(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> AppResult<Vec<StudentQuizScore>> {
        self.ensure_course(course_id).await?;
        self.ensure_student(student_id).await?;

        let quizzes = self.quizzes.list_by_course(course_id).await?;
        let results = self
            .results
            .list_for_student_in_course(student_id, course_id)
            .await?;

        Ok(aggregation::student_course_scores(&quizzes, &results))
    }
}
