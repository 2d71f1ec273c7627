//! Generated course tests.
//!
//! A test is a fixed list of multiple-choice questions produced for one
//! enrolled student. It is submitted exactly once; the score is the number
//! of answers equal to the stored correct option.

use crate::ids::{AssessmentId, CourseId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    /// Correct option, verbatim
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assessment {
    pub id: AssessmentId,
    pub course_id: CourseId,
    pub student_id: UserId,
    #[sqlx(json)]
    pub questions: Vec<Question>,
    pub answers: Option<Vec<String>>,
    pub score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Assessment {
    pub fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }

    /// Student-facing view. Correct options stay hidden until submission.
    pub fn view(&self) -> AssessmentView {
        let revealed = self.is_submitted();
        let questions = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| QuestionView {
                question: q.question.clone(),
                options: q.options.clone(),
                answer: revealed.then(|| q.answer.clone()),
                given: self
                    .answers
                    .as_ref()
                    .and_then(|answers| answers.get(i).cloned()),
            })
            .collect();

        AssessmentView {
            id: self.id,
            course_id: self.course_id,
            total: self.questions.len(),
            score: self.score,
            questions,
            created_at: self.created_at,
            submitted_at: self.submitted_at,
        }
    }
}

/// Number of answers equal to the correct option at the same position.
/// Surrounding whitespace is ignored; comparison is otherwise exact.
pub fn score_answers(questions: &[Question], answers: &[String]) -> i32 {
    questions
        .iter()
        .zip(answers)
        .filter(|(q, given)| q.answer.trim() == given.trim())
        .count() as i32
}

#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub course_id: CourseId,
    pub student_id: UserId,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QuestionView {
    pub question: String,
    pub options: Vec<String>,
    /// Present once the test is submitted
    pub answer: Option<String>,
    /// The student's submitted answer
    pub given: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssessmentView {
    pub id: AssessmentId,
    pub course_id: CourseId,
    pub total: usize,
    pub score: Option<i32>,
    pub questions: Vec<QuestionView>,
    pub created_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubmitAssessmentDto {
    /// One answer per question, in question order
    #[validate(length(min = 1, message = "At least one answer is required"))]
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssessmentResponse {
    pub success: bool,
    pub assessment: AssessmentView,
}

impl AssessmentResponse {
    pub fn new(assessment: &Assessment) -> Self {
        Self {
            success: true,
            assessment: assessment.view(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssessmentsResponse {
    pub success: bool,
    pub assessments: Vec<AssessmentView>,
}
