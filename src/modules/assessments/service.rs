use anyhow::anyhow;
use chrono::Utc;
use learnhub_config::AssessmentConfig;
use learnhub_core::AppError;
use learnhub_db::{Stores, Transition};
use learnhub_models::assessments::{Assessment, NewAssessment, SubmitAssessmentDto, score_answers};
use learnhub_models::users::User;
use learnhub_models::{AssessmentId, CourseId};
use learnhub_observability::{track_assessment_generated, track_assessment_submitted};
use tracing::{info, instrument, warn};

use super::generator::TestGenerator;
use super::prompt::{build_prompt, parse_questions};
use crate::modules::courses::service::COURSE_NOT_FOUND_MESSAGE;

pub const NOT_ENROLLED_MESSAGE: &str = "You must be enrolled in this course to take a test";
pub const ASSESSMENT_NOT_FOUND_MESSAGE: &str = "Test not found";
pub const NOT_YOUR_ASSESSMENT_MESSAGE: &str = "You can only access your own tests";
pub const ALREADY_SUBMITTED_MESSAGE: &str = "Test already submitted";

pub struct AssessmentService;

impl AssessmentService {
    /// Builds a prompt from the course outline, asks the generator for a
    /// question set and stores it for the student. Nothing is stored when
    /// the reply cannot be parsed.
    #[instrument(skip(stores, generator, config, student), fields(student_id = %student.id))]
    pub async fn generate(
        stores: &Stores,
        generator: &dyn TestGenerator,
        config: &AssessmentConfig,
        student: &User,
        course_id: CourseId,
    ) -> Result<Assessment, AppError> {
        let course = stores
            .courses
            .find_course(course_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(COURSE_NOT_FOUND_MESSAGE)))?;
        if !course.is_enrolled(student.id) {
            return Err(AppError::not_owner(NOT_ENROLLED_MESSAGE));
        }

        let prompt = build_prompt(&course, config.question_count);
        let reply = generator.generate(&prompt).await.map_err(|e| {
            track_assessment_generated("generator_error");
            AppError::internal(e)
        })?;
        let questions = parse_questions(&reply, config.question_count).map_err(|e| {
            warn!(error = %e, "Generated question set rejected");
            track_assessment_generated("rejected_reply");
            AppError::internal(e)
        })?;

        let assessment = stores
            .assessments
            .create_assessment(NewAssessment {
                course_id: course.id,
                student_id: student.id,
                questions,
            })
            .await?;

        info!(
            assessment_id = %assessment.id,
            questions = assessment.questions.len(),
            "Test generated"
        );
        track_assessment_generated("created");
        Ok(assessment)
    }

    pub async fn list_own(
        stores: &Stores,
        student: &User,
        course_id: Option<CourseId>,
    ) -> Result<Vec<Assessment>, AppError> {
        stores
            .assessments
            .list_assessments_for(student.id, course_id)
            .await
    }

    pub async fn get_own(
        stores: &Stores,
        student: &User,
        id: AssessmentId,
    ) -> Result<Assessment, AppError> {
        let assessment = stores
            .assessments
            .find_assessment(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(ASSESSMENT_NOT_FOUND_MESSAGE)))?;
        if assessment.student_id != student.id {
            return Err(AppError::not_owner(NOT_YOUR_ASSESSMENT_MESSAGE));
        }
        Ok(assessment)
    }

    /// Scores one answer per question and records the submission once.
    #[instrument(skip(stores, student, dto), fields(student_id = %student.id))]
    pub async fn submit(
        stores: &Stores,
        student: &User,
        id: AssessmentId,
        dto: SubmitAssessmentDto,
    ) -> Result<Assessment, AppError> {
        let assessment = Self::get_own(stores, student, id).await?;
        if assessment.is_submitted() {
            return Err(AppError::conflict(anyhow!(ALREADY_SUBMITTED_MESSAGE)));
        }
        let expected = assessment.questions.len();
        if dto.answers.len() != expected {
            return Err(AppError::validation(anyhow!(
                "Expected {expected} answers, got {}",
                dto.answers.len()
            )));
        }

        let score = score_answers(&assessment.questions, &dto.answers);
        match stores
            .assessments
            .submit_assessment(id, dto.answers, score, Utc::now())
            .await?
        {
            Transition::NotFound => Err(AppError::not_found(anyhow!(ASSESSMENT_NOT_FOUND_MESSAGE))),
            Transition::AlreadyProcessed(_) => {
                Err(AppError::conflict(anyhow!(ALREADY_SUBMITTED_MESSAGE)))
            }
            Transition::Applied(submitted) => {
                info!(assessment_id = %id, score, total = expected, "Test submitted");
                track_assessment_submitted(score, expected);
                Ok(submitted)
            }
        }
    }
}
