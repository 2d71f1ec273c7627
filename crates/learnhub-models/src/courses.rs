//! Course authoring and catalogue models.
//!
//! A course owns an ordered list of chapters, each holding ordered lectures.
//! The outline is stored as a single JSON document next to the course row.

use crate::ids::{CourseId, UserId};
use learnhub_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Lecture {
    pub lecture_id: Uuid,
    pub order: i32,
    pub title: String,
    pub duration_minutes: i32,
    /// `null` in the public view unless the lecture is a free preview
    pub url: Option<String>,
    pub is_preview_free: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Chapter {
    pub chapter_id: Uuid,
    pub order: i32,
    pub title: String,
    pub lectures: Vec<Lecture>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: CourseId,
    pub educator_id: UserId,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    /// Minor currency units
    pub price: i64,
    /// Percentage, 0-100
    pub discount: i32,
    pub is_published: bool,
    #[sqlx(json)]
    pub content: Vec<Chapter>,
    pub enrolled_students: Vec<UserId>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    pub fn discounted_price(&self) -> i64 {
        discounted_price(self.price, self.discount)
    }

    pub fn is_enrolled(&self, user_id: UserId) -> bool {
        self.enrolled_students.contains(&user_id)
    }

    /// Public catalogue view: lecture urls are kept only for free previews.
    #[must_use]
    pub fn redacted_preview(mut self) -> Self {
        for chapter in &mut self.content {
            for lecture in &mut chapter.lectures {
                if !lecture.is_preview_free {
                    lecture.url = None;
                }
            }
        }
        self
    }

    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            id: self.id,
            educator_id: self.educator_id,
            title: self.title.clone(),
            description: self.description.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            price: self.price,
            discount: self.discount,
            is_published: self.is_published,
            chapter_count: self.content.len(),
            enrolled_count: self.enrolled_students.len(),
            created_at: self.created_at,
        }
    }
}

/// Upper bound on a course price, in minor units.
pub const MAX_PRICE: i64 = 1_000_000_000_000;

/// `price - price * discount / 100`, rounded down.
pub fn discounted_price(price: i64, discount: i32) -> i64 {
    let price = i128::from(price);
    let discount = i128::from(discount.clamp(0, 100));
    let discounted = price - price * discount / 100;
    // Always between 0 and price for a non-negative price.
    i64::try_from(discounted).unwrap_or(i64::MAX)
}

/// Listing row without the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CourseSummary {
    pub id: CourseId,
    pub educator_id: UserId,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub price: i64,
    pub discount: i32,
    pub is_published: bool,
    pub chapter_count: usize,
    pub enrolled_count: usize,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LectureInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(range(min = 0))]
    pub duration_minutes: i32,
    #[validate(url(message = "Invalid lecture URL"))]
    pub url: String,
    #[serde(default)]
    pub is_preview_free: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChapterInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(nested)]
    pub lectures: Vec<LectureInput>,
}

/// Mints chapter and lecture ids and numbers both from 1 in input order.
pub fn build_content(chapters: Vec<ChapterInput>) -> Vec<Chapter> {
    chapters
        .into_iter()
        .enumerate()
        .map(|(ci, chapter)| Chapter {
            chapter_id: Uuid::new_v4(),
            order: ci as i32 + 1,
            title: chapter.title,
            lectures: chapter
                .lectures
                .into_iter()
                .enumerate()
                .map(|(li, lecture)| Lecture {
                    lecture_id: Uuid::new_v4(),
                    order: li as i32 + 1,
                    title: lecture.title,
                    duration_minutes: lecture.duration_minutes,
                    url: Some(lecture.url),
                    is_preview_free: lecture.is_preview_free,
                })
                .collect(),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub educator_id: UserId,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub price: i64,
    pub discount: i32,
    pub is_published: bool,
    pub content: Vec<Chapter>,
}

/// Partial update applied by the course store.
#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub price: Option<i64>,
    pub discount: Option<i32>,
    pub is_published: Option<bool>,
    pub content: Option<Vec<Chapter>>,
    pub enrolled_students: Option<Vec<UserId>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(url(message = "Invalid thumbnail URL"))]
    pub thumbnail_url: Option<String>,
    #[validate(range(min = 0, max = MAX_PRICE, message = "Price must be between 0 and 1000000000000"))]
    pub price: i64,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "Discount must be between 0 and 100"))]
    pub discount: i32,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    #[validate(nested)]
    pub content: Vec<ChapterInput>,
}

impl CreateCourseDto {
    pub fn into_new_course(self, educator_id: UserId) -> NewCourse {
        NewCourse {
            educator_id,
            title: self.title,
            description: self.description,
            thumbnail_url: self.thumbnail_url,
            price: self.price,
            discount: self.discount,
            is_published: self.is_published,
            content: build_content(self.content),
        }
    }
}

/// Owner-side edit. A supplied `content` replaces the whole outline.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(url(message = "Invalid thumbnail URL"))]
    pub thumbnail_url: Option<String>,
    #[validate(range(min = 0, max = MAX_PRICE, message = "Price must be between 0 and 1000000000000"))]
    pub price: Option<i64>,
    #[validate(range(min = 0, max = 100, message = "Discount must be between 0 and 100"))]
    pub discount: Option<i32>,
    pub is_published: Option<bool>,
    #[validate(nested)]
    pub content: Option<Vec<ChapterInput>>,
}

impl From<UpdateCourseDto> for CourseChanges {
    fn from(dto: UpdateCourseDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            thumbnail_url: dto.thumbnail_url,
            price: dto.price,
            discount: dto.discount,
            is_published: dto.is_published,
            content: dto.content.map(build_content),
            enrolled_students: None,
        }
    }
}

/// Admin-side edit. Same fields as the owner edit plus the enrollment list.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AdminUpdateCourseDto {
    #[serde(flatten)]
    #[validate(nested)]
    pub course: UpdateCourseDto,
    pub enrolled_students: Option<Vec<UserId>>,
}

impl From<AdminUpdateCourseDto> for CourseChanges {
    fn from(dto: AdminUpdateCourseDto) -> Self {
        Self {
            enrolled_students: dto.enrolled_students,
            ..CourseChanges::from(dto.course)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseFilterParams {
    /// Case-insensitive match on the title
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseResponse {
    pub success: bool,
    pub course: Course,
}

impl CourseResponse {
    pub fn new(course: Course) -> Self {
        Self {
            success: true,
            course,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CoursesResponse {
    pub success: bool,
    pub courses: Vec<Course>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseSummariesResponse {
    pub success: bool,
    pub courses: Vec<CourseSummary>,
    pub meta: PaginationMeta,
}

/// Educator dashboard figures over the caller's own courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EducatorDashboard {
    pub total_courses: usize,
    pub published_courses: usize,
    pub total_enrollments: usize,
    /// Sum of completed purchase amounts, minor units
    pub total_earnings: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub success: bool,
    pub dashboard: EducatorDashboard,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lecture(url: &str, free: bool) -> LectureInput {
        LectureInput {
            title: "Intro".to_string(),
            duration_minutes: 10,
            url: url.to_string(),
            is_preview_free: free,
        }
    }

    fn course_with(content: Vec<Chapter>) -> Course {
        let now = chrono::Utc::now();
        Course {
            id: CourseId::new(),
            educator_id: UserId::new(),
            title: "Rust".to_string(),
            description: "Ownership".to_string(),
            thumbnail_url: None,
            price: 1000,
            discount: 25,
            is_published: true,
            content,
            enrolled_students: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_build_content_orders_from_one() {
        let content = build_content(vec![
            ChapterInput {
                title: "One".into(),
                lectures: vec![lecture("https://a.test/1", true), lecture("https://a.test/2", false)],
            },
            ChapterInput {
                title: "Two".into(),
                lectures: vec![],
            },
        ]);

        assert_eq!(content.len(), 2);
        assert_eq!(content[0].order, 1);
        assert_eq!(content[1].order, 2);
        assert_eq!(content[0].lectures[1].order, 2);
        assert_ne!(content[0].chapter_id, content[1].chapter_id);
    }

    #[test]
    fn test_redacted_preview_keeps_free_lectures_only() {
        let content = build_content(vec![ChapterInput {
            title: "One".into(),
            lectures: vec![lecture("https://a.test/1", true), lecture("https://a.test/2", false)],
        }]);
        let course = course_with(content).redacted_preview();

        let lectures = &course.content[0].lectures;
        assert_eq!(lectures[0].url.as_deref(), Some("https://a.test/1"));
        assert_eq!(lectures[1].url, None);
    }

    #[test]
    fn test_discounted_price() {
        assert_eq!(course_with(vec![]).discounted_price(), 750);
        assert_eq!(discounted_price(999, 0), 999);
        assert_eq!(discounted_price(999, 100), 0);
        assert_eq!(discounted_price(999, 33), 670);
    }

    #[test]
    fn test_discounted_price_does_not_overflow() {
        assert_eq!(discounted_price(i64::MAX, 50), i64::MAX - i64::MAX / 2);
        assert_eq!(discounted_price(i64::MAX, 100), 0);
        assert_eq!(discounted_price(MAX_PRICE, 1), MAX_PRICE / 100 * 99);
    }

    #[test]
    fn test_create_dto_rejects_price_above_max() {
        let mut dto = CreateCourseDto {
            title: "T".into(),
            description: "D".into(),
            thumbnail_url: None,
            price: MAX_PRICE,
            discount: 50,
            is_published: false,
            content: vec![],
        };
        assert!(dto.validate().is_ok());

        dto.price = i64::MAX / 10;
        assert!(dto.validate().is_err());

        let update = UpdateCourseDto {
            price: Some(MAX_PRICE + 1),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_create_dto_rejects_bad_discount() {
        let dto = CreateCourseDto {
            title: "T".into(),
            description: "D".into(),
            thumbnail_url: None,
            price: 100,
            discount: 150,
            is_published: false,
            content: vec![],
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_admin_update_carries_enrollments() {
        let dto: AdminUpdateCourseDto =
            serde_json::from_str(r#"{"title":"New","enrolled_students":[]}"#).unwrap();
        let changes: CourseChanges = dto.into();
        assert_eq!(changes.title.as_deref(), Some("New"));
        assert_eq!(changes.enrolled_students, Some(vec![]));
    }
}
