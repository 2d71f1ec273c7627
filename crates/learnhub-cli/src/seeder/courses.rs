//! Fake published courses with a small outline.

use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use learnhub_db::Stores;
use learnhub_models::UserId;
use learnhub_models::courses::{ChapterInput, Course, LectureInput, NewCourse, build_content};
use std::time::Instant;

const CHAPTERS_PER_COURSE: usize = 3;
const LECTURES_PER_CHAPTER: usize = 4;

fn generate_outline(course_idx: usize) -> Vec<ChapterInput> {
    (0..CHAPTERS_PER_COURSE)
        .map(|chapter_idx| ChapterInput {
            title: Sentence(2..5).fake(),
            lectures: (0..LECTURES_PER_CHAPTER)
                .map(|lecture_idx| LectureInput {
                    title: Sentence(3..7).fake(),
                    duration_minutes: (5..45).fake(),
                    url: format!(
                        "https://media.learnhub.dev/{}/{}/{}.mp4",
                        course_idx, chapter_idx, lecture_idx
                    ),
                    // The first lecture of the first chapter is the free preview.
                    is_preview_free: chapter_idx == 0 && lecture_idx == 0,
                })
                .collect(),
        })
        .collect()
}

pub fn generate_courses(educator_ids: &[UserId], per_educator: usize) -> Vec<NewCourse> {
    educator_ids
        .iter()
        .enumerate()
        .flat_map(|(educator_idx, &educator_id)| {
            (0..per_educator).map(move |idx| {
                let course_idx = educator_idx * 1000 + idx;
                let title: String = Sentence(3..6).fake();
                NewCourse {
                    educator_id,
                    title: title.trim_end_matches('.').to_string(),
                    description: Paragraph(2..4).fake(),
                    thumbnail_url: None,
                    price: (10..200).fake::<i64>() * 100,
                    discount: [0, 10, 25, 50][course_idx % 4],
                    is_published: true,
                    content: build_content(generate_outline(course_idx)),
                }
            })
        })
        .collect()
}

pub async fn seed_courses(
    stores: &Stores,
    educator_ids: &[UserId],
    per_educator: usize,
) -> anyhow::Result<Vec<Course>> {
    let start_time = Instant::now();
    let courses = generate_courses(educator_ids, per_educator);
    println!("📚 Seeding {} courses...", courses.len());

    let mut created = Vec::with_capacity(courses.len());
    for course in courses {
        let course = stores
            .courses
            .create_course(course)
            .await
            .map_err(|e| anyhow::anyhow!(e.message()))?;
        created.push(course);
    }

    println!(
        "   ✓ Created {} courses in {:?}",
        created.len(),
        start_time.elapsed()
    );
    Ok(created)
}
