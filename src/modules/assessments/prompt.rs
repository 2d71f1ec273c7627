//! Prompt construction and reply parsing for generated tests.

use learnhub_models::assessments::Question;
use learnhub_models::courses::Course;
use serde::Deserialize;
use std::fmt::Write as _;

use super::generator::TestPrompt;

pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuestionSetError {
    #[error("reply is not a JSON question set: {0}")]
    Malformed(String),
    #[error("reply contains no questions")]
    Empty,
    #[error("question {index} is invalid: {reason}")]
    InvalidQuestion { index: usize, reason: &'static str },
}

/// Chapter titles and lecture titles, in outline order.
pub fn outline_topics(course: &Course) -> Vec<String> {
    let mut topics = Vec::new();
    for chapter in &course.content {
        topics.push(chapter.title.clone());
        topics.extend(chapter.lectures.iter().map(|l| l.title.clone()));
    }
    if topics.is_empty() {
        topics.push(course.title.clone());
    }
    topics
}

pub fn build_prompt(course: &Course, question_count: usize) -> TestPrompt {
    let mut text = format!(
        "Write {question_count} multiple-choice questions for the course \"{}\".\n\
         Course description: {}\n\nOutline:\n",
        course.title, course.description
    );
    for chapter in &course.content {
        let _ = writeln!(text, "- {}", chapter.title);
        for lecture in &chapter.lectures {
            let _ = writeln!(text, "  - {}", lecture.title);
        }
    }
    text.push_str(
        "\nReply with a JSON array only. Each item must have \"question\" (string), \
         \"options\" (4 strings) and \"answer\" (exactly one of the options).",
    );

    TestPrompt {
        text,
        topics: outline_topics(course),
        question_count,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionSet {
    List(Vec<RawQuestion>),
    Wrapped { questions: Vec<RawQuestion> },
}

#[derive(Deserialize)]
struct RawQuestion {
    question: String,
    options: Vec<String>,
    answer: String,
}

/// Strips a surrounding markdown code fence, with or without a language tag.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.split_once('\n').map_or("", |(_, rest)| rest);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parses a generator reply into at most `limit` questions.
///
/// Every kept question needs non-blank text, at least two non-blank
/// options and an answer equal to one of them.
pub fn parse_questions(reply: &str, limit: usize) -> Result<Vec<Question>, QuestionSetError> {
    let set: QuestionSet = serde_json::from_str(strip_code_fence(reply))
        .map_err(|e| QuestionSetError::Malformed(e.to_string()))?;
    let raw = match set {
        QuestionSet::List(questions) | QuestionSet::Wrapped { questions } => questions,
    };
    if raw.is_empty() {
        return Err(QuestionSetError::Empty);
    }

    raw.into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, q)| {
            let invalid = |reason| QuestionSetError::InvalidQuestion { index, reason };
            let question = q.question.trim().to_string();
            if question.is_empty() {
                return Err(invalid("blank question"));
            }
            let options: Vec<String> = q.options.iter().map(|o| o.trim().to_string()).collect();
            if options.len() < MIN_OPTIONS || options.iter().any(String::is_empty) {
                return Err(invalid("needs at least two non-blank options"));
            }
            let answer = q.answer.trim().to_string();
            if !options.contains(&answer) {
                return Err(invalid("answer is not one of the options"));
            }
            Ok(Question {
                question,
                options,
                answer,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnhub_models::courses::{ChapterInput, LectureInput, build_content};
    use learnhub_models::{CourseId, UserId};

    fn course() -> Course {
        let now = chrono::Utc::now();
        Course {
            id: CourseId::new(),
            educator_id: UserId::new(),
            title: "Rust in Practice".into(),
            description: "Ownership to async".into(),
            thumbnail_url: None,
            price: 1000,
            discount: 0,
            is_published: true,
            content: build_content(vec![ChapterInput {
                title: "Ownership".into(),
                lectures: vec![LectureInput {
                    title: "Moves and copies".into(),
                    duration_minutes: 10,
                    url: "https://videos.example.com/1".into(),
                    is_preview_free: false,
                }],
            }]),
            enrolled_students: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_prompt_lists_outline_and_count() {
        let prompt = build_prompt(&course(), 4);
        assert!(prompt.text.starts_with("Write 4 multiple-choice questions"));
        assert!(prompt.text.contains("\"Rust in Practice\""));
        assert!(prompt.text.contains("- Ownership\n  - Moves and copies\n"));
        assert_eq!(prompt.topics, vec!["Ownership", "Moves and copies"]);
        assert_eq!(prompt.question_count, 4);
    }

    #[test]
    fn test_empty_outline_falls_back_to_title() {
        let mut course = course();
        course.content.clear();
        assert_eq!(outline_topics(&course), vec!["Rust in Practice"]);
    }

    #[test]
    fn test_parses_fenced_reply() {
        let reply = "```json\n[{\"question\":\" What moves? \",\"options\":[\"String\",\"i32\"],\"answer\":\"String \"}]\n```";
        let questions = parse_questions(reply, 5).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "What moves?");
        assert_eq!(questions[0].answer, "String");
    }

    #[test]
    fn test_parses_wrapped_reply_and_truncates() {
        let reply = r#"{"questions":[
            {"question":"a","options":["x","y"],"answer":"x"},
            {"question":"b","options":["x","y"],"answer":"y"},
            {"question":"c","options":["x","y"],"answer":"x"}
        ]}"#;
        let questions = parse_questions(reply, 2).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].question, "b");
    }

    #[test]
    fn test_rejects_malformed_replies() {
        assert!(matches!(
            parse_questions("Sure! Here are your questions.", 5),
            Err(QuestionSetError::Malformed(_))
        ));
        assert_eq!(parse_questions("[]", 5), Err(QuestionSetError::Empty));
        assert_eq!(
            parse_questions(r#"[{"question":"q","options":["x","y"],"answer":"z"}]"#, 5),
            Err(QuestionSetError::InvalidQuestion {
                index: 0,
                reason: "answer is not one of the options"
            })
        );
        assert!(matches!(
            parse_questions(r#"[{"question":"q","options":["x"],"answer":"x"}]"#, 5),
            Err(QuestionSetError::InvalidQuestion { index: 0, .. })
        ));
        assert!(matches!(
            parse_questions(r#"[{"question":"  ","options":["x","y"],"answer":"x"}]"#, 5),
            Err(QuestionSetError::InvalidQuestion { index: 0, .. })
        ));
    }
}
