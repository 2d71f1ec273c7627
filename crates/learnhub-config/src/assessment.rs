//! Course test generation.
//!
//! With `ASSESSMENT_API_URL` unset, tests are built in process from the
//! course outline. Otherwise the prompt is posted to an OpenAI-compatible
//! chat completions endpoint.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssessmentConfig {
    pub question_count: usize,
    pub api_url: Option<String>,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            question_count: 5,
            api_url: None,
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 30,
        }
    }
}

impl AssessmentConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let question_count = std::env::var("ASSESSMENT_QUESTION_COUNT")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .map(|n| n.clamp(1, 20))
            .unwrap_or(defaults.question_count);
        let timeout_secs = std::env::var("ASSESSMENT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&s| s > 0)
            .unwrap_or(defaults.timeout_secs);

        Self {
            question_count,
            api_url: std::env::var("ASSESSMENT_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            api_key: crate::env_or("ASSESSMENT_API_KEY", ""),
            model: crate::env_or("ASSESSMENT_MODEL", &defaults.model),
            timeout_secs,
        }
    }
}
