//! Question generation port and its adapters.
//!
//! A generator only turns a prompt into raw reply text. Parsing and
//! validation of the reply happen in [`super::prompt`], so every adapter is
//! held to the same question-set contract.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use learnhub_config::AssessmentConfig;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// What a generator is asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPrompt {
    pub text: String,
    /// Chapter and lecture titles in outline order.
    pub topics: Vec<String>,
    pub question_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("question generator transport failed: {0}")]
    Transport(String),
    #[error("question generator answered {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("question generator reply could not be decoded: {0}")]
    Decode(String),
}

#[async_trait]
pub trait TestGenerator: Send + Sync {
    /// Raw reply text, expected to hold a JSON question set.
    async fn generate(&self, prompt: &TestPrompt) -> Result<String, GeneratorError>;
}

/// Picks the adapter named by the configuration.
pub fn init_test_generator(config: &AssessmentConfig) -> anyhow::Result<Arc<dyn TestGenerator>> {
    match &config.api_url {
        Some(url) => {
            let endpoint = Url::parse(url)?;
            tracing::info!(endpoint = %endpoint, model = %config.model, "Using remote question generator");
            Ok(Arc::new(HttpTestGenerator::new(
                endpoint,
                config.api_key.clone(),
                config.model.clone(),
                Duration::from_secs(config.timeout_secs),
            )?))
        }
        None => Ok(Arc::new(OutlineGenerator)),
    }
}

/// In-process adapter: one question per outline topic, asking which topic
/// the course covers at that position.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineGenerator;

#[derive(Serialize)]
struct OutlineQuestion<'a> {
    question: String,
    options: Vec<&'a str>,
    answer: &'a str,
}

const FILLER_OPTIONS: [&str; 3] = ["None of these", "All of these", "Not covered"];

#[async_trait]
impl TestGenerator for OutlineGenerator {
    async fn generate(&self, prompt: &TestPrompt) -> Result<String, GeneratorError> {
        let topics = &prompt.topics;
        let questions: Vec<OutlineQuestion<'_>> = topics
            .iter()
            .take(prompt.question_count)
            .enumerate()
            .map(|(i, answer)| {
                let mut options: Vec<&str> = topics
                    .iter()
                    .cycle()
                    .skip(i + 1)
                    .take(topics.len().saturating_sub(1).min(3))
                    .map(String::as_str)
                    .filter(|t| *t != answer.as_str())
                    .collect();
                for filler in FILLER_OPTIONS {
                    if options.len() >= 3 {
                        break;
                    }
                    options.push(filler);
                }
                options.insert(i % (options.len() + 1), answer.as_str());
                OutlineQuestion {
                    question: format!("Which topic is covered in part {} of this course?", i + 1),
                    options,
                    answer: answer.as_str(),
                }
            })
            .collect();

        serde_json::to_string(&questions).map_err(|e| GeneratorError::Decode(e.to_string()))
    }
}

/// Posts the prompt to an OpenAI-compatible chat completions endpoint.
pub struct HttpTestGenerator {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl HttpTestGenerator {
    pub fn new(
        endpoint: Url,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
            model,
        })
    }
}

#[derive(Deserialize)]
struct Completion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

fn decode_completion(body: &[u8]) -> Result<String, GeneratorError> {
    let completion: Completion =
        serde_json::from_slice(body).map_err(|e| GeneratorError::Decode(e.to_string()))?;
    completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| GeneratorError::Decode("completion has no choices".to_string()))
}

#[async_trait]
impl TestGenerator for HttpTestGenerator {
    async fn generate(&self, prompt: &TestPrompt) -> Result<String, GeneratorError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "messages": [{ "role": "user", "content": prompt.text }],
            }))
            .send()
            .await
            .map_err(|e| GeneratorError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| GeneratorError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(GeneratorError::Upstream {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).chars().take(200).collect(),
            });
        }

        decode_completion(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::assessments::prompt::parse_questions;

    fn prompt(topics: &[&str], question_count: usize) -> TestPrompt {
        TestPrompt {
            text: String::new(),
            topics: topics.iter().map(|t| t.to_string()).collect(),
            question_count,
        }
    }

    #[tokio::test]
    async fn test_outline_generator_reply_is_a_valid_question_set() {
        let reply = OutlineGenerator
            .generate(&prompt(&["Ownership", "Borrowing", "Lifetimes", "Traits", "Macros"], 3))
            .await
            .unwrap();

        let questions = parse_questions(&reply, 3).unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].answer, "Ownership");
        assert_eq!(questions[2].answer, "Lifetimes");
        for question in &questions {
            assert_eq!(question.options.len(), 4);
            assert!(question.options.contains(&question.answer));
        }
    }

    #[tokio::test]
    async fn test_outline_generator_pads_short_outlines() {
        let reply = OutlineGenerator
            .generate(&prompt(&["Only topic"], 5))
            .await
            .unwrap();

        let questions = parse_questions(&reply, 5).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options.len(), 4);
        assert!(questions[0].options.contains(&"Only topic".to_string()));
    }

    #[test]
    fn test_decode_completion() {
        let body = br#"{"choices":[{"message":{"role":"assistant","content":"[]"}}]}"#;
        assert_eq!(decode_completion(body).unwrap(), "[]");

        assert!(matches!(
            decode_completion(br#"{"choices":[]}"#),
            Err(GeneratorError::Decode(_))
        ));
        assert!(decode_completion(b"<html>").is_err());
    }

    #[test]
    fn test_remote_adapter_needs_valid_url() {
        let config = AssessmentConfig {
            api_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(init_test_generator(&config).is_err());
    }
}
