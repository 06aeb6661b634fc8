use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("LLM API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response format from LLM")]
    EmptyResponse,
}

/// Text generation used for bill summaries and the senator role-play.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, LlmError>;

    async fn senator_chat(
        &self,
        prompt: &str,
        senator_name: &str,
        party: &str,
    ) -> Result<String, LlmError>;
}

pub fn build_summary_prompt(text: &str, tone: &str) -> String {
    let mut result = String::with_capacity(text.len() + 80);
    result.push_str("Summarize the following legislative bill in a ");
    result.push_str(tone);
    result.push_str(" tone:\n\n");
    result.push_str(text);
    result
}

pub fn build_senator_prompt(prompt: &str, senator_name: &str, party: &str) -> String {
    format!(
        "You are {senator_name}, a {party} senator. \
         Respond factually and diplomatically about current legislation.\nUser: {prompt}"
    )
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Gemini `generateContent` client.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    summary_model: String,
    chat_model: String,
    tone: String,
}

impl GeminiClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            summary_model: "gemini-1.5-flash".into(),
            chat_model: "gemini-1.5-pro".into(),
            tone: "neutral".into(),
        }
    }

    pub fn with_models(mut self, summary_model: impl Into<String>, chat_model: impl Into<String>) -> Self {
        self.summary_model = summary_model.into();
        self.chat_model = chat_model.into();
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user".into(),
                parts: vec![Part { text: prompt.into() }],
            }],
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        tracing::debug!(model, prompt_len = prompt.len(), "calling generateContent");

        let res = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let json: GenerateResponse = res.json().await?;
        let reply: String = json
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if reply.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(reply)
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn summarize(&self, text: &str) -> Result<String, LlmError> {
        let prompt = build_summary_prompt(text, &self.tone);
        self.generate(&self.summary_model, &prompt).await
    }

    async fn senator_chat(
        &self,
        prompt: &str,
        senator_name: &str,
        party: &str,
    ) -> Result<String, LlmError> {
        let prompt = build_senator_prompt(prompt, senator_name, party);
        self.generate(&self.chat_model, &prompt).await
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(clippy::unwrap_used)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{LanguageModel, LlmError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Canned replies with recorded inputs. Unset results fail with
    /// `LlmError::EmptyResponse`.
    #[derive(Default)]
    pub struct MockLanguageModel {
        summary_result: Mutex<Option<Result<String, String>>>,
        chat_result: Mutex<Option<Result<String, String>>>,
        summarized: Mutex<Vec<String>>,
        chats: Mutex<Vec<(String, String, String)>>,
    }

    impl MockLanguageModel {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_summary_result(&self, result: Result<String, String>) {
            *self.summary_result.lock().unwrap() = Some(result);
        }

        pub fn set_chat_result(&self, result: Result<String, String>) {
            *self.chat_result.lock().unwrap() = Some(result);
        }

        /// Texts passed to `summarize`.
        pub fn summarized(&self) -> Vec<String> {
            self.summarized.lock().unwrap().clone()
        }

        /// `(prompt, senator_name, party)` passed to `senator_chat`.
        pub fn chats(&self) -> Vec<(String, String, String)> {
            self.chats.lock().unwrap().clone()
        }
    }

    fn replay(slot: &Mutex<Option<Result<String, String>>>) -> Result<String, LlmError> {
        match slot.lock().unwrap().as_ref() {
            Some(Ok(reply)) => Ok(reply.clone()),
            Some(Err(message)) => Err(LlmError::ApiError {
                status: 500,
                message: message.clone(),
            }),
            None => Err(LlmError::EmptyResponse),
        }
    }

    #[async_trait]
    impl LanguageModel for MockLanguageModel {
        async fn summarize(&self, text: &str) -> Result<String, LlmError> {
            self.summarized.lock().unwrap().push(text.to_string());
            replay(&self.summary_result)
        }

        async fn senator_chat(
            &self,
            prompt: &str,
            senator_name: &str,
            party: &str,
        ) -> Result<String, LlmError> {
            self.chats.lock().unwrap().push((
                prompt.to_string(),
                senator_name.to_string(),
                party.to_string(),
            ));
            replay(&self.chat_result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_prompt_carries_tone_and_text() {
        let prompt = build_summary_prompt("SECTION 1. Short title.", "neutral");
        assert_eq!(
            prompt,
            "Summarize the following legislative bill in a neutral tone:\n\nSECTION 1. Short title."
        );
    }

    #[test]
    fn senator_prompt_sets_persona() {
        let prompt = build_senator_prompt("What about HR 1?", "Jane Smith", "Democratic");
        assert!(prompt.starts_with("You are Jane Smith, a Democratic senator. Respond factually"));
        assert!(prompt.ends_with("\nUser: What about HR 1?"));
    }
}
